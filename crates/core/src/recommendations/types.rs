//! Types for the recommendation pipeline

use serde::Serialize;

use super::links::PurchaseLinks;
use super::{RecommendationResult, DEFAULT_AGE_GROUP, DEFAULT_MAX_RECOMMENDATIONS, DEFAULT_VIBE};
use super::{MAX_BUDGET, MIN_BUDGET};
use crate::catalog::{GiftCategory, GiftType};
use crate::classifier::{
    classify_occasion, classify_relationship, OccasionProfile, RelationshipProfile,
};
use crate::errors::DomainError;

/// Caller input for one recommendation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub relationship: String,
    pub occasion: String,
    pub age_group: String,
    pub vibe: String,
    /// Budget in whole rupees
    pub budget: i64,
    pub gender: String,
    pub notes: String,
    /// Allowed gift types; every type by default
    pub gift_types: Vec<GiftType>,
    pub max_recommendations: usize,
}

impl RecommendationRequest {
    pub fn new(relationship: impl Into<String>, occasion: impl Into<String>, budget: i64) -> Self {
        Self {
            relationship: relationship.into(),
            occasion: occasion.into(),
            age_group: DEFAULT_AGE_GROUP.to_string(),
            vibe: DEFAULT_VIBE.to_string(),
            budget,
            gender: String::new(),
            notes: String::new(),
            gift_types: GiftType::ALL.to_vec(),
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
        }
    }

    pub fn with_age_group(mut self, age_group: impl Into<String>) -> Self {
        self.age_group = age_group.into();
        self
    }

    pub fn with_vibe(mut self, vibe: impl Into<String>) -> Self {
        self.vibe = vibe.into();
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// An empty list keeps the default of every type.
    pub fn with_gift_types(mut self, gift_types: Vec<GiftType>) -> Self {
        if !gift_types.is_empty() {
            let mut deduped = Vec::with_capacity(gift_types.len());
            for gift_type in gift_types {
                if !deduped.contains(&gift_type) {
                    deduped.push(gift_type);
                }
            }
            self.gift_types = deduped;
        }
        self
    }

    pub fn with_max_recommendations(mut self, max: usize) -> Self {
        self.max_recommendations = max;
        self
    }

    pub fn validate(&self) -> RecommendationResult<()> {
        if self.relationship.trim().is_empty() {
            return Err(DomainError::MissingField("relationship"));
        }
        if self.occasion.trim().is_empty() {
            return Err(DomainError::MissingField("occasion"));
        }
        if !(MIN_BUDGET..=MAX_BUDGET).contains(&self.budget) {
            return Err(DomainError::BudgetOutOfRange {
                budget: self.budget,
                min: MIN_BUDGET,
                max: MAX_BUDGET,
            });
        }
        if self.max_recommendations == 0 {
            return Err(DomainError::InvalidField {
                field: "max_recommendations",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn allows(&self, gift_type: GiftType) -> bool {
        self.gift_types.contains(&gift_type)
    }

    /// True when the caller narrowed the allow-list below the full set.
    pub fn filters_types(&self) -> bool {
        GiftType::ALL.iter().any(|gift_type| !self.allows(*gift_type))
    }

    pub fn is_child(&self) -> bool {
        self.age_group.trim().eq_ignore_ascii_case("child")
    }

    pub fn gender_hint(&self) -> GenderHint {
        match self.gender.trim().to_ascii_lowercase().as_str() {
            "male" => GenderHint::Male,
            "female" => GenderHint::Female,
            _ => GenderHint::Unspecified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenderHint {
    Male,
    Female,
    Unspecified,
}

/// A validated request together with its resolved tags. Lives for one request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request: RecommendationRequest,
    pub relationship: RelationshipProfile,
    pub occasion: OccasionProfile,
}

impl RequestContext {
    pub fn classify(request: RecommendationRequest) -> Self {
        let relationship = classify_relationship(&request.relationship);
        let occasion = classify_occasion(&request.occasion);
        Self { request, relationship, occasion }
    }
}

/// One suggested gift as returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub id: u32,
    pub title: String,
    pub icon: String,
    pub gift_type: GiftType,
    pub description: String,
    pub why_applicable: String,
    pub approx_price_inr: String,
    pub purchase_links: PurchaseLinks,
    /// Display price in rupees, always a multiple of 50
    #[serde(skip)]
    pub price: u64,
    /// Catalog bucket the item was drawn from; absent for generated ideas
    #[serde(skip)]
    pub category: Option<GiftCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationResponse {
    pub thinking_trace: String,
    pub recommendations: Vec<Recommendation>,
    pub pro_tip: String,
    pub ai_powered: bool,
}

impl RecommendationResponse {
    pub fn titles(&self) -> Vec<&str> {
        self.recommendations.iter().map(|recommendation| recommendation.title.as_str()).collect()
    }
}
