//! Seam for externally generated gift ideas.
//!
//! The engine treats any implementation as untrusted: output is validated in
//! full and discarded on the first problem, so a generator can never turn a
//! request into an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::GiftType;
use crate::classifier::{OccasionTag, RelationshipTag};
use crate::recommendations::RequestContext;

/// Everything a generator may use to tailor its ideas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub relationship: String,
    pub relationship_tag: RelationshipTag,
    pub occasion: String,
    pub occasion_tag: OccasionTag,
    pub age_group: String,
    pub vibe: String,
    pub budget: i64,
    pub gender: String,
    pub notes: String,
    pub gift_types: Vec<GiftType>,
    pub count: usize,
}

impl GenerationRequest {
    pub fn from_context(context: &RequestContext) -> Self {
        let request = &context.request;
        Self {
            relationship: request.relationship.clone(),
            relationship_tag: context.relationship.tag,
            occasion: request.occasion.clone(),
            occasion_tag: context.occasion.tag,
            age_group: request.age_group.clone(),
            vibe: request.vibe.clone(),
            budget: request.budget,
            gender: request.gender.clone(),
            notes: request.notes.clone(),
            gift_types: request.gift_types.clone(),
            count: request.max_recommendations,
        }
    }
}

/// One raw idea as produced by a generator. `gift_type` stays a string until
/// the engine has checked it against the allow-list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedGift {
    pub title: String,
    #[serde(default)]
    pub gift_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub why_applicable: String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("generator transport failed: {0}")]
    Transport(String),
    #[error("generator timed out after {0} seconds")]
    Timeout(u64),
    #[error("generator returned malformed output: {0}")]
    Malformed(String),
    #[error("generated gift rejected: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait GiftIdeaGenerator: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedGift>, GenerationError>;

    /// Short label for logs.
    fn name(&self) -> &str {
        "external"
    }
}
