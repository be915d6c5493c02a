use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::links::PurchaseLinks;
use super::pricing::{anchor_to_budget, format_inr, round_to_step, synthesize_price};
use super::selector::{pick_items, select_categories};
use super::{rationale, Recommendation, RecommendationRequest, RecommendationResponse};
use super::{RecommendationResult, RequestContext, DEFAULT_MAX_ATTEMPTS};
use crate::catalog::{GiftCatalog, GiftType};
use crate::generator::{GeneratedGift, GenerationError, GenerationRequest, GiftIdeaGenerator};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineSettings {
    pub max_attempts: usize,
    /// Upper bound on one generator call, including every round trip it makes
    pub generation_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS, generation_timeout: Duration::from_secs(30) }
    }
}

/// Produces recommendations from the static catalog, optionally trying an
/// external generator first. Holds no per-request state.
#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Arc<GiftCatalog>,
    generator: Option<Arc<dyn GiftIdeaGenerator>>,
    settings: EngineSettings,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(Arc::new(GiftCatalog::builtin().clone()))
    }
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<GiftCatalog>) -> Self {
        Self { catalog, generator: None, settings: EngineSettings::default() }
    }

    pub fn with_generator(mut self, generator: Arc<dyn GiftIdeaGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    pub fn catalog(&self) -> &GiftCatalog {
        &self.catalog
    }

    /// Deterministic path only. Identical requests give identical responses.
    pub fn recommend_rules(
        &self,
        request: &RecommendationRequest,
    ) -> RecommendationResult<RecommendationResponse> {
        request.validate()?;
        let context = RequestContext::classify(request.clone());
        Ok(self.rules_response(&context))
    }

    /// Tries the generator when one is attached, falling back to the
    /// deterministic path on any failure. Only request validation can fail.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> RecommendationResult<RecommendationResponse> {
        request.validate()?;
        let context = RequestContext::classify(request.clone());

        let Some(generator) = &self.generator else {
            return Ok(self.rules_response(&context));
        };

        match self.generate(generator.as_ref(), &context).await {
            Ok(recommendations) => {
                debug!(
                    event_name = "recommend.generator.accepted",
                    generator = generator.name(),
                    count = recommendations.len(),
                    "generated recommendations accepted"
                );
                Ok(RecommendationResponse {
                    thinking_trace: rationale::thinking_trace(&context),
                    recommendations,
                    pro_tip: rationale::pro_tip(&context).to_string(),
                    ai_powered: true,
                })
            }
            Err(error) => {
                warn!(
                    event_name = "recommend.generator.fallback",
                    generator = generator.name(),
                    error = %error,
                    "generator output unusable, falling back to catalog picks"
                );
                Ok(self.rules_response(&context))
            }
        }
    }

    async fn generate(
        &self,
        generator: &dyn GiftIdeaGenerator,
        context: &RequestContext,
    ) -> Result<Vec<Recommendation>, GenerationError> {
        let request = GenerationRequest::from_context(context);
        let timeout = self.settings.generation_timeout;
        let gifts = tokio::time::timeout(timeout, generator.generate(&request))
            .await
            .map_err(|_| GenerationError::Timeout(timeout.as_secs()))??;

        accept_generated(&self.catalog, context, gifts)
    }

    fn rules_response(&self, context: &RequestContext) -> RecommendationResponse {
        let request = &context.request;
        let categories = select_categories(context);
        let picks = pick_items(
            &self.catalog,
            &categories,
            context,
            request.max_recommendations,
            self.settings.max_attempts,
        );
        let why_applicable = rationale::why_applicable(context);

        let recommendations = picks
            .iter()
            .enumerate()
            .map(|(position, pick)| {
                let price = synthesize_price(request.budget, pick.price_multiplier);
                Recommendation {
                    id: position as u32 + 1,
                    title: pick.item.name.to_string(),
                    icon: pick.item.icon.to_string(),
                    gift_type: pick.item.gift_type,
                    description: rationale::describe(context, position),
                    why_applicable: why_applicable.clone(),
                    approx_price_inr: format_inr(price),
                    purchase_links: PurchaseLinks::for_title(pick.item.name),
                    price,
                    category: Some(pick.category),
                }
            })
            .collect();

        RecommendationResponse {
            thinking_trace: rationale::thinking_trace(context),
            recommendations,
            pro_tip: rationale::pro_tip(context).to_string(),
            ai_powered: false,
        }
    }
}

/// All-or-nothing conversion of generator output into recommendations.
fn accept_generated(
    catalog: &GiftCatalog,
    context: &RequestContext,
    gifts: Vec<GeneratedGift>,
) -> Result<Vec<Recommendation>, GenerationError> {
    if gifts.is_empty() {
        return Err(GenerationError::Rejected("no gift ideas returned".to_string()));
    }

    let request = &context.request;
    let mut seen = HashSet::new();
    let mut accepted = Vec::with_capacity(gifts.len().min(request.max_recommendations));

    for (position, gift) in gifts.into_iter().take(request.max_recommendations).enumerate() {
        let title = gift.title.trim().to_string();
        if title.is_empty() {
            return Err(GenerationError::Rejected(format!("gift #{} has no title", position + 1)));
        }
        if !seen.insert(title.to_lowercase()) {
            return Err(GenerationError::Rejected(format!("duplicate title `{title}`")));
        }

        let gift_type = gift
            .gift_type
            .parse::<GiftType>()
            .map_err(|error| GenerationError::Rejected(format!("`{title}`: {error}")))?;
        if !request.allows(gift_type) {
            return Err(GenerationError::Rejected(format!(
                "`{title}` has gift type {gift_type} outside the requested types"
            )));
        }

        let price = gift
            .price
            .filter(|price| price.is_finite() && *price > 0.0)
            .map(|price| anchor_to_budget(price, request.budget))
            .and_then(round_to_step)
            .filter(|price| *price > 0)
            .ok_or_else(|| GenerationError::Rejected(format!("`{title}` has no usable price")))?;

        let why_applicable = gift.why_applicable.trim().to_string();
        if why_applicable.is_empty() {
            return Err(GenerationError::Rejected(format!("`{title}` has no rationale")));
        }

        let description = match gift.description.trim() {
            "" => rationale::describe(context, position),
            text => text.to_string(),
        };
        let icon = gift
            .icon
            .map(|icon| icon.trim().to_string())
            .filter(|icon| !icon.is_empty())
            .unwrap_or_else(|| catalog.icon_of(&title).to_string());

        accepted.push(Recommendation {
            id: position as u32 + 1,
            purchase_links: PurchaseLinks::for_title(&title),
            icon,
            gift_type,
            description,
            why_applicable,
            approx_price_inr: format_inr(price),
            price,
            category: None,
            title,
        });
    }

    Ok(accepted)
}
