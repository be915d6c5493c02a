//! Gift idea generation over an [`LlmClient`].
//!
//! Two completions per request: the first asks for a JSON array of ideas, the
//! second for a JSON object mapping each title to a personal reason. The model
//! never sees links and its prices are re-rounded by the engine.

use std::collections::HashMap;
use std::fmt::Write;

use async_trait::async_trait;
use gifting_core::generator::{
    GeneratedGift, GenerationError, GenerationRequest, GiftIdeaGenerator,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::llm::LlmClient;

pub struct LlmGiftGenerator<C> {
    client: C,
    label: String,
}

impl<C: LlmClient> LlmGiftGenerator<C> {
    pub fn new(client: C) -> Self {
        Self { client, label: "llm".to_string() }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    async fn complete_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        pass: &'static str,
    ) -> Result<T, GenerationError> {
        let raw = self
            .client
            .complete(prompt)
            .await
            .map_err(|error| GenerationError::Transport(format!("{pass} pass: {error:#}")))?;
        debug!(event_name = "recommend.generator.completion", pass, bytes = raw.len());

        serde_json::from_str(extract_json(&raw))
            .map_err(|error| GenerationError::Malformed(format!("{pass} pass: {error}")))
    }
}

#[async_trait]
impl<C: LlmClient> GiftIdeaGenerator for LlmGiftGenerator<C> {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedGift>, GenerationError> {
        let mut ideas: Vec<GeneratedGift> =
            self.complete_json(&ideas_prompt(request), "ideas").await?;
        if ideas.is_empty() {
            return Err(GenerationError::Rejected("model proposed no ideas".to_string()));
        }

        let titles: Vec<&str> = ideas.iter().map(|idea| idea.title.as_str()).collect();
        let reasons: HashMap<String, String> =
            self.complete_json(&rationale_prompt(request, &titles), "rationale").await?;
        let reasons: HashMap<String, String> =
            reasons.into_iter().map(|(title, why)| (title.trim().to_lowercase(), why)).collect();

        for idea in &mut ideas {
            if let Some(why) = reasons.get(&idea.title.trim().to_lowercase()) {
                idea.why_applicable = why.trim().to_string();
            }
        }

        Ok(ideas)
    }

    fn name(&self) -> &str {
        &self.label
    }
}

fn describe_recipient(request: &GenerationRequest) -> String {
    let mut text = format!(
        "Recipient: my {} ({} relationship), age group {}",
        request.relationship, request.relationship_tag, request.age_group
    );
    if !request.gender.trim().is_empty() {
        let _ = write!(text, ", gender {}", request.gender.trim());
    }
    let _ = write!(
        text,
        "\nOccasion: {} ({})\nPreferred style: {}\nBudget: Rs.{}",
        request.occasion, request.occasion_tag, request.vibe, request.budget
    );
    if !request.notes.trim().is_empty() {
        let _ = write!(text, "\nNotes from the giver: {}", request.notes.trim());
    }
    text
}

pub fn ideas_prompt(request: &GenerationRequest) -> String {
    let allowed: Vec<&str> = request.gift_types.iter().map(|gift_type| gift_type.as_str()).collect();
    format!(
        "You suggest culturally appropriate gifts for Indian occasions.\n\n\
         {recipient}\n\n\
         Suggest exactly {count} distinct gifts. Respond ONLY with a JSON array where each element is \
         {{\"title\": string, \"gift_type\": one of [{types}], \"description\": string, \
         \"price\": number in rupees close to the budget, \"icon\": a single emoji}}.",
        recipient = describe_recipient(request),
        count = request.count,
        types = allowed.join(", "),
    )
}

pub fn rationale_prompt(request: &GenerationRequest, titles: &[&str]) -> String {
    let mut listing = String::new();
    for title in titles {
        let _ = writeln!(listing, "- {title}");
    }
    format!(
        "{recipient}\n\n\
         For each gift below write one sentence on why it suits this recipient and occasion.\n\
         {listing}\n\
         Respond ONLY with a JSON object mapping each gift title exactly as written to its sentence.",
        recipient = describe_recipient(request),
    )
}

/// Strips markdown fences and surrounding prose, leaving the outermost JSON
/// array or object.
pub fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();
    let start = trimmed.find(['[', '{']);
    let end = trimmed.rfind([']', '}']);
    match (start, end) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}
