//! LLM-backed gift idea generation
//!
//! This crate plugs a language model into the recommendation engine:
//! - `llm` holds the `LlmClient` seam and an HTTP client for OpenAI-compatible,
//!   Anthropic and Ollama endpoints
//! - `generator` turns completions into `GeneratedGift`s for the core
//!   `GiftIdeaGenerator` trait
//!
//! # Safety Principle
//!
//! The model only proposes. Validation, price rounding, links and the
//! fallback to catalog picks stay in `gifting-core`.

pub mod generator;
pub mod llm;

use std::sync::Arc;

use anyhow::Result;
use gifting_core::config::LlmConfig;
use gifting_core::GiftIdeaGenerator;

pub use generator::LlmGiftGenerator;
pub use llm::{HttpLlmClient, LlmClient};

/// Builds the configured generator, or `None` when the provider has no credentials.
pub fn generator_from_config(config: &LlmConfig) -> Result<Option<Arc<dyn GiftIdeaGenerator>>> {
    let generator = HttpLlmClient::from_config(config)?.map(|client| {
        Arc::new(LlmGiftGenerator::new(client).with_label(config.provider.as_str()))
            as Arc<dyn GiftIdeaGenerator>
    });
    Ok(generator)
}
