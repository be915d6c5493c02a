//! Gift recommendation pipeline
//!
//! classify → select categories → (external generator | seeded item picks)
//! → price synthesis → rationale composition.

mod engine;
pub mod links;
pub mod pricing;
pub mod rationale;
pub mod seed;
pub mod selector;
mod types;

pub use engine::{EngineSettings, RecommendationEngine};
pub use types::*;

use crate::errors::DomainError;

/// Result type for recommendation operations
pub type RecommendationResult<T> = Result<T, DomainError>;

/// Recommendations returned when the caller does not ask for a specific count
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 10;

/// Upper bound on seeded pick attempts per request
pub const DEFAULT_MAX_ATTEMPTS: usize = 50;

pub const MIN_BUDGET: i64 = 100;
pub const MAX_BUDGET: i64 = 1_000_000;

pub const DEFAULT_AGE_GROUP: &str = "Adult";
pub const DEFAULT_VIBE: &str = "Traditional";
