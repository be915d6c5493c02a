pub mod catalog;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod generator;
pub mod recommendations;

pub use catalog::{CatalogItem, GiftCatalog, GiftCategory, GiftType};
pub use classifier::{
    classify_occasion, classify_relationship, OccasionProfile, OccasionTag, RelationshipProfile,
    RelationshipTag,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use generator::{GeneratedGift, GenerationError, GenerationRequest, GiftIdeaGenerator};
pub use recommendations::{
    EngineSettings, Recommendation, RecommendationEngine, RecommendationRequest,
    RecommendationResponse,
};
