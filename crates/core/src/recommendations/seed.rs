//! Stable seed derivation for the seeded item picks.
//!
//! The seed is the first eight bytes (little-endian) of
//! `blake3(relationship ‖ occasion ‖ vibe ‖ gender ‖ attempt)`, so the same
//! request always yields the same picks across processes and platforms.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::RecommendationRequest;

pub fn attempt_seed(request: &RecommendationRequest, attempt: usize) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(request.relationship.as_bytes());
    hasher.update(request.occasion.as_bytes());
    hasher.update(request.vibe.as_bytes());
    hasher.update(request.gender.as_bytes());
    hasher.update(attempt.to_string().as_bytes());

    let digest = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(prefix)
}

pub fn attempt_rng(request: &RecommendationRequest, attempt: usize) -> StdRng {
    StdRng::seed_from_u64(attempt_seed(request, attempt))
}
