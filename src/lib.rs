//! Pawlink Algo - ranking and matching service for the Pawlink adoption marketplace
//!
//! This library ranks adoptable pets by how urgently they need a home,
//! spreads the discovery feed across species, breeds and sizes, and scores
//! how well a pet fits an adopter's household.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compute_match, compute_urgency, diversify_rank, similarity, Ranker};
pub use crate::models::{MatchResult, PetRecord, RankedPet, UrgencyWeights, UserPreference};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let pet = PetRecord {
            id: "p1".to_string(),
            ..Default::default()
        };
        assert_eq!(similarity(&pet, &pet), crate::core::MAX_SIMILARITY);
    }
}
