use chrono::{DateTime, Utc};

use crate::core::{
    compatibility::compute_match,
    diversify::diversify_rank,
    urgency::{build_why_urgent, compute_urgency, round_to},
};
use crate::models::{
    MatchResult, PetRecord, PetSummary, RankedPet, ScoredPet, UrgencyWeights, UserPreference,
};

/// Ranking orchestrator for the pet feeds
///
/// # Pipeline
/// 1. Urgency scoring of every candidate
/// 2. Stable sort by descending urgency
/// 3. Truncation (urgent feed) or diversification (explore feed)
/// 4. Projection to the public pet fields
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: UrgencyWeights,
}

impl Ranker {
    pub fn new(weights: UrgencyWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: UrgencyWeights::default(),
        }
    }

    pub fn weights(&self) -> &UrgencyWeights {
        &self.weights
    }

    /// Score each candidate and sort by urgency, highest first
    ///
    /// Candidates with equal urgency keep their input order.
    pub fn score_pool(&self, candidates: Vec<PetRecord>, now: DateTime<Utc>) -> Vec<ScoredPet> {
        let mut scored: Vec<ScoredPet> = candidates
            .into_iter()
            .map(|pet| {
                let urgency = compute_urgency(&pet, now, &self.weights);
                ScoredPet { pet, urgency }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.urgency
                .partial_cmp(&a.urgency)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored
    }

    /// Most urgent listings with an explanation for each
    pub fn urgent(
        &self,
        candidates: Vec<PetRecord>,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<RankedPet> {
        let mut scored = self.score_pool(candidates, now);
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|scored| {
                let why = build_why_urgent(&scored.pet, now);
                RankedPet {
                    pet: PetSummary::from(&scored.pet),
                    urgency_score: round_to(scored.urgency, 2),
                    days_in_shelter: Some(why.days_in_shelter),
                    why_urgent: Some(why.why_urgent),
                }
            })
            .collect()
    }

    /// Urgent listings re-ranked so that similar pets do not crowd the page
    pub fn explore(
        &self,
        candidates: Vec<PetRecord>,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<RankedPet> {
        let scored = self.score_pool(candidates, now);

        diversify_rank(scored, limit)
            .into_iter()
            .map(|scored| RankedPet {
                pet: PetSummary::from(&scored.pet),
                urgency_score: round_to(scored.urgency, 2),
                days_in_shelter: None,
                why_urgent: None,
            })
            .collect()
    }

    /// Compatibility of one pet with an adopter
    pub fn match_pet(&self, pet: &PetRecord, user: &UserPreference) -> MatchResult {
        compute_match(pet, user)
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
