use chrono::{DateTime, Utc};

use crate::models::{PetRecord, UrgencyResult, UrgencyWeights, WhyUrgent};

/// Listings in care at least this long are called out as long stays
const LONG_STAY_DAYS: f64 = 7.0;
/// View counts at or below this are called out as low visibility
const LOW_VISIBILITY_VIEWS: f64 = 1.0;
const HIGH_ENERGY: i64 = 4;
const MAX_REASONS: usize = 3;

/// Calculate how much a listing needs promotional exposure
///
/// Scoring formula:
/// score = (
///     days_in_care * 2.0 +         # Longer stays rise steadily
///     high_energy_bonus (3.0) +    # energy >= 4
///     medical_bonus (6.0) -        # medicalNeeds = true
///     ln(1 + views7d) * 2.0        # Recent visibility, damped
/// )
///
/// The coefficients come from `weights`; the numbers above are the defaults.
pub fn compute_urgency(pet: &PetRecord, now: DateTime<Utc>, weights: &UrgencyWeights) -> f64 {
    let days = pet.days_in_care(now);
    let energy_bonus = if pet.energy() >= HIGH_ENERGY { weights.high_energy } else { 0.0 };
    let medical_bonus = if pet.medical_needs() { weights.medical } else { 0.0 };
    let visibility_penalty = pet.views_7d().ln_1p() * weights.visibility;

    days * weights.per_day + energy_bonus + medical_bonus - visibility_penalty
}

/// Explain an urgency score in at most three short phrases
///
/// Reasons are emitted in a fixed priority order. A listing that triggers
/// none of them still gets `"Needs exposure"`.
pub fn build_why_urgent(pet: &PetRecord, now: DateTime<Utc>) -> WhyUrgent {
    let days = pet.days_in_care(now);

    let mut reasons = Vec::with_capacity(4);
    if pet.medical_needs() {
        reasons.push("Medical needs".to_string());
    }
    if pet.energy() >= HIGH_ENERGY {
        reasons.push("High energy".to_string());
    }
    if days >= LONG_STAY_DAYS {
        reasons.push(format!("Long stay ({}d)", days.trunc() as i64));
    }
    if pet.views_7d() <= LOW_VISIBILITY_VIEWS {
        reasons.push("Low visibility".to_string());
    }

    if reasons.is_empty() {
        reasons.push("Needs exposure".to_string());
    }
    reasons.truncate(MAX_REASONS);

    WhyUrgent {
        days_in_shelter: round_to(days, 1),
        why_urgent: reasons,
    }
}

/// Score and explanation together
pub fn assess_urgency(
    pet: &PetRecord,
    now: DateTime<Utc>,
    weights: &UrgencyWeights,
) -> UrgencyResult {
    let score = compute_urgency(pet, now, weights);
    let why = build_why_urgent(pet, now);

    UrgencyResult {
        score,
        days_in_shelter: why.days_in_shelter,
        why_urgent: why.why_urgent,
    }
}

#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
