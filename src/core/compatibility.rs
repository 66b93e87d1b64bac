use crate::models::{MatchResult, PetRecord, UserPreference, YardAccess};

const BASE_SCORE: i64 = 50;
const MAX_MESSAGES: usize = 3;

/// Score how well a pet fits an adopter's home and schedule (0-100)
///
/// Rules are additive and evaluated in a fixed order; the order only
/// affects how `reasons` and `warnings` are listed. Each list keeps its
/// first three entries.
pub fn compute_match(pet: &PetRecord, user: &UserPreference) -> MatchResult {
    let mut score = BASE_SCORE;
    let mut reasons: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let energy = pet.energy();
    let high_energy = energy >= 4;
    let hours = user.hours_per_week;

    // Energy vs. available time
    if high_energy && hours < 6.0 {
        score -= 18;
        warnings.push("High-energy pet but your available hours/week is low.".to_string());
    } else if high_energy && hours >= 10.0 {
        score += 10;
        reasons.push("Your schedule fits a high-energy pet.".to_string());
    } else if energy <= 2 && hours >= 10.0 {
        score += 4;
        reasons.push("You have plenty of time for a calmer pet too.".to_string());
    }

    // Yard
    if high_energy {
        match user.has_yard {
            YardAccess::Yes => {
                score += 6;
                reasons.push("A yard helps with high-energy pets.".to_string());
            }
            YardAccess::No => {
                score -= 6;
                warnings.push(
                    "No yard—high-energy pets may need more walks/training time.".to_string(),
                );
            }
            YardAccess::Unknown => {}
        }
    }

    // Medical care
    if !pet.medical_needs() {
        score += 2;
        reasons.push("No special medical needs reported.".to_string());
    } else if user.experience_level <= 1 {
        score -= 14;
        warnings.push(
            "Pet may need medical care; consider more experience or support.".to_string(),
        );
    } else {
        score += 6;
        reasons.push("Your experience level helps with medical needs.".to_string());
    }

    // Size preference
    if let Some(preferred) = user.size_preference().map(str::to_lowercase) {
        let size = pet.size();
        if size.to_lowercase() == preferred {
            score += 8;
            reasons.push(format!("Matches your preferred size ({}).", size));
        } else {
            score -= 4;
            warnings.push(format!("Doesn't match your preferred size ({}).", preferred));
        }
    }

    reasons.truncate(MAX_MESSAGES);
    warnings.truncate(MAX_MESSAGES);

    MatchResult {
        score: score.clamp(0, 100) as u8,
        reasons,
        warnings,
    }
}
