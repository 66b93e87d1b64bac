// Unit tests for Pawlink Algo

use chrono::{DateTime, Duration, TimeZone, Utc};
use pawlink_algo::core::{
    build_why_urgent, compute_match, compute_urgency, diversify_rank, similarity, MAX_SIMILARITY,
};
use pawlink_algo::models::{PetRecord, UrgencyWeights, UserPreference, YardAccess};
use std::collections::HashSet;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap()
}

fn create_test_pet(id: &str, species: &str, breed: &str, size: &str) -> PetRecord {
    PetRecord {
        id: id.to_string(),
        species: Some(species.to_string()),
        breed: Some(breed.to_string()),
        size: Some(size.to_string()),
        status: Some("adoptable".to_string()),
        ..Default::default()
    }
}

fn in_care_for(days: i64) -> PetRecord {
    PetRecord {
        id: format!("days-{}", days),
        created_at: Some(now() - Duration::days(days)),
        ..Default::default()
    }
}

#[test]
fn test_urgency_grows_with_days_in_care() {
    let weights = UrgencyWeights::default();
    let mut previous = f64::MIN;

    for days in [0, 1, 3, 7, 30, 120, 365] {
        let score = compute_urgency(&in_care_for(days), now(), &weights);
        assert!(score >= previous, "urgency dropped at {} days", days);
        previous = score;
    }
}

#[test]
fn test_medical_needs_never_lowers_urgency() {
    let weights = UrgencyWeights::default();

    for days in [0, 5, 40] {
        let mut pet = in_care_for(days);
        pet.medical_needs = Some(false);
        let without = compute_urgency(&pet, now(), &weights);
        pet.medical_needs = Some(true);
        let with = compute_urgency(&pet, now(), &weights);

        assert!(with >= without);
        assert!((with - without - 6.0).abs() < 1e-9);
    }
}

#[test]
fn test_urgency_scenario_ten_days_high_energy_medical() {
    let pet = PetRecord {
        id: "c".to_string(),
        energy: Some(5),
        medical_needs: Some(true),
        views_7d: Some(0.0),
        created_at: Some(now() - Duration::days(10)),
        ..Default::default()
    };

    let score = compute_urgency(&pet, now(), &UrgencyWeights::default());
    assert!((score - 29.0).abs() < 1e-9, "expected 29.0, got {}", score);
}

#[test]
fn test_why_urgent_has_one_to_three_reasons() {
    let pets = vec![
        PetRecord {
            id: "busy".to_string(),
            energy: Some(5),
            medical_needs: Some(true),
            views_7d: Some(0.0),
            created_at: Some(now() - Duration::days(30)),
            ..Default::default()
        },
        PetRecord {
            id: "quiet".to_string(),
            energy: Some(2),
            views_7d: Some(50.0),
            created_at: Some(now() - Duration::days(1)),
            ..Default::default()
        },
        in_care_for(8),
    ];

    for pet in &pets {
        let why = build_why_urgent(pet, now());
        assert!(!why.why_urgent.is_empty() && why.why_urgent.len() <= 3);
    }
}

#[test]
fn test_needs_exposure_only_without_other_reasons() {
    let quiet = PetRecord {
        id: "quiet".to_string(),
        energy: Some(2),
        views_7d: Some(50.0),
        created_at: Some(now() - Duration::days(1)),
        ..Default::default()
    };
    assert_eq!(build_why_urgent(&quiet, now()).why_urgent, vec!["Needs exposure"]);

    // Unknown views count as zero, which is low visibility
    let unseen = in_care_for(1);
    assert_eq!(build_why_urgent(&unseen, now()).why_urgent, vec!["Low visibility"]);
}

#[test]
fn test_long_stay_reason_uses_whole_days() {
    let pet = PetRecord {
        id: "long".to_string(),
        views_7d: Some(10.0),
        created_at: Some(now() - Duration::hours(10 * 24 + 20)),
        ..Default::default()
    };

    let why = build_why_urgent(&pet, now());
    assert_eq!(why.why_urgent, vec!["Long stay (10d)"]);
    assert_eq!(why.days_in_shelter, 10.8);
}

#[test]
fn test_similarity_is_symmetric() {
    let pets = vec![
        create_test_pet("1", "dog", "lab", "large"),
        create_test_pet("2", "dog", "poodle", "small"),
        create_test_pet("3", "cat", "lab", "large"),
        PetRecord {
            id: "4".to_string(),
            ..Default::default()
        },
    ];

    for a in &pets {
        assert_eq!(similarity(a, a), MAX_SIMILARITY);
        for b in &pets {
            assert_eq!(similarity(a, b), similarity(b, a));
        }
    }
}

#[test]
fn test_similarity_components() {
    let lab = create_test_pet("1", "dog", "lab", "large");

    assert_eq!(similarity(&lab, &create_test_pet("2", "dog", "lab", "small")), 9.0);
    assert_eq!(similarity(&lab, &create_test_pet("3", "cat", "lab", "large")), 7.0);
    assert_eq!(similarity(&lab, &create_test_pet("4", "cat", "tabby", "small")), 0.0);
}

#[test]
fn test_diversify_invariants() {
    let candidates = vec![
        create_test_pet("1", "dog", "lab", "large"),
        create_test_pet("2", "dog", "lab", "large"),
        create_test_pet("3", "dog", "poodle", "small"),
        create_test_pet("4", "cat", "tabby", "small"),
        create_test_pet("5", "rabbit", "lop", "small"),
        create_test_pet("6", "dog", "lab", "medium"),
    ];

    assert!(diversify_rank(Vec::<PetRecord>::new(), 5).is_empty());

    for k in 1..=8 {
        let picked = diversify_rank(candidates.clone(), k);
        assert_eq!(picked.len(), k.min(candidates.len()));
        assert_eq!(picked[0].id, "1");

        let unique: HashSet<&str> = picked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(unique.len(), picked.len());
    }
}

#[test]
fn test_diversify_prefers_different_species() {
    let candidates = vec![
        create_test_pet("1", "dog", "lab", "large"),
        create_test_pet("2", "dog", "lab", "large"),
        create_test_pet("3", "dog", "lab", "large"),
        create_test_pet("4", "cat", "tabby", "small"),
    ];

    let ids: Vec<String> = diversify_rank(candidates, 2).into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["1", "4"]);
}

#[test]
fn test_match_scenario_poor_fit() {
    let pet = PetRecord {
        id: "a".to_string(),
        energy: Some(5),
        medical_needs: Some(true),
        size: Some("large".to_string()),
        ..Default::default()
    };
    let user = UserPreference {
        has_yard: YardAccess::No,
        hours_per_week: 3.0,
        experience_level: 0,
        prefers_size: "large".to_string(),
    };

    let result = compute_match(&pet, &user);

    assert_eq!(result.score, 20);
    assert_eq!(result.warnings.len(), 3);
    assert!(result.reasons.contains(&"Matches your preferred size (large).".to_string()));
}

#[test]
fn test_match_scenario_calm_pet() {
    let pet = PetRecord {
        id: "b".to_string(),
        energy: Some(1),
        medical_needs: Some(false),
        size: Some("small".to_string()),
        ..Default::default()
    };
    let user = UserPreference {
        has_yard: YardAccess::Unknown,
        hours_per_week: 12.0,
        experience_level: 3,
        prefers_size: "any".to_string(),
    };

    let result = compute_match(&pet, &user);

    assert_eq!(result.score, 56);
    assert!(result.warnings.is_empty());
    assert_eq!(
        result.reasons,
        vec![
            "You have plenty of time for a calmer pet too.",
            "No special medical needs reported.",
        ]
    );
}

#[test]
fn test_match_bounds() {
    let sizes = ["small", "medium", "large"];
    let yards = [YardAccess::Yes, YardAccess::No, YardAccess::Unknown];

    for energy in 1..=5 {
        for medical in [true, false] {
            for size in sizes {
                for yard in yards {
                    for hours in [0.0, 5.0, 10.0, 40.0] {
                        let pet = PetRecord {
                            id: "p".to_string(),
                            energy: Some(energy),
                            medical_needs: Some(medical),
                            size: Some(size.to_string()),
                            ..Default::default()
                        };
                        let user = UserPreference {
                            has_yard: yard,
                            hours_per_week: hours,
                            experience_level: 1,
                            prefers_size: "small".to_string(),
                        };

                        let result = compute_match(&pet, &user);
                        assert!(result.score <= 100);
                        assert!(result.reasons.len() <= 3);
                        assert!(result.warnings.len() <= 3);
                    }
                }
            }
        }
    }
}

#[test]
fn test_preference_from_raw_falls_back() {
    let user = UserPreference::from_raw(Some("YES"), Some("abc"), Some("NaN"), None);

    assert_eq!(user.has_yard, YardAccess::Yes);
    assert_eq!(user.hours_per_week, 5.0);
    assert_eq!(user.experience_level, 1);
    assert_eq!(user.size_preference(), None);
}
