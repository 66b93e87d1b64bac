use crate::core::similarity::similarity;
use crate::models::PetRecord;

/// Greedy max-min diversification of an urgency-sorted candidate pool
///
/// # Arguments
/// * `candidates` - Pool sorted by descending urgency; this function does not sort
/// * `k` - Maximum number of items to return
///
/// # Returns
/// At most `k` items. The first candidate is always kept. Each following pick
/// is the remaining candidate whose closest already-picked neighbour is the
/// least similar; ties go to the earlier candidate in the pool.
pub fn diversify_rank<T: AsRef<PetRecord>>(candidates: Vec<T>, k: usize) -> Vec<T> {
    if candidates.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut remaining = candidates;
    let mut picked: Vec<T> = Vec::with_capacity(k.min(remaining.len()));
    picked.push(remaining.remove(0));

    while !remaining.is_empty() && picked.len() < k {
        let mut best_index = 0;
        let mut best_score = f64::INFINITY;

        for (index, candidate) in remaining.iter().enumerate() {
            let closest = picked
                .iter()
                .map(|p| similarity(candidate.as_ref(), p.as_ref()))
                .fold(f64::INFINITY, f64::min);

            if closest < best_score {
                best_score = closest;
                best_index = index;
            }
        }

        picked.push(remaining.remove(best_index));
    }

    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_pet(id: &str, species: &str, breed: &str, size: &str) -> PetRecord {
        PetRecord {
            id: id.to_string(),
            species: Some(species.to_string()),
            breed: Some(breed.to_string()),
            size: Some(size.to_string()),
            ..Default::default()
        }
    }

    fn ids(pets: &[PetRecord]) -> Vec<&str> {
        pets.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_pool() {
        let picked = diversify_rank(Vec::<PetRecord>::new(), 5);
        assert!(picked.is_empty());
    }

    #[test]
    fn test_zero_k() {
        let pool = vec![create_test_pet("1", "dog", "beagle", "small")];
        assert!(diversify_rank(pool, 0).is_empty());
    }

    #[test]
    fn test_seed_is_first_candidate() {
        let pool = vec![
            create_test_pet("1", "dog", "beagle", "small"),
            create_test_pet("2", "cat", "tabby", "small"),
        ];
        assert_eq!(ids(&diversify_rank(pool, 1)), vec!["1"]);
    }

    #[test]
    fn test_skips_near_duplicates() {
        let pool = vec![
            create_test_pet("1", "dog", "beagle", "small"),
            create_test_pet("2", "dog", "beagle", "small"),
            create_test_pet("3", "dog", "beagle", "small"),
            create_test_pet("4", "cat", "tabby", "medium"),
            create_test_pet("5", "rabbit", "lop", "small"),
        ];

        let picked = diversify_rank(pool, 2);
        assert_eq!(ids(&picked), vec!["1", "4"]);
    }

    #[test]
    fn test_uses_closest_picked_neighbour() {
        let pool = vec![
            create_test_pet("1", "dog", "beagle", "small"),
            create_test_pet("2", "dog", "beagle", "small"),
            create_test_pet("3", "dog", "labrador", "large"),
            create_test_pet("4", "cat", "tabby", "small"),
        ];

        let picked = diversify_rank(pool, 3);
        assert_eq!(ids(&picked), vec!["1", "4", "3"]);
    }

    #[test]
    fn test_ties_keep_pool_order() {
        let pool = vec![
            create_test_pet("1", "dog", "beagle", "small"),
            create_test_pet("2", "cat", "tabby", "large"),
            create_test_pet("3", "bird", "parrot", "large"),
        ];

        // Both 2 and 3 have similarity 0 to the seed; 2 comes first.
        let picked = diversify_rank(pool, 2);
        assert_eq!(ids(&picked), vec!["1", "2"]);
    }

    #[test]
    fn test_returns_whole_pool_when_k_is_large() {
        let pool = vec![
            create_test_pet("1", "dog", "beagle", "small"),
            create_test_pet("2", "dog", "beagle", "small"),
        ];
        assert_eq!(diversify_rank(pool, 10).len(), 2);
    }
}
