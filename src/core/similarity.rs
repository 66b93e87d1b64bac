use crate::models::{text_or, PetRecord};

const SPECIES_MATCH: f64 = 3.0;
const BREED_MATCH: f64 = 6.0;
const SIZE_MATCH: f64 = 1.0;

/// Highest possible similarity, reached when species, breed and size all match
pub const MAX_SIMILARITY: f64 = SPECIES_MATCH + BREED_MATCH + SIZE_MATCH;

/// Coarse categorical similarity between two listings (0-10)
///
/// Only used as a diversity signal: lower means more different. Absent
/// fields compare as empty strings, so two listings that both lack a breed
/// count as the same breed.
#[inline]
pub fn similarity(a: &PetRecord, b: &PetRecord) -> f64 {
    let mut score = 0.0;
    if a.species() == b.species() {
        score += SPECIES_MATCH;
    }
    if a.breed() == b.breed() {
        score += BREED_MATCH;
    }
    if text_or(&a.size, "") == text_or(&b.size, "") {
        score += SIZE_MATCH;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_pet(
        species: Option<&str>,
        breed: Option<&str>,
        size: Option<&str>,
    ) -> PetRecord {
        PetRecord {
            species: species.map(String::from),
            breed: breed.map(String::from),
            size: size.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_identical_pets() {
        let pet = create_test_pet(Some("dog"), Some("beagle"), Some("small"));
        assert_eq!(similarity(&pet, &pet), MAX_SIMILARITY);
    }

    #[test]
    fn test_partial_matches() {
        let beagle = create_test_pet(Some("dog"), Some("beagle"), Some("small"));
        let lab = create_test_pet(Some("dog"), Some("labrador"), Some("large"));
        let tabby = create_test_pet(Some("cat"), Some("tabby"), Some("small"));

        assert_eq!(similarity(&beagle, &lab), 3.0);
        assert_eq!(similarity(&beagle, &tabby), 1.0);
        assert_eq!(similarity(&lab, &tabby), 0.0);
    }

    #[test]
    fn test_missing_fields_match_each_other() {
        let a = create_test_pet(Some("dog"), None, None);
        let b = create_test_pet(Some("dog"), None, None);
        assert_eq!(similarity(&a, &b), MAX_SIMILARITY);
    }

    #[test]
    fn test_missing_size_differs_from_medium() {
        let a = create_test_pet(Some("dog"), Some("mix"), None);
        let b = create_test_pet(Some("dog"), Some("mix"), Some("medium"));
        assert_eq!(similarity(&a, &b), 9.0);
    }

    #[test]
    fn test_symmetry() {
        let a = create_test_pet(Some("dog"), Some("beagle"), Some("small"));
        let b = create_test_pet(Some("dog"), None, Some("small"));
        assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }
}
