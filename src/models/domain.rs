use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::lenient;

pub const DEFAULT_ENERGY: i64 = 3;
pub const DEFAULT_SIZE: &str = "medium";
pub const DEFAULT_HOURS_PER_WEEK: f64 = 5.0;
pub const DEFAULT_EXPERIENCE_LEVEL: i64 = 1;
pub const ANY_SIZE: &str = "any";

/// Falls back to `default` when a text field is absent.
#[inline]
pub fn text_or<'a>(field: &'a Option<String>, default: &'a str) -> &'a str {
    field.as_deref().unwrap_or(default)
}

/// A pet listing as stored in the document database
///
/// Every field except the id is optional. Listings are frequently sparse,
/// so the ranking code reads them only through the accessors below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetRecord {
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub species: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub breed: Option<String>,
    #[serde(deserialize_with = "lenient::integer")]
    pub age_months: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub size: Option<String>,
    #[serde(deserialize_with = "lenient::integer")]
    pub energy: Option<i64>,
    #[serde(deserialize_with = "lenient::flag")]
    pub medical_needs: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub cover_image_url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub location_city: Option<String>,
    #[serde(rename = "views7d", deserialize_with = "lenient::number")]
    pub views_7d: Option<f64>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl PetRecord {
    pub fn species(&self) -> &str {
        text_or(&self.species, "")
    }

    pub fn breed(&self) -> &str {
        text_or(&self.breed, "")
    }

    /// Size as shown to adopters, `"medium"` when unknown
    pub fn size(&self) -> &str {
        text_or(&self.size, DEFAULT_SIZE)
    }

    pub fn energy(&self) -> i64 {
        self.energy.unwrap_or(DEFAULT_ENERGY)
    }

    pub fn medical_needs(&self) -> bool {
        self.medical_needs.unwrap_or(false)
    }

    /// Rolling 7-day view counter, never negative
    pub fn views_7d(&self) -> f64 {
        self.views_7d.unwrap_or(0.0).max(0.0)
    }

    /// Fractional days between intake and `now`, zero when intake is unknown
    /// or lies in the future.
    pub fn days_in_care(&self, now: DateTime<Utc>) -> f64 {
        let Some(created_at) = self.created_at else {
            return 0.0;
        };
        let days = (now - created_at).num_milliseconds() as f64 / 86_400_000.0;
        if days.is_finite() {
            days.max(0.0)
        } else {
            0.0
        }
    }
}

impl AsRef<PetRecord> for PetRecord {
    fn as_ref(&self) -> &PetRecord {
        self
    }
}

/// Fixed public projection of a pet used by every list and detail response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetSummary {
    pub id: String,
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age_months: Option<i64>,
    pub size: Option<String>,
    pub energy: Option<i64>,
    pub medical_needs: Option<bool>,
    pub status: Option<String>,
    pub cover_image_url: Option<String>,
    pub location_city: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "views7d")]
    pub views_7d: f64,
}

impl From<&PetRecord> for PetSummary {
    fn from(pet: &PetRecord) -> Self {
        Self {
            id: pet.id.clone(),
            name: pet.name.clone(),
            species: pet.species.clone(),
            breed: pet.breed.clone(),
            age_months: pet.age_months,
            size: pet.size.clone(),
            energy: pet.energy,
            medical_needs: pet.medical_needs,
            status: pet.status.clone(),
            cover_image_url: pet.cover_image_url.clone(),
            location_city: pet.location_city.clone(),
            created_at: pet.created_at,
            views_7d: pet.views_7d.unwrap_or(0.0),
        }
    }
}

/// A pet paired with the urgency computed for the current request
#[derive(Debug, Clone)]
pub struct ScoredPet {
    pub pet: PetRecord,
    pub urgency: f64,
}

impl AsRef<PetRecord> for ScoredPet {
    fn as_ref(&self) -> &PetRecord {
        &self.pet
    }
}

/// Human readable explanation of an urgency score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhyUrgent {
    pub days_in_shelter: f64,
    pub why_urgent: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgencyResult {
    pub score: f64,
    pub days_in_shelter: f64,
    pub why_urgent: Vec<String>,
}

/// Pet item returned by the urgent and explore feeds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPet {
    #[serde(flatten)]
    pub pet: PetSummary,
    pub urgency_score: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub days_in_shelter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub why_urgent: Option<Vec<String>>,
}

/// Urgency coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UrgencyWeights {
    pub per_day: f64,
    pub high_energy: f64,
    pub medical: f64,
    pub visibility: f64,
}

impl Default for UrgencyWeights {
    fn default() -> Self {
        Self {
            per_day: 2.0,
            high_energy: 3.0,
            medical: 6.0,
            visibility: 2.0,
        }
    }
}

/// Candidate pool and page size bounds for the feed endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedLimits {
    pub urgent_pool: usize,
    pub explore_pool: usize,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for FeedLimits {
    fn default() -> Self {
        Self {
            urgent_pool: 100,
            explore_pool: 120,
            default_limit: 12,
            max_limit: 50,
        }
    }
}

impl FeedLimits {
    /// Missing or unparseable values use the default; the rest are clamped.
    pub fn resolve(&self, raw: Option<&str>) -> usize {
        let max = self.max_limit.max(1) as i64;
        match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
            Some(limit) => limit.clamp(1, max) as usize,
            None => self.default_limit.clamp(1, max as usize),
        }
    }
}

/// Whether an adopter has a yard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YardAccess {
    Yes,
    No,
    Unknown,
}

impl YardAccess {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => YardAccess::Yes,
            "no" => YardAccess::No,
            _ => YardAccess::Unknown,
        }
    }
}

/// What a prospective adopter told us about their home and schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreference {
    pub has_yard: YardAccess,
    pub hours_per_week: f64,
    pub experience_level: i64,
    pub prefers_size: String,
}

impl Default for UserPreference {
    fn default() -> Self {
        Self {
            has_yard: YardAccess::Unknown,
            hours_per_week: DEFAULT_HOURS_PER_WEEK,
            experience_level: DEFAULT_EXPERIENCE_LEVEL,
            prefers_size: ANY_SIZE.to_string(),
        }
    }
}

impl UserPreference {
    /// Build a preference from raw form/query strings
    ///
    /// Values that are absent or cannot be read fall back to the defaults.
    pub fn from_raw(
        has_yard: Option<&str>,
        hours_per_week: Option<&str>,
        experience_level: Option<&str>,
        prefers_size: Option<&str>,
    ) -> Self {
        let defaults = Self::default();

        let hours_per_week = hours_per_week
            .and_then(parse_finite)
            .map(|h| h.max(0.0))
            .unwrap_or(defaults.hours_per_week);

        let experience_level = experience_level
            .and_then(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .ok()
                    .or_else(|| parse_finite(raw).map(|f| f.trunc() as i64))
            })
            .map(|e| e.max(0))
            .unwrap_or(defaults.experience_level);

        Self {
            has_yard: has_yard.map(YardAccess::parse).unwrap_or(defaults.has_yard),
            hours_per_week,
            experience_level,
            prefers_size: prefers_size
                .map(|s| s.trim().to_lowercase())
                .unwrap_or(defaults.prefers_size),
        }
    }

    /// Preferred size, `None` when the adopter has no preference
    pub fn size_preference(&self) -> Option<&str> {
        let size = self.prefers_size.as_str();
        (!size.is_empty() && !size.eq_ignore_ascii_case(ANY_SIZE)).then_some(size)
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Outcome of scoring a pet against an adopter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u8,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
}

/// Contact details shared by adoption applications and foster interest forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantContact {
    #[validate(length(min = 1, message = "firstName is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "lastName is required"))]
    pub last_name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

/// Review state of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

/// Adoption application for a single pet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionApplication {
    pub id: Uuid,
    pub pet_id: String,
    pub applicant: ApplicantContact,
    /// Remaining form sections, stored as submitted
    pub answers: serde_json::Value,
    /// Compatibility score at submission time
    pub match_score: Option<u8>,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

/// General foster interest, not tied to a pet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FosterInterest {
    pub id: Uuid,
    pub applicant: ApplicantContact,
    pub answers: serde_json::Value,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}
