use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::models::domain::{ApplicantContact, ApplicationStatus, UserPreference};

/// Query string of the urgent and explore feeds
///
/// `limit` is kept raw so that malformed values fall back to the default
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub limit: Option<String>,
}

/// Query string of the match endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    #[serde(default)]
    pub has_yard: Option<String>,
    #[serde(default)]
    pub hours_per_week: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub prefers_size: Option<String>,
}

impl MatchQuery {
    pub fn preference(&self) -> UserPreference {
        UserPreference::from_raw(
            self.has_yard.as_deref(),
            self.hours_per_week.as_deref(),
            self.experience_level.as_deref(),
            self.prefers_size.as_deref(),
        )
    }
}

/// Adoption application form
///
/// ```json
/// {
///   "step1": {"firstName": "...", "lastName": "...", "email": "..."},
///   "step2": {"hasYard": "yes", "ownOrRent": "own"},
///   "step3": {"experienceLevel": "2", "hoursPerWeek": "10"},
///   "step4": {"preferredSize": "small"}
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplyRequest {
    #[validate(nested)]
    pub step1: ApplicantContact,
    /// Every other section, kept as submitted
    #[serde(flatten)]
    pub answers: Map<String, Value>,
}

impl ApplyRequest {
    /// The adopter's stated capacity, read from the household and experience sections
    pub fn preference(&self) -> UserPreference {
        let answer = |section: &str, key: &str| {
            self.answers
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(answer_text)
        };

        UserPreference::from_raw(
            answer("step2", "hasYard").as_deref(),
            answer("step3", "hoursPerWeek").as_deref(),
            answer("step3", "experienceLevel").as_deref(),
            answer("step4", "preferredSize").as_deref(),
        )
    }
}

fn answer_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// General foster interest form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FosterInterestRequest {
    #[validate(nested)]
    pub personal: ApplicantContact,
    #[serde(flatten)]
    pub answers: Map<String, Value>,
}

/// Review state change for an application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YardAccess;
    use serde_json::json;

    #[test]
    fn test_apply_request_preference() {
        let request: ApplyRequest = serde_json::from_value(json!({
            "step1": {"firstName": "Ana", "lastName": "Ruiz", "email": "ana@example.com"},
            "step2": {"hasYard": "yes", "ownOrRent": "own"},
            "step3": {"experienceLevel": "3", "hoursPerWeek": 14},
            "step4": {"preferredSize": "Small"}
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        let user = request.preference();
        assert_eq!(user.has_yard, YardAccess::Yes);
        assert_eq!(user.hours_per_week, 14.0);
        assert_eq!(user.experience_level, 3);
        assert_eq!(user.size_preference(), Some("small"));
        assert!(request.answers.contains_key("step2"));
    }

    #[test]
    fn test_apply_request_blank_answers_use_defaults() {
        let request: ApplyRequest = serde_json::from_value(json!({
            "step1": {"firstName": "Ana", "lastName": "Ruiz", "email": "ana@example.com"},
            "step2": {"hasYard": ""},
            "step3": {"experienceLevel": "", "hoursPerWeek": ""}
        }))
        .unwrap();

        assert_eq!(request.preference(), UserPreference::default());
    }

    #[test]
    fn test_apply_request_validation() {
        let request: ApplyRequest = serde_json::from_value(json!({
            "step1": {"firstName": "", "lastName": "Ruiz", "email": "not-an-email"}
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_match_query_defaults() {
        assert_eq!(MatchQuery::default().preference(), UserPreference::default());
    }
}
