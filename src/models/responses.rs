use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{AdoptionApplication, MatchResult, PetSummary, RankedPet};

/// Response for the urgent and explore feeds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub ok: bool,
    pub items: Vec<RankedPet>,
}

/// Response for a single pet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetResponse {
    pub ok: bool,
    pub pet: PetSummary,
}

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub ok: bool,
    pub pet_id: String,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Response for a submitted adoption application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResponse {
    pub ok: bool,
    pub app_id: Uuid,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub ok: bool,
    pub application: AdoptionApplication,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListResponse {
    pub ok: bool,
    pub items: Vec<AdoptionApplication>,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}
