// Route exports
pub mod applications;
pub mod health;
pub mod pets;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use thiserror::Error;

use crate::core::Ranker;
use crate::models::{ErrorResponse, FeedLimits};
use crate::services::{ApplicationStore, PetStore, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pets: Arc<dyn PetStore>,
    pub applications: Arc<dyn ApplicationStore>,
    pub ranker: Ranker,
    pub limits: FeedLimits,
}

/// Handler failures, rendered as `{"ok": false, "error": ...}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("pet not found")]
    PetNotFound,

    #[error("application not found")]
    ApplicationNotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::PetNotFound | ApiError::ApplicationNotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            ok: false,
            error: self.to_string(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::BadRequest(format!("invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    req: &HttpRequest,
) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ApiError::BadRequest(format!("invalid query: {}", err)).into()
}

/// Handle path extraction errors
pub fn handle_path_error(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Path error on {}: {}", req.path(), err);
    ApiError::BadRequest(format!("invalid path: {}", err)).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure).service(
        web::scope("/api")
            .configure(pets::configure)
            .configure(applications::configure),
    );
}
