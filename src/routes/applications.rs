use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    AckResponse, AdoptionApplication, ApplicationListResponse, ApplicationResponse,
    ApplicationStatus, ApplyRequest, ApplyResponse, FosterInterest, FosterInterestRequest,
    UpdateStatusRequest,
};
use crate::routes::{ApiError, AppState};

/// Upper bound on applications returned for one pet
const MAX_APPLICATIONS_PER_PET: usize = 100;

/// Configure adoption application and foster interest routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/pets/{pet_id}/apply", web::post().to(apply))
        .route("/pets/{pet_id}/applications", web::get().to(list_for_pet))
        .route("/applications/{app_id}", web::get().to(get_application))
        .route("/applications/{app_id}/status", web::patch().to(update_status))
        .route("/foster-interest", web::post().to(foster_interest));
}

/// Submit an adoption application
///
/// POST /api/pets/{pet_id}/apply
///
/// The applicant's household answers are scored against the pet and the
/// score is stored with the application.
async fn apply(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<ApplyRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for application: {:?}", errors);
        return Err(ApiError::BadRequest(errors.to_string()));
    }

    let pet_id = path.into_inner();

    let pet = state
        .pets
        .get_pet(&pet_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch pet {}: {}", pet_id, e);
            e
        })?
        .ok_or(ApiError::PetNotFound)?;

    let result = state.ranker.match_pet(&pet, &req.preference());

    let ApplyRequest { step1, answers } = req.into_inner();
    let application = AdoptionApplication {
        id: Uuid::new_v4(),
        pet_id,
        applicant: step1,
        answers: Value::Object(answers),
        match_score: Some(result.score),
        status: ApplicationStatus::Pending,
        submitted_at: Utc::now(),
    };

    state.applications.insert_application(&application).await.map_err(|e| {
        tracing::error!("Failed to store application for pet {}: {}", application.pet_id, e);
        e
    })?;

    tracing::info!(
        "Application {} received for pet {} (score {})",
        application.id,
        application.pet_id,
        result.score
    );

    Ok(HttpResponse::Ok().json(ApplyResponse {
        ok: true,
        app_id: application.id,
        score: result.score,
    }))
}

/// GET /api/applications/{app_id}
async fn get_application(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_application_id(&path)?;

    let application = state
        .applications
        .get_application(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch application {}: {}", id, e);
            e
        })?
        .ok_or(ApiError::ApplicationNotFound)?;

    Ok(HttpResponse::Ok().json(ApplicationResponse {
        ok: true,
        application,
    }))
}

/// Applications for one pet, newest first
///
/// GET /api/pets/{pet_id}/applications
async fn list_for_pet(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let pet_id = path.into_inner();

    let items = state
        .applications
        .list_applications(&pet_id, MAX_APPLICATIONS_PER_PET)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list applications for pet {}: {}", pet_id, e);
            e
        })?;

    tracing::debug!("Listing {} applications for pet {}", items.len(), pet_id);

    Ok(HttpResponse::Ok().json(ApplicationListResponse { ok: true, items }))
}

/// Move an application to a new review state
///
/// PATCH /api/applications/{app_id}/status
///
/// Request body:
/// ```json
/// {"status": "pending|approved|rejected|withdrawn"}
/// ```
async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_application_id(&path)?;

    let updated = state.applications.update_status(id, req.status).await.map_err(|e| {
        tracing::error!("Failed to update application {}: {}", id, e);
        e
    })?;

    if !updated {
        return Err(ApiError::ApplicationNotFound);
    }

    tracing::info!("Application {} moved to {:?}", id, req.status);

    Ok(HttpResponse::Ok().json(AckResponse {
        ok: true,
        message: None,
    }))
}

/// General foster interest form
///
/// POST /api/foster-interest
async fn foster_interest(
    state: web::Data<AppState>,
    req: web::Json<FosterInterestRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for foster interest: {:?}", errors);
        return Err(ApiError::BadRequest(errors.to_string()));
    }

    let FosterInterestRequest { personal, answers } = req.into_inner();
    let interest = FosterInterest {
        id: Uuid::new_v4(),
        applicant: personal,
        answers: Value::Object(answers),
        status: ApplicationStatus::Pending,
        submitted_at: Utc::now(),
    };

    state.applications.insert_foster_interest(&interest).await.map_err(|e| {
        tracing::error!("Failed to store foster interest: {}", e);
        e
    })?;

    tracing::info!("Foster interest {} received", interest.id);

    Ok(HttpResponse::Ok().json(AckResponse {
        ok: true,
        message: Some("Application received!".to_string()),
    }))
}

/// Ids that are not UUIDs cannot name a stored application
fn parse_application_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::ApplicationNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_application_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_application_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_application_id("not-a-uuid"),
            Err(ApiError::ApplicationNotFound)
        ));
    }
}
