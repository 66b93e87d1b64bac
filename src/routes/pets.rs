use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::models::{FeedQuery, FeedResponse, MatchQuery, MatchResponse, PetResponse, PetSummary};
use crate::routes::{ApiError, AppState};

/// Configure pet feed, detail and match routes
///
/// The fixed feed paths are registered ahead of `/pets/{pet_id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/pets/urgent", web::get().to(urgent_feed))
        .route("/pets/explore", web::get().to(explore_feed))
        .route("/pets/{pet_id}", web::get().to(get_pet))
        .route("/pets/{pet_id}/match", web::get().to(match_pet));
}

/// Most urgent adoptable pets
///
/// GET /api/pets/urgent?limit=12
async fn urgent_feed(
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = state.limits.resolve(query.limit.as_deref());

    let pool = state.pets.list_adoptable(state.limits.urgent_pool).await.map_err(|e| {
        tracing::error!("Failed to list adoptable pets for urgent feed: {}", e);
        e
    })?;
    let pool_size = pool.len();

    let items = state.ranker.urgent(pool, limit, Utc::now());

    tracing::info!("Urgent feed: returning {} of {} candidates", items.len(), pool_size);

    Ok(HttpResponse::Ok().json(FeedResponse { ok: true, items }))
}

/// Urgency ordered feed spread across species, breed and size
///
/// GET /api/pets/explore?limit=12
async fn explore_feed(
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = state.limits.resolve(query.limit.as_deref());

    let pool = state.pets.list_adoptable(state.limits.explore_pool).await.map_err(|e| {
        tracing::error!("Failed to list adoptable pets for explore feed: {}", e);
        e
    })?;
    let pool_size = pool.len();

    let items = state.ranker.explore(pool, limit, Utc::now());

    tracing::info!("Explore feed: returning {} of {} candidates", items.len(), pool_size);

    Ok(HttpResponse::Ok().json(FeedResponse { ok: true, items }))
}

/// GET /api/pets/{pet_id}
async fn get_pet(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
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

    Ok(HttpResponse::Ok().json(PetResponse {
        ok: true,
        pet: PetSummary::from(&pet),
    }))
}

/// Compatibility of one pet with an adopter's household
///
/// GET /api/pets/{pet_id}/match?hasYard=yes&hoursPerWeek=10&experienceLevel=2&prefersSize=small
async fn match_pet(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MatchQuery>,
) -> Result<HttpResponse, ApiError> {
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

    let user = query.preference();
    let result = state.ranker.match_pet(&pet, &user);

    tracing::debug!("Match for pet {}: score {}", pet_id, result.score);

    Ok(HttpResponse::Ok().json(MatchResponse {
        ok: true,
        pet_id,
        result,
    }))
}
