use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{available_departments, matches_filters};
use crate::models::{
    CompatibilityRequest, CompatibilityResponse, CompatibilityResult, HealthResponse,
    MatchListResponse, RankMatchesRequest,
};
use crate::routes::{load_snapshot, store_failure, validation_failed, AppState};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/compatibility", web::post().to(compatibility))
        .route("/matches/rank", web::post().to(rank_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Pairwise compatibility endpoint
///
/// POST /api/v1/compatibility
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "targetUserId": "string"
/// }
/// ```
///
/// A missing profile on either side scores zero rather than failing.
async fn compatibility(
    state: web::Data<AppState>,
    req: web::Json<CompatibilityRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let (users, viewer) = match load_snapshot(&state, &req.user_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => return store_failure("Failed to load profiles", e),
    };

    let target = match users.iter().find(|u| u.id == req.target_user_id).cloned() {
        Some(target) => Some(target),
        None => match state.store.fetch_viewer_profile(&req.target_user_id).await {
            Ok(target) => target,
            Err(e) => return store_failure("Failed to fetch target profile", e),
        },
    };

    let (result, breakdown) = match (&viewer, &target) {
        (Some(a), Some(b)) => (
            state.matcher.score(a, b),
            state.matcher.scorer().breakdown(a, b),
        ),
        _ => (CompatibilityResult::none(), None),
    };

    tracing::debug!(
        "Compatibility {} -> {}: {}",
        req.user_id,
        req.target_user_id,
        result.score
    );

    HttpResponse::Ok().json(CompatibilityResponse {
        user_id: req.user_id.clone(),
        target_user_id: req.target_user_id.clone(),
        result,
        breakdown,
    })
}

/// Ranked match list endpoint
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "score": "all|high|medium",
///   "department": "string",
///   "year": "string|number",
///   "limit": 50
/// }
/// ```
async fn rank_matches(
    state: web::Data<AppState>,
    req: web::Json<RankMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank_matches request: {:?}", errors);
        return validation_failed(errors);
    }

    let limit = req.limit.unwrap_or(state.default_limit).min(state.max_limit) as usize;

    let (users, viewer) = match load_snapshot(&state, &req.user_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => return store_failure("Failed to load profiles", e),
    };

    let Some(viewer) = viewer else {
        tracing::info!("No profile yet for {}, returning empty match list", req.user_id);
        return HttpResponse::Ok().json(MatchListResponse {
            matches: Vec::new(),
            departments: Vec::new(),
            total_candidates: users.len(),
        });
    };

    let ranked = state.matcher.rank_all(&viewer, &users);
    let departments = available_departments(&ranked);
    let filters = req.filters();

    let mut matches: Vec<_> = ranked
        .into_iter()
        .filter(|m| matches_filters(m, &filters, state.matcher.rules()))
        .collect();
    matches.truncate(limit);

    tracing::info!(
        "Returning {} matches for user {} (from {} profiles)",
        matches.len(),
        req.user_id,
        users.len()
    );

    HttpResponse::Ok().json(MatchListResponse {
        matches,
        departments,
        total_candidates: users.len(),
    })
}
