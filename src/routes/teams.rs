use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{MatchListResponse, RecommendRequest, RequirementsRequest};
use crate::routes::{load_snapshot, store_failure, validation_failed, AppState};

/// Configure team-building routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/teams/recommend", web::post().to(recommend))
        .route("/teams/requirements", web::post().to(requirements));
}

/// Skill-targeted teammate recommendations for a viewer
///
/// POST /api/v1/teams/recommend
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "requiredSkills": ["string"]
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let (users, viewer) = match load_snapshot(&state, &req.user_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => return store_failure("Failed to load profiles", e),
    };

    let matches = match viewer {
        Some(viewer) => state
            .matcher
            .recommend_for_skills(&viewer, &users, &req.required_skills),
        None => {
            tracing::info!("No profile yet for {}, skipping recommendations", req.user_id);
            Vec::new()
        }
    };

    tracing::debug!(
        "Recommended {} teammates for {} ({} skills requested)",
        matches.len(),
        req.user_id,
        req.required_skills.len()
    );

    HttpResponse::Ok().json(MatchListResponse {
        matches,
        departments: Vec::new(),
        total_candidates: users.len(),
    })
}

/// Rank the roster against a project's skill wishlist
///
/// POST /api/v1/teams/requirements
async fn requirements(
    state: web::Data<AppState>,
    req: web::Json<RequirementsRequest>,
) -> impl Responder {
    let users = match state.store.fetch_all_users().await {
        Ok(users) => users,
        Err(e) => return store_failure("Failed to load profiles", e),
    };

    let matches = state
        .matcher
        .recommend_for_requirements(&users, &req.required_skills);

    HttpResponse::Ok().json(MatchListResponse {
        matches,
        departments: Vec::new(),
        total_candidates: users.len(),
    })
}
