// Route exports
pub mod graph;
pub mod matches;
pub mod teams;

use actix_web::{error, web, HttpResponse};
use std::sync::Arc;

use crate::core::Matcher;
use crate::models::{ErrorResponse, UserProfile};
use crate::services::{ProfileStore, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub matcher: Matcher,
    pub default_limit: u16,
    pub max_limit: u16,
}

impl AppState {
    pub fn new(store: Arc<dyn ProfileStore>, matcher: Matcher) -> Self {
        Self {
            store,
            matcher,
            default_limit: 50,
            max_limit: 200,
        }
    }

    pub fn with_limits(mut self, default_limit: u16, max_limit: u16) -> Self {
        self.default_limit = default_limit;
        self.max_limit = max_limit.max(1);
        self
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(teams::configure)
            .configure(graph::configure),
    );
}

/// JSON extractor config returning the service's error body
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        tracing::info!("JSON payload error on {}: {}", req.path(), err);
        let response = HttpResponse::BadRequest().json(ErrorResponse {
            error: "invalid_json".to_string(),
            message: format!("Invalid JSON: {}", err),
            status_code: 400,
        });
        error::InternalError::from_response(err, response).into()
    })
}

/// Query extractor config returning the service's error body
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse {
            error: "invalid_query".to_string(),
            message: format!("Invalid query: {}", err),
            status_code: 400,
        });
        error::InternalError::from_response(err, response).into()
    })
}

/// Roster snapshot plus the viewer resolved against it
///
/// The viewer is taken from the snapshot when present so scores and the
/// roster agree; otherwise the store is asked directly.
pub(crate) async fn load_snapshot(
    state: &AppState,
    viewer_id: &str,
) -> Result<(Vec<UserProfile>, Option<UserProfile>), StoreError> {
    let users = state.store.fetch_all_users().await?;

    let viewer = match users.iter().find(|u| u.id == viewer_id) {
        Some(viewer) => Some(viewer.clone()),
        None => state.store.fetch_viewer_profile(viewer_id).await?,
    };

    Ok((users, viewer))
}

pub(crate) fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

pub(crate) fn store_failure(context: &str, err: StoreError) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: context.to_string(),
        message: err.to_string(),
        status_code: 500,
    })
}
