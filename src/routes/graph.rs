use actix_web::{web, HttpResponse, Responder};

use crate::core::network_stats;
use crate::models::{GraphQuery, GraphResponse};
use crate::routes::{store_failure, AppState};

/// Configure graph and dashboard routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/graph", web::get().to(graph))
        .route("/stats", web::get().to(stats));
}

/// Campus compatibility graph
///
/// GET /api/v1/graph?threshold=65&viewerId={userId}
///
/// Rebuilt from a fresh roster on every call.
async fn graph(
    state: web::Data<AppState>,
    query: web::Query<GraphQuery>,
) -> impl Responder {
    let users = match state.store.fetch_all_users().await {
        Ok(users) => users,
        Err(e) => return store_failure("Failed to load profiles", e),
    };

    let threshold = query
        .threshold
        .unwrap_or(state.matcher.rules().graph_threshold);
    let graph = state
        .matcher
        .graph_with_threshold(&users, threshold, query.viewer_id.as_deref());
    let summary = graph.summary();

    tracing::info!(
        "Built graph with {} nodes and {} edges (threshold {})",
        summary.node_count,
        summary.edge_count,
        threshold
    );

    HttpResponse::Ok().json(GraphResponse {
        graph,
        threshold,
        summary,
        generated_at: chrono::Utc::now(),
    })
}

/// Dashboard statistics
///
/// GET /api/v1/stats
async fn stats(state: web::Data<AppState>) -> impl Responder {
    match state.store.fetch_all_users().await {
        Ok(users) => HttpResponse::Ok().json(network_stats(&users)),
        Err(e) => store_failure("Failed to load profiles", e),
    }
}
