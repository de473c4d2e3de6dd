pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::generation::handlers as generation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // ATS scoring API
        .route("/api/v1/ats/score", post(ats::handle_score))
        .route("/api/v1/ats/keywords", post(ats::handle_keywords))
        .route("/api/v1/ats/prioritize", post(ats::handle_prioritize))
        .route("/api/v1/ats/clusters", post(ats::handle_clusters))
        .route("/api/v1/ats/suggestions", post(ats::handle_suggestions))
        // Resume API
        .route("/api/v1/resumes/generate", post(generation::handle_generate))
        .route(
            "/api/v1/resumes/export/markdown",
            post(generation::handle_export_markdown),
        )
        .with_state(state)
}
