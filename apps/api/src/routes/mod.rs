//! HTTP routing.

pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::analysis::handlers::{
    handle_analyze, handle_batch_analyze, handle_chat, handle_results,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handle_analyze))
        .route("/api/v1/analyze/batch", post(handle_batch_analyze))
        .route("/api/v1/chat", post(handle_chat))
        .route("/api/v1/results", get(handle_results))
        .layer(body_limit)
        .with_state(state)
}
