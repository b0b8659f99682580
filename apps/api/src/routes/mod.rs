pub mod form;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::submission::handlers;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(form::form_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes", post(handlers::handle_submit))
        .route("/api/v1/resumes/latest", get(handlers::handle_latest))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
