//! Route definitions and router setup.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{health_check, publish_messages, read_messages, AppState};

/// Create the bridge router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/message", post(publish_messages).get(read_messages))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
