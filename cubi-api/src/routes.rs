//! API route configuration.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Creates the API router.
///
/// Every path is a potential rig identifier, so a single fallback handler
/// receives all requests. The body limit applies where the handler buffers
/// a POST body; other methods never read theirs.
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .fallback(handlers::dispatch)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
