//! HTTP surface: application state, router and handlers.

pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/cognitive-response", post(handlers::cognitive_response))
        .route("/health", get(handlers::health))
        .with_state(state)
}
