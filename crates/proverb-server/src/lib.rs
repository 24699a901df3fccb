//! # proverb-server
//!
//! Axum server exposing the proverb agent over AG-UI.
//!
//! - `POST /` runs the agent and streams AG-UI events (SSE)
//! - `GET /health` liveness check

pub mod agui;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use state::AppState;

/// Build the router with CORS and request tracing
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", post(handlers::run_agent))
        .route("/health", get(handlers::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
