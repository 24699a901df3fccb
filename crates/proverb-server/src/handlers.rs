//! HTTP Handlers

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use serde::Serialize;
use tokio_stream::Stream;

use crate::agui::{self, RunAgentInput};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness only; no dependency checks
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Run the agent over an AG-UI request, streaming its events back
pub async fn run_agent(
    State(state): State<AppState>,
    Json(input): Json<RunAgentInput>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = agui::run(state.agent.clone(), state.session(), input);
    Sse::new(stream).keep_alive(KeepAlive::default())
}
