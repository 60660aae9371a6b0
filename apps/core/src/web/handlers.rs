use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::state::AppState;
use crate::error::AppError;
use crate::models::{EngineRequest, EngineResponse};
use crate::service;

/// `POST /cognitive-response`: analyze a message and produce a reply.
pub async fn cognitive_response(
    State(state): State<AppState>,
    Json(request): Json<EngineRequest>,
) -> Result<Json<EngineResponse>, AppError> {
    let response = service::respond(&state, request).await?;
    Ok(Json(response))
}

/// `GET /health`: liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "atende-core" }))
}
