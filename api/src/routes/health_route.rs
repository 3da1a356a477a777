use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

/// GET /health — one probe result per configured provider. Always `200`;
/// unhealthy providers show up as `ok: false`.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let statuses = state.llm_profiles.health_all().await;
    ApiResponse::success(statuses).into_response_with_status(StatusCode::OK)
}
