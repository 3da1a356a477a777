//! GET /api/image — a decorative image URL, or `null` when none could be fetched.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use serde::Serialize;

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub url: Option<String>,
}

pub async fn image_route(State(state): State<Arc<AppState>>) -> Response {
    let url = state.images.fetch_decorative_image().await;
    let data = ImageResponse {
        url: (!url.is_empty()).then_some(url),
    };
    ApiResponse::success(data).into_response_with_status(StatusCode::OK)
}
