//! GET /api/transcript — the caller's conversation so far.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
};
use serde::Serialize;
use tutor::{ChatTurn, Profile, ProviderState};

use crate::core::{
    app_state::AppState,
    http::response_envelope::ApiResponse,
    session_cookie::{attach_session_cookie, resolve_session},
};

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub turns: Vec<ChatTurn>,
    pub profile: Profile,
    pub provider_state: ProviderState,
}

pub async fn transcript_route(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let handle = resolve_session(&state, &headers).await;
    let data = {
        let session = handle.session.lock().await;
        TranscriptResponse {
            turns: session.transcript().all().to_vec(),
            profile: session.profile(),
            provider_state: session.provider_state(),
        }
    };

    attach_session_cookie(
        &handle,
        ApiResponse::success(data).into_response_with_status(StatusCode::OK),
    )
}
