//! POST /api/ask — answers one question inside the caller's session.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::{info, instrument};
use tutor::Profile;

use crate::{
    core::{
        app_state::AppState,
        http::response_envelope::{ApiResponse, bad_request},
        session_cookie::{attach_session_cookie, resolve_session},
    },
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /api/ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/api/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"What is overfitting?","profile":"Beginner"}'
/// ```
#[instrument(name = "ask_route", skip_all)]
pub async fn ask_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<AskRequest>,
) -> Response {
    // --- Validate input before touching any session -------------------------
    if body.question.trim().is_empty() {
        return bad_request(
            "question",
            "question must not be empty",
            "Type a Data Science question, e.g. \"What is overfitting?\".",
        );
    }

    let profile = match body.profile.as_deref().map(str::parse::<Profile>) {
        Some(Ok(p)) => Some(p),
        Some(Err(err)) => {
            return bad_request(
                "profile",
                err.to_string(),
                "Use one of: Beginner, Intermediate, Advanced.",
            );
        }
        None => None,
    };

    // --- Ask within the session ---------------------------------------------
    let handle = resolve_session(&state, &headers).await;
    let mut session = handle.session.lock().await;
    let profile = profile.unwrap_or_else(|| session.profile());

    let turn = match state.tutor.ask(&mut session, &body.question, profile).await {
        Ok(turn) => turn,
        Err(err) => return bad_request("question", err.to_string(), "Resubmit a non-empty question."),
    };

    let data = AskResponse {
        question: turn.question,
        answer: turn.answer,
        turn_index: session.transcript().len() - 1,
        provider_state: session.provider_state(),
    };
    info!(
        session = %handle.id,
        turn_index = data.turn_index,
        provider_state = %data.provider_state,
        "question answered"
    );
    drop(session);

    attach_session_cookie(
        &handle,
        ApiResponse::success(data).into_response_with_status(StatusCode::OK),
    )
}
