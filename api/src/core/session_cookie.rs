//! `datasage_session=<uuid>` cookie handling.

use axum::{
    http::{HeaderMap, HeaderValue, header},
    response::Response,
};
use services::uuid::parse_session_id;
use tutor::SessionHandle;
use uuid::Uuid;

use crate::core::app_state::AppState;

pub const SESSION_COOKIE: &str = "datasage_session";

/// Session id from the request's `Cookie` headers, if well-formed.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| parse_session_id(value))
}

/// Looks up (or starts) the caller's session.
pub async fn resolve_session(state: &AppState, headers: &HeaderMap) -> SessionHandle {
    state
        .sessions
        .get_or_create(session_id_from_headers(headers), state.tutor.initial_state())
        .await
}

pub fn cookie_value(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Issues the cookie when the session was just created.
pub fn attach_session_cookie(handle: &SessionHandle, mut response: Response) -> Response {
    if handle.created {
        if let Ok(value) = HeaderValue::from_str(&cookie_value(handle.id)) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}
