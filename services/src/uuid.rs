use uuid::Uuid;

/// Fresh random id for a chat session.
pub fn new_session_id() -> Uuid {
    Uuid::new_v4()
}

/// Parses a session id coming from a cookie; `None` for anything malformed.
pub fn parse_session_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
