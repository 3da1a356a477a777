//! Per-user chat sessions and the process-wide session map.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::profile::Profile;
use crate::provider_state::ProviderState;
use crate::transcript::Transcript;

/// Everything one user accumulates while chatting.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    id: Uuid,
    transcript: Transcript,
    profile: Profile,
    provider_state: ProviderState,
}

impl Session {
    pub fn new(id: Uuid, provider_state: ProviderState) -> Self {
        Self {
            id,
            transcript: Transcript::new(),
            profile: Profile::default(),
            provider_state,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Last expertise level the user picked.
    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn provider_state(&self) -> ProviderState {
        self.provider_state
    }

    /// Records the selector choice without asking anything.
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }

    pub(crate) fn provider_state_mut(&mut self) -> &mut ProviderState {
        &mut self.provider_state
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }
}

pub type SharedSession = Arc<Mutex<Session>>;

struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

/// Session lookup result.
pub struct SessionHandle {
    pub id: Uuid,
    pub session: SharedSession,
    /// `true` when the requested id was unknown or expired.
    pub created: bool,
}

/// Maps session ids to independently locked sessions.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the live session for `id`, or starts a new one in `initial_state`.
    ///
    /// Creating a session also drops every session idle for longer than the TTL.
    pub async fn get_or_create(&self, id: Option<Uuid>, initial_state: ProviderState) -> SessionHandle {
        let now = Instant::now();
        let mut map = self.sessions.write().await;

        if let Some(id) = id {
            if let Some(entry) = map.get_mut(&id) {
                if now.duration_since(entry.last_seen) <= self.ttl {
                    entry.last_seen = now;
                    return SessionHandle {
                        id,
                        session: Arc::clone(&entry.session),
                        created: false,
                    };
                }
            }
        }

        let before = map.len();
        map.retain(|_, e| now.duration_since(e.last_seen) <= self.ttl);
        let evicted = before - map.len();
        if evicted > 0 {
            debug!(evicted, "expired sessions dropped");
        }

        let id = services::uuid::new_session_id();
        let session = Arc::new(Mutex::new(Session::new(id, initial_state)));
        map.insert(
            id,
            Entry {
                session: Arc::clone(&session),
                last_seen: now,
            },
        );
        debug!(%id, live = map.len(), "session started");

        SessionHandle {
            id,
            session,
            created: true,
        }
    }

    /// Live session for `id` without creating one.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        let map = self.sessions.read().await;
        map.get(&id)
            .filter(|e| e.last_seen.elapsed() <= self.ttl)
            .map(|e| Arc::clone(&e.session))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_id_returns_same_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        let first = store.get_or_create(None, ProviderState::Primary).await;
        assert!(first.created);

        let again = store.get_or_create(Some(first.id), ProviderState::Primary).await;
        assert!(!again.created);
        assert_eq!(again.id, first.id);
        assert!(Arc::ptr_eq(&again.session, &first.session));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_id_starts_fresh_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        let stray = Uuid::new_v4();
        let handle = store.get_or_create(Some(stray), ProviderState::Fallback).await;
        assert!(handle.created);
        assert_ne!(handle.id, stray);

        let session = handle.session.lock().await;
        assert_eq!(session.provider_state(), ProviderState::Fallback);
        assert_eq!(session.profile(), Profile::Intermediate);
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let store = SessionStore::new(Duration::from_millis(20));
        let old = store.get_or_create(None, ProviderState::Primary).await;
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(store.get(old.id).await.is_none());
        let next = store.get_or_create(Some(old.id), ProviderState::Primary).await;
        assert!(next.created);
        assert_ne!(next.id, old.id);
        assert_eq!(store.len().await, 1);
    }
}
