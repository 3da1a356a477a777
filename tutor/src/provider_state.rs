//! Which text generator answers the next question of a session.

use std::fmt;

use serde::Serialize;

/// `Primary → Fallback → Unavailable`, never backwards within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderState {
    Primary,
    Fallback,
    Unavailable,
}

impl ProviderState {
    /// State of a fresh session given the generators that exist.
    pub fn initial(has_primary: bool, has_fallback: bool) -> Self {
        match (has_primary, has_fallback) {
            (true, _) => ProviderState::Primary,
            (false, true) => ProviderState::Fallback,
            (false, false) => ProviderState::Unavailable,
        }
    }

    /// Where a session goes after the primary ran out of quota.
    pub fn after_primary_exhausted(has_fallback: bool) -> Self {
        if has_fallback {
            ProviderState::Fallback
        } else {
            ProviderState::Unavailable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderState::Primary => "primary",
            ProviderState::Fallback => "fallback",
            ProviderState::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for ProviderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
