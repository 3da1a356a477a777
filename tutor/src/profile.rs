//! Expertise levels offered by the selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TutorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Profile {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Profile {
    /// Selector order.
    pub const ALL: [Profile; 3] = [Profile::Beginner, Profile::Intermediate, Profile::Advanced];

    pub fn label(self) -> &'static str {
        match self {
            Profile::Beginner => "Beginner",
            Profile::Intermediate => "Intermediate",
            Profile::Advanced => "Advanced",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Profile::Beginner => "👶",
            Profile::Intermediate => "👨‍💻",
            Profile::Advanced => "🧙‍♂️",
        }
    }

    /// `"👶 Beginner"` style label shown in the selector.
    pub fn selector_label(self) -> String {
        format!("{} {}", self.emoji(), self.label())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Profile {
    type Err = TutorError;

    /// Accepts `"beginner"`, `"Advanced"`, and the emoji-prefixed selector form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let name = match raw.split_once(' ') {
            Some((head, rest)) if Profile::ALL.iter().any(|p| p.emoji() == head) => rest.trim(),
            _ => raw,
        };

        Profile::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(name))
            .ok_or_else(|| TutorError::UnknownProfile(raw.to_string()))
    }
}

impl TryFrom<String> for Profile {
    type Error = TutorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_selector_labels() {
        assert_eq!("beginner".parse::<Profile>().unwrap(), Profile::Beginner);
        assert_eq!(" ADVANCED ".parse::<Profile>().unwrap(), Profile::Advanced);
        for p in Profile::ALL {
            assert_eq!(p.selector_label().parse::<Profile>().unwrap(), p);
        }
    }

    #[test]
    fn rejects_unknown_levels() {
        assert!(matches!(
            "Expert".parse::<Profile>(),
            Err(TutorError::UnknownProfile(s)) if s == "Expert"
        ));
        assert!("".parse::<Profile>().is_err());
    }

    #[test]
    fn default_is_intermediate() {
        assert_eq!(Profile::default(), Profile::Intermediate);
        assert_eq!(Profile::default().selector_label(), "👨‍💻 Intermediate");
    }
}
