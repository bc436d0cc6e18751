use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Maximum length for case-local keys (suspect and clue ids).
const MAX_KEY_LENGTH: usize = 64;

/// Identifies one running game. Random v4 UUID, opaque to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn to_uuid(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| DomainError::InvalidId(format!("'{s}' is not a session id")))
    }
}

/// Keys that are only unique within a single case (e.g. `"butler"`, `"bloody_rope"`).
///
/// Keys are lowercased and trimmed; spaces and dashes become underscores so that
/// `"Bloody Rope"` and `"bloody_rope"` name the same clue.
macro_rules! define_key {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
                let raw = raw.into();
                let key: String = raw
                    .trim()
                    .chars()
                    .map(|c| match c {
                        ' ' | '-' => '_',
                        c => c.to_ascii_lowercase(),
                    })
                    .collect();
                if key.is_empty() {
                    return Err(DomainError::InvalidId(concat!($label, " cannot be empty").into()));
                }
                if key.len() > MAX_KEY_LENGTH {
                    return Err(DomainError::InvalidId(format!(
                        "{} cannot exceed {} characters",
                        $label, MAX_KEY_LENGTH
                    )));
                }
                if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err(DomainError::InvalidId(format!(
                        "{} '{}' may only contain letters, digits and underscores",
                        $label, raw
                    )));
                }
                Ok(Self(key))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }
    };
}

define_key!(SuspectId, "Suspect id");
define_key!(ClueId, "Clue id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_normalized() {
        let id = ClueId::new("  Bloody Rope ").unwrap();
        assert_eq!(id.as_str(), "bloody_rope");
        assert_eq!(id, ClueId::new("bloody-rope").unwrap());
    }

    #[test]
    fn empty_and_odd_keys_are_rejected() {
        assert!(SuspectId::new("   ").is_err());
        assert!(SuspectId::new("mrs. peacock").is_err());
        assert!(SuspectId::new("x".repeat(65)).is_err());
    }

    #[test]
    fn session_ids_round_trip_through_text() {
        let id = SessionId::new();
        assert_eq!(id.to_string().parse::<SessionId>().unwrap(), id);
        assert!("not-a-session".parse::<SessionId>().is_err());
    }

    #[test]
    fn keys_deserialize_through_validation() {
        let id: SuspectId = serde_json::from_str("\"Butler\"").unwrap();
        assert_eq!(id.as_str(), "butler");
        assert!(serde_json::from_str::<SuspectId>("\"\"").is_err());
    }
}
