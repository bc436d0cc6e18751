//! Trimmed, length-capped text used for suspects, clues and player questions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

const MAX_NAME_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 5000;
const MAX_QUESTION_CHARS: usize = 1000;

fn bounded(
    raw: String,
    label: &str,
    max_chars: usize,
    allow_empty: bool,
) -> Result<String, DomainError> {
    let text = raw.trim();
    if text.is_empty() && !allow_empty {
        return Err(DomainError::validation(format!("{label} cannot be empty")));
    }
    if text.chars().count() > max_chars {
        return Err(DomainError::validation(format!(
            "{label} cannot exceed {max_chars} characters"
        )));
    }
    Ok(text.to_owned())
}

/// Shared accessors and serde plumbing; construction stays type-specific.
macro_rules! text_newtype {
    ($name:ident) => {
        impl $name {
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

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }

        impl From<$name> for String {
            fn from(text: $name) -> String {
                text.0
            }
        }
    };
}

/// How a suspect is addressed in prompts and matched in accusations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SuspectName(String);

impl SuspectName {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        bounded(raw.into(), "Suspect name", MAX_NAME_CHARS, false).map(Self)
    }

    /// First letter uppercased: "colonel" becomes "Colonel".
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        chars
            .next()
            .map(|first| first.to_uppercase().chain(chars).collect())
            .unwrap_or_default()
    }
}

text_newtype!(SuspectName);

/// Free text that may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        bounded(raw.into(), "Description", MAX_DESCRIPTION_CHARS, true).map(Self)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

text_newtype!(Description);

/// What the detective asks a suspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question(String);

impl Question {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        bounded(raw.into(), "Question", MAX_QUESTION_CHARS, false).map(Self)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

text_newtype!(Question);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suspect_name_trims_and_capitalizes() {
        let name = SuspectName::new("  colonel mustard ").unwrap();
        assert_eq!(name.as_str(), "colonel mustard");
        assert_eq!(name.display_name(), "Colonel mustard");
        assert!(SuspectName::new("   ").is_err());
    }

    #[test]
    fn description_allows_empty_but_caps_length() {
        assert!(Description::new("").unwrap().is_empty());
        assert!(Description::new("x".repeat(MAX_DESCRIPTION_CHARS + 1)).is_err());
    }

    #[test]
    fn question_rejects_blank_input() {
        assert_eq!(
            Question::new(" \n\t "),
            Err(DomainError::validation("Question cannot be empty"))
        );
        assert_eq!(Question::new(" Where were you? ").unwrap().as_str(), "Where were you?");
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        assert!(Question::new("é".repeat(MAX_QUESTION_CHARS)).is_ok());
        assert!(Question::new("é".repeat(MAX_QUESTION_CHARS + 1)).is_err());
    }

    #[test]
    fn serde_goes_through_validation() {
        let name: SuspectName = serde_json::from_str("\" Basil \"").unwrap();
        assert_eq!(name.as_str(), "Basil");
        assert!(serde_json::from_str::<SuspectName>("\"\"").is_err());
    }
}
