//! Failures raised by case construction, session mutation and accusation.
//!
//! The engine maps each variant onto a client error without inspecting messages.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input broke a rule (empty question, malformed case document, ...)
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    #[error("An accusation has already been made in this session")]
    AlreadyAccused,

    /// Concluded sessions accept no further actions
    #[error("Session is closed")]
    SessionClosed,

    #[error("Session cannot move from {from} to {to}")]
    IllegalTransition {
        from: &'static str,
        to: &'static str,
    },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity() {
        let err = DomainError::not_found("Suspect", "butler");
        assert_eq!(err.to_string(), "Suspect not found: butler");
        assert!(err.is_not_found());
        assert!(!DomainError::SessionClosed.is_not_found());
    }

    #[test]
    fn transition_message_names_both_states() {
        let err = DomainError::IllegalTransition {
            from: "concluded",
            to: "in_progress",
        };
        assert_eq!(err.to_string(), "Session cannot move from concluded to in_progress");
    }
}
