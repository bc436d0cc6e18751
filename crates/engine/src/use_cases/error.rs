//! Errors surfaced by game use cases.

use whodunit_domain::DomainError;

use crate::stores::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("{0}")]
    NotFound(String),
    #[error("This session already has an accusation")]
    AlreadyAccused,
    #[error("This case is closed")]
    SessionClosed,
    #[error("{0}")]
    Validation(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GameError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<DomainError> for GameError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => Self::NotFound(err.to_string()),
            DomainError::AlreadyAccused => Self::AlreadyAccused,
            DomainError::SessionClosed => Self::SessionClosed,
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::InvalidId(msg) => Self::Validation(msg),
            DomainError::IllegalTransition { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl From<StoreError> for GameError {
    fn from(err: StoreError) -> Self {
        Self::NotFound(err.to_string())
    }
}
