//! Errors returned by the LLM port.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    /// Transport failure or a non-success HTTP status (`"{status}: {body}"`)
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("LLM request timed out after {0}ms")]
    Timeout(u64),
}

impl LlmError {
    pub fn from_status(status: u16, body: impl AsRef<str>) -> Self {
        Self::RequestFailed(format!("{status}: {}", body.as_ref()))
    }

    /// HTTP status carried by a `RequestFailed` built with `from_status`.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed(msg) => msg.split(':').next()?.trim().parse().ok(),
            _ => None,
        }
    }

    /// Whether trying the same request again could succeed.
    ///
    /// Bad requests, auth and quota failures (400-403) fail the same way on retry.
    /// Rate limiting (429) clears after a pause, so it counts as transient.
    pub fn is_transient(&self) -> bool {
        !matches!(self.status(), Some(400..=403))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rejected_requests_are_permanent() {
        assert!(!LlmError::from_status(401, "bad key").is_transient());
        assert!(!LlmError::from_status(403, "forbidden").is_transient());
        assert!(LlmError::from_status(429, "slow down").is_transient());
        assert!(LlmError::from_status(503, "overloaded").is_transient());
        assert!(LlmError::Timeout(100).is_transient());
        assert!(LlmError::RequestFailed("connection reset".into()).is_transient());
    }

    #[test]
    fn status_is_parsed_from_message() {
        assert_eq!(LlmError::from_status(502, "gateway").status(), Some(502));
        assert_eq!(LlmError::InvalidResponse("x".into()).status(), None);
    }
}
