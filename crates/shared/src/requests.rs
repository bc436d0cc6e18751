//! Request bodies accepted by the game API.

use serde::{Deserialize, Serialize};

/// `POST /session`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Fixed seed for a reproducible case; omitted for a fresh one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// `POST /session/{id}/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub suspect_id: String,
    pub question: String,
}

/// `POST /session/{id}/reveal`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealRequest {
    pub clue_id: String,
}

/// `POST /session/{id}/accuse`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuseRequest {
    /// Suspect id or name
    pub culprit: String,
    #[serde(default)]
    pub motive: String,
    #[serde(default)]
    pub method: String,
}

/// Query for `GET /session/{id}/clue`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClueQuery {
    pub day: Option<u32>,
    pub suspect: Option<String>,
}

/// Query for `GET /health`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthQuery {
    /// When true, perform a live round trip to the model
    #[serde(default)]
    pub test_llm: bool,
}
