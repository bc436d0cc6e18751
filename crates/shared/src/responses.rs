//! Response bodies returned by the game API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use whodunit_domain::{MatchGrade, SessionState};

/// Public view of a suspect, safe to show before the case is solved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspectSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub relationship_to_victim: String,
}

/// `POST /session`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub title: String,
    pub intro_text: String,
    pub suspects: Vec<SuspectSummary>,
}

/// `POST /session/{id}/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub reply: String,
}

/// `POST /session/{id}/reveal`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealResponse {
    pub newly_revealed: bool,
    pub clue_text: String,
}

/// `GET /session/{id}/clue`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayClueResponse {
    pub clue_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue_id: Option<String>,
    pub newly_revealed: bool,
}

/// Wire form of a verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictData {
    pub success: bool,
    pub culprit: MatchGrade,
    pub motive: MatchGrade,
    pub method: MatchGrade,
    pub supporting_clues: Vec<String>,
    pub contradicting_clues: Vec<String>,
    pub explanation: String,
}

/// `POST /session/{id}/accuse`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuseResponse {
    pub verdict: VerdictData,
}

/// `GET /session/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub state: SessionState,
    pub revealed_clues: Vec<String>,
    pub transcript_lengths: BTreeMap<String, usize>,
    pub accused: bool,
}

/// One transcript line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnData {
    /// "detective", "suspect" or "system"
    pub speaker: String,
    pub text: String,
}

/// `GET /session/{id}/transcript/{suspect_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub suspect_id: String,
    pub turns: Vec<TurnData>,
}

/// Retry settings echoed by the health probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfigData {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub request_timeout_ms: u64,
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub llm_configured: bool,
    pub server_version: String,
    pub retry_config: RetryConfigData,
    pub active_sessions: usize,
    /// "success" or "failed"; present only when a live test was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_test: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_error: Option<String>,
}
