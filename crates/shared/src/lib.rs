//! Whodunit Protocol - Wire types for the game HTTP API
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, uuid, serde_json and the domain vocabulary enums
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - raw `uuid::Uuid` for sessions, plain strings for case-local keys

pub mod errors;
pub mod requests;
pub mod responses;

pub use errors::{ErrorBody, ErrorCode};
pub use requests::{
    AccuseRequest, AskRequest, ClueQuery, CreateSessionRequest, HealthQuery, RevealRequest,
};
pub use responses::{
    AccuseResponse, AskResponse, CreateSessionResponse, DayClueResponse, HealthResponse,
    MatchGrade, RetryConfigData, RevealResponse, SessionSnapshot, SessionState, SuspectSummary,
    TranscriptResponse, TurnData, VerdictData,
};
