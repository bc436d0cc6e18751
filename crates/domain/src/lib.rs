//! Whodunit Domain - case, session and verdict types.
//!
//! Everything here is synchronous and free of I/O. The engine crate owns locking,
//! the model client and the HTTP surface.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{evidence_note, Case, CaseDetails, RevealOutcome, Session, SessionState};
pub use entities::{
    Accusation, AccusationGuess, Alibi, Clue, Persona, Speaker, Suspect, Transcript, Turn,
    Verdict, VerdictRules,
};
pub use error::DomainError;
pub use ids::{ClueId, SessionId, SuspectId};
pub use value_objects::{
    Description, MatchGrade, Question, SuspectName, VerdictPolicy, DEFAULT_PARTIAL_THRESHOLD,
};
