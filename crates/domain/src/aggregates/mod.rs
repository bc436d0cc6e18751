//! Aggregates - consistency boundaries of the domain
//!
//! - `Case`: immutable ground truth, valid by construction
//! - `Session`: one game in progress, owning transcripts, evidence and the accusation

pub(crate) mod case;
mod session;

pub use case::{Case, CaseDetails};
pub use session::{evidence_note, RevealOutcome, Session, SessionState};
