//! Use cases - game flow orchestration.
//!
//! Each module owns one part of a game: generating the case, questioning suspects,
//! tracking evidence and resolving the accusation. `session` ties them together.

pub mod accusation;
pub mod case_gen;
pub mod dialogue;
mod error;
pub mod evidence;
pub mod session;

pub use accusation::AccusationResolver;
pub use case_gen::CaseGenerator;
pub use dialogue::DialogueEngine;
pub use error::GameError;
pub use evidence::EvidenceTracker;
pub use session::SessionOrchestrator;
