//! Entities - objects with identity inside a case or session

mod accusation;
mod clue;
mod suspect;
mod transcript;

pub use accusation::{Accusation, AccusationGuess, Verdict, VerdictRules};
pub use clue::Clue;
pub use suspect::{Alibi, Persona, Suspect};
pub use transcript::{Speaker, Transcript, Turn};
