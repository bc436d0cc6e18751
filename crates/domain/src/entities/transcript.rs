//! Transcript entity - the ordered conversation with one suspect
//!
//! Turns are append-only. Order is causal and the full transcript is replayed
//! to the model on every call for that suspect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The player
    Detective,
    /// The suspect being questioned
    Suspect,
    /// Engine-authored notes (e.g., evidence revealed)
    System,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detective => "detective",
            Self::Suspect => "suspect",
            Self::System => "system",
        }
    }
}

/// One utterance in a transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            speaker,
            text: text.into(),
            at,
        }
    }
}

/// Append-only sequence of turns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Append a question and its reply as one unit.
    pub(crate) fn push_exchange(&mut self, question: Turn, reply: Turn) {
        self.turns.reserve(2);
        self.turns.push(question);
        self.turns.push(reply);
    }

    pub(crate) fn push_note(&mut self, note: Turn) {
        self.turns.push(note);
    }

    /// Number of system notes whose text contains `needle`.
    pub fn count_notes_containing(&self, needle: &str) -> usize {
        self.turns
            .iter()
            .filter(|t| t.speaker == Speaker::System && t.text.contains(needle))
            .count()
    }
}
