//! Clue entity - a discrete piece of evidence

use serde::{Deserialize, Serialize};

use crate::ids::{ClueId, SuspectId};

/// A piece of evidence that can be revealed during play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    pub id: ClueId,
    pub description: String,
    /// Where the clue is found, or what action turns it up
    pub location: String,
    /// Revealed from the moment the session starts
    #[serde(default)]
    pub revealed_by_default: bool,
    /// First investigation day on which the clue can be found
    #[serde(default = "default_day")]
    pub day: u32,
    /// Suspects this clue points towards
    #[serde(default)]
    pub implicates: Vec<SuspectId>,
    /// Suspects this clue clears
    #[serde(default)]
    pub exculpates: Vec<SuspectId>,
}

fn default_day() -> u32 {
    1
}

impl Clue {
    pub fn new(id: ClueId, description: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            location: location.into(),
            revealed_by_default: false,
            day: default_day(),
            implicates: Vec::new(),
            exculpates: Vec::new(),
        }
    }

    pub fn implicating(mut self, suspect: SuspectId) -> Self {
        self.implicates.push(suspect);
        self
    }

    pub fn exculpating(mut self, suspect: SuspectId) -> Self {
        self.exculpates.push(suspect);
        self
    }

    pub fn on_day(mut self, day: u32) -> Self {
        self.day = day;
        self
    }

    pub fn revealed_at_start(mut self) -> Self {
        self.revealed_by_default = true;
        self
    }

    pub fn implicates_suspect(&self, suspect: &SuspectId) -> bool {
        self.implicates.contains(suspect)
    }

    pub fn exculpates_suspect(&self, suspect: &SuspectId) -> bool {
        self.exculpates.contains(suspect)
    }

    /// True if the clue says anything about this suspect.
    pub fn concerns(&self, suspect: &SuspectId) -> bool {
        self.implicates_suspect(suspect) || self.exculpates_suspect(suspect)
    }

    /// Every suspect mentioned by the clue, implicated first, without duplicates.
    pub fn concerned_suspects(&self) -> Vec<SuspectId> {
        let mut out: Vec<SuspectId> = Vec::new();
        for id in self.implicates.iter().chain(self.exculpates.iter()) {
            if !out.contains(id) {
                out.push(id.clone());
            }
        }
        out
    }
}
