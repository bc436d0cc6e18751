//! Case aggregate - the immutable ground truth of one mystery
//!
//! # Invariants
//!
//! - At least one suspect, and suspect ids are unique
//! - Exactly one suspect has `is_guilty` set; `culprit()` always names that suspect
//! - Clue ids are unique within the case
//! - Every suspect a clue implicates or exculpates exists in the case
//!
//! A `Case` is valid by construction: `Case::new` is the only constructor and it
//! enforces the list above. Sessions share it read-only behind an `Arc`.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::entities::{Clue, Suspect};
use crate::error::DomainError;
use crate::ids::{ClueId, SuspectId};
use crate::value_objects::normalize;

/// Narrative framing of a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseDetails {
    pub title: String,
    pub victim: String,
    /// Where the body was found
    pub location: String,
    /// Opening text shown to the player
    pub intro: String,
    pub motive: String,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Case {
    details: CaseDetails,
    culprit: SuspectId,
    suspects: Vec<Suspect>,
    clues: Vec<Clue>,
}

impl Case {
    /// Build a case, checking every structural invariant.
    pub fn new(
        details: CaseDetails,
        suspects: Vec<Suspect>,
        clues: Vec<Clue>,
    ) -> Result<Self, DomainError> {
        if suspects.is_empty() {
            return Err(DomainError::validation("A case needs at least one suspect"));
        }
        if details.motive.trim().is_empty() || details.method.trim().is_empty() {
            return Err(DomainError::validation(
                "A case needs both a motive and a method",
            ));
        }

        let mut suspect_ids = HashSet::new();
        for suspect in &suspects {
            if !suspect_ids.insert(&suspect.id) {
                return Err(DomainError::validation(format!(
                    "Duplicate suspect id: {}",
                    suspect.id
                )));
            }
        }

        let mut guilty = suspects.iter().filter(|s| s.is_guilty);
        let culprit = match (guilty.next(), guilty.next()) {
            (Some(s), None) => s.id.clone(),
            (None, _) => {
                return Err(DomainError::validation("No suspect is marked guilty"));
            }
            (Some(_), Some(_)) => {
                return Err(DomainError::validation(
                    "More than one suspect is marked guilty",
                ));
            }
        };

        let mut clue_ids = HashSet::new();
        for clue in &clues {
            if !clue_ids.insert(&clue.id) {
                return Err(DomainError::validation(format!(
                    "Duplicate clue id: {}",
                    clue.id
                )));
            }
            if let Some(missing) = clue
                .implicates
                .iter()
                .chain(clue.exculpates.iter())
                .find(|id| !suspect_ids.contains(id))
            {
                return Err(DomainError::validation(format!(
                    "Clue {} references unknown suspect {}",
                    clue.id, missing
                )));
            }
        }

        Ok(Self {
            details,
            culprit,
            suspects,
            clues,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn details(&self) -> &CaseDetails {
        &self.details
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn intro(&self) -> &str {
        &self.details.intro
    }

    pub fn motive(&self) -> &str {
        &self.details.motive
    }

    pub fn method(&self) -> &str {
        &self.details.method
    }

    pub fn culprit(&self) -> &SuspectId {
        &self.culprit
    }

    pub fn culprit_suspect(&self) -> Option<&Suspect> {
        self.suspect(&self.culprit)
    }

    pub fn suspects(&self) -> &[Suspect] {
        &self.suspects
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn suspect(&self, id: &SuspectId) -> Option<&Suspect> {
        self.suspects.iter().find(|s| &s.id == id)
    }

    pub fn clue(&self, id: &ClueId) -> Option<&Clue> {
        self.clues.iter().find(|c| &c.id == id)
    }

    /// One sentence naming the victim and where they were found.
    pub fn victim_line(&self) -> String {
        format!(
            "{} was found dead at {}.",
            self.details.victim, self.details.location
        )
    }

    /// Clues revealed from the start of every session.
    pub fn default_revealed(&self) -> BTreeSet<ClueId> {
        self.clues
            .iter()
            .filter(|c| c.revealed_by_default)
            .map(|c| c.id.clone())
            .collect()
    }

    /// Look up a suspect by id or by (case-insensitive) name.
    pub fn resolve_suspect(&self, text: &str) -> Option<&Suspect> {
        if let Ok(id) = SuspectId::new(text) {
            if let Some(suspect) = self.suspect(&id) {
                return Some(suspect);
            }
        }
        let wanted = normalize(text);
        if wanted.is_empty() {
            return None;
        }
        self.suspects
            .iter()
            .find(|s| normalize(s.name.as_str()) == wanted)
    }

    /// How many of the given revealed clues implicate `suspect`.
    pub fn implicating_count(&self, suspect: &SuspectId, revealed: &BTreeSet<ClueId>) -> usize {
        self.clues
            .iter()
            .filter(|c| revealed.contains(&c.id) && c.implicates_suspect(suspect))
            .count()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::entities::{Alibi, Persona};
    use crate::value_objects::{Description, SuspectName};

    pub fn sid(raw: &str) -> SuspectId {
        SuspectId::new(raw).unwrap()
    }

    pub fn cid(raw: &str) -> ClueId {
        ClueId::new(raw).unwrap()
    }

    fn suspect(id: &str, name: &str) -> Suspect {
        Suspect::new(
            sid(id),
            SuspectName::new(name).unwrap(),
            Persona::new(Description::new(format!("{name} of the manor")).unwrap(), "calm"),
            Alibi::new("I was elsewhere", "9pm - 11pm", "the library"),
        )
    }

    /// Three suspects, B is guilty, one clue against B and one clearing A.
    pub fn manor_case() -> Case {
        Case::new(
            CaseDetails {
                title: "Death at Blackwood".into(),
                victim: "Lord Blackwood".into(),
                location: "Blackwood Manor".into(),
                intro: "A storm, a locked study, a body.".into(),
                motive: "to claim the inheritance before the will changed".into(),
                method: "strangled with a rope".into(),
            },
            vec![
                suspect("a", "Alice"),
                suspect("b", "Bertram").guilty(),
                suspect("c", "Cora"),
            ],
            vec![
                Clue::new(cid("bloody_rope"), "A bloody rope in the greenhouse", "greenhouse")
                    .implicating(sid("b")),
                Clue::new(cid("train_ticket"), "Alice's stamped train ticket", "hallway")
                    .exculpating(sid("a"))
                    .on_day(2),
                Clue::new(cid("torn_will"), "A torn draft of the new will", "study")
                    .implicating(sid("b"))
                    .on_day(2),
            ],
        )
        .unwrap()
    }
}
