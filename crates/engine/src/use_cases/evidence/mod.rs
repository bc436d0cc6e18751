//! Evidence tracking.
//!
//! Revealing a clue only ever grows the session's revealed set. The first reveal also
//! drops a system note into the transcript of every suspect the clue concerns.

use std::sync::Arc;

use whodunit_domain::{Clue, ClueId, RevealOutcome, Session, SuspectId};

use crate::infrastructure::ports::ClockPort;
use crate::use_cases::GameError;

/// Result of looking for the day's clue about one suspect.
#[derive(Debug, Clone, PartialEq)]
pub struct DayClue {
    /// Text shown to the player
    pub text: String,
    pub clue: Option<Clue>,
    pub newly_revealed: bool,
}

pub struct EvidenceTracker {
    clock: Arc<dyn ClockPort>,
}

impl EvidenceTracker {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self { clock }
    }

    /// Reveal a clue. Idempotent.
    pub fn reveal(&self, session: &mut Session, clue_id: &ClueId) -> Result<RevealOutcome, GameError> {
        let outcome = session.reveal(clue_id, self.clock.now())?;
        if outcome.newly_revealed {
            tracing::info!(
                session_id = %session.id(),
                clue_id = %clue_id,
                noted = outcome.noted_suspects.len(),
                "Clue revealed"
            );
        }
        Ok(outcome)
    }

    /// Find and reveal the next clue about `suspect` available by `day`.
    pub fn clue_for(
        &self,
        session: &mut Session,
        day: u32,
        suspect: &SuspectId,
    ) -> Result<DayClue, GameError> {
        if day == 0 {
            return Err(GameError::validation("day must be 1 or greater"));
        }
        session.ensure_open()?;
        let name = session.suspect(suspect)?.name.display_name();
        session.begin_action(self.clock.now())?;

        let Some(clue_id) = session.next_clue_for(suspect, day).map(|c| c.id.clone()) else {
            return Ok(DayClue {
                text: format!("No new clues for {name} today."),
                clue: None,
                newly_revealed: false,
            });
        };

        let outcome = self.reveal(session, &clue_id)?;
        Ok(DayClue {
            text: format!("Clue about {name}: {}", outcome.clue.description),
            newly_revealed: outcome.newly_revealed,
            clue: Some(outcome.clue),
        })
    }
}
