//! Session aggregate - one player's mutable progress through a case
//!
//! # Invariants
//!
//! - The revealed-clue set only grows
//! - Transcripts are append-only; a question is never recorded without its reply
//! - At most one accusation is ever recorded
//! - State only moves forward: `Created -> InProgress -> Concluded`
//!
//! The aggregate is synchronous and knows nothing about locking or the model. The
//! engine's session store serializes access to it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregates::Case;
use crate::entities::{
    Accusation, AccusationGuess, Clue, Speaker, Suspect, Transcript, Turn, Verdict, VerdictRules,
};
use crate::error::DomainError;
use crate::ids::{ClueId, SessionId, SuspectId};
use crate::value_objects::Question;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Case generated, no action taken yet
    Created,
    /// At least one dialogue or evidence action happened
    InProgress,
    /// An accusation was recorded
    Concluded,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::InProgress => "in_progress",
            Self::Concluded => "concluded",
        }
    }

    /// Whether `self -> next` is a legal forward transition.
    pub fn can_transition_to(&self, next: SessionState) -> bool {
        matches!(
            (self, next),
            (Self::Created, Self::InProgress)
                | (Self::Created, Self::Concluded)
                | (Self::InProgress, Self::Concluded)
        )
    }
}

/// Outcome of revealing a clue
#[derive(Debug, Clone, PartialEq)]
pub struct RevealOutcome {
    pub newly_revealed: bool,
    pub clue: Clue,
    /// Suspects whose transcript received a system note
    pub noted_suspects: Vec<SuspectId>,
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    case: Arc<Case>,
    state: SessionState,
    revealed: BTreeSet<ClueId>,
    transcripts: BTreeMap<SuspectId, Transcript>,
    accusation: Option<Accusation>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId, case: Arc<Case>, now: DateTime<Utc>) -> Self {
        let transcripts = case
            .suspects()
            .iter()
            .map(|s| (s.id.clone(), Transcript::new()))
            .collect();
        let revealed = case.default_revealed();
        Self {
            id,
            case,
            state: SessionState::Created,
            revealed,
            transcripts,
            accusation: None,
            created_at: now,
            updated_at: now,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn case(&self) -> &Arc<Case> {
        &self.case
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_concluded(&self) -> bool {
        self.state == SessionState::Concluded
    }

    pub fn revealed(&self) -> &BTreeSet<ClueId> {
        &self.revealed
    }

    pub fn accusation(&self) -> Option<&Accusation> {
        self.accusation.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn suspect(&self, id: &SuspectId) -> Result<&Suspect, DomainError> {
        self.case
            .suspect(id)
            .ok_or_else(|| DomainError::not_found("Suspect", id))
    }

    pub fn transcript(&self, id: &SuspectId) -> Result<&Transcript, DomainError> {
        self.transcripts
            .get(id)
            .ok_or_else(|| DomainError::not_found("Suspect", id))
    }

    pub fn transcript_lengths(&self) -> BTreeMap<SuspectId, usize> {
        self.transcripts
            .iter()
            .map(|(id, t)| (id.clone(), t.len()))
            .collect()
    }

    /// Number of revealed clues implicating `suspect`.
    pub fn implicating_revealed(&self, suspect: &SuspectId) -> usize {
        self.case.implicating_count(suspect, &self.revealed)
    }

    // =========================================================================
    // State machine
    // =========================================================================

    /// Fail with `SessionClosed` once the session is concluded.
    pub fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_concluded() {
            return Err(DomainError::SessionClosed);
        }
        Ok(())
    }

    fn transition(&mut self, next: SessionState) -> Result<(), DomainError> {
        if self.state == next {
            return Ok(());
        }
        if !self.state.can_transition_to(next) {
            return Err(DomainError::IllegalTransition {
                from: self.state.as_str(),
                to: next.as_str(),
            });
        }
        self.state = next;
        Ok(())
    }

    /// Mark the start of a dialogue or evidence action.
    pub fn begin_action(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.transition(SessionState::InProgress)?;
        self.updated_at = now;
        Ok(())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a question and its reply to a suspect's transcript as one unit.
    pub fn record_exchange(
        &mut self,
        suspect: &SuspectId,
        question: Question,
        reply: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        if !self.transcripts.contains_key(suspect) {
            return Err(DomainError::not_found("Suspect", suspect));
        }
        self.begin_action(now)?;
        if let Some(transcript) = self.transcripts.get_mut(suspect) {
            transcript.push_exchange(
                Turn::new(Speaker::Detective, question.into_inner(), now),
                Turn::new(Speaker::Suspect, reply, now),
            );
        }
        Ok(())
    }

    /// Reveal a clue. Revealing it a second time is a no-op.
    ///
    /// On first reveal a system note is appended to the transcript of every suspect
    /// the clue implicates or exculpates.
    pub fn reveal(&mut self, clue_id: &ClueId, now: DateTime<Utc>) -> Result<RevealOutcome, DomainError> {
        self.ensure_open()?;
        let clue = self
            .case
            .clue(clue_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Clue", clue_id))?;
        self.begin_action(now)?;

        if !self.revealed.insert(clue.id.clone()) {
            return Ok(RevealOutcome {
                newly_revealed: false,
                clue,
                noted_suspects: Vec::new(),
            });
        }

        let mut noted_suspects = Vec::new();
        for suspect in clue.concerned_suspects() {
            let Some(transcript) = self.transcripts.get_mut(&suspect) else {
                continue;
            };
            let stance = if clue.implicates_suspect(&suspect) {
                "It points towards you."
            } else {
                "It supports your account."
            };
            transcript.push_note(Turn::new(
                Speaker::System,
                evidence_note(&clue, stance),
                now,
            ));
            noted_suspects.push(suspect);
        }

        Ok(RevealOutcome {
            newly_revealed: true,
            clue,
            noted_suspects,
        })
    }

    /// The first unrevealed clue about `suspect` available on or before `day`.
    pub fn next_clue_for(&self, suspect: &SuspectId, day: u32) -> Option<&Clue> {
        self.case
            .clues()
            .iter()
            .filter(|c| c.day <= day && c.concerns(suspect) && !self.revealed.contains(&c.id))
            .min_by_key(|c| c.day)
    }

    /// Record the accusation and conclude the session. Write-once.
    pub fn accuse(
        &mut self,
        guess: AccusationGuess,
        rules: VerdictRules,
        now: DateTime<Utc>,
    ) -> Result<Verdict, DomainError> {
        if self.accusation.is_some() {
            return Err(DomainError::AlreadyAccused);
        }
        let verdict = Verdict::compute(&self.case, &self.revealed, &guess, rules);
        self.transition(SessionState::Concluded)?;
        self.accusation = Some(Accusation {
            guess,
            at: now,
            verdict: verdict.clone(),
        });
        self.updated_at = now;
        Ok(verdict)
    }
}

/// Text of the system note recorded when a clue surfaces.
pub fn evidence_note(clue: &Clue, stance: &str) -> String {
    format!(
        "[evidence:{}] The detective has found: {} ({}). {}",
        clue.id, clue.description, clue.location, stance
    )
}
