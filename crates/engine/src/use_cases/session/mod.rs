//! Session orchestration.
//!
//! The only place sessions are created or looked up. Every action goes through the
//! store handle, takes the session's lock and records activity for idle eviction.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::sync::MutexGuard;
use whodunit_domain::{
    AccusationGuess, Case, ClueId, RevealOutcome, Session, SessionId, SessionState, SuspectId,
    Turn, Verdict,
};

use crate::stores::{SessionHandle, SessionStore};
use crate::use_cases::accusation::AccusationResolver;
use crate::use_cases::case_gen::{CaseGenerator, CaseOrigin};
use crate::use_cases::dialogue::{DialogueEngine, DialogueReply};
use crate::use_cases::evidence::{DayClue, EvidenceTracker};
use crate::use_cases::GameError;

/// A freshly started game.
#[derive(Debug, Clone)]
pub struct StartedSession {
    pub session_id: SessionId,
    pub case: Arc<Case>,
    pub seed: u64,
    pub origin: CaseOrigin,
}

/// Read-only view of a session's progress.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub session_id: SessionId,
    pub state: SessionState,
    pub revealed: BTreeSet<ClueId>,
    pub transcript_lengths: BTreeMap<SuspectId, usize>,
    pub accused: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptView {
    pub suspect_id: SuspectId,
    pub turns: Vec<Turn>,
}

pub struct SessionOrchestrator {
    store: Arc<SessionStore>,
    case_gen: Arc<CaseGenerator>,
    dialogue: Arc<DialogueEngine>,
    evidence: Arc<EvidenceTracker>,
    accusation: Arc<AccusationResolver>,
}

impl SessionOrchestrator {
    pub fn new(
        store: Arc<SessionStore>,
        case_gen: Arc<CaseGenerator>,
        dialogue: Arc<DialogueEngine>,
        evidence: Arc<EvidenceTracker>,
        accusation: Arc<AccusationResolver>,
    ) -> Self {
        Self {
            store,
            case_gen,
            dialogue,
            evidence,
            accusation,
        }
    }

    pub fn active_sessions(&self) -> usize {
        self.store.len()
    }

    /// Generate a case and open a session on it.
    pub async fn start(&self, seed: Option<u64>) -> Result<StartedSession, GameError> {
        let generated = self.case_gen.generate_case(seed).await?;
        let session_id = self.begin(Arc::clone(&generated.case));
        tracing::info!(
            session_id = %session_id,
            seed = generated.seed,
            origin = ?generated.origin,
            title = %generated.case.title(),
            "Game started"
        );
        Ok(StartedSession {
            session_id,
            case: generated.case,
            seed: generated.seed,
            origin: generated.origin,
        })
    }

    /// Open a session on an already built case.
    pub fn begin(&self, case: Arc<Case>) -> SessionId {
        self.store.create(case).id()
    }

    pub async fn ask(
        &self,
        id: SessionId,
        suspect: &str,
        question: &str,
    ) -> Result<DialogueReply, GameError> {
        let handle = self.live(id)?;
        let suspect_id = resolve_suspect(&handle, suspect)?;
        let reply = self.dialogue.ask(&handle, &suspect_id, question).await;
        self.store.touch(&handle);
        reply
    }

    pub async fn reveal(&self, id: SessionId, clue: &str) -> Result<RevealOutcome, GameError> {
        let handle = self.live(id)?;
        let clue_id = ClueId::new(clue)
            .map_err(|_| GameError::NotFound(format!("Clue not found: {clue}")))?;
        let mut session = lock_live(&handle).await?;
        self.evidence.reveal(&mut session, &clue_id)
    }

    pub async fn clue_for(&self, id: SessionId, day: u32, suspect: &str) -> Result<DayClue, GameError> {
        let handle = self.live(id)?;
        let suspect_id = resolve_suspect(&handle, suspect)?;
        let mut session = lock_live(&handle).await?;
        self.evidence.clue_for(&mut session, day, &suspect_id)
    }

    pub async fn accuse(&self, id: SessionId, guess: AccusationGuess) -> Result<Verdict, GameError> {
        let handle = self.live(id)?;
        let mut session = lock_live(&handle).await?;
        self.accusation.accuse(&mut session, guess)
    }

    pub async fn snapshot(&self, id: SessionId) -> Result<SessionView, GameError> {
        let handle = self.live(id)?;
        let session = lock_live(&handle).await?;
        Ok(SessionView {
            session_id: session.id(),
            state: session.state(),
            revealed: session.revealed().clone(),
            transcript_lengths: session.transcript_lengths(),
            accused: session.accusation().is_some(),
        })
    }

    pub async fn transcript(&self, id: SessionId, suspect: &str) -> Result<TranscriptView, GameError> {
        let handle = self.live(id)?;
        let suspect_id = resolve_suspect(&handle, suspect)?;
        let session = lock_live(&handle).await?;
        let turns = session.transcript(&suspect_id)?.turns().to_vec();
        Ok(TranscriptView { suspect_id, turns })
    }

    /// Drop every idle session; called from the sweep task.
    pub fn evict_idle(&self) -> usize {
        self.store.evict_idle()
    }

    fn live(&self, id: SessionId) -> Result<Arc<SessionHandle>, GameError> {
        let handle = self.store.get(id)?;
        self.store.touch(&handle);
        Ok(handle)
    }
}

/// Take the session lock, failing if the session was evicted while we waited for it.
async fn lock_live(handle: &SessionHandle) -> Result<MutexGuard<'_, Session>, GameError> {
    let session = handle.lock().await;
    if handle.is_evicted() {
        return Err(GameError::NotFound(format!("Session not found: {}", handle.id())));
    }
    Ok(session)
}

/// Accept a suspect id or a suspect's name.
fn resolve_suspect(handle: &SessionHandle, raw: &str) -> Result<SuspectId, GameError> {
    handle
        .case()
        .resolve_suspect(raw)
        .map(|s| s.id.clone())
        .ok_or_else(|| GameError::NotFound(format!("Suspect not found: {}", raw.trim())))
}
