//! Suspect interrogation.
//!
//! Handles one question to one suspect:
//! 1. Lock the session and check it is still live and open
//! 2. Decide whether the culprit may confess, from the revealed evidence
//! 3. Build the prompt (persona, knowledge, full transcript, question)
//! 4. Call the LLM, racing the session's cancellation token
//! 5. Record question and reply together, or nothing at all

mod prompt;
mod reply;

use std::sync::Arc;

use whodunit_domain::{Question, SuspectId};

use crate::infrastructure::ports::{ClockPort, LlmPort};
use crate::stores::SessionHandle;
use crate::use_cases::GameError;

pub use prompt::ConfessionPolicy;
pub use reply::{clean_reply, deflection};

#[derive(Debug, Clone)]
pub struct DialogueConfig {
    /// Implicating clues that must be revealed before the culprit may confess
    pub confession_clue_threshold: usize,
    pub temperature: f32,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            confession_clue_threshold: 2,
            temperature: 0.7,
        }
    }
}

/// Outcome of a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueReply {
    pub text: String,
    /// True when the model was unavailable and a stock reply was used
    pub deflected: bool,
}

pub struct DialogueEngine {
    llm: Arc<dyn LlmPort>,
    clock: Arc<dyn ClockPort>,
    config: DialogueConfig,
}

impl DialogueEngine {
    pub fn new(llm: Arc<dyn LlmPort>, clock: Arc<dyn ClockPort>, config: DialogueConfig) -> Self {
        Self { llm, clock, config }
    }

    /// Ask `suspect_id` a question within the session behind `handle`.
    ///
    /// The session lock is held for the whole call so questions to one session are
    /// answered strictly one after another.
    pub async fn ask(
        &self,
        handle: &SessionHandle,
        suspect_id: &SuspectId,
        question: &str,
    ) -> Result<DialogueReply, GameError> {
        let mut session = handle.lock().await;
        if handle.is_evicted() {
            return Err(session_gone(handle));
        }
        session.ensure_open()?;

        let suspect = session.suspect(suspect_id)?.clone();
        let question = Question::new(question)?;

        let policy = ConfessionPolicy::decide(
            &suspect,
            session.implicating_revealed(suspect_id),
            self.config.confession_clue_threshold,
        );
        let request = prompt::build_request(
            session.case(),
            &suspect,
            session.transcript(suspect_id)?,
            &question,
            policy,
            self.config.temperature,
        );

        tracing::debug!(
            session_id = %handle.id(),
            suspect_id = %suspect_id,
            confession = ?policy,
            "Interrogating suspect"
        );

        let outcome = tokio::select! {
            _ = handle.cancellation().cancelled() => None,
            result = self.llm.generate(request) => Some(result),
        };

        // Evicted while waiting: the reply has nowhere to go.
        let Some(result) = outcome else {
            tracing::info!(session_id = %handle.id(), "Session evicted during LLM call, reply dropped");
            return Err(session_gone(handle));
        };
        if handle.is_evicted() {
            tracing::info!(session_id = %handle.id(), "Stale LLM reply rejected");
            return Err(session_gone(handle));
        }

        let display_name = suspect.name.display_name();
        let reply = match result {
            Ok(response) => {
                if response.truncated {
                    tracing::debug!(suspect_id = %suspect_id, "Model reply hit the token limit");
                }
                let text = clean_reply(&response.content, &display_name);
                if text.is_empty() {
                    tracing::warn!(suspect_id = %suspect_id, "Empty model reply, deflecting");
                    DialogueReply {
                        text: deflection(question.as_str()).to_string(),
                        deflected: true,
                    }
                } else {
                    DialogueReply {
                        text,
                        deflected: false,
                    }
                }
            }
            Err(e) => {
                tracing::warn!(suspect_id = %suspect_id, error = %e, "LLM unavailable, deflecting");
                DialogueReply {
                    text: deflection(question.as_str()).to_string(),
                    deflected: true,
                }
            }
        };

        session.record_exchange(suspect_id, question, reply.text.clone(), self.clock.now())?;
        Ok(reply)
    }
}

fn session_gone(handle: &SessionHandle) -> GameError {
    GameError::NotFound(format!("Session not found: {}", handle.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{LlmError, LlmResponse, MessageRole, MockLlmPort};
    use crate::stores::SessionStore;
    use crate::test_fixtures::{cid, sid, three_suspect_case, ManualClock, ScriptedLlm};
    use std::time::Duration;
    use tokio::sync::Notify;
    use whodunit_domain::{AccusationGuess, SessionState, Speaker, VerdictRules};

    fn setup(llm: Arc<dyn LlmPort>) -> (DialogueEngine, SessionStore, Arc<SessionHandle>) {
        let clock = Arc::new(ManualClock::new());
        let store = SessionStore::new(clock.clone(), Duration::from_secs(600));
        let handle = store.create(Arc::new(three_suspect_case()));
        let engine = DialogueEngine::new(llm, clock, DialogueConfig::default());
        (engine, store, handle)
    }

    #[tokio::test]
    async fn records_question_and_reply() {
        let llm = Arc::new(ScriptedLlm::replying("Agatha: I was on the train, detective."));
        let (engine, _store, handle) = setup(llm.clone());

        let reply = engine.ask(&handle, &sid("a"), "Where were you?").await.unwrap();

        assert_eq!(reply.text, "I was on the train, detective.");
        assert!(!reply.deflected);
        let session = handle.lock().await;
        let turns = session.transcript(&sid("a")).unwrap().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker, Speaker::Detective);
        assert_eq!(turns[0].text, "Where were you?");
        assert_eq!(turns[1].speaker, Speaker::Suspect);
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.transcript(&sid("b")).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn replays_full_transcript_in_order() {
        let llm = Arc::new(
            ScriptedLlm::replying("third")
                .then(Ok(LlmResponse::text("first")))
                .then(Ok(LlmResponse::text("second"))),
        );
        let (engine, _store, handle) = setup(llm.clone());

        engine.ask(&handle, &sid("c"), "One?").await.unwrap();
        engine.ask(&handle, &sid("c"), "Two?").await.unwrap();
        engine.ask(&handle, &sid("c"), "Three?").await.unwrap();

        let last = llm.requests().pop().unwrap();
        let replay: Vec<(MessageRole, &str)> = last
            .messages
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect();
        assert_eq!(
            replay,
            vec![
                (MessageRole::User, "One?"),
                (MessageRole::Assistant, "first"),
                (MessageRole::User, "Two?"),
                (MessageRole::Assistant, "second"),
                (MessageRole::User, "Three?"),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_suspect_is_not_found_and_nothing_recorded() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().never();
        let (engine, _store, handle) = setup(Arc::new(llm));

        let err = engine.ask(&handle, &sid("zed"), "Hello?").await.unwrap_err();

        assert!(matches!(err, GameError::NotFound(_)));
        assert_eq!(handle.lock().await.state(), SessionState::Created);
    }

    #[tokio::test]
    async fn blank_question_is_rejected() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().never();
        let (engine, _store, handle) = setup(Arc::new(llm));

        let err = engine.ask(&handle, &sid("a"), "   ").await.unwrap_err();

        assert!(matches!(err, GameError::Validation(_)));
    }

    #[tokio::test]
    async fn llm_failure_deflects_and_records_both_turns() {
        let llm = Arc::new(ScriptedLlm::failing(LlmError::Timeout(30000)));
        let (engine, _store, handle) = setup(llm);

        let reply = engine.ask(&handle, &sid("b"), "Did you kill him?").await.unwrap();

        assert!(reply.deflected);
        assert_eq!(reply.text, deflection("Did you kill him?"));
        assert_eq!(handle.lock().await.transcript(&sid("b")).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_model_reply_deflects() {
        let (engine, _store, handle) = setup(Arc::new(ScriptedLlm::replying("  ")));

        let reply = engine.ask(&handle, &sid("b"), "Well?").await.unwrap();

        assert!(reply.deflected);
    }

    #[tokio::test]
    async fn culprit_may_confess_only_after_threshold() {
        let llm = Arc::new(ScriptedLlm::replying("..."));
        let (engine, _store, handle) = setup(llm.clone());

        engine.ask(&handle, &sid("b"), "Did you do it?").await.unwrap();
        {
            let mut session = handle.lock().await;
            session.reveal(&cid("bloody_rope"), chrono::Utc::now()).unwrap();
        }
        engine.ask(&handle, &sid("b"), "And now?").await.unwrap();
        {
            let mut session = handle.lock().await;
            session.reveal(&cid("pawn_receipt"), chrono::Utc::now()).unwrap();
        }
        engine.ask(&handle, &sid("b"), "Confess!").await.unwrap();

        let prompts: Vec<String> = llm
            .requests()
            .into_iter()
            .map(|r| r.system_prompt.unwrap_or_default())
            .collect();
        assert!(prompts[0].contains("must never confess"));
        assert!(prompts[1].contains("must never confess"));
        assert!(prompts[2].contains("may break down and confess"));
    }

    #[tokio::test]
    async fn concluded_session_is_closed() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().never();
        let (engine, _store, handle) = setup(Arc::new(llm));
        handle
            .lock()
            .await
            .accuse(
                AccusationGuess::new("b", "", ""),
                VerdictRules::default(),
                chrono::Utc::now(),
            )
            .unwrap();

        let err = engine.ask(&handle, &sid("a"), "Hello?").await.unwrap_err();

        assert_eq!(err, GameError::SessionClosed);
    }

    #[tokio::test]
    async fn eviction_during_call_drops_reply() {
        let gate = Arc::new(Notify::new());
        let llm = Arc::new(ScriptedLlm::replying("too late").gated(gate.clone()));
        let (engine, store, handle) = setup(llm.clone());
        let engine = Arc::new(engine);

        let task = {
            let engine = engine.clone();
            let handle = handle.clone();
            tokio::spawn(async move { engine.ask(&handle, &sid("a"), "Still there?").await })
        };
        while llm.call_count() == 0 {
            tokio::task::yield_now().await;
        }
        store.delete(handle.id());
        gate.notify_one();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(GameError::NotFound(_))));
        assert_eq!(handle.lock().await.transcript(&sid("a")).unwrap().len(), 0);
    }
}
