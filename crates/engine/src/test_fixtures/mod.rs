//! Shared test helpers: a hand-built case, a manual clock, a fixed seed and a scripted LLM.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{three_suspect_case, ManualClock, ScriptedLlm};
//!
//! let llm = Arc::new(ScriptedLlm::replying("I was in the library."));
//! let clock = Arc::new(ManualClock::new());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Notify;

use whodunit_domain::{
    Alibi, Case, CaseDetails, Clue, ClueId, Description, Persona, Suspect, SuspectId, SuspectName,
};

use crate::app::App;
use crate::infrastructure::ports::{
    ClockPort, LlmError, LlmPort, LlmRequest, LlmResponse, RandomPort,
};
use crate::infrastructure::settings::EngineSettings;

// =============================================================================
// Case
// =============================================================================

pub fn sid(raw: &str) -> SuspectId {
    SuspectId::new(raw).unwrap()
}

pub fn cid(raw: &str) -> ClueId {
    ClueId::new(raw).unwrap()
}

/// Three suspects: A (Agatha) is innocent, B (Basil) is guilty, C (Clara) is innocent.
///
/// Clues: `bloody_rope` implicates B, `train_ticket` clears A on day 2, and
/// `pawn_receipt` implicates B on day 2.
pub fn three_suspect_case() -> Case {
    let agatha = Suspect::new(
        sid("a"),
        SuspectName::new("Agatha").unwrap(),
        Persona::new(Description::new("The victim's nervous secretary").unwrap(), "anxious")
            .with_relationship("secretary"),
        Alibi::new("I caught the evening train to town", "8pm - 11pm", "the station"),
    )
    .with_knowledge("The colonel argued with Basil about money last week");

    let basil = Suspect::new(
        sid("b"),
        SuspectName::new("Basil").unwrap(),
        Persona::new(Description::new("The colonel's indebted nephew").unwrap(), "charming")
            .with_relationship("nephew"),
        Alibi::new("I was playing billiards alone", "9pm - 10pm", "the billiard room"),
    )
    .guilty()
    .with_knowledge("He owes a great deal to a bookmaker");

    let clara = Suspect::new(
        sid("c"),
        SuspectName::new("Clara").unwrap(),
        Persona::new(Description::new("The housekeeper of twenty years").unwrap(), "brisk")
            .with_relationship("housekeeper"),
        Alibi::new("I was polishing silver in the pantry", "8pm - 10pm", "the pantry"),
    );

    Case::new(
        CaseDetails {
            title: "The Colonel's Last Toast".into(),
            victim: "Colonel Hargreaves".into(),
            location: "Hargreaves Hall".into(),
            intro: "The colonel was found in the conservatory after dinner.".into(),
            motive: "to inherit the estate and clear his gambling debts".into(),
            method: "strangled with a curtain rope".into(),
        },
        vec![agatha, basil, clara],
        vec![
            Clue::new(cid("bloody_rope"), "A bloody curtain rope behind the piano", "conservatory")
                .implicating(sid("b")),
            Clue::new(cid("train_ticket"), "A stamped evening train ticket", "hallway")
                .exculpating(sid("a"))
                .on_day(2),
            Clue::new(cid("pawn_receipt"), "A pawn receipt for the colonel's watch", "billiard room")
                .implicating(sid("b"))
                .on_day(2),
        ],
    )
    .unwrap()
}

// =============================================================================
// Clock
// =============================================================================

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(by).unwrap();
    }
}

impl ClockPort for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Hands out the same seed every time.
pub struct FixedRandom(pub u64);

impl RandomPort for FixedRandom {
    fn next_seed(&self) -> u64 {
        self.0
    }
}

// =============================================================================
// LLM
// =============================================================================

/// LLM fake that plays back a script, then repeats a default reply.
///
/// Records every request so tests can inspect the prompts, and tracks the highest
/// number of calls that were in flight at once.
pub struct ScriptedLlm {
    script: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    default_reply: Result<LlmResponse, LlmError>,
    delay: Duration,
    gate: Option<Arc<Notify>>,
    requests: Mutex<Vec<LlmRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_reply: Ok(LlmResponse::text(text)),
            delay: Duration::ZERO,
            gate: None,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: LlmError) -> Self {
        Self {
            default_reply: Err(error),
            ..Self::replying("")
        }
    }

    /// Queue one response ahead of the default.
    pub fn then(self, response: Result<LlmResponse, LlmError>) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Hold every call until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmPort for ScriptedLlm {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let scripted = self.script.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| self.default_reply.clone())
    }
}

// =============================================================================
// App
// =============================================================================

/// Settings with a dummy key and defaults for everything else.
pub fn test_settings() -> EngineSettings {
    EngineSettings::from_lookup(|name| (name == "OPENAI_API_KEY").then(|| "sk-test".to_string()))
        .unwrap()
}

/// App wired to the given model and clock, with a fixed seed source.
pub fn test_app(llm: Arc<dyn LlmPort>, clock: Arc<dyn ClockPort>) -> App {
    App::new(&test_settings(), llm, clock, Arc::new(FixedRandom(7)))
}
