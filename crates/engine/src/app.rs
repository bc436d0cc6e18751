//! Application state and composition.

use std::sync::Arc;

use whodunit_domain::VerdictRules;

use crate::infrastructure::{
    ports::{ClockPort, LlmPort, RandomPort},
    resilient_llm::RetryConfig,
    settings::{CaseSource, EngineSettings},
};
use crate::stores::SessionStore;
use crate::use_cases::{
    dialogue::DialogueConfig, AccusationResolver, CaseGenerator, DialogueEngine, EvidenceTracker,
    SessionOrchestrator,
};

/// Main application state.
///
/// Built once in `main` and passed to HTTP handlers via Axum state.
pub struct App {
    pub game: Arc<SessionOrchestrator>,
    pub llm: Arc<dyn LlmPort>,
    pub clock: Arc<dyn ClockPort>,
    pub llm_status: LlmStatus,
}

/// What the health probe reports about the model.
#[derive(Debug, Clone)]
pub struct LlmStatus {
    pub configured: bool,
    pub model: String,
    pub retry: RetryConfig,
}

impl App {
    /// Create a new App with all use cases wired up.
    ///
    /// `llm` should already carry retry and timeout handling.
    pub fn new(
        settings: &EngineSettings,
        llm: Arc<dyn LlmPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let store = Arc::new(SessionStore::new(
            clock.clone(),
            settings.sessions.idle_timeout,
        ));

        let mut case_gen = CaseGenerator::new(random);
        if settings.game.case_source == CaseSource::Llm {
            case_gen = case_gen.with_llm(llm.clone(), settings.llm.temperature);
        }

        let dialogue = DialogueEngine::new(
            llm.clone(),
            clock.clone(),
            DialogueConfig {
                confession_clue_threshold: settings.game.confession_clue_threshold,
                temperature: settings.llm.temperature,
            },
        );
        let evidence = EvidenceTracker::new(clock.clone());
        let accusation = AccusationResolver::new(
            clock.clone(),
            VerdictRules {
                policy: settings.game.verdict_policy,
                ..VerdictRules::default()
            },
        );

        let game = Arc::new(SessionOrchestrator::new(
            store,
            Arc::new(case_gen),
            Arc::new(dialogue),
            Arc::new(evidence),
            Arc::new(accusation),
        ));

        Self {
            game,
            llm,
            clock,
            llm_status: LlmStatus {
                configured: !settings.llm.api_key.is_empty(),
                model: settings.llm.model.clone(),
                retry: settings.llm.retry.clone(),
            },
        }
    }
}
