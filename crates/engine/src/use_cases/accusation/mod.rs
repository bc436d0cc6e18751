//! Accusation resolution.

use std::sync::Arc;

use whodunit_domain::{AccusationGuess, Session, Verdict, VerdictRules};

use crate::infrastructure::ports::ClockPort;
use crate::use_cases::GameError;

pub struct AccusationResolver {
    clock: Arc<dyn ClockPort>,
    rules: VerdictRules,
}

impl AccusationResolver {
    pub fn new(clock: Arc<dyn ClockPort>, rules: VerdictRules) -> Self {
        Self { clock, rules }
    }

    /// Grade the guess and conclude the session. A second accusation always fails.
    pub fn accuse(&self, session: &mut Session, guess: AccusationGuess) -> Result<Verdict, GameError> {
        let verdict = session.accuse(guess, self.rules, self.clock.now())?;
        tracing::info!(
            session_id = %session.id(),
            success = verdict.success,
            culprit = verdict.culprit.as_str(),
            motive = verdict.motive.as_str(),
            method = verdict.method.as_str(),
            "Accusation resolved"
        );
        Ok(verdict)
    }
}
