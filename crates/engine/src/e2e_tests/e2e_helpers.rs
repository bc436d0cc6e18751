//! Shared setup for end-to-end tests.

use std::sync::Arc;
use std::time::Duration;

use whodunit_domain::SessionId;

use crate::app::App;
use crate::test_fixtures::{test_app, three_suspect_case, ManualClock, ScriptedLlm};

/// A full app plus handles on its fakes.
pub struct E2ETestContext {
    pub app: Arc<App>,
    pub llm: Arc<ScriptedLlm>,
    pub clock: Arc<ManualClock>,
}

impl E2ETestContext {
    pub fn new(llm: ScriptedLlm) -> Self {
        let llm = Arc::new(llm);
        let clock = Arc::new(ManualClock::new());
        let app = Arc::new(test_app(llm.clone(), clock.clone()));
        Self { app, llm, clock }
    }

    /// Open a session on the three-suspect case.
    pub fn begin_three_suspect(&self) -> SessionId {
        self.app.game.begin(Arc::new(three_suspect_case()))
    }

    /// Move the clock past the default idle timeout.
    pub fn expire_idle_sessions(&self) {
        self.clock.advance(Duration::from_secs(31 * 60));
    }

    /// Yield until the scripted LLM has seen `calls` requests.
    pub async fn wait_for_llm_calls(&self, calls: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.llm.call_count() < calls {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("LLM was never called");
    }
}
