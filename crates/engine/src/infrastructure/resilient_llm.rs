//! Timeout and retry decorator for any `LlmPort`.
//!
//! Each attempt is cut off after `request_timeout_ms`. Transient failures are retried
//! up to `max_retries` times with capped exponential backoff plus jitter. Rate limits
//! count as transient.

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest, LlmResponse};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt; 0 disables retrying
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Fraction of the delay randomly added or removed (0.0 - 1.0)
    pub jitter_factor: f64,
    pub request_timeout_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            base_delay_ms: 1_000,
            max_delay_ms: 10_000,
            jitter_factor: 0.2,
            request_timeout_ms: 30_000,
        }
    }
}

impl RetryConfig {
    /// Pause before retry number `retry` (1-based), without jitter.
    fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u64 << retry.saturating_sub(1).min(20);
        let millis = self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms);
        Duration::from_millis(millis)
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if self.jitter_factor <= 0.0 {
            return delay;
        }
        let spread = self.jitter_factor.min(1.0);
        delay.mul_f64(rand::thread_rng().gen_range(1.0 - spread..=1.0 + spread))
    }
}

pub struct ResilientLlmClient {
    inner: Arc<dyn LlmPort>,
    config: RetryConfig,
}

impl ResilientLlmClient {
    pub fn new(inner: Arc<dyn LlmPort>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    async fn attempt(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let limit = Duration::from_millis(self.config.request_timeout_ms);
        tokio::time::timeout(limit, self.inner.generate(request))
            .await
            .unwrap_or(Err(LlmError::Timeout(self.config.request_timeout_ms)))
    }
}

#[async_trait]
impl LlmPort for ResilientLlmClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let mut retry = 0;
        loop {
            let err = match self.attempt(request.clone()).await {
                Ok(response) => {
                    if retry > 0 {
                        tracing::info!(retry, "LLM request recovered");
                    }
                    return Ok(response);
                }
                Err(err) => err,
            };

            if !err.is_transient() {
                tracing::error!(error = %err, "LLM request rejected");
                return Err(err);
            }
            if retry >= self.config.max_retries {
                tracing::error!(attempts = retry + 1, error = %err, "LLM request gave up");
                return Err(err);
            }

            retry += 1;
            let delay = self.config.jittered(self.config.backoff(retry));
            tracing::warn!(
                retry,
                max_retries = self.config.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "LLM request failed, backing off"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
