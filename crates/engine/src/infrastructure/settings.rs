//! Engine settings loaded from the environment at startup.

use std::time::Duration;

use whodunit_domain::VerdictPolicy;

use crate::infrastructure::openai::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use crate::infrastructure::resilient_llm::RetryConfig;

/// Value shipped in sample env files; treated the same as a missing key.
const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("OPENAI_API_KEY still holds the placeholder value")]
    PlaceholderApiKey,
}

/// Where new cases come from when no seed is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSource {
    #[default]
    Template,
    Llm,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone)]
pub struct GameSettings {
    pub confession_clue_threshold: usize,
    pub verdict_policy: VerdictPolicy,
    pub case_source: CaseSource,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            confession_clue_threshold: 2,
            verdict_policy: VerdictPolicy::default(),
            case_source: CaseSource::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub idle_timeout: Duration,
    pub sweep_interval: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(1800),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub llm: LlmSettings,
    pub game: GameSettings,
    pub sessions: SessionSettings,
    pub server: ServerSettings,
}

impl EngineSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary lookup, so tests never touch process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = var("OPENAI_API_KEY").ok_or(ConfigError::MissingApiKey)?;
        if api_key == PLACEHOLDER_API_KEY {
            return Err(ConfigError::PlaceholderApiKey);
        }

        let timeout_secs: u64 = parse_or(&var, "LLM_TIMEOUT_SECS", 30);
        let retry_defaults = RetryConfig::default();
        let retry = RetryConfig {
            max_retries: parse_or(&var, "LLM_MAX_RETRIES", retry_defaults.max_retries),
            base_delay_ms: parse_or(&var, "LLM_BASE_DELAY_MS", retry_defaults.base_delay_ms),
            max_delay_ms: parse_or(&var, "LLM_MAX_DELAY_MS", retry_defaults.max_delay_ms),
            request_timeout_ms: timeout_secs.saturating_mul(1000),
            ..retry_defaults
        };

        let llm = LlmSettings {
            api_key,
            base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into()),
            model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into()),
            temperature: parse_or(&var, "LLM_TEMPERATURE", 0.7),
            timeout: Duration::from_secs(timeout_secs),
            retry,
        };

        let game_defaults = GameSettings::default();
        let game = GameSettings {
            confession_clue_threshold: parse_or(
                &var,
                "CONFESSION_CLUE_THRESHOLD",
                game_defaults.confession_clue_threshold,
            ),
            verdict_policy: parse_or(&var, "VERDICT_POLICY", game_defaults.verdict_policy),
            case_source: match var("CASE_SOURCE").as_deref().map(str::to_ascii_lowercase) {
                None => CaseSource::Template,
                Some(s) if s == "template" => CaseSource::Template,
                Some(s) if s == "llm" => CaseSource::Llm,
                Some(other) => {
                    tracing::warn!(value = %other, "CASE_SOURCE not recognised, using template");
                    CaseSource::Template
                }
            },
        };

        let session_defaults = SessionSettings::default();
        let sessions = SessionSettings {
            idle_timeout: Duration::from_secs(parse_or(
                &var,
                "SESSION_IDLE_TIMEOUT_SECS",
                session_defaults.idle_timeout.as_secs(),
            )),
            sweep_interval: Duration::from_secs(
                parse_or(
                    &var,
                    "SESSION_SWEEP_INTERVAL_SECS",
                    session_defaults.sweep_interval.as_secs(),
                )
                .max(1),
            ),
        };

        let port_var = if var("SERVER_PORT").is_some() {
            "SERVER_PORT"
        } else {
            "PORT"
        };
        let port: u16 = parse_or(&var, port_var, 5000);
        let server = ServerSettings {
            host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
        };

        Ok(Self {
            llm,
            game,
            sessions,
            server,
        })
    }
}

fn parse_or<T, V>(var: &V, name: &str, default: T) -> T
where
    T: std::str::FromStr,
    V: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => default,
        Some(raw) => match raw.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(name, value = %raw, "Unparseable setting, using default");
                default
            }
        },
    }
}
