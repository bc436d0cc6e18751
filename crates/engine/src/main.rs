//! Whodunit Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use whodunit_engine::api;
use whodunit_engine::infrastructure::{
    clock::{SystemClock, SystemRandom},
    openai::OpenAiClient,
    ports::{ClockPort, LlmPort},
    resilient_llm::ResilientLlmClient,
    settings::EngineSettings,
};
use whodunit_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "whodunit_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Whodunit Engine");

    // A missing or placeholder key stops the process here.
    let settings = EngineSettings::from_env()?;

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    let openai = Arc::new(OpenAiClient::new(
        &settings.llm.base_url,
        &settings.llm.model,
        &settings.llm.api_key,
        settings.llm.timeout,
    ));
    let retry_config = settings.llm.retry.clone();
    tracing::info!(
        model = %settings.llm.model,
        max_retries = retry_config.max_retries,
        base_delay_ms = retry_config.base_delay_ms,
        request_timeout_ms = retry_config.request_timeout_ms,
        "LLM client configured"
    );
    let llm: Arc<dyn LlmPort> = Arc::new(ResilientLlmClient::new(openai, retry_config));

    let app = Arc::new(App::new(
        &settings,
        llm,
        clock,
        Arc::new(SystemRandom),
    ));
    tracing::info!(
        case_source = ?settings.game.case_source,
        verdict_policy = %settings.game.verdict_policy,
        confession_clue_threshold = settings.game.confession_clue_threshold,
        idle_timeout_secs = settings.sessions.idle_timeout.as_secs(),
        "Game configured"
    );

    // Spawn idle-session sweep
    let sweep_app = app.clone();
    let sweep_interval = settings.sessions.sweep_interval;
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(sweep_interval).await;

            let evicted = sweep_app.game.evict_idle();
            if evicted > 0 {
                tracing::info!(
                    evicted,
                    remaining = sweep_app.game.active_sessions(),
                    "Evicted idle sessions"
                );
            }
        }
    });

    let mut router = api::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(settings.server.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
