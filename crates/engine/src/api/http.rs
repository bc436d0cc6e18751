//! HTTP routes.

use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use whodunit_domain::{AccusationGuess, SessionId, Suspect, Turn, Verdict};
use whodunit_shared::{
    AccuseRequest, AccuseResponse, AskRequest, AskResponse, ClueQuery, CreateSessionRequest,
    CreateSessionResponse, DayClueResponse, ErrorBody, ErrorCode, HealthQuery, HealthResponse,
    RetryConfigData, RevealRequest, RevealResponse, SessionSnapshot, SuspectSummary,
    TranscriptResponse, TurnData, VerdictData,
};

use crate::app::App;
use crate::infrastructure::ports::{ChatMessage, LlmRequest};
use crate::use_cases::GameError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/health", get(health))
        .route("/session", post(create_session))
        .route("/session/{id}", get(get_session))
        .route("/session/{id}/ask", post(ask))
        .route("/session/{id}/reveal", post(reveal))
        .route("/session/{id}/accuse", post(accuse))
        .route("/session/{id}/clue", get(day_clue))
        .route("/session/{id}/transcript/{suspect_id}", get(transcript))
}

// =============================================================================
// Health
// =============================================================================

async fn health(
    State(app): State<Arc<App>>,
    query: Result<Query<HealthQuery>, QueryRejection>,
) -> Json<HealthResponse> {
    let test_llm = query.map(|Query(q)| q.test_llm).unwrap_or(false);
    let retry = &app.llm_status.retry;

    let mut response = HealthResponse {
        status: "ok".to_string(),
        timestamp: app.clock.now().to_rfc3339(),
        llm_configured: app.llm_status.configured,
        server_version: env!("CARGO_PKG_VERSION").to_string(),
        retry_config: RetryConfigData {
            max_retries: retry.max_retries,
            base_delay_ms: retry.base_delay_ms,
            max_delay_ms: retry.max_delay_ms,
            request_timeout_ms: retry.request_timeout_ms,
        },
        active_sessions: app.game.active_sessions(),
        llm_test: None,
        llm_response: None,
        llm_error: None,
    };

    if test_llm {
        let request = LlmRequest::new(vec![ChatMessage::user(
            "Reply with the single word: ready",
        )])
        .with_max_tokens(10);
        match app.llm.generate(request).await {
            Ok(reply) => {
                response.llm_test = Some("success".to_string());
                response.llm_response = Some(reply.content);
            }
            Err(e) => {
                tracing::warn!(error = %e, model = %app.llm_status.model, "LLM health check failed");
                response.llm_test = Some("failed".to_string());
                response.llm_error = Some(e.to_string());
            }
        }
    }

    Json(response)
}

// =============================================================================
// Sessions
// =============================================================================

async fn create_session(
    State(app): State<Arc<App>>,
    body: Bytes,
) -> Result<Json<CreateSessionResponse>, ApiError> {
    // The body is optional; an empty one means "no seed".
    let request: CreateSessionRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))?
    };

    let started = app.game.start(request.seed).await?;
    Ok(Json(CreateSessionResponse {
        session_id: started.session_id.to_uuid(),
        title: started.case.title().to_string(),
        intro_text: started.case.intro().to_string(),
        suspects: started.case.suspects().iter().map(suspect_summary).collect(),
    }))
}

async fn get_session(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let view = app.game.snapshot(parse_session_id(&id)?).await?;
    Ok(Json(SessionSnapshot {
        session_id: view.session_id.to_uuid(),
        state: view.state,
        revealed_clues: view.revealed.iter().map(ToString::to_string).collect(),
        transcript_lengths: view
            .transcript_lengths
            .into_iter()
            .map(|(id, len)| (id.to_string(), len))
            .collect(),
        accused: view.accused,
    }))
}

async fn ask(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let Json(request) = body?;
    let reply = app
        .game
        .ask(session_id, &request.suspect_id, &request.question)
        .await?;
    Ok(Json(AskResponse { reply: reply.text }))
}

async fn reveal(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    body: Result<Json<RevealRequest>, JsonRejection>,
) -> Result<Json<RevealResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let Json(request) = body?;
    let outcome = app.game.reveal(session_id, &request.clue_id).await?;
    Ok(Json(RevealResponse {
        newly_revealed: outcome.newly_revealed,
        clue_text: outcome.clue.description,
    }))
}

async fn accuse(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    body: Result<Json<AccuseRequest>, JsonRejection>,
) -> Result<Json<AccuseResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let Json(request) = body?;
    let verdict = app
        .game
        .accuse(
            session_id,
            AccusationGuess::new(request.culprit, request.motive, request.method),
        )
        .await?;
    Ok(Json(AccuseResponse {
        verdict: verdict_data(verdict),
    }))
}

async fn day_clue(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    query: Result<Query<ClueQuery>, QueryRejection>,
) -> Result<Json<DayClueResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let day = query
        .day
        .ok_or_else(|| ApiError::BadRequest("Missing query parameter: day".to_string()))?;
    let suspect = query
        .suspect
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing query parameter: suspect".to_string()))?;

    let found = app.game.clue_for(session_id, day, &suspect).await?;
    Ok(Json(DayClueResponse {
        clue_text: found.text,
        clue_id: found.clue.map(|c| c.id.to_string()),
        newly_revealed: found.newly_revealed,
    }))
}

async fn transcript(
    State(app): State<Arc<App>>,
    Path((id, suspect_id)): Path<(String, String)>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let view = app
        .game
        .transcript(parse_session_id(&id)?, &suspect_id)
        .await?;
    Ok(Json(TranscriptResponse {
        suspect_id: view.suspect_id.to_string(),
        turns: view.turns.iter().map(turn_data).collect(),
    }))
}

// =============================================================================
// Conversions
// =============================================================================

/// Unparseable ids can never name a live session.
fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Session not found: {raw}")))
}

fn suspect_summary(suspect: &Suspect) -> SuspectSummary {
    SuspectSummary {
        id: suspect.id.to_string(),
        name: suspect.name.display_name(),
        description: suspect.persona.description.as_str().to_string(),
        relationship_to_victim: suspect.persona.relationship_to_victim.clone(),
    }
}

fn turn_data(turn: &Turn) -> TurnData {
    TurnData {
        speaker: turn.speaker.as_str().to_string(),
        text: turn.text.clone(),
    }
}

fn verdict_data(verdict: Verdict) -> VerdictData {
    VerdictData {
        success: verdict.success,
        culprit: verdict.culprit,
        motive: verdict.motive,
        method: verdict.method,
        supporting_clues: verdict.supporting_clues.iter().map(ToString::to_string).collect(),
        contradicting_clues: verdict
            .contradicting_clues
            .iter()
            .map(ToString::to_string)
            .collect(),
        explanation: verdict.explanation,
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    AlreadyAccused,
    SessionClosed,
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(ErrorCode::NotFound, msg)),
            ApiError::AlreadyAccused => (
                StatusCode::CONFLICT,
                ErrorBody::new(ErrorCode::AlreadyAccused, GameError::AlreadyAccused.to_string()),
            ),
            ApiError::SessionClosed => (
                StatusCode::CONFLICT,
                ErrorBody::new(ErrorCode::SessionClosed, GameError::SessionClosed.to_string()),
            ),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new(ErrorCode::BadRequest, msg))
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(ErrorCode::Internal, "Internal error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        match e {
            GameError::NotFound(msg) => ApiError::NotFound(msg),
            GameError::AlreadyAccused => ApiError::AlreadyAccused,
            GameError::SessionClosed => ApiError::SessionClosed,
            GameError::Validation(msg) => ApiError::BadRequest(msg),
            GameError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}
