use axum::{
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{AskRequest, CredentialRequest};
use super::fallback::{QuickQuestion, QUICK_QUESTIONS};
use super::relay::RelayStatus;
use super::services::{self, Answer};
use crate::sessions::extractors::CurrentSession;
use crate::sessions::log::{ChatTurn, ClearTarget};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/chat/quick-questions", get(quick_questions))
        .route("/chat/history", get(history).delete(clear_history))
        .route("/chat/status", get(status))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/chat/ask", post(ask))
        .route("/chat/credential", put(set_credential))
}

/// POST /chat/ask { question: "..." }
#[instrument(skip_all, fields(session_id = %current.id))]
pub async fn ask(
    current: CurrentSession,
    Json(body): Json<AskRequest>,
) -> Result<Json<Answer>, (StatusCode, String)> {
    let question = body.question.trim();
    if question.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "question is required".into()));
    }
    let mut session = current.session.lock().await;
    Ok(Json(services::ask(&mut session, question).await))
}

pub async fn quick_questions() -> Json<Vec<QuickQuestion>> {
    Json(QUICK_QUESTIONS.to_vec())
}

#[instrument(skip_all, fields(session_id = %current.id))]
pub async fn history(current: CurrentSession) -> Json<Vec<ChatTurn>> {
    Json(current.session.lock().await.log.ai_chat().to_vec())
}

#[instrument(skip_all, fields(session_id = %current.id))]
pub async fn clear_history(current: CurrentSession) -> StatusCode {
    let mut session = current.session.lock().await;
    session.log.clear(ClearTarget::AiChat);
    session.relay.reset_conversation();
    info!("ai chat cleared");
    StatusCode::NO_CONTENT
}

#[instrument(skip_all, fields(session_id = %current.id))]
pub async fn status(current: CurrentSession) -> Json<RelayStatus> {
    Json(current.session.lock().await.relay.status())
}

/// PUT /chat/credential { api_key: "..." }, the setup panel.
#[instrument(skip_all, fields(session_id = %current.id))]
pub async fn set_credential(
    current: CurrentSession,
    Json(body): Json<CredentialRequest>,
) -> Result<Json<RelayStatus>, (StatusCode, String)> {
    if body.api_key.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "api_key is required".into()));
    }
    let mut session = current.session.lock().await;
    session.relay.set_manual_key(&body.api_key);
    info!("manual api key stored");
    Ok(Json(session.relay.status()))
}
