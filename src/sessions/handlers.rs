use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{error, info, instrument};

use super::dto::{CreatedSessionResponse, HistoryResponse};
use super::extractors::CurrentSession;
use super::log::{ClearTarget, Dashboard, FeedEntry, Stats};
use crate::state::AppState;

pub const CSV_FILENAME: &str = "bitebot_history.csv";

pub fn lifecycle_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/current", delete(end_session))
}

pub fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/session/feed", get(feed))
        .route("/session/history", get(history).delete(clear_history))
        .route("/session/history.csv", get(history_csv))
        .route("/session/stats", get(stats))
        .route("/session/dashboard", get(dashboard))
}

#[instrument(skip(state))]
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreatedSessionResponse>) {
    let session = state.open_session();
    let body = CreatedSessionResponse {
        id: session.id,
        created_at: session.created_at,
    };
    state.sessions.insert(session).await;
    info!(session_id = %body.id, "session created");
    (StatusCode::CREATED, Json(body))
}

#[instrument(skip_all, fields(session_id = %current.id))]
pub async fn end_session(State(state): State<AppState>, current: CurrentSession) -> StatusCode {
    state.sessions.remove(current.id).await;
    info!("session ended");
    StatusCode::NO_CONTENT
}

#[instrument(skip_all, fields(session_id = %current.id))]
pub async fn feed(current: CurrentSession) -> Json<Vec<FeedEntry>> {
    let session = current.session.lock().await;
    Json(session.log.feed().to_vec())
}

#[instrument(skip_all, fields(session_id = %current.id))]
pub async fn history(current: CurrentSession) -> Json<HistoryResponse> {
    let session = current.session.lock().await;
    let entries = session.log.history();
    Json(HistoryResponse {
        total: entries.len(),
        entries,
    })
}

#[instrument(skip_all, fields(session_id = %current.id))]
pub async fn history_csv(
    current: CurrentSession,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = current.session.lock().await;
    let body = session.log.export_csv().map_err(|e| {
        error!(error = %e, "csv export failed");
        internal(e)
    })?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILENAME}\""),
            ),
        ],
        body,
    ))
}

#[instrument(skip_all, fields(session_id = %current.id))]
pub async fn stats(current: CurrentSession) -> Json<Stats> {
    Json(current.session.lock().await.log.stats())
}

#[instrument(skip_all, fields(session_id = %current.id))]
pub async fn dashboard(current: CurrentSession) -> Json<Dashboard> {
    Json(current.session.lock().await.log.dashboard())
}

/// Clears the feed, food log and AI chat, and restarts the conversation.
#[instrument(skip_all, fields(session_id = %current.id))]
pub async fn clear_history(current: CurrentSession) -> StatusCode {
    let mut session = current.session.lock().await;
    session.log.clear(ClearTarget::All);
    session.relay.reset_conversation();
    info!("session history cleared");
    StatusCode::NO_CONTENT
}

fn internal<E: std::error::Error>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
