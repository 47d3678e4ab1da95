use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use uuid::Uuid;

use super::store::SharedSession;
use crate::state::AppState;

pub const SESSION_HEADER: &str = "x-session-id";

/// Resolves the `x-session-id` header to a live session.
pub struct CurrentSession {
    pub id: Uuid,
    pub session: SharedSession,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or((StatusCode::BAD_REQUEST, format!("missing {SESSION_HEADER} header")))?;

        let id = Uuid::parse_str(raw.trim())
            .map_err(|_| (StatusCode::BAD_REQUEST, format!("invalid {SESSION_HEADER} header")))?;

        let session = state
            .sessions
            .get(id)
            .await
            .ok_or((StatusCode::NOT_FOUND, "session not found".into()))?;

        Ok(CurrentSession { id, session })
    }
}
