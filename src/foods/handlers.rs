use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{AnalyzeRequest, AnalyzeResponse, QuickFood};
use super::services::{self, QUICK_FOODS};
use crate::sessions::extractors::CurrentSession;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/foods/analyze", post(analyze))
        .route("/foods/quick", get(quick_foods))
}

/// POST /foods/analyze { food: "..." }
#[instrument(skip_all, fields(session_id = %current.id))]
pub async fn analyze(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, String)> {
    if body.food.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "food is required".into()));
    }

    let mut session = current.session.lock().await;
    let a = services::analyze(&mut session, &state.classifier, &body.food);
    let tier = a.result.tier;

    Ok(Json(AnalyzeResponse {
        food: a.food,
        status: tier,
        score: a.result.score,
        message: a.result.message,
        matched: a.result.matched,
        badge_class: tier.badge_class(),
        icon: tier.icon(),
        color: tier.color(),
        nutrition: a.facts,
        time: a.at,
        logged: a.logged,
    }))
}

pub async fn quick_foods() -> Json<Vec<QuickFood>> {
    let items = QUICK_FOODS
        .iter()
        .map(|&(emoji, food)| QuickFood {
            emoji,
            food,
            label: format!("{emoji} {}", title_case(food)),
        })
        .collect();
    Json(items)
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
