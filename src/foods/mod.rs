pub mod classifier;
mod dto;
pub mod handlers;
pub mod knowledge;
pub mod services;
pub mod tips;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
