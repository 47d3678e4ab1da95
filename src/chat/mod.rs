pub mod credentials;
mod dto;
pub mod fallback;
pub mod gemini;
pub mod generator;
pub mod handlers;
pub mod relay;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
