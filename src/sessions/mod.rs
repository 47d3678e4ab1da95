mod dto;
pub mod extractors;
pub mod handlers;
pub mod log;
pub mod store;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::lifecycle_routes())
        .merge(handlers::log_routes())
}
