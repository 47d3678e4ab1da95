use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::log::FoodLogEntry;

#[derive(Debug, Serialize)]
pub struct CreatedSessionResponse {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub total: usize,
    pub entries: Vec<FoodLogEntry>,
}
