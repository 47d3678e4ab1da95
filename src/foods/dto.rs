use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::knowledge::Tier;
use super::tips::NutritionFacts;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub food: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub food: String,
    pub status: Tier,
    pub score: u8,
    pub message: &'static str,
    pub matched: Option<&'static str>,
    pub badge_class: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub nutrition: NutritionFacts,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub logged: usize,
}

#[derive(Debug, Serialize)]
pub struct QuickFood {
    pub emoji: &'static str,
    pub food: &'static str,
    pub label: String,
}
