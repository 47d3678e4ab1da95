use std::collections::HashMap;

use serde::Serialize;
use time::OffsetDateTime;

use crate::foods::{classifier::ClassificationResult, knowledge::Tier, tips::NutritionFacts};

/// One analyzed food, as shown in the history table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodLogEntry {
    pub food: String,
    pub status: Tier,
    pub score: u8,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

/// Live-chat feed entry: the user's echo, then the analysis card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedEntry {
    User {
        content: String,
        #[serde(with = "clock_format")]
        time: OffsetDateTime,
    },
    Ai {
        food: String,
        analysis: ClassificationResult,
        badge_class: &'static str,
        icon: &'static str,
        color: &'static str,
        tips: NutritionFacts,
        #[serde(with = "clock_format")]
        time: OffsetDateTime,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub sender: Sender,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearTarget {
    /// AI chat turns only.
    AiChat,
    /// Feed, food log and AI chat.
    All,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub healthy: usize,
    pub unhealthy: usize,
    pub moderate: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub status: Tier,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodCount {
    pub food: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub distribution: Vec<TierCount>,
    pub top_foods: Vec<FoodCount>,
}

const TOP_FOODS: usize = 10;

// `HH:MM` on chat bubbles, full stamp in the CSV export.
time::serde::format_description!(clock_format, OffsetDateTime, "[hour]:[minute]");
time::serde::format_description!(
    stamp_format,
    OffsetDateTime,
    "[year]-[month]-[day] [hour]:[minute]:[second]"
);

#[derive(Serialize)]
struct CsvRow<'a> {
    food: &'a str,
    status: Tier,
    score: u8,
    #[serde(with = "stamp_format")]
    time: OffsetDateTime,
}

/// Append-only record of everything that happened in one session.
#[derive(Debug, Default)]
pub struct SessionLog {
    feed: Vec<FeedEntry>,
    food_log: Vec<FoodLogEntry>,
    ai_chat: Vec<ChatTurn>,
}

impl SessionLog {
    pub fn record_food(&mut self, food: &str, result: &ClassificationResult, facts: &NutritionFacts) {
        self.record_food_at(food, result, facts, OffsetDateTime::now_utc());
    }

    fn record_food_at(
        &mut self,
        food: &str,
        result: &ClassificationResult,
        facts: &NutritionFacts,
        now: OffsetDateTime,
    ) {
        self.feed.push(FeedEntry::User {
            content: food.to_string(),
            time: now,
        });
        self.feed.push(FeedEntry::Ai {
            food: food.to_string(),
            analysis: result.clone(),
            badge_class: result.tier.badge_class(),
            icon: result.tier.icon(),
            color: result.tier.color(),
            tips: facts.clone(),
            time: now,
        });
        self.food_log.push(FoodLogEntry {
            food: food.to_string(),
            status: result.tier,
            score: result.score,
            time: now,
        });
    }

    pub fn record_chat(&mut self, question: &str, answer: &str) {
        let now = OffsetDateTime::now_utc();
        self.ai_chat.push(ChatTurn {
            sender: Sender::User,
            text: question.to_string(),
            time: now,
        });
        self.ai_chat.push(ChatTurn {
            sender: Sender::Assistant,
            text: answer.to_string(),
            time: now,
        });
    }

    pub fn clear(&mut self, target: ClearTarget) {
        self.ai_chat.clear();
        if target == ClearTarget::All {
            self.feed.clear();
            self.food_log.clear();
        }
    }

    pub fn feed(&self) -> &[FeedEntry] {
        &self.feed
    }

    pub fn food_log(&self) -> &[FoodLogEntry] {
        &self.food_log
    }

    pub fn ai_chat(&self) -> &[ChatTurn] {
        &self.ai_chat
    }

    /// Food log, newest first. Entries logged in the same instant keep
    /// their reverse insertion order.
    pub fn history(&self) -> Vec<FoodLogEntry> {
        let mut rows: Vec<_> = self.food_log.iter().rev().cloned().collect();
        rows.sort_by(|a, b| b.time.cmp(&a.time));
        rows
    }

    pub fn stats(&self) -> Stats {
        self.food_log.iter().fold(Stats::default(), |mut s, e| {
            s.total += 1;
            match e.status {
                Tier::Healthy => s.healthy += 1,
                Tier::Unhealthy => s.unhealthy += 1,
                Tier::Moderate => s.moderate += 1,
            }
            s
        })
    }

    /// Data behind the distribution pie and the top-foods bar chart.
    pub fn dashboard(&self) -> Dashboard {
        let mut distribution: Vec<TierCount> = Vec::new();
        let mut foods: Vec<FoodCount> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for entry in &self.food_log {
            match distribution.iter_mut().find(|c| c.status == entry.status) {
                Some(c) => c.count += 1,
                None => distribution.push(TierCount {
                    status: entry.status,
                    count: 1,
                }),
            }
            match index.get(entry.food.as_str()) {
                Some(&i) => foods[i].count += 1,
                None => {
                    index.insert(entry.food.as_str(), foods.len());
                    foods.push(FoodCount {
                        food: entry.food.clone(),
                        count: 1,
                    });
                }
            }
        }

        // stable sorts keep first appearance on ties
        distribution.sort_by(|a, b| b.count.cmp(&a.count));
        foods.sort_by(|a, b| b.count.cmp(&a.count));
        foods.truncate(TOP_FOODS);

        Dashboard {
            distribution,
            top_foods: foods,
        }
    }

    /// History as CSV with columns `food,status,score,time`, newest first.
    pub fn export_csv(&self) -> Result<Vec<u8>, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for entry in self.history() {
            writer.serialize(CsvRow {
                food: &entry.food,
                status: entry.status,
                score: entry.score,
                time: entry.time,
            })?;
        }
        // an empty log still gets its header row
        if self.food_log.is_empty() {
            writer.write_record(["food", "status", "score", "time"])?;
        }
        writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}
