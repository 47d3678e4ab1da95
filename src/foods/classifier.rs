use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::knowledge::{self, FoodEntry, Tier};

/// Score range drawn for foods missing from the knowledge base.
pub const UNKNOWN_SCORES: std::ops::RangeInclusive<u8> = 5..=7;
pub const UNKNOWN_MESSAGE: &str = "🟡 Enjoy as part of balanced meals.";

/// How competing substring matches are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// First key hit while scanning healthy, unhealthy, then moderate,
    /// each table in its own order.
    PriorityOrder,
    /// Longest key found anywhere in the text; equal lengths fall back to
    /// priority order.
    #[default]
    LongestKey,
}

impl FromStr for MatchPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "priority" | "priority_order" => Ok(Self::PriorityOrder),
            "longest" | "longest_key" => Ok(Self::LongestKey),
            other => anyhow::bail!("unknown match policy '{other}' (expected 'priority' or 'longest')"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub tier: Tier,
    pub score: u8,
    pub message: &'static str,
    /// Knowledge-base key that decided the result, if any.
    pub matched: Option<&'static str>,
}

impl From<&FoodEntry> for ClassificationResult {
    fn from(entry: &FoodEntry) -> Self {
        Self {
            tier: entry.tier,
            score: entry.score,
            message: entry.tier.message(),
            matched: Some(entry.name),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    policy: MatchPolicy,
}

impl Classifier {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Classifies free text. Only a miss draws from `rng`.
    pub fn classify<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> ClassificationResult {
        let text = text.to_lowercase();
        match self.find(&text) {
            Some(entry) => entry.into(),
            None => ClassificationResult {
                tier: Tier::Moderate,
                score: rng.gen_range(UNKNOWN_SCORES),
                message: UNKNOWN_MESSAGE,
                matched: None,
            },
        }
    }

    fn find(&self, text: &str) -> Option<&'static FoodEntry> {
        let mut hits = knowledge::entries()
            .iter()
            .filter(|entry| text.contains(entry.name));
        match self.policy {
            MatchPolicy::PriorityOrder => hits.next(),
            MatchPolicy::LongestKey => hits.fold(None, |best, entry| match best {
                Some(b) if b.name.len() >= entry.name.len() => Some(b),
                _ => Some(entry),
            }),
        }
    }
}
