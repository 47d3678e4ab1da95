use std::fmt;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Coarse health classification of a food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Healthy,
    Moderate,
    Unhealthy,
}

impl Tier {
    /// Order in which the tier tables are scanned.
    pub const PRIORITY: [Tier; 3] = [Tier::Healthy, Tier::Unhealthy, Tier::Moderate];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Healthy => "HEALTHY",
            Tier::Moderate => "MODERATE",
            Tier::Unhealthy => "UNHEALTHY",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Tier::Healthy => "healthy-badge",
            Tier::Moderate => "moderate-badge",
            Tier::Unhealthy => "unhealthy-badge",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tier::Healthy => "✅",
            Tier::Moderate => "⚖️",
            Tier::Unhealthy => "⚠️",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Tier::Healthy => "#00ff88",
            Tier::Moderate => "#ffcc00",
            Tier::Unhealthy => "#ff4444",
        }
    }

    /// Verdict shown for a food found in this tier's table.
    pub fn message(self) -> &'static str {
        match self {
            Tier::Healthy => "🥗 EXCELLENT! This is super nutritious!",
            Tier::Moderate => "🟡 Good in moderation with balanced diet.",
            Tier::Unhealthy => "🔴 Enjoy occasionally in small portions.",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodEntry {
    pub name: &'static str,
    pub tier: Tier,
    pub score: u8,
}

const HEALTHY: &[(&str, u8)] = &[
    ("apple", 10),
    ("banana", 9),
    ("salad", 10),
    ("broccoli", 10),
    ("spinach", 10),
    ("chicken breast", 8),
    ("salmon", 10),
    ("tuna", 9),
    ("eggs", 8),
    ("tofu", 8),
    ("greek yogurt", 9),
    ("quinoa", 9),
    ("brown rice", 8),
    ("oats", 9),
    ("almonds", 8),
    ("walnuts", 8),
    ("water", 10),
    ("green tea", 9),
    ("sushi", 8),
    ("edamame", 9),
    ("grilled fish", 9),
    ("avocado", 9),
];

const UNHEALTHY: &[(&str, u8)] = &[
    ("pizza", 3),
    ("burger", 2),
    ("fries", 1),
    ("fried chicken", 2),
    ("donut", 2),
    ("cake", 2),
    ("cookie", 3),
    ("ice cream", 3),
    ("chocolate", 4),
    ("candy", 1),
    ("soda", 1),
    ("chips", 1),
    ("white bread", 4),
    ("processed meat", 3),
    ("ramen", 3),
    ("cheesecake", 2),
    ("cupcake", 2),
    ("milkshake", 2),
];

const MODERATE: &[(&str, u8)] = &[
    ("pasta", 6),
    ("white rice", 5),
    ("bread", 6),
    ("cheese", 6),
    ("milk", 7),
    ("coffee", 6),
    ("juice", 5),
    ("dark chocolate", 7),
    ("red meat", 5),
    ("sandwich", 6),
    ("wrap", 6),
    ("soup", 7),
    ("nasi lemak", 6),
    ("curry", 6),
    ("satay", 6),
    ("laksa", 5),
    ("biryani", 5),
    ("mee goreng", 4),
];

fn table(tier: Tier) -> &'static [(&'static str, u8)] {
    match tier {
        Tier::Healthy => HEALTHY,
        Tier::Moderate => MODERATE,
        Tier::Unhealthy => UNHEALTHY,
    }
}

lazy_static! {
    static ref KNOWLEDGE_BASE: Vec<FoodEntry> = Tier::PRIORITY
        .iter()
        .flat_map(|&tier| {
            table(tier)
                .iter()
                .map(move |&(name, score)| FoodEntry { name, tier, score })
        })
        .collect();
}

/// Every entry, healthy table first, then unhealthy, then moderate; each
/// table keeps its own order.
pub fn entries() -> &'static [FoodEntry] {
    &KNOWLEDGE_BASE
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn scores_stay_in_range() {
        assert!(entries().iter().all(|e| (1..=10).contains(&e.score)));
    }

    #[test]
    fn tables_are_concatenated_in_priority_order() {
        let kb = entries();
        assert_eq!(kb.len(), 22 + 18 + 18);
        assert_eq!(kb[0].name, "apple");
        assert_eq!(kb[22].name, "pizza");
        assert_eq!(kb[40].name, "pasta");
        assert!(kb[..22].iter().all(|e| e.tier == Tier::Healthy));
        assert!(kb[22..40].iter().all(|e| e.tier == Tier::Unhealthy));
        assert!(kb[40..].iter().all(|e| e.tier == Tier::Moderate));
    }

    #[test]
    fn names_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for e in entries() {
            assert!(seen.insert(e.name), "duplicate {}", e.name);
            assert_eq!(e.name, e.name.to_lowercase());
        }
    }

    #[test]
    fn presentation_is_one_to_one() {
        let tiers = [Tier::Healthy, Tier::Moderate, Tier::Unhealthy];
        let badges: HashSet<_> = tiers.iter().map(|t| t.badge_class()).collect();
        let colors: HashSet<_> = tiers.iter().map(|t| t.color()).collect();
        let icons: HashSet<_> = tiers.iter().map(|t| t.icon()).collect();
        assert_eq!(badges.len(), 3);
        assert_eq!(colors.len(), 3);
        assert_eq!(icons.len(), 3);
        assert_eq!(Tier::Unhealthy.badge_class(), "unhealthy-badge");
    }

    #[test]
    fn tier_serializes_upper_case() {
        let json = serde_json::to_string(&Tier::Moderate).unwrap();
        assert_eq!(json, "\"MODERATE\"");
    }
}
