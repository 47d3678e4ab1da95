use time::OffsetDateTime;
use tracing::debug;

use super::classifier::{ClassificationResult, Classifier};
use super::tips::{self, NutritionFacts};
use crate::sessions::store::Session;

/// Buttons offered next to the food input.
pub const QUICK_FOODS: [(&str, &str); 15] = [
    ("🍕", "pizza"),
    ("🥗", "salad"),
    ("🍔", "burger"),
    ("🍣", "sushi"),
    ("🍝", "pasta"),
    ("🍫", "chocolate"),
    ("🍦", "ice cream"),
    ("🍎", "apple"),
    ("🥤", "soda"),
    ("🍗", "chicken"),
    ("🐟", "fish"),
    ("🥑", "avocado"),
    ("🍚", "nasi lemak"),
    ("🍜", "ramen"),
    ("🥪", "sandwich"),
];

#[derive(Debug, Clone)]
pub struct Analysis {
    pub food: String,
    pub result: ClassificationResult,
    pub facts: NutritionFacts,
    pub at: OffsetDateTime,
    /// Food log length after this entry.
    pub logged: usize,
}

/// Classifies `food`, builds its nutrition facts and records both in the
/// session log. The name is logged trimmed and lower-cased. Randomness comes
/// from the session's own generator.
pub fn analyze(session: &mut Session, classifier: &Classifier, food: &str) -> Analysis {
    let food = food.trim().to_lowercase();
    let food = food.as_str();
    let result = classifier.classify(food, &mut session.rng);
    let facts = tips::nutrition_facts(food, result.tier, &mut session.rng);
    debug!(food, tier = %result.tier, score = result.score, matched = ?result.matched, "food classified");

    session.log.record_food(food, &result, &facts);
    let at = session
        .log
        .food_log()
        .last()
        .map(|e| e.time)
        .unwrap_or_else(OffsetDateTime::now_utc);

    Analysis {
        food: food.to_string(),
        result,
        facts,
        at,
        logged: session.log.food_log().len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foods::classifier::UNKNOWN_SCORES;
    use crate::foods::knowledge::Tier;
    use crate::sessions::log::FeedEntry;
    use crate::state::AppState;

    #[test]
    fn pizza_is_unhealthy_with_curated_facts() {
        let state = AppState::fake();
        let mut session = state.open_session();
        let a = analyze(&mut session, &state.classifier, "  pizza ");

        assert_eq!(a.food, "pizza");
        assert_eq!(a.result.tier, Tier::Unhealthy);
        assert_eq!(a.result.score, 3);
        assert_eq!(a.facts.calories, 285);
        assert_eq!(a.logged, 1);

        let feed = session.log.feed();
        assert_eq!(feed.len(), 2);
        assert!(matches!(&feed[0], FeedEntry::User { content, .. } if content == "pizza"));
        assert!(matches!(&feed[1], FeedEntry::Ai { food, .. } if food == "pizza"));
    }

    #[test]
    fn food_names_are_case_folded_before_logging() {
        let state = AppState::fake();
        let mut session = state.open_session();
        let a = analyze(&mut session, &state.classifier, "Pizza");
        analyze(&mut session, &state.classifier, " PIZZA");
        analyze(&mut session, &state.classifier, "pizza");

        assert_eq!(a.food, "pizza");
        assert_eq!(a.facts.calories, 285);
        let top = session.log.dashboard().top_foods;
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].food, "pizza");
        assert_eq!(top[0].count, 3);
        assert!(session.log.history().iter().all(|e| e.food == "pizza"));
    }

    #[test]
    fn unknown_food_is_moderate_and_still_logged() {
        let state = AppState::fake();
        let mut session = state.open_session();
        let a = analyze(&mut session, &state.classifier, "zzzqqq");

        assert_eq!(a.result.tier, Tier::Moderate);
        assert!(UNKNOWN_SCORES.contains(&a.result.score));
        assert!(a.result.matched.is_none());
        assert!((250..=400).contains(&a.facts.calories));
        assert_eq!(session.log.stats().moderate, 1);
    }

    #[test]
    fn same_seed_gives_same_analysis() {
        let state = AppState::fake();
        let mut s1 = state.open_session();
        let mut s2 = state.open_session();
        let a = analyze(&mut s1, &state.classifier, "mystery stew");
        let b = analyze(&mut s2, &state.classifier, "mystery stew");
        assert_eq!(a.result, b.result);
        assert_eq!(a.facts, b.facts);
    }

    #[test]
    fn quick_foods_are_distinct() {
        let mut names: Vec<_> = QUICK_FOODS.iter().map(|(_, f)| *f).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), QUICK_FOODS.len());
    }
}
