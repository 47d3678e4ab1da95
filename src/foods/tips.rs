use std::ops::RangeInclusive;

use rand::Rng;
use serde::Serialize;

use super::knowledge::Tier;

/// Macro estimate plus advice for one food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NutritionFacts {
    pub calories: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
    pub tips: Vec<String>,
    pub alternatives: Vec<String>,
}

struct Curated {
    name: &'static str,
    calories: u32,
    protein_g: u32,
    carbs_g: u32,
    fat_g: u32,
    tips: [&'static str; 3],
    alternatives: [&'static str; 3],
}

const CURATED: [Curated; 5] = [
    Curated {
        name: "nasi lemak",
        calories: 600,
        protein_g: 15,
        carbs_g: 75,
        fat_g: 25,
        tips: [
            "Use brown rice for more fiber",
            "Reduce sambal to lower sodium",
            "Add boiled egg instead of fried chicken",
        ],
        alternatives: ["Nasi kerabu", "Nasi dagang", "Brown rice nasi lemak"],
    },
    Curated {
        name: "sandwich",
        calories: 350,
        protein_g: 15,
        carbs_g: 45,
        fat_g: 12,
        tips: [
            "Use whole grain bread",
            "Load up on vegetables",
            "Choose lean protein like turkey",
        ],
        alternatives: ["Wrap", "Salad bowl", "Open-faced sandwich"],
    },
    Curated {
        name: "pizza",
        calories: 285,
        protein_g: 12,
        carbs_g: 36,
        fat_g: 10,
        tips: ["Choose thin crust", "Load up on veggies", "Go easy on the cheese"],
        alternatives: ["Cauliflower crust pizza", "Veggie pizza", "Whole wheat pizza"],
    },
    Curated {
        name: "burger",
        calories: 354,
        protein_g: 20,
        carbs_g: 35,
        fat_g: 15,
        tips: [
            "Use lettuce wrap instead of bun",
            "Choose lean meat",
            "Add lots of veggies",
        ],
        alternatives: ["Turkey burger", "Veggie burger", "Portobello burger"],
    },
    Curated {
        name: "pasta",
        calories: 220,
        protein_g: 8,
        carbs_g: 43,
        fat_g: 1,
        tips: [
            "Choose whole wheat pasta",
            "Add lean protein",
            "Load up on vegetables",
        ],
        alternatives: ["Zucchini noodles", "Whole wheat pasta", "Lentil pasta"],
    },
];

/// Sampling ranges and advice used when a food has no curated entry.
pub struct TierProfile {
    pub calories: RangeInclusive<u32>,
    pub protein_g: RangeInclusive<u32>,
    pub carbs_g: RangeInclusive<u32>,
    pub fat_g: RangeInclusive<u32>,
    pub tips: [&'static str; 3],
    pub alternatives: [&'static str; 3],
}

const HEALTHY: TierProfile = TierProfile {
    calories: 100..=300,
    protein_g: 8..=20,
    carbs_g: 10..=30,
    fat_g: 3..=10,
    tips: ["Great choice!", "Pair with protein", "Keep up the good work"],
    alternatives: ["Similar healthy option", "Another good choice", "Variety option"],
};

const UNHEALTHY: TierProfile = TierProfile {
    calories: 400..=600,
    protein_g: 5..=15,
    carbs_g: 40..=70,
    fat_g: 15..=30,
    tips: ["Enjoy as treat", "Watch portion size", "Balance with veggies"],
    alternatives: ["Healthier version", "Better alternative", "Light option"],
};

const MODERATE: TierProfile = TierProfile {
    calories: 250..=400,
    protein_g: 10..=20,
    carbs_g: 30..=50,
    fat_g: 8..=20,
    tips: ["Good in moderation", "Balance your meal", "Enjoy mindfully"],
    alternatives: ["Healthier twist", "Better choice", "Alternative option"],
};

pub fn profile(tier: Tier) -> &'static TierProfile {
    match tier {
        Tier::Healthy => &HEALTHY,
        Tier::Moderate => &MODERATE,
        Tier::Unhealthy => &UNHEALTHY,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fixed facts for the handful of foods that have them.
pub fn curated(food: &str) -> Option<NutritionFacts> {
    let key = food.trim().to_lowercase();
    CURATED.iter().find(|c| c.name == key).map(|c| NutritionFacts {
        calories: c.calories,
        protein_g: c.protein_g,
        carbs_g: c.carbs_g,
        fat_g: c.fat_g,
        tips: strings(&c.tips),
        alternatives: strings(&c.alternatives),
    })
}

/// Curated facts when the exact name is known, otherwise values sampled
/// from the tier's ranges.
pub fn nutrition_facts<R: Rng + ?Sized>(food: &str, tier: Tier, rng: &mut R) -> NutritionFacts {
    if let Some(facts) = curated(food) {
        return facts;
    }
    let p = profile(tier);
    NutritionFacts {
        calories: rng.gen_range(p.calories.clone()),
        protein_g: rng.gen_range(p.protein_g.clone()),
        carbs_g: rng.gen_range(p.carbs_g.clone()),
        fat_g: rng.gen_range(p.fat_g.clone()),
        tips: strings(&p.tips),
        alternatives: strings(&p.alternatives),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn curated_foods_are_exact() {
        let mut rng = StdRng::seed_from_u64(1);
        let pizza = nutrition_facts("pizza", Tier::Unhealthy, &mut rng);
        assert_eq!(
            (pizza.calories, pizza.protein_g, pizza.carbs_g, pizza.fat_g),
            (285, 12, 36, 10)
        );
        assert_eq!(pizza.alternatives[0], "Cauliflower crust pizza");

        let nasi = nutrition_facts("  Nasi Lemak ", Tier::Moderate, &mut rng);
        assert_eq!(nasi.calories, 600);
        assert_eq!(nasi.tips[1], "Reduce sambal to lower sodium");

        let expected = [
            ("sandwich", 350, 15, 45, 12),
            ("burger", 354, 20, 35, 15),
            ("pasta", 220, 8, 43, 1),
        ];
        for (name, cal, protein, carbs, fat) in expected {
            let facts = curated(name).expect(name);
            assert_eq!(
                (facts.calories, facts.protein_g, facts.carbs_g, facts.fat_g),
                (cal, protein, carbs, fat)
            );
            assert_eq!(facts.tips.len(), 3);
            assert_eq!(facts.alternatives.len(), 3);
        }
    }

    #[test]
    fn curated_lookup_ignores_tier() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = nutrition_facts("burger", Tier::Healthy, &mut rng);
        let b = nutrition_facts("burger", Tier::Unhealthy, &mut rng);
        assert_eq!(a, b);
    }

    #[test]
    fn curated_lookup_is_not_substring() {
        assert!(curated("pepperoni pizza").is_none());
    }

    #[test]
    fn synthesized_values_stay_in_tier_ranges() {
        let mut rng = StdRng::seed_from_u64(99);
        for tier in [Tier::Healthy, Tier::Moderate, Tier::Unhealthy] {
            let p = profile(tier);
            for _ in 0..100 {
                let facts = nutrition_facts("mystery food", tier, &mut rng);
                assert!(p.calories.contains(&facts.calories));
                assert!(p.protein_g.contains(&facts.protein_g));
                assert!(p.carbs_g.contains(&facts.carbs_g));
                assert!(p.fat_g.contains(&facts.fat_g));
                assert!(!facts.tips.is_empty());
                assert!(!facts.alternatives.is_empty());
            }
        }
    }

    #[test]
    fn unhealthy_sampling_uses_documented_bounds() {
        let p = profile(Tier::Unhealthy);
        assert_eq!(p.calories, 400..=600);
        assert_eq!(p.tips[0], "Enjoy as treat");
    }

    #[test]
    fn same_seed_same_facts() {
        let a = nutrition_facts("kale chips", Tier::Healthy, &mut StdRng::seed_from_u64(5));
        let b = nutrition_facts("kale chips", Tier::Healthy, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
