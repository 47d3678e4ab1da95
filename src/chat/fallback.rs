//! Pre-written answers used while the generative service is unavailable.

use serde::Serialize;

use super::relay::RelayState;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuickQuestion {
    pub label: &'static str,
    pub question: &'static str,
    #[serde(skip)]
    answer: &'static str,
}

pub const QUICK_QUESTIONS: [QuickQuestion; 6] = [
    QuickQuestion {
        label: "🥗 Healthy Meal Ideas",
        question: "Give me some healthy meal ideas for weight loss",
        answer: "**🥗 Healthy Meal Ideas for Weight Loss:**

**🍳 Breakfast:**
- Greek yogurt with berries & almonds
- Scrambled eggs with spinach
- Oatmeal with banana & cinnamon
- Avocado toast on whole grain

**🥗 Lunch:**
- Grilled chicken salad
- Quinoa bowl with veggies
- Turkey avocado wrap
- Lentil soup with whole grain

**🍽️ Dinner:**
- Baked salmon + broccoli
- Stir-fried tofu + veggies
- Lean beef stir-fry
- Chickpea curry + brown rice

**💡 Tips:**
- Control portions
- Include protein in every meal
- Fill half plate with vegetables
- Stay hydrated
- Choose whole foods",
    },
    QuickQuestion {
        label: "💪 Protein Sources",
        question: "What are the best protein sources for muscle building?",
        answer: "**💪 Best Protein Sources:**

**🥩 Animal:**
- Chicken breast
- Salmon
- Eggs
- Greek yogurt
- Lean beef

**🌱 Plant:**
- Tofu
- Lentils
- Chickpeas
- Quinoa
- Almonds

**🎯 Tips:**
- Aim 1.6–2.2g/kg/day (general guideline)
- Spread protein across meals",
    },
    QuickQuestion {
        label: "🔥 Calorie Counting",
        question: "How can I count calories effectively?",
        answer: "**🔥 Calorie Counting Tips:**
1. Track portions (scale helps)
2. Use labels + apps consistently
3. Include cooking oils + drinks
4. Review weekly trends, not daily spikes",
    },
    QuickQuestion {
        label: "🍎 Food Myths",
        question: "What are common nutrition myths I should know?",
        answer: "**🍎 Nutrition Myths Debunked:**
- Carbs don’t automatically make you fat
- Healthy fats are important
- You don’t need detox cleanses
- Total daily intake matters more than meal timing",
    },
    QuickQuestion {
        label: "💧 Hydration Tips",
        question: "How much water should I drink daily and why?",
        answer: "**💧 Hydration Guide:**
- Common target: 2–3L/day (more if active/hot)
- Use urine color as a simple check (pale yellow)
- Hydration supports energy, digestion, and performance",
    },
    QuickQuestion {
        label: "📊 Diet Planning",
        question: "How to create a balanced diet plan?",
        answer: "**📊 Balanced Diet Plan (Plate Method):**
- ½ vegetables
- ¼ protein
- ¼ carbs (prefer whole grains)
- Add healthy fats (nuts/olive oil/avocado)
- Plan weekly + keep it sustainable",
    },
];

/// Canned answer for a question that matches a quick question exactly.
pub fn canned(question: &str) -> Option<&'static str> {
    QUICK_QUESTIONS
        .iter()
        .find(|q| q.question == question)
        .map(|q| q.answer)
}

/// Generic paragraph for anything without a canned answer.
pub fn templated(question: &str, state: RelayState) -> String {
    match state {
        RelayState::Unconfigured => format!(
            "**Nutrition advice about '{question}':**\n\n\
             Gemini is not configured. Add GEMINI_API_KEY to the secret store or environment.\n\n\
             General tips:\n\
             1. Whole foods\n\
             2. Protein + fiber\n\
             3. Portion control\n\
             4. Hydration"
        ),
        RelayState::Ready | RelayState::Degraded => format!(
            "**Nutrition advice about '{question}':**\n\n\
             For personalized advice:\n\
             1. Consult a registered dietitian\n\
             2. Use evidence-based sources\n\
             3. Consider your health conditions\n\
             4. Make sustainable changes"
        ),
    }
}

/// Canned answer when one exists, otherwise the templated paragraph.
pub fn answer_for(question: &str, state: RelayState) -> String {
    canned(question)
        .map(str::to_string)
        .unwrap_or_else(|| templated(question, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_quick_question_has_an_answer() {
        for q in QUICK_QUESTIONS {
            let answer = canned(q.question).expect(q.question);
            assert!(answer.starts_with("**"));
        }
    }

    #[test]
    fn canned_match_is_exact() {
        assert!(canned("give me some healthy meal ideas for weight loss").is_none());
        assert!(canned("How can I count calories effectively? ").is_none());
    }

    #[test]
    fn templated_names_the_question() {
        let text = templated("Is fasting safe?", RelayState::Degraded);
        assert!(text.starts_with("**Nutrition advice about 'Is fasting safe?':**"));
        assert!(text.contains("Consult a registered dietitian"));

        let text = templated("Is fasting safe?", RelayState::Unconfigured);
        assert!(text.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn answer_for_prefers_canned() {
        let q = QUICK_QUESTIONS[2].question;
        assert_eq!(answer_for(q, RelayState::Degraded), QUICK_QUESTIONS[2].answer);
        assert!(answer_for("snacks?", RelayState::Degraded).contains("snacks?"));
    }

    #[test]
    fn quick_questions_serialize_without_answers() {
        let json = serde_json::to_value(QUICK_QUESTIONS[0]).unwrap();
        assert_eq!(json["label"], "🥗 Healthy Meal Ideas");
        assert!(json.get("answer").is_none());
    }
}
