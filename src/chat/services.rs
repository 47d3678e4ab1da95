use serde::Serialize;
use tracing::info;

use super::fallback;
use super::relay::{is_warning, ChatRelay, RelayState};
use crate::sessions::store::Session;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub text: String,
    /// True when the text is a canned or templated fallback.
    pub fallback: bool,
    pub state: RelayState,
}

/// Asks the relay and swaps any warning for the matching fallback.
pub async fn answer(relay: &mut ChatRelay, question: &str) -> Answer {
    let reply = relay.chat(question).await;
    let state = relay.state();
    if !is_warning(&reply) {
        return Answer {
            text: reply,
            fallback: false,
            state,
        };
    }
    info!(%reply, state = ?state, "using fallback answer");
    Answer {
        text: fallback::answer_for(question, state),
        fallback: true,
        state,
    }
}

/// Answers a question and records the exchange in the session log.
pub async fn ask(session: &mut Session, question: &str) -> Answer {
    let answer = answer(&mut session.relay, question).await;
    session.log.record_chat(question, &answer.text);
    answer
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::chat::fallback::QUICK_QUESTIONS;
    use crate::chat::generator::fakes::ScriptedFactory;
    use crate::chat::generator::GenerateError;
    use crate::chat::relay::tests::resolver;
    use crate::sessions::log::Sender;
    use crate::state::AppState;

    #[tokio::test]
    async fn unconfigured_quick_question_gets_canned_answer() {
        let mut relay = ChatRelay::new(resolver(None), Arc::new(ScriptedFactory::default()));
        let question = "Give me some healthy meal ideas for weight loss";
        let answer = answer(&mut relay, question).await;
        assert!(answer.fallback);
        assert_eq!(answer.state, RelayState::Unconfigured);
        assert_eq!(Some(answer.text.as_str()), fallback::canned(question));
        assert!(answer.text.starts_with("**🥗 Healthy Meal Ideas for Weight Loss:**"));
    }

    #[tokio::test]
    async fn unconfigured_free_question_gets_template() {
        let mut relay = ChatRelay::new(resolver(None), Arc::new(ScriptedFactory::default()));
        let answer = answer(&mut relay, "Good snacks for weight loss?").await;
        assert!(answer.fallback);
        assert_eq!(
            answer.text,
            fallback::templated("Good snacks for weight loss?", RelayState::Unconfigured)
        );
    }

    #[tokio::test]
    async fn degraded_relay_falls_back() {
        let factory = Arc::new(ScriptedFactory::default());
        factory
            .generator
            .push_error(GenerateError::Transport("connection reset".into()));
        factory
            .generator
            .push_error(GenerateError::Transport("connection reset".into()));
        let mut relay = ChatRelay::new(resolver(Some("k")), factory);

        let quick = QUICK_QUESTIONS[4].question;
        let answer1 = answer(&mut relay, quick).await;
        assert_eq!(answer1.state, RelayState::Degraded);
        assert_eq!(Some(answer1.text.as_str()), fallback::canned(quick));

        let answer2 = answer(&mut relay, "Is intermittent fasting safe?").await;
        assert!(answer2.text.contains("Consult a registered dietitian"));
    }

    #[tokio::test]
    async fn model_reply_passes_through() {
        let factory = Arc::new(ScriptedFactory::default());
        factory.generator.push_reply("Drink water.");
        let mut relay = ChatRelay::new(resolver(Some("k")), factory);

        let answer = answer(&mut relay, QUICK_QUESTIONS[4].question).await;
        assert!(!answer.fallback);
        assert_eq!(answer.text, "Drink water.");
        assert_eq!(answer.state, RelayState::Ready);
    }

    #[tokio::test]
    async fn ask_records_question_and_answer() {
        let state = AppState::fake();
        let mut session = state.open_session();
        let answer = ask(&mut session, "Is rice ok?").await;

        let turns = session.log.ai_chat();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].sender, Sender::User);
        assert_eq!(turns[0].text, "Is rice ok?");
        assert_eq!(turns[1].text, answer.text);
    }
}
