use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use super::credentials::CredentialResolver;
use super::generator::{Generator, GeneratorFactory, Turn};

/// Prefix of every text the relay produces instead of a model reply.
pub const WARNING_MARKER: &str = "⚠️";

pub const UNAVAILABLE_WARNING: &str =
    "⚠️ Gemini AI not available. Please add GEMINI_API_KEY to the secret store, the environment or the setup panel.";
pub const EMPTY_WARNING: &str = "⚠️ Gemini returned an empty reply. Try again.";
pub const FAILED_WARNING: &str = "⚠️ Gemini AI failed. Using fallback responses.";

pub const SYSTEM_PROMPT: &str = "You are BiteBot AI Nutritionist, an expert nutritionist and health coach.
Guidelines:
1. Be friendly, supportive, and non-judgmental
2. Provide evidence-based nutrition information
3. Give practical, actionable advice
4. Consider cultural food preferences
5. Use markdown formatting for readability
6. Include emojis where appropriate
7. Be honest about limitations
";

pub fn is_warning(text: &str) -> bool {
    text.starts_with(WARNING_MARKER)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayState {
    /// No client yet; the next call retries credential discovery.
    Unconfigured,
    /// Client built and the last call (if any) succeeded.
    Ready,
    /// Client built but the last call failed.
    Degraded,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelayStatus {
    pub state: RelayState,
    pub model: String,
    pub last_error: Option<String>,
    pub conversation_active: bool,
    pub manual_key_set: bool,
}

/// Per-session bridge to the generative service.
pub struct ChatRelay {
    state: RelayState,
    credentials: Arc<CredentialResolver>,
    factory: Arc<dyn GeneratorFactory>,
    generator: Option<Arc<dyn Generator>>,
    transcript: Option<Vec<Turn>>,
    manual_key: Option<String>,
    last_error: Option<String>,
}

impl ChatRelay {
    pub fn new(credentials: Arc<CredentialResolver>, factory: Arc<dyn GeneratorFactory>) -> Self {
        Self {
            state: RelayState::Unconfigured,
            credentials,
            factory,
            generator: None,
            transcript: None,
            manual_key: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn status(&self) -> RelayStatus {
        RelayStatus {
            state: self.state,
            model: self.factory.model().to_string(),
            last_error: self.last_error.clone(),
            conversation_active: self.transcript.is_some(),
            manual_key_set: self.manual_key.is_some(),
        }
    }

    /// Stores the key pasted into the setup panel. Unless a client is
    /// already working, the next call rediscovers credentials.
    pub fn set_manual_key(&mut self, key: &str) {
        let key = key.trim();
        self.manual_key = (!key.is_empty()).then(|| key.to_string());
        if self.state != RelayState::Ready {
            self.state = RelayState::Unconfigured;
            self.generator = None;
            self.last_error = None;
        }
    }

    /// Drops the running conversation; the next call starts a new one.
    pub fn reset_conversation(&mut self) {
        self.transcript = None;
    }

    async fn configure(&mut self) -> Result<Arc<dyn Generator>, String> {
        let credential = self
            .credentials
            .resolve(self.manual_key.as_deref())
            .await
            .map_err(|e| e.to_string())?;
        let generator = self
            .factory
            .build(&credential.api_key)
            .map_err(|e| e.to_string())?;
        info!(source = %credential.source, model = self.factory.model(), "chat relay configured");
        self.generator = Some(generator.clone());
        self.state = RelayState::Ready;
        self.last_error = None;
        Ok(generator)
    }

    fn discard_pending_turn(&mut self) {
        if let Some(transcript) = self.transcript.as_mut() {
            transcript.pop();
        }
    }

    /// Sends `message` with the running conversation. Anything other than a
    /// model reply comes back prefixed with [`WARNING_MARKER`].
    pub async fn chat(&mut self, message: &str) -> String {
        let generator = match (self.state, self.generator.clone()) {
            (RelayState::Unconfigured, _) | (_, None) => match self.configure().await {
                Ok(generator) => generator,
                Err(e) => {
                    warn!(error = %e, "chat relay not configured");
                    self.state = RelayState::Unconfigured;
                    self.last_error = Some(e);
                    return UNAVAILABLE_WARNING.to_string();
                }
            },
            (_, Some(generator)) => generator,
        };

        let transcript = self
            .transcript
            .get_or_insert_with(|| vec![Turn::system(SYSTEM_PROMPT)]);
        transcript.push(Turn::user(message));
        let outcome = generator.generate(transcript.as_slice()).await;

        match outcome {
            Ok(reply) => {
                let reply = reply.trim();
                if reply.is_empty() {
                    warn!("generative service returned an empty reply");
                    self.discard_pending_turn();
                    return EMPTY_WARNING.to_string();
                }
                if let Some(transcript) = self.transcript.as_mut() {
                    transcript.push(Turn::model(reply));
                }
                self.state = RelayState::Ready;
                self.last_error = None;
                reply.to_string()
            }
            Err(e) => {
                error!(error = %e, "generative service call failed");
                self.discard_pending_turn();
                self.state = RelayState::Degraded;
                self.last_error = Some(e.to_string());
                FAILED_WARNING.to_string()
            }
        }
    }
}
