use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Model,
}

/// One message of the running conversation sent to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn system(text: impl Into<String>) -> Self {
        Self { role: Role::System, text: text.into() }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Role::Model, text: text.into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("request to generative service failed: {0}")]
    Transport(String),
    #[error("generative service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode generative service response: {0}")]
    Decode(String),
    #[error("failed to build generative client: {0}")]
    Client(String),
}

/// Turns a transcript into the next reply.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, transcript: &[Turn]) -> Result<String, GenerateError>;
}

/// Builds a [`Generator`] once a credential is known.
pub trait GeneratorFactory: Send + Sync {
    fn model(&self) -> &str;
    fn build(&self, api_key: &str) -> Result<Arc<dyn Generator>, GenerateError>;
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays queued outcomes and remembers every transcript it was given.
    #[derive(Default)]
    pub struct ScriptedGenerator {
        replies: Mutex<VecDeque<Result<String, GenerateError>>>,
        seen: Mutex<Vec<Vec<Turn>>>,
    }

    impl ScriptedGenerator {
        pub fn push_reply(&self, text: &str) {
            self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        }

        pub fn push_error(&self, err: GenerateError) {
            self.replies.lock().unwrap().push_back(Err(err));
        }

        pub fn transcripts(&self) -> Vec<Vec<Turn>> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Generator for ScriptedGenerator {
        async fn generate(&self, transcript: &[Turn]) -> Result<String, GenerateError> {
            self.seen.lock().unwrap().push(transcript.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GenerateError::Transport("script exhausted".into())))
        }
    }

    /// Hands out the same scripted generator for any key.
    #[derive(Default)]
    pub struct ScriptedFactory {
        pub generator: Arc<ScriptedGenerator>,
        pub keys: Mutex<Vec<String>>,
        pub fail_build: bool,
    }

    impl GeneratorFactory for ScriptedFactory {
        fn model(&self) -> &str {
            "scripted"
        }

        fn build(&self, api_key: &str) -> Result<Arc<dyn Generator>, GenerateError> {
            if self.fail_build {
                return Err(GenerateError::Client("scripted build failure".into()));
            }
            self.keys.lock().unwrap().push(api_key.to_string());
            Ok(self.generator.clone())
        }
    }
}
