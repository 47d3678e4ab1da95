use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::chat::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::foods::classifier::MatchPolicy;

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub secrets_path: PathBuf,
    /// Fixed seed for every session's random generator; entropy when unset.
    pub rng_seed: Option<u64>,
    pub match_policy: MatchPolicy,
    /// Sessions untouched for this long are dropped.
    pub session_idle_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let gemini = GeminiConfig {
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            base_url: std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
        };
        let secrets_path = std::env::var("BITEBOT_SECRETS_PATH")
            .unwrap_or_else(|_| "secrets.json".into())
            .into();
        let rng_seed = std::env::var("BITEBOT_RNG_SEED")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());
        let match_policy = match std::env::var("CLASSIFIER_MATCH") {
            Ok(v) => v.parse().context("CLASSIFIER_MATCH")?,
            Err(_) => MatchPolicy::default(),
        };
        let session_idle_ttl = Duration::from_secs(
            std::env::var("SESSION_IDLE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60 * 60),
        );
        Ok(Self {
            gemini,
            secrets_path,
            rng_seed,
            match_policy,
            session_idle_ttl,
        })
    }
}
