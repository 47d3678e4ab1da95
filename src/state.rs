use crate::chat::credentials::{CredentialResolver, EnvSecrets, JsonSecretStore, SecretStore};
use crate::chat::gemini::GeminiFactory;
use crate::chat::generator::GeneratorFactory;
use crate::chat::relay::ChatRelay;
use crate::config::AppConfig;
use crate::foods::classifier::Classifier;
use crate::sessions::store::{Session, SessionStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: SessionStore,
    pub classifier: Classifier,
    pub credentials: Arc<CredentialResolver>,
    pub generators: Arc<dyn GeneratorFactory>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = Arc::new(JsonSecretStore::new(config.secrets_path.clone())) as Arc<dyn SecretStore>;
        let credentials = Arc::new(CredentialResolver::new(store, Arc::new(EnvSecrets)));
        let generators =
            Arc::new(GeminiFactory::new(config.gemini.clone())) as Arc<dyn GeneratorFactory>;

        Ok(Self::from_parts(config, credentials, generators))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        credentials: Arc<CredentialResolver>,
        generators: Arc<dyn GeneratorFactory>,
    ) -> Self {
        Self {
            classifier: Classifier::new(config.match_policy),
            sessions: SessionStore::new(config.session_idle_ttl),
            config,
            credentials,
            generators,
        }
    }

    /// Fresh session with its own relay and random generator. Not yet stored.
    pub fn open_session(&self) -> Session {
        let rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let relay = ChatRelay::new(self.credentials.clone(), self.generators.clone());
        Session::new(relay, rng)
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::fake_with(Arc::new(
            crate::chat::generator::fakes::ScriptedFactory::default(),
        ))
    }

    /// Test state with no credentials anywhere and a fixed seed.
    #[cfg(test)]
    pub fn fake_with(generators: Arc<dyn GeneratorFactory>) -> Self {
        use crate::chat::credentials::StaticSecrets;
        use crate::config::GeminiConfig;
        use crate::foods::classifier::MatchPolicy;

        let config = Arc::new(AppConfig {
            gemini: GeminiConfig {
                model: "scripted".into(),
                base_url: "http://fake.local".into(),
            },
            secrets_path: "fake-secrets.json".into(),
            rng_seed: Some(7),
            match_policy: MatchPolicy::LongestKey,
            session_idle_ttl: std::time::Duration::from_secs(60 * 60),
        });
        let credentials = Arc::new(CredentialResolver::new(
            Arc::new(StaticSecrets::default()),
            Arc::new(StaticSecrets::default()),
        ));
        Self::from_parts(config, credentials, generators)
    }
}
