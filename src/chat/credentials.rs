use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

pub const API_KEY_NAME: &str = "GEMINI_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("{0} not found (secret store, environment or setup panel)")]
    NotFound(&'static str),
    #[error("failed to read secret store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed secret store {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Named secret lookup.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<String>, CredentialError>;
}

/// Flat JSON object of secrets on disk, re-read on every lookup so a key
/// added while the service runs is picked up. A missing file holds nothing.
#[derive(Debug, Clone)]
pub struct JsonSecretStore {
    path: PathBuf,
}

impl JsonSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SecretStore for JsonSecretStore {
    async fn get(&self, name: &str) -> Result<Option<String>, CredentialError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CredentialError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let secrets: HashMap<String, serde_json::Value> =
            serde_json::from_str(&raw).map_err(|source| CredentialError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        Ok(secrets
            .get(name)
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }
}

/// Process environment (after `.env` has been loaded).
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecrets;

#[async_trait]
impl SecretStore for EnvSecrets {
    async fn get(&self, name: &str) -> Result<Option<String>, CredentialError> {
        Ok(std::env::var(name).ok())
    }
}

/// In-memory secrets.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StaticSecrets(pub HashMap<String, String>);

#[cfg(test)]
impl StaticSecrets {
    pub fn with(name: &str, value: &str) -> Self {
        Self(HashMap::from([(name.to_string(), value.to_string())]))
    }
}

#[cfg(test)]
#[async_trait]
impl SecretStore for StaticSecrets {
    async fn get(&self, name: &str) -> Result<Option<String>, CredentialError> {
        Ok(self.0.get(name).cloned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    SecretStore,
    Environment,
    Manual,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CredentialSource::SecretStore => "secret store",
            CredentialSource::Environment => "environment",
            CredentialSource::Manual => "setup panel",
        })
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub api_key: String,
    pub source: CredentialSource,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Finds the API key: secret store, then environment, then the value the
/// user pasted into the setup panel.
#[derive(Clone)]
pub struct CredentialResolver {
    store: Arc<dyn SecretStore>,
    env: Arc<dyn SecretStore>,
}

impl CredentialResolver {
    pub fn new(store: Arc<dyn SecretStore>, env: Arc<dyn SecretStore>) -> Self {
        Self { store, env }
    }

    pub async fn resolve(&self, manual: Option<&str>) -> Result<Credential, CredentialError> {
        let mut first_error = None;
        let sources = [
            (CredentialSource::SecretStore, &self.store),
            (CredentialSource::Environment, &self.env),
        ];
        for (source, store) in sources {
            match store.get(API_KEY_NAME).await {
                Ok(Some(key)) if !key.trim().is_empty() => {
                    debug!(%source, "credential discovered");
                    return Ok(Credential {
                        api_key: key.trim().to_string(),
                        source,
                    });
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(%source, error = %e, "credential source unreadable");
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(key) = manual.map(str::trim).filter(|k| !k.is_empty()) {
            debug!(source = %CredentialSource::Manual, "credential discovered");
            return Ok(Credential {
                api_key: key.to_string(),
                source: CredentialSource::Manual,
            });
        }

        Err(first_error.unwrap_or(CredentialError::NotFound(API_KEY_NAME)))
    }
}
