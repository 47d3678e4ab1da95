use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Deserialize)]
pub struct CredentialRequest {
    pub api_key: String,
}
