use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use secrecy::{ExposeSecret, SecretString};

use crate::config::SessionConfig;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credential request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("credential issuer returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("credential response was malformed: {0}")]
    Malformed(#[source] reqwest::Error),
}

/// Short-lived secret minted by the backend, used as the bearer credential
/// for the signaling exchange. Scoped to one application's interview.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct EphemeralCredential {
    value: SecretString,

    #[serde(default)]
    expires_at: Option<i64>,
}

impl EphemeralCredential {
    pub fn new(value: &str) -> Self {
        Self {
            value: SecretString::from(value.to_string()),
            expires_at: None,
        }
    }

    pub fn secret(&self) -> &SecretString {
        &self.value
    }

    pub fn expires_at(&self) -> Option<i64> {
        self.expires_at
    }
}

/// Issues ephemeral interview credentials. Failure here is fatal to the
/// current negotiation attempt.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait CredentialIssuer: Send + Sync {
    async fn issue(&self, application_id: i64) -> Result<EphemeralCredential, CredentialError>;
}

/// Fetches credentials from the recruiting backend's
/// `GET /interview/session` endpoint, bearer-authenticated with the caller's
/// session token.
pub struct HttpCredentialIssuer {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl HttpCredentialIssuer {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            token: config.token().clone(),
        }
    }
}

#[async_trait]
impl CredentialIssuer for HttpCredentialIssuer {
    async fn issue(&self, application_id: i64) -> Result<EphemeralCredential, CredentialError> {
        let url = format!("{}/interview/session", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("application_id", application_id)])
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CredentialError::Status(status));
        }

        let credential = response
            .json::<EphemeralCredential>()
            .await
            .map_err(CredentialError::Malformed)?;
        tracing::debug!(application_id, "ephemeral credential issued");
        Ok(credential)
    }
}
