use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use secrecy::ExposeSecret;

use crate::config::SessionConfig;
use crate::credentials::EphemeralCredential;

#[derive(Debug, thiserror::Error)]
pub enum SignalingError {
    #[error("signaling request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("signaling endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("signaling endpoint returned an invalid SDP answer")]
    InvalidAnswer,
}

/// Exchanges a local SDP offer for the remote answer, authenticated with an
/// ephemeral credential.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait SignalingClient: Send + Sync {
    async fn exchange(
        &self,
        offer_sdp: &str,
        credential: &EphemeralCredential,
    ) -> Result<String, SignalingError>;
}

/// POSTs the offer SDP to the realtime calls endpoint as `application/sdp`
/// and returns the answer SDP from the response body.
pub struct HttpSignalingClient {
    http: reqwest::Client,
    url: String,
}

impl HttpSignalingClient {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: config.signaling_url().to_string(),
        }
    }
}

#[async_trait]
impl SignalingClient for HttpSignalingClient {
    async fn exchange(
        &self,
        offer_sdp: &str,
        credential: &EphemeralCredential,
    ) -> Result<String, SignalingError> {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(credential.secret().expose_secret())
            .header(reqwest::header::CONTENT_TYPE, "application/sdp")
            .body(offer_sdp.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SignalingError::Status(status));
        }

        // The endpoint answers plain text; validate before trusting it as SDP.
        let answer = response.text().await?;
        if !answer.trim_start().starts_with("v=") {
            return Err(SignalingError::InvalidAnswer);
        }
        tracing::debug!(bytes = answer.len(), "received SDP answer");
        Ok(answer)
    }
}
