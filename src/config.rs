use secrecy::SecretString;
use std::time::Duration;

use crate::consts;

/// Settings for one interview session's network boundary.
pub struct SessionConfig {
    api_base_url: String,
    signaling_url: String,
    token: SecretString,
    network_timeout: Duration,
}

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
}

pub struct ConfigBuilder {
    config: SessionConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SessionConfig::new(),
        }
    }

    pub fn with_api_base_url(mut self, api_base_url: &str) -> Self {
        self.config.api_base_url = api_base_url.to_string();
        self
    }

    pub fn with_signaling_url(mut self, signaling_url: &str) -> Self {
        self.config.signaling_url = signaling_url.to_string();
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.config.token = SecretString::from(token.to_string());
        self
    }

    pub fn with_network_timeout(mut self, timeout: Duration) -> Self {
        self.config.network_timeout = timeout;
        self
    }

    pub fn build(self) -> SessionConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConfig {
    // Sets the default values.
    pub fn new() -> Self {
        Self {
            api_base_url: String::new(),
            signaling_url: consts::DEFAULT_SIGNALING_URL.to_string(),
            token: SecretString::from(String::new()),
            network_timeout: consts::DEFAULT_NETWORK_TIMEOUT,
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// * `INTERVIEW_API_URL`: base URL of the recruiting backend (required).
    /// * `INTERVIEW_TOKEN`: the caller's bearer token (required).
    /// * `REALTIME_CALLS_URL`: signaling endpoint, defaults to the OpenAI
    ///   realtime calls URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // .env is for local development; absence is fine.
        dotenvy::dotenv().ok();

        let api_base_url = std::env::var(consts::INTERVIEW_API_URL)
            .map_err(|_| ConfigError::MissingVar(consts::INTERVIEW_API_URL.to_string()))?;
        let token = std::env::var(consts::INTERVIEW_TOKEN)
            .map_err(|_| ConfigError::MissingVar(consts::INTERVIEW_TOKEN.to_string()))?;
        let signaling_url = std::env::var(consts::REALTIME_CALLS_URL)
            .unwrap_or_else(|_| consts::DEFAULT_SIGNALING_URL.to_string());

        Ok(Self {
            api_base_url,
            signaling_url,
            token: token.into(),
            network_timeout: consts::DEFAULT_NETWORK_TIMEOUT,
        })
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn signaling_url(&self) -> &str {
        &self.signaling_url
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn network_timeout(&self) -> Duration {
        self.network_timeout
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
