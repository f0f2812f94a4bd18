use std::fmt;
use std::time::Duration;

use crate::credentials::CredentialError;
use crate::signaling::SignalingError;
use crate::transport::TransportError;

/// Failures surfaced by `start_interview` and the event pumps.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("an interview session is already active")]
    AlreadyActive,

    #[error("credential acquisition failed: {0}")]
    Credential(#[source] CredentialError),

    #[error("microphone acquisition failed: {0}")]
    Media(#[source] TransportError),

    #[error("signaling exchange failed: {0}")]
    Signaling(#[source] SignalingError),

    #[error("peer transport failure: {0}")]
    Transport(#[source] TransportError),

    #[error("{step} timed out after {timeout:?}")]
    Timeout {
        step: NegotiationStep,
        timeout: Duration,
    },

    #[error("failed to encode control-channel event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("control channel is not open")]
    NotConnected,

    #[error("negotiation superseded by stop or a newer attempt")]
    Superseded,
}

/// Network steps of the negotiation that run under a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationStep {
    Credential,
    Signaling,
}

impl fmt::Display for NegotiationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegotiationStep::Credential => write!(f, "credential fetch"),
            NegotiationStep::Signaling => write!(f, "signaling exchange"),
        }
    }
}

/// Coarse classification of a session failure, for UI consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Credential,
    Media,
    Signaling,
    Transport,
    Timeout,
}

/// Structured payload carried alongside the `error` state, so callers can
/// tell a credential failure from a media or signaling one.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionFailure {
    kind: FailureKind,
    message: String,
}

impl SessionFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&SessionError> for SessionFailure {
    fn from(err: &SessionError) -> Self {
        let kind = match err {
            SessionError::Credential(_) => FailureKind::Credential,
            SessionError::Media(_) => FailureKind::Media,
            SessionError::Signaling(_) => FailureKind::Signaling,
            SessionError::Timeout { .. } => FailureKind::Timeout,
            _ => FailureKind::Transport,
        };
        Self::new(kind, err.to_string())
    }
}
