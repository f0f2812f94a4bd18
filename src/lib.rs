//! Realtime voice-interview session management.
//!
//! The crate owns one live interview at a time: it negotiates an ephemeral
//! credential, brings up a peer connection with bidirectional audio, runs the
//! SDP offer/answer exchange against the realtime signaling endpoint, and
//! interprets the control-channel event stream into an ordered transcript
//! with deferred, playback-safe termination.
//!
//! The REST backend, the signaling endpoint, and the peer transport are
//! reached through trait seams ([`CredentialIssuer`], [`SignalingClient`],
//! [`PeerConnector`]), so the session logic stays testable without a live
//! network or audio device.

mod config;
mod consts;
mod credentials;
mod error;
mod session;
mod signaling;
mod transport;

pub use interview_rtc_types as types;

pub use config::{ConfigError, SessionConfig};
pub use consts::END_OF_CONVERSATION_SENTINEL;
pub use credentials::{CredentialError, CredentialIssuer, EphemeralCredential, HttpCredentialIssuer};
pub use error::{FailureKind, NegotiationStep, SessionError, SessionFailure};
pub use session::{InterviewSession, SessionDeps, SessionStatus};
pub use signaling::{HttpSignalingClient, SignalingClient, SignalingError};
pub use transport::{
    AudioOutput, AudioSink, ChannelEvent, ControlChannel, PeerConnection, PeerConnectionState,
    PeerConnector, PeerEvent, PlaybackContext, RemoteAudio, TransportError,
};
