//! Trait seams for the realtime peer transport.
//!
//! The session core never touches a concrete WebRTC stack or audio device;
//! it drives these traits. Implementations surface their asynchronous
//! callbacks (connection-state changes, inbound tracks, channel messages)
//! as ordered mpsc event streams.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::mpsc;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("microphone unavailable: {0}")]
    Microphone(String),

    #[error("control channel closed")]
    ChannelClosed,

    #[error("sdp negotiation failed: {0}")]
    Sdp(String),

    #[error("peer connection failed: {0}")]
    Connection(String),
}

/// Connection states reported by the peer transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerConnectionState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

/// Inbound audio attached by the remote peer. Opaque to the session core;
/// the playback layer decides what to do with it.
#[derive(Debug)]
pub struct RemoteAudio {
    stream_id: String,
}

impl RemoteAudio {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
        }
    }

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }
}

#[derive(Debug)]
pub enum PeerEvent {
    StateChanged(PeerConnectionState),
    RemoteTrack(RemoteAudio),
}

#[derive(Debug)]
pub enum ChannelEvent {
    Open,
    Message(String),
    Error(String),
    Closed,
}

/// Builds one peer connection per negotiation attempt.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait PeerConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn PeerConnection>, TransportError>;
}

/// One live peer connection.
///
/// Implementations must end their event stream once `close` has run, so
/// that pumps draining it terminate.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait PeerConnection: Send {
    /// Opens the data channel carrying the control-event protocol.
    async fn open_control_channel(
        &mut self,
        label: &str,
    ) -> Result<Box<dyn ControlChannel>, TransportError>;

    /// Acquires the local microphone and attaches every track to the
    /// connection.
    async fn attach_microphone(&mut self) -> Result<(), TransportError>;

    /// Creates the local SDP offer and installs it as the local description.
    async fn create_offer(&mut self) -> Result<String, TransportError>;

    async fn set_remote_answer(&mut self, sdp: &str) -> Result<(), TransportError>;

    /// Hands out the connection's event stream. Yields `None` after the
    /// first call.
    fn take_events(&mut self) -> Option<mpsc::Receiver<PeerEvent>>;

    /// Stops local media tracks and closes the connection.
    async fn close(&mut self);
}

/// The control data channel.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait ControlChannel: Send {
    async fn send(&mut self, payload: String) -> Result<(), TransportError>;

    /// Hands out the channel's event stream. Yields `None` after the first
    /// call.
    fn take_events(&mut self) -> Option<mpsc::Receiver<ChannelEvent>>;

    async fn close(&mut self);
}

/// Creates the playback-side handles, lazily, on the first inbound track.
#[cfg_attr(test, automock)]
pub trait AudioOutput: Send + Sync {
    fn create_sink(&self) -> Box<dyn AudioSink>;
    fn create_playback_context(&self) -> Box<dyn PlaybackContext>;
}

/// Plays a remote audio stream.
pub trait AudioSink: Send {
    fn attach(&mut self, audio: RemoteAudio);
    fn close(&mut self);
}

/// The playback audio context backing the sink.
pub trait PlaybackContext: Send {
    fn close(&mut self);
}
