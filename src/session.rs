use std::sync::Arc;

use interview_rtc_types::{ClientEvent, Role, ServerEvent, TranscriptEntry};
use tokio::sync::{mpsc, Mutex};

use crate::config::SessionConfig;
use crate::consts;
use crate::credentials::{CredentialIssuer, EphemeralCredential, HttpCredentialIssuer};
use crate::error::{FailureKind, NegotiationStep, SessionError, SessionFailure};
use crate::signaling::{HttpSignalingClient, SignalingClient};
use crate::transport::{
    AudioOutput, AudioSink, ChannelEvent, ControlChannel, PeerConnection, PeerConnectionState,
    PeerConnector, PeerEvent, PlaybackContext,
};

mod state;

pub use state::SessionStatus;
use state::{transition, StateEvent};

/// The session's collaborators, injected so tests can run the whole
/// negotiation against mocks.
pub struct SessionDeps {
    pub credentials: Box<dyn CredentialIssuer>,
    pub signaling: Box<dyn SignalingClient>,
    pub connector: Box<dyn PeerConnector>,
    pub audio: Box<dyn AudioOutput>,
}

impl SessionDeps {
    /// Production wiring: HTTP credential issuer and signaling client built
    /// from the config, plus caller-provided transport and audio factories.
    pub fn over_http(
        config: &SessionConfig,
        connector: Box<dyn PeerConnector>,
        audio: Box<dyn AudioOutput>,
    ) -> Self {
        Self {
            credentials: Box::new(HttpCredentialIssuer::new(config)),
            signaling: Box::new(HttpSignalingClient::new(config)),
            connector,
            audio,
        }
    }
}

/// Everything one live session owns. All mutation happens under the lock;
/// the four transport handles are either installed together or not at all.
#[derive(Default)]
struct Inner {
    status: SessionStatus,
    /// Monotonically increasing negotiation token. Bumped by every
    /// `start_interview` and `stop_interview`; async continuations re-check
    /// it before touching state, so a stale negotiation can never resurrect
    /// handles after teardown.
    attempt: u64,
    transcripts: Vec<TranscriptEntry>,
    last_transcript: String,
    is_speaking: bool,
    is_listening: bool,
    /// Set when the assistant's transcript carries the end-of-conversation
    /// sentinel; acted on only once playback has drained.
    should_end: bool,
    failure: Option<SessionFailure>,
    peer: Option<Box<dyn PeerConnection>>,
    channel: Option<Box<dyn ControlChannel>>,
    sink: Option<Box<dyn AudioSink>>,
    playback: Option<Box<dyn PlaybackContext>>,
}

impl Inner {
    fn push_transcript(&mut self, role: Role, message: String) {
        self.last_transcript = message.clone();
        self.transcripts.push(TranscriptEntry::new(role, message));
    }
}

/// A cloneable handle to one voice-interview session.
///
/// At most one non-idle session exists per handle: `start_interview` is
/// rejected while a negotiation or call is active, and `stop_interview`
/// converges every state back to idle.
#[derive(Clone)]
pub struct InterviewSession {
    inner: Arc<Mutex<Inner>>,
    deps: Arc<SessionDeps>,
    config: Arc<SessionConfig>,
}

impl InterviewSession {
    pub fn new(config: SessionConfig, deps: SessionDeps) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            deps: Arc::new(deps),
            config: Arc::new(config),
        }
    }

    /// Negotiates a new interview session scoped to `application_id`.
    ///
    /// On success the session is `connected` with an open control channel.
    /// On failure the session is left in `error` with a structured
    /// [`SessionFailure`], and every handle created along the way has been
    /// closed.
    pub async fn start_interview(&self, application_id: i64) -> Result<(), SessionError> {
        let attempt = {
            let mut inner = self.inner.lock().await;
            if !matches!(inner.status, SessionStatus::Idle | SessionStatus::Error) {
                return Err(SessionError::AlreadyActive);
            }
            inner.attempt += 1;
            inner.status = transition(inner.status, StateEvent::Start);
            inner.transcripts.clear();
            inner.last_transcript.clear();
            inner.is_speaking = false;
            inner.is_listening = false;
            inner.should_end = false;
            inner.failure = None;
            inner.attempt
        };
        tracing::info!(application_id, "starting interview");

        match self.negotiate(attempt, application_id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                if !matches!(err, SessionError::Superseded) {
                    let mut inner = self.inner.lock().await;
                    if inner.attempt == attempt {
                        inner.status = transition(inner.status, StateEvent::Failure);
                        inner.failure = Some(SessionFailure::from(&err));
                    }
                }
                tracing::error!(error = %err, "interview negotiation failed");
                Err(err)
            }
        }
    }

    /// Tears the session down: closes the control channel, stops local
    /// media, closes the peer connection and playback handles, and resets
    /// state to idle. Idempotent; safe from any state.
    pub async fn stop_interview(&self) {
        let (channel, peer, sink, playback) = {
            let mut inner = self.inner.lock().await;
            // Invalidate any in-flight negotiation or pump for this session.
            inner.attempt += 1;
            inner.is_speaking = false;
            inner.is_listening = false;
            inner.should_end = false;
            inner.status = transition(inner.status, StateEvent::Stop);
            (
                inner.channel.take(),
                inner.peer.take(),
                inner.sink.take(),
                inner.playback.take(),
            )
        };

        if let Some(mut channel) = channel {
            channel.close().await;
        }
        if let Some(mut peer) = peer {
            peer.close().await;
        }
        if let Some(mut sink) = sink {
            sink.close();
        }
        if let Some(mut playback) = playback {
            playback.close();
        }
        tracing::debug!("interview session stopped");
    }

    pub async fn status(&self) -> SessionStatus {
        self.inner.lock().await.status
    }

    /// The most recent single utterance. Secondary to [`transcripts`].
    ///
    /// [`transcripts`]: InterviewSession::transcripts
    pub async fn transcript(&self) -> String {
        self.inner.lock().await.last_transcript.clone()
    }

    /// The ordered transcript of the current session.
    pub async fn transcripts(&self) -> Vec<TranscriptEntry> {
        self.inner.lock().await.transcripts.clone()
    }

    pub async fn is_speaking(&self) -> bool {
        self.inner.lock().await.is_speaking
    }

    pub async fn is_listening(&self) -> bool {
        self.inner.lock().await.is_listening
    }

    /// Details of the failure that put the session in `error`, if any.
    pub async fn failure(&self) -> Option<SessionFailure> {
        self.inner.lock().await.failure.clone()
    }

    async fn negotiate(&self, attempt: u64, application_id: i64) -> Result<(), SessionError> {
        let timeout = self.config.network_timeout();

        let credential = tokio::time::timeout(
            timeout,
            self.deps.credentials.issue(application_id),
        )
        .await
        .map_err(|_| SessionError::Timeout {
            step: NegotiationStep::Credential,
            timeout,
        })?
        .map_err(SessionError::Credential)?;

        let mut peer = self
            .deps
            .connector
            .connect()
            .await
            .map_err(SessionError::Transport)?;

        let mut channel = match self.handshake(peer.as_mut(), &credential).await {
            Ok(channel) => channel,
            Err(err) => {
                peer.close().await;
                return Err(err);
            }
        };

        let peer_events = peer.take_events();
        let channel_events = channel.take_events();

        let mut inner = self.inner.lock().await;
        if inner.attempt != attempt {
            drop(inner);
            // A stop or a newer start won the race; this result is stale.
            channel.close().await;
            peer.close().await;
            return Err(SessionError::Superseded);
        }

        inner.peer = Some(peer);
        inner.channel = Some(channel);
        inner.status = transition(inner.status, StateEvent::HandshakeComplete);
        drop(inner);

        // Pumps exit on their own when the transport ends its streams or
        // when the attempt token moves on.
        if let Some(events) = channel_events {
            tokio::spawn(self.clone().pump_channel(attempt, events));
        }
        if let Some(events) = peer_events {
            tokio::spawn(self.clone().pump_peer(attempt, events));
        }

        tracing::info!("interview session connected");
        Ok(())
    }

    /// Control channel, microphone, offer/answer. Returns the channel so the
    /// caller installs both handles atomically; closes it on any failure.
    async fn handshake(
        &self,
        peer: &mut dyn PeerConnection,
        credential: &EphemeralCredential,
    ) -> Result<Box<dyn ControlChannel>, SessionError> {
        let timeout = self.config.network_timeout();

        let mut channel = peer
            .open_control_channel(consts::CONTROL_CHANNEL_LABEL)
            .await
            .map_err(SessionError::Transport)?;

        let result = async {
            peer.attach_microphone().await.map_err(SessionError::Media)?;
            let offer = peer.create_offer().await.map_err(SessionError::Transport)?;
            let answer = tokio::time::timeout(
                timeout,
                self.deps.signaling.exchange(&offer, credential),
            )
            .await
            .map_err(|_| SessionError::Timeout {
                step: NegotiationStep::Signaling,
                timeout,
            })?
            .map_err(SessionError::Signaling)?;
            peer.set_remote_answer(&answer)
                .await
                .map_err(SessionError::Transport)
        }
        .await;

        match result {
            Ok(()) => Ok(channel),
            Err(err) => {
                channel.close().await;
                Err(err)
            }
        }
    }

    /// Classifies every message received on the control channel; the single
    /// place where inbound protocol semantics live. Malformed payloads are
    /// logged and dropped; they never affect session state. The attempt
    /// token is re-checked under the same lock as the mutation, so a message
    /// buffered before a stop cannot touch a torn-down session.
    pub(crate) async fn handle_server_event(&self, attempt: u64, raw: &str) {
        let event = match serde_json::from_str::<ServerEvent>(raw) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error = %err, raw, "dropping malformed control-channel event");
                return;
            }
        };

        let should_stop = {
            let mut inner = self.inner.lock().await;
            if inner.attempt != attempt {
                tracing::debug!("dropping control-channel event from a stale session");
                return;
            }
            match event {
                ServerEvent::InputAudioTranscriptionCompleted(event) => {
                    inner.push_transcript(Role::User, event.transcript().to_string());
                    inner.is_listening = false;
                    false
                }
                ServerEvent::OutputTextDone(event) => {
                    match event.message() {
                        Some(text) => inner.push_transcript(Role::Assistant, text.to_string()),
                        None => tracing::debug!("output_text.done carried neither text nor delta"),
                    }
                    inner.is_speaking = false;
                    false
                }
                ServerEvent::OutputAudioTranscriptDone(event) => {
                    let transcript = event.transcript();
                    if transcript.contains(consts::END_OF_CONVERSATION_SENTINEL) {
                        // Do not end here: the final audio is still playing.
                        tracing::info!("assistant requested end of conversation");
                        inner.should_end = true;
                    }
                    inner.push_transcript(Role::Assistant, transcript.to_string());
                    inner.is_speaking = false;
                    false
                }
                ServerEvent::ConversationItemRetrieved(event) => {
                    if let Some(transcript) = event.transcript() {
                        inner.push_transcript(Role::User, transcript.to_string());
                        inner.is_listening = false;
                    }
                    false
                }
                ServerEvent::OutputAudioBufferStopped(_) => {
                    tracing::debug!("output audio buffer stopped");
                    let stop = inner.should_end;
                    inner.should_end = false;
                    stop
                }
                ServerEvent::Unknown => false,
            }
        };

        if should_stop {
            tracing::info!("final audio drained, ending interview");
            self.stop_interview().await;
        }
    }

    async fn send_client_event(&self, event: ClientEvent) -> Result<(), SessionError> {
        let payload = serde_json::to_string(&event)?;
        let mut inner = self.inner.lock().await;
        match inner.channel.as_mut() {
            Some(channel) => channel
                .send(payload)
                .await
                .map_err(SessionError::Transport),
            None => Err(SessionError::NotConnected),
        }
    }

    async fn current_attempt(&self) -> u64 {
        self.inner.lock().await.attempt
    }

    async fn pump_channel(self, attempt: u64, mut events: mpsc::Receiver<ChannelEvent>) {
        while let Some(event) = events.recv().await {
            if self.current_attempt().await != attempt {
                break;
            }
            match event {
                ChannelEvent::Open => {
                    tracing::debug!("control channel open, requesting first response");
                    let event = ClientEvent::response_create_with_transcription();
                    if let Err(err) = self.send_client_event(event).await {
                        tracing::warn!(error = %err, "failed to send initial response.create");
                    }
                }
                ChannelEvent::Message(raw) => self.handle_server_event(attempt, &raw).await,
                ChannelEvent::Error(message) => {
                    tracing::warn!(%message, "control channel error");
                }
                ChannelEvent::Closed => {
                    tracing::debug!("control channel closed");
                    break;
                }
            }
        }
    }

    async fn pump_peer(self, attempt: u64, mut events: mpsc::Receiver<PeerEvent>) {
        while let Some(event) = events.recv().await {
            match event {
                PeerEvent::StateChanged(state) => {
                    tracing::debug!(?state, "peer connection state changed");
                    if state == PeerConnectionState::Failed {
                        let mut inner = self.inner.lock().await;
                        if inner.attempt != attempt {
                            break;
                        }
                        // Suppressed by the transition table once connected.
                        let next = transition(inner.status, StateEvent::Failure);
                        if next == SessionStatus::Error && inner.status != SessionStatus::Error {
                            inner.failure = Some(SessionFailure::new(
                                FailureKind::Transport,
                                "peer connection failed",
                            ));
                        }
                        inner.status = next;
                    }
                }
                PeerEvent::RemoteTrack(audio) => {
                    let mut inner = self.inner.lock().await;
                    if inner.attempt != attempt {
                        break;
                    }
                    tracing::debug!(stream_id = audio.stream_id(), "remote audio track attached");
                    // Playback handles are created lazily, on the first track.
                    if inner.playback.is_none() {
                        inner.playback = Some(self.deps.audio.create_playback_context());
                    }
                    if inner.sink.is_none() {
                        inner.sink = Some(self.deps.audio.create_sink());
                    }
                    if let Some(sink) = inner.sink.as_mut() {
                        sink.attach(audio);
                    }
                }
            }
        }
    }
}
