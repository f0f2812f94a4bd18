/// `conversation.item.input_audio_transcription.completed` event
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InputAudioTranscriptionCompletedEvent {
    #[serde(default)]
    event_id: Option<String>,

    /// What the candidate said, as transcribed from the input audio.
    transcript: String,
}

impl InputAudioTranscriptionCompletedEvent {
    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }
}

/// `response.output_text.done` event
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OutputTextDoneEvent {
    #[serde(default)]
    event_id: Option<String>,

    /// The final text, when the server sends it in one piece.
    #[serde(default)]
    text: Option<String>,

    /// Some server versions carry the text in `delta` instead.
    #[serde(default)]
    delta: Option<String>,
}

impl OutputTextDoneEvent {
    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    /// Prefers `text`, falling back to `delta`.
    pub fn message(&self) -> Option<&str> {
        self.text.as_deref().or(self.delta.as_deref())
    }
}

/// `response.output_audio_transcript.done` event
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OutputAudioTranscriptDoneEvent {
    #[serde(default)]
    event_id: Option<String>,

    /// Transcript of the audio the assistant just spoke.
    transcript: String,
}

impl OutputAudioTranscriptDoneEvent {
    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }
}

/// `conversation.item.retrieved` event
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ConversationItemRetrievedEvent {
    #[serde(default)]
    event_id: Option<String>,

    #[serde(default)]
    item: Option<RetrievedItem>,
}

impl ConversationItemRetrievedEvent {
    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    /// Transcript of the retrieved item's first content part, when present.
    pub fn transcript(&self) -> Option<&str> {
        self.item
            .as_ref()?
            .content
            .first()?
            .transcript
            .as_deref()
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RetrievedItem {
    #[serde(default)]
    id: Option<String>,

    #[serde(default)]
    content: Vec<RetrievedContentPart>,
}

impl RetrievedItem {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn content(&self) -> &[RetrievedContentPart] {
        &self.content
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RetrievedContentPart {
    #[serde(default)]
    transcript: Option<String>,
}

impl RetrievedContentPart {
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }
}

/// `output_audio_buffer.stopped` event
///
/// Signals that remote audio playback has drained. This is the safe moment
/// to end a session whose termination was requested mid-response.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OutputAudioBufferStoppedEvent {
    #[serde(default)]
    event_id: Option<String>,

    #[serde(default)]
    response_id: Option<String>,
}

impl OutputAudioBufferStoppedEvent {
    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    pub fn response_id(&self) -> Option<&str> {
        self.response_id.as_deref()
    }
}
