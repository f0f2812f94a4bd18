/// `response.create` event
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ResponseCreateEvent {
    response: ResponseConfig,
}

impl ResponseCreateEvent {
    pub fn with_input_transcription() -> Self {
        Self {
            response: ResponseConfig {
                conversation: ConversationConfig {
                    transcribe_input_audio: true,
                },
            },
        }
    }

    pub fn response(&self) -> &ResponseConfig {
        &self.response
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ResponseConfig {
    conversation: ConversationConfig,
}

impl ResponseConfig {
    pub fn conversation(&self) -> &ConversationConfig {
        &self.conversation
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ConversationConfig {
    transcribe_input_audio: bool,
}

impl ConversationConfig {
    pub fn transcribe_input_audio(&self) -> bool {
        self.transcribe_input_audio
    }
}
