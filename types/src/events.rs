pub mod client;
pub mod server;

use client::*;
use server::*;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    #[serde(rename = "response.create")]
    ResponseCreate(ResponseCreateEvent),
}

impl ClientEvent {
    /// The initial control message sent once the channel opens: ask the
    /// model to respond and transcribe the candidate's audio.
    pub fn response_create_with_transcription() -> Self {
        Self::ResponseCreate(ResponseCreateEvent::with_input_transcription())
    }
}

/// Events received on the control channel, discriminated by `type`.
///
/// `Unknown` absorbs every type the session does not react to, so new
/// server-side event types never break an ongoing interview.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    #[serde(rename = "conversation.item.input_audio_transcription.completed")]
    InputAudioTranscriptionCompleted(InputAudioTranscriptionCompletedEvent),
    #[serde(rename = "response.output_text.done")]
    OutputTextDone(OutputTextDoneEvent),
    #[serde(rename = "response.output_audio_transcript.done")]
    OutputAudioTranscriptDone(OutputAudioTranscriptDoneEvent),
    #[serde(rename = "conversation.item.retrieved")]
    ConversationItemRetrieved(ConversationItemRetrievedEvent),
    #[serde(rename = "output_audio_buffer.stopped")]
    OutputAudioBufferStopped(OutputAudioBufferStoppedEvent),
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_input_transcription_completed() {
        let raw = r#"{
            "type": "conversation.item.input_audio_transcription.completed",
            "event_id": "event_123",
            "transcript": "hello there"
        }"#;
        match serde_json::from_str::<ServerEvent>(raw).unwrap() {
            ServerEvent::InputAudioTranscriptionCompleted(event) => {
                assert_eq!(event.transcript(), "hello there");
                assert_eq!(event.event_id(), Some("event_123"));
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn output_text_done_falls_back_to_delta() {
        let with_text = r#"{"type":"response.output_text.done","text":"final"}"#;
        let with_delta = r#"{"type":"response.output_text.done","delta":"partial"}"#;
        let with_neither = r#"{"type":"response.output_text.done"}"#;

        let parse = |raw: &str| match serde_json::from_str::<ServerEvent>(raw).unwrap() {
            ServerEvent::OutputTextDone(event) => event,
            other => panic!("unexpected variant: {:?}", other),
        };

        assert_eq!(parse(with_text).message(), Some("final"));
        assert_eq!(parse(with_delta).message(), Some("partial"));
        assert_eq!(parse(with_neither).message(), None);
    }

    #[test]
    fn retrieved_item_transcript_is_optional_at_every_level() {
        let full = r#"{
            "type": "conversation.item.retrieved",
            "item": {"id": "item_1", "content": [{"transcript": "from retrieval"}]}
        }"#;
        let empty_content = r#"{"type":"conversation.item.retrieved","item":{"id":"item_2"}}"#;
        let no_item = r#"{"type":"conversation.item.retrieved"}"#;

        let parse = |raw: &str| match serde_json::from_str::<ServerEvent>(raw).unwrap() {
            ServerEvent::ConversationItemRetrieved(event) => event,
            other => panic!("unexpected variant: {:?}", other),
        };

        assert_eq!(parse(full).transcript(), Some("from retrieval"));
        assert_eq!(parse(empty_content).transcript(), None);
        assert_eq!(parse(no_item).transcript(), None);
    }

    #[test]
    fn unrecognized_event_types_map_to_unknown() {
        let raw = r#"{"type":"response.created","response":{"id":"resp_1"}}"#;
        assert!(matches!(
            serde_json::from_str::<ServerEvent>(raw).unwrap(),
            ServerEvent::Unknown
        ));
    }

    #[test]
    fn initial_response_create_wire_shape() {
        let event = ClientEvent::response_create_with_transcription();
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "response.create",
                "response": {
                    "conversation": {
                        "transcribe_input_audio": true
                    }
                }
            })
        );
    }
}
