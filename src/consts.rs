use std::time::Duration;

pub const INTERVIEW_API_URL: &str = "INTERVIEW_API_URL";
pub const INTERVIEW_TOKEN: &str = "INTERVIEW_TOKEN";
pub const REALTIME_CALLS_URL: &str = "REALTIME_CALLS_URL";

pub const DEFAULT_SIGNALING_URL: &str = "https://api.openai.com/v1/realtime/calls";

/// Label of the data channel carrying the event protocol.
pub const CONTROL_CHANNEL_LABEL: &str = "oai-events";

/// Token the assistant embeds in its final audio transcript to request that
/// the session end once playback drains.
pub const END_OF_CONVERSATION_SENTINEL: &str = "<end_of_conversation>";

pub const DEFAULT_NETWORK_TIMEOUT: Duration = Duration::from_secs(10);
