/// Speaker attribution for a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One utterance in the interview transcript, attributed to a speaker.
///
/// Entries are append-only and ordered by control-channel arrival; the
/// session never reorders or deduplicates them.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TranscriptEntry {
    role: Role,
    message: String,
}

impl TranscriptEntry {
    pub fn new(role: Role, message: impl Into<String>) -> Self {
        Self {
            role,
            message: message.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
