pub mod events;
mod transcript;

pub use events::{ClientEvent, ServerEvent};
pub use transcript::{Role, TranscriptEntry};
