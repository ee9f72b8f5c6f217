//! STT transcript-format interop for recast
//!
//! Converts whisper-style word-timestamped transcripts into the
//! Amazon-Transcribe-shaped JSON documents that downstream segment
//! editors consume.

pub mod convert;
pub mod error;
pub mod types;

pub use convert::whisper_to_stt;
pub use error::SttError;
pub use types::{SttAlternative, SttDocument, SttItem, SttItemKind, SttResults, SttTranscript};

// Re-export types from recast-core
pub use recast_core::{Transcript, Word};
