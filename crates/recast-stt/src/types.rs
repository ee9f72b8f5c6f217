//! STT JSON document types
//!
//! Models the Amazon-Transcribe-compatible document shape expected by
//! segment-editor frontends: camelCase envelope keys, snake_case item
//! keys, and stringly-typed timestamps/confidences.

use serde::{Deserialize, Serialize};

use crate::error::SttError;

/// Top-level STT document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SttDocument {
    #[serde(rename = "jobName")]
    pub job_name: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub results: SttResults,
}

impl SttDocument {
    /// Serialize the document to a JSON string
    pub fn to_json(&self, pretty: bool) -> Result<String, SttError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Transcription results payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SttResults {
    pub transcripts: Vec<SttTranscript>,
    pub items: Vec<SttItem>,
}

/// Full transcript text wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SttTranscript {
    pub transcript: String,
}

/// Item kind: a spoken word or a punctuation mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SttItemKind {
    Pronunciation,
    Punctuation,
}

/// One recognized item
///
/// Pronunciation items carry timestamps; punctuation items do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SttItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(rename = "type")]
    pub kind: SttItemKind,
    pub alternatives: Vec<SttAlternative>,
}

impl SttItem {
    /// Build a timestamped pronunciation item
    pub fn pronunciation(content: &str, start: f64, end: f64) -> Self {
        Self {
            start_time: Some(format!("{start:.2}")),
            end_time: Some(format!("{end:.2}")),
            kind: SttItemKind::Pronunciation,
            alternatives: vec![SttAlternative::certain(content)],
        }
    }

    /// Build a punctuation item (no timestamps)
    pub fn punctuation(content: &str) -> Self {
        Self {
            start_time: None,
            end_time: None,
            kind: SttItemKind::Punctuation,
            alternatives: vec![SttAlternative::certain(content)],
        }
    }
}

/// Candidate content with confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SttAlternative {
    pub content: String,
    pub confidence: String,
}

impl SttAlternative {
    fn certain(content: &str) -> Self {
        Self {
            content: content.to_string(),
            confidence: "1.0".to_string(),
        }
    }
}
