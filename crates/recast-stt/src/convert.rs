//! Whisper-to-STT document conversion

use recast_core::Word;
use tracing::debug;

use crate::types::{SttDocument, SttItem, SttResults, SttTranscript};

/// Convert a whisper-style transcript into an STT document
///
/// The text is re-tokenized into words and sentence punctuation; word
/// tokens consume timestamps from `words` in order, punctuation tokens
/// carry none. When the timestamp array runs short the extra text tokens
/// are dropped from the item list, but the cursor still advances so later
/// tokens stay aligned.
pub fn whisper_to_stt(text: &str, words: &[Word]) -> SttDocument {
    let clean_text = text.trim();
    let re = regex::Regex::new(r"\b[\w']+\b|[.,!?;]").unwrap();

    let mut items: Vec<SttItem> = Vec::new();
    let mut wi = 0usize;

    for token in re.find_iter(clean_text).map(|m| m.as_str()) {
        if is_punctuation(token) {
            items.push(SttItem::punctuation(token));
        } else {
            if let Some(word) = words.get(wi) {
                items.push(SttItem::pronunciation(token, word.start, word.end));
            }
            wi += 1;
        }
    }

    debug!(
        "whisper_to_stt: {} items from {} timestamped words",
        items.len(),
        words.len()
    );

    SttDocument {
        job_name: "whisper-transcription".to_string(),
        account_id: "openai".to_string(),
        results: SttResults {
            transcripts: vec![SttTranscript {
                transcript: text.to_string(),
            }],
            items,
        },
    }
}

fn is_punctuation(token: &str) -> bool {
    matches!(token, "." | "," | "!" | "?" | ";")
}
