//! 段落檢視模組

use crate::types::{Segment, Word};

/// 依時間窗口把單詞分組到段落，建立顯示用檢視
///
/// 採嚴格的區間包含判定：單詞的 `start` 與 `end` 都必須落在
/// `[segment.start, segment.end]` 內。跨越段落邊界或落在段落間
/// 空隙的單詞不會出現在任何段落中。
pub fn map_words_to_segments(words: &[Word], segments: &[Segment]) -> Vec<Segment> {
    segments
        .iter()
        .map(|segment| {
            let in_window: Vec<Word> = words
                .iter()
                .filter(|w| w.start >= segment.start && w.end <= segment.end)
                .cloned()
                .collect();
            Segment {
                words: Some(in_window),
                ..segment.clone()
            }
        })
        .collect()
}

/// 更新段落中第 `index` 個單詞的文字，並重建段落全文
///
/// 段落層級的編輯只改文字、不動時間戳。索引超出範圍時回傳 `None`。
pub fn update_segment_word(segment: &Segment, index: usize, new_text: &str) -> Option<Segment> {
    let mut words = segment.words.clone().unwrap_or_default();
    let target = words.get_mut(index)?;
    target.word = new_text.to_string();

    let text = words
        .iter()
        .map(|w| w.word.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Some(Segment {
        text,
        words: Some(words),
        ..segment.clone()
    })
}

/// 為選取的單詞附加註解說明
///
/// 選取集合以單詞的 `start` 時間為鍵（單詞在序列中以開始時間唯一識別）。
pub fn annotate_words(
    segments: &[Segment],
    selected_starts: &[f64],
    explanation: &str,
) -> Vec<Segment> {
    segments
        .iter()
        .map(|segment| {
            let words = segment.words.as_ref().map(|words| {
                words
                    .iter()
                    .map(|w| {
                        if selected_starts.iter().any(|s| *s == w.start) {
                            Word {
                                explanation: Some(explanation.to_string()),
                                ..w.clone()
                            }
                        } else {
                            w.clone()
                        }
                    })
                    .collect()
            });
            Segment {
                words,
                ..segment.clone()
            }
        })
        .collect()
}
