//! 共用類型定義

use serde::{Deserialize, Serialize};

/// 帶時間戳的單詞
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// 單詞文字
    pub word: String,
    /// 開始時間（秒）
    pub start: f64,
    /// 結束時間（秒）
    pub end: f64,
    /// 註解說明
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Word {
    /// 建立新的單詞
    pub fn new(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start,
            end,
            explanation: None,
        }
    }

    /// 計算單詞的時長（秒）
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// 顯示用段落
///
/// 段落是由單詞陣列衍生的檢視結構，以時間窗口將連續的單詞分組，
/// 本身不具權威性。`words` 在尚未建立檢視前為 `None`，
/// 經由 [`crate::segments::map_words_to_segments`] 填入。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// 段落識別碼
    pub id: i64,
    /// 開始時間（秒）
    pub start: f64,
    /// 結束時間（秒）
    pub end: f64,
    /// 文字內容
    pub text: String,
    /// 落在段落時間窗口內的單詞
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<Word>>,
}

/// 轉錄稿
///
/// 不變式（盡力維持）：`text` 為 `words` 中各單詞文字依序以空白連接的結果。
/// 編輯引擎的工作就是在編輯後維持這個不變式。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// 全文
    pub text: String,
    /// 帶時間戳的單詞序列（依 `start` 遞增排序）
    pub words: Vec<Word>,
    /// 顯示用段落
    pub segments: Vec<Segment>,
}

impl Transcript {
    /// 以空白連接單詞文字，重建全文
    pub fn joined_text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_duration() {
        let word = Word::new("hello", 0.5, 1.25);
        assert!((word.duration() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_joined_text_matches_words() {
        let transcript = Transcript {
            text: "hello world".to_string(),
            words: vec![Word::new("hello", 0.0, 0.5), Word::new("world", 0.5, 1.0)],
            segments: vec![],
        };
        assert_eq!(transcript.joined_text(), transcript.text);
    }

    #[test]
    fn test_word_serde_skips_empty_explanation() {
        let json = serde_json::to_string(&Word::new("hi", 0.0, 0.3)).unwrap();
        assert!(!json.contains("explanation"));

        let parsed: Word = serde_json::from_str(r#"{"word":"hi","start":0.0,"end":0.3}"#).unwrap();
        assert_eq!(parsed.explanation, None);
    }
}
