//! 轉錄稿重建模組

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::differ::{tokenize, ChangeScript, Differ, DifferConfig, ScriptEntry};
use crate::timing::{Synthesizer, SynthesizerConfig};
use crate::types::{Transcript, Word};

/// 重建錯誤
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("轉錄稿沒有任何單詞，無法對齊編輯")]
    EmptyTranscript,

    #[error("全文與單詞陣列不同步: 全文 {tokens} 個單詞，陣列 {words} 個")]
    WordCountMismatch { tokens: usize, words: usize },

    #[error("編輯位置超出範圍: 索引 {index}，目前長度 {len}")]
    OutOfRange { index: usize, len: usize },
}

/// 重建設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// 差異比對設定
    pub differ: DifferConfig,
    /// 時間戳合成設定
    pub synthesizer: SynthesizerConfig,
}

/// 轉錄稿重建器
///
/// 對（原始轉錄稿、編輯後全文）計算編輯腳本，依序走訪腳本，
/// 以折疊方式攜帶（工作陣列、索引位移）兩個累加值：
/// 先前的編輯會移動後續編輯的位置，位移即兩者間的換算。
/// 每個變更先套用刪除、再於同一錨點套用插入，
/// 插入單詞的時間戳由 [`Synthesizer`] 合成。
pub struct Reconciler {
    differ: Differ,
    synthesizer: Synthesizer,
}

impl Reconciler {
    /// 建立新的重建器
    pub fn new(config: ReconcilerConfig) -> Self {
        Self {
            differ: Differ::new(config.differ),
            synthesizer: Synthesizer::new(config.synthesizer),
        }
    }

    /// 取得內部的差異比對器
    pub fn differ(&self) -> &Differ {
        &self.differ
    }

    /// 將編輯後的全文套用回帶時間戳的單詞序列，產生新的轉錄稿
    ///
    /// 輸入的 `transcript` 視為不可變；任何失敗都發生在切接之前，
    /// 呼叫端看不到部分修改的狀態。段落不在此重算，
    /// 由檢視層透過 [`crate::segments::map_words_to_segments`] 重建。
    pub fn reconcile(
        &self,
        transcript: &Transcript,
        edited_text: &str,
    ) -> Result<Transcript, ReconcileError> {
        let baseline_tokens = tokenize(&transcript.text).len();
        if baseline_tokens != transcript.words.len() {
            return Err(ReconcileError::WordCountMismatch {
                tokens: baseline_tokens,
                words: transcript.words.len(),
            });
        }

        let script = self.differ.diff(&transcript.text, edited_text);
        if !script.is_identity() && transcript.words.is_empty() {
            return Err(ReconcileError::EmptyTranscript);
        }

        let words = self.apply(&script, transcript)?;

        Ok(Transcript {
            text: edited_text.to_string(),
            words,
            segments: transcript.segments.clone(),
        })
    }

    fn apply(
        &self,
        script: &ChangeScript,
        transcript: &Transcript,
    ) -> Result<Vec<Word>, ReconcileError> {
        let mut working = transcript.words.clone();
        let mut displacement: isize = 0;

        for entry in &script.entries {
            if let ScriptEntry::Replace {
                lhs_at,
                deleted,
                inserted,
                ..
            } = entry
            {
                let del = deleted.len();
                let add = inserted.len();
                let signed_at = *lhs_at as isize + displacement;
                if signed_at < 0 || signed_at as usize + del > working.len() {
                    return Err(ReconcileError::OutOfRange {
                        index: signed_at.max(0) as usize + del,
                        len: working.len(),
                    });
                }
                let at = signed_at as usize;

                tracing::debug!(
                    "套用變更: 位置 {}，刪除 {}，新增 {}，位移 {}",
                    at,
                    del,
                    add,
                    displacement
                );

                // 先以切接前的錨點合成插入單詞，再以單次切接同時完成刪除與插入
                let replacement = if add > 0 {
                    self.synthesizer.synthesize(&working, at, del, inserted)
                } else {
                    Vec::new()
                };
                working.splice(at..at + del, replacement);
                displacement += add as isize - del as isize;
            }
        }

        Ok(working)
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(ReconcilerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Segment, Word};

    fn fixture() -> Transcript {
        Transcript {
            text: "hello world this is a test".to_string(),
            words: vec![
                Word::new("hello", 0.0, 0.5),
                Word::new("world", 0.5, 1.0),
                Word::new("this", 1.0, 1.5),
                Word::new("is", 1.5, 2.0),
                Word::new("a", 2.0, 2.5),
                Word::new("test", 2.5, 3.0),
            ],
            segments: vec![Segment {
                id: 1,
                start: 0.0,
                end: 3.0,
                text: "hello world this is a test".to_string(),
                words: None,
            }],
        }
    }

    fn gapped() -> Transcript {
        Transcript {
            text: "hello world".to_string(),
            words: vec![Word::new("hello", 0.0, 0.4), Word::new("world", 0.6, 1.0)],
            segments: vec![],
        }
    }

    #[test]
    fn test_round_trip_identity() {
        let transcript = fixture();
        let result = Reconciler::default()
            .reconcile(&transcript, &transcript.text)
            .unwrap();

        assert_eq!(result.words, transcript.words);
        assert_eq!(result.text, transcript.text);
    }

    #[test]
    fn test_pure_insertion() {
        let transcript = gapped();
        let result = Reconciler::default()
            .reconcile(&transcript, "hello there world")
            .unwrap();

        assert_eq!(result.words.len(), transcript.words.len() + 1);
        let there = &result.words[1];
        assert_eq!(there.word, "there");
        assert!((there.start - transcript.words[0].end).abs() < 1e-9);
        assert!(there.end <= transcript.words[1].start + 1e-9);
        assert!(there.end > there.start);
    }

    #[test]
    fn test_pure_deletion() {
        let transcript = fixture();
        let result = Reconciler::default()
            .reconcile(&transcript, "hello this is a test")
            .unwrap();

        assert_eq!(result.words.len(), transcript.words.len() - 1);
        assert!(result.words.iter().all(|w| w.word != "world"));
        // 其餘單詞的時間戳不受影響
        assert_eq!(result.words[0], transcript.words[0]);
        assert_eq!(&result.words[1..], &transcript.words[2..]);
    }

    #[test]
    fn test_replacement_anchored_between_neighbours() {
        let transcript = Transcript {
            text: "one two three".to_string(),
            words: vec![
                Word::new("one", 0.0, 0.4),
                Word::new("two", 0.5, 0.9),
                Word::new("three", 1.1, 1.5),
            ],
            segments: vec![],
        };
        let result = Reconciler::default()
            .reconcile(&transcript, "one 2 three")
            .unwrap();

        assert_eq!(result.words.len(), 3);
        assert_eq!(result.words[1].word, "2");
        // 錨定在 one.end 與 three.start 之間
        assert!((result.words[1].start - 0.4).abs() < 1e-9);
        assert!((result.words[1].end - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_multiple_edits_in_one_pass() {
        let words: Vec<Word> = (0..10)
            .map(|i| Word::new(format!("w{i}"), i as f64, i as f64 + 0.8))
            .collect();
        let transcript = Transcript {
            text: words
                .iter()
                .map(|w| w.word.clone())
                .collect::<Vec<_>>()
                .join(" "),
            words,
            segments: vec![],
        };

        // 同時編輯開頭（1 換 2）與結尾（刪除 1）
        let edited = "start also w1 w2 w3 w4 w5 w6 w7 w8";
        let result = Reconciler::default().reconcile(&transcript, edited).unwrap();

        let texts: Vec<&str> = result.words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(
            texts,
            vec!["start", "also", "w1", "w2", "w3", "w4", "w5", "w6", "w7", "w8"]
        );
        // 第二處編輯不得破壞已被第一處位移的索引：中段不受影響
        assert_eq!(&result.words[2..10], &transcript.words[1..9]);
        assert_eq!(result.text, edited);
    }

    #[test]
    fn test_empty_transcript_rejected() {
        let empty = Transcript {
            text: String::new(),
            words: vec![],
            segments: vec![],
        };
        let err = Reconciler::default().reconcile(&empty, "hello").unwrap_err();
        assert!(matches!(err, ReconcileError::EmptyTranscript));
    }

    #[test]
    fn test_empty_transcript_noop_allowed() {
        let empty = Transcript {
            text: String::new(),
            words: vec![],
            segments: vec![],
        };
        let result = Reconciler::default().reconcile(&empty, "").unwrap();
        assert!(result.words.is_empty());
    }

    #[test]
    fn test_out_of_sync_baseline_rejected() {
        let mut transcript = fixture();
        transcript.words.pop();
        let err = Reconciler::default()
            .reconcile(&transcript, "hello world this is a")
            .unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::WordCountMismatch { tokens: 6, words: 5 }
        ));
    }

    #[test]
    fn test_caller_transcript_not_mutated() {
        let transcript = fixture();
        let before = transcript.clone();
        let _ = Reconciler::default()
            .reconcile(&transcript, "hello this is a test")
            .unwrap();
        assert_eq!(transcript, before);
    }

    #[test]
    fn test_segments_passed_through_unrecomputed() {
        let transcript = fixture();
        let result = Reconciler::default()
            .reconcile(&transcript, "hello this is a test")
            .unwrap();
        assert_eq!(result.segments, transcript.segments);
    }

    #[test]
    fn test_text_set_to_edited_text() {
        let transcript = fixture();
        let result = Reconciler::default()
            .reconcile(&transcript, "hello  world this is a test")
            .unwrap();
        // 全文一律換成編輯後的字串，即使腳本為恆等
        assert_eq!(result.text, "hello  world this is a test");
        assert_eq!(result.words, transcript.words);
    }
}
