//! 時間戳合成模組

use serde::{Deserialize, Serialize};

use crate::types::Word;

/// 沒有後方錨點時的預設語速（秒／單詞）
pub const DEFAULT_FALLBACK_PACE: f64 = 0.3;

/// 時間戳合成設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizerConfig {
    /// 後備語速（秒／單詞）
    pub fallback_pace: f64,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            fallback_pace: DEFAULT_FALLBACK_PACE,
        }
    }
}

/// 時間戳合成器
///
/// 為插入的單詞在相鄰錨點之間以線性插值產生合成時間戳。
/// 前方錨點取插入點前一個單詞的結束時間（序列開頭則取 0.0）；
/// 後方錨點取被刪除間隙之後第一個單詞的開始時間，
/// 不存在時改以後備語速推算。
pub struct Synthesizer {
    config: SynthesizerConfig,
}

impl Synthesizer {
    /// 建立新的合成器
    pub fn new(config: SynthesizerConfig) -> Self {
        Self { config }
    }

    /// 為 `tokens` 中每個單詞產生嚴格遞增、互不重疊的時間戳
    ///
    /// `words` 為尚未切除刪除區段的工作陣列，`insert_at` 為插入位置，
    /// `gap` 為同一變更中被刪除的單詞數。呼叫端保證 `tokens` 非空。
    pub fn synthesize(
        &self,
        words: &[Word],
        insert_at: usize,
        gap: usize,
        tokens: &[String],
    ) -> Vec<Word> {
        let add = tokens.len();
        debug_assert!(add > 0);

        let start_time = if insert_at == 0 {
            0.0
        } else {
            words[insert_at - 1].end
        };
        let fallback = start_time + self.config.fallback_pace * add.max(1) as f64;
        let mut end_time = words
            .get(insert_at + gap)
            .map(|w| w.start)
            .unwrap_or(fallback);

        // 錨點退化（非遞增）時改用後備語速，避免產生負時長的單詞
        if end_time <= start_time {
            end_time = fallback;
        }

        let period = (end_time - start_time) / add as f64;
        tracing::debug!(
            "合成時間戳: 起點 {}，終點 {}，間隙 {}，週期 {}，新增 {}，位置 {}，陣列長度 {}",
            start_time,
            end_time,
            gap,
            period,
            add,
            insert_at,
            words.len()
        );

        tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                Word::new(
                    token.clone(),
                    start_time + period * i as f64,
                    start_time + period * (i + 1) as f64,
                )
            })
            .collect()
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(SynthesizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> Vec<Word> {
        vec![
            Word::new("hello", 0.0, 0.4),
            Word::new("world", 0.6, 1.0),
            Word::new("today", 1.2, 1.6),
        ]
    }

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_interpolates_between_anchors() {
        let synth = Synthesizer::default();
        let result = synth.synthesize(&words(), 1, 0, &tokens(&["there", "big"]));

        assert_eq!(result.len(), 2);
        // 在 hello.end=0.4 與 world.start=0.6 之間均分
        assert!((result[0].start - 0.4).abs() < 1e-9);
        assert!((result[0].end - 0.5).abs() < 1e-9);
        assert!((result[1].start - 0.5).abs() < 1e-9);
        assert!((result[1].end - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_gap_skips_deleted_words() {
        let synth = Synthesizer::default();
        // 刪除 world（gap=1），後方錨點應為 today.start
        let result = synth.synthesize(&words(), 1, 1, &tokens(&["everyone"]));

        assert!((result[0].start - 0.4).abs() < 1e-9);
        assert!((result[0].end - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_head_insertion_anchors_at_zero() {
        let synth = Synthesizer::default();
        let result = synth.synthesize(&words(), 0, 0, &tokens(&["well"]));

        assert!((result[0].start - 0.0).abs() < 1e-9);
        assert!(result[0].end > result[0].start);
    }

    #[test]
    fn test_tail_insertion_uses_fallback_pace() {
        let synth = Synthesizer::default();
        let result = synth.synthesize(&words(), 3, 0, &tokens(&["again", "soon"]));

        // 沒有後方錨點：today.end 起算，0.3 秒／單詞
        assert!((result[0].start - 1.6).abs() < 1e-9);
        assert!((result[0].end - 1.9).abs() < 1e-9);
        assert!((result[1].end - 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_anchors_clamp_to_fallback() {
        let touching = vec![Word::new("hello", 0.0, 0.5), Word::new("world", 0.5, 1.0)];
        let synth = Synthesizer::default();
        let result = synth.synthesize(&touching, 1, 0, &tokens(&["there"]));

        // 錨點相等（0.5 / 0.5）：不得產生非遞增的時間戳
        assert!((result[0].start - 0.5).abs() < 1e-9);
        assert!((result[0].end - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_strictly_increasing_and_non_overlapping() {
        let synth = Synthesizer::new(SynthesizerConfig { fallback_pace: 0.25 });
        let result = synth.synthesize(&words(), 2, 0, &tokens(&["a", "b", "c"]));

        for w in &result {
            assert!(w.end > w.start);
        }
        for pair in result.windows(2) {
            assert!(pair[1].start >= pair[0].end);
        }
    }
}
