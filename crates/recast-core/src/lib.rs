//! recast-core - Podcast 逐字稿編輯核心庫
//!
//! 在不重跑語音辨識的前提下，把使用者自由編輯後的純文字
//! 套用回帶時間戳的單詞序列：計算單詞層級的最小編輯腳本、
//! 為插入的單詞合成插值時間戳、並提供審閱流程與段落檢視。

pub mod differ;
pub mod presenter;
pub mod reconciler;
pub mod segments;
pub mod session;
pub mod timing;
pub mod types;

pub use differ::{tokenize, ChangeScript, Differ, DifferConfig, ScriptEntry};
pub use presenter::{render, DiffRun, DiffRunKind};
pub use reconciler::{ReconcileError, Reconciler, ReconcilerConfig};
pub use segments::{annotate_words, map_words_to_segments, update_segment_word};
pub use session::{EditSession, SessionError, SessionState};
pub use timing::{Synthesizer, SynthesizerConfig, DEFAULT_FALLBACK_PACE};
pub use types::*;
