//! 編輯工作階段模組

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::differ::ChangeScript;
use crate::presenter::{render, DiffRun};
use crate::reconciler::{ReconcileError, Reconciler, ReconcilerConfig};
use crate::types::Transcript;

/// 工作階段狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// 編輯中
    Editing,
    /// 審閱中
    Reviewing,
}

/// 工作階段錯誤
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("目前不在審閱狀態")]
    NotReviewing,

    #[error("審閱進行中，無法修改文字")]
    ReviewInProgress,

    #[error("重建失敗: {0}")]
    Reconcile(#[from] ReconcileError),
}

/// 編輯工作階段
///
/// 持有基準轉錄稿與工作中的編輯文字，驅動
/// 編輯中 → 審閱中 → 接受／取消 的審閱流程。
/// 進入審閱時計算一次編輯腳本並凍結為快照；
/// 接受後以重建結果作為新基準，取消則保留使用者的編輯文字、
/// 僅放棄這次提交。同一時間只會有一個進行中的審閱。
pub struct EditSession {
    reconciler: Reconciler,
    baseline: Transcript,
    edited_text: String,
    review: Option<ChangeScript>,
}

impl EditSession {
    /// 以預設設定建立工作階段
    pub fn new(transcript: Transcript) -> Self {
        Self::with_config(transcript, ReconcilerConfig::default())
    }

    /// 以指定設定建立工作階段
    pub fn with_config(transcript: Transcript, config: ReconcilerConfig) -> Self {
        let edited_text = transcript.text.clone();
        Self {
            reconciler: Reconciler::new(config),
            baseline: transcript,
            edited_text,
            review: None,
        }
    }

    /// 目前狀態
    pub fn state(&self) -> SessionState {
        if self.review.is_some() {
            SessionState::Reviewing
        } else {
            SessionState::Editing
        }
    }

    /// 目前的基準轉錄稿
    pub fn transcript(&self) -> &Transcript {
        &self.baseline
    }

    /// 工作中的編輯文字
    pub fn edited_text(&self) -> &str {
        &self.edited_text
    }

    /// 更新編輯文字（審閱快照已凍結，審閱中不可修改）
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        if self.review.is_some() {
            return Err(SessionError::ReviewInProgress);
        }
        self.edited_text = text.into();
        Ok(())
    }

    /// 進入審閱：計算編輯腳本並凍結為快照
    pub fn begin_review(&mut self) -> &ChangeScript {
        let script = self
            .reconciler
            .differ()
            .diff(&self.baseline.text, &self.edited_text);
        tracing::debug!("進入審閱: 腳本共 {} 個項目", script.entries.len());
        self.review.insert(script)
    }

    /// 審閱中的編輯腳本快照
    pub fn script(&self) -> Option<&ChangeScript> {
        self.review.as_ref()
    }

    /// 審閱快照的顯示區段
    pub fn review_runs(&self) -> Option<Vec<DiffRun>> {
        self.review.as_ref().map(render)
    }

    /// 接受審閱：重建轉錄稿並以結果作為新基準
    ///
    /// 失敗時基準保持原狀，工作階段回到編輯中；
    /// 呼叫端仍握有編輯前的轉錄稿作為安全後盾。
    pub fn accept(&mut self) -> Result<&Transcript, SessionError> {
        if self.review.take().is_none() {
            return Err(SessionError::NotReviewing);
        }

        let next = self
            .reconciler
            .reconcile(&self.baseline, &self.edited_text)?;
        tracing::info!(
            "接受編輯: 單詞數 {} -> {}",
            self.baseline.words.len(),
            next.words.len()
        );
        self.baseline = next;
        Ok(&self.baseline)
    }

    /// 取消審閱：放棄快照，保留編輯文字
    pub fn cancel(&mut self) {
        tracing::debug!("取消審閱");
        self.review = None;
    }
}
