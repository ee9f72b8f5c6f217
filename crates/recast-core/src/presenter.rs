//! 差異檢視模組

use serde::{Deserialize, Serialize};

use crate::differ::{ChangeScript, ScriptEntry};

/// 差異區段種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffRunKind {
    /// 未變更
    Unchanged,
    /// 新增
    Inserted,
    /// 刪除
    Deleted,
}

impl std::fmt::Display for DiffRunKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffRunKind::Unchanged => write!(f, "unchanged"),
            DiffRunKind::Inserted => write!(f, "inserted"),
            DiffRunKind::Deleted => write!(f, "deleted"),
        }
    }
}

/// 供審閱顯示的差異區段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffRun {
    /// 區段種類
    pub kind: DiffRunKind,
    /// 區段文字（單詞以空白連接）
    pub text: String,
}

/// 將編輯腳本轉為供人審閱的區段列表
///
/// 純文字轉換，不涉及時間戳。同一變更中刪除區段先於插入區段，
/// 相鄰的同種類區段會合併為一段。
pub fn render(script: &ChangeScript) -> Vec<DiffRun> {
    let mut runs: Vec<DiffRun> = Vec::new();

    for entry in &script.entries {
        match entry {
            ScriptEntry::Unchanged { tokens, .. } => {
                push_run(&mut runs, DiffRunKind::Unchanged, tokens);
            }
            ScriptEntry::Replace {
                deleted, inserted, ..
            } => {
                push_run(&mut runs, DiffRunKind::Deleted, deleted);
                push_run(&mut runs, DiffRunKind::Inserted, inserted);
            }
        }
    }

    runs
}

fn push_run(runs: &mut Vec<DiffRun>, kind: DiffRunKind, tokens: &[String]) {
    if tokens.is_empty() {
        return;
    }
    let text = tokens.join(" ");
    if let Some(last) = runs.last_mut() {
        if last.kind == kind {
            last.text.push(' ');
            last.text.push_str(&text);
            return;
        }
    }
    runs.push(DiffRun { kind, text });
}
