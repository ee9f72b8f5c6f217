//! 單詞序列差異比對模組

use serde::{Deserialize, Serialize};

/// 差異比對設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifferConfig {
    /// 比對時是否忽略大小寫
    pub ignore_case: bool,
}

impl Default for DifferConfig {
    fn default() -> Self {
        Self { ignore_case: true }
    }
}

/// 編輯腳本中的一個項目
///
/// `Unchanged` 為兩側相同的單詞連續區段；`Replace` 為一個變更區段，
/// 同時攜帶左側被刪除與右側被插入的單詞（其中一側可為空，
/// 即純刪除或純插入）。`lhs_at` / `rhs_at` 分別為區段在
/// 原文與編輯後文字的單詞索引。
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptEntry {
    Unchanged {
        lhs_at: usize,
        rhs_at: usize,
        tokens: Vec<String>,
    },
    Replace {
        lhs_at: usize,
        rhs_at: usize,
        deleted: Vec<String>,
        inserted: Vec<String>,
    },
}

/// 編輯腳本
///
/// 依由左至右順序涵蓋兩個單詞序列全長的項目列表。
/// 每次審閱時重新計算，接受或取消後即丟棄，不做持久化。
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeScript {
    pub entries: Vec<ScriptEntry>,
}

impl ChangeScript {
    /// 腳本是否不含任何變更
    pub fn is_identity(&self) -> bool {
        self.entries
            .iter()
            .all(|e| matches!(e, ScriptEntry::Unchanged { .. }))
    }
}

/// 將文字切分為單詞（以空白分割，標點依附相鄰單詞）
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// 單詞序列差異比對器
///
/// 以 Myers O(ND) 最短編輯腳本演算法計算兩段文字在單詞層級的
/// 最小插入/刪除集合。先貪婪剝除共同前綴與後綴，使相同輸入
/// 永遠產生同一份正規化腳本。
pub struct Differ {
    config: DifferConfig,
}

impl Differ {
    /// 建立新的比對器
    pub fn new(config: DifferConfig) -> Self {
        Self { config }
    }

    /// 計算 `original` 與 `edited` 之間的編輯腳本
    pub fn diff(&self, original: &str, edited: &str) -> ChangeScript {
        let lhs = tokenize(original);
        let rhs = tokenize(edited);

        let lhs_keys = self.keys(&lhs);
        let rhs_keys = self.keys(&rhs);

        // 剝除共同前綴與後綴，縮小演算法作用範圍
        let prefix = lhs_keys
            .iter()
            .zip(&rhs_keys)
            .take_while(|(a, b)| a == b)
            .count();
        let suffix = lhs_keys[prefix..]
            .iter()
            .rev()
            .zip(rhs_keys[prefix..].iter().rev())
            .take_while(|(a, b)| a == b)
            .count();

        let mid_lhs = &lhs_keys[prefix..lhs_keys.len() - suffix];
        let mid_rhs = &rhs_keys[prefix..rhs_keys.len() - suffix];

        let mut ops = Vec::with_capacity(lhs.len() + rhs.len());
        ops.extend(std::iter::repeat(Op::Keep).take(prefix));
        ops.extend(myers(mid_lhs, mid_rhs));
        ops.extend(std::iter::repeat(Op::Keep).take(suffix));

        ChangeScript {
            entries: group_ops(&ops, &lhs, &rhs),
        }
    }

    fn keys(&self, tokens: &[&str]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| {
                if self.config.ignore_case {
                    t.to_lowercase()
                } else {
                    (*t).to_string()
                }
            })
            .collect()
    }
}

impl Default for Differ {
    fn default() -> Self {
        Self::new(DifferConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Keep,
    Delete,
    Insert,
}

/// Myers 貪婪最短編輯腳本演算法
///
/// 回傳由左至右的逐單詞操作序列。平手時優先選擇刪除，
/// 與正規化 LCS diff 的最早對齊一致。
fn myers(a: &[String], b: &[String]) -> Vec<Op> {
    let n = a.len();
    let m = b.len();
    if n == 0 && m == 0 {
        return Vec::new();
    }

    let max = n + m;
    let offset = max as isize;
    let idx = |k: isize| (k + offset) as usize;

    let mut v = vec![0usize; 2 * max + 1];
    let mut trace: Vec<Vec<usize>> = Vec::new();

    'outer: for d in 0..=(max as isize) {
        trace.push(v.clone());
        let mut k = -d;
        while k <= d {
            let mut x = if k == -d || (k != d && v[idx(k - 1)] < v[idx(k + 1)]) {
                v[idx(k + 1)]
            } else {
                v[idx(k - 1)] + 1
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && a[x] == b[y] {
                x += 1;
                y += 1;
            }
            v[idx(k)] = x;
            if x >= n && y >= m {
                break 'outer;
            }
            k += 2;
        }
    }

    // 由終點回溯編輯路徑
    let mut ops = Vec::with_capacity(max);
    let (mut x, mut y) = (n, m);
    for (d, v) in trace.iter().enumerate().rev() {
        if d == 0 {
            // 僅剩對角線區段
            while x > 0 {
                ops.push(Op::Keep);
                x -= 1;
                y -= 1;
            }
            debug_assert_eq!(y, 0);
            break;
        }

        let d = d as isize;
        let k = x as isize - y as isize;
        let prev_k = if k == -d || (k != d && v[idx(k - 1)] < v[idx(k + 1)]) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = v[idx(prev_k)];
        let prev_y = (prev_x as isize - prev_k) as usize;

        while x > prev_x && y > prev_y {
            ops.push(Op::Keep);
            x -= 1;
            y -= 1;
        }
        if x == prev_x {
            ops.push(Op::Insert);
        } else {
            ops.push(Op::Delete);
        }
        x = prev_x;
        y = prev_y;
    }
    ops.reverse();
    ops
}

/// 將逐單詞操作序列聚合為腳本項目
///
/// 連續的相同區段合併為一個 `Unchanged`；連續的非相同區段
/// （刪除與插入的混合）合併為一個 `Replace`。
fn group_ops(ops: &[Op], lhs: &[&str], rhs: &[&str]) -> Vec<ScriptEntry> {
    let mut entries = Vec::new();
    let (mut li, mut ri) = (0usize, 0usize);
    let mut i = 0;

    while i < ops.len() {
        if ops[i] == Op::Keep {
            let (lhs_at, rhs_at) = (li, ri);
            let mut tokens = Vec::new();
            while i < ops.len() && ops[i] == Op::Keep {
                tokens.push(lhs[li].to_string());
                li += 1;
                ri += 1;
                i += 1;
            }
            entries.push(ScriptEntry::Unchanged {
                lhs_at,
                rhs_at,
                tokens,
            });
        } else {
            let (lhs_at, rhs_at) = (li, ri);
            let mut deleted = Vec::new();
            let mut inserted = Vec::new();
            while i < ops.len() && ops[i] != Op::Keep {
                match ops[i] {
                    Op::Delete => {
                        deleted.push(lhs[li].to_string());
                        li += 1;
                    }
                    Op::Insert => {
                        inserted.push(rhs[ri].to_string());
                        ri += 1;
                    }
                    Op::Keep => unreachable!(),
                }
                i += 1;
            }
            entries.push(ScriptEntry::Replace {
                lhs_at,
                rhs_at,
                deleted,
                inserted,
            });
        }
    }

    entries
}
