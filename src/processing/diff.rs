//! Token-level diff between an original and a suggested rewrite.
//!
//! Unlike the scoring tokenizer this one is lossless: word runs (including
//! `+#./-`), punctuation runs, and whitespace runs are all kept as tokens,
//! so concatenating the ops on either side reconstructs that side exactly.
//! The engine emits structured ops; the HTML renderers are presentation
//! helpers layered on top.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Equal,
    Add,
    Del,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOp {
    #[serde(rename = "type")]
    pub kind: DiffKind,
    pub text: String,
}

fn diff_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Three classes: word chars (with +#./- so "ci/cd" and "c++" stay
    // whole), punctuation runs, whitespace runs. Together they cover
    // every character, which is what makes the diff reconstructable.
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9+#./-]+|[^\sA-Za-z0-9]+|\s+").expect("diff token regex")
    })
}

/// Split preserving every character.
pub fn tokenize_for_diff(text: &str) -> Vec<String> {
    diff_token_re()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// LCS alignment over the two token sequences, O(n·m) time and space.
/// When two alignments tie, the original side is consumed first (delete
/// before insert), keeping diffs stable and minimal on the original.
pub fn diff(original: &str, suggestion: &str) -> Vec<DiffOp> {
    let a = tokenize_for_diff(original);
    let b = tokenize_for_diff(suggestion);
    let n = a.len();
    let m = b.len();

    // dp[i][j] = LCS length of a[i..], b[j..]
    let mut dp = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[i][j] = if a[i] == b[j] {
                dp[i + 1][j + 1] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }

    let mut ops = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            ops.push(DiffOp {
                kind: DiffKind::Equal,
                text: a[i].clone(),
            });
            i += 1;
            j += 1;
        } else if dp[i + 1][j] >= dp[i][j + 1] {
            ops.push(DiffOp {
                kind: DiffKind::Del,
                text: a[i].clone(),
            });
            i += 1;
        } else {
            ops.push(DiffOp {
                kind: DiffKind::Add,
                text: b[j].clone(),
            });
            j += 1;
        }
    }
    while i < n {
        ops.push(DiffOp {
            kind: DiffKind::Del,
            text: a[i].clone(),
        });
        i += 1;
    }
    while j < m {
        ops.push(DiffOp {
            kind: DiffKind::Add,
            text: b[j].clone(),
        });
        j += 1;
    }
    ops
}

/// Escape text for safe embedding in markup.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Original-side view: equal text plus deletions wrapped in `<del>`.
/// Pure-whitespace deletions pass through unwrapped to avoid visual noise.
pub fn render_original(ops: &[DiffOp]) -> String {
    let mut html = String::new();
    for op in ops {
        match op.kind {
            DiffKind::Equal => html.push_str(&escape_html(&op.text)),
            DiffKind::Del => {
                if op.text.trim().is_empty() {
                    html.push_str(&op.text);
                } else {
                    html.push_str("<del>");
                    html.push_str(&escape_html(&op.text));
                    html.push_str("</del>");
                }
            }
            DiffKind::Add => {}
        }
    }
    html
}

/// Suggestion-side view: equal text plus insertions wrapped in `<mark>`.
pub fn render_suggestion(ops: &[DiffOp]) -> String {
    let mut html = String::new();
    for op in ops {
        match op.kind {
            DiffKind::Equal => html.push_str(&escape_html(&op.text)),
            DiffKind::Add => {
                if op.text.trim().is_empty() {
                    html.push_str(&op.text);
                } else {
                    html.push_str("<mark>");
                    html.push_str(&escape_html(&op.text));
                    html.push_str("</mark>");
                }
            }
            DiffKind::Del => {}
        }
    }
    html
}
