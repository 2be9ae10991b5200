//! Deduplication and JD-aligned ranking of free-text suggestions.
//!
//! Suggestions arrive from the generative service (or the local fallback)
//! in arbitrary order and quality; this module keeps the ones that talk
//! about the actual job description and drops the generic filler.

use crate::processing::text_processor::squash_whitespace;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Minimum survivors of the positive-score filter before falling back to
/// the full deduplicated list.
const MIN_KEEP: usize = 4;

/// JD vocabulary a suggestion is scored against.
pub struct RankContext {
    pub jd_unigrams: Vec<String>,
    pub jd_bigrams: Vec<String>,
    pub missing_terms: Vec<String>,
}

fn section_cue_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)summary|skills|experience|project|education|bullet|header|achievement|metric|kpi")
            .expect("section cue regex")
    })
}

fn generic_verb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)improve|enhance|optimize|leverage|stakeholder").expect("generic verb regex")
    })
}

fn concrete_verb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)add|include|replace|quantify|rename|reorder|merge").expect("concrete verb regex")
    })
}

/// Relevance of one suggestion to the JD vocabulary.
fn importance(suggestion: &str, ctx: &RankContext) -> f32 {
    let low = suggestion.to_lowercase();
    let mut score = 0.0;
    for p in &ctx.jd_bigrams {
        if low.contains(p.as_str()) {
            score += 3.0;
        }
    }
    for m in &ctx.missing_terms {
        if low.contains(&m.to_lowercase()) {
            score += 2.0;
        }
    }
    for w in &ctx.jd_unigrams {
        if low.contains(w.as_str()) {
            score += 1.0;
        }
    }
    if section_cue_re().is_match(suggestion) {
        score += 0.5;
    }
    if generic_verb_re().is_match(suggestion) && !concrete_verb_re().is_match(suggestion) {
        score -= 0.25;
    }
    score
}

/// Normalize, dedupe, rank by JD relevance, and cap.
pub fn rank_suggestions(raw: &[String], ctx: &RankContext, max: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let deduped: Vec<String> = raw
        .iter()
        .map(|s| squash_whitespace(s))
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect();

    let mut scored: Vec<(String, f32)> = deduped
        .iter()
        .map(|s| (s.clone(), importance(s, ctx)))
        .collect();
    // Stable sort keeps input order among equals, so repeated runs over
    // the same input produce the same ranking.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut kept: Vec<String> = scored
        .iter()
        .filter(|(_, score)| *score > 0.0)
        .map(|(s, _)| s.clone())
        .collect();
    if kept.len() < MIN_KEEP {
        kept = scored.into_iter().map(|(s, _)| s).collect();
    }

    kept.truncate(max);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RankContext {
        RankContext {
            jd_unigrams: vec!["react".into(), "pipeline".into(), "testing".into()],
            jd_bigrams: vec!["data pipeline".into()],
            missing_terms: vec!["ci/cd".into()],
        }
    }

    #[test]
    fn test_dedup_is_case_and_whitespace_insensitive() {
        let raw = vec![
            "Add React to the skills section".to_string(),
            "add   react to the Skills section".to_string(),
            "Quantify your data pipeline work".to_string(),
        ];
        let out = rank_suggestions(&raw, &ctx(), 10);
        assert_eq!(out.len(), 2);
        let mut lowered: Vec<String> = out
            .iter()
            .map(|s| s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" "))
            .collect();
        lowered.sort();
        lowered.dedup();
        assert_eq!(lowered.len(), 2);
    }

    #[test]
    fn test_jd_aligned_suggestions_rank_first() {
        let raw = vec![
            "Polish your hobbies section".to_string(),
            "Add evidence of CI/CD and your data pipeline work".to_string(),
        ];
        let out = rank_suggestions(&raw, &ctx(), 10);
        assert_eq!(out[0], "Add evidence of CI/CD and your data pipeline work");
    }

    #[test]
    fn test_generic_fluff_is_penalized() {
        let fluffy = "Leverage stakeholder synergies to optimize outcomes";
        let concrete = "Replace vague verbs and quantify React testing wins";
        assert!(importance(concrete, &ctx()) > importance(fluffy, &ctx()));
        assert!(importance(fluffy, &ctx()) < 0.0);
    }

    #[test]
    fn test_fallback_when_everything_filtered() {
        let raw: Vec<String> = (0..3)
            .map(|i| format!("Totally unrelated remark number {}", i))
            .collect();
        let out = rank_suggestions(&raw, &ctx(), 10);
        // Fewer than MIN_KEEP positives, so the full deduped list returns
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_cap_is_enforced() {
        let raw: Vec<String> = (0..20)
            .map(|i| format!("Add react evidence variant {}", i))
            .collect();
        let out = rank_suggestions(&raw, &ctx(), 6);
        assert_eq!(out.len(), 6);
    }
}
