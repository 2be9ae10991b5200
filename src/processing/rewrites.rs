//! Bullet extraction and deterministic weak-to-strong rewriting.

use regex::Regex;
use std::sync::OnceLock;

use crate::processing::keywords::PoolEntry;
use crate::processing::text_processor::normalize;

/// Cap on how many bullets we lift from a resume in one pass.
const MAX_BULLETS: usize = 80;

/// Weak openers paired with stronger replacements. Matched at the start
/// of a bullet, case-insensitively.
const WEAK_TO_STRONG: &[(&str, &str)] = &[
    ("responsible for", "Owned"),
    ("helped", "Led"),
    ("worked on", "Delivered"),
    ("assisted with", "Supported"),
    ("assisted", "Supported"),
    ("participated in", "Contributed to"),
    ("was involved in", "Drove"),
    ("tasked with", "Executed"),
    ("handled", "Managed"),
    ("in charge of", "Directed"),
];

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:[•\-*]|\d+[.)])\s+(.*)$").expect("bullet regex"))
}

fn digit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d").expect("digit regex"))
}

/// Pull bullet-style lines out of a resume, deduplicated case-insensitively,
/// capped at [`MAX_BULLETS`]. Non-bullet lines that read like achievement
/// sentences (start with a capital, reasonable length) are included too so
/// plain-paragraph resumes still produce candidates.
pub fn extract_bullets(resume_text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();

    for line in resume_text.lines() {
        let candidate = if let Some(caps) = bullet_re().captures(line) {
            caps.get(1).map(|m| m.as_str().trim().to_string())
        } else {
            let t = line.trim();
            let looks_like_sentence = t.len() >= 20
                && t.len() <= 300
                && t.chars().next().is_some_and(|c| c.is_ascii_uppercase())
                && t.split_whitespace().count() >= 4;
            looks_like_sentence.then(|| t.to_string())
        };
        let Some(text) = candidate else { continue };
        if text.is_empty() {
            continue;
        }
        if seen.insert(text.to_lowercase()) {
            out.push(text);
            if out.len() >= MAX_BULLETS {
                break;
            }
        }
    }
    out
}

/// A bullet needs a rewrite when it carries no job-description keyword or
/// no number. Quantified, on-message bullets are left alone.
pub fn needs_rewrite(bullet: &str, pool: &[PoolEntry]) -> bool {
    let normalized = normalize(bullet);
    let has_keyword = pool.iter().any(|entry| normalized.contains(&entry.term));
    let has_number = digit_re().is_match(bullet);
    !has_keyword || !has_number
}

/// Rewrite a single bullet: swap a weak opener for a strong verb, fold in
/// the top missing keyword, and append a metric prompt when the bullet has
/// no number to quantify it.
pub fn rewrite_bullet(bullet: &str, missing: &[String]) -> String {
    let trimmed = bullet.trim();
    let lower = trimmed.to_lowercase();

    let mut rewritten = trimmed.to_string();
    for (weak, strong) in WEAK_TO_STRONG {
        if lower.starts_with(weak) {
            let rest = trimmed[weak.len()..].trim_start();
            rewritten = format!("{strong} {rest}");
            break;
        }
    }

    if !digit_re().is_match(&rewritten) {
        rewritten = rewritten.trim_end_matches('.').to_string();
        rewritten.push_str(", improving [metric] by [X]%.");
    }

    if let Some(term) = missing.first() {
        let normalized = normalize(&rewritten);
        if !normalized.contains(term.as_str()) {
            rewritten.push_str(&format!(" Aligns with: {term}."));
        }
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bullets_strips_markers_and_dedupes() {
        let text = "• Built APIs in Rust for the billing team\n- Built APIs in Rust for the billing team\n* Shipped the mobile client to production\nshort\n";
        let bullets = extract_bullets(text);
        assert_eq!(bullets.len(), 2);
        assert_eq!(bullets[0], "Built APIs in Rust for the billing team");
    }

    #[test]
    fn test_plain_sentences_qualify() {
        let bullets = extract_bullets("Reduced deploy time across four services.\n");
        assert_eq!(bullets.len(), 1);
    }

    #[test]
    fn test_needs_rewrite() {
        let pool = vec![PoolEntry {
            term: "react".to_string(),
            weight: 4,
        }];
        assert!(!needs_rewrite("Built 3 React dashboards", &pool));
        assert!(needs_rewrite("Built React dashboards", &pool)); // no number
        assert!(needs_rewrite("Shipped 3 dashboards", &pool)); // no keyword
    }

    #[test]
    fn test_rewrite_swaps_weak_opener() {
        let out = rewrite_bullet("Helped migrate 12 services to Kubernetes", &[]);
        assert!(out.starts_with("Led migrate"));
    }

    #[test]
    fn test_rewrite_adds_metric_prompt_and_alignment() {
        let missing = vec!["ci/cd".to_string()];
        let out = rewrite_bullet("Responsible for the release process.", &missing);
        assert!(out.starts_with("Owned the release process"));
        assert!(out.contains("[metric]"));
        assert!(out.ends_with("Aligns with: ci/cd."));
    }
}
