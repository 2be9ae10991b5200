//! Keyword pool construction from job description text.
//!
//! The pool merges two sources: the most frequent JD unigrams and every
//! curated taxonomy phrase/technology found in the JD. Weights favor
//! curated membership over raw frequency so a single mention of
//! "kubernetes" outranks a JD that says "team" nine times.

use crate::processing::taxonomy::Taxonomy;
use crate::processing::text_processor::{normalize, tokenize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_UNIGRAM_CAP: usize = 50;

/// Maximum weight contribution from raw occurrence counts.
const FREQ_CAP: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub term: String,
    pub weight: u32,
}

/// Build the weighted keyword pool for a job description. Empty JD text
/// yields an empty pool.
pub fn build_pool(jd_text: &str, taxonomy: &Taxonomy, top_unigram_cap: usize) -> Vec<PoolEntry> {
    let jd_norm = normalize(jd_text);
    if jd_norm.trim().is_empty() {
        return Vec::new();
    }

    let mut terms: Vec<String> = Vec::new();
    let mut seen: HashMap<String, ()> = HashMap::new();

    // Curated phrases/tech present in the JD come first: they carry the
    // domain signal the frequency list cannot.
    for term in taxonomy.scan(&jd_norm) {
        if seen.insert(term.clone(), ()).is_none() {
            terms.push(term);
        }
    }

    for term in top_unigrams(jd_text, top_unigram_cap) {
        if seen.insert(term.clone(), ()).is_none() {
            terms.push(term);
        }
    }

    terms
        .into_iter()
        .map(|term| {
            let mut weight = 0;
            if taxonomy.is_phrase(&term) {
                weight += 2;
            }
            if taxonomy.is_tech(&term) {
                weight += 2;
            }
            weight += FREQ_CAP.min(count_occurrences(&jd_norm, &term) as u32);
            PoolEntry { term, weight }
        })
        .collect()
}

/// Top unigrams by frequency, ties broken by first appearance. Pure-numeric
/// tokens are excluded; they are dates and headcounts, not skills.
pub fn top_unigrams(text: &str, cap: usize) -> Vec<String> {
    let tokens = tokenize(text);
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, tok) in tokens.iter().enumerate() {
        if tok.chars().all(|c| c.is_ascii_digit() || c == '.') {
            continue;
        }
        let entry = counts.entry(tok).or_insert((0, idx));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> =
        counts.into_iter().map(|(t, (n, i))| (t, n, i)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(cap)
        .map(|(t, _, _)| t.to_string())
        .collect()
}

/// Adjacent-token bigrams occurring more than once, by frequency.
pub fn top_bigrams(text: &str, cap: usize) -> Vec<String> {
    let tokens = tokenize(text);
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (idx, pair) in tokens.windows(2).enumerate() {
        let bigram = format!("{} {}", pair[0], pair[1]);
        let entry = counts.entry(bigram).or_insert((0, idx));
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> =
        counts.into_iter().map(|(t, (n, i))| (t, n, i)).collect();
    ranked.retain(|(_, n, _)| *n > 1);
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(cap).map(|(t, _, _)| t).collect()
}

/// Count boundary-delimited occurrences of `term` in normalized text. A
/// boundary is anything that is not `[a-z0-9]`, so "go" does not count
/// inside "good" but "ci/cd" still matches as a unit.
pub fn count_occurrences(normalized_text: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    let bytes = normalized_text.as_bytes();
    normalized_text
        .match_indices(term)
        .filter(|(start, matched)| {
            let end = start + matched.len();
            let before_ok = *start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
            let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
            before_ok && after_ok
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_jd_yields_empty_pool() {
        let tax = Taxonomy::default();
        assert!(build_pool("", &tax, DEFAULT_UNIGRAM_CAP).is_empty());
        assert!(build_pool("  \n ", &tax, DEFAULT_UNIGRAM_CAP).is_empty());
    }

    #[test]
    fn test_pool_contains_curated_and_frequent_terms() {
        let tax = Taxonomy::default();
        let jd = "React developer with CI/CD and unit testing experience";
        let pool = build_pool(jd, &tax, DEFAULT_UNIGRAM_CAP);
        let terms: Vec<&str> = pool.iter().map(|e| e.term.as_str()).collect();
        assert!(terms.contains(&"react"));
        assert!(terms.contains(&"ci/cd"));
        assert!(terms.contains(&"unit testing"));
        assert!(terms.contains(&"developer"));
    }

    #[test]
    fn test_pool_terms_unique_with_nonneg_weights() {
        let tax = Taxonomy::default();
        let jd = "Python Python python developer. Docker docker and kubernetes.";
        let pool = build_pool(jd, &tax, DEFAULT_UNIGRAM_CAP);
        let mut terms: Vec<&str> = pool.iter().map(|e| e.term.as_str()).collect();
        let before = terms.len();
        terms.sort();
        terms.dedup();
        assert_eq!(before, terms.len());
        // python: tech member (+2) with three occurrences capped at 3
        let python = pool.iter().find(|e| e.term == "python").unwrap();
        assert_eq!(python.weight, 5);
    }

    #[test]
    fn test_top_unigrams_excludes_numbers() {
        let unis = top_unigrams("2023 2023 2023 budget budget review", 10);
        assert_eq!(unis[0], "budget");
        assert!(!unis.contains(&"2023".to_string()));
    }

    #[test]
    fn test_top_bigrams_requires_repeats() {
        let text = "data pipeline design. data pipeline maintenance. single phrase here.";
        let bigrams = top_bigrams(text, 10);
        assert!(bigrams.contains(&"data pipeline".to_string()));
        assert!(!bigrams.contains(&"single phrase".to_string()));
    }

    #[test]
    fn test_count_occurrences_respects_boundaries() {
        assert_eq!(count_occurrences("go good golang go", "go"), 2);
        assert_eq!(count_occurrences("ci/cd pipeline with ci/cd", "ci/cd"), 2);
        assert_eq!(count_occurrences("", "react"), 0);
    }
}
