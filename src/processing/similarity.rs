//! Bag-of-tokens similarity between resume and job description.
//!
//! A local, deterministic stand-in for embedding cosine similarity: term
//! frequency overlap normalized by both magnitudes. An external embedding
//! signal may substitute for this as long as it honors the same [0,1]
//! contract.

use std::collections::HashMap;

/// Cosine-style overlap over token frequency maps, in [0,1]. Returns 0
/// when either side has no tokens.
pub fn token_cosine(a: &[String], b: &[String]) -> f32 {
    let fa = freq(a);
    let fb = freq(b);

    let a2: f32 = fa.values().map(|&c| (c * c) as f32).sum();
    let b2: f32 = fb.values().map(|&c| (c * c) as f32).sum();
    if a2 == 0.0 || b2 == 0.0 {
        return 0.0;
    }

    let dot: f32 = fa
        .iter()
        .filter_map(|(t, &ca)| fb.get(t).map(|&cb| ca.min(cb) as f32))
        .sum();

    dot / (a2.sqrt() * b2.sqrt())
}

fn freq(tokens: &[String]) -> HashMap<&str, u32> {
    let mut m = HashMap::new();
    for t in tokens {
        *m.entry(t.as_str()).or_insert(0) += 1;
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_identical_token_bags_score_one() {
        let a = toks(&["rust", "engineer", "rust"]);
        let sim = token_cosine(&a, &a);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_disjoint_token_bags_score_zero() {
        let a = toks(&["rust", "engineer"]);
        let b = toks(&["nurse", "clinic"]);
        assert_eq!(token_cosine(&a, &b), 0.0);
    }

    #[test]
    fn test_empty_side_scores_zero() {
        let a = toks(&["rust"]);
        assert_eq!(token_cosine(&a, &[]), 0.0);
        assert_eq!(token_cosine(&[], &a), 0.0);
        assert_eq!(token_cosine(&[], &[]), 0.0);
    }

    #[test]
    fn test_partial_overlap_in_unit_range() {
        let a = toks(&["rust", "engineer", "backend"]);
        let b = toks(&["rust", "engineer", "frontend"]);
        let sim = token_cosine(&a, &b);
        assert!(sim > 0.0 && sim < 1.0);
    }
}
