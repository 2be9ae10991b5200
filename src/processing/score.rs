//! Final weighted score composition and title matching.

use crate::processing::keywords::count_occurrences;
use crate::processing::text_processor::normalize;
use serde::{Deserialize, Serialize};

/// Blend weights for the final score. Must sum to 1.0; the split is a
/// tunable policy, not a hard contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub coverage: f32,
    pub similarity: f32,
    pub title: f32,
    pub ats: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            coverage: 0.45,
            similarity: 0.35,
            title: 0.10,
            ats: 0.10,
        }
    }
}

/// Component signals feeding the final score, each in [0,1]. The title
/// signal defaults to 0 (no titles supplied) and ATS hygiene to 1 (no
/// penalty), matching the component contracts.
#[derive(Debug, Clone)]
pub struct ScoreInputs {
    pub coverage_ratio: f32,
    pub similarity: f32,
    pub title_match: f32,
    pub ats_hygiene: f32,
}

impl Default for ScoreInputs {
    fn default() -> Self {
        Self {
            coverage_ratio: 0.0,
            similarity: 0.0,
            title_match: 0.0,
            ats_hygiene: 1.0,
        }
    }
}

/// Weighted sum rounded to the nearest integer and clamped to 0..=100.
/// Deterministic: identical inputs always produce the identical score.
pub fn final_score(inputs: &ScoreInputs, weights: &ScoreWeights) -> u8 {
    let blended = weights.coverage * inputs.coverage_ratio
        + weights.similarity * inputs.similarity
        + weights.title * inputs.title_match
        + weights.ats * inputs.ats_hygiene;
    (blended * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Fraction of JD title phrases found with word boundaries in the resume,
/// in [0,1]. No titles yields 0.
pub fn title_match(titles: &[String], resume_text: &str) -> f32 {
    if titles.is_empty() {
        return 0.0;
    }
    let resume_norm = normalize(resume_text);
    let hits = titles
        .iter()
        .filter(|t| count_occurrences(&resume_norm, &t.to_lowercase()) > 0)
        .count();
    (hits as f32 / titles.len() as f32).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_deterministic() {
        let inputs = ScoreInputs {
            coverage_ratio: 0.7,
            similarity: 0.5,
            title_match: 0.0,
            ats_hygiene: 1.0,
        };
        let weights = ScoreWeights::default();
        let first = final_score(&inputs, &weights);
        let second = final_score(&inputs, &weights);
        assert_eq!(first, second);
        // 0.45*0.7 + 0.35*0.5 + 0.10*1.0 = 0.59
        assert_eq!(first, 59);
    }

    #[test]
    fn test_score_bounds() {
        let weights = ScoreWeights::default();
        let zero = final_score(&ScoreInputs {
            coverage_ratio: 0.0,
            similarity: 0.0,
            title_match: 0.0,
            ats_hygiene: 0.0,
        }, &weights);
        let full = final_score(&ScoreInputs {
            coverage_ratio: 1.0,
            similarity: 1.0,
            title_match: 1.0,
            ats_hygiene: 1.0,
        }, &weights);
        assert_eq!(zero, 0);
        assert_eq!(full, 100);
    }

    #[test]
    fn test_title_match() {
        let titles = vec!["software engineer".to_string(), "tech lead".to_string()];
        let resume = "Software Engineer at Initech, promoted twice.";
        let score = title_match(&titles, resume);
        assert!((score - 0.5).abs() < 1e-6);
        assert_eq!(title_match(&[], resume), 0.0);
    }
}
