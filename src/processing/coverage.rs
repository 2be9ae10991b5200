//! Presence/absence classification of pool terms against a resume.

use crate::processing::keywords::PoolEntry;
use crate::processing::taxonomy::Taxonomy;
use crate::processing::text_processor::{normalize, tokenize};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverageResult {
    pub present: Vec<String>,
    pub missing: Vec<String>,
    pub ratio: f32,
}

/// Partition the pool into present/missing against the resume text.
///
/// Multi-word terms are matched as substrings of the normalized resume;
/// single words require exact token membership so "go" never matches
/// inside "good". Every term also tries its synonym variants. Pool order
/// is preserved within each partition.
pub fn coverage(pool: &[PoolEntry], resume_text: &str, taxonomy: &Taxonomy) -> CoverageResult {
    let resume_norm = normalize(resume_text);
    let resume_tokens: HashSet<String> = tokenize(resume_text).into_iter().collect();

    let mut present = Vec::new();
    let mut missing = Vec::new();

    for entry in pool {
        let hit = taxonomy.expand(&entry.term).iter().any(|variant| {
            if variant.contains(' ') {
                resume_norm.contains(variant.as_str())
            } else {
                resume_tokens.contains(variant.as_str())
            }
        });
        if hit {
            present.push(entry.term.clone());
        } else {
            missing.push(entry.term.clone());
        }
    }

    let total = present.len() + missing.len();
    let ratio = if total == 0 {
        0.0
    } else {
        present.len() as f32 / total as f32
    };

    CoverageResult {
        present,
        missing,
        ratio,
    }
}
