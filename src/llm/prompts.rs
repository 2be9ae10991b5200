//! Prompt construction for the generative analysis pass.

use crate::processing::keywords::PoolEntry;

/// Rotating focus angles so repeated runs on the same inputs surface
/// different advice. The variant id picks one deterministically.
const FOCUS_ANGLES: [&str; 8] = [
    "quantifying achievements with concrete numbers",
    "keyword placement in the skills section",
    "strengthening weak bullet verbs",
    "tailoring the professional summary to the role",
    "surfacing missing technical keywords",
    "reordering sections for relevance",
    "trimming filler and passive language",
    "matching the job title language",
];

pub const SYSTEM_PROMPT: &str = "You are a resume reviewer. You answer with a single JSON object and nothing else. Be specific and reference the actual job description.";

/// Deterministic 32-bit string hash (x*31 + c with wrapping overflow) used
/// to spread variant ids across the focus angles.
pub fn hash_code(s: &str) -> i32 {
    let mut h: i32 = 0;
    for c in s.chars() {
        h = h.wrapping_mul(31).wrapping_add(c as i32);
    }
    h
}

pub fn focus_angle(variant_id: &str) -> &'static str {
    let idx = (hash_code(variant_id).unsigned_abs() as usize) % FOCUS_ANGLES.len();
    FOCUS_ANGLES[idx]
}

/// Build the analysis prompt. Resume and JD are truncated to keep the
/// request inside typical context limits.
pub fn analysis_prompt(
    resume_text: &str,
    jd_text: &str,
    pool: &[PoolEntry],
    missing: &[String],
    variant_id: &str,
    max_suggestions: usize,
) -> String {
    let keywords: Vec<&str> = pool.iter().take(30).map(|e| e.term.as_str()).collect();
    format!(
        "Analyze this resume against the job description. Focus especially on {focus}.\n\n\
         JOB DESCRIPTION:\n{jd}\n\n\
         RESUME:\n{resume}\n\n\
         Top job keywords: {keywords}\n\
         Keywords missing from the resume: {missing}\n\n\
         Respond with ONLY a JSON object in this shape:\n\
         {{\n\
           \"suggestions\": [\"...\"],\n\
           \"rewrites\": [{{\"original\": \"...\", \"suggestion\": \"...\"}}]\n\
         }}\n\
         Give at most {max} suggestions. Every rewrite must quote an exact line from the resume as \"original\".",
        focus = focus_angle(variant_id),
        jd = truncate(jd_text, 6000),
        resume = truncate(resume_text, 9000),
        keywords = keywords.join(", "),
        missing = missing.join(", "),
        max = max_suggestions,
    )
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_code_matches_known_values() {
        // Classic x*31+c hash values
        assert_eq!(hash_code(""), 0);
        assert_eq!(hash_code("a"), 97);
        assert_eq!(hash_code("ab"), 97 * 31 + 98);
    }

    #[test]
    fn test_focus_angle_is_stable() {
        assert_eq!(focus_angle("run-42"), focus_angle("run-42"));
    }

    #[test]
    fn test_prompt_includes_inputs() {
        let pool = vec![PoolEntry {
            term: "react".to_string(),
            weight: 4,
        }];
        let missing = vec!["ci/cd".to_string()];
        let prompt = analysis_prompt("my resume", "the job", &pool, &missing, "v1", 8);
        assert!(prompt.contains("my resume"));
        assert!(prompt.contains("the job"));
        assert!(prompt.contains("react"));
        assert!(prompt.contains("ci/cd"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 10), "hi");
    }
}
