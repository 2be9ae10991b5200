//! Parsing of generative responses: models wrap JSON in prose and code
//! fences, so we extract the first balanced object before deserializing.

use serde::Deserialize;

use crate::error::{Result, ResumeMatcherError};

/// What we accept back from the model. Both fields are optional; a partial
/// answer still merges into the local analysis.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnalysis {
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub rewrites: Vec<RawRewrite>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRewrite {
    pub original: String,
    pub suggestion: String,
}

/// Find the first balanced `{...}` object in free-form text. Tracks string
/// literals and escapes so braces inside strings do not unbalance the scan.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

pub fn parse_analysis(raw: &str) -> Result<RawAnalysis> {
    let json = extract_json_object(raw).ok_or_else(|| {
        ResumeMatcherError::LlmService("response contained no JSON object".to_string())
    })?;
    let parsed: RawAnalysis = serde_json::from_str(json)?;
    Ok(parsed)
}
