//! Resume section parsing: heading-line detection, canonical alias
//! mapping, and clean re-serialization.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Canonical section order used by [`stringify`].
pub const CANON_ORDER: [&str; 10] = [
    "contact",
    "summary",
    "skills",
    "experience",
    "projects",
    "education",
    "certifications",
    "awards",
    "publications",
    "references",
];

pub const UNKNOWN_KEY: &str = "unknown";

const MAX_HEADING_LEN: usize = 48;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBlock {
    pub heading: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedResume {
    pub sections: HashMap<String, Vec<SectionBlock>>,
    /// Canonical keys first, then unrecognized keys in first-seen order.
    pub order: Vec<String>,
}

fn alias_table() -> &'static Vec<(&'static str, Regex)> {
    static TABLE: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        [
            ("summary", r"(?i)^(professional )?summary$|^profile$|^objective$"),
            (
                "skills",
                r"(?i)^skills( & tools)?$|^technical skills$|^skills & technologies$|^tools$|^technologies$|^core competencies$",
            ),
            (
                "experience",
                r"(?i)^(work )?experience$|^employment$|^career history$|^professional experience$",
            ),
            ("projects", r"(?i)^projects?$|^selected projects$"),
            ("education", r"(?i)^education$|^academics?$"),
            ("certifications", r"(?i)^certifications?$|^certs$|^licenses?$"),
            ("awards", r"(?i)^awards?$|^honors?$"),
            ("publications", r"(?i)^publications?$"),
            ("references", r"(?i)^references?$|^referees?$"),
            ("contact", r"(?i)^contact$|^about$"),
        ]
        .into_iter()
        .map(|(key, pattern)| (key, Regex::new(pattern).expect("alias regex")))
        .collect()
    })
}

fn title_case_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z][A-Za-z ]+$").expect("title case regex"))
}

fn all_caps_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z\s&/-]+$").expect("all caps regex"))
}

fn colon_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z &/-]{2,}:$").expect("colon heading regex"))
}

/// A line qualifies as a heading candidate if it is short, Title Case or
/// ALL CAPS without trailing sentence punctuation, or any short word run
/// ending in a colon ("SKILLS:").
pub fn is_heading_line(line: &str) -> bool {
    let t = line.trim();
    if t.is_empty() {
        return false;
    }
    let shaped = t.len() <= MAX_HEADING_LEN
        && (title_case_re().is_match(t) || all_caps_re().is_match(t))
        && !t.ends_with(['.', ':', ',']);
    shaped || colon_heading_re().is_match(t)
}

fn canon_key(heading: &str) -> Option<&'static str> {
    let t = heading.trim_end_matches(':').trim();
    alias_table()
        .iter()
        .find(|(_, re)| re.is_match(t))
        .map(|(key, _)| *key)
}

/// Split a resume blob into named sections by heading detection. Content
/// before the first recognized heading lands in `unknown`, as does any
/// block under a heading the alias table does not know.
pub fn parse_sections(text: &str) -> ParsedResume {
    let cleaned = text.replace('\r', "");
    let lines: Vec<&str> = cleaned.lines().collect();
    if lines.iter().all(|l| l.trim().is_empty()) {
        return ParsedResume::default();
    }

    let mut block_starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_heading_line(line))
        .map(|(i, _)| i)
        .collect();
    // Leading content without a heading still forms a block.
    if block_starts.first() != Some(&0) {
        block_starts.insert(0, 0);
    }

    let mut sections: HashMap<String, Vec<SectionBlock>> = HashMap::new();
    let mut seen_keys: Vec<String> = Vec::new();

    for (b, &start) in block_starts.iter().enumerate() {
        let end = block_starts.get(b + 1).copied().unwrap_or(lines.len());
        let head_line = lines[start].trim_end_matches(':').trim();
        let canon = if is_heading_line(lines[start]) {
            canon_key(head_line)
        } else {
            None
        };
        let key = canon.unwrap_or(UNKNOWN_KEY).to_string();

        // Recognized headings own their body; unrecognized blocks keep
        // the first line as content.
        let body_start = if canon.is_some() { start + 1 } else { start };
        let body = trim_blank_edges(&lines[body_start.min(end)..end]).join("\n");

        if body.is_empty() && canon.is_none() && head_line.is_empty() {
            continue;
        }
        if !seen_keys.contains(&key) {
            seen_keys.push(key.clone());
        }
        sections.entry(key).or_default().push(SectionBlock {
            heading: head_line.to_string(),
            text: body,
        });
    }

    // Stable order: canonical section order first, then the rest as seen.
    let mut order: Vec<String> = Vec::new();
    for key in CANON_ORDER {
        if sections.contains_key(key) {
            order.push(key.to_string());
        }
    }
    for key in &seen_keys {
        if !order.contains(key) {
            order.push(key.clone());
        }
    }

    ParsedResume { sections, order }
}

/// Reassemble a clean resume: uppercase headings in canonical order then
/// unknowns, blank-line separated, never more than one blank line in a row.
pub fn stringify(parsed: &ParsedResume) -> String {
    let mut parts: Vec<String> = Vec::new();
    for key in &parsed.order {
        let Some(blocks) = parsed.sections.get(key) else {
            continue;
        };
        for block in blocks {
            // Unknown blocks carry their heading line inside the body.
            if key != UNKNOWN_KEY {
                let heading = if block.heading.is_empty() {
                    default_heading(key).to_string()
                } else {
                    block.heading.clone()
                };
                parts.push(heading.to_uppercase());
            }
            if !block.text.is_empty() {
                parts.push(block.text.clone());
            }
        }
    }
    let joined = parts.join("\n\n");
    collapse_blank_runs(&joined)
}

/// Split a skills-section body into individual skill strings: one per
/// comma/semicolon item, bullets stripped, double-spaced runs split.
pub fn extract_skills_block(skills_text: &str) -> Vec<String> {
    let joined = skills_text
        .lines()
        .map(|l| {
            l.trim_start_matches(['•', '-', '*'])
                .trim()
        })
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    joined
        .split([';', ','])
        .flat_map(|s| s.split("  "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn default_heading(key: &str) -> &str {
    match key {
        "summary" => "Professional Summary",
        "skills" => "Skills",
        "experience" => "Experience",
        "projects" => "Projects",
        "education" => "Education",
        "certifications" => "Certifications",
        "awards" => "Awards",
        "publications" => "Publications",
        "references" => "References",
        "contact" => "Contact",
        _ => "Additional",
    }
}

fn trim_blank_edges<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let mut start = 0;
    let mut end = lines.len();
    while start < end && lines[start].trim().is_empty() {
        start += 1;
    }
    while end > start && lines[end - 1].trim().is_empty() {
        end -= 1;
    }
    lines[start..end].to_vec()
}

fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newline_run = 0;
    for c in text.chars() {
        if c == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                out.push(c);
            }
        } else {
            newline_run = 0;
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jane Doe\njane@example.com\n\nSUMMARY\nSeasoned engineer.\n\nSkills:\nRust, Python; Docker\n\nWORK EXPERIENCE\nAcme Corp — lead\n\nHobbies\nChess and hiking\n";

    #[test]
    fn test_heading_detection() {
        assert!(is_heading_line("SUMMARY"));
        assert!(is_heading_line("Skills:"));
        assert!(is_heading_line("Work Experience"));
        assert!(!is_heading_line("Shipped features for clients."));
        assert!(!is_heading_line(""));
        assert!(!is_heading_line(&"X".repeat(60)));
    }

    #[test]
    fn test_parse_maps_aliases_to_canonical_keys() {
        let parsed = parse_sections(SAMPLE);
        assert!(parsed.sections.contains_key("summary"));
        assert!(parsed.sections.contains_key("skills"));
        assert!(parsed.sections.contains_key("experience"));
        assert_eq!(
            parsed.sections["summary"][0].text,
            "Seasoned engineer."
        );
        assert_eq!(parsed.sections["skills"][0].heading, "Skills");
    }

    #[test]
    fn test_unknown_blocks_keep_source_order() {
        let parsed = parse_sections(SAMPLE);
        // "Jane Doe" leading block and "Hobbies" both land in unknown
        let unknown = &parsed.sections[UNKNOWN_KEY];
        assert!(unknown[0].text.contains("jane@example.com"));
        assert!(unknown.iter().any(|b| b.text.contains("Chess")));
        // Canonical keys come before unknown in the order
        let unknown_pos = parsed.order.iter().position(|k| k == UNKNOWN_KEY).unwrap();
        let summary_pos = parsed.order.iter().position(|k| k == "summary").unwrap();
        assert!(summary_pos < unknown_pos);
    }

    #[test]
    fn test_canonical_order() {
        let text = "EDUCATION\nBS in CS\n\nSUMMARY\nBuilder.\n\nSKILLS\nRust";
        let parsed = parse_sections(text);
        let keys: Vec<&str> = parsed.order.iter().map(String::as_str).collect();
        let summary = keys.iter().position(|k| *k == "summary").unwrap();
        let skills = keys.iter().position(|k| *k == "skills").unwrap();
        let education = keys.iter().position(|k| *k == "education").unwrap();
        assert!(summary < skills && skills < education);
    }

    #[test]
    fn test_stringify_shape() {
        let parsed = parse_sections(SAMPLE);
        let out = stringify(&parsed);
        assert!(out.contains("SUMMARY"));
        assert!(out.contains("SKILLS"));
        assert!(out.contains("WORK EXPERIENCE"));
        assert!(!out.contains("\n\n\n"));
        // Summary body follows its heading
        let summary_idx = out.find("SUMMARY").unwrap();
        let body_idx = out.find("Seasoned engineer.").unwrap();
        assert!(summary_idx < body_idx);
    }

    #[test]
    fn test_extract_skills_block() {
        let skills = extract_skills_block("• Rust, Python; Docker\n- Kubernetes");
        assert_eq!(skills, vec!["Rust", "Python", "Docker", "Kubernetes"]);
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse_sections("");
        assert!(parsed.sections.is_empty());
        assert!(parsed.order.is_empty());
        assert_eq!(stringify(&parsed), "");
    }
}
