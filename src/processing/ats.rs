//! ATS hygiene heuristics: a fixed battery of structural checks.
//!
//! Always exactly seven checks in a fixed order, regenerated fresh on
//! every call. None of them can fail on odd input; an empty resume just
//! produces the all-default verdicts.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::processing::text_processor::word_count;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtsStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsCheck {
    pub status: AtsStatus,
    pub text: String,
    pub tip: String,
}

impl AtsCheck {
    fn new(status: AtsStatus, text: impl Into<String>, tip: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
            tip: tip.into(),
        }
    }
}

const SHORT_WORDS: usize = 250;
const LONG_WORDS: usize = 1200;
const CAPS_RATIO_LIMIT: u32 = 15;
const LONG_LINE_CHARS: usize = 140;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").expect("email regex")
    })
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\+?\d[\d\s().-]{7,}\d").expect("phone regex"))
}

fn sections_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(experience|education|skills|projects|summary|objective|profile)")
            .expect("sections regex")
    })
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*[•\-*]\s+").expect("bullet regex"))
}

/// Run the fixed seven-check battery over raw resume text.
pub fn ats_checks(text: &str) -> Vec<AtsCheck> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = word_count(text);
    let has_email = email_re().is_match(text);
    let has_phone = phone_re().is_match(text);
    let has_sections = sections_re().is_match(text);
    let has_bullets = bullet_re().is_match(text);
    let long_line = text.lines().any(|l| l.chars().count() > LONG_LINE_CHARS);
    let caps_ratio = caps_ratio_percent(&words);

    let mut out = Vec::with_capacity(7);

    out.push(if has_email {
        AtsCheck::new(AtsStatus::Pass, "Contact email detected", "Good.")
    } else {
        AtsCheck::new(
            AtsStatus::Fail,
            "No email detected",
            "Add a professional email in the header.",
        )
    });

    out.push(if has_phone {
        AtsCheck::new(AtsStatus::Pass, "Phone number detected", "Good.")
    } else {
        AtsCheck::new(
            AtsStatus::Warn,
            "No phone number detected",
            "Add a reachable phone number.",
        )
    });

    out.push(if word_count < SHORT_WORDS {
        AtsCheck::new(
            AtsStatus::Warn,
            format!("Short resume ({} words)", word_count),
            "Add a few impact bullets with real metrics.",
        )
    } else if word_count > LONG_WORDS {
        AtsCheck::new(
            AtsStatus::Warn,
            format!("Long resume ({} words)", word_count),
            "Trim to the most relevant content.",
        )
    } else {
        AtsCheck::new(
            AtsStatus::Pass,
            format!("Word count looks good ({})", word_count),
            "Nice balance.",
        )
    });

    out.push(if has_sections {
        AtsCheck::new(
            AtsStatus::Pass,
            "Standard section headings present",
            "Experience, Education, Skills…",
        )
    } else {
        AtsCheck::new(
            AtsStatus::Warn,
            "Key section headings missing",
            "Add standard headings for ATS.",
        )
    });

    out.push(if has_bullets {
        AtsCheck::new(AtsStatus::Pass, "Bullet points detected", "Good readability.")
    } else {
        AtsCheck::new(
            AtsStatus::Warn,
            "No bullet points",
            "Use concise bullets for achievements.",
        )
    });

    out.push(if caps_ratio > CAPS_RATIO_LIMIT {
        AtsCheck::new(
            AtsStatus::Warn,
            format!("High ALL-CAPS ratio ({}%)", caps_ratio),
            "Prefer bold over ALL CAPS.",
        )
    } else {
        AtsCheck::new(AtsStatus::Pass, "Balanced text case", "Good.")
    });

    out.push(if long_line {
        AtsCheck::new(
            AtsStatus::Warn,
            "Very long lines detected",
            "Avoid multi-column PDFs that copy as one long line.",
        )
    } else {
        AtsCheck::new(AtsStatus::Pass, "Line lengths look normal", "Good for ATS.")
    });

    out
}

/// Percentage of ≥3-char tokens that are fully uppercase. Tokens without
/// a letter never count; digit runs are not shouting.
fn caps_ratio_percent(words: &[&str]) -> u32 {
    if words.is_empty() {
        return 0;
    }
    let caps = words
        .iter()
        .filter(|w| {
            w.chars().count() >= 3
                && w.chars().any(|c| c.is_ascii_alphabetic())
                && !w.chars().any(|c| c.is_ascii_lowercase())
        })
        .count();
    ((caps as f32 / words.len() as f32) * 100.0).round() as u32
}

/// Fold the battery into a multiplicative 0..=1 hygiene factor for the
/// final score: each fail costs more than each warn.
pub fn hygiene_score(checks: &[AtsCheck]) -> f32 {
    let mut score: f32 = 1.0;
    for check in checks {
        match check.status {
            AtsStatus::Pass => {}
            AtsStatus::Warn => score *= 0.94,
            AtsStatus::Fail => score *= 0.88,
        }
    }
    score.clamp(0.0, 1.0)
}

/// Number of hard failures in a battery, used by the run history.
pub fn fail_count(checks: &[AtsCheck]) -> usize {
    checks
        .iter()
        .filter(|c| c.status == AtsStatus::Fail)
        .count()
}
