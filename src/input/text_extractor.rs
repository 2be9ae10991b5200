//! Text extraction from various file formats

use crate::error::{Result, ResumeMatcherError};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

/// Ratio of replacement/control characters above which extracted text is
/// treated as binary garbage rather than prose. Scanned PDFs typically
/// extract as nothing or as noise above this line.
const MAX_BAD_CHAR_RATIO: f32 = 0.02;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(ResumeMatcherError::Io)?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeMatcherError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;

        if !is_mostly_text(&text) {
            log::warn!(
                "PDF '{}' extracted as non-text (likely scanned), returning empty",
                path.display()
            );
            return Ok(String::new());
        }
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(ResumeMatcherError::Io)?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await.map_err(ResumeMatcherError::Io)?;
        Ok(markdown_to_text(&markdown))
    }
}

/// Walk the markdown event stream and keep only the visible text, with
/// line breaks at block boundaries so section headings survive.
fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => out.push_str("- "),
            Event::End(Tag::Heading(..)) | Event::End(Tag::Paragraph) | Event::End(Tag::Item) => {
                out.push('\n')
            }
            _ => {}
        }
    }
    out.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// True when the text reads as prose: non-empty and nearly free of
/// replacement and control characters.
fn is_mostly_text(text: &str) -> bool {
    let total = text.chars().count();
    if total == 0 {
        return false;
    }
    let bad = text
        .chars()
        .filter(|c| *c == '\u{FFFD}' || (c.is_control() && !matches!(c, '\n' | '\r' | '\t')))
        .count();
    (bad as f32 / total as f32) < MAX_BAD_CHAR_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_mostly_text() {
        assert!(is_mostly_text("A perfectly normal resume line."));
        assert!(!is_mostly_text(""));
        assert!(!is_mostly_text("\u{FFFD}\u{FFFD}\u{FFFD}ab"));
    }

    #[test]
    fn test_markdown_to_text_strips_formatting() {
        let text = markdown_to_text("# Skills\n\n- **Rust**\n- `Docker`\n");
        assert!(text.contains("Skills"));
        assert!(text.contains("- Rust"));
        assert!(text.contains("- Docker"));
        assert!(!text.contains('#'));
        assert!(!text.contains('*'));
    }
}
