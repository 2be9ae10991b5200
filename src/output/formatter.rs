//! Output formatters with colored console presentation and JSON export.

use colored::{Color, Colorize};

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::analyzer::AnalysisResult;
use crate::processing::ats::AtsStatus;
use crate::processing::diff::{render_original, render_suggestion};

/// Trait for rendering an analysis result into a displayable string.
pub trait OutputFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and score badges.
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and API-style consumers.
pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };
        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            90..=100 => ("EXCELLENT", Color::Green),
            75..=89 => ("STRONG", Color::BrightGreen),
            60..=74 => ("GOOD", Color::Yellow),
            45..=59 => ("FAIR", Color::BrightYellow),
            _ => ("NEEDS WORK", Color::Red),
        };
        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_ats_icon(&self, status: &AtsStatus) -> &'static str {
        match status {
            AtsStatus::Pass => "✅",
            AtsStatus::Warn => "⚠️",
            AtsStatus::Fail => "❌",
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Match Score: {}% {}\n",
            result.score,
            self.format_score_badge(result.score)
        ));
        if result.projected_score > result.score {
            output.push_str(&format!(
                "Projected after rewrites: {}% ({})\n",
                result.projected_score,
                self.colorize(
                    &format!("+{}", result.projected_score - result.score),
                    Color::Green
                )
            ));
        }

        output.push_str(&self.format_header("Score Breakdown", 3));
        output.push_str(&format!(
            "🔍 Keyword coverage: {:.0}% ({}/{} terms)\n",
            result.coverage.ratio * 100.0,
            result.coverage.present.len(),
            result.coverage.present.len() + result.coverage.missing.len()
        ));
        output.push_str(&format!(
            "🎯 Text similarity: {:.0}%\n",
            result.similarity * 100.0
        ));
        output.push_str(&format!(
            "💼 Title match: {:.0}%\n",
            result.title_match * 100.0
        ));

        if !result.coverage.missing.is_empty() {
            output.push_str(&self.format_header("🧩 Missing Keywords", 3));
            for term in result.coverage.missing.iter().take(12) {
                output.push_str(&format!("  • {}\n", self.colorize(term, Color::Yellow)));
            }
        }

        output.push_str(&self.format_header("🧪 ATS Checks", 2));
        for check in &result.ats {
            output.push_str(&format!(
                "  {} {}\n",
                self.format_ats_icon(&check.status),
                check.text
            ));
            if self.detailed && check.status != AtsStatus::Pass && !check.tip.is_empty() {
                output.push_str(&format!(
                    "     {}\n",
                    self.colorize(&check.tip, Color::Cyan)
                ));
            }
        }

        if !result.suggestions.is_empty() {
            output.push_str(&self.format_header("📋 Suggestions", 2));
            for (i, suggestion) in result.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        if !result.rewrites.is_empty() {
            output.push_str(&self.format_header("✏️ Bullet Rewrites", 2));
            for rewrite in &result.rewrites {
                output.push_str(&format!(
                    "  − {}\n",
                    self.colorize(&rewrite.original, Color::Red)
                ));
                output.push_str(&format!(
                    "  + {}\n",
                    self.colorize(&rewrite.suggestion, Color::Green)
                ));
                if self.detailed {
                    output.push_str(&format!("    before: {}\n", render_original(&rewrite.diff)));
                    output.push_str(&format!("    after:  {}\n", render_suggestion(&rewrite.diff)));
                }
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::{Analyzer, Mode};

    fn sample_result() -> AnalysisResult {
        Analyzer::default()
            .analyze(
                "EXPERIENCE\n- Built React apps for 2 clients\nSKILLS\nReact",
                "React engineer with CI/CD experience needed for React work",
                &[],
                Mode::Focused,
            )
            .unwrap()
    }

    #[test]
    fn test_console_plain_output() {
        let formatter = ConsoleFormatter::new(false, false);
        let text = formatter.format_result(&sample_result()).unwrap();
        assert!(text.contains("RESUME MATCH ANALYSIS"));
        assert!(text.contains("Match Score:"));
        assert!(text.contains("ATS Checks"));
    }

    #[test]
    fn test_json_round_trips() {
        let formatter = JsonFormatter::new(true);
        let text = formatter.format_result(&sample_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.get("score").is_some());
        assert!(value.get("coverage").is_some());
        assert_eq!(value["ats"].as_array().unwrap().len(), 7);
    }
}
