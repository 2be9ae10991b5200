//! Aggregate reporting over the stored run history.

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::store::AnalyzeRun;

/// KPI summary across all stored runs. All fields are zero when the
/// history is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_runs: usize,
    pub avg_score_after: f32,
    /// Mean of (score_after - score_before) per run.
    pub avg_delta: f32,
    /// Fraction of runs with zero failing ATS checks.
    pub ats_pass_rate: f32,
    pub suggestions_total: usize,
}

pub fn summarize(runs: &[AnalyzeRun]) -> Summary {
    if runs.is_empty() {
        return Summary::default();
    }
    let n = runs.len() as f32;
    let avg_score_after = runs.iter().map(|r| f32::from(r.score_after)).sum::<f32>() / n;
    let avg_delta = runs.iter().map(|r| f32::from(r.delta())).sum::<f32>() / n;
    let clean = runs.iter().filter(|r| r.ats_fail_count == 0).count();
    Summary {
        total_runs: runs.len(),
        avg_score_after,
        avg_delta,
        ats_pass_rate: clean as f32 / n,
        suggestions_total: runs.iter().map(|r| r.suggestions_count).sum(),
    }
}

pub fn format_summary(summary: &Summary, use_colors: bool) -> String {
    let mut out = String::new();
    let title = "📈 RUN HISTORY SUMMARY";
    if use_colors {
        out.push_str(&format!("\n█ {}\n", title.blue().bold()));
    } else {
        out.push_str(&format!("\n█ {}\n", title));
    }

    if summary.total_runs == 0 {
        out.push_str("No analysis runs recorded yet. Run `analyze --save` first.\n");
        return out;
    }

    out.push_str(&format!("Total runs:        {}\n", summary.total_runs));
    out.push_str(&format!(
        "Avg score (after): {:.1}%\n",
        summary.avg_score_after
    ));
    let delta = format!("{:+.1}", summary.avg_delta);
    if use_colors && summary.avg_delta > 0.0 {
        out.push_str(&format!("Avg improvement:   {}\n", delta.green()));
    } else {
        out.push_str(&format!("Avg improvement:   {}\n", delta));
    }
    out.push_str(&format!(
        "ATS clean rate:    {:.0}%\n",
        summary.ats_pass_rate * 100.0
    ));
    out.push_str(&format!(
        "Suggestions given: {}\n",
        summary.suggestions_total
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::Mode;
    use chrono::Utc;

    fn run(before: u8, after: u8, fails: usize) -> AnalyzeRun {
        AnalyzeRun {
            created_at: Utc::now(),
            mode: Mode::Focused,
            score_before: before,
            score_after: after,
            ats_fail_count: fails,
            suggestions_count: 3,
        }
    }

    #[test]
    fn test_empty_history_yields_zeros() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_runs, 0);
        assert_eq!(summary.avg_delta, 0.0);
        assert_eq!(summary.ats_pass_rate, 0.0);
    }

    #[test]
    fn test_summary_math() {
        let runs = vec![run(50, 60, 0), run(70, 74, 1)];
        let summary = summarize(&runs);
        assert_eq!(summary.total_runs, 2);
        assert!((summary.avg_score_after - 67.0).abs() < 1e-5);
        assert!((summary.avg_delta - 7.0).abs() < 1e-5);
        assert!((summary.ats_pass_rate - 0.5).abs() < 1e-5);
        assert_eq!(summary.suggestions_total, 6);
    }

    #[test]
    fn test_format_mentions_empty_history() {
        let text = format_summary(&Summary::default(), false);
        assert!(text.contains("No analysis runs"));
    }
}
