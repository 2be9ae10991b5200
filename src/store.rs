//! Append-only run history. Each analysis appends one JSON line so the
//! report command can trend scores over time.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Result, ResumeMatcherError};
use crate::processing::analyzer::{AnalysisResult, Mode};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRun {
    pub created_at: DateTime<Utc>,
    pub mode: Mode,
    pub score_before: u8,
    pub score_after: u8,
    pub ats_fail_count: usize,
    pub suggestions_count: usize,
}

impl AnalyzeRun {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            created_at: Utc::now(),
            mode: result.mode,
            score_before: result.score,
            score_after: result.projected_score,
            ats_fail_count: result.ats_fail_count(),
            suggestions_count: result.suggestions.len(),
        }
    }

    pub fn delta(&self) -> i16 {
        i16::from(self.score_after) - i16::from(self.score_before)
    }
}

pub struct RunStore {
    path: PathBuf,
}

impl RunStore {
    pub fn open_default() -> Self {
        Self::at(Config::data_dir().join("runs.jsonl"))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, run: &AnalyzeRun) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(run)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Load every stored run. Malformed lines are skipped with a warning
    /// rather than poisoning the whole history.
    pub fn load_all(&self) -> Result<Vec<AnalyzeRun>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let mut runs = Vec::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AnalyzeRun>(line) {
                Ok(run) => runs.push(run),
                Err(e) => log::warn!("skipping malformed run on line {}: {}", i + 1, e),
            }
        }
        Ok(runs)
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                ResumeMatcherError::Store(format!("failed to clear run history: {}", e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_run(before: u8, after: u8) -> AnalyzeRun {
        AnalyzeRun {
            created_at: Utc::now(),
            mode: Mode::Focused,
            score_before: before,
            score_after: after,
            ats_fail_count: 1,
            suggestions_count: 5,
        }
    }

    #[test]
    fn test_append_and_load() {
        let dir = tempdir().unwrap();
        let store = RunStore::at(dir.path().join("runs.jsonl"));
        store.append(&sample_run(60, 72)).unwrap();
        store.append(&sample_run(55, 55)).unwrap();

        let runs = store.load_all().unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].delta(), 12);
        assert_eq!(runs[1].delta(), 0);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = RunStore::at(dir.path().join("nope.jsonl"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");
        let store = RunStore::at(&path);
        store.append(&sample_run(40, 50)).unwrap();
        std::fs::write(
            &path,
            format!("{}\nnot json\n", std::fs::read_to_string(&path).unwrap().trim()),
        )
        .unwrap();
        assert_eq!(store.load_all().unwrap().len(), 1);
    }
}
