//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub processing: ProcessingConfig,
    pub llm: LlmConfig,
    pub output: OutputConfig,
    /// Optional JSON taxonomy overriding the built-in keyword lists.
    pub taxonomy_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub coverage_weight: f32,
    pub similarity_weight: f32,
    pub title_weight: f32,
    pub ats_weight: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// How many suggestions the generative prompt asks for. The final list
    /// is capped separately per analysis mode.
    pub max_suggestions: usize,
    pub top_unigram_cap: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub base_url: String,
    /// Environment variable holding the API key; never stored in the file.
    pub api_key_env: String,
    /// Tried in order until one answers.
    pub models: Vec<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig {
                coverage_weight: 0.45,
                similarity_weight: 0.35,
                title_weight: 0.10,
                ats_weight: 0.10,
            },
            processing: ProcessingConfig {
                max_suggestions: 8,
                top_unigram_cap: 50,
            },
            llm: LlmConfig {
                base_url: "https://openrouter.ai/api/v1".to_string(),
                api_key_env: "RESUME_MATCHER_API_KEY".to_string(),
                models: vec![
                    "deepseek/deepseek-chat-v3-0324:free".to_string(),
                    "qwen/qwen3-coder:free".to_string(),
                ],
                connect_timeout_secs: 10,
                request_timeout_secs: 60,
                temperature: 0.4,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
            taxonomy_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ResumeMatcherError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn reset() -> Result<Self> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    /// Directory for run history and other mutable state.
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
    }

    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.llm.api_key_env).ok().filter(|k| !k.is_empty())
    }

    pub fn score_weights(&self) -> crate::processing::score::ScoreWeights {
        crate::processing::score::ScoreWeights {
            coverage: self.scoring.coverage_weight,
            similarity: self.scoring.similarity_weight,
            title: self.scoring.title_weight,
            ats: self.scoring.ats_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let config = Config::default();
        let sum = config.scoring.coverage_weight
            + config.scoring.similarity_weight
            + config.scoring.title_weight
            + config.scoring.ats_weight;
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_roundtrip_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.llm.models, config.llm.models);
        assert_eq!(parsed.processing.max_suggestions, 8);
    }
}
