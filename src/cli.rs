//! CLI interface for the resume matcher

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Deterministic resume and job description matching tool")]
#[command(
    long_about = "Score a resume against a job description using keyword coverage, token similarity, and ATS hygiene checks, with optional AI-generated suggestions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Job titles to match against the resume (repeatable)
        #[arg(short, long)]
        title: Vec<String>,

        /// Analysis mode: focused, comprehensive
        #[arg(short, long, default_value = "focused")]
        mode: String,

        /// Skip the generative pass (deterministic pipeline only)
        #[arg(long)]
        no_llm: bool,

        /// Variant id steering the generative focus angle (defaults to the
        /// current timestamp, so every run gets a fresh angle)
        #[arg(long)]
        variant: Option<String>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Record this run in the history store
        #[arg(long)]
        save: bool,
    },

    /// Run only the ATS hygiene checks on a resume
    Ats {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Summarize the stored run history
    Report {
        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Clear the stored history instead of reporting
        #[arg(long)]
        clear: bool,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert!(parse_output_format("Console").is_ok());
        assert!(parse_output_format("json").is_ok());
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_analyze_accepts_pinned_variant() {
        let cli = Cli::try_parse_from([
            "resume-matcher",
            "analyze",
            "--resume",
            "cv.txt",
            "--job",
            "jd.txt",
            "--variant",
            "v7",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { variant, .. } => assert_eq!(variant.as_deref(), Some("v7")),
            _ => panic!("expected analyze command"),
        }
        let cli = Cli::try_parse_from([
            "resume-matcher",
            "analyze",
            "--resume",
            "cv.txt",
            "--job",
            "jd.txt",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { variant, .. } => assert!(variant.is_none()),
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_extension_validation() {
        assert!(validate_file_extension(&PathBuf::from("cv.pdf"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(&PathBuf::from("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(&PathBuf::from("cv"), &["pdf"]).is_err());
    }
}
