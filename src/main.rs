//! Resume matcher: deterministic resume and job description matching tool

use clap::Parser;
use log::{error, info, warn};
use std::process;

use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::InputManager;
use resume_matcher::llm::{prompts, LlmClient};
use resume_matcher::output::{
    format_summary, summarize, ConsoleFormatter, JsonFormatter, OutputFormatter,
};
use resume_matcher::processing::ats::ats_checks;
use resume_matcher::processing::keywords::build_pool;
use resume_matcher::processing::score::ScoreWeights;
use resume_matcher::processing::taxonomy::Taxonomy;
use resume_matcher::processing::{Analyzer, Mode};
use resume_matcher::store::{AnalyzeRun, RunStore};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            title,
            mode,
            no_llm,
            variant,
            detailed,
            output,
            save,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| ResumeMatcherError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| ResumeMatcherError::InvalidInput(format!("Job file: {}", e)))?;
            let output_format =
                cli::parse_output_format(&output).map_err(ResumeMatcherError::InvalidInput)?;
            let mode: Mode = mode.parse()?;

            info!("Analyzing {} against {}", resume.display(), job.display());

            let mut input = InputManager::new();
            let resume_text = input.extract_text(&resume).await?;
            let jd_text = input.extract_text(&job).await?;

            let analyzer = build_analyzer(&config)?;
            let mut result = analyzer.analyze(&resume_text, &jd_text, &title, mode)?;

            if !no_llm {
                match config.api_key() {
                    Some(api_key) => {
                        let client = LlmClient::new(&config.llm, api_key)?;
                        let pool =
                            build_pool(&jd_text, analyzer.taxonomy(), config.processing.top_unigram_cap);
                        let variant =
                            variant.unwrap_or_else(|| chrono::Utc::now().timestamp().to_string());
                        let prompt = prompts::analysis_prompt(
                            &resume_text,
                            &jd_text,
                            &pool,
                            &result.coverage.missing,
                            &variant,
                            config.processing.max_suggestions,
                        );
                        match client.analyze(&prompt).await {
                            Ok(raw) => {
                                analyzer.merge_generated(&mut result, raw, &resume_text, &jd_text)
                            }
                            Err(e) => warn!("Generative pass failed, using local analysis: {}", e),
                        }
                    }
                    None => info!(
                        "No API key in ${}, running deterministic pipeline only",
                        config.llm.api_key_env
                    ),
                }
            }

            let formatted = match output_format {
                OutputFormat::Console => ConsoleFormatter::new(config.output.color_output, detailed)
                    .format_result(&result)?,
                OutputFormat::Json => JsonFormatter::new(true).format_result(&result)?,
            };
            println!("{}", formatted);

            if save {
                let store = RunStore::open_default();
                store.append(&AnalyzeRun::from_result(&result))?;
                info!("Run recorded in {}", store.path().display());
            }
            Ok(())
        }

        Commands::Ats { resume, output } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| ResumeMatcherError::InvalidInput(format!("Resume file: {}", e)))?;
            let output_format =
                cli::parse_output_format(&output).map_err(ResumeMatcherError::InvalidInput)?;

            let mut input = InputManager::new();
            let resume_text = input.extract_text(&resume).await?;
            let checks = ats_checks(&resume_text);

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&checks)?),
                OutputFormat::Console => {
                    println!("🧪 ATS hygiene checks for {}", resume.display());
                    for check in &checks {
                        let icon = match check.status {
                            resume_matcher::processing::AtsStatus::Pass => "✅",
                            resume_matcher::processing::AtsStatus::Warn => "⚠️",
                            resume_matcher::processing::AtsStatus::Fail => "❌",
                        };
                        println!("  {} {}", icon, check.text);
                        if check.status != resume_matcher::processing::AtsStatus::Pass
                            && !check.tip.is_empty()
                        {
                            println!("     {}", check.tip);
                        }
                    }
                }
            }
            Ok(())
        }

        Commands::Report { output, clear } => {
            let store = RunStore::open_default();
            if clear {
                store.clear()?;
                println!("Run history cleared.");
                return Ok(());
            }
            let runs = store.load_all()?;
            let summary = summarize(&runs);
            match cli::parse_output_format(&output).map_err(ResumeMatcherError::InvalidInput)? {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                OutputFormat::Console => {
                    println!("{}", format_summary(&summary, config.output.color_output))
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let text = toml::to_string_pretty(&config).map_err(|e| {
                    ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", text);
                Ok(())
            }
            ConfigAction::Reset => {
                Config::reset()?;
                println!("Configuration reset to defaults.");
                Ok(())
            }
        },
    }
}

fn build_analyzer(config: &Config) -> Result<Analyzer> {
    let taxonomy = match &config.taxonomy_path {
        Some(path) => Taxonomy::from_path(path)?,
        None => Taxonomy::default(),
    };
    let weights: ScoreWeights = config.score_weights();
    Ok(Analyzer::new(taxonomy, weights))
}
