//! Resume matcher library: deterministic resume and job description
//! matching with keyword coverage, similarity scoring, ATS hygiene
//! checks, and optional generative enrichment.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod output;
pub mod processing;
pub mod store;

pub use config::Config;
pub use error::{Result, ResumeMatcherError};
pub use processing::{AnalysisResult, Analyzer, Mode};
