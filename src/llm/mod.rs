//! Optional generative enrichment of the deterministic analysis.

pub mod client;
pub mod prompts;
pub mod response;

pub use client::LlmClient;
pub use response::{RawAnalysis, RawRewrite};
