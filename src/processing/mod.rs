//! Deterministic text-analysis pipeline: normalization, keyword
//! extraction, coverage, scoring, ATS checks, suggestions, and diffs.

pub mod analyzer;
pub mod ats;
pub mod coverage;
pub mod diff;
pub mod keywords;
pub mod rewrites;
pub mod score;
pub mod sections;
pub mod similarity;
pub mod suggestions;
pub mod taxonomy;
pub mod text_processor;

pub use analyzer::{AnalysisResult, Analyzer, Mode, RewritePair};
pub use ats::{ats_checks, hygiene_score, AtsCheck, AtsStatus};
pub use coverage::{coverage, CoverageResult};
pub use diff::{diff, DiffKind, DiffOp};
pub use keywords::{build_pool, PoolEntry};
pub use score::{final_score, ScoreInputs, ScoreWeights};
pub use sections::{parse_sections, stringify, ParsedResume};
pub use similarity::token_cosine;
pub use taxonomy::Taxonomy;
