//! End-to-end analysis pipeline: keyword pool, coverage, similarity,
//! final score, ATS checks, suggestions, and bullet rewrites.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ResumeMatcherError};
use crate::processing::ats::{ats_checks, fail_count, hygiene_score, AtsCheck, AtsStatus};
use crate::processing::coverage::{coverage, CoverageResult};
use crate::processing::diff::{diff, DiffOp};
use crate::processing::keywords::{
    build_pool, top_bigrams, top_unigrams, PoolEntry, DEFAULT_UNIGRAM_CAP,
};
use crate::processing::rewrites::{extract_bullets, needs_rewrite, rewrite_bullet};
use crate::processing::sections::parse_sections;
use crate::processing::score::{final_score, title_match, ScoreInputs, ScoreWeights};
use crate::processing::similarity::token_cosine;
use crate::processing::suggestions::{rank_suggestions, RankContext};
use crate::processing::taxonomy::Taxonomy;
use crate::processing::text_processor::tokenize;

/// How much material the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// A handful of high-impact rewrites.
    Focused,
    /// Every bullet that qualifies, up to the hard cap.
    Comprehensive,
}

impl Mode {
    pub fn rewrite_cap(self) -> usize {
        match self {
            Mode::Focused => 10,
            Mode::Comprehensive => 24,
        }
    }

    /// How many suggestions survive ranking. Clamped so a future config
    /// override can never starve or flood the list.
    pub fn suggestion_cap(self) -> usize {
        let cap = match self {
            Mode::Focused => 10,
            Mode::Comprehensive => 24,
        };
        cap.clamp(6, 30)
    }
}

impl std::str::FromStr for Mode {
    type Err = ResumeMatcherError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "focused" => Ok(Mode::Focused),
            "comprehensive" => Ok(Mode::Comprehensive),
            other => Err(ResumeMatcherError::InvalidInput(format!(
                "unknown mode '{other}', expected 'focused' or 'comprehensive'"
            ))),
        }
    }
}

/// One rewritten bullet with its token-level diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewritePair {
    pub original: String,
    pub suggestion: String,
    pub diff: Vec<DiffOp>,
}

/// Full output of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    /// Score recomputed as if every rewrite were applied.
    pub projected_score: u8,
    pub coverage: CoverageResult,
    pub similarity: f32,
    pub title_match: f32,
    pub ats: Vec<AtsCheck>,
    pub suggestions: Vec<String>,
    pub rewrites: Vec<RewritePair>,
    pub mode: Mode,
}

impl AnalysisResult {
    pub fn ats_fail_count(&self) -> usize {
        fail_count(&self.ats)
    }
}

/// Deterministic analysis engine. Holds the taxonomy and scoring knobs so
/// repeated runs share the compiled keyword scanner.
pub struct Analyzer {
    taxonomy: Taxonomy,
    weights: ScoreWeights,
    unigram_cap: usize,
}

impl Analyzer {
    pub fn new(taxonomy: Taxonomy, weights: ScoreWeights) -> Self {
        Self {
            taxonomy,
            weights,
            unigram_cap: DEFAULT_UNIGRAM_CAP,
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Run the full deterministic pipeline. `titles` are the job titles to
    /// match against the resume; an empty slice zeroes that component.
    pub fn analyze(
        &self,
        resume_text: &str,
        jd_text: &str,
        titles: &[String],
        mode: Mode,
    ) -> Result<AnalysisResult> {
        validate_input("resume", resume_text)?;
        validate_input("job description", jd_text)?;

        log::debug!(
            "analyzing resume ({} chars) against JD ({} chars), mode {:?}",
            resume_text.len(),
            jd_text.len(),
            mode
        );

        let pool = build_pool(jd_text, &self.taxonomy, self.unigram_cap);
        let cov = coverage(&pool, resume_text, &self.taxonomy);
        let resume_tokens = tokenize(resume_text);
        let jd_tokens = tokenize(jd_text);
        let similarity = token_cosine(&resume_tokens, &jd_tokens);
        let title = title_match(titles, resume_text);
        let checks = ats_checks(resume_text);
        let hygiene = hygiene_score(&checks);

        let inputs = ScoreInputs {
            coverage_ratio: cov.ratio,
            similarity,
            title_match: title,
            ats_hygiene: hygiene,
        };
        let score = final_score(&inputs, &self.weights);

        let rewrites = self.build_rewrites(resume_text, &pool, &cov.missing, mode);
        let suggestions = self.build_suggestions(resume_text, jd_text, &cov, &checks, mode);

        let projected_score =
            self.project_score(resume_text, &rewrites, &pool, similarity, title, hygiene);

        log::info!(
            "analysis complete: score {}, projected {}, {} missing terms, {} rewrites",
            score,
            projected_score,
            cov.missing.len(),
            rewrites.len()
        );

        Ok(AnalysisResult {
            score,
            projected_score,
            coverage: cov,
            similarity,
            title_match: title,
            ats: checks,
            suggestions,
            rewrites,
            mode,
        })
    }

    /// Fold a generative response into a finished local result. Model
    /// suggestions are re-ranked together with the local ones; model
    /// rewrites are kept only when their `original` line actually appears
    /// in the resume, so hallucinated bullets never reach the diff view.
    pub fn merge_generated(
        &self,
        result: &mut AnalysisResult,
        raw: crate::llm::response::RawAnalysis,
        resume_text: &str,
        jd_text: &str,
    ) {
        let mut combined: Vec<String> = raw.suggestions;
        combined.extend(result.suggestions.iter().cloned());
        let ctx = RankContext {
            jd_unigrams: top_unigrams(jd_text, 20),
            jd_bigrams: top_bigrams(jd_text, 20),
            missing_terms: result.coverage.missing.clone(),
        };
        result.suggestions = rank_suggestions(&combined, &ctx, result.mode.suggestion_cap());

        // Model rewrites go ahead of the local ones, in the order the model
        // produced them.
        let mut accepted: Vec<RewritePair> = Vec::new();
        for rewrite in raw.rewrites {
            let original = rewrite.original.trim();
            if original.eq_ignore_ascii_case(rewrite.suggestion.trim()) {
                continue;
            }
            if original.is_empty() || !resume_text.contains(original) {
                log::debug!("dropping rewrite for unknown line: {:?}", original);
                continue;
            }
            if result.rewrites.iter().any(|r| r.original == original)
                || accepted.iter().any(|r| r.original == original)
            {
                continue;
            }
            let ops = diff(original, rewrite.suggestion.trim());
            accepted.push(RewritePair {
                original: original.to_string(),
                suggestion: rewrite.suggestion.trim().to_string(),
                diff: ops,
            });
        }
        accepted.extend(result.rewrites.drain(..));
        result.rewrites = accepted;
        result.rewrites.truncate(result.mode.rewrite_cap());

        let pool = build_pool(jd_text, &self.taxonomy, self.unigram_cap);
        result.projected_score = self.project_score(
            resume_text,
            &result.rewrites,
            &pool,
            result.similarity,
            result.title_match,
            hygiene_score(&result.ats),
        );
    }

    fn build_rewrites(
        &self,
        resume_text: &str,
        pool: &[PoolEntry],
        missing: &[String],
        mode: Mode,
    ) -> Vec<RewritePair> {
        let mut out = Vec::new();
        for bullet in extract_bullets(resume_text) {
            if !needs_rewrite(&bullet, pool) {
                continue;
            }
            let suggestion = rewrite_bullet(&bullet, missing);
            if suggestion.eq_ignore_ascii_case(&bullet) {
                continue;
            }
            let ops = diff(&bullet, &suggestion);
            out.push(RewritePair {
                original: bullet,
                suggestion,
                diff: ops,
            });
            if out.len() >= mode.rewrite_cap() {
                break;
            }
        }
        out
    }

    /// Locally generated advice: one line per high-weight missing term plus
    /// every non-passing ATS tip, ranked against the JD vocabulary. Missing
    /// structural sections get their own line.
    fn build_suggestions(
        &self,
        resume_text: &str,
        jd_text: &str,
        cov: &CoverageResult,
        checks: &[AtsCheck],
        mode: Mode,
    ) -> Vec<String> {
        let mut raw: Vec<String> = cov
            .missing
            .iter()
            .map(|term| {
                format!("Add \"{term}\" to your Skills section or work it into a relevant bullet.")
            })
            .collect();

        let parsed = parse_sections(resume_text);
        if !parsed.sections.contains_key("skills") {
            raw.push(
                "Add a dedicated Skills section listing the role's key technologies.".to_string(),
            );
        }
        if !parsed.sections.contains_key("summary") {
            raw.push("Add a short summary tailored to the job description.".to_string());
        }
        for check in checks {
            if check.status != AtsStatus::Pass && !check.tip.is_empty() {
                raw.push(check.tip.clone());
            }
        }

        let ctx = RankContext {
            jd_unigrams: top_unigrams(jd_text, 20),
            jd_bigrams: top_bigrams(jd_text, 20),
            missing_terms: cov.missing.clone(),
        };
        rank_suggestions(&raw, &ctx, mode.suggestion_cap())
    }

    /// Rescore against the resume with all rewritten bullets appended, so
    /// the caller can show a before/after delta.
    fn project_score(
        &self,
        resume_text: &str,
        rewrites: &[RewritePair],
        pool: &[PoolEntry],
        similarity: f32,
        title: f32,
        hygiene: f32,
    ) -> u8 {
        if rewrites.is_empty() {
            let inputs = ScoreInputs {
                coverage_ratio: coverage(pool, resume_text, &self.taxonomy).ratio,
                similarity,
                title_match: title,
                ats_hygiene: hygiene,
            };
            return final_score(&inputs, &self.weights);
        }
        let mut amended = resume_text.to_string();
        for r in rewrites {
            amended.push('\n');
            amended.push_str(&r.suggestion);
        }
        let inputs = ScoreInputs {
            coverage_ratio: coverage(pool, &amended, &self.taxonomy).ratio,
            similarity,
            title_match: title,
            ats_hygiene: hygiene,
        };
        final_score(&inputs, &self.weights)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Taxonomy::default(), ScoreWeights::default())
    }
}

fn validate_input(label: &str, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ResumeMatcherError::InvalidInput(format!(
            "{label} text is empty"
        )));
    }
    Ok(())
}
