//! Curated domain vocabulary: multi-word phrases, technology names, and a
//! small synonym map. Modeled as one flattened data asset loaded once, so
//! the matchers stay independent of how large the lists grow. An external
//! JSON document with the same three fields can replace the built-ins
//! (industry-config style).

use crate::error::{Result, ResumeMatcherError};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Domain phrase/technology/synonym lists plus a prebuilt phrase scanner.
pub struct Taxonomy {
    phrases: HashSet<String>,
    tech: HashSet<String>,
    synonyms: HashMap<String, Vec<String>>,
    scanner: AhoCorasick,
    scan_terms: Vec<String>,
}

/// Serialized form of a taxonomy override file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    #[serde(default)]
    pub phrases: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub synonyms: HashMap<String, Vec<String>>,
}

impl Taxonomy {
    pub fn from_config(config: TaxonomyConfig) -> Result<Self> {
        let phrases: HashSet<String> = config
            .phrases
            .iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        let tech: HashSet<String> = config
            .tech
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let synonyms = config
            .synonyms
            .into_iter()
            .map(|(k, vs)| {
                (
                    k.to_lowercase(),
                    vs.into_iter().map(|v| v.to_lowercase()).collect(),
                )
            })
            .collect();

        // One scanner over both lists; longest match wins so "machine
        // learning engineer" is not shadowed by "machine learning".
        let mut scan_terms: Vec<String> = phrases.union(&tech).cloned().collect();
        scan_terms.sort();
        let scanner = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&scan_terms)
            .map_err(|e| {
                ResumeMatcherError::Configuration(format!("Failed to build phrase scanner: {}", e))
            })?;

        Ok(Self {
            phrases,
            tech,
            synonyms,
            scanner,
            scan_terms,
        })
    }

    /// Load a taxonomy override from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TaxonomyConfig = serde_json::from_str(&content)?;
        Self::from_config(config)
    }

    pub fn is_phrase(&self, term: &str) -> bool {
        self.phrases.contains(term)
    }

    pub fn is_tech(&self, term: &str) -> bool {
        self.tech.contains(term)
    }

    /// All phrase/tech terms found as substrings of the normalized text,
    /// deduplicated, in first-seen order.
    pub fn scan(&self, normalized_text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for mat in self.scanner.find_iter(normalized_text) {
            let term = &self.scan_terms[mat.pattern().as_usize()];
            if seen.insert(term.clone()) {
                found.push(term.clone());
            }
        }
        found
    }

    /// A term plus its synonym variants, canonical spelling first.
    pub fn expand(&self, term: &str) -> Vec<String> {
        let key = term.to_lowercase();
        let mut out = vec![key.clone()];
        if let Some(vars) = self.synonyms.get(&key) {
            for v in vars {
                if !out.contains(v) {
                    out.push(v.clone());
                }
            }
        }
        out
    }

    pub fn term_count(&self) -> usize {
        self.scan_terms.len()
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::from_config(TaxonomyConfig {
            phrases: default_phrases(),
            tech: default_tech(),
            synonyms: default_synonyms(),
        })
        .expect("built-in taxonomy must build")
    }
}

fn default_phrases() -> Vec<String> {
    [
        // Tech / software
        "machine learning",
        "deep learning",
        "data analysis",
        "data science",
        "data engineering",
        "data visualization",
        "natural language processing",
        "neural networks",
        "statistical modeling",
        "feature engineering",
        "model deployment",
        "prompt engineering",
        "information retrieval",
        "api design",
        "responsive design",
        "unit testing",
        "test automation",
        "integration testing",
        "continuous integration",
        "continuous delivery",
        "version control",
        "code review",
        "cloud computing",
        "distributed systems",
        "system design",
        "performance tuning",
        "technical documentation",
        "site reliability",
        "incident response",
        "infrastructure as code",
        "observability",
        "microservices",
        "agile methodologies",
        "scrum",
        "kanban",
        // Product / project
        "project management",
        "product management",
        "product roadmap",
        "requirements gathering",
        "stakeholder management",
        "cross-functional collaboration",
        "user research",
        "a/b testing",
        "go-to-market strategy",
        "backlog grooming",
        "sprint planning",
        "release management",
        "risk management",
        "change management",
        "vendor management",
        // Sales / marketing / customer
        "customer success",
        "customer service",
        "account management",
        "lead generation",
        "pipeline management",
        "sales forecasting",
        "business development",
        "relationship building",
        "cold calling",
        "contract negotiation",
        "market research",
        "content marketing",
        "email marketing",
        "social media marketing",
        "search engine optimization",
        "brand management",
        "campaign management",
        "crm administration",
        "customer retention",
        "upselling",
        // Finance / analysis
        "financial analysis",
        "financial reporting",
        "budget management",
        "forecasting",
        "variance analysis",
        "accounts payable",
        "accounts receivable",
        "general ledger",
        "month-end close",
        "internal controls",
        "regulatory compliance",
        "audit support",
        "cost reduction",
        "revenue growth",
        // Healthcare
        "patient care",
        "patient education",
        "care coordination",
        "clinical documentation",
        "electronic health records",
        "medication administration",
        "treatment planning",
        "infection control",
        "hipaa compliance",
        "vital signs",
        "case management",
        "discharge planning",
        "quality improvement",
        "telehealth",
        // Admin / office
        "calendar management",
        "travel coordination",
        "expense reporting",
        "data entry",
        "records management",
        "meeting coordination",
        "office administration",
        "executive support",
        "front desk",
        "inventory management",
        "report preparation",
        "document management",
        "scheduling",
        "event planning",
        // Trades / logistics / operations
        "preventive maintenance",
        "equipment repair",
        "quality control",
        "safety compliance",
        "osha compliance",
        "blueprint reading",
        "supply chain",
        "warehouse operations",
        "route planning",
        "fleet management",
        "forklift operation",
        "process improvement",
        "lean manufacturing",
        "six sigma",
        "shift scheduling",
        "vendor coordination",
        // Leadership / general professional
        "team leadership",
        "people management",
        "mentoring",
        "coaching",
        "public speaking",
        "conflict resolution",
        "decision making",
        "problem solving",
        "critical thinking",
        "time management",
        "strategic planning",
        "performance reviews",
        "onboarding",
        "training development",
        "knowledge transfer",
        "written communication",
        "presentation skills",
        "negotiation",
        "budget planning",
        "kpi tracking",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_tech() -> Vec<String> {
    [
        "python",
        "javascript",
        "typescript",
        "java",
        "c++",
        "c#",
        "rust",
        "golang",
        "ruby",
        "php",
        "swift",
        "kotlin",
        "scala",
        "sql",
        "react",
        "angular",
        "vue",
        "svelte",
        "next.js",
        "node.js",
        "express",
        "django",
        "flask",
        "spring",
        "rails",
        "graphql",
        "rest",
        "grpc",
        "html",
        "css",
        "tailwind",
        "pandas",
        "numpy",
        "scikit-learn",
        "spacy",
        "transformers",
        "pytorch",
        "tensorflow",
        "spark",
        "kafka",
        "airflow",
        "docker",
        "kubernetes",
        "terraform",
        "ansible",
        "jenkins",
        "ci/cd",
        "aws",
        "gcp",
        "azure",
        "linux",
        "bash",
        "git",
        "github",
        "gitlab",
        "postgresql",
        "mysql",
        "mongodb",
        "redis",
        "elasticsearch",
        "sqlite",
        "snowflake",
        "tableau",
        "power bi",
        "excel",
        "jira",
        "confluence",
        "salesforce",
        "hubspot",
        "jest",
        "cypress",
        "pytest",
        "selenium",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_synonyms() -> HashMap<String, Vec<String>> {
    [
        ("javascript", vec!["js", "node", "node.js", "nodejs"]),
        ("python", vec!["py"]),
        ("react", vec!["reactjs", "react.js"]),
        ("typescript", vec!["ts"]),
        ("postgres", vec!["postgresql", "psql"]),
        ("postgresql", vec!["postgres", "psql"]),
        ("aws", vec!["amazon web services"]),
        ("gcp", vec!["google cloud", "google cloud platform"]),
        ("excel", vec!["spreadsheets"]),
        ("kpi", vec!["key performance indicators"]),
        ("etl", vec!["extract transform load"]),
        ("unit testing", vec!["unit tests", "unit test"]),
        ("ci/cd", vec!["continuous integration", "continuous delivery"]),
        ("golang", vec!["go"]),
        ("kubernetes", vec!["k8s"]),
    ]
    .into_iter()
    .map(|(k, vs)| {
        (
            k.to_string(),
            vs.into_iter().map(String::from).collect::<Vec<_>>(),
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_builds() {
        let tax = Taxonomy::default();
        assert!(tax.term_count() > 150);
        assert!(tax.is_phrase("unit testing"));
        assert!(tax.is_tech("ci/cd"));
        assert!(!tax.is_tech("unit testing"));
    }

    #[test]
    fn test_scan_finds_phrases_in_normalized_text() {
        let tax = Taxonomy::default();
        let found = tax.scan("react developer with ci/cd and unit testing experience");
        assert!(found.contains(&"react".to_string()));
        assert!(found.contains(&"ci/cd".to_string()));
        assert!(found.contains(&"unit testing".to_string()));
    }

    #[test]
    fn test_expand_synonyms() {
        let tax = Taxonomy::default();
        let vars = tax.expand("JavaScript");
        assert_eq!(vars[0], "javascript");
        assert!(vars.contains(&"node.js".to_string()));
        // Unknown terms expand to themselves only
        assert_eq!(tax.expand("zig"), vec!["zig".to_string()]);
    }

    #[test]
    fn test_config_round_trip() {
        let config = TaxonomyConfig {
            phrases: vec!["Widget Polishing".to_string()],
            tech: vec!["cobol".to_string()],
            synonyms: [("cobol".to_string(), vec!["cob".to_string()])]
                .into_iter()
                .collect(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: TaxonomyConfig = serde_json::from_str(&json).unwrap();
        let tax = Taxonomy::from_config(parsed).unwrap();
        assert!(tax.is_phrase("widget polishing"));
        assert!(tax.is_tech("cobol"));
        assert_eq!(tax.expand("cobol"), vec!["cobol", "cob"]);
    }
}
