//! Text normalization and tokenization shared by every scoring component.
//!
//! The engine works on a lowercase ASCII allow-list: anything outside
//! `[a-z0-9+#./-]` and whitespace is flattened to a space, so terms like
//! "ci/cd", "c++" and "node.js" survive intact while punctuation noise
//! does not. All functions here are pure and never fail.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Minimum token length kept by [`tokenize`]. Anything shorter is almost
/// always a function word or an artifact of punctuation stripping.
const MIN_TOKEN_LEN: usize = 3;

/// Lowercase and flatten everything outside the allow-list to spaces.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase()
                || c.is_ascii_digit()
                || matches!(c, '+' | '#' | '.' | '/' | '-')
                || c.is_whitespace()
            {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Collapse runs of whitespace to single spaces and trim the edges.
pub fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tokenize into lowercase content words: normalized, whitespace-split,
/// with short tokens and stopwords removed. Empty input yields an empty vec.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        // Sentence periods ride along on the last word; interior periods
        // ("node.js") are real term characters and stay.
        .map(|w| w.trim_end_matches('.'))
        .filter(|w| w.len() >= MIN_TOKEN_LEN && !stopwords().contains(*w))
        .map(|w| w.to_string())
        .collect()
}

/// Whitespace-delimited word count of the raw text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn stopwords() -> &'static HashSet<&'static str> {
    static STOPWORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOPWORDS.get_or_init(|| {
        [
            "the", "and", "for", "with", "you", "your", "are", "was", "were", "this", "that",
            "from", "have", "has", "had", "but", "not", "all", "any", "can", "will", "into",
            "onto", "our", "their", "they", "them", "these", "those", "what", "when", "where",
            "who", "how", "why", "would", "could", "should", "than", "then", "there", "been",
            "being", "about", "after", "before", "while", "each", "other", "more", "most",
            "some", "such", "also", "very", "over", "under",
        ]
        .into_iter()
        .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_allow_list() {
        assert_eq!(normalize("C++ & CI/CD!"), "c++   ci/cd ");
        assert_eq!(normalize("Node.js, React"), "node.js  react");
    }

    #[test]
    fn test_tokenize_filters_short_and_stopwords() {
        let tokens = tokenize("The developer will work with React and Node.js");
        assert!(tokens.contains(&"developer".to_string()));
        assert!(tokens.contains(&"react".to_string()));
        assert!(tokens.contains(&"node.js".to_string()));
        assert!(!tokens.contains(&"the".to_string()));
        assert!(!tokens.contains(&"and".to_string()));
        // "work" survives, two-letter fragments do not
        assert!(tokens.iter().all(|t| t.len() >= 3));
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t  ").is_empty());
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let text = "Senior Rust engineer building CI/CD pipelines";
        assert_eq!(tokenize(text), tokenize(text));
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("one two  three\nfour"), 4);
    }
}
