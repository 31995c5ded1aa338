//! Stopword filtering for search queries.
//!
//! Filters common words from query text before it reaches the index. Uses
//! the `stop-words` crate for a comprehensive English list (~500 words) and
//! supports:
//!
//! - Allowlist: words to preserve even if they are stopwords
//! - Custom stopwords: additional words to filter
//! - Graceful fallback: if every term is filtered, the original query is
//!   used unchanged to avoid empty searches
//!
//! Specification prose is full of connective words ("should", "when",
//! "then") that double as meaningful query terms in this domain; configure
//! an allowlist via [`SearchConfig::allowlist`] when they matter.

use std::collections::HashSet;

use stop_words::{LANGUAGE, get};

use crate::config::SearchConfig;

/// Stopword filter for query preprocessing.
pub struct StopwordFilter {
    stopwords: HashSet<String>,
    allowlist: HashSet<String>,
    enabled: bool,
}

impl StopwordFilter {
    /// Create a new stopword filter from configuration.
    pub fn new(config: &SearchConfig) -> Self {
        let mut stopwords: HashSet<String> = get(LANGUAGE::English)
            .iter()
            .map(|s| s.to_lowercase())
            .collect();

        for word in &config.custom_stopwords {
            stopwords.insert(word.to_lowercase());
        }

        // Allowlist stays case-sensitive
        let allowlist: HashSet<String> = config.allowlist.iter().cloned().collect();

        Self {
            stopwords,
            allowlist,
            enabled: config.stopwords_enabled,
        }
    }

    /// Create a disabled filter (passes all words through).
    pub fn disabled() -> Self {
        Self {
            stopwords: HashSet::new(),
            allowlist: HashSet::new(),
            enabled: false,
        }
    }

    /// Filter stopwords from a query string.
    ///
    /// Returns the filtered query, or the original query when filtering
    /// would leave nothing to search for.
    pub fn filter(&self, query: &str) -> String {
        if !self.enabled {
            return query.to_string();
        }

        let filtered: Vec<&str> = query
            .split_whitespace()
            .filter(|word| !self.is_stopword(word))
            .collect();

        if filtered.is_empty() {
            query.to_string()
        } else {
            filtered.join(" ")
        }
    }

    /// Check if a word is a stopword.
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.allowlist.contains(word) {
            return false;
        }

        self.stopwords.contains(&word.to_lowercase())
    }

    /// Check if filtering is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl std::fmt::Debug for StopwordFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopwordFilter")
            .field("enabled", &self.enabled)
            .field("stopword_count", &self.stopwords.len())
            .field("allowlist_count", &self.allowlist.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_removes_common_words() {
        let filter = StopwordFilter::new(&SearchConfig::default());
        assert_eq!(filter.filter("what is a checkout"), "checkout");
    }

    #[test]
    fn test_filter_preserves_allowlisted_words() {
        let config = SearchConfig {
            allowlist: vec!["when".to_string(), "then".to_string()],
            ..Default::default()
        };
        let filter = StopwordFilter::new(&config);
        assert!(!filter.is_stopword("when"));
        assert!(!filter.is_stopword("then"));
    }

    #[test]
    fn test_filter_falls_back_when_everything_is_filtered() {
        let filter = StopwordFilter::new(&SearchConfig::default());
        assert_eq!(filter.filter("what is the"), "what is the");
    }

    #[test]
    fn test_custom_stopwords() {
        let config = SearchConfig {
            custom_stopwords: vec!["scenario".to_string()],
            ..Default::default()
        };
        let filter = StopwordFilter::new(&config);
        assert!(filter.is_stopword("scenario"));
        assert!(filter.is_stopword("SCENARIO"));
    }

    #[test]
    fn test_disabled_filter_passes_through() {
        let filter = StopwordFilter::disabled();
        assert!(!filter.is_enabled());
        assert_eq!(filter.filter("what is a checkout"), "what is a checkout");
    }
}
