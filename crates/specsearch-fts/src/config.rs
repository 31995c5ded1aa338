//! Search configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for query execution.
///
/// All fields have sensible defaults; deserialization fills in whatever a
/// caller leaves out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default number of ranked hits to return.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Highlight fragment length in characters.
    #[serde(default = "default_snippet_length")]
    pub snippet_length: usize,

    /// Number of tag facet buckets to report (most frequent first).
    #[serde(default = "default_facet_count")]
    pub facet_count: usize,

    /// Enable stopword filtering of query terms.
    #[serde(default = "default_true")]
    pub stopwords_enabled: bool,

    /// Additional words to filter beyond the built-in English list.
    #[serde(default)]
    pub custom_stopwords: Vec<String>,

    /// Words to preserve even if they are stopwords.
    ///
    /// Specification prose leans on words like "should", "when", and
    /// "then" that general-purpose stopword lists drop; allowlist them if
    /// they matter for your queries.
    #[serde(default)]
    pub allowlist: Vec<String>,
}

fn default_limit() -> usize {
    10
}

fn default_snippet_length() -> usize {
    200
}

fn default_facet_count() -> usize {
    5
}

fn default_true() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            snippet_length: default_snippet_length(),
            facet_count: default_facet_count(),
            stopwords_enabled: default_true(),
            custom_stopwords: Vec::new(),
            allowlist: Vec::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
