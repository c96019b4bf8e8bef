//! Query Context
//!
//! Everything derived from the query string, computed once per search and
//! read-only afterwards.

// ============================================================================
// TOKENIZATION
// ============================================================================

/// Lowercase whitespace tokenization.
///
/// Used for both the keyword indices and query tokens so the two sides agree.
/// CJK text without spaces stays a single token; recall for such queries
/// comes from the vector channel and from substring containment in the
/// reranker.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| t.to_lowercase())
        .collect()
}

// ============================================================================
// QUERY CONTEXT
// ============================================================================

/// Per-query derived state
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// The query as the caller supplied it
    pub raw: String,
    /// Trimmed query, guaranteed non-empty by the orchestrator
    pub trimmed: String,
    /// Lowercase whitespace tokens of the trimmed query
    pub tokens: Vec<String>,
    /// Query embedding; `None` when the embedding provider failed and the
    /// vector channel is disabled for this query
    pub embedding: Option<Vec<f32>>,
}

impl QueryContext {
    /// Derive the context from a raw query string
    pub fn new(raw: &str, embedding: Option<Vec<f32>>) -> Self {
        let trimmed = raw.trim().to_string();
        let tokens = tokenize(&trimmed);
        Self {
            raw: raw.to_string(),
            trimmed,
            tokens,
            embedding,
        }
    }

    /// Lowercased trimmed query, the needle for containment scoring
    pub fn lowercase(&self) -> String {
        self.trimmed.to_lowercase()
    }
}

// ============================================================================
// TESTS
// ============================================================================
