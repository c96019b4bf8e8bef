//! Retrieval source contracts
//!
//! The orchestrator talks to its three retrieval methods through these
//! traits. The in-crate indices implement them; tests substitute mocks.
//! Sources are read-only and order-independent, so the orchestrator may
//! query them from parallel worker threads.

use crate::catalog::IndicatorId;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Source-side failure, recovered locally by the orchestrator
#[non_exhaustive]
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// The source could not answer (uninitialized index, backend error, ...)
    #[error("Retrieval source unavailable: {0}")]
    Unavailable(String),
    /// The source did not answer within the orchestrator's bounded wait
    #[error("Retrieval source timed out")]
    Timeout,
}

// ============================================================================
// SOURCE TRAITS
// ============================================================================

/// Semantic retrieval over precomputed catalog embeddings.
///
/// Returns up to `top_n` `(id, similarity)` pairs, best first.
pub trait VectorSource: Send + Sync {
    /// Query by embedding
    fn search(
        &self,
        embedding: &[f32],
        top_n: usize,
    ) -> Result<Vec<(IndicatorId, f32)>, SourceError>;
}

/// Lexical retrieval over tokenized searchable text.
///
/// Returns up to `top_n` `(id, relevance)` pairs, best first. Scores are
/// method-specific raw magnitudes; the normalizer rescales them before
/// fusion.
pub trait KeywordSource: Send + Sync {
    /// Query by token list
    fn search(
        &self,
        tokens: &[String],
        top_n: usize,
    ) -> Result<Vec<(IndicatorId, f32)>, SourceError>;
}
