//! Embedding provider contract and similarity helpers

// ============================================================================
// CONSTANTS
// ============================================================================

/// Embedding dimensions after Matryoshka truncation
///
/// Truncated from 768 → 256 for 3x storage savings with only ~2% quality loss
/// (Matryoshka Representation Learning — the first N dims ARE the N-dim
/// representation).
pub const EMBEDDING_DIMENSIONS: usize = 256;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Embedding error types
#[non_exhaustive]
#[derive(Debug, Clone, thiserror::Error)]
pub enum EmbeddingError {
    /// Failed to initialize the embedding model
    #[error("Model initialization failed: {0}")]
    ModelInit(String),
    /// Failed to generate embedding
    #[error("Embedding generation failed: {0}")]
    EmbeddingFailed(String),
    /// Invalid input (empty, too long, etc.)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// ============================================================================
// PROVIDER TRAIT
// ============================================================================

/// The embedding collaborator seam.
///
/// Implementations must be deterministic enough that repeated calls with the
/// same text yield vectors with stable relative similarity ordering. The
/// orchestrator treats a failing provider as a disabled vector channel, not
/// a failed query.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text into a fixed-length vector
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Dimensionality of produced vectors
    fn dimensions(&self) -> usize;
}

// ============================================================================
// SIMILARITY FUNCTIONS
// ============================================================================

/// Truncate a vector to `EMBEDDING_DIMENSIONS` and L2-normalize it.
///
/// Valid for Matryoshka-trained models, where a truncated prefix is itself
/// a usable lower-dimensional embedding.
#[inline]
pub fn matryoshka_truncate(mut vector: Vec<f32>) -> Vec<f32> {
    if vector.len() > EMBEDDING_DIMENSIONS {
        vector.truncate(EMBEDDING_DIMENSIONS);
    }
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut vector {
            *x /= norm;
        }
    }
    vector
}

/// Compute cosine similarity between two vectors
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = (norm_a * norm_b).sqrt();
    if denominator > 0.0 {
        dot / denominator
    } else {
        0.0
    }
}

/// Compute dot product between two vectors
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

// ============================================================================
// TESTS
// ============================================================================
