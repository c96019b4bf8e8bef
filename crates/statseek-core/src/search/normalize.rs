//! Score Normalization
//!
//! BM25, TF-IDF, and cosine similarity scores are not comparable in raw
//! magnitude or distribution, so each method's batch is rescaled onto [0,1]
//! independently before fusion.
//!
//! Two policies:
//! - [`min_max_normalize`] for the lexical methods, whose raw scores are
//!   unbounded and query-dependent.
//! - [`clamp_unit`] for the vector method, whose cosine similarities already
//!   share a bounded scale across queries; per-batch min-max would erase the
//!   absolute signal (a lone 0.3 hit would inflate to 1.0).

use crate::catalog::IndicatorId;

/// Min-max normalize one method's batch onto [0,1].
///
/// `(score - min) / (max - min)`. When every score in the batch is equal,
/// the result is 1.0 for all entries if the shared value is positive, else
/// 0.0 — any positive raw relevance still counts, without dividing by zero.
pub fn min_max_normalize(results: &[(IndicatorId, f32)]) -> Vec<(IndicatorId, f32)> {
    if results.is_empty() {
        return Vec::new();
    }

    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for (_, score) in results {
        min = min.min(*score);
        max = max.max(*score);
    }

    let range = max - min;
    results
        .iter()
        .map(|(id, score)| {
            let normalized = if range > 0.0 {
                (score - min) / range
            } else if max > 0.0 {
                1.0
            } else {
                0.0
            };
            (id.clone(), normalized)
        })
        .collect()
}

/// Clamp scores to [0,1], preserving their absolute values.
///
/// Used for the cosine-similarity channel; negative similarities contribute
/// nothing rather than a negative weight.
pub fn clamp_unit(results: &[(IndicatorId, f32)]) -> Vec<(IndicatorId, f32)> {
    results
        .iter()
        .map(|(id, score)| (id.clone(), score.clamp(0.0, 1.0)))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
