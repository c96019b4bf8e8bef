//! Hybrid Fusion
//!
//! Merges the three normalized candidate lists by indicator id and combines
//! them with a weighted linear sum. An indicator retrieved by several
//! methods becomes one candidate carrying all of its per-method scores,
//! never duplicate rows.
//!
//! Ordering is fully deterministic: fused score descending, ties broken by
//! id ascending, so identical inputs always reproduce the same ranking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::IndicatorId;

// ============================================================================
// RETRIEVAL METHODS
// ============================================================================

/// The three retrieval methods feeding the fuser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMethod {
    /// Embedding similarity search
    Vector,
    /// Okapi BM25 keyword search
    Bm25,
    /// TF-IDF cosine keyword search
    Tfidf,
}

impl RetrievalMethod {
    /// Stable method name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            RetrievalMethod::Vector => "vector",
            RetrievalMethod::Bm25 => "bm25",
            RetrievalMethod::Tfidf => "tfidf",
        }
    }
}

impl std::fmt::Display for RetrievalMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// WEIGHTS
// ============================================================================

/// Per-method fusion weights.
///
/// Weights are non-negative and need not sum to 1; per-method score
/// normalization already puts the channels on a common scale, so the
/// weights only set their relative influence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalWeights {
    /// Weight of the embedding similarity channel
    pub vector: f32,
    /// Weight of the BM25 channel
    pub bm25: f32,
    /// Weight of the TF-IDF channel
    pub tfidf: f32,
}

impl Default for RetrievalWeights {
    fn default() -> Self {
        // 0.6 semantic, remainder split across the two keyword methods
        Self {
            vector: 0.6,
            bm25: 0.2,
            tfidf: 0.2,
        }
    }
}

impl RetrievalWeights {
    /// Create weights from the three channel values
    pub fn new(vector: f32, bm25: f32, tfidf: f32) -> Self {
        Self { vector, bm25, tfidf }
    }

    /// Check the weight invariant: all finite and non-negative, at least
    /// one positive.
    pub fn validate(&self) -> Result<(), String> {
        for (name, w) in [
            ("vector", self.vector),
            ("bm25", self.bm25),
            ("tfidf", self.tfidf),
        ] {
            if !w.is_finite() {
                return Err(format!("weight '{}' is not finite", name));
            }
            if w < 0.0 {
                return Err(format!("weight '{}' is negative", name));
            }
        }
        if self.vector == 0.0 && self.bm25 == 0.0 && self.tfidf == 0.0 {
            return Err("at least one weight must be positive".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// CANDIDATES
// ============================================================================

/// Normalized per-method scores of one candidate; absent methods are 0.0
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MethodScores {
    /// Normalized embedding similarity
    pub vector: f32,
    /// Normalized BM25 relevance
    pub bm25: f32,
    /// Normalized TF-IDF relevance
    pub tfidf: f32,
}

impl MethodScores {
    /// Score of one method
    pub fn get(&self, method: RetrievalMethod) -> f32 {
        match method {
            RetrievalMethod::Vector => self.vector,
            RetrievalMethod::Bm25 => self.bm25,
            RetrievalMethod::Tfidf => self.tfidf,
        }
    }

    fn set(&mut self, method: RetrievalMethod, score: f32) {
        match method {
            RetrievalMethod::Vector => self.vector = score,
            RetrievalMethod::Bm25 => self.bm25 = score,
            RetrievalMethod::Tfidf => self.tfidf = score,
        }
    }
}

/// One fused candidate, transient per query
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    /// Indicator id
    pub id: IndicatorId,
    /// Normalized score per contributing method
    pub method_scores: MethodScores,
    /// Weighted combination of the method scores
    pub fused_score: f32,
    /// Second-pass relevance; 0.0 until the reranker runs
    pub rerank_score: f32,
}

// ============================================================================
// FUSION
// ============================================================================

/// Fuse the normalized candidate lists into a single deduplicated ranking,
/// truncated to `k_fuse`.
///
/// All-empty inputs produce an empty result; that is the valid "no matches"
/// outcome, not an error.
pub fn fuse(
    vector: &[(IndicatorId, f32)],
    bm25: &[(IndicatorId, f32)],
    tfidf: &[(IndicatorId, f32)],
    weights: &RetrievalWeights,
    k_fuse: usize,
) -> Vec<ScoredCandidate> {
    let mut merged: HashMap<IndicatorId, MethodScores> = HashMap::new();

    let lists = [
        (RetrievalMethod::Vector, vector),
        (RetrievalMethod::Bm25, bm25),
        (RetrievalMethod::Tfidf, tfidf),
    ];
    for (method, results) in lists {
        for (id, score) in results {
            merged.entry(id.clone()).or_default().set(method, *score);
        }
    }

    let mut candidates: Vec<ScoredCandidate> = merged
        .into_iter()
        .map(|(id, method_scores)| {
            let fused_score = weights.vector * method_scores.vector
                + weights.bm25 * method_scores.bm25
                + weights.tfidf * method_scores.tfidf;
            ScoredCandidate {
                id,
                method_scores,
                fused_score,
                rerank_score: 0.0,
            }
        })
        .collect();

    sort_by_score(&mut candidates, |c| c.fused_score);
    candidates.truncate(k_fuse);
    candidates
}

/// Sort candidates by a score accessor, descending, ties by id ascending
pub(crate) fn sort_by_score<F>(candidates: &mut [ScoredCandidate], score: F)
where
    F: Fn(&ScoredCandidate) -> f32,
{
    candidates.sort_by(|a, b| {
        score(b)
            .partial_cmp(&score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
}

// ============================================================================
// TESTS
// ============================================================================
