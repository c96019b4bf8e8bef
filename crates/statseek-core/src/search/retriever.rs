//! Hybrid Retrieval Orchestrator
//!
//! Public entry point of the engine. One `search` call:
//! 1. validates the query, weights, and limit,
//! 2. derives the query context (embedding + tokens),
//! 3. queries the three retrieval sources on parallel worker threads with a
//!    bounded wait,
//! 4. normalizes and fuses the per-method results,
//! 5. reranks the fused shortlist,
//! 6. collapses indicator families and resolves records for display.
//!
//! A failed, stalled, or timed-out source degrades the query instead of
//! failing it; only the loss of all three sources is surfaced as an error.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::bounded;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{CatalogError, IndicatorCatalog, IndicatorId, IndicatorRecord};
use crate::embeddings::EmbeddingProvider;
use crate::search::fusion::{self, RetrievalMethod, RetrievalWeights};
use crate::search::normalize::{clamp_unit, min_max_normalize};
use crate::search::query::QueryContext;
use crate::search::reranker;
use crate::search::sources::{KeywordSource, SourceError, VectorSource};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Search error type
#[non_exhaustive]
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Query is empty after trimming; rejected before any retrieval call
    #[error("Query is empty")]
    InvalidQuery,
    /// Requested result count must be positive
    #[error("Invalid result limit: {0}")]
    InvalidLimit(usize),
    /// Weights violate the non-negative / at-least-one-positive invariant
    #[error("Invalid retrieval weights: {0}")]
    InvalidWeights(String),
    /// All three retrieval sources failed; nothing to rank
    #[error("All retrieval sources are unavailable")]
    RetrievalUnavailable,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Orchestrator tuning knobs
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    /// Size of the fused shortlist handed to the reranker. The effective
    /// value is always at least the caller's `top_k`.
    pub k_fuse: usize,
    /// Per-source over-retrieval factor: each source is asked for
    /// `k_fuse * source_limit_multiplier` candidates so fusion has enough
    /// recall to work with.
    pub source_limit_multiplier: usize,
    /// Bounded wait for the retrieval fan-out; a source that has not
    /// answered by then is treated as failed for this query.
    pub source_timeout: Duration,
    /// Collapse indicator families: keep only the best-ranked indicator
    /// per group code in the final result.
    pub group_dedup: bool,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            k_fuse: 100,
            source_limit_multiplier: 2,
            source_timeout: Duration::from_secs(2),
            group_dedup: true,
        }
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// One presentation-ready search result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// The resolved catalog record
    pub record: IndicatorRecord,
    /// Weighted fusion score from first-pass retrieval
    pub fused_score: f32,
    /// Second-pass relevance score that ordered the final list
    pub rerank_score: f32,
}

// ============================================================================
// RETRIEVER
// ============================================================================

type SourceReply = (RetrievalMethod, Result<Vec<(IndicatorId, f32)>, SourceError>);

/// Hybrid search over a loaded indicator catalog.
///
/// Holds only `Arc`s to read-only collaborators, so the retriever is
/// `Send + Sync` and queries may run concurrently without coordination.
/// All per-query state lives inside the `search` invocation.
pub struct HybridRetriever {
    catalog: Arc<IndicatorCatalog>,
    embedder: Arc<dyn EmbeddingProvider>,
    vector: Arc<dyn VectorSource>,
    bm25: Arc<dyn KeywordSource>,
    tfidf: Arc<dyn KeywordSource>,
    config: RetrieverConfig,
}

impl HybridRetriever {
    /// Create a retriever with the default configuration
    pub fn new(
        catalog: Arc<IndicatorCatalog>,
        embedder: Arc<dyn EmbeddingProvider>,
        vector: Arc<dyn VectorSource>,
        bm25: Arc<dyn KeywordSource>,
        tfidf: Arc<dyn KeywordSource>,
    ) -> Self {
        Self::with_config(catalog, embedder, vector, bm25, tfidf, RetrieverConfig::default())
    }

    /// Create a retriever with a custom configuration
    pub fn with_config(
        catalog: Arc<IndicatorCatalog>,
        embedder: Arc<dyn EmbeddingProvider>,
        vector: Arc<dyn VectorSource>,
        bm25: Arc<dyn KeywordSource>,
        tfidf: Arc<dyn KeywordSource>,
        config: RetrieverConfig,
    ) -> Self {
        Self {
            catalog,
            embedder,
            vector,
            bm25,
            tfidf,
            config,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Run a hybrid search and return at most `top_k` presentation-ready
    /// hits, best first.
    pub fn search(
        &self,
        query: &str,
        weights: &RetrievalWeights,
        top_k: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let started = Instant::now();

        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(SearchError::InvalidQuery);
        }
        if top_k == 0 {
            return Err(SearchError::InvalidLimit(top_k));
        }
        weights.validate().map_err(SearchError::InvalidWeights)?;

        let k_fuse = self.config.k_fuse.max(top_k);
        let top_n = k_fuse.saturating_mul(self.config.source_limit_multiplier.max(1));

        // An unavailable embedding provider only disables the vector channel
        let embedding = match self.embedder.embed(trimmed) {
            Ok(vector) => Some(vector),
            Err(e) => {
                warn!(error = %e, "query embedding unavailable, vector channel disabled");
                None
            }
        };
        let ctx = QueryContext::new(query, embedding);

        let (vector_raw, bm25_raw, tfidf_raw, failed) = self.dispatch_sources(&ctx, top_n);
        if failed == 3 {
            warn!(query = %ctx.trimmed, "all retrieval sources failed");
            return Err(SearchError::RetrievalUnavailable);
        }
        info!(
            vector = vector_raw.len(),
            bm25 = bm25_raw.len(),
            tfidf = tfidf_raw.len(),
            "retrieval sources answered"
        );

        // Lexical scores are unbounded and query-dependent; cosine scores
        // already share a bounded scale. See normalize module docs.
        let vector_norm = clamp_unit(&vector_raw);
        let bm25_norm = min_max_normalize(&bm25_raw);
        let tfidf_norm = min_max_normalize(&tfidf_raw);

        let fused = fusion::fuse(&vector_norm, &bm25_norm, &tfidf_norm, weights, k_fuse);
        if fused.is_empty() {
            // Valid "no matches" outcome, distinct from RetrievalUnavailable
            info!(query = %ctx.trimmed, "no candidates after fusion");
            return Ok(Vec::new());
        }
        debug!(candidates = fused.len(), "fused candidate shortlist");

        let reranked = reranker::rerank(&ctx, fused, &self.catalog);

        let hits = self.assemble(reranked, top_k);
        info!(
            results = hits.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search complete"
        );
        Ok(hits)
    }

    /// Query the three sources on worker threads and drain replies with a
    /// deadline. Returns the raw per-method results plus the number of
    /// failed methods (errors, timeouts, and a disabled vector channel).
    fn dispatch_sources(
        &self,
        ctx: &QueryContext,
        top_n: usize,
    ) -> (
        Vec<(IndicatorId, f32)>,
        Vec<(IndicatorId, f32)>,
        Vec<(IndicatorId, f32)>,
        usize,
    ) {
        let (tx, rx) = bounded::<SourceReply>(3);
        let mut pending: Vec<RetrievalMethod> = Vec::with_capacity(3);
        let mut failed = 0usize;

        if let Some(embedding) = ctx.embedding.clone() {
            let source = Arc::clone(&self.vector);
            let tx = tx.clone();
            thread::spawn(move || {
                let _ = tx.send((RetrievalMethod::Vector, source.search(&embedding, top_n)));
            });
            pending.push(RetrievalMethod::Vector);
        } else {
            failed += 1;
        }

        for (method, source) in [
            (RetrievalMethod::Bm25, Arc::clone(&self.bm25)),
            (RetrievalMethod::Tfidf, Arc::clone(&self.tfidf)),
        ] {
            let tokens = ctx.tokens.clone();
            let tx = tx.clone();
            thread::spawn(move || {
                let _ = tx.send((method, source.search(&tokens, top_n)));
            });
            pending.push(method);
        }
        drop(tx);

        let deadline = Instant::now() + self.config.source_timeout;
        let mut vector_raw = Vec::new();
        let mut bm25_raw = Vec::new();
        let mut tfidf_raw = Vec::new();

        while !pending.is_empty() {
            match rx.recv_deadline(deadline) {
                Ok((method, reply)) => {
                    pending.retain(|m| *m != method);
                    match reply {
                        Ok(results) => {
                            debug!(method = %method, hits = results.len(), "source answered");
                            match method {
                                RetrievalMethod::Vector => vector_raw = results,
                                RetrievalMethod::Bm25 => bm25_raw = results,
                                RetrievalMethod::Tfidf => tfidf_raw = results,
                            }
                        }
                        Err(e) => {
                            warn!(method = %method, error = %e, "source failed, continuing without it");
                            failed += 1;
                        }
                    }
                }
                Err(_) => {
                    // The worker threads are abandoned, not joined; a stalled
                    // source never blocks the query past the deadline.
                    for method in &pending {
                        warn!(method = %method, error = %SourceError::Timeout, "continuing without source");
                    }
                    failed += pending.len();
                    break;
                }
            }
        }

        (vector_raw, bm25_raw, tfidf_raw, failed)
    }

    /// Resolve records, collapse indicator families, truncate to `top_k`.
    fn assemble(&self, reranked: Vec<fusion::ScoredCandidate>, top_k: usize) -> Vec<SearchHit> {
        let mut hits = Vec::with_capacity(top_k.min(reranked.len()));
        let mut seen_groups: HashSet<String> = HashSet::new();

        for candidate in reranked {
            let record = match self.catalog.get(&candidate.id) {
                Ok(record) => record,
                Err(CatalogError::NotFound(id)) => {
                    // Stale single ids must not break the query
                    debug!(id = %id, "candidate id not in catalog, dropping");
                    continue;
                }
            };

            if self.config.group_dedup {
                if let Some(group) = &record.group_code {
                    if !seen_groups.insert(group.clone()) {
                        debug!(id = %record.id, group = %group, "family already represented");
                        continue;
                    }
                }
            }

            hits.push(SearchHit {
                record: record.clone(),
                fused_score: candidate.fused_score,
                rerank_score: candidate.rerank_score,
            });
            if hits.len() == top_k {
                break;
            }
        }

        hits
    }
}

// ============================================================================
// TESTS
// ============================================================================
