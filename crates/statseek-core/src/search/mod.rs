//! Hybrid Search
//!
//! The retrieval-and-reranking pipeline:
//! - Query context derivation (tokens + embedding)
//! - Parallel retrieval from three sources (vector, BM25, TF-IDF)
//! - Per-method score normalization
//! - Weighted linear fusion with deterministic ordering
//! - Field-level lexical reranking of the fused shortlist
//! - Family deduplication and record resolution

mod fusion;
mod normalize;
mod query;
mod reranker;
mod retriever;
mod sources;

pub use fusion::{fuse, MethodScores, RetrievalMethod, RetrievalWeights, ScoredCandidate};

pub use normalize::{clamp_unit, min_max_normalize};

pub use query::{tokenize, QueryContext};

pub use reranker::rerank;

pub use retriever::{HybridRetriever, RetrieverConfig, SearchError, SearchHit};

pub use sources::{KeywordSource, SourceError, VectorSource};
