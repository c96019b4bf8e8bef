//! # Statseek Core
//!
//! Hybrid retrieval-and-reranking engine for statistical indicator search.
//! Finds, in a fixed catalog of several thousand government-statistics
//! indicators, the handful relevant to a free-text query:
//!
//! - **Hybrid Retrieval**: semantic (embedding similarity) + lexical
//!   (Okapi BM25, TF-IDF) candidates fetched in parallel
//! - **Score Fusion**: per-method normalization and weighted linear
//!   combination with deterministic ordering
//! - **Reranking**: field-level lexical second pass over the fused shortlist
//! - **Family Deduplication**: one surfaced indicator per breakdown group
//! - **Graceful Degradation**: a failed or stalled retrieval source demotes
//!   to partial hybrid search instead of failing the query
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use statseek_core::prelude::*;
//!
//! let catalog = Arc::new(IndicatorCatalog::from_records(records));
//! let bm25 = Arc::new(Bm25Index::build(&catalog));
//! let tfidf = Arc::new(TfidfIndex::build(&catalog));
//! let vectors = Arc::new(load_vector_index()?);
//!
//! let retriever = HybridRetriever::new(
//!     catalog,
//!     Arc::new(LocalEmbedder::new()),
//!     vectors,
//!     bm25,
//!     tfidf,
//! );
//!
//! let hits = retriever.search("人口", &RetrievalWeights::default(), 10)?;
//! for hit in hits {
//!     println!("{} ({:.2})", hit.record.name, hit.rerank_score);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `embeddings` (default): local query embeddings with fastembed
//! - `vector-search` (default): HNSW vector index with USearch
//! - `full`: all features

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod catalog;
pub mod embeddings;
pub mod index;
pub mod search;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Catalog
pub use catalog::{
    derive_group_code, CatalogError, CatalogStats, IndicatorCatalog, IndicatorId,
    IndicatorRecord, GROUP_CODE_LEN,
};

// Embeddings
pub use embeddings::{
    cosine_similarity, dot_product, EmbeddingError, EmbeddingProvider, EMBEDDING_DIMENSIONS,
};

#[cfg(feature = "embeddings")]
#[cfg_attr(docsrs, doc(cfg(feature = "embeddings")))]
pub use embeddings::LocalEmbedder;

// Indices
pub use index::{Bm25Index, TfidfIndex};

#[cfg(feature = "vector-search")]
#[cfg_attr(docsrs, doc(cfg(feature = "vector-search")))]
pub use index::{VectorIndex, VectorIndexConfig, VectorIndexError, VectorIndexStats};

// Search pipeline
pub use search::{
    fuse, min_max_normalize, tokenize, HybridRetriever, KeywordSource, MethodScores,
    QueryContext, RetrievalMethod, RetrievalWeights, RetrieverConfig, ScoredCandidate,
    SearchError, SearchHit, SourceError, VectorSource,
};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        Bm25Index, CatalogError, HybridRetriever, IndicatorCatalog, IndicatorRecord,
        RetrievalWeights, RetrieverConfig, SearchError, SearchHit, TfidfIndex,
    };

    #[cfg(feature = "embeddings")]
    pub use crate::LocalEmbedder;

    #[cfg(feature = "vector-search")]
    pub use crate::VectorIndex;

    pub use crate::{EmbeddingProvider, KeywordSource, VectorSource};
}
