//! Retrieval Indices
//!
//! Reference implementations of the retrieval source traits, built in
//! memory from a loaded catalog:
//! - Okapi BM25 keyword index
//! - TF-IDF cosine keyword index (unigram + bigram)
//! - HNSW vector index via USearch (feature `vector-search`)
//!
//! The engine itself depends only on the traits in `search::sources`;
//! callers can substitute their own backends.

mod bm25;
mod tfidf;

pub use bm25::{Bm25Index, DEFAULT_B, DEFAULT_K1};
pub use tfidf::TfidfIndex;

#[cfg(feature = "vector-search")]
mod vector;

#[cfg(feature = "vector-search")]
pub use vector::{
    VectorIndex, VectorIndexConfig, VectorIndexError, VectorIndexStats, DEFAULT_CONNECTIVITY,
    DEFAULT_EXPANSION_ADD, DEFAULT_EXPANSION_SEARCH,
};
