//! HNSW Vector Index
//!
//! USearch-backed approximate nearest neighbor search over the catalog's
//! precomputed embeddings, cosine similarity by default. The catalog is
//! static per session, so the index is populated once at load time; there
//! is no online update path.

use std::collections::HashMap;

use usearch::{Index, IndexOptions, MetricKind, ScalarKind};

use crate::catalog::IndicatorId;
use crate::embeddings::EMBEDDING_DIMENSIONS;
use crate::search::{SourceError, VectorSource};

// ============================================================================
// CONSTANTS
// ============================================================================

/// HNSW connectivity parameter (higher = better recall, more memory)
pub const DEFAULT_CONNECTIVITY: usize = 16;

/// HNSW expansion factor for index building
pub const DEFAULT_EXPANSION_ADD: usize = 128;

/// HNSW expansion factor for search (higher = better recall, slower)
pub const DEFAULT_EXPANSION_SEARCH: usize = 64;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Vector index error types
#[non_exhaustive]
#[derive(Debug, Clone, thiserror::Error)]
pub enum VectorIndexError {
    /// Failed to create the index
    #[error("Index creation failed: {0}")]
    IndexCreation(String),
    /// Failed to add a vector
    #[error("Failed to add vector: {0}")]
    IndexAdd(String),
    /// Failed to search
    #[error("Search failed: {0}")]
    IndexSearch(String),
    /// Dimension mismatch
    #[error("Invalid dimensions: expected {0}, got {1}")]
    InvalidDimensions(usize, usize),
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Configuration for the vector index
#[derive(Debug, Clone)]
pub struct VectorIndexConfig {
    /// Number of dimensions
    pub dimensions: usize,
    /// HNSW connectivity parameter
    pub connectivity: usize,
    /// Expansion factor for adding vectors
    pub expansion_add: usize,
    /// Expansion factor for searching
    pub expansion_search: usize,
    /// Distance metric
    pub metric: MetricKind,
}

impl Default for VectorIndexConfig {
    fn default() -> Self {
        Self {
            dimensions: EMBEDDING_DIMENSIONS,
            connectivity: DEFAULT_CONNECTIVITY,
            expansion_add: DEFAULT_EXPANSION_ADD,
            expansion_search: DEFAULT_EXPANSION_SEARCH,
            metric: MetricKind::Cos,
        }
    }
}

/// Index statistics
#[derive(Debug, Clone)]
pub struct VectorIndexStats {
    /// Total number of vectors
    pub total_vectors: usize,
    /// Vector dimensions
    pub dimensions: usize,
    /// HNSW connectivity
    pub connectivity: usize,
}

// ============================================================================
// VECTOR INDEX
// ============================================================================

/// HNSW vector index keyed by indicator id
pub struct VectorIndex {
    index: Index,
    config: VectorIndexConfig,
    id_to_key: HashMap<IndicatorId, u64>,
    key_to_id: HashMap<u64, IndicatorId>,
    next_key: u64,
}

impl VectorIndex {
    /// Create an empty index with default configuration
    pub fn new() -> Result<Self, VectorIndexError> {
        Self::with_config(VectorIndexConfig::default())
    }

    /// Create an empty index with custom configuration
    pub fn with_config(config: VectorIndexConfig) -> Result<Self, VectorIndexError> {
        let options = IndexOptions {
            dimensions: config.dimensions,
            metric: config.metric,
            quantization: ScalarKind::I8,
            connectivity: config.connectivity,
            expansion_add: config.expansion_add,
            expansion_search: config.expansion_search,
            multi: false,
        };

        let index =
            Index::new(&options).map_err(|e| VectorIndexError::IndexCreation(e.to_string()))?;

        Ok(Self {
            index,
            config,
            id_to_key: HashMap::new(),
            key_to_id: HashMap::new(),
            next_key: 0,
        })
    }

    /// Number of vectors in the index
    pub fn len(&self) -> usize {
        self.index.size()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality of the index
    pub fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    /// Whether an indicator id has a vector in the index
    pub fn contains(&self, id: &str) -> bool {
        self.id_to_key.contains_key(id)
    }

    /// Reserve capacity for a number of vectors.
    /// usearch requires reserve before add.
    pub fn reserve(&self, capacity: usize) -> Result<(), VectorIndexError> {
        self.index.reserve(capacity).map_err(|e| {
            VectorIndexError::IndexCreation(format!("Failed to reserve capacity: {}", e))
        })
    }

    /// Add an indicator's embedding.
    ///
    /// Re-adding an existing id is rejected: the catalog is static per
    /// session, so a duplicate add is a build-step bug, not an update.
    pub fn add(&mut self, id: &str, vector: &[f32]) -> Result<(), VectorIndexError> {
        if vector.len() != self.config.dimensions {
            return Err(VectorIndexError::InvalidDimensions(
                self.config.dimensions,
                vector.len(),
            ));
        }
        if self.id_to_key.contains_key(id) {
            return Err(VectorIndexError::IndexAdd(format!(
                "duplicate indicator id: {}",
                id
            )));
        }

        let current_capacity = self.index.capacity();
        let current_size = self.index.size();
        if current_size >= current_capacity {
            let new_capacity = std::cmp::max(current_capacity * 2, 16);
            self.reserve(new_capacity)?;
        }

        let key = self.next_key;
        self.next_key += 1;

        self.index
            .add(key, vector)
            .map_err(|e| VectorIndexError::IndexAdd(e.to_string()))?;

        self.id_to_key.insert(id.to_string(), key);
        self.key_to_id.insert(key, id.to_string());

        Ok(())
    }

    /// Search for the most similar vectors
    pub fn query(
        &self,
        embedding: &[f32],
        top_n: usize,
    ) -> Result<Vec<(IndicatorId, f32)>, VectorIndexError> {
        if embedding.len() != self.config.dimensions {
            return Err(VectorIndexError::InvalidDimensions(
                self.config.dimensions,
                embedding.len(),
            ));
        }

        if self.is_empty() {
            return Ok(vec![]);
        }

        let results = self
            .index
            .search(embedding, top_n)
            .map_err(|e| VectorIndexError::IndexSearch(e.to_string()))?;

        let mut search_results = Vec::with_capacity(results.keys.len());
        for (key, distance) in results.keys.iter().zip(results.distances.iter()) {
            if let Some(id) = self.key_to_id.get(key) {
                // Convert cosine distance to similarity
                let score = 1.0 - distance;
                search_results.push((id.clone(), score));
            }
        }

        Ok(search_results)
    }

    /// Index statistics
    pub fn stats(&self) -> VectorIndexStats {
        VectorIndexStats {
            total_vectors: self.len(),
            dimensions: self.config.dimensions,
            connectivity: self.config.connectivity,
        }
    }
}

impl VectorSource for VectorIndex {
    fn search(
        &self,
        embedding: &[f32],
        top_n: usize,
    ) -> Result<Vec<(IndicatorId, f32)>, SourceError> {
        self.query(embedding, top_n)
            .map_err(|e| SourceError::Unavailable(e.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
