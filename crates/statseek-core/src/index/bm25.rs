//! Okapi BM25 Keyword Index
//!
//! In-memory BM25 over the catalog's searchable text, built once at load
//! time and read-only afterwards. Posting lists keyed by term keep query
//! cost proportional to matching documents rather than catalog size.
//!
//! Uses the non-negative Lucene idf formulation, `ln(1 + (N - df + 0.5) /
//! (df + 0.5))`, so raw scores stay ≥ 0 and min-max normalization in the
//! fusion stage is well-behaved.

use std::collections::HashMap;

use crate::catalog::{IndicatorCatalog, IndicatorId};
use crate::search::{tokenize, KeywordSource, SourceError};

/// Term-frequency saturation parameter
pub const DEFAULT_K1: f32 = 1.5;

/// Document-length normalization parameter
pub const DEFAULT_B: f32 = 0.75;

// ============================================================================
// BM25 INDEX
// ============================================================================

/// In-memory Okapi BM25 index over indicator searchable text
pub struct Bm25Index {
    ids: Vec<IndicatorId>,
    /// term → (doc ordinal, term frequency)
    postings: HashMap<String, Vec<(u32, f32)>>,
    idf: HashMap<String, f32>,
    doc_lens: Vec<f32>,
    avg_doc_len: f32,
    k1: f32,
    b: f32,
}

impl Bm25Index {
    /// Build the index from a catalog with default parameters
    pub fn build(catalog: &IndicatorCatalog) -> Self {
        Self::build_with_params(catalog, DEFAULT_K1, DEFAULT_B)
    }

    /// Build the index with explicit BM25 parameters
    pub fn build_with_params(catalog: &IndicatorCatalog, k1: f32, b: f32) -> Self {
        let mut ids = Vec::with_capacity(catalog.len());
        let mut postings: HashMap<String, Vec<(u32, f32)>> = HashMap::new();
        let mut doc_lens = Vec::with_capacity(catalog.len());

        for (ordinal, record) in catalog.iter().enumerate() {
            let tokens = tokenize(&record.searchable_text);
            doc_lens.push(tokens.len() as f32);
            ids.push(record.id.clone());

            let mut tf: HashMap<String, f32> = HashMap::new();
            for token in tokens {
                *tf.entry(token).or_default() += 1.0;
            }
            for (term, freq) in tf {
                postings.entry(term).or_default().push((ordinal as u32, freq));
            }
        }

        let n_docs = ids.len() as f32;
        let idf = postings
            .iter()
            .map(|(term, docs)| {
                let df = docs.len() as f32;
                let idf = (1.0 + (n_docs - df + 0.5) / (df + 0.5)).ln();
                (term.clone(), idf)
            })
            .collect();

        let avg_doc_len = if doc_lens.is_empty() {
            0.0
        } else {
            doc_lens.iter().sum::<f32>() / doc_lens.len() as f32
        };

        Self {
            ids,
            postings,
            idf,
            doc_lens,
            avg_doc_len,
            k1,
            b,
        }
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Score the query tokens and return up to `top_n` positive-scoring
    /// documents, best first, ties by id ascending.
    pub fn query(&self, tokens: &[String], top_n: usize) -> Vec<(IndicatorId, f32)> {
        if self.is_empty() || self.avg_doc_len == 0.0 {
            return Vec::new();
        }

        let mut scores: HashMap<u32, f32> = HashMap::new();
        for token in tokens {
            let Some(docs) = self.postings.get(token) else {
                continue;
            };
            let idf = self.idf[token];
            for &(doc, tf) in docs {
                let doc_len = self.doc_lens[doc as usize];
                let numerator = tf * (self.k1 + 1.0);
                let denominator =
                    tf + self.k1 * (1.0 - self.b + self.b * (doc_len / self.avg_doc_len));
                *scores.entry(doc).or_default() += idf * numerator / denominator;
            }
        }

        let mut results: Vec<(IndicatorId, f32)> = scores
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .map(|(doc, score)| (self.ids[doc as usize].clone(), score))
            .collect();
        results.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        results.truncate(top_n);
        results
    }
}

impl KeywordSource for Bm25Index {
    fn search(
        &self,
        tokens: &[String],
        top_n: usize,
    ) -> Result<Vec<(IndicatorId, f32)>, SourceError> {
        Ok(self.query(tokens, top_n))
    }
}

// ============================================================================
// TESTS
// ============================================================================
