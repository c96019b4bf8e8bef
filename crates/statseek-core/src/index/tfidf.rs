//! TF-IDF Keyword Index
//!
//! Cosine similarity over L2-normalized TF-IDF vectors with unigram and
//! adjacent-bigram terms. Bigrams let short phrase queries ("population
//! density") outrank documents that only mention the words separately.
//!
//! Idf uses the smoothed form `ln((1 + N) / (1 + df)) + 1`, which keeps
//! every indexed term's weight positive.

use std::collections::HashMap;

use crate::catalog::{IndicatorCatalog, IndicatorId};
use crate::search::{KeywordSource, SourceError};

// ============================================================================
// TF-IDF INDEX
// ============================================================================

/// In-memory TF-IDF index over indicator searchable text
pub struct TfidfIndex {
    ids: Vec<IndicatorId>,
    /// term → (doc ordinal, L2-normalized tf-idf weight)
    postings: HashMap<String, Vec<(u32, f32)>>,
    idf: HashMap<String, f32>,
}

impl TfidfIndex {
    /// Build the index from a catalog
    pub fn build(catalog: &IndicatorCatalog) -> Self {
        let mut ids = Vec::with_capacity(catalog.len());
        let mut doc_terms: Vec<HashMap<String, f32>> = Vec::with_capacity(catalog.len());
        let mut df: HashMap<String, f32> = HashMap::new();

        for record in catalog.iter() {
            ids.push(record.id.clone());

            let mut tf: HashMap<String, f32> = HashMap::new();
            for term in extract_terms(&record.searchable_text) {
                *tf.entry(term).or_default() += 1.0;
            }
            for term in tf.keys() {
                *df.entry(term.clone()).or_default() += 1.0;
            }
            doc_terms.push(tf);
        }

        let n_docs = ids.len() as f32;
        let idf: HashMap<String, f32> = df
            .into_iter()
            .map(|(term, df)| (term, ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0))
            .collect();

        let mut postings: HashMap<String, Vec<(u32, f32)>> = HashMap::new();
        for (ordinal, tf) in doc_terms.into_iter().enumerate() {
            let mut weights: Vec<(String, f32)> = tf
                .into_iter()
                .map(|(term, freq)| {
                    let weight = freq * idf[&term];
                    (term, weight)
                })
                .collect();

            let norm = weights.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
            if norm > 0.0 {
                for (_, w) in &mut weights {
                    *w /= norm;
                }
            }
            for (term, weight) in weights {
                postings.entry(term).or_default().push((ordinal as u32, weight));
            }
        }

        Self { ids, postings, idf }
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Cosine similarity of the query against every document sharing a
    /// term; up to `top_n` positive-scoring results, best first, ties by
    /// id ascending.
    pub fn query(&self, tokens: &[String], top_n: usize) -> Vec<(IndicatorId, f32)> {
        if self.is_empty() {
            return Vec::new();
        }

        // Same transform as the documents; terms outside the vocabulary
        // contribute nothing.
        let mut query_tf: HashMap<&str, f32> = HashMap::new();
        for term in query_terms(tokens) {
            if let Some((known, _)) = self.idf.get_key_value(term.as_str()) {
                *query_tf.entry(known.as_str()).or_default() += 1.0;
            }
        }
        if query_tf.is_empty() {
            return Vec::new();
        }

        let mut query_weights: Vec<(&str, f32)> = query_tf
            .into_iter()
            .map(|(term, freq)| (term, freq * self.idf[term]))
            .collect();
        let norm = query_weights.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut query_weights {
                *w /= norm;
            }
        }

        let mut scores: HashMap<u32, f32> = HashMap::new();
        for (term, query_weight) in query_weights {
            for &(doc, doc_weight) in &self.postings[term] {
                *scores.entry(doc).or_default() += query_weight * doc_weight;
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

impl KeywordSource for TfidfIndex {
    fn search(
        &self,
        tokens: &[String],
        top_n: usize,
    ) -> Result<Vec<(IndicatorId, f32)>, SourceError> {
        Ok(self.query(tokens, top_n))
    }
}

// ============================================================================
// TERM EXTRACTION
// ============================================================================

/// Unigrams plus adjacent bigrams from raw text
fn extract_terms(text: &str) -> Vec<String> {
    let tokens = crate::search::tokenize(text);
    query_terms(&tokens)
}

/// Unigrams plus adjacent bigrams from an existing token list
fn query_terms(tokens: &[String]) -> Vec<String> {
    let mut terms = tokens.to_vec();
    terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}

// ============================================================================
// TESTS
// ============================================================================
