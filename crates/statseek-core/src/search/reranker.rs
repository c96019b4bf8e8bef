//! Second-Pass Reranking
//!
//! First-pass retrieval is tuned for recall; its scores carry method noise.
//! The reranker recomputes relevance for the small fused shortlist with a
//! direct query-vs-record measure that would be too expensive to run over
//! the full catalog: per-field containment and token overlap against all six
//! catalog text fields.
//!
//! Reranking may demote a candidate but never drops one — a candidate with
//! no usable signal (unresolvable record, empty fields) scores 0.0 and keeps
//! its slot at the bottom.

use std::collections::HashSet;

use crate::catalog::IndicatorCatalog;
use crate::search::fusion::{sort_by_score, ScoredCandidate};
use crate::search::query::QueryContext;

/// Bonus for a field containing the whole query as a substring.
/// Twice the weight of a single token overlap.
const CONTAINMENT_BONUS: f32 = 2.0;

// ============================================================================
// RERANKING
// ============================================================================

/// Rerank fused candidates in place against the catalog records.
///
/// Returns the candidates sorted by `rerank_score` descending, ties broken
/// by id ascending.
pub fn rerank(
    query: &QueryContext,
    mut candidates: Vec<ScoredCandidate>,
    catalog: &IndicatorCatalog,
) -> Vec<ScoredCandidate> {
    let needle = query.lowercase();
    let query_tokens: HashSet<&str> = query.tokens.iter().map(String::as_str).collect();

    for candidate in &mut candidates {
        candidate.rerank_score = match catalog.get(&candidate.id) {
            Ok(record) => relevance_score(&needle, &query_tokens, record.text_fields()),
            // Unresolvable here still surfaces; final assembly decides drops
            Err(_) => 0.0,
        };
    }

    sort_by_score(&mut candidates, |c| c.rerank_score);
    candidates
}

/// Field-level lexical relevance: containment bonus plus token overlap.
fn relevance_score(needle: &str, query_tokens: &HashSet<&str>, fields: [&str; 6]) -> f32 {
    let mut score = 0.0;

    for field in fields {
        if field.is_empty() {
            continue;
        }
        let field_lower = field.to_lowercase();

        if !needle.is_empty() && field_lower.contains(needle) {
            score += CONTAINMENT_BONUS;
        }

        let field_words: HashSet<&str> = field_lower.split_whitespace().collect();
        score += query_tokens.intersection(&field_words).count() as f32;
    }

    score
}

// ============================================================================
// TESTS
// ============================================================================
