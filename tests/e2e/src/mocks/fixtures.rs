//! Test Data Factory
//!
//! Mock retrieval collaborators with scripted behavior (respond / fail /
//! stall) and call counters, plus a small indicator catalog in the shape of
//! the real one: family groups sharing an id prefix, Japanese display names,
//! classification fields.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use statseek_core::{
    EmbeddingError, EmbeddingProvider, HybridRetriever, IndicatorCatalog, IndicatorRecord,
    KeywordSource, RetrieverConfig, SourceError, VectorSource,
};

// ============================================================================
// CATALOG FIXTURES
// ============================================================================

/// A catalog slice with three indicator families around population plus
/// unrelated education and labor entries.
pub fn population_catalog() -> Arc<IndicatorCatalog> {
    Arc::new(IndicatorCatalog::from_records(vec![
        IndicatorRecord::new(
            "A110101",
            "総人口",
            "人口・世帯",
            "人口",
            "総数",
            "国勢調査による総人口",
            "国勢調査",
        ),
        IndicatorRecord::new(
            "A110102",
            "総人口（男）",
            "人口・世帯",
            "人口",
            "総数",
            "国勢調査による男性人口",
            "国勢調査",
        ),
        IndicatorRecord::new(
            "A110103",
            "総人口（女）",
            "人口・世帯",
            "人口",
            "総数",
            "国勢調査による女性人口",
            "国勢調査",
        ),
        IndicatorRecord::new(
            "A210501",
            "人口密度",
            "人口・世帯",
            "人口",
            "密度",
            "可住地面積1km2当たりの人口",
            "国勢調査",
        ),
        IndicatorRecord::new(
            "E250102",
            "小学校数",
            "教育",
            "学校教育",
            "小学校",
            "公立私立を含む小学校の総数",
            "学校基本調査",
        ),
        IndicatorRecord::new(
            "F110301",
            "完全失業率",
            "労働",
            "労働力",
            "失業",
            "労働力人口に占める完全失業者の割合",
            "労働力調査",
        ),
    ]))
}

// ============================================================================
// MOCK SOURCES
// ============================================================================

/// Scripted behavior of a mock retrieval source
#[derive(Debug, Clone)]
pub enum SourceBehavior {
    /// Answer with the canned candidate list
    Respond(Vec<(String, f32)>),
    /// Fail with `SourceError::Unavailable`
    Fail,
    /// Sleep past any reasonable deadline before answering
    Stall(Duration),
}

/// Mock vector source with a call counter
pub struct MockVectorSource {
    behavior: SourceBehavior,
    calls: AtomicUsize,
}

impl MockVectorSource {
    pub fn new(behavior: SourceBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl VectorSource for MockVectorSource {
    fn search(&self, _embedding: &[f32], top_n: usize) -> Result<Vec<(String, f32)>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        run_behavior(&self.behavior, top_n)
    }
}

/// Mock keyword source with a call counter
pub struct MockKeywordSource {
    behavior: SourceBehavior,
    calls: AtomicUsize,
}

impl MockKeywordSource {
    pub fn new(behavior: SourceBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KeywordSource for MockKeywordSource {
    fn search(&self, _tokens: &[String], top_n: usize) -> Result<Vec<(String, f32)>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        run_behavior(&self.behavior, top_n)
    }
}

fn run_behavior(
    behavior: &SourceBehavior,
    top_n: usize,
) -> Result<Vec<(String, f32)>, SourceError> {
    match behavior {
        SourceBehavior::Respond(results) => Ok(results.iter().take(top_n).cloned().collect()),
        SourceBehavior::Fail => Err(SourceError::Unavailable("mock failure".to_string())),
        SourceBehavior::Stall(duration) => {
            std::thread::sleep(*duration);
            Ok(vec![])
        }
    }
}

// ============================================================================
// MOCK EMBEDDERS
// ============================================================================

/// Deterministic embedder; same text always yields the same vector
pub struct MockEmbedder;

impl EmbeddingProvider for MockEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let seed = text.bytes().map(|b| b as f32).sum::<f32>();
        Ok((0..8).map(|i| ((seed + i as f32) * 0.01).sin()).collect())
    }

    fn dimensions(&self) -> usize {
        8
    }
}

/// Embedder whose model never loads
pub struct BlockedEmbedder;

impl EmbeddingProvider for BlockedEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::ModelInit("model unavailable".to_string()))
    }

    fn dimensions(&self) -> usize {
        8
    }
}

// ============================================================================
// RETRIEVER FACTORY
// ============================================================================

/// Build a retriever over the population catalog with scripted sources.
///
/// Returns the mocks alongside the retriever so tests can assert on call
/// counts.
pub fn retriever_with(
    vector: SourceBehavior,
    bm25: SourceBehavior,
    tfidf: SourceBehavior,
    config: RetrieverConfig,
) -> (
    HybridRetriever,
    Arc<MockVectorSource>,
    Arc<MockKeywordSource>,
    Arc<MockKeywordSource>,
) {
    let vector = MockVectorSource::new(vector);
    let bm25 = MockKeywordSource::new(bm25);
    let tfidf = MockKeywordSource::new(tfidf);

    let retriever = HybridRetriever::with_config(
        population_catalog(),
        Arc::new(MockEmbedder),
        Arc::clone(&vector) as Arc<dyn VectorSource>,
        Arc::clone(&bm25) as Arc<dyn KeywordSource>,
        Arc::clone(&tfidf) as Arc<dyn KeywordSource>,
        config,
    );

    (retriever, vector, bm25, tfidf)
}
