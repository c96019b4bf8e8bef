//! Full-stack journey: real keyword indices behind the orchestrator

use std::sync::Arc;

use statseek_e2e_tests::mocks::{population_catalog, MockEmbedder, MockVectorSource, SourceBehavior};
use statseek_core::{
    Bm25Index, HybridRetriever, KeywordSource, RetrievalWeights, TfidfIndex, VectorSource,
};

fn retriever_over_real_indices(vector: SourceBehavior) -> HybridRetriever {
    let catalog = population_catalog();
    let bm25 = Arc::new(Bm25Index::build(&catalog));
    let tfidf = Arc::new(TfidfIndex::build(&catalog));

    HybridRetriever::new(
        catalog,
        Arc::new(MockEmbedder),
        MockVectorSource::new(vector) as Arc<dyn VectorSource>,
        bm25 as Arc<dyn KeywordSource>,
        tfidf as Arc<dyn KeywordSource>,
    )
}

#[test]
fn keyword_indices_find_the_school_indicator() {
    let retriever = retriever_over_real_indices(SourceBehavior::Respond(vec![]));

    let hits = retriever
        .search("小学校", &RetrievalWeights::default(), 5)
        .unwrap();

    assert!(!hits.is_empty());
    assert_eq!(hits[0].record.id, "E250102");
    assert_eq!(hits[0].record.name, "小学校数");
}

#[test]
fn domain_term_matches_only_its_domain() {
    let retriever = retriever_over_real_indices(SourceBehavior::Respond(vec![]));

    let hits = retriever
        .search("教育", &RetrievalWeights::default(), 5)
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record.domain, "教育");
}

#[test]
fn vector_channel_contributes_alongside_real_indices() {
    // The mocked vector channel surfaces 完全失業率, which no keyword
    // index matches for this query; hybrid fusion must keep both.
    let retriever = retriever_over_real_indices(SourceBehavior::Respond(vec![(
        "F110301".to_string(),
        0.85,
    )]));

    let hits = retriever
        .search("小学校", &RetrievalWeights::default(), 5)
        .unwrap();

    let ids: Vec<&str> = hits.iter().map(|h| h.record.id.as_str()).collect();
    assert!(ids.contains(&"E250102"));
    assert!(ids.contains(&"F110301"));
}

#[test]
fn unmatched_query_yields_empty_not_error() {
    let retriever = retriever_over_real_indices(SourceBehavior::Respond(vec![]));

    let hits = retriever
        .search("まったく関係のない言葉", &RetrievalWeights::default(), 5)
        .unwrap();
    assert!(hits.is_empty());
}

#[test]
fn indices_respect_the_source_contract() {
    let catalog = population_catalog();
    let bm25 = Bm25Index::build(&catalog);
    let tfidf = TfidfIndex::build(&catalog);

    let tokens = vec!["人口".to_string()];
    let bm25_hits = KeywordSource::search(&bm25, &tokens, 3).unwrap();
    let tfidf_hits = KeywordSource::search(&tfidf, &tokens, 3).unwrap();

    assert!(bm25_hits.len() <= 3);
    assert!(tfidf_hits.len() <= 3);
    assert!(bm25_hits.iter().all(|(_, s)| *s > 0.0));
    assert!(tfidf_hits.iter().all(|(_, s)| *s > 0.0));
}
