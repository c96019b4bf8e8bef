//! Input validation journeys: rejected queries never reach the sources

use statseek_e2e_tests::mocks::{retriever_with, SourceBehavior};
use statseek_core::{RetrievalWeights, RetrieverConfig, SearchError};

#[test]
fn empty_query_is_rejected_before_any_source_call() {
    let (retriever, vector, bm25, tfidf) = retriever_with(
        SourceBehavior::Respond(vec![("A110101".to_string(), 0.9)]),
        SourceBehavior::Respond(vec![]),
        SourceBehavior::Respond(vec![]),
        RetrieverConfig::default(),
    );

    for query in ["", "   ", "\t\n"] {
        let result = retriever.search(query, &RetrievalWeights::default(), 10);
        assert!(matches!(result, Err(SearchError::InvalidQuery)));
    }

    assert_eq!(vector.calls(), 0);
    assert_eq!(bm25.calls(), 0);
    assert_eq!(tfidf.calls(), 0);
}

#[test]
fn zero_top_k_is_rejected() {
    let (retriever, _, _, _) = retriever_with(
        SourceBehavior::Respond(vec![]),
        SourceBehavior::Respond(vec![]),
        SourceBehavior::Respond(vec![]),
        RetrieverConfig::default(),
    );

    let result = retriever.search("人口", &RetrievalWeights::default(), 0);
    assert!(matches!(result, Err(SearchError::InvalidLimit(0))));
}

#[test]
fn all_zero_weights_are_rejected() {
    let (retriever, _, _, _) = retriever_with(
        SourceBehavior::Respond(vec![]),
        SourceBehavior::Respond(vec![]),
        SourceBehavior::Respond(vec![]),
        RetrieverConfig::default(),
    );

    let result = retriever.search("人口", &RetrievalWeights::new(0.0, 0.0, 0.0), 10);
    assert!(matches!(result, Err(SearchError::InvalidWeights(_))));
}

#[test]
fn all_sources_empty_is_a_valid_empty_result() {
    let (retriever, _, _, _) = retriever_with(
        SourceBehavior::Respond(vec![]),
        SourceBehavior::Respond(vec![]),
        SourceBehavior::Respond(vec![]),
        RetrieverConfig::default(),
    );

    let hits = retriever
        .search("存在しない指標", &RetrievalWeights::default(), 10)
        .unwrap();
    assert!(hits.is_empty());
}
