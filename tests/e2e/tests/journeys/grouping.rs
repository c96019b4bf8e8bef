//! Family grouping and stale-id journeys

use statseek_e2e_tests::mocks::{retriever_with, SourceBehavior};
use statseek_core::{RetrievalWeights, RetrieverConfig};

fn respond(results: &[(&str, f32)]) -> SourceBehavior {
    SourceBehavior::Respond(
        results
            .iter()
            .map(|(id, score)| (id.to_string(), *score))
            .collect(),
    )
}

#[test]
fn one_indicator_per_family_in_the_result() {
    // 総人口 / 総人口（男） / 総人口（女） share group A1101; only the
    // best-ranked one may surface. 人口密度 is its own family.
    let (retriever, _, _, _) = retriever_with(
        respond(&[
            ("A110101", 0.9),
            ("A110102", 0.8),
            ("A110103", 0.7),
            ("A210501", 0.6),
        ]),
        respond(&[]),
        respond(&[]),
        RetrieverConfig::default(),
    );

    let hits = retriever
        .search("人口", &RetrievalWeights::default(), 10)
        .unwrap();

    let ids: Vec<&str> = hits.iter().map(|h| h.record.id.as_str()).collect();
    assert_eq!(ids, vec!["A110101", "A210501"]);
}

#[test]
fn group_dedup_can_be_disabled() {
    let config = RetrieverConfig {
        group_dedup: false,
        ..Default::default()
    };
    let (retriever, _, _, _) = retriever_with(
        respond(&[("A110101", 0.9), ("A110102", 0.8), ("A110103", 0.7)]),
        respond(&[]),
        respond(&[]),
        config,
    );

    let hits = retriever
        .search("人口", &RetrievalWeights::default(), 10)
        .unwrap();
    assert_eq!(hits.len(), 3);
}

#[test]
fn stale_ids_are_dropped_silently() {
    // Source answers with an id the loaded catalog does not know; that
    // single candidate disappears, the rest of the query succeeds.
    let (retriever, _, _, _) = retriever_with(
        respond(&[("Z999999", 0.95), ("A110101", 0.9)]),
        respond(&[]),
        respond(&[]),
        RetrieverConfig::default(),
    );

    let hits = retriever
        .search("人口", &RetrievalWeights::default(), 10)
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record.id, "A110101");
}

#[test]
fn stale_ids_do_not_consume_top_k_slots() {
    let (retriever, _, _, _) = retriever_with(
        respond(&[("Z999999", 0.95), ("A110101", 0.9), ("E250102", 0.4)]),
        respond(&[]),
        respond(&[]),
        RetrieverConfig::default(),
    );

    let hits = retriever
        .search("人口", &RetrievalWeights::default(), 2)
        .unwrap();

    // Both resolvable candidates fill the two slots
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.record.id != "Z999999"));
}
