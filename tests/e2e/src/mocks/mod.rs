//! Mock collaborators and fixtures

mod fixtures;

pub use fixtures::{
    population_catalog, retriever_with, BlockedEmbedder, MockEmbedder, MockKeywordSource,
    MockVectorSource, SourceBehavior,
};
