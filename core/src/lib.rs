use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod converter;
pub mod error;
pub mod index;
pub mod search;
pub mod tokenizer;

pub use error::{ConfigError, IndexError};
pub use index::{build as build_index, InvertedIndex};
pub use search::{run_queries, SearchConfig, SearchServer};

/// Zero-based position of a document in the ingested collection.
pub type DocId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub count: usize, // always >= 1
}

/// word -> postings, one per document containing the word, sorted by doc_id
pub type FrequencyMap = BTreeMap<String, Vec<Posting>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub doc_id: DocId,
    pub rank: f64,
}
