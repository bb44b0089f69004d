use crate::index::InvertedIndex;
use crate::tokenizer::unique_words;
use crate::{DocId, FrequencyMap, ScoredResult};
use std::collections::HashSet;

pub const DEFAULT_RESPONSE_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of results reported per query.
    pub response_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { response_limit: DEFAULT_RESPONSE_LIMIT }
    }
}

/// Read-only ranker over a fully built document base.
pub struct SearchServer<'a> {
    index: &'a InvertedIndex,
    config: SearchConfig,
}

impl<'a> SearchServer<'a> {
    pub fn new(index: &'a InvertedIndex, config: SearchConfig) -> Self {
        Self { index, config }
    }

    /// Rank every document against each query. One result list per query, in query order.
    pub fn search<S: AsRef<str>>(&self, queries: &[S]) -> Vec<Vec<ScoredResult>> {
        queries
            .iter()
            .map(|q| {
                rank_query(
                    q.as_ref(),
                    self.index.freq_dictionary(),
                    self.index.docs_amount(),
                    self.config.response_limit,
                )
            })
            .collect()
    }
}

/// Rank queries against a frequency map and flatten results to `(doc_id, rank)` pairs.
pub fn run_queries<S: AsRef<str>>(
    queries: &[S],
    index: &FrequencyMap,
    doc_count: usize,
    response_limit: usize,
) -> Vec<Vec<(DocId, f64)>> {
    queries
        .iter()
        .map(|q| {
            rank_query(q.as_ref(), index, doc_count, response_limit)
                .into_iter()
                .map(|r| (r.doc_id, r.rank))
                .collect()
        })
        .collect()
}

/// Score one query: additive term frequency per document, normalised by the
/// best score, sorted by rank descending then doc_id ascending, capped at
/// `response_limit` with zero ranks dropped.
pub fn rank_query(
    query: &str,
    dictionary: &FrequencyMap,
    doc_count: usize,
    response_limit: usize,
) -> Vec<ScoredResult> {
    let words = sort_by_frequency(unique_words(query), dictionary);
    let absolutes = absolute_scores(&words, dictionary, doc_count);
    let mut results = relative_ranks(&absolutes);
    order_and_truncate(&mut results, response_limit);
    tracing::debug!(query, words = words.len(), hits = results.len(), "ranked query");
    results
}

fn total_frequency(word: &str, dictionary: &FrequencyMap) -> usize {
    dictionary
        .get(word)
        .map_or(0, |postings| postings.iter().map(|p| p.count).sum())
}

/// Rarest words first; equal frequencies fall back to the word itself.
fn sort_by_frequency<'q>(words: HashSet<&'q str>, dictionary: &FrequencyMap) -> Vec<&'q str> {
    let mut weighted: Vec<(usize, &str)> = words
        .into_iter()
        .map(|w| (total_frequency(w, dictionary), w))
        .collect();
    weighted.sort_unstable();
    weighted.into_iter().map(|(_, w)| w).collect()
}

fn absolute_scores(words: &[&str], dictionary: &FrequencyMap, doc_count: usize) -> Vec<usize> {
    let mut absolutes = vec![0; doc_count];
    for postings in words.iter().filter_map(|w| dictionary.get(*w)) {
        for posting in postings {
            if let Some(score) = absolutes.get_mut(posting.doc_id) {
                *score += posting.count;
            }
        }
    }
    absolutes
}

fn relative_ranks(absolutes: &[usize]) -> Vec<ScoredResult> {
    // zero when every document scores zero; never used as a divisor then
    let max = absolutes.iter().copied().max().unwrap_or(0);
    absolutes
        .iter()
        .enumerate()
        .map(|(doc_id, &absolute)| ScoredResult {
            doc_id,
            rank: if absolute == 0 { 0.0 } else { absolute as f64 / max as f64 },
        })
        .collect()
}

fn order_and_truncate(results: &mut Vec<ScoredResult>, limit: usize) {
    results.sort_by(|a, b| b.rank.total_cmp(&a.rank).then(a.doc_id.cmp(&b.doc_id)));
    results.truncate(limit);
    while results.last().is_some_and(|r| r.rank == 0.0) {
        results.pop();
    }
}
