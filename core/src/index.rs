use crate::error::IndexError;
use crate::tokenizer::{count, tokenize};
use crate::{DocId, FrequencyMap, Posting};
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::thread;

/// The document base: ingested texts plus the frequency map derived from them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    docs: Vec<String>,
    freq_dictionary: FrequencyMap,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Replace the document base and rebuild the frequency map from scratch.
    ///
    /// The new map is built aside and swapped in with the documents only once
    /// it is complete. On error the previous base is left untouched.
    pub fn update_document_base(&mut self, docs: Vec<String>) -> Result<(), IndexError> {
        let freq_dictionary = build(&docs)?;
        self.docs = docs;
        self.freq_dictionary = freq_dictionary;
        Ok(())
    }

    /// Count `word` in every document in a single fork-join pass over the document groups.
    pub fn word_count(&self, word: &str) -> Vec<Posting> {
        let found: Mutex<Vec<Posting>> = Mutex::new(Vec::new());
        let docs = self.docs.as_slice();
        thread::scope(|s| {
            for group in groups_of_elements(docs.len(), worker_count()) {
                let found = &found;
                s.spawn(move || {
                    for doc_id in group {
                        let n = count(&docs[doc_id], word);
                        if n != 0 {
                            found.lock().push(Posting { doc_id, count: n });
                        }
                    }
                });
            }
        });
        let mut postings = found.into_inner();
        postings.sort_unstable_by_key(|p| p.doc_id);
        postings
    }

    pub fn freq_dictionary(&self) -> &FrequencyMap { &self.freq_dictionary }

    pub fn docs(&self) -> &[String] { &self.docs }

    pub fn docs_amount(&self) -> usize { self.docs.len() }
}

/// Build the frequency map for `docs`.
///
/// Two fork-join rounds: vocabulary discovery over round-robin document
/// groups, then counting with one unit of work per distinct word.
pub fn build(docs: &[String]) -> Result<FrequencyMap, IndexError> {
    if docs.is_empty() {
        return Err(IndexError::EmptyDocumentBase);
    }
    let workers = worker_count();
    let groups = groups_of_elements(docs.len(), workers);

    let mut freq_dictionary = discover_vocabulary(docs, &groups);
    count_words(docs, &mut freq_dictionary, workers);

    tracing::debug!(
        num_docs = docs.len(),
        num_words = freq_dictionary.len(),
        groups = groups.len(),
        "built frequency map"
    );
    Ok(freq_dictionary)
}

/// Split `amount` ordinals into round-robin groups: ordinal `i` goes to group `i % groups`.
///
/// `groups` is floored at 1 and shrunk to `amount` so no group is empty.
/// For `amount = 7, groups = 3` the result is `[[0, 3, 6], [1, 4], [2, 5]]`.
pub fn groups_of_elements(amount: usize, groups: usize) -> Vec<Vec<usize>> {
    let groups = groups.max(1).min(amount);
    let mut result = vec![Vec::new(); groups];
    for i in 0..amount {
        result[i % groups].push(i);
    }
    result
}

fn worker_count() -> usize {
    thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1)
}

fn discover_vocabulary(docs: &[String], groups: &[Vec<DocId>]) -> FrequencyMap {
    let dictionary = Mutex::new(FrequencyMap::new());
    thread::scope(|s| {
        for group in groups {
            let dictionary = &dictionary;
            s.spawn(move || {
                for &doc_id in group {
                    for token in tokenize(&docs[doc_id]) {
                        // check and insert under one lock
                        let mut dict = dictionary.lock();
                        if !dict.contains_key(token) {
                            dict.insert(token.to_owned(), Vec::new());
                        }
                    }
                }
            });
        }
    });
    dictionary.into_inner()
}

// Each worker owns a disjoint slice of the map's posting slots, so no lock is needed here.
fn count_words(docs: &[String], dictionary: &mut FrequencyMap, workers: usize) {
    let mut slots: Vec<(&String, &mut Vec<Posting>)> = dictionary.iter_mut().collect();
    if slots.is_empty() {
        return;
    }
    let per_worker = slots.len().div_ceil(workers.max(1));
    thread::scope(|s| {
        for chunk in slots.chunks_mut(per_worker) {
            s.spawn(move || {
                for (word, postings) in chunk.iter_mut() {
                    **postings = postings_for(docs, word.as_str());
                }
            });
        }
    });
}

fn postings_for(docs: &[String], word: &str) -> Vec<Posting> {
    docs.iter()
        .enumerate()
        .filter_map(|(doc_id, text)| {
            let n = count(text, word);
            (n > 0).then_some(Posting { doc_id, count: n })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_groups() {
        assert_eq!(groups_of_elements(7, 3), vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn groups_shrink_to_amount() {
        assert_eq!(groups_of_elements(2, 8), vec![vec![0], vec![1]]);
        assert_eq!(groups_of_elements(3, 0), vec![vec![0, 1, 2]]);
        assert!(groups_of_elements(0, 4).is_empty());
    }

    #[test]
    fn empty_collection_is_rejected() {
        assert_eq!(build(&[]), Err(IndexError::EmptyDocumentBase));
    }

    #[test]
    fn failed_update_keeps_previous_base() {
        let mut index = InvertedIndex::new();
        index.update_document_base(vec!["milk water".to_string()]).unwrap();
        let before = index.clone();
        assert!(index.update_document_base(Vec::new()).is_err());
        assert_eq!(index, before);
    }

    #[test]
    fn whitespace_only_documents_have_no_words() {
        let dict = build(&["   ".to_string(), "\n".to_string()]).unwrap();
        assert!(dict.is_empty());
    }

    #[test]
    fn word_count_matches_counting_pass() {
        let mut index = InvertedIndex::new();
        index
            .update_document_base(vec![
                "a b a".to_string(),
                "b".to_string(),
                "a a a a".to_string(),
            ])
            .unwrap();
        assert_eq!(index.word_count("a"), index.freq_dictionary()["a"]);
        assert!(index.word_count("z").is_empty());
    }
}
