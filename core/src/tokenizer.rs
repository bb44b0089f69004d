use std::collections::HashSet;

/// Split text into whitespace-delimited tokens. No case folding, no punctuation stripping.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Distinct tokens of a query; repeated words collapse to one.
pub fn unique_words(query: &str) -> HashSet<&str> {
    tokenize(query).collect()
}

/// Number of tokens in `text` exactly equal to `word`.
pub fn count(text: &str, word: &str) -> usize {
    if text.is_empty() || text.len() < word.len() {
        return 0;
    }
    tokenize(text).filter(|token| *token == word).count()
}
