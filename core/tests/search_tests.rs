use wordrank_core::{build_index, run_queries, InvertedIndex, ScoredResult, SearchConfig, SearchServer};

fn docs(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

fn scored(pairs: &[(usize, f64)]) -> Vec<ScoredResult> {
    pairs.iter().map(|&(doc_id, rank)| ScoredResult { doc_id, rank }).collect()
}

fn index_of(texts: &[&str]) -> InvertedIndex {
    let mut index = InvertedIndex::new();
    index.update_document_base(docs(texts)).unwrap();
    index
}

#[test]
fn simple() {
    let index = index_of(&[
        "milk milk milk milk water water water",
        "milk water water",
        "milk milk milk milk milk water water water water water",
        "americano cappuccino",
    ]);
    let server = SearchServer::new(&index, SearchConfig::default());
    let results = server.search(&["milk water", "sugar"]);
    let expected = vec![scored(&[(2, 1.0), (0, 0.7), (1, 0.3)]), scored(&[])];
    assert_eq!(results, expected);
}

#[test]
fn top_five() {
    let index = index_of(&[
        "london is the capital of great britain",
        "paris is the capital of france",
        "berlin is the capital of germany",
        "rome is the capital of italy",
        "madrid is the capital of spain",
        "lisboa is the capital of portugal",
        "bern is the capital of switzerland",
        "moscow is the capital of russia",
        "kiev is the capital of ukraine",
        "minsk is the capital of belarus",
        "astana is the capital of kazakhstan",
        "beijing is the capital of china",
        "tokyo is the capital of japan",
        "bangkok is the capital of thailand",
        "welcome to moscow the capital of russia the third rome",
        "amsterdam is the capital of netherlands",
        "helsinki is the capital of finland",
        "oslo is the capital of norway",
        "stockholm is the capital of sweden",
        "riga is the capital of latvia",
        "tallinn is the capital of estonia",
        "warsaw is the capital of poland",
    ]);
    let server = SearchServer::new(&index, SearchConfig::default());
    let results = server.search(&["moscow is the capital of russia"]);
    let two_thirds = 4.0 / 6.0;
    let expected = vec![scored(&[
        (7, 1.0),
        (14, 1.0),
        (0, two_thirds),
        (1, two_thirds),
        (2, two_thirds),
    ])];
    assert_eq!(results, expected);
}

#[test]
fn ties_break_by_ordinal() {
    let corpus = docs(&[
        "london is the capital of great britain",
        "big ben is the famous clock in london",
    ]);
    let dict = build_index(&corpus).unwrap();
    let results = run_queries(&["london", "paris"], &dict, corpus.len(), 5);
    assert_eq!(results, vec![vec![(0, 1.0), (1, 1.0)], vec![]]);
}

#[test]
fn empty_query_yields_nothing() {
    let index = index_of(&["a b c"]);
    let server = SearchServer::new(&index, SearchConfig::default());
    assert_eq!(server.search(&["", "   "]), vec![Vec::new(), Vec::new()]);
}

#[test]
fn results_respect_limit_order_and_positive_rank() {
    let corpus: Vec<String> = (0..30)
        .map(|i| format!("{} {}", "x ".repeat(i % 7), "y ".repeat(i % 4)))
        .collect();
    let dict = build_index(&corpus).unwrap();
    for limit in [1, 3, 5, 50] {
        for query in ["x", "y", "x y y", "z", "x z"] {
            let results = &run_queries(&[query], &dict, corpus.len(), limit)[0];
            assert!(results.len() <= limit);
            assert!(results.iter().all(|&(_, rank)| rank > 0.0 && rank <= 1.0));
            assert!(results
                .windows(2)
                .all(|w| w[0].1 > w[1].1 || (w[0].1 == w[1].1 && w[0].0 < w[1].0)));
        }
    }
}
