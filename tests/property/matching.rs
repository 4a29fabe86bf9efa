//! Matching invariants: soundness, completeness, order, case folding.

use crate::common::make_record;
use gleaner::{search, search_with_options, Corpus, PostRecord, SearchIndex, SearchOptions};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Small alphabet so random queries actually hit. Case pairs whose folding
/// round-trips (no ß, no dotted I) keep the case properties exact.
fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[abcABC éÉ]{0,16}").unwrap()
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[abcABC éÉ]{1,4}").unwrap()
}

fn corpus_strategy() -> impl Strategy<Value = Corpus> {
    prop::collection::vec((text_strategy(), text_strategy()), 0..10).prop_map(|fields| {
        let posts = fields
            .into_iter()
            .enumerate()
            .map(|(i, (title, content))| make_record(&title, &format!("/p/{}", i), &content))
            .collect();
        Corpus::new(posts).unwrap()
    })
}

/// The matching rule written out longhand.
fn oracle(post: &PostRecord, query: &str) -> bool {
    let q = query.to_lowercase();
    post.title.to_lowercase().contains(&q) || post.content.to_lowercase().contains(&q)
}

fn positions(corpus: &Corpus, results: &[&PostRecord]) -> Vec<usize> {
    results
        .iter()
        .map(|r| corpus.iter().position(|p| p.url == r.url).unwrap())
        .collect()
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// A post is returned iff it contains the query (sound and complete).
    #[test]
    fn prop_results_are_exactly_the_matching_posts(corpus in corpus_strategy(), query in query_strategy()) {
        let results = search(&corpus, &query);
        let expected: Vec<&PostRecord> = corpus.iter().filter(|p| oracle(p, &query)).collect();
        prop_assert_eq!(results, expected);
    }

    /// Results are a subsequence of the corpus.
    #[test]
    fn prop_results_keep_corpus_order(corpus in corpus_strategy(), query in query_strategy()) {
        let results = search(&corpus, &query);
        let positions = positions(&corpus, &results);
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    /// Changing the case of the query changes nothing.
    #[test]
    fn prop_case_insensitive(corpus in corpus_strategy(), query in query_strategy()) {
        let index = SearchIndex::new(corpus);
        let base = index.search(&query);
        prop_assert_eq!(&base, &index.search(&query.to_uppercase()));
        prop_assert_eq!(&base, &index.search(&query.to_lowercase()));
    }

    /// The same query always gives the same answer.
    #[test]
    fn prop_deterministic(corpus in corpus_strategy(), query in query_strategy()) {
        let index = SearchIndex::new(corpus);
        prop_assert_eq!(index.search(&query), index.search(&query));
    }

    /// The empty query never matches, whatever the corpus.
    #[test]
    fn prop_empty_query_matches_nothing(corpus in corpus_strategy()) {
        prop_assert!(search(&corpus, "").is_empty());
        prop_assert!(SearchIndex::new(corpus).search("").is_empty());
    }

    /// Folding once at load time gives the same answers as folding per query.
    #[test]
    fn prop_index_agrees_with_scan(corpus in corpus_strategy(), query in query_strategy()) {
        let scanned = search(&corpus, &query);
        let index = SearchIndex::new(corpus.clone());
        prop_assert_eq!(scanned, index.search(&query));
    }

    /// A limit keeps a prefix of the unlimited results.
    #[test]
    fn prop_limit_is_a_prefix(corpus in corpus_strategy(), query in query_strategy(), limit in 0usize..12) {
        let full = search(&corpus, &query);
        let limited = search_with_options(&corpus, &query, &SearchOptions::with_limit(limit));
        prop_assert_eq!(limited.len(), full.len().min(limit));
        prop_assert_eq!(&full[..limited.len()], &limited[..]);
    }

    /// Extending a query can only narrow the result set.
    #[test]
    fn prop_longer_query_narrows(corpus in corpus_strategy(), query in query_strategy(), suffix in query_strategy()) {
        let short = search(&corpus, &query);
        let long = search(&corpus, &format!("{}{}", query, suffix));
        prop_assert!(long.iter().all(|p| short.contains(p)));
    }
}
