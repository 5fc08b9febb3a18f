#![allow(dead_code)]

//! Helpers shared by the integration tests.

use std::collections::BTreeSet;

use anagrams::{
    assemble, Codec, Dictionary, PrimeWeights, Search, SearchConfig, SearchOutcome, SortedLetters,
    Weights, WordListOptions,
};

pub fn config(min_len: usize) -> SearchConfig {
    SearchConfig {
        min_len,
        ..SearchConfig::default()
    }
}

/// Runs a search with both codecs, checks they agree, and returns the
/// sorted-letter outcome with its rendered anagrams.
pub fn solve(words: &str, phrase: &str, config: SearchConfig) -> (SearchOutcome<anagrams::Letters>, BTreeSet<Vec<String>>) {
    let dictionary = Dictionary::from_words(&SortedLetters, words.split_whitespace(), WordListOptions::default());
    let key = SortedLetters.encode(phrase).unwrap();
    let outcome = Search::new(&dictionary, key, config.clone()).run();
    let anagrams = assemble(outcome.tree.as_ref(), &dictionary, config.min_words);

    let codec = PrimeWeights(Weights::fixed());
    let dictionary = Dictionary::from_words(&codec, words.split_whitespace(), WordListOptions::default());
    let key = codec.encode(phrase).unwrap();
    let by_primes = Search::new(&dictionary, key, config.clone()).run();
    assert_eq!(by_primes.status, outcome.status);
    assert_eq!(assemble(by_primes.tree.as_ref(), &dictionary, config.min_words), anagrams);

    (outcome, anagrams)
}

pub fn rendered(anagrams: &BTreeSet<Vec<String>>) -> Vec<String> {
    anagrams.iter().map(|words| words.join(" ")).collect()
}

/// The phrase's letters, sorted, against all the words' letters, sorted.
pub fn same_letters(phrase: &str, words: &[String]) -> bool {
    let mut expected: Vec<char> = anagrams::normalize(phrase).chars().collect();
    let mut actual: Vec<char> = words.iter().flat_map(|w| w.chars()).collect();
    expected.sort_unstable();
    actual.sort_unstable();
    expected == actual
}
