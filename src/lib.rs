//! Multi-word anagrams.
//!
//! A phrase is reduced to the multiset of its letters and split, in every
//! possible way, into dictionary words that together use each letter exactly
//! once. Letter multisets come in two encodings: sorted letter strings
//! ([`Letters`]) and products of per-letter primes ([`Product`]), where
//! divisibility stands in for containment.
//!
//! ```no_run
//! use anagrams::{assemble, Codec, Dictionary, Search, SearchConfig, SortedLetters, WordListOptions};
//!
//! let dictionary = Dictionary::from_path(&SortedLetters, "/usr/share/dict/words", WordListOptions::default())?;
//! let phrase = SortedLetters.encode("dormitory")?;
//! let outcome = Search::new(&dictionary, phrase, SearchConfig::default()).run();
//! for words in assemble(outcome.tree.as_ref(), &dictionary, 0) {
//!     println!("{}", words.join(" "));
//! }
//! # Ok::<(), anagrams::Error>(())
//! ```

pub mod assemble;
pub mod codec;
pub mod dictionary;
pub mod error;
pub mod letters;
pub mod primes;
pub mod search;
pub mod stats;
pub mod tree;

pub use assemble::{assemble, canonicalize, deduplicate, linearize, translate};
pub use codec::{Codec, PrimeWeights, SortedLetters};
pub use dictionary::{read_word_set, CompiledDictionary, Dictionary, WordListOptions};
pub use error::{Error, Result};
pub use letters::{normalize, LetterKey, Letters};
pub use primes::{Product, Weights};
pub use search::{
    CancelFlag, CandidateOrder, Search, SearchConfig, SearchOutcome, SearchSession, SearchStatus,
};
pub use stats::Statistics;
pub use tree::Node;
