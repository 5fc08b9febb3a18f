use crate::error::Result;
use crate::letters::{LetterKey, Letters};
use crate::primes::{Product, Weights};

/// Turns a word into the key it is filed under.
pub trait Codec {
    type Key: LetterKey;

    /// Encodes `word`, which is normalized first.
    fn encode(&self, word: &str) -> Result<Self::Key>;

    /// The weight table to persist alongside a compiled dictionary, if any.
    fn weights(&self) -> Option<&Weights> {
        None
    }
}

/// Keys are the word's letters in sorted order.
#[derive(Clone, Copy, Debug, Default)]
pub struct SortedLetters;

impl Codec for SortedLetters {
    type Key = Letters;

    fn encode(&self, word: &str) -> Result<Letters> {
        Ok(Letters::new(word))
    }
}

/// Keys are products of per-letter primes.
#[derive(Clone, Debug)]
pub struct PrimeWeights(pub Weights);

impl Codec for PrimeWeights {
    type Key = Product;

    fn encode(&self, word: &str) -> Result<Product> {
        self.0.product(&crate::letters::normalize(word))
    }

    fn weights(&self) -> Option<&Weights> {
        Some(&self.0)
    }
}
