//! Prime-product encoding of letter multisets.
//!
//! Each letter gets its own prime and a word is encoded as the product of
//! the primes of its letters. By unique factorisation the product
//! identifies the multiset, and `a` is a sub-multiset of `b` exactly when
//! `a` divides `b`. The divisibility shortcut only holds because the
//! weights are pairwise coprime; with arbitrary weights it would be
//! necessary but not sufficient. Products are arbitrary precision, so a
//! phrase of any length has an encoding.

use std::collections::BTreeMap;
use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::letters::{normalize, LetterKey};

/// Letters ordered so that the common ones get small primes.
const FIXED_ORDER: &str = "eariotnslcudpmhgbfywkvxzjq";

fn is_prime(n: u32) -> bool {
    let n = u64::from(n);
    n >= 2 && (2u64..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

fn primes() -> impl Iterator<Item = u32> {
    (2u32..).filter(|&n| is_prime(n))
}

/// An injective mapping from letters to distinct primes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Weights {
    table: BTreeMap<char, u32>,
}

impl Weights {
    /// The a-priori table: `e` is 2, `a` is 3, ..., `q` is 101.
    pub fn fixed() -> Self {
        Weights {
            table: FIXED_ORDER.chars().zip(primes()).collect(),
        }
    }

    /// Gives the most frequent letters of `corpus` the smallest primes, which
    /// keeps products small for typical input. Ties go to the smaller letter.
    pub fn from_corpus<'a, I>(corpus: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: FxHashMap<char, usize> = FxHashMap::default();
        for word in corpus {
            for c in normalize(word).chars() {
                *counts.entry(c).or_insert(0) += 1;
            }
        }
        let mut letters: Vec<(char, usize)> = counts.into_iter().collect();
        letters.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        Weights {
            table: letters.into_iter().map(|(c, _)| c).zip(primes()).collect(),
        }
    }

    /// Rebuilds a table from `(letter, weight)` pairs, checking that every
    /// weight is a prime used only once.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, u32)>,
    {
        let mut table = BTreeMap::new();
        let mut used = Vec::new();
        for (letter, weight) in pairs {
            if !is_prime(weight) || used.contains(&weight) || table.insert(letter, weight).is_some() {
                return Err(Error::InvalidWeight { letter, weight });
            }
            used.push(weight);
        }
        Ok(Weights { table })
    }

    pub fn weight(&self, letter: char) -> Option<u32> {
        self.table.get(&letter).copied()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        self.table.iter().map(|(&c, &w)| (c, w))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Encodes an already normalized word.
    pub fn product(&self, word: &str) -> Result<Product> {
        let mut value = BigUint::one();
        let mut len = 0;
        for c in word.chars() {
            value *= self.weight(c).ok_or(Error::UnknownLetter(c))?;
            len += 1;
        }
        Ok(Product { value, len })
    }
}

/// A letter multiset encoded as a product of prime weights.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Product {
    value: BigUint,
    len: u32,
}

impl Product {
    pub fn value(&self) -> &BigUint {
        &self.value
    }
}

impl LetterKey for Product {
    fn len(&self) -> usize {
        self.len as usize
    }

    fn is_submultiset_of(&self, target: &Self) -> bool {
        self.len <= target.len && (&target.value % &self.value).is_zero()
    }

    fn checked_subtract(&self, candidate: &Self) -> Option<Self> {
        if candidate.is_submultiset_of(self) {
            Some(Product {
                value: &self.value / &candidate.value,
                len: self.len - candidate.len,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Debug for Product {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Product({}, {} letters)", self.value, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_primes() {
        let first: Vec<u32> = primes().take(10).collect();
        assert_eq!(first, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn fixed_table() {
        let weights = Weights::fixed();
        assert_eq!(weights.len(), 26);
        assert_eq!(weights.weight('e'), Some(2));
        assert_eq!(weights.weight('a'), Some(3));
        assert_eq!(weights.weight('q'), Some(101));
        // care = c * a * r * e
        assert_eq!(*weights.product("care").unwrap().value(), BigUint::from(29u32 * 3 * 5 * 2));
    }

    #[test]
    fn corpus_weights_favour_frequent_letters() {
        let weights = Weights::from_corpus(vec!["zzz", "zy", "x"]);
        assert_eq!(weights.weight('z'), Some(2));
        // 'x' and 'y' tie, the smaller letter wins.
        assert_eq!(weights.weight('x'), Some(3));
        assert_eq!(weights.weight('y'), Some(5));
        assert_eq!(weights.weight('a'), None);
    }

    #[test]
    fn unknown_letters_are_errors() {
        let weights = Weights::from_corpus(vec!["ab"]);
        assert!(matches!(weights.product("abc"), Err(Error::UnknownLetter('c'))));
    }

    #[test]
    fn long_words_do_not_overflow() {
        let weights = Weights::fixed();
        let long = weights.product(&"q".repeat(40)).unwrap();
        assert_eq!(*long.value(), BigUint::from(101u32).pow(40));
        assert_eq!(long.len(), 40);

        let phrase = weights.product("thequickbrownfoxjumpsoverthelazydog").unwrap();
        let fox = weights.product("fox").unwrap();
        let rest = phrase.subtract(&fox).unwrap();
        assert_eq!(rest.len(), 32);
        assert!(!fox.is_submultiset_of(&rest));
    }

    #[test]
    fn division_is_subtraction() {
        let weights = Weights::fixed();
        let phrase = weights.product("catnip").unwrap();
        let cat = weights.product("cat").unwrap();
        let nip = weights.product("nip").unwrap();
        assert!(cat.is_submultiset_of(&phrase));
        assert_eq!(phrase.subtract(&cat).unwrap(), nip);
        assert!(phrase.checked_subtract(&weights.product("dog").unwrap()).is_none());
        assert!(phrase.subtract(&phrase).unwrap().is_empty());
    }

    #[test]
    fn from_pairs_rejects_shared_or_composite_weights() {
        assert!(Weights::from_pairs(vec![('a', 2), ('b', 3)]).is_ok());
        assert!(Weights::from_pairs(vec![('a', 2), ('b', 2)]).is_err());
        assert!(Weights::from_pairs(vec![('a', 4)]).is_err());
        assert!(Weights::from_pairs(vec![('a', 2), ('a', 3)]).is_err());
    }
}
