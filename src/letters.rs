//! Letter multisets.
//!
//! A phrase and every dictionary word are reduced to the multiset of their
//! letters. Two words are anagrams exactly when their multisets are equal,
//! and a word can be spelt from a phrase exactly when its multiset is
//! contained in the phrase's.

use std::fmt;
use std::hash::Hash;

use crate::error::{Error, Result};

/// An immutable letter multiset used as a dictionary key and as a search
/// remainder.
pub trait LetterKey: Clone + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync {
    /// Number of letters, counting repeats.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True iff every letter of `self` occurs in `target` at least as often.
    fn is_submultiset_of(&self, target: &Self) -> bool;

    /// The letters left after removing `candidate` from `self`, or `None`
    /// if `candidate` is not a sub-multiset of `self`.
    fn checked_subtract(&self, candidate: &Self) -> Option<Self>;

    /// Like [`checked_subtract`](LetterKey::checked_subtract), but treats an
    /// impossible removal as an error instead of an expected outcome.
    fn subtract(&self, candidate: &Self) -> Result<Self> {
        self.checked_subtract(candidate)
            .ok_or_else(|| Error::InvalidSubtraction {
                target: self.to_string(),
                candidate: candidate.to_string(),
            })
    }
}

/// Lower-cases `text` and keeps only its alphabetic characters.
pub fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphabetic() {
            result.extend(c.to_lowercase());
        }
    }
    result
}

/// Letters in sorted order, e.g. `"aet"` for "tea".
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letters {
    sorted: Box<str>,
    len: usize,
}

impl Letters {
    pub fn new(word: &str) -> Self {
        let mut chars: Vec<char> = normalize(word).chars().collect();
        chars.sort_unstable();
        let len = chars.len();
        Letters {
            sorted: chars.into_iter().collect::<String>().into(),
            len,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.sorted
    }
}

impl LetterKey for Letters {
    fn len(&self) -> usize {
        self.len
    }

    fn is_submultiset_of(&self, target: &Self) -> bool {
        if self.len > target.len {
            return false;
        }
        let mut pool = target.sorted.chars();
        'outer: for c in self.sorted.chars() {
            for p in pool.by_ref() {
                if p == c {
                    continue 'outer;
                }
                if p > c {
                    return false;
                }
            }
            return false;
        }
        true
    }

    fn checked_subtract(&self, candidate: &Self) -> Option<Self> {
        if candidate.len > self.len {
            return None;
        }
        let mut result = String::with_capacity(self.sorted.len());

        // Both sides are sorted, so one merge pass suffices.
        let mut word_chars = candidate.sorted.chars().peekable();
        for c in self.sorted.chars() {
            match word_chars.peek() {
                Some(&next) if next == c => {
                    word_chars.next();
                }
                Some(&next) if next < c => return None,
                _ => result.push(c),
            }
        }

        if word_chars.peek().is_some() {
            return None;
        }
        Some(Letters {
            sorted: result.into(),
            len: self.len - candidate.len,
        })
    }
}

impl fmt::Display for Letters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.sorted)
    }
}

impl fmt::Debug for Letters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Letters({:?})", &*self.sorted)
    }
}
