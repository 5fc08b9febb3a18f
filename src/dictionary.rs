//! The dictionary index: every key maps to the words spelt with exactly
//! those letters.

use std::fs::File;
use std::io::{self, prelude::*};
use std::path::Path;

use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::letters::{normalize, LetterKey};
use crate::primes::Weights;

#[derive(Clone, Copy, Debug, Default)]
pub struct WordListOptions {
    /// Keep capitalised words, which are otherwise taken to be proper nouns.
    pub keep_proper_nouns: bool,
}

#[derive(Clone, Debug)]
pub struct Dictionary<K: LetterKey> {
    entries: FxHashMap<K, Vec<Box<str>>>,
}

impl<K: LetterKey> Default for Dictionary<K> {
    fn default() -> Self {
        Dictionary {
            entries: FxHashMap::default(),
        }
    }
}

impl<K: LetterKey> Dictionary<K> {
    /// Files every acceptable word under its key. Words with anything other
    /// than letters in them are dropped, as are words the codec cannot encode.
    pub fn from_words<'a, C, I>(codec: &C, words: I, options: WordListOptions) -> Self
    where
        C: Codec<Key = K>,
        I: IntoIterator<Item = &'a str>,
    {
        let mut dictionary = Dictionary::default();

        for line in words {
            let word = line.trim();
            if word.is_empty() { continue }
            if !word.chars().all(char::is_alphabetic) { continue }
            if !options.keep_proper_nouns && word.chars().next().map_or(false, char::is_uppercase) {
                continue;
            }

            let word = word.to_lowercase();
            match codec.encode(&word) {
                Ok(key) => dictionary.insert(key, &word),
                Err(e) => debug!("skipping {:?}: {}", word, e),
            }
        }

        dictionary
    }

    pub fn from_reader<C, R>(codec: &C, mut reader: R, options: WordListOptions) -> io::Result<Self>
    where
        C: Codec<Key = K>,
        R: Read,
    {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Ok(Self::from_words(codec, contents.split_whitespace(), options))
    }

    pub fn from_path<C, P>(codec: &C, path: P, options: WordListOptions) -> Result<Self>
    where
        C: Codec<Key = K>,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        File::open(path)
            .and_then(|file| Self::from_reader(codec, file, options))
            .map_err(|source| Error::DictionaryUnavailable {
                path: path.to_owned(),
                source,
            })
    }

    fn insert(&mut self, key: K, word: &str) {
        let class = self.entries.entry(key).or_insert_with(Vec::new);
        if !class.iter().any(|w| &**w == word) {
            class.push(word.into());
        }
    }

    /// A fresh dictionary holding only the keys with at least `min_len`
    /// letters that can be spelt from `target`.
    pub fn prune(&self, target: &K, min_len: usize) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|(key, _)| key.len() >= min_len && key.is_submultiset_of(target))
            .map(|(key, words)| (key.clone(), words.clone()))
            .collect();
        Dictionary { entries }
    }

    pub fn restrict_lengths(&mut self, min_letters: usize, max_letters: usize) {
        self.entries.retain(|key, _| {
            key.len() >= min_letters && key.len() <= max_letters
        });
    }

    /// Removes each of `words` from its class, dropping classes that become
    /// empty. Words are normalized first, so `"Dirty,"` removes `dirty`.
    /// Returns how many words were removed.
    pub fn exclude<C, S>(&mut self, codec: &C, words: &[S]) -> usize
    where
        C: Codec<Key = K>,
        S: AsRef<str>,
    {
        let mut removed = 0;
        for word in words {
            let word = normalize(word.as_ref());
            if word.is_empty() { continue }
            let key = match codec.encode(&word) {
                Ok(key) => key,
                Err(_) => continue,
            };
            if let Some(class) = self.entries.get_mut(&key) {
                let before = class.len();
                class.retain(|w| **w != *word);
                removed += before - class.len();
                if class.is_empty() {
                    self.entries.remove(&key);
                }
            }
        }
        removed
    }

    pub fn get(&self, key: &K) -> Option<&[Box<str>]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[Box<str>])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn compile<C: Codec<Key = K>>(&self, codec: &C) -> CompiledDictionary {
        let mut classes: Vec<Vec<String>> = self
            .entries
            .values()
            .map(|words| words.iter().map(|w| w.to_string()).collect())
            .collect();
        classes.sort_unstable();
        CompiledDictionary {
            weights: codec.weights().map(|w| w.pairs().collect()),
            classes,
        }
    }

    pub fn save_json<C, W>(&self, codec: &C, writer: W) -> Result<()>
    where
        C: Codec<Key = K>,
        W: Write,
    {
        serde_json::to_writer_pretty(writer, &self.compile(codec))?;
        Ok(())
    }
}

/// The on-disk form of a dictionary: its anagram classes and, for prime
/// encoding, the weight table the keys were built with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledDictionary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<(char, u32)>>,
    pub classes: Vec<Vec<String>>,
}

impl CompiledDictionary {
    pub fn load_json<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::DictionaryUnavailable {
            path: path.to_owned(),
            source,
        })?;
        Self::load_json(io::BufReader::new(file))
    }

    pub fn weights(&self) -> Result<Option<Weights>> {
        self.weights
            .as_ref()
            .map(|pairs| Weights::from_pairs(pairs.iter().copied()))
            .transpose()
    }

    /// Re-encodes every stored word with `codec`.
    pub fn to_dictionary<C: Codec>(&self, codec: &C) -> Dictionary<C::Key> {
        let options = WordListOptions {
            keep_proper_nouns: true,
        };
        Dictionary::from_words(
            codec,
            self.classes.iter().flatten().map(String::as_str),
            options,
        )
    }
}

/// Reads a whitespace-separated list of words to exclude.
pub fn read_word_set<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    std::fs::read_to_string(path)
        .map(|contents| contents.split_whitespace().map(str::to_lowercase).collect())
        .map_err(|source| Error::ExclusionListUnavailable {
            path: path.to_owned(),
            source,
        })
}
