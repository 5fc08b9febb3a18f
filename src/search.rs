//! The decomposition search.
//!
//! Candidates are the keys of the dictionary pruned against the phrase, held
//! in one fixed order. A step that takes candidate `j` only passes candidates
//! `j..` on to the remainder, so every multiset of keys is generated exactly
//! once (in non-increasing candidate order) and the pool seen by a remainder
//! only ever shrinks as the search goes deeper. A word may follow itself,
//! which is how "cancan" becomes "can can".
//!
//! Because the pool reachable from a remainder depends only on the remainder
//! and the index it starts from, a remainder proven undecomposable from index
//! `i` stays undecomposable from any later index. The session memoizes that.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::dictionary::Dictionary;
use crate::letters::LetterKey;
use crate::stats::Statistics;
use crate::tree::Node;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandidateOrder {
    /// Most letters first, as a person would try.
    LongestFirst,
    ShortestFirst,
    /// A shuffle that is reproducible for a given seed.
    Random(u64),
}

impl CandidateOrder {
    fn apply<K: LetterKey>(self, candidates: &mut [K]) {
        match self {
            CandidateOrder::LongestFirst => {
                candidates.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)))
            }
            CandidateOrder::ShortestFirst => {
                candidates.sort_unstable_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
            }
            CandidateOrder::Random(seed) => {
                // Shuffle from a canonical order so hash map iteration can't leak in.
                candidates.sort_unstable();
                candidates.shuffle(&mut StdRng::seed_from_u64(seed));
            }
        }
    }
}

impl FromStr for CandidateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "longest" => Ok(CandidateOrder::LongestFirst),
            "shortest" => Ok(CandidateOrder::ShortestFirst),
            "random" => Ok(CandidateOrder::Random(0)),
            other => Err(format!("unknown order {:?}, expected longest, shortest or random", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Shortest word allowed in a decomposition.
    pub min_len: usize,
    /// Longest word allowed in a decomposition.
    pub max_len: Option<usize>,
    /// Decompositions with fewer words are dropped when assembling.
    pub min_words: usize,
    pub max_words: Option<usize>,
    /// Wall-clock budget, checked before each root candidate.
    pub time_limit: Option<Duration>,
    pub order: CandidateOrder,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            min_len: 2,
            max_len: None,
            min_words: 0,
            max_words: None,
            time_limit: None,
            order: CandidateOrder::LongestFirst,
        }
    }
}

/// Cooperative cancellation shared between a search and whoever wants to
/// stop it.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        CancelFlag::default()
    }

    /// Raises the flag. Returns true if it was already raised.
    pub fn cancel(&self) -> bool {
        self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Complete,
    /// The time budget ran out; results are partial.
    TimedOut,
    /// The search was cancelled; results are partial.
    Cancelled,
    /// No dictionary word fits in the phrase at all.
    NoFeasibleWords,
}

impl SearchStatus {
    pub fn is_partial(self) -> bool {
        matches!(self, SearchStatus::TimedOut | SearchStatus::Cancelled)
    }
}

#[derive(Clone, Debug)]
pub struct SearchOutcome<K> {
    /// `None` when nothing was found.
    pub tree: Option<Node<K>>,
    pub status: SearchStatus,
    pub statistics: Statistics,
}

/// Mutable state owned by a single search.
#[derive(Debug)]
pub struct SearchSession<K: LetterKey> {
    seen_roots: FxHashSet<K>,
    /// `(remainder, words left)` to the smallest candidate index from which
    /// the remainder is known to have no decomposition.
    dead_ends: FxHashMap<(K, Option<usize>), usize>,
    pub statistics: Statistics,
}

impl<K: LetterKey> Default for SearchSession<K> {
    fn default() -> Self {
        SearchSession {
            seen_roots: FxHashSet::default(),
            dead_ends: FxHashMap::default(),
            statistics: Statistics::default(),
        }
    }
}

impl<K: LetterKey> SearchSession<K> {
    pub fn new() -> Self {
        SearchSession::default()
    }

    /// True if `remainder` is known to have no decomposition using
    /// candidates from index `from` on.
    pub fn is_dead(&self, remainder: &K, from: usize, words_left: Option<usize>) -> bool {
        self.dead_ends
            .get(&(remainder.clone(), words_left))
            .map_or(false, |&first| first <= from)
    }

    fn mark_dead(&mut self, remainder: K, from: usize, words_left: Option<usize>) {
        let first = self.dead_ends.entry((remainder, words_left)).or_insert(from);
        *first = (*first).min(from);
    }

    pub fn dead_end_count(&self) -> usize {
        self.dead_ends.len()
    }

    pub fn has_seen_root(&self, root: &K) -> bool {
        self.seen_roots.contains(root)
    }
}

/// A search for the decompositions of one phrase.
#[derive(Debug)]
pub struct Search<K: LetterKey> {
    phrase: K,
    candidates: Vec<K>,
    positions: FxHashMap<K, usize>,
    config: SearchConfig,
    cancel: CancelFlag,
}

impl<K: LetterKey> Search<K> {
    /// Prunes `dictionary` to the keys that fit `phrase` and puts them in the
    /// configured order. The dictionary itself is left alone.
    pub fn new(dictionary: &Dictionary<K>, phrase: K, config: SearchConfig) -> Self {
        let mut pruned = dictionary.prune(&phrase, config.min_len);
        if let Some(max_len) = config.max_len {
            pruned.restrict_lengths(config.min_len, max_len);
        }
        info!(
            "Initial pruning: {} keys representing {} words.",
            pruned.len(),
            pruned.word_count()
        );

        let mut candidates: Vec<K> = pruned.keys().cloned().collect();
        config.order.apply(&mut candidates);
        let positions = candidates
            .iter()
            .enumerate()
            .map(|(i, key)| (key.clone(), i))
            .collect();

        Search {
            phrase,
            candidates,
            positions,
            config,
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn phrase(&self) -> &K {
        &self.phrase
    }

    /// The pruned candidates in search order.
    pub fn candidates(&self) -> &[K] {
        &self.candidates
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn run(&self) -> SearchOutcome<K> {
        let mut session = SearchSession::new();
        let start = Instant::now();
        let (tree, status) = self.run_with_session(&mut session, start);
        session.statistics.elapsed = start.elapsed();
        self.finish(tree, status, session.statistics)
    }

    /// Like [`run`](Search::run), but explores the root candidates on the
    /// rayon thread pool. Each root gets its own session.
    pub fn run_parallel(&self) -> SearchOutcome<K> {
        let start = Instant::now();
        if self.candidates.is_empty() {
            return self.finish(None, SearchStatus::NoFeasibleWords, Statistics::new());
        }

        let pool: Vec<usize> = (0..self.candidates.len()).collect();
        let roots: Vec<(Option<Node<K>>, Statistics, Option<SearchStatus>)> = (0..pool.len())
            .into_par_iter()
            .map(|j| {
                if let Some(status) = self.interrupted(start) {
                    return (None, Statistics::new(), Some(status));
                }
                let mut session = SearchSession::new();
                session.statistics.record_depth(0);
                let node = self.take(&mut session, &self.phrase, &pool[j..], 0, self.config.max_words);
                session.statistics.seen_roots = 1;
                (node, session.statistics, None)
            })
            .collect();

        let mut statistics = Statistics::new();
        let mut status = SearchStatus::Complete;
        let mut edges = Vec::new();
        for (j, (node, stats, interrupted)) in roots.into_iter().enumerate() {
            statistics.merge(&stats);
            if let Some(interrupted) = interrupted {
                if status == SearchStatus::Complete {
                    status = interrupted;
                }
            }
            if let Some(node) = node {
                edges.push((self.candidates[j].clone(), node));
            }
        }
        statistics.elapsed = start.elapsed();
        self.finish(Node::branch(edges), status, statistics)
    }

    fn finish(&self, tree: Option<Node<K>>, status: SearchStatus, statistics: Statistics) -> SearchOutcome<K> {
        debug!("search finished: {:?}. {}", status, statistics);
        SearchOutcome {
            tree,
            status,
            statistics,
        }
    }

    /// Explores every root candidate not already in `session`'s seen set,
    /// stopping early if the budget runs out or the search is cancelled.
    pub fn run_with_session(&self, session: &mut SearchSession<K>, start: Instant) -> (Option<Node<K>>, SearchStatus) {
        if self.candidates.is_empty() {
            return (None, SearchStatus::NoFeasibleWords);
        }
        session.statistics.record_depth(0);

        let pool: Vec<usize> = (0..self.candidates.len()).collect();
        let mut edges = Vec::new();
        let mut status = SearchStatus::Complete;

        for j in 0..pool.len() {
            if let Some(interrupted) = self.interrupted(start) {
                status = interrupted;
                break;
            }
            let root = &self.candidates[j];
            if session.seen_roots.contains(root) { continue }

            if let Some(node) = self.take(session, &self.phrase, &pool[j..], 0, self.config.max_words) {
                edges.push((root.clone(), node));
            }
            session.seen_roots.insert(root.clone());
            session.statistics.seen_roots = session.seen_roots.len();
        }

        (Node::branch(edges), status)
    }

    /// Decomposes `remainder` using any candidate, without the root-level
    /// bookkeeping or budget checks.
    pub fn decompose(&self, session: &mut SearchSession<K>, remainder: &K) -> Option<Node<K>> {
        if session.is_dead(remainder, 0, self.config.max_words) {
            session.statistics.memo_hits += 1;
            return None;
        }
        let pool: Vec<usize> = (0..self.candidates.len()).collect();
        let found = self.expand(session, remainder, &pool, 0, self.config.max_words);
        if found.is_none() {
            session.mark_dead(remainder.clone(), 0, self.config.max_words);
        }
        found
    }

    fn interrupted(&self, start: Instant) -> Option<SearchStatus> {
        if self.cancel.is_cancelled() {
            return Some(SearchStatus::Cancelled);
        }
        match self.config.time_limit {
            Some(limit) if start.elapsed() >= limit => Some(SearchStatus::TimedOut),
            _ => None,
        }
    }

    /// Takes the candidate `pool[0]` out of `remainder` and decomposes what
    /// is left using `pool`. `words_left` counts the word being taken.
    fn take(
        &self,
        session: &mut SearchSession<K>,
        remainder: &K,
        pool: &[usize],
        depth: usize,
        words_left: Option<usize>,
    ) -> Option<Node<K>> {
        let from = pool[0];
        let candidate = &self.candidates[from];
        session.statistics.record_try(depth);

        if words_left == Some(0) {
            return None;
        }
        let child = remainder.checked_subtract(candidate)?;
        if child.is_empty() {
            return Some(Node::Terminal);
        }

        let words_left = words_left.map(|n| n - 1);
        if child.len() < self.config.min_len || words_left == Some(0) {
            session.statistics.dead_ends += 1;
            return None;
        }
        if session.is_dead(&child, from, words_left) {
            session.statistics.memo_hits += 1;
            return None;
        }

        let found = self.expand(session, &child, pool, depth + 1, words_left);
        if found.is_none() {
            session.mark_dead(child, from, words_left);
        }
        found
    }

    /// Every way to decompose `remainder` using candidates from `pool`, whose
    /// indices are ascending.
    fn expand(
        &self,
        session: &mut SearchSession<K>,
        remainder: &K,
        pool: &[usize],
        depth: usize,
        words_left: Option<usize>,
    ) -> Option<Node<K>> {
        session.statistics.record_depth(depth);
        let from = match pool.first() {
            Some(&from) => from,
            None => return None,
        };

        // Too short to split in two: only the remainder itself can match.
        if remainder.len() < 2 * self.config.min_len || words_left == Some(1) {
            return match self.positions.get(remainder) {
                Some(&i) if i >= from => {
                    session.statistics.record_try(depth);
                    Some(Node::Branch(vec![(remainder.clone(), Node::Terminal)]))
                }
                _ => {
                    session.statistics.dead_ends += 1;
                    None
                }
            };
        }

        let narrowed: Vec<usize> = pool
            .iter()
            .copied()
            .filter(|&i| self.candidates[i].is_submultiset_of(remainder))
            .collect();

        let mut edges = Vec::new();
        for n in 0..narrowed.len() {
            if let Some(node) = self.take(session, remainder, &narrowed[n..], depth, words_left) {
                edges.push((self.candidates[narrowed[n]].clone(), node));
            }
        }

        if edges.is_empty() {
            session.statistics.dead_ends += 1;
        }
        Node::branch(edges)
    }
}
