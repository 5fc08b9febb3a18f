//! Search statistics
//!
//! Counters are informational only; nothing in the search depends on them.

use std::fmt;
use std::time::Duration;

use log::debug;

/// A progress line is logged every this many tries.
pub const PROGRESS_INTERVAL: u64 = 100;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Candidate edges tried.
    pub tries: u64,
    /// Remainders found to have no decomposition.
    pub dead_ends: u64,
    /// Dead ends skipped thanks to the memo.
    pub memo_hits: u64,
    /// Root candidates fully explored.
    pub seen_roots: usize,
    /// Deepest recursion level reached, counting the root as 1.
    pub max_depth: usize,
    pub elapsed: Duration,
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    pub(crate) fn record_try(&mut self, depth: usize) {
        self.tries += 1;
        if self.tries % PROGRESS_INTERVAL == 0 {
            debug!(
                "depth {:>2} | tries {:>8} | dead ends {:>8} | memo hits {:>8} | roots {:>5}",
                depth + 1,
                self.tries,
                self.dead_ends,
                self.memo_hits,
                self.seen_roots
            );
        }
    }

    pub(crate) fn record_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth + 1);
    }

    /// Folds the counters of an independent session into these. Elapsed time
    /// is wall-clock and is left to the caller.
    pub fn merge(&mut self, other: &Statistics) {
        self.tries += other.tries;
        self.dead_ends += other.dead_ends;
        self.memo_hits += other.memo_hits;
        self.seen_roots += other.seen_roots;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} branches in the tree. {} dead ends ({} from memo). Max depth {}. {:.3}s",
            self.tries,
            self.dead_ends,
            self.memo_hits,
            self.max_depth,
            self.elapsed.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_adds_counts_and_keeps_deepest() {
        let mut a = Statistics {
            tries: 10,
            dead_ends: 2,
            max_depth: 3,
            ..Statistics::new()
        };
        let b = Statistics {
            tries: 5,
            memo_hits: 1,
            seen_roots: 1,
            max_depth: 4,
            ..Statistics::new()
        };
        a.merge(&b);
        assert_eq!(a.tries, 15);
        assert_eq!(a.dead_ends, 2);
        assert_eq!(a.memo_hits, 1);
        assert_eq!(a.seen_roots, 1);
        assert_eq!(a.max_depth, 4);
    }

    #[test]
    fn depth_is_one_based() {
        let mut stats = Statistics::new();
        stats.record_depth(0);
        assert_eq!(stats.max_depth, 1);
        stats.record_depth(2);
        stats.record_depth(1);
        assert_eq!(stats.max_depth, 3);
    }
}
