//! Budgets that run out part way through a search.

mod common;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anagrams::{
    assemble, CancelFlag, Codec, Dictionary, LetterKey, Letters, Search, SearchConfig,
    SearchSession, SearchStatus, WordListOptions,
};
use common::{config, rendered};

type Hook = Arc<dyn Fn() + Send + Sync>;

/// Sorted letters that run a hook whenever they are taken out of a
/// remainder. The hook plays no part in equality, ordering or hashing.
#[derive(Clone)]
struct Hooked {
    letters: Letters,
    on_take: Option<Hook>,
}

impl PartialEq for Hooked {
    fn eq(&self, other: &Self) -> bool {
        self.letters == other.letters
    }
}

impl Eq for Hooked {}

impl PartialOrd for Hooked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hooked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.letters.cmp(&other.letters)
    }
}

impl Hash for Hooked {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.letters.hash(state);
    }
}

impl fmt::Debug for Hooked {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Hooked({})", self.letters)
    }
}

impl fmt::Display for Hooked {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.letters, f)
    }
}

impl LetterKey for Hooked {
    fn len(&self) -> usize {
        self.letters.len()
    }

    fn is_submultiset_of(&self, target: &Self) -> bool {
        self.letters.is_submultiset_of(&target.letters)
    }

    fn checked_subtract(&self, candidate: &Self) -> Option<Self> {
        if let Some(hook) = &candidate.on_take {
            hook();
        }
        self.letters.checked_subtract(&candidate.letters).map(|letters| Hooked {
            letters,
            on_take: None,
        })
    }
}

/// Sorted letters, with `hook` attached to the key of "catnip".
struct HookOnCatnip(Hook);

impl Codec for HookOnCatnip {
    type Key = Hooked;

    fn encode(&self, word: &str) -> anagrams::Result<Hooked> {
        let letters = Letters::new(word);
        let on_take = if letters == Letters::new("catnip") {
            Some(self.0.clone())
        } else {
            None
        };
        Ok(Hooked { letters, on_take })
    }
}

fn dictionary(codec: &HookOnCatnip) -> Dictionary<Hooked> {
    Dictionary::from_words(codec, "catnip cat nip".split(' '), WordListOptions::default())
}

#[test]
fn unhindered_search_finds_both() {
    let codec = HookOnCatnip(Arc::new(|| {}));
    let dictionary = dictionary(&codec);
    let search = Search::new(&dictionary, codec.encode("catnip").unwrap(), config(3));
    // "catnip" is the longest candidate, so it is the first root.
    assert_eq!(search.candidates()[0], codec.encode("catnip").unwrap());

    let outcome = search.run();
    assert_eq!(outcome.status, SearchStatus::Complete);
    let anagrams = assemble(outcome.tree.as_ref(), &dictionary, 0);
    assert_eq!(rendered(&anagrams), vec!["cat nip", "catnip"]);
}

#[test]
fn time_budget_keeps_results_of_finished_roots() {
    let codec = HookOnCatnip(Arc::new(|| thread::sleep(Duration::from_millis(100))));
    let dictionary = dictionary(&codec);
    let budget = SearchConfig {
        time_limit: Some(Duration::from_millis(30)),
        ..config(3)
    };
    let search = Search::new(&dictionary, codec.encode("catnip").unwrap(), budget);

    let mut session = SearchSession::new();
    let (tree, status) = search.run_with_session(&mut session, Instant::now());
    assert_eq!(status, SearchStatus::TimedOut);
    assert!(status.is_partial());
    assert_eq!(rendered(&assemble(tree.as_ref(), &dictionary, 0)), vec!["catnip"]);
    assert_eq!(session.statistics.seen_roots, 1);

    // A fresh budget carries on with the roots that were never reached.
    let (rest, status) = search.run_with_session(&mut session, Instant::now());
    assert_eq!(status, SearchStatus::Complete);
    assert_eq!(rendered(&assemble(rest.as_ref(), &dictionary, 0)), vec!["cat nip"]);
}

#[test]
fn cancel_during_a_root_keeps_its_results() {
    let cancel = CancelFlag::new();
    let trip = cancel.clone();
    let codec = HookOnCatnip(Arc::new(move || {
        trip.cancel();
    }));
    let dictionary = dictionary(&codec);
    let search = Search::new(&dictionary, codec.encode("catnip").unwrap(), config(3)).with_cancel(cancel);

    let outcome = search.run();
    assert_eq!(outcome.status, SearchStatus::Cancelled);
    let anagrams = assemble(outcome.tree.as_ref(), &dictionary, 0);
    assert_eq!(rendered(&anagrams), vec!["catnip"]);
}
