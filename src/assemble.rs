//! Turning a decomposition tree into sets of words.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::dictionary::Dictionary;
use crate::letters::LetterKey;
use crate::tree::Node;

/// Every root-to-leaf path of `tree`, as the keys along it.
pub fn linearize<K: Clone>(tree: &Node<K>) -> Vec<Vec<K>> {
    let mut paths = Vec::new();
    let mut path = Vec::new();
    walk(tree, &mut path, &mut paths);
    paths
}

fn walk<K: Clone>(node: &Node<K>, path: &mut Vec<K>, paths: &mut Vec<Vec<K>>) {
    match node {
        Node::Terminal => paths.push(path.clone()),
        Node::Branch(edges) => {
            for (key, child) in edges {
                path.push(key.clone());
                walk(child, path, paths);
                path.pop();
            }
        }
    }
}

/// Puts a combination in a fixed order so its permutations compare equal.
pub fn canonicalize<K: Ord>(mut combination: Vec<K>) -> Vec<K> {
    combination.sort_unstable();
    combination
}

pub fn deduplicate<K, I>(combinations: I) -> BTreeSet<Vec<K>>
where
    K: Ord,
    I: IntoIterator<Item = Vec<K>>,
{
    combinations.into_iter().map(canonicalize).collect()
}

/// Every choice of words for the keys of `combination`. Each result is
/// sorted, and choices that only differ by order are reported once, so
/// `[ab, ab]` over the class `(ab, ba)` gives `ab ab`, `ab ba` and `ba ba`.
///
/// If any key has no words the combination yields nothing.
pub fn translate<K: LetterKey>(combination: &[K], dictionary: &Dictionary<K>) -> Vec<Vec<String>> {
    let mut slots = Vec::with_capacity(combination.len());
    for key in combination {
        match dictionary.get(key) {
            Some(words) if !words.is_empty() => slots.push(words),
            _ => return Vec::new(),
        }
    }
    if slots.is_empty() {
        return Vec::new();
    }

    slots
        .iter()
        .map(|words| words.iter())
        .multi_cartesian_product()
        .map(|choice| {
            choice
                .into_iter()
                .map(|w| w.to_string())
                .sorted()
                .collect::<Vec<_>>()
        })
        .unique()
        .sorted()
        .collect()
}

/// The decompositions in `tree` with at least `min_words` words, rendered as
/// sorted word lists.
pub fn assemble<K: LetterKey>(
    tree: Option<&Node<K>>,
    dictionary: &Dictionary<K>,
    min_words: usize,
) -> BTreeSet<Vec<String>> {
    let tree = match tree {
        Some(tree) => tree,
        None => return BTreeSet::new(),
    };

    let combinations = linearize(tree)
        .into_iter()
        .filter(|combination| combination.len() >= min_words);

    deduplicate(combinations)
        .iter()
        .flat_map(|combination| translate(combination, dictionary))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::SortedLetters;
    use crate::dictionary::WordListOptions;
    use crate::letters::Letters;

    fn key(word: &str) -> Letters {
        Letters::new(word)
    }

    fn dictionary(words: &str) -> Dictionary<Letters> {
        Dictionary::from_words(&SortedLetters, words.split_whitespace(), WordListOptions::default())
    }

    #[test]
    fn linearize_lists_paths() {
        let tree = Node::Branch(vec![
            (key("cat"), Node::Branch(vec![(key("nip"), Node::Terminal)])),
            (key("catnip"), Node::Terminal),
        ]);
        let paths = linearize(&tree);
        assert_eq!(paths, vec![vec![key("cat"), key("nip")], vec![key("catnip")]]);
    }

    #[test]
    fn permutations_collapse() {
        let combinations = vec![
            vec![key("nip"), key("cat")],
            vec![key("cat"), key("nip")],
        ];
        let unique = deduplicate(combinations);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique.into_iter().next().unwrap(), canonicalize(vec![key("nip"), key("cat")]));
    }

    #[test]
    fn translate_expands_anagram_classes() {
        let words = dictionary("cat act nip");
        let mut choices = translate(&[key("cat"), key("nip")], &words);
        choices.sort();
        assert_eq!(choices, vec![vec!["act", "nip"], vec!["cat", "nip"]]);
    }

    #[test]
    fn translate_collapses_repeated_slots() {
        let words = dictionary("ab ba");
        let choices = translate(&[key("ab"), key("ab")], &words);
        assert_eq!(choices, vec![vec!["ab", "ab"], vec!["ab", "ba"], vec!["ba", "ba"]]);
    }

    #[test]
    fn dangling_keys_discard_the_combination() {
        let words = dictionary("cat");
        assert!(translate(&[key("cat"), key("nip")], &words).is_empty());
    }

    #[test]
    fn assemble_filters_short_combinations() {
        let words = dictionary("cat nip catnip");
        let tree = Node::Branch(vec![
            (key("catnip"), Node::Terminal),
            (key("cat"), Node::Branch(vec![(key("nip"), Node::Terminal)])),
        ]);
        assert_eq!(assemble(Some(&tree), &words, 0).len(), 2);
        let two = assemble(Some(&tree), &words, 2);
        assert_eq!(two.into_iter().collect::<Vec<_>>(), vec![vec!["cat", "nip"]]);
        assert!(assemble::<Letters>(None, &words, 0).is_empty());
    }
}
