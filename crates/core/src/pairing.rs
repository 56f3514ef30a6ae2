//! Pair resolution for the combination ledger.
//!
//! Every unordered pair of people maps to exactly one canonical label.
//! The label is the key of the `generated` table, so it must be stable
//! regardless of argument order or call site.

use std::collections::HashSet;

/// Separator placed between the two names of a canonical label.
pub const LABEL_SEPARATOR: &str = " x ";

/// Anything that can take part in a pair.
///
/// The display name is what gets canonicalized; identifiers are never part
/// of the label.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

/// Build the canonical label for an unordered pair of names.
///
/// The lexicographically smaller name goes first, so
/// `canonical_label(a, b) == canonical_label(b, a)` for every input,
/// equal names included.
///
/// # Examples
///
/// ```
/// use pairblend_core::pairing::canonical_label;
///
/// assert_eq!(canonical_label("Bob", "Alice"), "Alice x Bob");
/// assert_eq!(canonical_label("Alice", "Bob"), "Alice x Bob");
/// ```
pub fn canonical_label(a: &str, b: &str) -> String {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    format!("{first}{LABEL_SEPARATOR}{second}")
}

/// A pair that has no combination record yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPair<'a, T> {
    pub left: &'a T,
    pub right: &'a T,
    pub label: String,
}

/// Enumerate every 2-subset of `people` whose label is absent from `done`.
///
/// Pairs come out in index-pair ascending order (`(0,1), (0,2), ...,
/// (1,2), ...`), which keeps the result deterministic for a fixed input.
/// A person is never paired with itself, and each unordered pair appears
/// at most once.
pub fn missing_pairs<'a, T: Named>(
    people: &'a [T],
    done: &HashSet<String>,
) -> Vec<MissingPair<'a, T>> {
    let mut missing = Vec::new();

    for (i, left) in people.iter().enumerate() {
        for right in &people[i + 1..] {
            let label = canonical_label(left.name(), right.name());
            if !done.contains(&label) {
                missing.push(MissingPair { left, right, label });
            }
        }
    }

    missing
}

/// Number of unordered pairs among `n` people.
pub fn pair_count(n: usize) -> usize {
    n.saturating_sub(1) * n / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn done(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn label_is_order_independent() {
        let samples = [
            ("Alice", "Bob"),
            ("bob", "Bob"),
            ("Zoë", "Zoe"),
            ("", "x"),
            ("same", "same"),
        ];
        for (a, b) in samples {
            assert_eq!(canonical_label(a, b), canonical_label(b, a));
        }
    }

    #[test]
    fn label_puts_smaller_name_first() {
        assert_eq!(canonical_label("Bob", "Alice"), "Alice x Bob");
    }

    #[test]
    fn label_is_case_sensitive_bytewise() {
        // Uppercase sorts before lowercase.
        assert_eq!(canonical_label("alice", "Bob"), "Bob x alice");
    }

    #[test]
    fn label_for_equal_names() {
        assert_eq!(canonical_label("Sam", "Sam"), "Sam x Sam");
    }

    #[test]
    fn no_people_no_pairs() {
        let people: Vec<String> = Vec::new();
        assert!(missing_pairs(&people, &done(&[])).is_empty());
    }

    #[test]
    fn single_person_no_pairs() {
        let people = names(&["Alice"]);
        assert!(missing_pairs(&people, &done(&[])).is_empty());
    }

    #[test]
    fn two_people_one_pair() {
        let people = names(&["Bob", "Alice"]);
        let pairs = missing_pairs(&people, &done(&[]));

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].left, "Bob");
        assert_eq!(pairs[0].right, "Alice");
        assert_eq!(pairs[0].label, "Alice x Bob");
    }

    #[test]
    fn already_done_pair_is_skipped() {
        let people = names(&["Alice", "Bob"]);
        assert!(missing_pairs(&people, &done(&["Alice x Bob"])).is_empty());
    }

    #[test]
    fn count_matches_n_choose_two_minus_done() {
        for n in 0..12 {
            let people: Vec<String> = (0..n).map(|i| format!("p{i:02}")).collect();
            let all = missing_pairs(&people, &done(&[]));
            assert_eq!(all.len(), pair_count(n));

            // Mark every third pair as done.
            let finished: HashSet<String> =
                all.iter().step_by(3).map(|p| p.label.clone()).collect();
            let rest = missing_pairs(&people, &finished);
            assert_eq!(rest.len(), pair_count(n) - finished.len());
        }
    }

    #[test]
    fn no_self_pairs_and_no_duplicates() {
        let people = names(&["a", "b", "c", "d", "e"]);
        let pairs = missing_pairs(&people, &done(&[]));

        let mut seen = HashSet::new();
        for pair in &pairs {
            assert_ne!(pair.left, pair.right);
            assert!(seen.insert(pair.label.clone()), "duplicate {}", pair.label);
        }
    }

    #[test]
    fn order_is_index_pair_ascending() {
        let people = names(&["c", "a", "b"]);
        let labels: Vec<String> = missing_pairs(&people, &done(&[]))
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, vec!["a x c", "b x c", "a x b"]);
    }

    #[test]
    fn unrelated_done_labels_are_ignored() {
        let people = names(&["Alice", "Bob"]);
        let pairs = missing_pairs(&people, &done(&["Alice x Carol", "Bob x Alice"]));
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn pair_count_small_values() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(5), 10);
    }
}
