//! Word index with length and letter-repeat buckets
//!
//! A `WordIndex` is built once per word list and is immutable afterwards, so
//! it can be shared read-only across any number of concurrent games. Search
//! cost is linear in the buckets touched, not in the vocabulary, because the
//! length partition bounds every candidate set up front.

use crate::core::Word;
use crate::state::PositionFilter;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// Dense identifier of a word within one `WordIndex`
///
/// Stable for the lifetime of the index; also the dictionary order used for
/// deterministic tie-breaking in ranked output.
pub type WordId = u32;

/// Error type for index lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Search requested a word length that was never indexed
    UnknownLength(usize),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLength(length) => {
                write!(f, "No words of length {length} were indexed")
            }
        }
    }
}

impl std::error::Error for IndexError {}

/// A multiset of letters a candidate must contain
///
/// Each entry maps a letter to its minimum required multiplicity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterCounts(FxHashMap<u8, u8>);

impl LetterCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more required occurrence of `letter`
    pub fn add(&mut self, letter: u8) {
        *self.0.entry(letter).or_insert(0) += 1;
    }

    /// Iterate over (letter, required count) pairs
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.0.iter().map(|(&letter, &count)| (letter, count))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build from a stream of letters, counting repeats
    pub fn from_letters(letters: impl IntoIterator<Item = u8>) -> Self {
        let mut counts = Self::new();
        for letter in letters {
            counts.add(letter);
        }
        counts
    }
}

impl FromIterator<u8> for LetterCounts {
    fn from_iter<I: IntoIterator<Item = u8>>(letters: I) -> Self {
        Self::from_letters(letters)
    }
}

/// Immutable index over a word list
///
/// Two derived mappings drive the constraint search:
/// - `length_index`: word length to the ids of that length
/// - `repeat_index`: (letter, k) to the ids of words containing `letter` at
///   least `k` times; a word with a double `e` appears under both `(e, 1)`
///   and `(e, 2)`, so `(c, 1) ⊇ (c, 2) ⊇ ...` always holds
pub struct WordIndex {
    words: Vec<Word>,
    length_index: FxHashMap<usize, FxHashSet<WordId>>,
    repeat_index: FxHashMap<(u8, u8), FxHashSet<WordId>>,
    single_letters: FxHashSet<u8>,
}

impl WordIndex {
    /// Build an index from a word list, optionally keeping one length only
    ///
    /// Retained words receive sequential ids in input order.
    ///
    /// # Examples
    /// ```
    /// use wordle_sieve::core::Word;
    /// use wordle_sieve::index::WordIndex;
    ///
    /// let words = ["apple", "angle", "ox"]
    ///     .iter()
    ///     .map(|w| Word::new(*w).unwrap());
    /// let index = WordIndex::build(words, Some(5));
    /// assert_eq!(index.len(), 2); // "ox" filtered out
    /// ```
    pub fn build(words: impl IntoIterator<Item = Word>, required_length: Option<usize>) -> Self {
        let mut index = Self {
            words: Vec::new(),
            length_index: FxHashMap::default(),
            repeat_index: FxHashMap::default(),
            single_letters: FxHashSet::default(),
        };

        for word in words {
            if let Some(required) = required_length
                && word.len() != required
            {
                continue;
            }

            let id = index.words.len() as WordId;
            index
                .length_index
                .entry(word.len())
                .or_default()
                .insert(id);

            for (letter, multiplicity) in word.letter_counts() {
                index.single_letters.insert(letter);
                for repeats in 1..=multiplicity {
                    index
                        .repeat_index
                        .entry((letter, repeats))
                        .or_default()
                        .insert(id);
                }
            }

            index.words.push(word);
        }

        index
    }

    /// Number of indexed words
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Look up a word by id
    ///
    /// # Panics
    /// Panics if `id` was not produced by this index.
    #[must_use]
    pub fn word(&self, id: WordId) -> &Word {
        &self.words[id as usize]
    }

    /// All indexed words in id order
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Every letter appearing in at least one indexed word
    #[must_use]
    pub fn single_letters(&self) -> &FxHashSet<u8> {
        &self.single_letters
    }

    /// Ids of words containing `letter` at least `repeats` times
    ///
    /// Returns `None` when no indexed word qualifies.
    #[must_use]
    pub fn ids_with(&self, letter: u8, repeats: u8) -> Option<&FxHashSet<WordId>> {
        self.repeat_index.get(&(letter, repeats))
    }

    /// Number of indexed words containing `letter` at least once
    #[must_use]
    pub fn count_with(&self, letter: u8) -> usize {
        self.ids_with(letter, 1).map_or(0, FxHashSet::len)
    }

    /// Constraint-filtered search
    ///
    /// Starts from the length bucket, intersects the repeat bucket of every
    /// required (letter, count) pair, subtracts every excluded letter's
    /// single-occurrence bucket, then filters survivors through the position
    /// predicate. Ids come back sorted, which keeps downstream ranking
    /// deterministic.
    ///
    /// # Errors
    /// Returns `IndexError::UnknownLength` when `length` was never indexed;
    /// an empty result for an indexed length is not an error.
    pub fn search(
        &self,
        length: usize,
        required: &LetterCounts,
        excluded: &FxHashSet<u8>,
        filter: &PositionFilter,
    ) -> Result<Vec<WordId>, IndexError> {
        let bucket = self
            .length_index
            .get(&length)
            .ok_or(IndexError::UnknownLength(length))?;

        let mut candidates: FxHashSet<WordId> = bucket.clone();

        for (letter, count) in required.iter() {
            match self.repeat_index.get(&(letter, count)) {
                Some(ids) => candidates.retain(|id| ids.contains(id)),
                None => {
                    // No indexed word repeats this letter often enough.
                    candidates.clear();
                }
            }
            if candidates.is_empty() {
                break;
            }
        }

        for &letter in excluded {
            if let Some(ids) = self.repeat_index.get(&(letter, 1)) {
                candidates.retain(|id| !ids.contains(id));
            }
        }

        let mut result: Vec<WordId> = candidates
            .into_iter()
            .filter(|&id| filter.matches(&self.words[id as usize]))
            .collect();
        result.sort_unstable();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_index(words: &[&str], length: Option<usize>) -> WordIndex {
        WordIndex::build(words.iter().map(|w| Word::new(*w).unwrap()), length)
    }

    fn no_filter(length: usize) -> PositionFilter {
        PositionFilter::open(length)
    }

    #[test]
    fn build_assigns_sequential_ids() {
        let index = build_index(&["apple", "angle", "ankle"], None);
        assert_eq!(index.len(), 3);
        assert_eq!(index.word(0).text(), "apple");
        assert_eq!(index.word(2).text(), "ankle");
    }

    #[test]
    fn build_filters_by_required_length() {
        let index = build_index(&["apple", "ox", "angle", "lengthy"], Some(5));
        assert_eq!(index.len(), 2);
        assert!(index.words().iter().all(|w| w.len() == 5));
    }

    #[test]
    fn repeat_buckets_cover_every_multiplicity() {
        // "apple" has two p's: it must appear under (p,1) and (p,2) but
        // not (p,3).
        let index = build_index(&["apple", "angle"], None);
        assert!(index.ids_with(b'p', 1).unwrap().contains(&0));
        assert!(index.ids_with(b'p', 2).unwrap().contains(&0));
        assert!(index.ids_with(b'p', 3).is_none());
        assert!(!index.ids_with(b'p', 1).unwrap().contains(&1));
    }

    #[test]
    fn repeat_buckets_form_subset_chain() {
        let index = build_index(&["apple", "puppy", "paper", "angle"], None);
        for repeats in 2..=3 {
            if let Some(deeper) = index.ids_with(b'p', repeats) {
                let shallower = index.ids_with(b'p', repeats - 1).unwrap();
                assert!(deeper.is_subset(shallower));
            }
        }
    }

    #[test]
    fn single_letters_collects_alphabet() {
        let index = build_index(&["apple", "angle"], None);
        for letter in [b'a', b'p', b'l', b'e', b'n', b'g'] {
            assert!(index.single_letters().contains(&letter));
        }
        assert!(!index.single_letters().contains(&b'z'));
    }

    #[test]
    fn search_unknown_length_is_an_error() {
        let index = build_index(&["apple"], None);
        let result = index.search(7, &LetterCounts::new(), &FxHashSet::default(), &no_filter(7));
        assert_eq!(result, Err(IndexError::UnknownLength(7)));
    }

    #[test]
    fn search_by_required_letters() {
        let index = build_index(&["apple", "angle", "ankle"], Some(5));
        let required = LetterCounts::from_letters([b'g']);
        let found = index
            .search(5, &required, &FxHashSet::default(), &no_filter(5))
            .unwrap();
        assert_eq!(found, vec![1]); // only "angle"
    }

    #[test]
    fn search_required_multiplicity() {
        let index = build_index(&["apple", "angle", "ankle"], Some(5));
        let mut required = LetterCounts::new();
        required.add(b'p');
        required.add(b'p');
        let found = index
            .search(5, &required, &FxHashSet::default(), &no_filter(5))
            .unwrap();
        assert_eq!(found, vec![0]); // only "apple" has two p's
    }

    #[test]
    fn search_excluded_letters() {
        let index = build_index(&["apple", "angle", "ankle"], Some(5));
        let mut excluded = FxHashSet::default();
        excluded.insert(b'p');
        let found = index
            .search(5, &LetterCounts::new(), &excluded, &no_filter(5))
            .unwrap();
        assert_eq!(found, vec![1, 2]);
    }

    #[test]
    fn search_empty_result_is_ok() {
        let index = build_index(&["apple"], Some(5));
        let required = LetterCounts::from_letters([b'z']);
        let found = index
            .search(5, &required, &FxHashSet::default(), &no_filter(5))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn search_monotonicity() {
        let index = build_index(
            &["apple", "angle", "ankle", "ample", "amble", "eagle"],
            Some(5),
        );
        let base = index
            .search(5, &LetterCounts::new(), &FxHashSet::default(), &no_filter(5))
            .unwrap();

        // Requiring a letter never grows the result.
        let required = LetterCounts::from_letters([b'l']);
        let narrowed = index
            .search(5, &required, &FxHashSet::default(), &no_filter(5))
            .unwrap();
        assert!(narrowed.len() <= base.len());

        // Excluding a letter never grows the result.
        let mut excluded = FxHashSet::default();
        excluded.insert(b'm');
        let excluded_result = index
            .search(5, &LetterCounts::new(), &excluded, &no_filter(5))
            .unwrap();
        assert!(excluded_result.len() <= base.len());

        // Pinning a position never grows the result.
        let mut filter = no_filter(5);
        filter.pin(0, b'a');
        let pinned = index
            .search(5, &LetterCounts::new(), &FxHashSet::default(), &filter)
            .unwrap();
        assert!(pinned.len() <= base.len());
    }

    #[test]
    fn count_with_counts_words_not_occurrences() {
        let index = build_index(&["apple", "paper", "angle"], None);
        // "apple" and "paper" contain p; multiplicities don't matter here.
        assert_eq!(index.count_with(b'p'), 2);
        assert_eq!(index.count_with(b'z'), 0);
    }
}
