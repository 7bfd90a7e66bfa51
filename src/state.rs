//! Constraint accumulation across rounds
//!
//! A `ConstraintState` belongs to one game and collects everything feedback
//! has proven about the hidden target: letters known present, letters known
//! globally absent, letters forbidden at specific positions, and letters
//! pinned to positions. It derives the inputs `WordIndex::search` needs.

use crate::core::{Feedback, FeedbackError, LetterSignal};
use crate::index::LetterCounts;
use rustc_hash::FxHashSet;

/// Per-position predicate applied to candidate words
///
/// Replaces the character-class regex of classic solvers with a direct
/// check: an override letter (strategy-local pin) wins, then a confirmed
/// letter must match, otherwise the letter must not be forbidden there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionFilter {
    good: Vec<Option<u8>>,
    bad: Vec<FxHashSet<u8>>,
    overrides: Vec<Option<u8>>,
}

impl PositionFilter {
    /// A filter that accepts every word of the given length
    #[must_use]
    pub fn open(length: usize) -> Self {
        Self {
            good: vec![None; length],
            bad: vec![FxHashSet::default(); length],
            overrides: vec![None; length],
        }
    }

    fn from_constraints(good: &[Option<u8>], bad: &[FxHashSet<u8>]) -> Self {
        Self {
            good: good.to_vec(),
            bad: bad.to_vec(),
            overrides: vec![None; good.len()],
        }
    }

    /// Pin a confirmed letter at a position
    pub fn pin(&mut self, position: usize, letter: u8) {
        self.good[position] = Some(letter);
    }

    /// Set a strategy-local override that takes precedence over `pin`
    pub fn set_override(&mut self, position: usize, letter: u8) {
        self.overrides[position] = Some(letter);
    }

    /// Whether a position carries an override
    #[must_use]
    pub fn has_override(&self, position: usize) -> bool {
        self.overrides[position].is_some()
    }

    /// Whether a position is free for a strategy to speculate on `letter`
    ///
    /// Free means: no override yet, no confirmed letter, and `letter` is not
    /// forbidden at that position.
    #[must_use]
    pub fn is_open_for(&self, position: usize, letter: u8) -> bool {
        self.overrides[position].is_none()
            && self.good[position].is_none()
            && !self.bad[position].contains(&letter)
    }

    /// Test a word against the per-position constraints
    #[must_use]
    pub fn matches(&self, word: &crate::core::Word) -> bool {
        if word.len() != self.good.len() {
            return false;
        }
        word.bytes().iter().enumerate().all(|(i, &letter)| {
            if let Some(required) = self.overrides[i] {
                return letter == required;
            }
            if let Some(required) = self.good[i] {
                return letter == required;
            }
            !self.bad[i].contains(&letter)
        })
    }
}

/// Everything learned about the hidden target so far
///
/// Reset between rounds; never shared between concurrent games.
#[derive(Debug, Clone)]
pub struct ConstraintState {
    word_length: usize,
    contains: FxHashSet<u8>,
    excludes: FxHashSet<u8>,
    bad_positions: Vec<FxHashSet<u8>>,
    good_positions: Vec<Option<u8>>,
}

impl ConstraintState {
    /// Fresh state for a game with words of the given length
    #[must_use]
    pub fn new(word_length: usize) -> Self {
        Self {
            word_length,
            contains: FxHashSet::default(),
            excludes: FxHashSet::default(),
            bad_positions: vec![FxHashSet::default(); word_length],
            good_positions: vec![None; word_length],
        }
    }

    /// Forget everything; used on round end (win, loss, restart)
    pub fn reset(&mut self) {
        self.contains.clear();
        self.excludes.clear();
        for bad in &mut self.bad_positions {
            bad.clear();
        }
        for good in &mut self.good_positions {
            *good = None;
        }
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Letters confirmed present somewhere in the target
    #[must_use]
    pub fn contains(&self) -> &FxHashSet<u8> {
        &self.contains
    }

    /// Letters confirmed absent from the target
    #[must_use]
    pub fn excludes(&self) -> &FxHashSet<u8> {
        &self.excludes
    }

    /// Letter pinned at a position, if any
    #[must_use]
    pub fn pinned_at(&self, position: usize) -> Option<u8> {
        self.good_positions[position]
    }

    /// Number of positions with a confirmed letter
    #[must_use]
    pub fn pinned_count(&self) -> usize {
        self.good_positions.iter().filter(|g| g.is_some()).count()
    }

    /// Absorb one whole decoded feedback line
    ///
    /// Classification happens only after the entire line is seen: a repeated
    /// letter may be `Absent` at one position while `Exact` or `Elsewhere`
    /// at another, and only letters proven present nowhere in the line (and
    /// never before) are recorded as globally excluded. This keeps
    /// `contains` and `excludes` disjoint.
    ///
    /// # Errors
    /// Returns `FeedbackError::LengthMismatch` when the line does not cover
    /// exactly one word of this game's length.
    pub fn absorb(&mut self, signals: &[LetterSignal]) -> Result<(), FeedbackError> {
        if signals.len() != self.word_length {
            return Err(FeedbackError::LengthMismatch {
                expected: self.word_length,
                actual: signals.len(),
            });
        }

        let present = crate::core::present_letters(signals);

        for (position, signal) in signals.iter().enumerate() {
            match signal.feedback {
                Feedback::Exact => {
                    self.good_positions[position] = Some(signal.letter);
                    self.contains.insert(signal.letter);
                }
                Feedback::Elsewhere => {
                    self.bad_positions[position].insert(signal.letter);
                    self.contains.insert(signal.letter);
                }
                Feedback::Absent => {
                    if !present.contains(&signal.letter) && !self.contains.contains(&signal.letter)
                    {
                        self.excludes.insert(signal.letter);
                    }
                }
            }
        }

        Ok(())
    }

    /// Derive the three inputs `WordIndex::search` takes
    ///
    /// Confirmed letters are required with a count of one each: presence is
    /// tracked as a set, so a target with a repeated letter is
    /// under-constrained until more feedback arrives.
    #[must_use]
    pub fn search_inputs(&self) -> (LetterCounts, FxHashSet<u8>, PositionFilter) {
        let required = LetterCounts::from_letters(self.contains.iter().copied());
        let filter = PositionFilter::from_constraints(&self.good_positions, &self.bad_positions);
        (required, self.excludes.clone(), filter)
    }
}
