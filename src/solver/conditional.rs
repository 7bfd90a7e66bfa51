//! Greedy conditional-frequency strategy
//!
//! Recomputes letter frequencies over the *current* candidate set each
//! iteration and locks in the most frequent untested letter (optionally at
//! its most frequent open position) before re-filtering.

use super::frequency::count_ngrams;
use super::strategy::{ScoredCandidate, Strategy};
use crate::core::Word;
use crate::index::{IndexError, LetterCounts, WordIndex};
use crate::state::ConstraintState;
use log::debug;
use rustc_hash::FxHashSet;

/// Greedy most-frequent-conditional letter selection
///
/// In positional mode the chosen letter is also pinned to its best open
/// position via a filter override, so later iterations condition on it.
/// Survivors score the last locked-in frequency (1 if no iteration ran).
#[derive(Debug, Clone, Copy)]
pub struct GreedyConditional {
    pub positional: bool,
}

impl Default for GreedyConditional {
    fn default() -> Self {
        Self { positional: true }
    }
}

impl Strategy for GreedyConditional {
    fn rank(
        &self,
        index: &WordIndex,
        state: &ConstraintState,
    ) -> Result<Vec<ScoredCandidate>, IndexError> {
        let (_, excluded, mut filter) = state.search_inputs();
        let length = state.word_length();
        let resolved: FxHashSet<u8> = state
            .contains()
            .union(state.excludes())
            .copied()
            .collect();

        let mut working: FxHashSet<u8> = state.contains().clone();
        let mut candidates = index.search(
            length,
            &LetterCounts::from_letters(working.iter().copied()),
            &excluded,
            &filter,
        )?;

        let mut letters: Vec<u8> = index.single_letters().iter().copied().collect();
        letters.sort_unstable();

        let mut last_frequency: Option<f64> = None;

        while candidates.len() > 1 && working.len() < length {
            let words: Vec<&Word> = candidates.iter().map(|&id| index.word(id)).collect();
            let counts = count_ngrams(words.iter().copied(), 1, self.positional, &resolved);

            let mut best: Option<(u8, Option<usize>, f64)> = None;
            for &letter in &letters {
                if working.contains(&letter) || excluded.contains(&letter) {
                    continue;
                }
                if self.positional {
                    for position in 0..length {
                        if !filter.is_open_for(position, letter) {
                            continue;
                        }
                        let frequency = counts.at(&[letter], position);
                        if best.is_none_or(|(_, _, b)| frequency > b) {
                            best = Some((letter, Some(position), frequency));
                        }
                    }
                } else {
                    let frequency = counts.plain(&[letter]);
                    if best.is_none_or(|(_, _, b)| frequency > b) {
                        best = Some((letter, None, frequency));
                    }
                }
            }

            let Some((letter, position, frequency)) = best else {
                break;
            };
            debug!(
                "conditional: committing to '{}' at {position:?} (freq {frequency})",
                letter as char
            );
            working.insert(letter);
            if let Some(position) = position {
                filter.set_override(position, letter);
            }
            last_frequency = Some(frequency);
            candidates = index.search(
                length,
                &LetterCounts::from_letters(working.iter().copied()),
                &excluded,
                &filter,
            )?;
        }

        let score = last_frequency.unwrap_or(1.0);
        Ok(candidates
            .into_iter()
            .map(|id| ScoredCandidate::new(index.word(id).text(), score))
            .collect())
    }
}
