//! Greedy binary-split entropy strategy
//!
//! Repeatedly commits to the untested letter whose presence/absence split of
//! the current candidate set carries the most information, under a bisection
//! model of the game.

use super::strategy::{ScoredCandidate, Strategy};
use crate::index::{IndexError, LetterCounts, WordIndex};
use crate::state::ConstraintState;
use log::debug;
use rustc_hash::FxHashSet;

/// Binary split entropy `H = -p·log2(p) - (1-p)·log2(1-p)`
///
/// Zero for degenerate splits; log of zero is never taken.
fn binary_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        return 0.0;
    }
    -(p * p.log2()) - ((1.0 - p) * (1.0 - p).log2())
}

/// Greedy entropy maximization
///
/// Each iteration tests every untested letter, measures the fraction `p` of
/// current candidates lacking it, commits to the letter maximizing the
/// binary entropy of that split, and re-filters. Terminates once a single
/// candidate remains, every position's worth of letters is committed, or no
/// letter splits the set at all. Survivors rank uniformly.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyEntropy;

impl Strategy for GreedyEntropy {
    fn rank(
        &self,
        index: &WordIndex,
        state: &ConstraintState,
    ) -> Result<Vec<ScoredCandidate>, IndexError> {
        let (_, excluded, filter) = state.search_inputs();
        let length = state.word_length();
        let mut working: FxHashSet<u8> = state.contains().clone();
        let mut candidates = index.search(
            length,
            &LetterCounts::from_letters(working.iter().copied()),
            &excluded,
            &filter,
        )?;
        debug!("entropy: {} initial candidates", candidates.len());

        let mut letters: Vec<u8> = index.single_letters().iter().copied().collect();
        letters.sort_unstable();

        while candidates.len() > 1 && working.len() < length {
            let mut best: Option<(u8, f64)> = None;

            for &letter in &letters {
                if working.contains(&letter) || excluded.contains(&letter) {
                    continue;
                }
                let lacking = match index.ids_with(letter, 1) {
                    Some(ids) => candidates.iter().filter(|id| !ids.contains(id)).count(),
                    None => candidates.len(),
                };
                let p = lacking as f64 / candidates.len() as f64;
                let entropy = binary_entropy(p);
                if entropy > 0.0 && best.is_none_or(|(_, b)| entropy > b) {
                    best = Some((letter, entropy));
                }
            }

            let Some((letter, entropy)) = best else {
                // No untested letter splits the candidates; committing to
                // one would either do nothing or empty the set.
                break;
            };
            debug!(
                "entropy: committing to '{}' ({entropy:.3} bits)",
                letter as char
            );
            working.insert(letter);
            candidates = index.search(
                length,
                &LetterCounts::from_letters(working.iter().copied()),
                &excluded,
                &filter,
            )?;
        }

        Ok(candidates
            .into_iter()
            .map(|id| ScoredCandidate::new(index.word(id).text(), 1.0))
            .collect())
    }
}
