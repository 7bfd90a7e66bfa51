//! Greedy pointwise mutual information strategy
//!
//! Commits to the untested letter most over-represented among the surviving
//! candidates relative to the whole dictionary. On the very first iteration
//! the candidate set *is* the dictionary and PMI is uninformative, so raw
//! letter frequency stands in.

use super::strategy::{ScoredCandidate, Strategy};
use crate::index::{IndexError, LetterCounts, WordIndex};
use crate::state::ConstraintState;
use log::debug;
use rustc_hash::FxHashSet;

/// Greedy PMI maximization
///
/// `pmi(c) = log2(P(c | candidate) / P(c | dictionary))`. Letters with zero
/// conditional probability are skipped (their log is undefined, and
/// requiring them would empty the candidate set anyway). Survivors rank
/// uniformly.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPmi;

impl Strategy for GreedyPmi {
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
        debug!("pmi: {} initial candidates", candidates.len());

        let mut letters: Vec<u8> = index.single_letters().iter().copied().collect();
        letters.sort_unstable();

        while candidates.len() > 1 && working.len() < length {
            let mut best: Option<(u8, f64)> = None;

            for &letter in &letters {
                if working.contains(&letter) || excluded.contains(&letter) {
                    continue;
                }

                let pmi = if candidates.len() == index.len() {
                    // Whole dictionary: PMI degenerates, use frequency.
                    index.count_with(letter) as f64
                } else {
                    let lacking = match index.ids_with(letter, 1) {
                        Some(ids) => candidates.iter().filter(|id| !ids.contains(id)).count(),
                        None => candidates.len(),
                    };
                    let p_conditional = 1.0 - lacking as f64 / candidates.len() as f64;
                    if p_conditional == 0.0 {
                        continue;
                    }
                    let p_global = index.count_with(letter) as f64 / index.len() as f64;
                    (p_conditional / p_global).log2()
                };

                if best.is_none_or(|(_, b)| pmi > b) {
                    best = Some((letter, pmi));
                }
            }

            let Some((letter, pmi)) = best else {
                break;
            };
            debug!("pmi: committing to '{}' (pmi {pmi:.3})", letter as char);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;

    fn build_index(words: &[&str]) -> WordIndex {
        WordIndex::build(words.iter().map(|w| Word::new(*w).unwrap()), None)
    }

    #[test]
    fn rank_full_dictionary_uses_frequency_fallback() {
        // First iteration: candidates == dictionary. The most frequent
        // letter ('a', in all three) gives no split, so the loop commits
        // to it and continues with the set unchanged, then picks real
        // discriminators on later iterations.
        let index = build_index(&["apple", "angle", "ankle"]);
        let state = ConstraintState::new(5);

        let ranked = GreedyPmi.rank(&index, &state).unwrap();
        assert!(!ranked.is_empty());
        assert!(ranked.iter().all(|c| (c.score - 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn rank_skips_zero_probability_letters() {
        let index = build_index(&["apple", "angle", "ankle", "proxy"]);
        let mut state = ConstraintState::new(5);
        // a confirmed at position 0: candidate set shrinks to the a-words,
        // so 'x' has conditional probability 0 and must be skipped, not
        // passed to log2.
        state
            .absorb(&crate::core::decode("a*bbot").unwrap())
            .unwrap();

        let ranked = GreedyPmi.rank(&index, &state).unwrap();
        assert!(!ranked.is_empty());
        assert!(ranked.iter().all(|c| c.word.starts_with('a')));
    }

    #[test]
    fn rank_terminates_on_anagrams() {
        let index = build_index(&["stone", "notes", "tones"]);
        let state = ConstraintState::new(5);

        let ranked = GreedyPmi.rank(&index, &state).unwrap();
        assert_eq!(ranked.len(), 3);
    }
}
