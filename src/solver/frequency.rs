//! N-gram frequency heuristic
//!
//! Favors candidates that probe many still-unknown, commonly-occurring
//! letters and letter pairs, without wasting a guess re-testing letters the
//! constraint state has already settled.

use super::strategy::{ScoredCandidate, Strategy};
use crate::core::Word;
use crate::index::{IndexError, WordIndex};
use crate::state::ConstraintState;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

/// N-gram occurrence counts over a candidate set
///
/// Slices borrow from the indexed words, so counting allocates nothing per
/// n-gram. Resolved letters (already confirmed present or absent) are not
/// counted as unigrams: testing them again yields no information.
pub(crate) struct NgramCounts<'a> {
    plain: FxHashMap<&'a [u8], f64>,
    positional: FxHashMap<(&'a [u8], usize), f64>,
}

impl NgramCounts<'_> {
    pub(crate) fn plain(&self, gram: &[u8]) -> f64 {
        self.plain.get(gram).copied().unwrap_or(0.0)
    }

    pub(crate) fn at(&self, gram: &[u8], position: usize) -> f64 {
        self.positional
            .get(&(gram, position))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Count n-grams of length 1..=`ngram_len` across `words`
pub(crate) fn count_ngrams<'a>(
    words: impl Iterator<Item = &'a Word>,
    ngram_len: usize,
    positional: bool,
    resolved: &FxHashSet<u8>,
) -> NgramCounts<'a> {
    let mut plain: FxHashMap<&[u8], f64> = FxHashMap::default();
    let mut by_position: FxHashMap<(&[u8], usize), f64> = FxHashMap::default();

    for word in words {
        let bytes = word.bytes();
        for start in 0..bytes.len() {
            for len in 1..=ngram_len {
                let Some(gram) = bytes.get(start..start + len) else {
                    continue;
                };
                if len == 1 && resolved.contains(&gram[0]) {
                    continue;
                }
                *plain.entry(gram).or_insert(0.0) += 1.0;
                if positional {
                    *by_position.entry((gram, start)).or_insert(0.0) += 1.0;
                }
            }
        }
    }

    NgramCounts {
        plain,
        positional: by_position,
    }
}

/// Frequency heuristic over unresolved n-grams
///
/// Scoring: the first occurrence of an n-gram in a candidate earns its full
/// frequency; repeats of the same n-gram cost half the frequency (probing
/// the same letters twice is mostly wasted). Position-tagged frequency is
/// added per occurrence when enabled. Only n-grams touching at least one
/// unresolved letter score at all.
#[derive(Debug, Clone, Copy)]
pub struct NgramFrequency {
    pub ngram_len: usize,
    pub positional: bool,
}

impl Default for NgramFrequency {
    fn default() -> Self {
        Self {
            ngram_len: 2,
            positional: true,
        }
    }
}

impl Strategy for NgramFrequency {
    fn rank(
        &self,
        index: &WordIndex,
        state: &ConstraintState,
    ) -> Result<Vec<ScoredCandidate>, IndexError> {
        let (required, excluded, filter) = state.search_inputs();
        let ids = index.search(state.word_length(), &required, &excluded, &filter)?;

        let resolved: FxHashSet<u8> = state
            .contains()
            .union(state.excludes())
            .copied()
            .collect();
        let eligible: FxHashSet<u8> = index
            .single_letters()
            .difference(&resolved)
            .copied()
            .collect();

        let candidates: Vec<&Word> = ids.iter().map(|&id| index.word(id)).collect();
        let counts = count_ngrams(
            candidates.iter().copied(),
            self.ngram_len,
            self.positional,
            &resolved,
        );

        let mut scored: Vec<ScoredCandidate> = candidates
            .par_iter()
            .map(|word| {
                let bytes = word.bytes();
                let mut score = 0.0;
                let mut seen: FxHashSet<&[u8]> = FxHashSet::default();

                for start in 0..bytes.len() {
                    for len in 1..=self.ngram_len {
                        let Some(gram) = bytes.get(start..start + len) else {
                            continue;
                        };
                        if !gram.iter().any(|b| eligible.contains(b)) {
                            continue;
                        }
                        if seen.insert(gram) {
                            score += counts.plain(gram);
                        } else {
                            score -= counts.plain(gram) / 2.0;
                        }
                        if self.positional {
                            score += counts.at(gram, start);
                        }
                    }
                }

                ScoredCandidate::new(word.text(), score)
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(scored)
    }
}
