//! Multi-dictionary rank aggregation
//!
//! Runs one strategy over several word lists (say, an exhaustive dictionary
//! and a common-words list), normalizes each list's scores, and merges by
//! taking the best normalized score per word.

use super::strategy::{ScoredCandidate, Strategy};
use crate::index::{IndexError, WordIndex};
use crate::state::ConstraintState;
use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Merges per-dictionary rankings into one guess list
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    /// Divide each list's scores by their sum before merging; a zero sum
    /// normalizes by 1 so empty or all-zero lists stay harmless
    pub normalize: bool,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self { normalize: true }
    }
}

impl Aggregator {
    #[must_use]
    pub const fn new(normalize: bool) -> Self {
        Self { normalize }
    }

    /// Rank across all dictionaries and merge
    ///
    /// With normalization on, a word keeps its best normalized score across
    /// lists; with it off, later lists overwrite earlier raw scores. Merge
    /// order is first-appearance order, and the final stable sort preserves
    /// it for tied scores.
    ///
    /// # Errors
    /// Propagates `IndexError` from any dictionary's search.
    pub fn rank_across<S: Strategy + Sync>(
        &self,
        strategy: &S,
        indexes: &[WordIndex],
        state: &ConstraintState,
    ) -> Result<Vec<ScoredCandidate>, IndexError> {
        let rankings: Vec<Result<Vec<ScoredCandidate>, IndexError>> = indexes
            .par_iter()
            .map(|index| strategy.rank(index, state))
            .collect();

        let mut order: Vec<String> = Vec::new();
        let mut merged: FxHashMap<String, f64> = FxHashMap::default();

        for ranking in rankings {
            let ranking = ranking?;
            let mut norm: f64 = ranking.iter().map(|c| c.score).sum();
            if norm == 0.0 {
                norm = 1.0;
            }
            debug!("aggregate: {} guesses, norm {norm}", ranking.len());

            for candidate in ranking {
                let score = if self.normalize {
                    candidate.score / norm
                } else {
                    candidate.score
                };
                if let Some(existing) = merged.get_mut(&candidate.word) {
                    *existing = if self.normalize {
                        existing.max(score)
                    } else {
                        score
                    };
                } else {
                    merged.insert(candidate.word.clone(), score);
                    order.push(candidate.word);
                }
            }
        }

        let mut result: Vec<ScoredCandidate> = order
            .into_iter()
            .map(|word| {
                let score = merged[&word];
                ScoredCandidate { word, score }
            })
            .collect();
        result.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(result)
    }
}
