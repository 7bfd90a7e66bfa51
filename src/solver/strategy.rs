//! Guess ranking strategies
//!
//! Defines the Strategy trait and the enum wrapper used for runtime
//! selection.

use super::{GreedyConditional, GreedyEntropy, GreedyPmi, NgramFrequency};
use crate::index::{IndexError, WordIndex};
use crate::state::ConstraintState;

/// A candidate guess with its strategy-assigned score
///
/// Ranked output is ordered by descending score; equal scores keep the
/// candidates' dictionary order (stable sorts everywhere).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub word: String,
    pub score: f64,
}

impl ScoredCandidate {
    #[must_use]
    pub fn new(word: impl Into<String>, score: f64) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// A policy for ranking the surviving candidates of one dictionary
pub trait Strategy {
    /// Rank candidates consistent with `state`, best first
    ///
    /// An empty result is the out-of-guesses terminal state, not an error.
    ///
    /// # Errors
    /// Returns `IndexError::UnknownLength` when the state's word length was
    /// never indexed; that is a configuration error, not a gameplay
    /// condition.
    fn rank(
        &self,
        index: &WordIndex,
        state: &ConstraintState,
    ) -> Result<Vec<ScoredCandidate>, IndexError>;
}

/// Tuning knobs shared by the strategy constructors
#[derive(Debug, Clone, Copy)]
pub struct StrategyParams {
    /// N-gram length for the frequency heuristic (1 or 2)
    pub ngram_len: usize,
    /// Use position-tagged frequencies where the strategy supports them
    pub positional: bool,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            ngram_len: 2,
            positional: true,
        }
    }
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
pub enum StrategyKind {
    /// N-gram frequency heuristic (default)
    Ngram(NgramFrequency),
    /// Greedy binary-split entropy maximization
    Entropy(GreedyEntropy),
    /// Greedy pointwise mutual information
    Pmi(GreedyPmi),
    /// Greedy conditional letter frequency
    Conditional(GreedyConditional),
}

impl Strategy for StrategyKind {
    fn rank(
        &self,
        index: &WordIndex,
        state: &ConstraintState,
    ) -> Result<Vec<ScoredCandidate>, IndexError> {
        match self {
            Self::Ngram(s) => s.rank(index, state),
            Self::Entropy(s) => s.rank(index, state),
            Self::Pmi(s) => s.rank(index, state),
            Self::Conditional(s) => s.rank(index, state),
        }
    }
}

impl StrategyKind {
    /// Create a strategy from a name string
    ///
    /// Supported names: "ngram", "frequency", "entropy", "pmi",
    /// "conditional". Defaults to the n-gram heuristic if the name is
    /// unrecognized.
    #[must_use]
    pub fn from_name(name: &str, params: StrategyParams) -> Self {
        match name {
            "entropy" => Self::Entropy(GreedyEntropy),
            "pmi" => Self::Pmi(GreedyPmi),
            "conditional" => Self::Conditional(GreedyConditional {
                positional: params.positional,
            }),
            _ => Self::Ngram(NgramFrequency {
                ngram_len: params.ngram_len,
                positional: params.positional,
            }),
        }
    }
}
