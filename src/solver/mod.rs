//! Guess ranking strategies
//!
//! Four information-maximization policies behind one trait, plus the
//! aggregator that merges rankings across multiple dictionaries.

mod aggregate;
mod conditional;
mod entropy;
mod frequency;
mod pmi;
pub mod strategy;

pub use aggregate::Aggregator;
pub use conditional::GreedyConditional;
pub use entropy::GreedyEntropy;
pub use frequency::NgramFrequency;
pub use pmi::GreedyPmi;
pub use strategy::{ScoredCandidate, Strategy, StrategyKind, StrategyParams};
