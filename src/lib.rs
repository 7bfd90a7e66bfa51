//! Wordle Sieve
//!
//! Narrows a constrained-guessing word puzzle to a ranked list of candidate
//! words, using letter-presence and position feedback accumulated across
//! rounds.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_sieve::core::{Word, decode, evaluate};
//! use wordle_sieve::index::WordIndex;
//! use wordle_sieve::solver::{NgramFrequency, Strategy};
//! use wordle_sieve::state::ConstraintState;
//!
//! // Index a word list once; share it across games.
//! let words = ["apple", "angle", "ankle"]
//!     .iter()
//!     .map(|w| Word::new(*w).unwrap());
//! let index = WordIndex::build(words, Some(5));
//!
//! // Accumulate feedback, then rank the surviving candidates.
//! let mut state = ConstraintState::new(5);
//! state.absorb(&decode("a*zzzz").unwrap()).unwrap();
//!
//! let ranked = NgramFrequency::default().rank(&index, &state).unwrap();
//! assert!(!ranked.is_empty());
//! ```

// Core domain types
pub mod core;

// Word index and constraint search
pub mod index;

// Per-game constraint accumulation
pub mod state;

// Guess ranking strategies
pub mod solver;

// Word list loading
pub mod wordlists;

// Wire protocol between referee and player
pub mod protocol;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
