//! Core domain types
//!
//! Words and the feedback codec. Everything else in the crate is built on
//! these two leaves.

mod feedback;
mod word;

pub use feedback::{
    Feedback, FeedbackError, LetterSignal, decode, decode_for, encode, evaluate, present_letters,
};
pub use word::{Word, WordError};
