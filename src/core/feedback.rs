//! Feedback signals and their wire codec
//!
//! Feedback for a guess is a per-position sequence of three-state signals:
//! - `Exact`: letter confirmed at this position
//! - `Elsewhere`: letter occurs in the target, but not here
//! - `Absent`: letter does not occur (beyond occurrences already accounted for)
//!
//! The wire format writes each guessed letter followed by `*` for exact or
//! `?` for elsewhere; absent letters carry no marker. Spaces are ignored, so
//! `a?rose*` and `a? r o s e*` decode identically.

use super::Word;
use rustc_hash::FxHashSet;
use std::fmt;

/// Three-state signal for one letter position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Letter confirmed at this exact position
    Exact,
    /// Letter present in the target but not at this position
    Elsewhere,
    /// Letter not present (no unaccounted occurrence remains)
    Absent,
}

/// A decoded letter together with its signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterSignal {
    pub letter: u8,
    pub feedback: Feedback,
}

/// Error type for malformed feedback lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    /// A `*` or `?` marker appeared with no letter before it
    DanglingMarker { position: usize },
    /// A character that is neither letter, marker, nor space
    UnexpectedChar(char),
    /// Decoded signal count disagrees with the expected word length
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for FeedbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingMarker { position } => {
                write!(f, "Feedback marker at byte {position} has no preceding letter")
            }
            Self::UnexpectedChar(ch) => write!(f, "Unexpected character {ch:?} in feedback"),
            Self::LengthMismatch { expected, actual } => {
                write!(f, "Feedback covers {actual} letters, expected {expected}")
            }
        }
    }
}

impl std::error::Error for FeedbackError {}

/// Compute the canonical feedback for `guess` against a known `target`
///
/// Two passes are required for correct duplicate-letter handling:
/// 1. Mark exact matches and consume those occurrences from both the guess's
///    and the target's letter multisets.
/// 2. For every remaining position, emit `Elsewhere` only while unconsumed
///    occurrences remain on both sides; otherwise `Absent`.
///
/// A single per-position pass would credit excess duplicates: for guess
/// `error` against target `arise`, only one of the three `r`s may score.
///
/// # Examples
/// ```
/// use wordle_sieve::core::{Feedback, Word, evaluate};
///
/// let guess = Word::new("crane").unwrap();
/// let target = Word::new("slate").unwrap();
/// let signals = evaluate(&guess, &target);
///
/// // C(absent) R(absent) A(exact) N(absent) E(exact)
/// assert_eq!(signals[2], Feedback::Exact);
/// assert_eq!(signals[4], Feedback::Exact);
/// assert_eq!(signals[0], Feedback::Absent);
/// ```
///
/// # Panics
/// Panics if `guess` and `target` have different lengths; callers compare
/// words drawn from the same length-filtered index.
#[must_use]
pub fn evaluate(guess: &Word, target: &Word) -> Vec<Feedback> {
    assert_eq!(guess.len(), target.len(), "guess/target length mismatch");

    let mut guess_left = guess.letter_counts();
    let mut target_left = target.letter_counts();
    let mut signals = vec![Feedback::Absent; guess.len()];

    for (i, &letter) in guess.bytes().iter().enumerate() {
        if target.letter_at(i) == letter {
            signals[i] = Feedback::Exact;
            if let Some(count) = guess_left.get_mut(&letter) {
                *count -= 1;
            }
            if let Some(count) = target_left.get_mut(&letter) {
                *count -= 1;
            }
        }
    }

    for (i, &letter) in guess.bytes().iter().enumerate() {
        if signals[i] == Feedback::Exact {
            continue;
        }
        let guess_remaining = guess_left.get(&letter).copied().unwrap_or(0);
        let target_remaining = target_left.get(&letter).copied().unwrap_or(0);
        if guess_remaining > 0 && target_remaining > 0 {
            signals[i] = Feedback::Elsewhere;
            if let Some(count) = guess_left.get_mut(&letter) {
                *count -= 1;
            }
            if let Some(count) = target_left.get_mut(&letter) {
                *count -= 1;
            }
        }
    }

    signals
}

/// Encode a guess and its signals in the wire format
///
/// # Examples
/// ```
/// use wordle_sieve::core::{Word, encode, evaluate};
///
/// let guess = Word::new("crane").unwrap();
/// let target = Word::new("slate").unwrap();
/// let line = encode(&guess, &evaluate(&guess, &target));
/// assert_eq!(line, "cra*ne*");
/// ```
///
/// # Panics
/// Panics if `signals` does not cover every letter of `guess`.
#[must_use]
pub fn encode(guess: &Word, signals: &[Feedback]) -> String {
    assert_eq!(guess.len(), signals.len(), "signal count mismatch");

    let mut line = String::with_capacity(guess.len() * 2);
    for (&letter, signal) in guess.bytes().iter().zip(signals) {
        line.push(letter as char);
        match signal {
            Feedback::Exact => line.push('*'),
            Feedback::Elsewhere => line.push('?'),
            Feedback::Absent => {}
        }
    }
    line
}

/// Decode a feedback line into per-position letter signals
///
/// A small left-to-right state machine: each letter is provisionally
/// `Absent`; a following `*` or `?` retroactively reclassifies it. Spaces
/// are skipped.
///
/// # Errors
/// Returns `FeedbackError::DanglingMarker` for a marker with no preceding
/// letter, and `FeedbackError::UnexpectedChar` for anything outside
/// letters, markers, and spaces.
///
/// # Examples
/// ```
/// use wordle_sieve::core::{Feedback, decode};
///
/// let signals = decode("a?rose*").unwrap();
/// assert_eq!(signals.len(), 5);
/// assert_eq!(signals[0].feedback, Feedback::Elsewhere);
/// assert_eq!(signals[4].feedback, Feedback::Exact);
/// ```
pub fn decode(line: &str) -> Result<Vec<LetterSignal>, FeedbackError> {
    let mut signals: Vec<LetterSignal> = Vec::new();

    for (position, ch) in line.char_indices() {
        match ch {
            ' ' => {}
            '*' | '?' => {
                let last = signals
                    .last_mut()
                    .ok_or(FeedbackError::DanglingMarker { position })?;
                last.feedback = if ch == '*' {
                    Feedback::Exact
                } else {
                    Feedback::Elsewhere
                };
            }
            _ if ch.is_ascii_alphabetic() => {
                signals.push(LetterSignal {
                    letter: ch.to_ascii_lowercase() as u8,
                    feedback: Feedback::Absent,
                });
            }
            _ => return Err(FeedbackError::UnexpectedChar(ch)),
        }
    }

    Ok(signals)
}

/// Decode a feedback line for a specific guess, validating its length
///
/// # Errors
/// Everything `decode` reports, plus `FeedbackError::LengthMismatch` when
/// the line does not cover exactly the guessed word.
pub fn decode_for(guess: &Word, line: &str) -> Result<Vec<LetterSignal>, FeedbackError> {
    let signals = decode(line)?;
    if signals.len() != guess.len() {
        return Err(FeedbackError::LengthMismatch {
            expected: guess.len(),
            actual: signals.len(),
        });
    }
    Ok(signals)
}

/// Letters proven present somewhere in the target by one feedback line
///
/// Used when absorbing a whole line: a repeated letter can be `Absent` at
/// one position and `Exact`/`Elsewhere` at another, and the word-level
/// union must win before any global-absence conclusion is drawn.
#[must_use]
pub fn present_letters(signals: &[LetterSignal]) -> FxHashSet<u8> {
    signals
        .iter()
        .filter(|s| s.feedback != Feedback::Absent)
        .map(|s| s.letter)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn evaluate_all_absent() {
        let signals = evaluate(&word("abcde"), &word("fghij"));
        assert!(signals.iter().all(|&s| s == Feedback::Absent));
    }

    #[test]
    fn evaluate_all_exact() {
        let signals = evaluate(&word("crane"), &word("crane"));
        assert!(signals.iter().all(|&s| s == Feedback::Exact));
    }

    #[test]
    fn evaluate_duplicate_letters_error_vs_arise() {
        // ERROR vs ARISE: target has one R. The first unmatched R scores
        // Elsewhere and consumes it; the remaining Rs must stay Absent.
        let signals = evaluate(&word("error"), &word("arise"));
        assert_eq!(
            signals,
            vec![
                Feedback::Elsewhere, // e -> arise has an e
                Feedback::Elsewhere, // r -> consumes the only r
                Feedback::Absent,    // r -> no r remains
                Feedback::Absent,    // o
                Feedback::Absent,    // r -> no r remains
            ]
        );
    }

    #[test]
    fn evaluate_exact_match_consumes_before_elsewhere() {
        // SPEED vs ERASE: no greens; both Es score yellow against the two
        // Es of the target, S scores yellow, P and D are absent.
        let signals = evaluate(&word("speed"), &word("erase"));
        assert_eq!(
            signals,
            vec![
                Feedback::Elsewhere,
                Feedback::Absent,
                Feedback::Elsewhere,
                Feedback::Elsewhere,
                Feedback::Absent,
            ]
        );
    }

    #[test]
    fn evaluate_green_priority_over_yellow() {
        // ROBOT vs FLOOR: second O is exact; first O elsewhere.
        let signals = evaluate(&word("robot"), &word("floor"));
        assert_eq!(
            signals,
            vec![
                Feedback::Elsewhere,
                Feedback::Elsewhere,
                Feedback::Absent,
                Feedback::Exact,
                Feedback::Absent,
            ]
        );
    }

    #[test]
    fn encode_marker_placement() {
        let signals = vec![
            Feedback::Elsewhere,
            Feedback::Absent,
            Feedback::Absent,
            Feedback::Absent,
            Feedback::Exact,
        ];
        assert_eq!(encode(&word("arose"), &signals), "a?rose*");
    }

    #[test]
    fn decode_markers_and_defaults() {
        let signals = decode("a?rose*").unwrap();
        let feedbacks: Vec<Feedback> = signals.iter().map(|s| s.feedback).collect();
        assert_eq!(
            feedbacks,
            vec![
                Feedback::Elsewhere,
                Feedback::Absent,
                Feedback::Absent,
                Feedback::Absent,
                Feedback::Exact,
            ]
        );
        assert_eq!(signals[0].letter, b'a');
        assert_eq!(signals[4].letter, b'e');
    }

    #[test]
    fn decode_ignores_spaces() {
        let spaced = decode("a? r o s e*").unwrap();
        let plain = decode("a?rose*").unwrap();
        assert_eq!(spaced, plain);
    }

    #[test]
    fn decode_trailing_unmarked_letter_is_absent() {
        let signals = decode("ab*c").unwrap();
        assert_eq!(signals[2].feedback, Feedback::Absent);
    }

    #[test]
    fn decode_dangling_marker_fails() {
        assert!(matches!(
            decode("*abc"),
            Err(FeedbackError::DanglingMarker { position: 0 })
        ));
        assert!(matches!(
            decode("?x"),
            Err(FeedbackError::DanglingMarker { position: 0 })
        ));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode("ab#cd"),
            Err(FeedbackError::UnexpectedChar('#'))
        ));
    }

    #[test]
    fn decode_for_length_mismatch() {
        let guess = word("crane");
        assert!(matches!(
            decode_for(&guess, "ab*c"),
            Err(FeedbackError::LengthMismatch {
                expected: 5,
                actual: 3
            })
        ));
        assert!(decode_for(&guess, "c*r*a*n*e*").is_ok());
    }

    #[test]
    fn roundtrip_matches_evaluate() {
        let pairs = [
            ("error", "arise"),
            ("speed", "erase"),
            ("robot", "floor"),
            ("crane", "slate"),
            ("aaaaa", "ababa"),
            ("ababa", "aaaaa"),
        ];
        for (g, t) in pairs {
            let guess = word(g);
            let target = word(t);
            let signals = evaluate(&guess, &target);
            let decoded = decode_for(&guess, &encode(&guess, &signals)).unwrap();
            let feedbacks: Vec<Feedback> = decoded.iter().map(|s| s.feedback).collect();
            assert_eq!(feedbacks, signals, "roundtrip failed for {g} vs {t}");
            for (signal, &letter) in decoded.iter().zip(guess.bytes()) {
                assert_eq!(signal.letter, letter);
            }
        }
    }

    #[test]
    fn roundtrip_random_pairs() {
        use rand::Rng;
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        // Tiny alphabet so duplicate letters are common.
        let mut rng = StdRng::seed_from_u64(42);
        let random_word = |rng: &mut StdRng| {
            let text: String = (0..5)
                .map(|_| char::from(b'a' + rng.random_range(0..4)))
                .collect();
            Word::new(text).unwrap()
        };

        for _ in 0..200 {
            let guess = random_word(&mut rng);
            let target = random_word(&mut rng);
            let signals = evaluate(&guess, &target);
            let decoded = decode_for(&guess, &encode(&guess, &signals)).unwrap();
            let feedbacks: Vec<Feedback> = decoded.iter().map(|s| s.feedback).collect();
            assert_eq!(
                feedbacks,
                signals,
                "roundtrip failed for {} vs {}",
                guess.text(),
                target.text()
            );
        }
    }

    #[test]
    fn present_letters_unions_across_positions() {
        // Repeated letter absent at one spot, present at another.
        let signals = decode("ppa*").unwrap();
        let present = present_letters(&signals);
        assert!(present.contains(&b'a'));
        assert!(!present.contains(&b'p'));

        let signals = decode("p?pa*").unwrap();
        let present = present_letters(&signals);
        assert!(present.contains(&b'p'));
    }
}
