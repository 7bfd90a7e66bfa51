//! Interactive assistant mode
//!
//! Prints ranked guesses, reads one feedback line per round, and narrows
//! until the game ends. The human plays any suggested word and reports the
//! feedback in the wire format (`a?rose*` means `a` present elsewhere, `e`
//! exact, everything else absent).

use crate::core::decode;
use crate::index::WordIndex;
use crate::output::print_ranked;
use crate::protocol::{self, CORRECT, OUT_OF_GUESSES, Received, YOU_LOSE};
use crate::solver::{Aggregator, Strategy};
use crate::state::ConstraintState;
use log::info;
use std::io::{BufRead, Write};

/// Knobs for the assistant loop
#[derive(Debug, Clone, Copy)]
pub struct SuggestConfig {
    pub word_length: usize,
    /// How many ranked guesses to display per round
    pub top: usize,
}

/// Run the assistant until the feedback channel closes
///
/// Sentinels `CORRECT` and `YOU LOSE` reset the constraint state for a new
/// round; an empty input line asks for the opening suggestions. Malformed
/// feedback is reported and the same round is prompted again.
///
/// # Errors
/// Returns an error on I/O failure or when `word_length` was never indexed.
pub fn run_suggest<S: Strategy + Sync>(
    strategy: &S,
    aggregator: &Aggregator,
    indexes: &[WordIndex],
    config: &SuggestConfig,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(
        output,
        "Mark each letter of your guess with * (exact position) or ? (present,\n\
         wrong position); leave absent letters unmarked. Example: a?rose*\n\
         Hit enter for the initial suggestions.",
    )?;

    let mut state = ConstraintState::new(config.word_length);
    let mut line = String::new();

    loop {
        if line == CORRECT || line == YOU_LOSE {
            if line == YOU_LOSE {
                info!("round lost; resetting");
            }
            state.reset();
            line.clear();
        }

        if !line.is_empty() {
            let absorbed = decode(&line).and_then(|signals| state.absorb(&signals));
            if let Err(error) = absorbed {
                writeln!(output, "Invalid feedback: {error}")?;
            }
        }

        let ranked = aggregator.rank_across(strategy, indexes, &state)?;
        if ranked.is_empty() {
            writeln!(output, "{OUT_OF_GUESSES}")?;
            state.reset();
            line.clear();
        } else {
            print_ranked(output, &ranked, config.top)?;
        }

        write!(output, "\n> ")?;
        output.flush()?;
        match protocol::recv_line(input)? {
            Received::Closed => return Ok(()),
            Received::Line(next) => line = next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::solver::NgramFrequency;

    fn build_index(words: &[&str]) -> WordIndex {
        WordIndex::build(words.iter().map(|w| Word::new(*w).unwrap()), Some(5))
    }

    fn run_session(feedback: &str, words: &[&str]) -> String {
        let indexes = vec![build_index(words)];
        let strategy = NgramFrequency::default();
        let config = SuggestConfig {
            word_length: 5,
            top: 10,
        };
        let mut input = std::io::Cursor::new(feedback.as_bytes().to_vec());
        let mut output = Vec::new();
        run_suggest(
            &strategy,
            &Aggregator::default(),
            &indexes,
            &config,
            &mut input,
            &mut output,
        )
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn session_ends_cleanly_on_eof() {
        let transcript = run_session("", &["apple", "angle", "ankle"]);
        assert!(transcript.contains("ANGLE") || transcript.contains("APPLE"));
    }

    #[test]
    fn session_narrows_after_feedback() {
        // g elsewhere leaves only "angle".
        let transcript = run_session("g?rump\n", &["apple", "angle", "ankle"]);
        assert!(transcript.contains("1 candidate remaining"));
    }

    #[test]
    fn session_reports_malformed_feedback() {
        let transcript = run_session("*bad\n", &["apple", "angle", "ankle"]);
        assert!(transcript.contains("Invalid feedback"));
    }

    #[test]
    fn session_resets_on_correct() {
        let transcript = run_session("g?rump\nCORRECT\n", &["apple", "angle", "ankle"]);
        // After CORRECT the full candidate set is back.
        assert!(transcript.contains("3 candidates remaining"));
    }

    #[test]
    fn session_out_of_guesses_resets() {
        // Feedback that excludes every word: all three contain a, so an
        // unmarked a empties the candidate set.
        let transcript = run_session("axxxx\n", &["apple", "angle", "ankle"]);
        assert!(transcript.contains(OUT_OF_GUESSES));
    }
}
