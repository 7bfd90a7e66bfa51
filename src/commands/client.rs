//! Pipe-protocol player client
//!
//! Emits one guess per line and reads one response per guess, suitable for
//! driving over stdin/stdout or a referee's subprocess pipes. Unlike the
//! assistant, malformed feedback aborts the round: a scripted peer that
//! sends garbage cannot be prompted to try again.

use crate::core::decode;
use crate::index::WordIndex;
use crate::protocol::{self, CORRECT, INVALID_WORD, OUT_OF_GUESSES, Received, YOU_LOSE};
use crate::solver::{Aggregator, Strategy};
use crate::state::ConstraintState;
use log::{debug, info};
use std::io::{BufRead, Write};

/// Play the wire protocol until the channel closes
///
/// Per round: rank candidates, send the best guess, and react to the
/// response. `INVALID WORD` advances to the next ranked guess without
/// re-ranking; real feedback is absorbed and triggers a re-rank; `CORRECT`
/// and `YOU LOSE` reset for the next round. When the ranked list is empty
/// or exhausted by rejections, the client surrenders with `OUT OF GUESSES`.
///
/// # Errors
/// Returns an error on I/O failure, malformed feedback, or when the
/// configured word length was never indexed.
pub fn run_client<S: Strategy + Sync>(
    strategy: &S,
    aggregator: &Aggregator,
    indexes: &[WordIndex],
    word_length: usize,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    let mut state = ConstraintState::new(word_length);
    let mut line = String::new();

    loop {
        if line == CORRECT || line == YOU_LOSE {
            if line == YOU_LOSE {
                info!(
                    "lost round; knew {} present, {} absent",
                    state.contains().len(),
                    state.excludes().len()
                );
            }
            state.reset();
            line.clear();
        }

        if !line.is_empty() {
            let signals = decode(&line)?;
            state.absorb(&signals)?;
        }

        let ranked = aggregator.rank_across(strategy, indexes, &state)?;
        if ranked.is_empty() {
            protocol::send_line(output, OUT_OF_GUESSES)?;
            state.reset();
            line.clear();
            continue;
        }

        let mut accepted = false;
        for candidate in &ranked {
            debug!("sending guess {}", candidate.word);
            protocol::send_line(output, &candidate.word)?;
            match protocol::recv_line(input)? {
                Received::Closed => return Ok(()),
                Received::Line(response) if response == INVALID_WORD => {
                    debug!("guess {} rejected as invalid", candidate.word);
                }
                Received::Line(response) => {
                    line = response;
                    accepted = true;
                    break;
                }
            }
        }

        if !accepted {
            info!("every ranked guess rejected; surrendering");
            protocol::send_line(output, OUT_OF_GUESSES)?;
            state.reset();
            line.clear();
        }
    }
}
