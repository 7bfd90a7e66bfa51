//! Line-oriented wire protocol between referee and player
//!
//! Guesses travel one word per line; feedback travels one encoded line per
//! guess (see [`crate::core::encode`]). Four whole-line sentinels round out
//! the protocol. End of input is a normal session-end state, not an error,
//! and is surfaced as [`Received::Closed`].

use std::io::{self, BufRead, Write};

/// The guess matched the target; constraint state resets for a new round
pub const CORRECT: &str = "CORRECT";
/// Attempts exhausted
pub const YOU_LOSE: &str = "YOU LOSE";
/// Proposed guess is not in the accepted word list; retry without losing
/// the attempt
pub const INVALID_WORD: &str = "INVALID WORD";
/// Player surrender: its candidate set is empty
pub const OUT_OF_GUESSES: &str = "OUT OF GUESSES";

/// Outcome of reading one protocol line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// A trimmed line of input
    Line(String),
    /// The channel reached end of input; the session is over
    Closed,
}

/// Read one line, reporting a clean end of input as `Closed`
///
/// # Errors
/// Propagates underlying I/O errors; EOF is not one of them.
pub fn recv_line(reader: &mut impl BufRead) -> io::Result<Received> {
    let mut line = String::new();
    let bytes = reader.read_line(&mut line)?;
    if bytes == 0 {
        Ok(Received::Closed)
    } else {
        Ok(Received::Line(line.trim().to_string()))
    }
}

/// Write one line and flush so a piped peer sees it immediately
///
/// # Errors
/// Propagates underlying I/O errors.
pub fn send_line(writer: &mut impl Write, line: &str) -> io::Result<()> {
    writeln!(writer, "{line}")?;
    writer.flush()
}
