//! Word list loading
//!
//! Dictionaries are newline-delimited text, one word per line, no header.
//! Lines that do not form valid words are skipped; length filtering happens
//! later, at index-build time.

use crate::core::Word;
use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Load words from a file, skipping blank and invalid lines
///
/// # Errors
/// Returns an I/O error if the file cannot be read.
///
/// # Examples
/// ```no_run
/// use wordle_sieve::wordlists::load_words;
///
/// let words = load_words("dicts/words_alpha.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_words<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let content = fs::read_to_string(&path)?;
    let words = words_from_lines(&content);
    debug!(
        "loaded {} words from {}",
        words.len(),
        path.as_ref().display()
    );
    Ok(words)
}

/// Parse newline-delimited content into words, skipping invalid lines
#[must_use]
pub fn words_from_lines(content: &str) -> Vec<Word> {
    content
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                None
            } else {
                Word::new(trimmed).ok()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_from_lines_parses_valid_words() {
        let words = words_from_lines("crane\nslate\nirate\n");
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].text(), "crane");
        assert_eq!(words[2].text(), "irate");
    }

    #[test]
    fn words_from_lines_skips_blank_and_invalid() {
        let words = words_from_lines("crane\n\n  \ncr4ne\nslate\n");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text(), "crane");
        assert_eq!(words[1].text(), "slate");
    }

    #[test]
    fn words_from_lines_keeps_mixed_lengths() {
        // Length filtering belongs to the index, not the loader.
        let words = words_from_lines("ox\ncrane\nlengthy\n");
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn words_from_lines_trims_whitespace() {
        let words = words_from_lines("  crane  \n\tslate\n");
        assert_eq!(words.len(), 2);
    }
}
