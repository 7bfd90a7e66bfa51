//! Terminal output formatting
//!
//! Rendering for ranked guess lists and score bars.

use crate::solver::ScoredCandidate;
use colored::Colorize;
use std::io::{self, Write};

/// Proportional bar for a score relative to the best score shown
#[must_use]
pub fn score_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Print the top ranked guesses as a small table
///
/// # Errors
/// Propagates underlying I/O errors.
pub fn print_ranked(
    out: &mut impl Write,
    ranked: &[ScoredCandidate],
    top: usize,
) -> io::Result<()> {
    if ranked.is_empty() {
        return Ok(());
    }

    let max_score = ranked[0].score;
    writeln!(
        out,
        "\n{} candidate{} remaining",
        ranked.len(),
        if ranked.len() == 1 { "" } else { "s" }
    )?;
    for (rank, candidate) in ranked.iter().take(top).enumerate() {
        writeln!(
            out,
            "  {:>2}. {}  {} {:.4}",
            rank + 1,
            candidate.word.to_uppercase().bright_white().bold(),
            score_bar(candidate.score, max_score, 20),
            candidate.score
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bar_empty_and_full() {
        assert_eq!(score_bar(0.0, 1.0, 10), "░░░░░░░░░░");
        assert_eq!(score_bar(1.0, 1.0, 10), "██████████");
    }

    #[test]
    fn score_bar_half() {
        assert_eq!(score_bar(0.5, 1.0, 10), "█████░░░░░");
    }

    #[test]
    fn score_bar_zero_max_is_empty() {
        assert_eq!(score_bar(1.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn print_ranked_limits_to_top() {
        let ranked: Vec<ScoredCandidate> = (0..20)
            .map(|i| ScoredCandidate::new(format!("word{i}"), 1.0))
            .collect();
        let mut out = Vec::new();
        print_ranked(&mut out, &ranked, 5).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("WORD4"));
        assert!(!text.contains("WORD5"));
    }

    #[test]
    fn print_ranked_empty_prints_nothing() {
        let mut out = Vec::new();
        print_ranked(&mut out, &[], 5).unwrap();
        assert!(out.is_empty());
    }
}
