//! Game referee and multi-game statistics
//!
//! Owns the round loop: picks targets, validates guesses against the
//! dictionary, evaluates feedback, and keeps aggregate statistics across
//! games. The player on the other end is anything that speaks the line
//! protocol: a forked subprocess or a human on stdio.

use crate::core::{Word, encode, evaluate};
use crate::index::WordIndex;
use crate::protocol::{self, CORRECT, INVALID_WORD, OUT_OF_GUESSES, Received, YOU_LOSE};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::Rng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashSet;
use std::collections::HashMap;
use std::io::{self, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// One end of the guess/feedback line protocol
pub trait Player {
    /// Send one protocol line to the player
    ///
    /// # Errors
    /// Propagates underlying I/O errors.
    fn send(&mut self, line: &str) -> io::Result<()>;

    /// Receive the player's next line
    ///
    /// # Errors
    /// Propagates underlying I/O errors; end of input is `Received::Closed`.
    fn recv(&mut self) -> io::Result<Received>;

    /// Whether a human is on the other end (prompts on, progress bar off)
    fn is_interactive(&self) -> bool {
        false
    }
}

/// A player program driven over its stdin/stdout pipes
pub struct PipedPlayer {
    child: Child,
    input: ChildStdin,
    output: BufReader<ChildStdout>,
}

impl PipedPlayer {
    /// Spawn `command` (whitespace-separated program and args) with piped
    /// stdio
    ///
    /// # Errors
    /// Returns an error when the command is empty or the process cannot be
    /// spawned.
    pub fn spawn(command: &str) -> io::Result<Self> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty player command"))?;
        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        let input = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("player stdin unavailable"))?;
        let output = child
            .stdout
            .take()
            .map(BufReader::new)
            .ok_or_else(|| io::Error::other("player stdout unavailable"))?;
        Ok(Self {
            child,
            input,
            output,
        })
    }
}

impl Player for PipedPlayer {
    fn send(&mut self, line: &str) -> io::Result<()> {
        protocol::send_line(&mut self.input, line)
    }

    fn recv(&mut self) -> io::Result<Received> {
        protocol::recv_line(&mut self.output)
    }
}

impl Drop for PipedPlayer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// A human playing over this process's stdin/stdout
pub struct ConsolePlayer;

impl Player for ConsolePlayer {
    fn send(&mut self, line: &str) -> io::Result<()> {
        protocol::send_line(&mut io::stdout(), line)
    }

    fn recv(&mut self) -> io::Result<Received> {
        print!("> ");
        io::stdout().flush()?;
        protocol::recv_line(&mut io::stdin().lock())
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

/// Referee settings for one session
#[derive(Debug, Clone, Copy)]
pub struct RefereeConfig {
    pub num_games: usize,
    pub word_length: usize,
    /// Play every dictionary word once instead of sampling
    pub exhaust: bool,
}

/// Aggregate outcome of a referee session
#[derive(Debug, Default)]
pub struct Statistics {
    pub wins: usize,
    pub losses: usize,
    pub surrenders: usize,
    /// Winning attempt counts: attempts -> games won in that many
    pub histogram: HashMap<usize, usize>,
}

impl Statistics {
    pub fn record_win(&mut self, attempts: usize) {
        self.wins += 1;
        *self.histogram.entry(attempts).or_insert(0) += 1;
    }

    pub fn record_loss(&mut self) {
        self.losses += 1;
    }

    pub fn record_surrender(&mut self) {
        self.surrenders += 1;
    }

    #[must_use]
    pub fn played(&self) -> usize {
        self.wins + self.losses + self.surrenders
    }

    /// Mean attempts over won games; `None` with no wins
    #[must_use]
    pub fn mean_attempts(&self) -> Option<f64> {
        if self.wins == 0 {
            return None;
        }
        let total: usize = self
            .histogram
            .iter()
            .map(|(attempts, count)| attempts * count)
            .sum();
        Some(total as f64 / self.wins as f64)
    }

    /// Standard deviation of attempts over won games; `None` with no wins
    #[must_use]
    pub fn stddev_attempts(&self) -> Option<f64> {
        let mean = self.mean_attempts()?;
        let variance: f64 = self
            .histogram
            .iter()
            .map(|(&attempts, &count)| (attempts as f64 - mean).powi(2) * count as f64)
            .sum::<f64>()
            / self.wins as f64;
        Some(variance.sqrt())
    }

    /// Session penalty: total winning attempts plus 7 per loss/surrender;
    /// lower is better
    #[must_use]
    pub fn penalty_score(&self) -> usize {
        let winning_attempts: usize = self
            .histogram
            .iter()
            .map(|(attempts, count)| attempts * count)
            .sum();
        winning_attempts + 7 * (self.losses + self.surrenders)
    }
}

/// Drive a player through a full session of games
///
/// Each game allows `word_length + 1` attempts. Guesses outside the
/// dictionary cost nothing (`INVALID WORD` is sent and the attempt
/// retried); a blank line forfeits the round; `OUT OF GUESSES` records a
/// surrender. A closed channel ends the session cleanly with the
/// statistics gathered so far.
///
/// # Errors
/// Propagates I/O errors from the player channel.
pub fn run_referee<P: Player>(
    index: &WordIndex,
    player: &mut P,
    config: &RefereeConfig,
    rng: &mut impl Rng,
) -> io::Result<Statistics> {
    let mut stats = Statistics::default();
    let targets = choose_targets(index, config, rng);
    let valid: FxHashSet<&str> = index.words().iter().map(Word::text).collect();
    let max_attempts = config.word_length + 1;

    let progress = if player.is_interactive() || targets.len() <= 1 {
        None
    } else {
        Some(session_progress(targets.len()))
    };

    'session: for (game, &target) in targets.iter().enumerate() {
        info!(
            "new game ({}/{}), target: {}",
            game + 1,
            targets.len(),
            target.text()
        );

        let mut won = false;
        let mut surrendered = false;
        let mut attempt = 1;

        while attempt <= max_attempts {
            let guess = match player.recv()? {
                Received::Closed => break 'session,
                Received::Line(line) => line,
            };
            if guess.is_empty() {
                break;
            }
            if guess == OUT_OF_GUESSES {
                info!("player gave up");
                stats.record_surrender();
                surrendered = true;
                break;
            }

            let parsed = Word::new(&guess);
            let Ok(guess_word) = parsed else {
                info!("invalid word {guess}");
                player.send(INVALID_WORD)?;
                continue; // attempt not consumed
            };
            if guess_word.len() != config.word_length || !valid.contains(guess_word.text()) {
                info!("invalid word {guess}");
                player.send(INVALID_WORD)?;
                continue;
            }

            if guess_word.text() == target.text() {
                player.send(CORRECT)?;
                info!("player won. {} attempts {attempt}", target.text());
                stats.record_win(attempt);
                won = true;
                break;
            }

            let signals = evaluate(&guess_word, target);
            if attempt != max_attempts {
                let response = encode(&guess_word, &signals);
                debug!("sending {response}, attempt {attempt}");
                player.send(&response)?;
            }
            attempt += 1;
        }

        if !won && !surrendered {
            player.send(YOU_LOSE)?;
            stats.record_loss();
            info!("player lost. target was {}", target.text());
            if player.is_interactive() {
                println!("The word was {}", target.text());
            }
        }

        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = &progress {
        bar.finish_with_message("complete");
    }
    Ok(stats)
}

fn choose_targets<'a>(
    index: &'a WordIndex,
    config: &RefereeConfig,
    rng: &mut impl Rng,
) -> Vec<&'a Word> {
    if config.exhaust {
        index.words().iter().collect()
    } else {
        (0..config.num_games)
            .filter_map(|_| index.words().choose(rng))
            .collect()
    }
}

fn session_progress(games: usize) -> ProgressBar {
    let bar = ProgressBar::new(games as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap()
            .progress_chars("█▓▒░"),
    );
    bar
}

/// Print session statistics with the winning-attempt histogram
pub fn print_statistics(stats: &Statistics) {
    println!("\n{}", "═".repeat(60));
    println!(" Session Results ");
    println!("{}", "═".repeat(60));

    println!("\n{}", "Overall".bright_cyan().bold());
    println!("  Games played: {}", stats.played());
    if stats.played() > 0 {
        let win_pct = stats.wins as f64 / stats.played() as f64 * 100.0;
        println!(
            "  Wins: {}  Losses: {}  Surrenders: {}  ({})",
            stats.wins,
            stats.losses,
            stats.surrenders,
            format!("{win_pct:.1}% won").green()
        );
    }
    if let (Some(mean), Some(stddev)) = (stats.mean_attempts(), stats.stddev_attempts()) {
        println!(
            "  Attempts to win: mean {} stddev {stddev:.3}",
            format!("{mean:.3}").bright_yellow().bold()
        );
    }
    println!("  Penalty score (lower better): {}", stats.penalty_score());

    if stats.wins > 0 {
        println!("\n{}", "Winning Histogram".bright_cyan().bold());
        let max_attempts = stats.histogram.keys().max().copied().unwrap_or(0);
        let max_count = stats.histogram.values().max().copied().unwrap_or(1);
        for attempts in 1..=max_attempts {
            let count = stats.histogram.get(&attempts).copied().unwrap_or(0);
            let fraction = count as f64 / stats.wins as f64;
            let bar_len = if max_count > 0 {
                (count * 40 / max_count).max(usize::from(count > 0))
            } else {
                0
            };
            let bar = format!(
                "{}{}",
                "█".repeat(bar_len).green(),
                "░".repeat(40_usize.saturating_sub(bar_len)).bright_black()
            );
            println!("  {attempts:>2} | {:>6.2} % | {bar} ({count})", fraction * 100.0);
        }
    }
}
