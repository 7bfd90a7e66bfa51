//! Wordle Sieve - CLI
//!
//! Assistant, pipe-protocol client, and game referee over one index core.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::path::PathBuf;
use wordle_sieve::{
    commands::{
        ConsolePlayer, PipedPlayer, RefereeConfig, SuggestConfig, print_statistics, run_client,
        run_referee, run_suggest,
    },
    index::WordIndex,
    solver::{Aggregator, StrategyKind, StrategyParams},
    wordlists::load_words,
};

#[derive(Parser)]
#[command(
    name = "wordle_sieve",
    about = "Narrow a word puzzle to ranked guesses with information-theoretic strategies",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log informational progress to stderr
    #[arg(long, global = true)]
    verbose: bool,

    /// Log debug detail to stderr
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Args)]
struct StrategyArgs {
    /// Strategy: ngram (default), entropy, pmi, conditional
    #[arg(short, long, default_value = "ngram")]
    strategy: String,

    /// N-gram length for the frequency heuristic (1 or 2)
    #[arg(long, default_value_t = 2)]
    ngram_len: usize,

    /// Disable position-tagged frequencies
    #[arg(long)]
    no_positional: bool,

    /// Merge raw scores across dictionaries instead of sum-normalized ones
    #[arg(long)]
    no_normalize: bool,
}

impl StrategyArgs {
    fn strategy(&self) -> StrategyKind {
        StrategyKind::from_name(
            &self.strategy,
            StrategyParams {
                ngram_len: self.ngram_len.clamp(1, 2),
                positional: !self.no_positional,
            },
        )
    }

    fn aggregator(&self) -> Aggregator {
        Aggregator::new(!self.no_normalize)
    }
}

#[derive(Args)]
struct DictionaryArgs {
    /// Comma-separated dictionary files, one word per line
    #[arg(
        short,
        long,
        default_value = "dicts/words_alpha.txt,dicts/google-10000-english.txt"
    )]
    dictionaries: String,

    /// Word length to play
    #[arg(short, long, default_value_t = 5)]
    length: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive assistant: prints ranked guesses, reads feedback lines
    Suggest {
        #[command(flatten)]
        strategy: StrategyArgs,

        #[command(flatten)]
        dictionaries: DictionaryArgs,

        /// How many ranked guesses to display
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Pipe-protocol client for a referee-driven game
    Client {
        #[command(flatten)]
        strategy: StrategyArgs,

        #[command(flatten)]
        dictionaries: DictionaryArgs,
    },

    /// Referee: run full games against a player
    Referee {
        /// Number of games to play
        #[arg(default_value_t = 1)]
        num_games: usize,

        /// Word length to play
        #[arg(short, long, default_value_t = 5)]
        length: usize,

        /// Dictionary of valid guesses and targets
        #[arg(short, long, default_value = "dicts/words_alpha.txt")]
        dictionary: PathBuf,

        /// Seed for target selection (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Play every dictionary word once, in order
        #[arg(long)]
        exhaust: bool,

        /// Player program to drive over pipes (interactive stdio when absent)
        #[arg(long)]
        exec: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    match cli.command {
        Commands::Suggest {
            strategy,
            dictionaries,
            top,
        } => {
            let indexes = load_indexes(&dictionaries.dictionaries, dictionaries.length)?;
            let config = SuggestConfig {
                word_length: dictionaries.length,
                top,
            };
            let stdin = io::stdin();
            run_suggest(
                &strategy.strategy(),
                &strategy.aggregator(),
                &indexes,
                &config,
                &mut stdin.lock(),
                &mut io::stdout(),
            )
        }
        Commands::Client {
            strategy,
            dictionaries,
        } => {
            let indexes = load_indexes(&dictionaries.dictionaries, dictionaries.length)?;
            let stdin = io::stdin();
            run_client(
                &strategy.strategy(),
                &strategy.aggregator(),
                &indexes,
                dictionaries.length,
                &mut stdin.lock(),
                &mut io::stdout(),
            )
        }
        Commands::Referee {
            num_games,
            length,
            dictionary,
            seed,
            exhaust,
            exec,
        } => {
            let words = load_words(&dictionary)
                .with_context(|| format!("reading dictionary {}", dictionary.display()))?;
            let index = WordIndex::build(words, Some(length));
            anyhow::ensure!(
                !index.is_empty(),
                "dictionary {} has no words of length {length}",
                dictionary.display()
            );

            let seed = seed.unwrap_or_else(rand::random);
            let mut rng = StdRng::seed_from_u64(seed);
            let config = RefereeConfig {
                num_games,
                word_length: length,
                exhaust,
            };

            let stats = match exec {
                Some(command) => {
                    let mut player = PipedPlayer::spawn(&command)
                        .with_context(|| format!("spawning player: {command}"))?;
                    run_referee(&index, &mut player, &config, &mut rng)?
                }
                None => run_referee(&index, &mut ConsolePlayer, &config, &mut rng)?,
            };

            println!(
                "\nDictionary: {}  Word length: {length}  Seed: {seed}",
                dictionary.display()
            );
            print_statistics(&stats);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Build one index per dictionary file, all filtered to the played length
fn load_indexes(csv: &str, length: usize) -> Result<Vec<WordIndex>> {
    let mut indexes = Vec::new();
    for path in csv.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let words = load_words(path).with_context(|| format!("reading dictionary {path}"))?;
        let index = WordIndex::build(words, Some(length));
        anyhow::ensure!(
            !index.is_empty(),
            "dictionary {path} has no words of length {length}"
        );
        indexes.push(index);
    }
    anyhow::ensure!(!indexes.is_empty(), "no dictionaries given");
    Ok(indexes)
}
