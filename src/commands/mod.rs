//! Command implementations

pub mod client;
pub mod referee;
pub mod suggest;

pub use client::run_client;
pub use referee::{
    ConsolePlayer, PipedPlayer, Player, RefereeConfig, Statistics, print_statistics, run_referee,
};
pub use suggest::{SuggestConfig, run_suggest};
