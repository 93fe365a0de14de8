//! Machi CLI - Command-line interface for running simulated games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use machi::game::GameConfig;
use machi::policy::PolicyKind;
use machi::tournament::TournamentConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Machi - A deterministic city-building dice game simulator
#[derive(Parser, Debug)]
#[command(name = "machi")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single game
    Run {
        /// Policy for each seat, comma separated: random or greedy (2-8 seats)
        #[arg(long, value_delimiter = ',', default_value = "random,random", value_parser = cli::parse_seat)]
        seats: Vec<PolicyKind>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum turns (default: 10000)
        #[arg(short = 't', long, default_value = "10000")]
        max_turns: u32,

        /// Coins every player starts with
        #[arg(long, default_value = "0")]
        starting_coins: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Append a full-state CSV row per turn to this file
        #[arg(long)]
        record_csv: Option<PathBuf>,

        /// Append a human-readable game log to this file
        #[arg(long)]
        record_log: Option<PathBuf>,

        /// Append JSON lines, one per turn, to this file
        #[arg(long)]
        record_json: Option<PathBuf>,

        /// Suppress progress messages
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run mass parallel games and aggregate statistics
    Tournament {
        /// Policy for each seat, comma separated: random or greedy (2-8 seats)
        #[arg(long, value_delimiter = ',', default_value = "random,random", value_parser = cli::parse_seat)]
        seats: Vec<PolicyKind>,

        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum turns per game (default: 10000)
        #[arg(short = 't', long)]
        max_turns: Option<u32>,

        /// Coins every player starts with
        #[arg(long, default_value = "0")]
        starting_coins: u32,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            seats,
            seed,
            max_turns,
            starting_coins,
            format,
            record_csv,
            record_log,
            record_json,
            quiet,
        } => {
            let config = GameConfig {
                num_players: seats.len(),
                starting_coins,
                max_turns,
            };
            let records = cli::run::RecordPaths {
                csv: record_csv,
                log: record_log,
                json: record_json,
            };
            cli::run::execute(&seats, seed, config, format, &records, quiet)
        }

        Commands::Tournament {
            seats,
            games,
            seed,
            threads,
            max_turns,
            starting_coins,
            format,
            progress,
        } => {
            let mut config = TournamentConfig {
                games,
                base_seed: cli::seed_or_now(seed),
                threads,
                ..TournamentConfig::default()
            };
            config.game.num_players = seats.len();
            config.game.starting_coins = starting_coins;
            if let Some(t) = max_turns {
                config.game.max_turns = t;
            }
            cli::tournament::execute(&seats, &config, format, progress)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
