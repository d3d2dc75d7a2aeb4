//! Hit & Blow - CLI
//!
//! Interactive number-guessing game with live candidate counts, plus replay,
//! universe inspection, benchmarking and completed-game history.

use anyhow::Result;
use clap::{Parser, Subcommand};
use hitblow::{
    commands::{BenchmarkConfig, replay_game, run_benchmark, run_play, universe_report},
    engine::{OffloadMode, Session, SessionConfig},
    history::{HistoryStore, LocalHistoryStore},
    output::{
        display::print_history_table, print_benchmark_result, print_replay_result,
        print_universe_rows,
    },
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hitblow",
    about = "Hit & Blow number-guessing game with incremental candidate deduction",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of digits in the secret (clamped to 1-10)
    #[arg(short, long, global = true, default_value = "4")]
    digits: usize,

    /// Candidate narrowing placement: auto (default), always, never
    #[arg(short, long, global = true, default_value = "auto")]
    offload: String,

    /// History file (defaults to the local data directory)
    #[arg(long, global = true, env = "HITBLOW_HISTORY")]
    history_file: Option<PathBuf>,

    /// Print diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive game (default)
    Play,

    /// Score guesses against a known secret
    Replay {
        /// The secret number
        secret: String,

        /// Guesses in order
        #[arg(required = true)]
        guesses: Vec<String>,
    },

    /// Show candidate universe sizes
    Universe {
        /// Generate one length and show its first and last codes
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Benchmark the engine with random self-play
    Benchmark {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Seed for secrets and guesses
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Completed-game history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List completed games, newest first (default)
    List,

    /// Delete one record
    Delete {
        /// Record id
        id: u64,
    },
}

fn open_store(path: Option<PathBuf>) -> LocalHistoryStore {
    match path {
        Some(path) => LocalHistoryStore::at(path),
        None => LocalHistoryStore::new(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let offload = OffloadMode::from_name(&cli.offload);
    let config = SessionConfig::new(cli.digits).with_offload(offload);
    let store = open_store(cli.history_file);

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_play_command(config, &store, cli.verbose),
        Commands::Replay { secret, guesses } => run_replay_command(&secret, &guesses, offload),
        Commands::Universe { length } => run_universe_command(length),
        Commands::Benchmark { count, seed } => {
            run_benchmark_command(config.length(), count, seed, offload)
        }
        Commands::History { action } => {
            run_history_command(action.unwrap_or(HistoryAction::List), &store)
        }
    }
}

fn run_play_command(config: SessionConfig, store: &dyn HistoryStore, verbose: bool) -> Result<()> {
    let mut session = Session::new(config);
    run_play(&mut session, store, verbose).map_err(|e| anyhow::anyhow!(e))
}

fn run_replay_command(secret: &str, guesses: &[String], offload: OffloadMode) -> Result<()> {
    let result = replay_game(secret, guesses, offload).map_err(|e| anyhow::anyhow!(e))?;
    print_replay_result(&result);
    Ok(())
}

fn run_universe_command(length: Option<usize>) -> Result<()> {
    let rows = universe_report(length).map_err(|e| anyhow::anyhow!(e))?;
    print_universe_rows(&rows);
    Ok(())
}

fn run_benchmark_command(
    digit_count: usize,
    count: usize,
    seed: u64,
    offload: OffloadMode,
) -> Result<()> {
    println!("Running benchmark: {count} self-play games with {digit_count} digits...");

    let config = BenchmarkConfig {
        seed,
        offload,
        ..BenchmarkConfig::new(digit_count, count)
    };
    let result = run_benchmark(&config).map_err(|e| anyhow::anyhow!(e))?;
    print_benchmark_result(&result);
    Ok(())
}

fn run_history_command(action: HistoryAction, store: &dyn HistoryStore) -> Result<()> {
    match action {
        HistoryAction::List => print_history_table(&store.list()?),
        HistoryAction::Delete { id } => {
            store.delete(id)?;
            println!("Deleted record #{id}");
        }
    }
    Ok(())
}
