//! tictac CLI - Command-line interface
//!
//! Commands:
//! - play: Play against the computer
//! - match: Pit two difficulty levels against each other
//! - analyze: Score every move in a position
//! - benchmark: Time minimax at each difficulty

mod analyze;
mod benchmark;
mod match_cmd;
mod play;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictac")]
#[command(about = "Tic-tac-toe against a minimax opponent")]
struct Cli {
    /// Seed for reproducible random moves
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log search details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against the computer
    Play(play::PlayArgs),
    /// Play computer against computer
    Match(match_cmd::MatchArgs),
    /// Score all moves in a position
    Analyze(analyze::AnalyzeArgs),
    /// Time minimax searches
    Benchmark(benchmark::BenchmarkArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Analyze(args) => analyze::run(args),
        Commands::Benchmark(args) => benchmark::run(args, cli.seed),
    }
}
