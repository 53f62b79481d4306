//! Benchmark command - time minimax searches per depth bound
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_search_benchmarks(), report_results()
//! - Level 3: benchmark_bound(), create_positions()
//! - Level 4: timing utilities, formatting

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tictac_core::{random_move, Board, DepthBound, Difficulty, Minimax, Strategy};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Number of positions to search per depth bound
    #[arg(long, default_value = "20")]
    pub positions: usize,

    /// Random plies played before each search (0 = empty board)
    #[arg(long, default_value = "1")]
    pub opening_plies: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Results of one depth bound
#[derive(Clone, Debug, serde::Serialize)]
struct BenchmarkResult {
    name: String,
    searches: usize,
    nodes: u64,
    total_time: Duration,
    avg_time_per_search: Duration,
    nodes_per_second: f64,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
pub fn run(args: BenchmarkArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting benchmarks: {} positions, {} opening plies",
        args.positions,
        args.opening_plies
    );

    let positions = create_positions(args.positions, args.opening_plies, seed);
    let results = run_search_benchmarks(&positions);

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Time every searching difficulty on the same positions
fn run_search_benchmarks(positions: &[Board]) -> Vec<BenchmarkResult> {
    Difficulty::ALL
        .iter()
        .filter_map(|&level| match level.strategy() {
            Strategy::Search(bound) => {
                tracing::info!("Benchmarking {} (depth {})...", level, bound);
                Some(benchmark_bound(&format!("{} ({})", level, bound), bound, positions))
            }
            Strategy::Random => None,
        })
        .collect()
}

fn report_results(results: &[BenchmarkResult], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Search each position for its side to move
fn benchmark_bound(name: &str, bound: DepthBound, positions: &[Board]) -> BenchmarkResult {
    let mut nodes = 0;
    let start = Instant::now();

    for board in positions {
        let mut search = Minimax::new(board.to_move(), bound);
        search.best(board);
        nodes += search.nodes();
    }

    let total_time = start.elapsed();
    let searches = positions.len();

    BenchmarkResult {
        name: name.to_string(),
        searches,
        nodes,
        total_time,
        avg_time_per_search: average(total_time, searches),
        nodes_per_second: rate(nodes, total_time),
    }
}

/// Open, non-terminal positions reached by random play
fn create_positions(count: usize, opening_plies: u32, seed: Option<u64>) -> Vec<Board> {
    let mut rng = create_rng(seed);

    (0..count)
        .map(|_| {
            let mut board = Board::new();
            for _ in 0..opening_plies {
                // Keep at least one move for the search
                let next = random_move(&board, &mut rng).map(|mv| board.with_move(mv, board.to_move()));
                match next {
                    Some(child) if !child.is_terminal() => board = child,
                    _ => break,
                }
            }
            board
        })
        .collect()
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn average(total: Duration, count: usize) -> Duration {
    if count == 0 {
        Duration::ZERO
    } else {
        total / count as u32
    }
}

fn rate(nodes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        nodes as f64 / secs
    } else {
        0.0
    }
}

fn print_text_results(results: &[BenchmarkResult]) {
    println!("\n=== Search Benchmarks ===");
    println!(
        "{:<22} {:>8} {:>12} {:>14} {:>14}",
        "Bound", "Searches", "Nodes", "Avg/search", "Nodes/s"
    );
    for r in results {
        println!(
            "{:<22} {:>8} {:>12} {:>14.2?} {:>14.0}",
            r.name, r.searches, r.nodes, r.avg_time_per_search, r.nodes_per_second
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_open() {
        let positions = create_positions(10, 6, Some(1));
        assert_eq!(positions.len(), 10);
        for board in &positions {
            assert!(!board.is_terminal());
        }
    }

    #[test]
    fn test_zero_opening_plies_gives_empty_board() {
        let positions = create_positions(2, 0, Some(1));
        assert!(positions.iter().all(|b| *b == Board::new()));
    }

    #[test]
    fn test_deeper_bound_searches_more() {
        let positions = create_positions(5, 3, Some(7));
        let shallow = benchmark_bound("shallow", DepthBound::Bounded(2), &positions);
        let full = benchmark_bound("full", DepthBound::Unbounded, &positions);
        assert_eq!(shallow.searches, 5);
        assert!(full.nodes >= shallow.nodes);
    }

    #[test]
    fn test_average_handles_empty() {
        assert_eq!(average(Duration::from_secs(1), 0), Duration::ZERO);
        assert_eq!(rate(10, Duration::ZERO), 0.0);
    }
}
