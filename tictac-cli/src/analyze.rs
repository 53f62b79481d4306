//! Analyze command - score every move in a position
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: analyze_position(), report()
//! - Level 3: (delegated to tictac-core's Minimax)
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;

use tictac_core::{select_best, Board, DepthBound, GameResult, Mark, Minimax, SearchResult};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Position to analyze, e.g. "XX_/OO_/___"
    pub board: Board,

    /// Mark to find a move for (default: side to move)
    #[arg(long)]
    pub mark: Option<Mark>,

    /// Search depth bound (default: unbounded)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything learned about a position
#[derive(Clone, Debug, serde::Serialize)]
struct Analysis {
    board: Board,
    mark: Mark,
    bound: DepthBound,
    result: GameResult,
    moves: Vec<SearchResult>,
    best: Option<SearchResult>,
    nodes: u64,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run analyze command
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let mark = args.mark.unwrap_or_else(|| args.board.to_move());
    let bound = args.depth.map_or(DepthBound::Unbounded, DepthBound::Bounded);

    let analysis = analyze_position(args.board, mark, bound);

    tracing::info!("Searched {} nodes", analysis.nodes);

    report(&analysis, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn analyze_position(board: Board, mark: Mark, bound: DepthBound) -> Analysis {
    let result = board.result();
    let mut search = Minimax::new(mark, bound);

    // Decided positions have nothing to search
    let moves = if result.is_over() {
        Vec::new()
    } else {
        search.root_results(&board)
    };
    let best = select_best(&moves);

    Analysis {
        board,
        mark,
        bound,
        result,
        moves,
        best,
        nodes: search.nodes(),
    }
}

fn report(analysis: &Analysis, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
        return Ok(());
    }

    println!("{}\n", analysis.board);
    println!("Status: {}", describe_result(analysis.result));
    if analysis.result.is_over() {
        return Ok(());
    }

    println!("Scores for {} (depth {}):", analysis.mark, analysis.bound);
    for result in &analysis.moves {
        println!("  {}  {:>2}  {}", result.mv, result.score, describe_score(result));
    }
    if let Some(best) = analysis.best {
        println!("Best move: {}", best.mv);
    }
    println!("Nodes searched: {}", analysis.nodes);
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn describe_result(result: GameResult) -> String {
    match result {
        GameResult::Ongoing => "ongoing".to_string(),
        GameResult::Won(mark) => format!("{} wins", mark),
        GameResult::Draw => "draw".to_string(),
    }
}

fn describe_score(result: &SearchResult) -> String {
    match result.score.signum() {
        1 => format!("win in {}", result.plies),
        -1 => format!("loss in {}", result.plies),
        _ => "draw".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
