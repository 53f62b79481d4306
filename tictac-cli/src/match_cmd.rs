//! Match command - play games between two difficulty levels
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use tictac_core::{play_game, Board, ComputerPlayer, Difficulty, GameResult, Mark, Move};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Difficulty of the first player (plays X in odd-numbered games)
    #[arg(long, default_value = "hard")]
    pub first: Difficulty,

    /// Difficulty of the second player
    #[arg(long, default_value = "easy")]
    pub second: Difficulty,

    /// Number of games to play (will alternate marks)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Which of the two match participants
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
enum Side {
    First,
    Second,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    /// Participant that played X
    x_side: Side,
    result: GameResult,
    moves: Vec<Move>,
}

impl GameRecord {
    fn winner(&self) -> Option<Side> {
        let mark = self.result.winner()?;
        Some(match (mark, self.x_side) {
            (Mark::X, side) => side,
            (Mark::O, Side::First) => Side::Second,
            (Mark::O, Side::Second) => Side::First,
        })
    }
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    first: Difficulty,
    second: Difficulty,
    games: Vec<GameRecord>,
    first_wins: usize,
    second_wins: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting match: {} vs {} ({} games)",
        args.first,
        args.second,
        args.games
    );

    let results = play_match(args.first, args.second, args.games, seed);

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match, in parallel
fn play_match(first: Difficulty, second: Difficulty, games: usize, seed: Option<u64>) -> MatchResults {
    let base_seed = create_rng(seed).gen::<u64>();

    let records: Vec<GameRecord> = (0..games)
        .into_par_iter()
        .map(|game_num| {
            // Alternate marks for fairness
            let x_side = if game_num % 2 == 0 {
                Side::First
            } else {
                Side::Second
            };
            let record = play_single_game(
                first,
                second,
                x_side,
                game_num + 1,
                base_seed.wrapping_add(game_num as u64),
            );
            tracing::info!(
                "Game {}: {:?} ({} moves)",
                record.game_number,
                record.result,
                record.moves.len()
            );
            record
        })
        .collect();

    compute_match_statistics(first, second, records)
}

fn report_results(results: &MatchResults, json: bool) -> Result<()> {
    if json {
        print_json_results(results)
    } else {
        print_text_results(results);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(
    first: Difficulty,
    second: Difficulty,
    x_side: Side,
    game_number: usize,
    seed: u64,
) -> GameRecord {
    let (x_level, o_level) = match x_side {
        Side::First => (first, second),
        Side::Second => (second, first),
    };
    let mut x = ComputerPlayer::with_seed(Mark::X, x_level, seed);
    let mut o = ComputerPlayer::with_seed(Mark::O, o_level, seed ^ 0x9e37_79b9_7f4a_7c15);

    let (final_board, moves) = play_game(&mut x, &mut o, Board::new());

    GameRecord {
        game_number,
        x_side,
        result: final_board.result(),
        moves,
    }
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(
    first: Difficulty,
    second: Difficulty,
    games: Vec<GameRecord>,
) -> MatchResults {
    let first_wins = games
        .iter()
        .filter(|g| g.winner() == Some(Side::First))
        .count();
    let second_wins = games
        .iter()
        .filter(|g| g.winner() == Some(Side::Second))
        .count();
    let draws = games
        .iter()
        .filter(|g| g.result == GameResult::Draw)
        .count();

    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        first,
        second,
        games,
        first_wins,
        second_wins,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        x_side: Side,
        result: GameResult,
        moves: Vec<Move>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        first: Difficulty,
        second: Difficulty,
        total_games: usize,
        first_wins: usize,
        second_wins: usize,
        draws: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        first: results.first,
        second: results.second,
        total_games: results.games.len(),
        first_wins: results.first_wins,
        second_wins: results.second_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                x_side: g.x_side,
                result: g.result,
                moves: g.moves.clone(),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!(
        "{:<7} wins: {} ({:.1}%)",
        results.first,
        results.first_wins,
        percent(results.first_wins, total)
    );
    println!(
        "{:<7} wins: {} ({:.1}%)",
        results.second,
        results.second_wins,
        percent(results.second_wins, total)
    );
    println!(
        "Draws:        {} ({:.1}%)",
        results.draws,
        percent(results.draws, total)
    );
    println!("Avg moves:    {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} (X = {:?}) in {} moves",
            game.game_number,
            game.result,
            game.x_side,
            game.moves.len()
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(game_number: usize, x_side: Side, result: GameResult, moves: usize) -> GameRecord {
        GameRecord {
            game_number,
            x_side,
            result,
            moves: vec![Move::new(0, 0); moves],
        }
    }

    #[test]
    fn test_compute_match_statistics_empty() {
        let results = compute_match_statistics(Difficulty::Hard, Difficulty::Easy, vec![]);
        assert_eq!(results.first_wins, 0);
        assert_eq!(results.second_wins, 0);
        assert_eq!(results.draws, 0);
        assert_eq!(results.avg_moves, 0.0);
    }

    #[test]
    fn test_compute_match_statistics() {
        let games = vec![
            record(1, Side::First, GameResult::Won(Mark::X), 5),
            record(2, Side::Second, GameResult::Won(Mark::O), 7),
            record(3, Side::First, GameResult::Draw, 9),
            record(4, Side::Second, GameResult::Won(Mark::X), 7),
        ];

        let results = compute_match_statistics(Difficulty::Hard, Difficulty::Easy, games);
        assert_eq!(results.first_wins, 2);
        assert_eq!(results.second_wins, 1);
        assert_eq!(results.draws, 1);
        assert_eq!(results.avg_moves, 7.0);
    }

    #[test]
    fn test_hard_never_loses_to_easy() {
        let results = play_match(Difficulty::Hard, Difficulty::Easy, 6, Some(11));
        assert_eq!(results.games.len(), 6);
        assert_eq!(results.second_wins, 0);
    }

    #[test]
    fn test_seeded_match_is_reproducible() {
        let a = play_match(Difficulty::Easy, Difficulty::Easy, 4, Some(42));
        let b = play_match(Difficulty::Easy, Difficulty::Easy, 4, Some(42));
        let moves_a: Vec<_> = a.games.iter().map(|g| g.moves.clone()).collect();
        let moves_b: Vec<_> = b.games.iter().map(|g| g.moves.clone()).collect();
        assert_eq!(moves_a, moves_b);
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }
}
