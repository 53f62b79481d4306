//! Play command - interactive game against the computer
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: resolve_config(), play_session()
//! - Level 3: human_turn(), computer_turn(), announce()
//! - Level 4: input parsing, board printing

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use tictac_core::{Board, ComputerPlayer, Difficulty, EngineConfig, GameResult, Mark, Move};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Computer strength: easy, medium or hard
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Mark you play (X moves first)
    #[arg(long)]
    pub human: Option<Mark>,

    /// JSON engine config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Starting position, e.g. "X__/_O_/___"
    #[arg(long)]
    pub board: Option<Board>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = resolve_config(&args, seed)?;

    tracing::info!(
        "Starting game: human={}, difficulty={}",
        config.human,
        config.difficulty
    );

    let mut computer = config.computer();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = play_session(
        args.board.unwrap_or_default(),
        config.human,
        &mut computer,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;

    tracing::info!("Game over: {:?}", result);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Config file first, then command-line overrides
fn resolve_config(args: &PlayArgs, seed: Option<u64>) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(human) = args.human {
        config.human = human;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

/// Alternate human and computer turns until the game ends
fn play_session<R: BufRead, W: Write>(
    initial: Board,
    human: Mark,
    computer: &mut ComputerPlayer,
    input: &mut R,
    out: &mut W,
) -> Result<GameResult> {
    let mut board = initial;

    writeln!(out, "Welcome to Tic Tac Toe!")?;
    print_board(&board, out)?;

    while !board.is_terminal() {
        if board.to_move() == human {
            human_turn(&mut board, human, input, out)?;
        } else {
            computer_turn(&mut board, computer, out)?;
        }
    }

    let result = board.result();
    announce(result, human, out)?;
    Ok(result)
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Prompt until the human enters a legal move, then apply it
fn human_turn<R: BufRead, W: Write>(
    board: &mut Board,
    human: Mark,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    loop {
        let row = prompt(input, out, "Enter row (0, 1, or 2): ")?;
        let col = prompt(input, out, "Enter column (0, 1, or 2): ")?;

        let placed = match (parse_coord(&row), parse_coord(&col)) {
            (Some(r), Some(c)) => board.place(Move::new(r, c), human),
            _ => {
                writeln!(out, "Invalid move. Try again.")?;
                continue;
            }
        };

        match placed {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::debug!("rejected move: {}", e);
                writeln!(out, "Invalid move. Try again.")?;
            }
        }
    }
}

fn computer_turn<W: Write>(board: &mut Board, computer: &mut ComputerPlayer, out: &mut W) -> Result<()> {
    writeln!(out, "AI is making a move...")?;
    let Some(mv) = computer.choose_move(board) else {
        bail!("computer found no legal move");
    };
    board
        .place(mv, computer.mark)
        .context("computer chose an illegal move")?;
    print_board(board, out)?;
    Ok(())
}

fn announce<W: Write>(result: GameResult, human: Mark, out: &mut W) -> Result<()> {
    match result {
        GameResult::Won(mark) if mark == human => writeln!(out, "Player {} wins!", mark)?,
        GameResult::Won(_) => writeln!(out, "AI wins!")?,
        GameResult::Draw => writeln!(out, "It's a draw!")?,
        GameResult::Ongoing => {}
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<String> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed before the game ended");
    }
    Ok(line.trim().to_string())
}

/// A row or column number in 0..=2
fn parse_coord(s: &str) -> Option<u8> {
    s.parse::<u8>().ok().filter(|&v| v < tictac_core::BOARD_SIZE)
}

fn print_board<W: Write>(board: &Board, out: &mut W) -> Result<()> {
    for line in board.to_string().lines() {
        writeln!(out, "{}", line)?;
        writeln!(out, "{}", "-".repeat(9))?;
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(board: &str, human: Mark, script: &str) -> (Result<GameResult>, String) {
        let mut computer = ComputerPlayer::with_seed(human.opponent(), Difficulty::Hard, 3);
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = play_session(
            board.parse().unwrap(),
            human,
            &mut computer,
            &mut input,
            &mut out,
        );
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_rejects_bad_input_then_wins() {
        // off-board, non-numeric, occupied, then the winning move
        let (result, out) = run_script("XX_/OO_/___", Mark::X, "9\n0\nabc\n0\n0\n0\n0\n2\n");
        assert_eq!(result.unwrap(), GameResult::Won(Mark::X));
        assert_eq!(out.matches("Invalid move. Try again.").count(), 3);
        assert!(out.contains("Player X wins!"));
    }

    #[test]
    fn test_computer_wins() {
        let (result, out) = run_script("OO_/XX_/X__", Mark::X, "");
        assert_eq!(result.unwrap(), GameResult::Won(Mark::O));
        assert!(out.contains("AI is making a move..."));
        assert!(out.contains("AI wins!"));
    }

    #[test]
    fn test_draw() {
        let (result, out) = run_script("XOX/XOO/OX_", Mark::X, "2\n2\n");
        assert_eq!(result.unwrap(), GameResult::Draw);
        assert!(out.contains("It's a draw!"));
    }

    #[test]
    fn test_closed_input_is_error() {
        let (result, _) = run_script("___/___/___", Mark::X, "1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("0"), Some(0));
        assert_eq!(parse_coord("2"), Some(2));
        assert_eq!(parse_coord("3"), None);
        assert_eq!(parse_coord("-1"), None);
        assert_eq!(parse_coord(""), None);
    }

    #[test]
    fn test_resolve_config_overrides() {
        let args = PlayArgs {
            difficulty: Some(Difficulty::Easy),
            human: Some(Mark::O),
            config: None,
            board: None,
        };
        let config = resolve_config(&args, Some(5)).unwrap();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.human, Mark::O);
        assert_eq!(config.seed, Some(5));
    }
}
