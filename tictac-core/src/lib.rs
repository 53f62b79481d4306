//! tictac core - game engine and AI
//!
//! This crate provides the core logic for 3x3 tic-tac-toe:
//! - Board geometry (row/column coordinates, winning lines)
//! - Board state, terminal detection and move generation
//! - Exact scoring of decided positions
//! - Plain minimax search and move selection
//! - Difficulty levels mapped to search depth

pub mod board;
pub mod game;
pub mod eval;
pub mod ai;
pub mod difficulty;
pub mod config;

// Re-exports for convenient access
pub use board::{Move, BOARD_SIZE, CELL_COUNT, LINES};
pub use game::{Board, Cell, GameError, GameResult, Mark};
pub use eval::{Score, DRAW, LOSS, WIN};
pub use ai::{evaluate, find_best_move, play_game, random_move, select_best, ComputerPlayer, Minimax, SearchResult};
pub use difficulty::{DepthBound, Difficulty, Strategy};
pub use config::EngineConfig;
