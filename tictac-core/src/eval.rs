//! Position scoring

use crate::difficulty::DepthBound;
use crate::game::{Board, Mark};
use serde::{Deserialize, Serialize};

/// Exact game-theoretic score from the maximizing side's view
pub type Score = i8;

pub const WIN: Score = 1;
pub const DRAW: Score = 0;
pub const LOSS: Score = -1;

/// Score a node without searching below it, or `None` if it must be expanded.
///
/// Check order: own win, opponent win, full board, depth cutoff. A cutoff
/// is scored as a draw; there is no static evaluation of open positions.
pub fn static_score(board: &Board, mark: Mark, depth: u32, bound: DepthBound) -> Option<Score> {
    if board.is_win(mark) {
        Some(WIN)
    } else if board.is_win(mark.opponent()) {
        Some(LOSS)
    } else if board.is_full() {
        Some(DRAW)
    } else if bound.reached(depth) {
        Some(DRAW)
    } else {
        None
    }
}

/// Score of a line of play together with how many plies below the scored
/// node it was decided
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub score: Score,
    pub plies: u32,
}

impl Outcome {
    pub fn leaf(score: Score) -> Self {
        Self { score, plies: 0 }
    }

    /// The same outcome seen from one ply higher
    pub fn deferred(self) -> Self {
        Self {
            score: self.score,
            plies: self.plies + 1,
        }
    }

    /// Ordering key for the maximizing side: score first, then sooner wins
    /// and later losses. Draw lines carry no distance preference.
    pub fn key(&self) -> (Score, i64) {
        let plies = i64::from(self.plies);
        let distance = match self.score.signum() {
            1 => -plies,
            -1 => plies,
            _ => 0,
        };
        (self.score, distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_score_order() {
        let won: Board = "OOO/XX_/X__".parse().unwrap();
        assert_eq!(static_score(&won, Mark::O, 3, DepthBound::Unbounded), Some(WIN));
        assert_eq!(static_score(&won, Mark::X, 3, DepthBound::Unbounded), Some(LOSS));

        let open: Board = "X__/_O_/___".parse().unwrap();
        assert_eq!(static_score(&open, Mark::O, 0, DepthBound::Unbounded), None);
        assert_eq!(static_score(&open, Mark::O, 0, DepthBound::Bounded(0)), Some(DRAW));
        assert_eq!(static_score(&open, Mark::O, 1, DepthBound::Bounded(2)), None);
    }

    #[test]
    fn test_terminal_beats_cutoff() {
        let won: Board = "XXX/OO_/___".parse().unwrap();
        assert_eq!(static_score(&won, Mark::O, 0, DepthBound::Bounded(0)), Some(LOSS));
    }

    #[test]
    fn test_outcome_key_prefers_fast_wins() {
        let fast = Outcome::leaf(WIN);
        let slow = fast.deferred().deferred();
        assert!(fast.key() > slow.key());

        let quick_loss = Outcome::leaf(LOSS);
        let slow_loss = quick_loss.deferred();
        assert!(slow_loss.key() > quick_loss.key());

        assert_eq!(Outcome::leaf(DRAW).key(), Outcome::leaf(DRAW).deferred().key());
        assert!(slow.key() > Outcome::leaf(DRAW).key());
    }
}
