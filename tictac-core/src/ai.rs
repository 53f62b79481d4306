//! Minimax search and move selection

use crate::board::Move;
use crate::difficulty::{DepthBound, Difficulty, Strategy};
use crate::eval::{static_score, Outcome, Score, DRAW};
use crate::game::{Board, Mark};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// SEARCH RESULTS
// ============================================================================

/// A root move with its minimax score
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub mv: Move,
    pub score: Score,
    /// Plies from the root until the principal line is decided
    pub plies: u32,
}

impl SearchResult {
    fn outcome(&self) -> Outcome {
        Outcome {
            score: self.score,
            plies: self.plies,
        }
    }
}

// ============================================================================
// MINIMAX
// ============================================================================

/// Plain minimax searcher for one maximizing mark and depth bound.
///
/// Children are explored as copies, so the board handed in is never
/// modified.
#[derive(Clone, Debug)]
pub struct Minimax {
    mark: Mark,
    bound: DepthBound,
    nodes: u64,
}

impl Minimax {
    pub fn new(mark: Mark, bound: DepthBound) -> Self {
        Self {
            mark,
            bound,
            nodes: 0,
        }
    }

    /// Nodes visited since construction
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Score `board` with `depth` plies already searched
    pub fn evaluate(&mut self, board: &Board, depth: u32, maximizing: bool) -> Score {
        self.search(board, depth, maximizing).score
    }

    /// Evaluate every legal move for the maximizing mark, in move order
    pub fn root_results(&mut self, board: &Board) -> Vec<SearchResult> {
        board
            .legal_moves()
            .into_iter()
            .map(|mv| {
                let child = board.with_move(mv, self.mark);
                let outcome = self.search(&child, 0, false).deferred();
                SearchResult {
                    mv,
                    score: outcome.score,
                    plies: outcome.plies,
                }
            })
            .collect()
    }

    /// Best root move, or `None` on a full board
    pub fn best(&mut self, board: &Board) -> Option<SearchResult> {
        let best = select_best(&self.root_results(board));
        tracing::debug!(
            mark = %self.mark,
            bound = %self.bound,
            nodes = self.nodes,
            "minimax picked {:?}",
            best.map(|r| r.mv)
        );
        best
    }

    fn search(&mut self, board: &Board, depth: u32, maximizing: bool) -> Outcome {
        self.nodes += 1;

        if let Some(score) = static_score(board, self.mark, depth, self.bound) {
            return Outcome::leaf(score);
        }

        let side = if maximizing {
            self.mark
        } else {
            self.mark.opponent()
        };

        let mut best: Option<Outcome> = None;
        for mv in board.legal_moves() {
            let child = board.with_move(mv, side);
            let outcome = self.search(&child, depth + 1, !maximizing).deferred();

            // Strict comparison keeps the first move seen on ties
            let improves = match best {
                None => true,
                Some(current) if maximizing => outcome.key() > current.key(),
                Some(current) => outcome.key() < current.key(),
            };
            if improves {
                best = Some(outcome);
            }
        }

        // static_score already handled full boards
        best.unwrap_or(Outcome::leaf(DRAW))
    }
}

/// Strictly greatest result; earlier moves win ties
pub fn select_best(results: &[SearchResult]) -> Option<SearchResult> {
    let mut best: Option<SearchResult> = None;
    for result in results {
        match best {
            Some(current) if result.outcome().key() <= current.outcome().key() => {}
            _ => best = Some(*result),
        }
    }
    best
}

/// Minimax score of `board` for `mark`
pub fn evaluate(board: &Board, mark: Mark, depth: u32, bound: DepthBound, maximizing: bool) -> Score {
    Minimax::new(mark, bound).evaluate(board, depth, maximizing)
}

/// Best move for `mark`, or `None` on a full board
pub fn find_best_move(board: &Board, mark: Mark, bound: DepthBound) -> Option<Move> {
    Minimax::new(mark, bound).best(board).map(|result| result.mv)
}

/// Uniformly random legal move
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Move> {
    board.legal_moves().choose(rng).copied()
}

// ============================================================================
// COMPUTER PLAYER
// ============================================================================

/// Computer opponent for one mark
pub struct ComputerPlayer {
    pub mark: Mark,
    pub difficulty: Difficulty,
    rng: ChaCha8Rng,
}

impl ComputerPlayer {
    pub fn new(mark: Mark, difficulty: Difficulty) -> Self {
        Self {
            mark,
            difficulty,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(mark: Mark, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            mark,
            difficulty,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick a move for the current position
    pub fn choose_move(&mut self, board: &Board) -> Option<Move> {
        match self.difficulty.strategy() {
            Strategy::Random => random_move(board, &mut self.rng),
            Strategy::Search(bound) => find_best_move(board, self.mark, bound),
        }
    }
}

/// Play out a game between two computer players from `initial`, with the
/// side to move inferred from mark counts
pub fn play_game(
    x: &mut ComputerPlayer,
    o: &mut ComputerPlayer,
    initial: Board,
) -> (Board, Vec<Move>) {
    debug_assert!(x.mark == Mark::X && o.mark == Mark::O);

    let mut board = initial;
    let mut history = Vec::new();

    while !board.is_terminal() {
        let player = match board.to_move() {
            Mark::X => &mut *x,
            Mark::O => &mut *o,
        };
        let Some(mv) = player.choose_move(&board) else {
            break;
        };
        board = board.with_move(mv, player.mark);
        history.push(mv);
    }

    (board, history)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{LOSS, WIN};
    use crate::game::GameResult;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        let b = board("XX_/OO_/___");
        assert_eq!(
            find_best_move(&b, Mark::O, DepthBound::Unbounded),
            Some(Move::new(1, 2))
        );
    }

    #[test]
    fn test_blocks_threat() {
        // X threatens the top row; O has no win of its own
        let b = board("XX_/_O_/___");
        assert_eq!(
            find_best_move(&b, Mark::O, DepthBound::Unbounded),
            Some(Move::new(0, 2))
        );
        assert_eq!(
            find_best_move(&b, Mark::O, DepthBound::Bounded(2)),
            Some(Move::new(0, 2))
        );
    }

    #[test]
    fn test_full_board_has_no_move() {
        let b = board("OXO/XXO/OOX");
        assert_eq!(find_best_move(&b, Mark::O, DepthBound::Unbounded), None);
        assert!(Minimax::new(Mark::O, DepthBound::Unbounded)
            .root_results(&b)
            .is_empty());
    }

    #[test]
    fn test_evaluate_terminal_boards() {
        let o_wins = board("OOO/XX_/X__");
        assert_eq!(evaluate(&o_wins, Mark::O, 0, DepthBound::Unbounded, true), WIN);
        assert_eq!(evaluate(&o_wins, Mark::X, 0, DepthBound::Unbounded, true), LOSS);
        let draw = board("OXO/XXO/OOX");
        assert_eq!(evaluate(&draw, Mark::O, 0, DepthBound::Unbounded, false), DRAW);
    }

    #[test]
    fn test_zero_bound_cuts_off() {
        // X to move and win: unbounded sees the loss, bound 0 does not
        let b = board("XX_/OO_/___");
        assert_eq!(evaluate(&b, Mark::O, 0, DepthBound::Bounded(0), false), DRAW);
        assert_eq!(evaluate(&b, Mark::O, 0, DepthBound::Unbounded, false), LOSS);
    }

    #[test]
    fn test_empty_board_is_draw() {
        let b = Board::new();
        assert_eq!(evaluate(&b, Mark::O, 0, DepthBound::Unbounded, true), DRAW);
    }

    #[test]
    fn test_board_untouched() {
        let b = board("X__/_O_/__X");
        let before = b;
        let mut search = Minimax::new(Mark::O, DepthBound::Unbounded);
        search.evaluate(&b, 0, true);
        search.best(&b);
        assert_eq!(b, before);
        assert!(search.nodes() > 0);
    }

    #[test]
    fn test_ties_go_to_first_move() {
        // Every reply draws from the empty board
        let results = Minimax::new(Mark::X, DepthBound::Unbounded).root_results(&Board::new());
        assert!(results.iter().all(|r| r.score == DRAW));
        assert_eq!(select_best(&results).map(|r| r.mv), Some(Move::new(0, 0)));
    }

    #[test]
    fn test_random_move_is_legal_and_seeded() {
        let b = board("XO_/_X_/O__");
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut c = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let mv = random_move(&b, &mut a).unwrap();
            assert!(b.is_legal(mv));
            assert_eq!(Some(mv), random_move(&b, &mut c));
        }
        assert_eq!(random_move(&board("OXO/XXO/OOX"), &mut a), None);
    }

    #[test]
    fn test_hard_self_play_draws() {
        let mut x = ComputerPlayer::with_seed(Mark::X, Difficulty::Hard, 1);
        let mut o = ComputerPlayer::with_seed(Mark::O, Difficulty::Hard, 2);
        let (final_board, history) = play_game(&mut x, &mut o, Board::new());
        assert_eq!(final_board.result(), GameResult::Draw);
        assert_eq!(history.len(), 9);
    }
}
