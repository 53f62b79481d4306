//! Board state and move generation

use crate::board::{all_positions, Move, CELL_COUNT, LINES};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors from checked board operations and parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("position ({row}, {col}) is off the board")]
    OutOfBounds { row: u8, col: u8 },

    #[error("cell ({row}, {col}) is already taken")]
    Occupied { row: u8, col: u8 },

    #[error("invalid cell character: {0:?}")]
    InvalidCell(char),

    #[error("expected 9 cells, found {0}")]
    WrongCellCount(usize),

    #[error("unknown difficulty: {0} (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("unknown mark: {0} (expected x or o)")]
    UnknownMark(String),
}

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player mark
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Mark {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Mark::X),
            "o" => Ok(Mark::O),
            _ => Err(GameError::UnknownMark(s.to_string())),
        }
    }
}

/// Contents of one cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Mark),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::Taken(mark) => mark.symbol(),
        }
    }

    fn from_symbol(c: char) -> Result<Self, GameError> {
        match c {
            'X' | 'x' => Ok(Cell::Taken(Mark::X)),
            'O' | 'o' => Ok(Cell::Taken(Mark::O)),
            '_' | '.' | '-' => Ok(Cell::Empty),
            other => Err(GameError::InvalidCell(other)),
        }
    }
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Won(Mark),
    Draw,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::Ongoing
    }

    pub fn winner(self) -> Option<Mark> {
        match self {
            GameResult::Won(mark) => Some(mark),
            _ => None,
        }
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Board state (copy to explore)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a row-major grid
    pub fn from_rows(rows: [[Cell; 3]; 3]) -> Self {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                cells[r * 3 + c] = *cell;
            }
        }
        Self { cells }
    }

    /// Grid view, one array per row
    pub fn rows(&self) -> [[Cell; 3]; 3] {
        let c = &self.cells;
        [[c[0], c[1], c[2]], [c[3], c[4], c[5]], [c[6], c[7], c[8]]]
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Cell at a position; off-board positions read as empty
    pub fn get(&self, mv: Move) -> Cell {
        if mv.is_valid() {
            self.cells[mv.index()]
        } else {
            Cell::Empty
        }
    }

    /// Number of cells holding `mark`
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Taken(mark))
            .count()
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Side to move under alternating play with X first
    pub fn to_move(&self) -> Mark {
        if self.count(Mark::X) > self.count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        }
    }

    // ========================================================================
    // TERMINAL QUERIES
    // ========================================================================

    /// True if any row, column or diagonal is entirely `mark`
    pub fn is_win(&self, mark: Mark) -> bool {
        let cell = Cell::Taken(mark);
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == cell))
    }

    /// True if no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Win for either mark, or full
    pub fn is_terminal(&self) -> bool {
        self.is_win(Mark::X) || self.is_win(Mark::O) || self.is_full()
    }

    /// Classify the position. X is checked first; boards with both marks
    /// winning cannot arise from legal play.
    pub fn result(&self) -> GameResult {
        if self.is_win(Mark::X) {
            GameResult::Won(Mark::X)
        } else if self.is_win(Mark::O) {
            GameResult::Won(Mark::O)
        } else if self.is_full() {
            GameResult::Draw
        } else {
            GameResult::Ongoing
        }
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Every empty cell, row-major ascending. Empty on a full board.
    pub fn legal_moves(&self) -> Vec<Move> {
        all_positions()
            .filter(|mv| self.cells[mv.index()].is_empty())
            .collect()
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        mv.is_valid() && self.cells[mv.index()].is_empty()
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Place `mark`, rejecting off-board and occupied cells
    pub fn place(&mut self, mv: Move, mark: Mark) -> Result<(), GameError> {
        if !mv.is_valid() {
            return Err(GameError::OutOfBounds {
                row: mv.row,
                col: mv.col,
            });
        }
        if !self.cells[mv.index()].is_empty() {
            return Err(GameError::Occupied {
                row: mv.row,
                col: mv.col,
            });
        }
        self.cells[mv.index()] = Cell::Taken(mark);
        Ok(())
    }

    /// Child board with `mark` at `mv`; the receiver is left untouched.
    /// `mv` must be a legal move.
    pub fn with_move(&self, mv: Move, mark: Mark) -> Board {
        debug_assert!(self.is_legal(mv), "illegal move {mv}");
        let mut child = *self;
        child.cells[mv.index()] = Cell::Taken(mark);
        child
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows().iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{} | {} | {}",
                row[0].symbol(),
                row[1].symbol(),
                row[2].symbol()
            )?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parse 9 cells (`X`, `O`, `_`/`.`/`-`), ignoring whitespace, `/` and `|`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .collect();
        if symbols.len() != CELL_COUNT {
            return Err(GameError::WrongCellCount(symbols.len()));
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (cell, symbol) in cells.iter_mut().zip(symbols) {
            *cell = Cell::from_symbol(symbol)?;
        }
        Ok(Self { cells })
    }
}
