//! Square grid of cell marks.
//!
//! A [`Board`] is a plain value: every mutator returns a new board and leaves
//! the receiver untouched, so search branches never share cells.

use std::fmt;
use std::str::FromStr;

use crate::constants::{MAX_SIZE, MIN_SIZE, TOKEN_EMPTY, TOKEN_FIRST, TOKEN_SECOND};
use crate::error::GameError;

/// Content of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Empty,
    First,
    Second,
}

impl Mark {
    /// The other player's mark. `Empty` has no opponent and maps to itself.
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::First => Mark::Second,
            Mark::Second => Mark::First,
            Mark::Empty => Mark::Empty,
        }
    }

    pub fn token(self) -> char {
        match self {
            Mark::First => TOKEN_FIRST,
            Mark::Second => TOKEN_SECOND,
            Mark::Empty => TOKEN_EMPTY,
        }
    }

    pub fn from_token(c: char) -> Option<Mark> {
        match c {
            TOKEN_FIRST => Some(Mark::First),
            TOKEN_SECOND => Some(Mark::Second),
            TOKEN_EMPTY => Some(Mark::Empty),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.token(), f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Mark>,
}

impl Board {
    /// Create an empty `size`x`size` board.
    pub fn new(size: usize) -> Result<Self, GameError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GameError::InvalidSize { size });
        }
        Ok(Self {
            size,
            cells: vec![Mark::Empty; size * size],
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// True when `(row, col)` lies on the board.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    fn check(&self, row: usize, col: usize) -> Result<usize, GameError> {
        if self.contains(row, col) {
            Ok(self.idx(row, col))
        } else {
            Err(GameError::OutOfRange {
                row,
                col,
                size: self.size,
            })
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<Mark, GameError> {
        self.check(row, col).map(|i| self.cells[i])
    }

    /// Place `mark` on an empty cell, returning the updated board.
    ///
    /// # Errors
    /// [`GameError::OutOfRange`] or [`GameError::CellOccupied`].
    ///
    /// # Panics
    /// If `mark` is [`Mark::Empty`]; clearing cells is not a game operation.
    pub fn set_cell(&self, row: usize, col: usize, mark: Mark) -> Result<Board, GameError> {
        assert_ne!(mark, Mark::Empty, "cannot place an empty mark");
        let i = self.check(row, col)?;
        if self.cells[i] != Mark::Empty {
            return Err(GameError::CellOccupied { row, col });
        }
        let mut next = self.clone();
        next.cells[i] = mark;
        Ok(next)
    }

    /// Swap the owner of an occupied cell.
    ///
    /// # Panics
    /// If the cell is empty or out of range. Only the transition logic flips
    /// cells, after it has verified occupancy, so either case is a bug.
    pub fn flip(&self, row: usize, col: usize) -> Board {
        let mut next = self.clone();
        next.flip_in_place(row, col);
        next
    }

    pub(crate) fn flip_in_place(&mut self, row: usize, col: usize) {
        assert!(
            self.contains(row, col),
            "attempt to flip cell ({row}, {col}) outside the board"
        );
        let i = self.idx(row, col);
        self.cells[i] = match self.cells[i] {
            Mark::Empty => panic!("attempt to flip an empty cell ({row}, {col})"),
            owner => owner.opponent(),
        };
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&c| c == mark).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Mark::Empty)
    }

    /// Parse a `size`x`size` grid of `X`/`O`/`.` tokens in row-major order.
    ///
    /// Any other character is ignored, so spacing, blank lines and surrounding
    /// noise are tolerated. Exactly `size * size` tokens must be present.
    pub fn parse(size: usize, text: &str) -> Result<Board, GameError> {
        let mut board = Board::new(size)?;
        let tokens: Vec<Mark> = text.chars().filter_map(Mark::from_token).collect();
        if tokens.len() != board.cells.len() {
            return Err(GameError::MalformedGrid {
                expected: board.cells.len(),
                found: tokens.len(),
            });
        }
        board.cells = tokens;
        Ok(board)
    }

    /// Display adapter with row and column indices, used for console output.
    pub fn labeled(&self) -> Labeled<'_> {
        Labeled(self)
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parse a grid whose size is inferred from the number of tokens.
    ///
    /// A token count that is not the square of a supported size is reported as
    /// [`GameError::MalformedGrid`] against the nearest supported board at or
    /// above it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let found = s.chars().filter(|&c| Mark::from_token(c).is_some()).count();
        let mut size = found.isqrt();
        if size * size < found {
            size += 1;
        }
        let size = size.clamp(MIN_SIZE, MAX_SIZE);
        if size * size != found {
            return Err(GameError::MalformedGrid {
                expected: size * size,
                found,
            });
        }
        Board::parse(size, s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for (col, mark) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{mark}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A board rendered with coordinates, see [`Board::labeled`].
pub struct Labeled<'a>(&'a Board);

impl fmt::Display for Labeled<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        let w = (board.size - 1).to_string().len();
        write!(f, "{:w$}", "")?;
        for col in 0..board.size {
            write!(f, " {col:>w$}")?;
        }
        writeln!(f)?;
        for (r, row) in board.cells.chunks(board.size).enumerate() {
            write!(f, "{r:>w$}")?;
            for mark in row {
                write!(f, " {mark:>w$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER_8X8: &str = "
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . X O . . .
. . . O X . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .";

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(8).unwrap();
        assert_eq!(board.size(), 8);
        assert_eq!(board.count(Mark::Empty), 64);
        assert_eq!(board.count(Mark::First), 0);
        assert!(!board.is_full());
    }

    #[test]
    fn test_invalid_size() {
        assert_eq!(Board::new(3), Err(GameError::InvalidSize { size: 3 }));
        assert_eq!(
            Board::new(MAX_SIZE + 1),
            Err(GameError::InvalidSize { size: MAX_SIZE + 1 })
        );
    }

    #[test]
    fn test_cell_out_of_range() {
        let board = Board::new(4).unwrap();
        assert_eq!(
            board.cell(4, 0),
            Err(GameError::OutOfRange {
                row: 4,
                col: 0,
                size: 4
            })
        );
        assert!(board.cell(0, 4).is_err());
        assert_eq!(board.cell(3, 3), Ok(Mark::Empty));
    }

    #[test]
    fn test_set_cell_returns_new_board() {
        let board = Board::new(4).unwrap();
        let next = board.set_cell(1, 2, Mark::First).unwrap();
        assert_eq!(next.cell(1, 2), Ok(Mark::First));
        assert_eq!(board.cell(1, 2), Ok(Mark::Empty), "receiver must not change");
        assert_eq!(next.count(Mark::Empty), 15);
    }

    #[test]
    fn test_set_cell_occupied() {
        let board = Board::new(4).unwrap().set_cell(0, 0, Mark::Second).unwrap();
        assert_eq!(
            board.set_cell(0, 0, Mark::First),
            Err(GameError::CellOccupied { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_flip_toggles_owner() {
        let board = Board::new(4).unwrap().set_cell(2, 2, Mark::First).unwrap();
        let flipped = board.flip(2, 2);
        assert_eq!(flipped.cell(2, 2), Ok(Mark::Second));
        assert_eq!(flipped.flip(2, 2), board);
    }

    #[test]
    #[should_panic(expected = "flip an empty cell")]
    fn test_flip_empty_panics() {
        Board::new(4).unwrap().flip(0, 0);
    }

    #[test]
    fn test_parse_reference_grid() {
        let board = Board::parse(8, CENTER_8X8).unwrap();
        assert_eq!(board.count(Mark::First), 2);
        assert_eq!(board.count(Mark::Second), 2);
        assert_eq!(board.cell(0, 0), Ok(Mark::Empty));
        assert_eq!(board.cell(3, 3), Ok(Mark::First));
        assert_eq!(board.cell(3, 4), Ok(Mark::Second));
        assert_eq!(board.cell(4, 3), Ok(Mark::Second));
        assert_eq!(board.cell(4, 4), Ok(Mark::First));
    }

    #[test]
    fn test_parse_wrong_token_count() {
        assert_eq!(
            Board::parse(4, "X O . ."),
            Err(GameError::MalformedGrid {
                expected: 16,
                found: 4
            })
        );
    }

    #[test]
    fn test_from_str_infers_size() {
        let board: Board = CENTER_8X8.parse().unwrap();
        assert_eq!(board.size(), 8);
    }

    #[test]
    fn test_from_str_reports_nearest_supported_grid() {
        let err = |text: &str| text.parse::<Board>().unwrap_err();
        assert_eq!(err("X O ."), GameError::MalformedGrid { expected: 16, found: 3 });
        assert_eq!(err(""), GameError::MalformedGrid { expected: 16, found: 0 });
        assert_eq!(err("...\n...\n..."), GameError::MalformedGrid { expected: 16, found: 9 });
        assert_eq!(err(&".".repeat(17)), GameError::MalformedGrid { expected: 25, found: 17 });
        let too_big = ".".repeat((MAX_SIZE + 1) * (MAX_SIZE + 1));
        assert_eq!(
            err(&too_big),
            GameError::MalformedGrid {
                expected: MAX_SIZE * MAX_SIZE,
                found: too_big.len()
            }
        );
    }

    #[test]
    #[should_panic(expected = "cannot place an empty mark")]
    fn test_set_cell_empty_panics() {
        let _ = Board::new(4).unwrap().set_cell(0, 0, Mark::Empty);
    }

    #[test]
    fn test_render_then_parse() {
        let board = Board::parse(8, CENTER_8X8).unwrap();
        let text = board.to_string();
        assert_eq!(text.lines().count(), 8);
        assert_eq!(text.lines().nth(3), Some(". . . X O . . ."));
        assert_eq!(Board::parse(8, &text), Ok(board));
    }

    #[test]
    fn test_labeled_has_headers() {
        let board = Board::new(4).unwrap();
        let text = board.labeled().to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("  0 1 2 3"));
        assert_eq!(lines.next(), Some("0 . . . ."));
    }
}
