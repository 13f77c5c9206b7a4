//! Game state: move generation, transitions, and end-of-game scoring.
//!
//! This module provides the rules of the game on top of [`Board`]:
//! - Legal move enumeration by scanning the eight directions for capture runs
//! - The transition function, which places a mark and flips every captured run
//! - Passing when the mover is stuck but the opponent is not
//! - Terminal detection and utility
//!
//! A [`State`] is never modified after construction. [`State::result`] and
//! [`State::pass`] build fresh values, which lets the search explore sibling
//! branches from the same ancestor without any sharing.

use std::fmt;

use crate::board::{Board, Mark};
use crate::direction::{DIRECTIONS, Direction};
use crate::error::GameError;

/// A placement of `mark` at `(row, col)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Action {
    pub mark: Mark,
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub fn new(mark: Mark, row: usize, col: usize) -> Self {
        Self { mark, row, col }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at ({}, {})", self.mark, self.row, self.col)
    }
}

/// A snapshot of the game between two turns.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct State {
    board: Board,
    /// Player whose turn it is, never `Empty`
    to_move: Mark,
    /// Number of placements since the initial state
    ply: usize,
}

impl State {
    /// Standard opening on a `size`x`size` board with a random first mover.
    ///
    /// The four central cells hold two marks per player on the diagonals.
    pub fn initial(size: usize, rng: &mut fastrand::Rng) -> Result<Self, GameError> {
        let to_move = if rng.bool() { Mark::First } else { Mark::Second };
        Self::initial_with(size, to_move)
    }

    /// Standard opening with a fixed first mover.
    ///
    /// # Errors
    /// [`GameError::InvalidSize`] for odd sizes, which have no 2x2 center, and
    /// for sizes the board does not support.
    pub fn initial_with(size: usize, to_move: Mark) -> Result<Self, GameError> {
        if size % 2 != 0 {
            return Err(GameError::InvalidSize { size });
        }
        let mid = size / 2;
        let board = Board::new(size)?
            .set_cell(mid - 1, mid - 1, Mark::First)?
            .set_cell(mid - 1, mid, Mark::Second)?
            .set_cell(mid, mid - 1, Mark::Second)?
            .set_cell(mid, mid, Mark::First)?;
        Ok(Self::from_board(board, to_move))
    }

    /// Wrap an arbitrary board, e.g. a parsed fixture. The move counter starts at 0.
    ///
    /// # Panics
    /// If `to_move` is [`Mark::Empty`].
    pub fn from_board(board: Board, to_move: Mark) -> Self {
        assert_ne!(to_move, Mark::Empty, "the player to move must be First or Second");
        Self {
            board,
            to_move,
            ply: 0,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    #[inline]
    pub fn opponent(&self) -> Mark {
        self.to_move.opponent()
    }

    #[inline]
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Opponent cells bracketed by `mark` when walking from `(row, col)` along `dir`.
    ///
    /// Empty unless the walk crosses at least one opponent cell and stops on
    /// `mark` before leaving the board or reaching an empty cell.
    fn capture_run(
        &self,
        mark: Mark,
        row: usize,
        col: usize,
        dir: Direction,
    ) -> Vec<(usize, usize)> {
        let opp = mark.opponent();
        let mut run = Vec::new();
        let mut at = dir.next(row, col);
        while let Some((r, c)) = at {
            match self.board.cell(r, c) {
                Ok(m) if m == opp => run.push((r, c)),
                Ok(m) if m == mark => return run,
                // Empty cell or off the board
                _ => break,
            }
            at = dir.next(r, c);
        }
        Vec::new()
    }

    fn captures_for(&self, mark: Mark, row: usize, col: usize) -> Vec<(usize, usize)> {
        if self.board.cell(row, col) != Ok(Mark::Empty) {
            return Vec::new();
        }
        DIRECTIONS
            .iter()
            .flat_map(|&dir| self.capture_run(mark, row, col, dir))
            .collect()
    }

    /// Cells a placement by the player to move at `(row, col)` would flip.
    ///
    /// Empty when the cell is occupied, off the board, or captures nothing.
    pub fn captures(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        self.captures_for(self.to_move, row, col)
    }

    fn is_legal_for(&self, mark: Mark, row: usize, col: usize) -> bool {
        self.board.cell(row, col) == Ok(Mark::Empty)
            && DIRECTIONS
                .iter()
                .any(|&dir| !self.capture_run(mark, row, col, dir).is_empty())
    }

    fn actions_for(&self, mark: Mark) -> Vec<Action> {
        let n = self.board.size();
        let mut acts = Vec::new();
        for row in 0..n {
            for col in 0..n {
                if self.is_legal_for(mark, row, col) {
                    acts.push(Action::new(mark, row, col));
                }
            }
        }
        acts
    }

    fn has_action(&self, mark: Mark) -> bool {
        let n = self.board.size();
        (0..n).any(|row| (0..n).any(|col| self.is_legal_for(mark, row, col)))
    }

    /// All legal placements for the player to move, in row-major order.
    pub fn actions(&self) -> Vec<Action> {
        self.actions_for(self.to_move)
    }

    /// Apply `action` and return the successor state.
    ///
    /// The placed mark flips every captured run in all eight directions, the turn
    /// passes to the opponent and the move counter grows by one.
    ///
    /// # Errors
    /// - [`GameError::WrongTurn`] if the action is not for the player to move
    /// - [`GameError::OutOfRange`] / [`GameError::CellOccupied`] from the board
    /// - [`GameError::NoCapture`] if no opponent mark would be flipped
    pub fn result(&self, action: &Action) -> Result<State, GameError> {
        if action.mark != self.to_move {
            return Err(GameError::WrongTurn { mark: action.mark });
        }
        let Action { mark, row, col } = *action;
        let mut board = self.board.set_cell(row, col, mark)?;

        let captured = self.captures_for(mark, row, col);
        if captured.is_empty() {
            return Err(GameError::NoCapture { row, col });
        }
        for (r, c) in captured {
            board.flip_in_place(r, c);
        }

        Ok(State {
            board,
            to_move: self.opponent(),
            ply: self.ply + 1,
        })
    }

    /// Hand the turn to the opponent without placing a mark.
    ///
    /// Only allowed when the player to move has no legal action and the game is
    /// not over. The move counter is unchanged.
    pub fn pass(&self) -> Result<State, GameError> {
        if self.has_action(self.to_move) || self.terminal() {
            return Err(GameError::MustPlay);
        }
        Ok(State {
            board: self.board.clone(),
            to_move: self.opponent(),
            ply: self.ply,
        })
    }

    /// The game is over when the board is full or neither player can move.
    pub fn terminal(&self) -> bool {
        self.board.is_full()
            || (!self.has_action(self.to_move) && !self.has_action(self.opponent()))
    }

    /// Final score for `mark`: the number of cells it owns.
    ///
    /// Empty cells left at the end are not awarded to anyone.
    ///
    /// # Panics
    /// If the state is not terminal.
    pub fn utility(&self, mark: Mark) -> usize {
        if !self.terminal() {
            panic!("{}", GameError::NotTerminal);
        }
        self.board.count(mark)
    }

    /// Current mark counts as `(first, second)`.
    pub fn scores(&self) -> (usize, usize) {
        (self.board.count(Mark::First), self.board.count(Mark::Second))
    }

    /// The player owning more cells, or `None` on a tie.
    pub fn winner(&self) -> Option<Mark> {
        let (first, second) = self.scores();
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => Some(Mark::First),
            std::cmp::Ordering::Less => Some(Mark::Second),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board.labeled())?;
        writeln!(f, "next player: {}", self.to_move)?;
        writeln!(f, "ply: {}", self.ply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(grid: &str, to_move: Mark) -> State {
        State::from_board(grid.parse().unwrap(), to_move)
    }

    #[test]
    fn test_initial_state() {
        let s = State::initial_with(4, Mark::First).unwrap();
        assert_eq!(s.ply(), 0);
        assert_eq!(s.to_move(), Mark::First);
        assert_eq!(s.board().cell(1, 1), Ok(Mark::First));
        assert_eq!(s.board().cell(1, 2), Ok(Mark::Second));
        assert_eq!(s.board().cell(2, 1), Ok(Mark::Second));
        assert_eq!(s.board().cell(2, 2), Ok(Mark::First));
        assert_eq!(s.board().count(Mark::Empty), 12);
    }

    #[test]
    fn test_initial_rejects_odd_sizes() {
        assert_eq!(
            State::initial_with(5, Mark::First),
            Err(GameError::InvalidSize { size: 5 })
        );
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(
            State::initial(7, &mut rng),
            Err(GameError::InvalidSize { size: 7 })
        );
        assert!(State::initial_with(6, Mark::First).is_ok());
        assert_eq!(
            State::initial_with(2, Mark::First),
            Err(GameError::InvalidSize { size: 2 })
        );
    }

    #[test]
    fn test_initial_random_mover_is_seeded() {
        let a = State::initial(8, &mut fastrand::Rng::with_seed(7)).unwrap();
        let b = State::initial(8, &mut fastrand::Rng::with_seed(7)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.to_move(), Mark::Empty);
    }

    #[test]
    fn test_actions_bracket_interior_marks() {
        let s = state("....\n..XO\n..OX\n....", Mark::First);
        let acts: Vec<_> = s.actions().iter().map(|a| (a.row, a.col)).collect();
        assert_eq!(acts, vec![(0, 3), (2, 1), (3, 2)]);
    }

    #[test]
    fn test_result_flips_single_mark() {
        let s = state("....\n..XO\n..OX\n....", Mark::First);
        let first = s.actions()[0];
        let next = s.result(&first).unwrap();
        assert_eq!(next.board().cell(0, 3), Ok(Mark::First));
        assert_eq!(next.board().cell(1, 3), Ok(Mark::First));
        assert_eq!(next.board().count(Mark::Second), 1);
        assert_eq!(next.to_move(), Mark::Second);
        assert_eq!(next.ply(), 1);
    }

    #[test]
    fn test_result_flips_multiple_directions() {
        // Placing X at (0,0) captures along the row, the column and the diagonal
        let s = state(".OOX\nOO..\nO.O.\nX..X", Mark::First);
        let next = s.result(&Action::new(Mark::First, 0, 0)).unwrap();
        assert_eq!(next.board().to_string(), "X X X X\nX X . .\nX . X .\nX . . X\n");
        assert_eq!(next.board().count(Mark::Second), 0);
    }

    #[test]
    fn test_run_stopped_by_edge_is_not_captured() {
        // O run reaches the board edge without an X behind it
        let s = state("..OO\n....\n....\n....", Mark::First);
        assert!(s.actions().is_empty());
        assert_eq!(
            s.result(&Action::new(Mark::First, 0, 1)),
            Err(GameError::NoCapture { row: 0, col: 1 })
        );
    }

    #[test]
    fn test_wrong_turn() {
        let s = State::initial_with(4, Mark::First).unwrap();
        assert_eq!(
            s.result(&Action::new(Mark::Second, 0, 1)),
            Err(GameError::WrongTurn { mark: Mark::Second })
        );
    }

    #[test]
    fn test_occupied_and_out_of_range() {
        let s = State::initial_with(4, Mark::First).unwrap();
        assert_eq!(
            s.result(&Action::new(Mark::First, 1, 1)),
            Err(GameError::CellOccupied { row: 1, col: 1 })
        );
        assert!(matches!(
            s.result(&Action::new(Mark::First, 4, 0)),
            Err(GameError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_pass_when_stuck() {
        // X cannot bracket the corner O, but O can capture X from (0,2)
        let s = state("OX..\n....\n....\n....", Mark::First);
        assert!(s.actions().is_empty());
        assert!(!s.terminal());
        let passed = s.pass().unwrap();
        assert_eq!(passed.to_move(), Mark::Second);
        assert_eq!(passed.ply(), s.ply());
        assert_eq!(passed.board(), s.board());
        assert_eq!(passed.actions(), vec![Action::new(Mark::Second, 0, 2)]);
    }

    #[test]
    fn test_pass_refused_with_moves() {
        let s = State::initial_with(4, Mark::Second).unwrap();
        assert_eq!(s.pass(), Err(GameError::MustPlay));
    }

    #[test]
    fn test_terminal_when_nobody_can_move() {
        let s = state("X...\n....\n....\n....", Mark::Second);
        assert!(s.terminal());
        assert_eq!(s.utility(Mark::First), 1);
        assert_eq!(s.utility(Mark::Second), 0);
        assert_eq!(s.pass(), Err(GameError::MustPlay));
    }

    #[test]
    fn test_terminal_when_full() {
        let s = state("XXXX\nXOOX\nXOOX\nXXXX", Mark::First);
        assert!(s.terminal());
        assert_eq!(s.scores(), (12, 4));
        assert_eq!(s.winner(), Some(Mark::First));
    }

    #[test]
    #[should_panic(expected = "not terminal")]
    fn test_utility_on_open_game_panics() {
        State::initial_with(4, Mark::First).unwrap().utility(Mark::First);
    }

    #[test]
    fn test_display() {
        let s = State::initial_with(4, Mark::Second).unwrap();
        let text = s.to_string();
        assert!(text.contains("next player: O"));
        assert!(text.ends_with("ply: 0\n"));
    }
}
