//! Recoverable errors raised by the board and the game state machine.
//!
//! Every operation that returns a [`GameError`] leaves its receiver untouched,
//! so callers can simply retry with a different action.

use thiserror::Error;

use crate::board::Mark;

/// Why a board or state operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Coordinates fall outside `[0, size)`.
    #[error("cell ({row}, {col}) out of range for a {size}x{size} board")]
    OutOfRange { row: usize, col: usize, size: usize },

    /// The target cell already holds a mark.
    #[error("cell ({row}, {col}) is occupied")]
    CellOccupied { row: usize, col: usize },

    /// The action was issued for the player not in turn.
    #[error("not {mark}'s turn")]
    WrongTurn { mark: Mark },

    /// The placement does not bracket any opponent mark.
    #[error("placing at ({row}, {col}) captures nothing")]
    NoCapture { row: usize, col: usize },

    /// Utility was requested before the game ended.
    #[error("state is not terminal")]
    NotTerminal,

    /// Parsed text did not contain exactly N² cell tokens.
    #[error("malformed grid: expected {expected} cells, found {found}")]
    MalformedGrid { expected: usize, found: usize },

    /// Search was asked to move in a state with no legal placement.
    #[error("no legal actions available")]
    NoLegalActions,

    /// Board size outside the supported range.
    #[error("unsupported board size {size}")]
    InvalidSize { size: usize },

    /// A pass was requested while the mover still has a legal placement.
    #[error("cannot pass while a legal action exists")]
    MustPlay,
}
