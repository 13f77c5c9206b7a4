//! Reversi-AB: an Othello/Reversi rules engine with exhaustive alpha-beta search.
//!
//! Players alternate placing marks on a square grid. A placement is legal only if
//! it brackets at least one run of opponent marks against an existing mark of the
//! mover; every bracketed mark flips.
//!
//! ## Modules
//!
//! - [`constants`] - Board size limits, text alphabet, driver limits
//! - [`error`] - Recoverable error taxonomy
//! - [`direction`] - The eight grid directions
//! - [`board`] - Cell marks, the grid, text parsing and rendering
//! - [`state`] - Move generation, transitions, passing, terminal scoring
//! - [`search`] - Minimax with alpha-beta pruning
//! - [`player`] - Human, random and search strategies
//! - [`game`] - Game driver
//!
//! ## Errors and panics
//!
//! Rule violations (bad coordinates, occupied cells, wrong turn, placements that
//! capture nothing) come back as [`error::GameError`] and leave the receiver
//! unchanged. Misuse that only a bug can cause panics instead:
//! - [`board::Board::set_cell`] with [`board::Mark::Empty`]
//! - [`board::Board::flip`] on an empty cell
//! - [`state::State::utility`] before the game is over
//!
//! ## Example
//!
//! ```
//! use reversi_ab::board::Mark;
//! use reversi_ab::search::SearchPlayer;
//! use reversi_ab::state::State;
//!
//! // Create a new 4x4 game with X to move
//! let state = State::initial_with(4, Mark::First).unwrap();
//!
//! // Search the whole game tree for the best reply
//! let mut player = SearchPlayer::new();
//! let action = player.choose(&state).unwrap();
//! let next = state.result(&action).unwrap();
//! assert_eq!(next.to_move(), Mark::Second);
//! ```

pub mod board;
pub mod constants;
pub mod direction;
pub mod error;
pub mod game;
pub mod player;
pub mod search;
pub mod state;
