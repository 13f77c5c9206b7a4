//! Constants for board dimensions, the text alphabet, and driver limits.
//!
//! The board size is chosen at runtime, but it must stay within
//! [`MIN_SIZE`]..=[`MAX_SIZE`]. Exhaustive search is only practical on small
//! boards, which is why the command line defaults to [`DEFAULT_SIZE`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest supported board (NxN). The four starting marks need a 2x2 center
/// with at least one ring of empty cells around it.
pub const MIN_SIZE: usize = 4;

/// Largest supported board (NxN).
pub const MAX_SIZE: usize = 26;

/// Board size used by the command line when `--size` is not given.
pub const DEFAULT_SIZE: usize = 4;

/// Classic Othello board size.
pub const STANDARD_SIZE: usize = 8;

// =============================================================================
// Text Alphabet
// =============================================================================

/// Token for a cell owned by the first player.
pub const TOKEN_FIRST: char = 'X';

/// Token for a cell owned by the second player.
pub const TOKEN_SECOND: char = 'O';

/// Token for an empty cell.
pub const TOKEN_EMPTY: char = '.';

// =============================================================================
// Game Driver
// =============================================================================

/// Consecutive rejected actions after which the driver gives up on a player.
pub const MAX_REJECTED_ACTIONS: usize = 16;
