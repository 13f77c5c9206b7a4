//! The eight grid-adjacency offsets used for capture scanning.

/// A unit step on the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dr: isize,
    pub dc: isize,
}

/// Orthogonal and diagonal neighbors. Order is irrelevant to the rules.
pub const DIRECTIONS: [Direction; 8] = [
    Direction { dr: -1, dc: 0 },  // up
    Direction { dr: -1, dc: 1 },  // up-right
    Direction { dr: 0, dc: 1 },   // right
    Direction { dr: 1, dc: 1 },   // down-right
    Direction { dr: 1, dc: 0 },   // down
    Direction { dr: 1, dc: -1 },  // down-left
    Direction { dr: 0, dc: -1 },  // left
    Direction { dr: -1, dc: -1 }, // up-left
];

impl Direction {
    /// Step once from `(row, col)`.
    ///
    /// Returns `None` only when a coordinate would go negative. The upper bound is
    /// not checked here; use [`Board::contains`](crate::board::Board::contains).
    #[inline]
    pub fn next(self, row: usize, col: usize) -> Option<(usize, usize)> {
        Some((
            row.checked_add_signed(self.dr)?,
            col.checked_add_signed(self.dc)?,
        ))
    }
}
