//! Board coordinate representation.

use std::fmt;
use std::ops::Add;

/// A `(row, col)` offset between two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub rows: i32,
    pub cols: i32,
}

impl Offset {
    /// The four diagonal unit steps, in generation order.
    pub const DIAGONALS: [Offset; 4] = [
        Offset::new(-1, -1),
        Offset::new(-1, 1),
        Offset::new(1, -1),
        Offset::new(1, 1),
    ];

    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Offset { rows, cols }
    }

    /// Returns this offset scaled by `factor`.
    #[inline]
    pub const fn scaled(self, factor: i32) -> Self {
        Offset::new(self.rows * factor, self.cols * factor)
    }
}

/// A cell on the board, 0-indexed as `(row, col)`.
///
/// Coordinates are signed so that neighbours of edge cells can be formed
/// and then rejected by a bounds check instead of underflowing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Returns the offset that leads from `self` to `other`.
    #[inline]
    pub const fn offset_to(self, other: Position) -> Offset {
        Offset::new(other.row - self.row, other.col - self.col)
    }

    /// Returns true if `other` lies on a diagonal through `self`, at the
    /// given step distance.
    #[inline]
    pub const fn is_diagonal_step(self, other: Position, distance: i32) -> bool {
        let d = self.offset_to(other);
        d.rows.abs() == distance && d.cols.abs() == distance
    }

    /// Returns the cell halfway between `self` and `other`.
    #[inline]
    pub const fn midpoint(self, other: Position) -> Position {
        Position::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }

    /// Manhattan distance between two cells.
    #[inline]
    pub const fn manhattan(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Returns true if this is a playable (dark) cell.
    #[inline]
    pub const fn is_playable(self) -> bool {
        (self.row + self.col).rem_euclid(2) == 1
    }
}

impl Add<Offset> for Position {
    type Output = Position;

    #[inline]
    fn add(self, rhs: Offset) -> Position {
        Position::new(self.row + rhs.rows, self.col + rhs.cols)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
