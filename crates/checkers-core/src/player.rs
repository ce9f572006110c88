//! Player identity and forward-direction convention.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The direction in which a player's non-king pieces advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Returns the row delta of a forward step (-1 for Up, +1 for Down).
    #[inline]
    pub const fn row_step(self) -> i32 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }

    /// Returns the row on which a piece moving this way is crowned.
    #[inline]
    pub const fn promotion_row(self, rows: i32) -> i32 {
        match self {
            Direction::Up => 0,
            Direction::Down => rows - 1,
        }
    }

    /// Returns the edge row a piece moving this way starts from.
    #[inline]
    pub const fn home_row(self, rows: i32) -> i32 {
        self.opposite().promotion_row(rows)
    }

    /// Returns how many rows `row` is away from the home edge.
    #[inline]
    pub const fn rows_from_home(self, row: i32, rows: i32) -> u32 {
        row.abs_diff(self.home_row(rows))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Handle of a player inside a game (its index in the player list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A participant's identity: name, piece color, and forward direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub color: String,
    pub direction: Direction,
}

impl Player {
    pub fn new(name: impl Into<String>, color: impl Into<String>, direction: Direction) -> Self {
        Player {
            name: name.into(),
            color: color.into(),
            direction,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.color)
    }
}
