//! Move representation.

use crate::{GamePiece, Position};
use std::fmt;

/// A move: the moving piece plus the ordered cells it lands on.
///
/// A path of length 1 is either a simple step or a single capture; longer
/// paths are capture chains applied landing by landing. `piece` is a snapshot
/// of the mover taken when the move was generated.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: GamePiece,
    pub path: Vec<Position>,
}

impl Move {
    #[inline]
    pub fn new(piece: GamePiece, path: Vec<Position>) -> Self {
        Move { piece, path }
    }

    /// Creates a one-square step.
    #[inline]
    pub fn step(piece: GamePiece, to: Position) -> Self {
        Move {
            piece,
            path: vec![to],
        }
    }

    /// The cell the piece starts from.
    #[inline]
    pub fn origin(&self) -> Position {
        self.piece.position
    }

    /// The cell the piece ends on.
    #[inline]
    pub fn destination(&self) -> Position {
        self.path.last().copied().unwrap_or(self.piece.position)
    }

    /// Iterates `(from, to)` pairs for every step of the path.
    pub fn steps(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        std::iter::once(self.origin())
            .chain(self.path.iter().copied())
            .zip(self.path.iter().copied())
    }

    /// Returns true if the first step jumps over a piece.
    #[inline]
    pub fn is_jump(&self) -> bool {
        self.steps()
            .next()
            .is_some_and(|(from, to)| from.is_diagonal_step(to, 2))
    }

    /// Cells of the pieces this move captures, in capture order.
    pub fn captured_squares(&self) -> Vec<Position> {
        self.steps()
            .filter(|(from, to)| from.is_diagonal_step(*to, 2))
            .map(|(from, to)| from.midpoint(to))
            .collect()
    }

    /// Number of pieces captured.
    #[inline]
    pub fn capture_count(&self) -> usize {
        self.steps()
            .filter(|(from, to)| from.is_diagonal_step(*to, 2))
            .count()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {})", self.piece.id, self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_jump() { "x" } else { "-" };
        write!(f, "{}", self.origin())?;
        for to in &self.path {
            write!(f, "{}{}", sep, to)?;
        }
        Ok(())
    }
}
