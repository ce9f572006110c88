//! Checker piece representation.

use crate::{PlayerId, Position};
use std::fmt;

/// Unique handle of a piece, assigned when it is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One checker: identity, owner, current cell, and king flag.
///
/// `is_king` starts false and only ever flips to true through
/// [`GamePiece::transform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GamePiece {
    pub id: PieceId,
    pub owner: PlayerId,
    pub position: Position,
    is_king: bool,
}

impl GamePiece {
    /// Creates an uncrowned piece.
    #[inline]
    pub const fn new(id: PieceId, owner: PlayerId, position: Position) -> Self {
        GamePiece {
            id,
            owner,
            position,
            is_king: false,
        }
    }

    #[inline]
    pub const fn is_king(&self) -> bool {
        self.is_king
    }

    /// Promotes the piece to king. Calling it on a king is a no-op.
    #[inline]
    pub fn transform(&mut self) {
        self.is_king = true;
    }

    /// Returns a copy of the piece already crowned.
    #[inline]
    pub fn crowned(mut self) -> Self {
        self.is_king = true;
        self
    }
}

impl fmt::Display for GamePiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_king { "king" } else { "man" };
        write!(f, "{} {}{} at {}", self.owner, kind, self.id, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_piece_is_not_king() {
        let piece = GamePiece::new(PieceId(0), PlayerId(0), Position::new(5, 2));
        assert!(!piece.is_king());
    }

    #[test]
    fn transform_is_idempotent() {
        let mut piece = GamePiece::new(PieceId(0), PlayerId(0), Position::new(0, 1));
        piece.transform();
        assert!(piece.is_king());
        piece.transform();
        assert!(piece.is_king());
    }

    #[test]
    fn crowned_copy() {
        let piece = GamePiece::new(PieceId(3), PlayerId(1), Position::new(7, 0));
        let king = piece.crowned();
        assert!(king.is_king());
        assert!(!piece.is_king());
        assert_eq!(king.id, piece.id);
    }

    #[test]
    fn display() {
        let piece = GamePiece::new(PieceId(3), PlayerId(1), Position::new(7, 0));
        assert_eq!(piece.to_string(), "P1 man#3 at (7, 0)");
        assert_eq!(piece.crowned().to_string(), "P1 king#3 at (7, 0)");
    }
}
