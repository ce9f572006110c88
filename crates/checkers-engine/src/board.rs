//! Grid storage and occupancy primitives.
//!
//! The [`Board`] knows nothing about players or move legality: it stores at
//! most one [`GamePiece`] per cell and offers placement, relocation, and
//! removal primitives. Keeping the per-player registry consistent with the
//! grid is the job of [`Game`](crate::Game).

use checkers_core::{GamePiece, Position};
use std::fmt;
use thiserror::Error;

use crate::diagram;

/// Errors raised by board primitives.
///
/// All of these indicate a caller bypassing the move generator; the engine
/// itself never triggers them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell {0} is off the grid")]
    OffGrid(Position),

    #[error("invalid placement: cell {0} is already occupied")]
    InvalidPlacement(Position),

    #[error("illegal move from {from} to {to}: {reason}")]
    IllegalMove {
        from: Position,
        to: Position,
        reason: &'static str,
    },

    #[error("illegal state: {0} is not on its recorded cell")]
    IllegalState(GamePiece),
}

/// A `rows × cols` grid of optional pieces, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: i32,
    cols: i32,
    grid: Vec<Option<GamePiece>>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(rows: usize, cols: usize) -> Self {
        Board {
            rows: rows as i32,
            cols: cols as i32,
            grid: vec![None; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        self.is_on_grid(pos)
            .then(|| (pos.row * self.cols + pos.col) as usize)
    }

    /// Returns true if both coordinates are inside the grid.
    #[inline]
    pub fn is_on_grid(&self, pos: Position) -> bool {
        (0..self.rows).contains(&pos.row) && (0..self.cols).contains(&pos.col)
    }

    /// Returns true if `pos` is on the grid and holds no piece.
    #[inline]
    pub fn is_empty_cell(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.grid[i].is_none())
    }

    /// Returns true if `row` is the first or last row.
    #[inline]
    pub fn is_promotion_row(&self, row: i32) -> bool {
        row == 0 || row == self.rows - 1
    }

    /// Returns the piece on `pos`, if any.
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<&GamePiece> {
        self.index(pos).and_then(|i| self.grid[i].as_ref())
    }

    /// Iterates all pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &GamePiece> {
        self.grid.iter().flatten()
    }

    /// Inserts `piece` on its recorded cell.
    pub fn place_piece(&mut self, piece: GamePiece) -> Result<(), BoardError> {
        let i = self
            .index(piece.position)
            .ok_or(BoardError::OffGrid(piece.position))?;
        if self.grid[i].is_some() {
            return Err(BoardError::InvalidPlacement(piece.position));
        }
        self.grid[i] = Some(piece);
        Ok(())
    }

    /// Overwrites `pos` with `piece`, returning what was there.
    pub fn set_cell(
        &mut self,
        pos: Position,
        piece: Option<GamePiece>,
    ) -> Result<Option<GamePiece>, BoardError> {
        let i = self.index(pos).ok_or(BoardError::OffGrid(pos))?;
        Ok(std::mem::replace(&mut self.grid[i], piece))
    }

    /// Empties `pos`, returning the piece that was there.
    pub fn clear_cell(&mut self, pos: Position) -> Result<Option<GamePiece>, BoardError> {
        self.set_cell(pos, None)
    }

    /// Relocates the piece on `from` to the empty cell `to`.
    ///
    /// Updates the piece's stored position and crowns it when `to` is on
    /// either extreme row. Captures are not handled here; see
    /// [`Game::move_piece`](crate::Game::move_piece).
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<GamePiece, BoardError> {
        let src = self.index(from).ok_or(BoardError::IllegalMove {
            from,
            to,
            reason: "source is off the grid",
        })?;
        let dst = self.index(to).ok_or(BoardError::IllegalMove {
            from,
            to,
            reason: "target is off the grid",
        })?;
        if self.grid[dst].is_some() {
            return Err(BoardError::IllegalMove {
                from,
                to,
                reason: "target cell is occupied",
            });
        }
        let mut piece = self.grid[src].take().ok_or(BoardError::IllegalMove {
            from,
            to,
            reason: "no piece on the source cell",
        })?;

        piece.position = to;
        if self.is_promotion_row(to.row) {
            piece.transform();
        }
        self.grid[dst] = Some(piece);
        Ok(piece)
    }

    /// Clears the cell of `piece`, which must be on its recorded position.
    pub fn remove_piece(&mut self, piece: &GamePiece) -> Result<GamePiece, BoardError> {
        let i = self
            .index(piece.position)
            .ok_or(BoardError::IllegalState(*piece))?;
        match self.grid[i] {
            Some(found) if found.id == piece.id => {
                self.grid[i] = None;
                Ok(found)
            }
            _ => Err(BoardError::IllegalState(*piece)),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.cols {
            write!(f, " {}", col % 10)?;
        }
        writeln!(f)?;
        for row in 0..self.rows {
            write!(f, "{:>2}", row)?;
            for col in 0..self.cols {
                let c = self
                    .piece_at(Position::new(row, col))
                    .map_or(diagram::EMPTY, diagram::piece_char);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
