//! Compact text notation for board setups.
//!
//! Rows are listed from row 0 downward and separated by `/`. Each cell is one
//! character:
//! - `.` an empty cell, or a digit `1`-`9` for that many empty cells
//! - `x` / `X` a man / king of the first player
//! - `o` / `O` a man / king of the second player
//!
//! For example the 8×8 opening with three rows each reads
//! `.o.o.o.o/o.o.o.o./.o.o.o.o/8/8/x.x.x.x./.x.x.x.x/x.x.x.x.`.

use checkers_core::{GamePiece, Player, PlayerId, Position};
use thiserror::Error;

use crate::{Game, GameError};

/// Character of an empty cell.
pub const EMPTY: char = '.';

/// Errors that can occur when parsing a diagram.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiagramError {
    #[error("diagram is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid character '{ch}' in row {row}")]
    InvalidChar { row: usize, ch: char },

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Returns the diagram character for `piece`.
pub fn piece_char(piece: &GamePiece) -> char {
    let c = match piece.owner {
        PlayerId(0) => 'x',
        _ => 'o',
    };
    if piece.is_king() {
        c.to_ascii_uppercase()
    } else {
        c
    }
}

/// Parses a diagram character into `(owner, is_king)`.
pub fn parse_piece_char(c: char) -> Option<(PlayerId, bool)> {
    let owner = match c.to_ascii_lowercase() {
        'x' => PlayerId(0),
        'o' => PlayerId(1),
        _ => return None,
    };
    Some((owner, c.is_ascii_uppercase()))
}

type Cell = Option<(PlayerId, bool)>;

fn parse_row(row: usize, text: &str) -> Result<Vec<Cell>, DiagramError> {
    let mut cells = Vec::new();
    for c in text.chars() {
        if c == EMPTY {
            cells.push(None);
        } else if let Some(n) = c.to_digit(10).filter(|&n| n > 0) {
            cells.extend(std::iter::repeat(None).take(n as usize));
        } else if let Some(piece) = parse_piece_char(c) {
            cells.push(Some(piece));
        } else {
            return Err(DiagramError::InvalidChar { row, ch: c });
        }
    }
    Ok(cells)
}

fn parse(diagram: &str) -> Result<Vec<Vec<Cell>>, DiagramError> {
    let diagram = diagram.trim();
    if diagram.is_empty() {
        return Err(DiagramError::Empty);
    }

    let rows = diagram
        .split('/')
        .enumerate()
        .map(|(i, text)| parse_row(i, text.trim()))
        .collect::<Result<Vec<_>, _>>()?;

    let expected = rows[0].len();
    if expected == 0 {
        return Err(DiagramError::Empty);
    }
    if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
        return Err(DiagramError::RaggedRow {
            row,
            expected,
            found: cells.len(),
        });
    }
    Ok(rows)
}

impl Game {
    /// Builds a game from a diagram, placing pieces in row-major order.
    pub fn from_diagram(players: Vec<Player>, diagram: &str) -> Result<Self, DiagramError> {
        let rows = parse(diagram)?;
        let mut game = Game::empty(players, rows.len(), rows[0].len())?;
        for (r, cells) in rows.iter().enumerate() {
            for (c, cell) in cells.iter().enumerate() {
                let Some((owner, king)) = *cell else {
                    continue;
                };
                let pos = Position::new(r as i32, c as i32);
                if king {
                    game.place_king(owner, pos)?;
                } else {
                    game.place_piece(owner, pos)?;
                }
            }
        }
        Ok(game)
    }

    /// Serializes the board, collapsing runs of empty cells into digits.
    pub fn to_diagram(&self) -> String {
        let board = self.board();
        let mut rows = Vec::with_capacity(board.rows() as usize);
        for r in 0..board.rows() {
            let mut row = String::new();
            let mut empty = 0;
            for c in 0..board.cols() {
                match board.piece_at(Position::new(r, c)) {
                    Some(piece) => {
                        flush_empty(&mut row, &mut empty);
                        row.push(piece_char(piece));
                    }
                    None => empty += 1,
                }
            }
            flush_empty(&mut row, &mut empty);
            rows.push(row);
        }
        rows.join("/")
    }
}

fn flush_empty(row: &mut String, empty: &mut u32) {
    while *empty > 0 {
        let run = (*empty).min(9);
        if run == 1 {
            row.push(EMPTY);
        } else {
            row.push(char::from_digit(run, 10).unwrap_or(EMPTY));
        }
        *empty -= run;
    }
}
