//! Core types for checkers.
//!
//! This crate provides the fundamental types shared by the engine and bots:
//! - [`Position`] and [`Offset`] for board coordinates
//! - [`Player`], [`PlayerId`], and [`Direction`] for player identity
//! - [`GamePiece`] and [`PieceId`] for checkers
//! - [`Move`] for the `(piece, landing path)` move format

mod mov;
mod piece;
mod player;
mod position;

pub use mov::Move;
pub use piece::{GamePiece, PieceId};
pub use player::{Direction, Player, PlayerId};
pub use position::{Offset, Position};
