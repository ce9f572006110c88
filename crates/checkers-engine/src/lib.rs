//! Checkers rules engine.
//!
//! This crate provides:
//! - [`Board`] - grid storage with placement, relocation, and removal primitives
//! - [`Game`] - piece registry, move and jump-chain generation, move application
//! - [`MovePolicy`] - trait implemented by bots, and [`Participant`] seats
//! - [`GameConfig`] - TOML configuration
//! - a compact text [`diagram`] notation for setting up positions
//!
//! # Example
//!
//! ```
//! use checkers_core::PlayerId;
//! use checkers_engine::{Game, GameConfig};
//!
//! let mut game = Game::from_config(&GameConfig::default()).unwrap();
//! let moves = game.get_possible_moves(PlayerId(0));
//! println!("Opening moves: {}", moves.len());
//! game.make_move(&moves[0]).unwrap();
//! ```

mod board;
mod config;
pub mod diagram;
mod game;
mod policy;

pub use board::{Board, BoardError};
pub use config::{ConfigError, GameConfig};
pub use diagram::DiagramError;
pub use game::{Game, GameError};
pub use policy::{MovePolicy, Participant};
