//! Game configuration loaded from TOML.
//!
//! ```toml
//! width = 8
//! populated_rows = 3
//!
//! [[players]]
//! name = "White"
//! color = "white"
//! direction = "up"
//!
//! [[players]]
//! name = "Black"
//! color = "black"
//! direction = "down"
//! ```
//!
//! Tables this module does not know (such as `[heuristic]`) are ignored, so
//! bots can read their own settings from the same file.

use std::path::Path;

use checkers_core::{Direction, Player};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Game, GameError};

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Board size, army depth, and the two players.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameConfig {
    /// Side length of the square board. Defaults to 8.
    #[serde(default = "default_width")]
    pub width: usize,
    /// Rows of men per player at the start. Defaults to 3.
    #[serde(default = "default_populated_rows")]
    pub populated_rows: usize,
    /// Players in turn order. Defaults to White (up) and Black (down).
    #[serde(default = "default_players")]
    pub players: Vec<Player>,
}

fn default_width() -> usize {
    8
}

fn default_populated_rows() -> usize {
    3
}

fn default_players() -> Vec<Player> {
    vec![
        Player::new("White", "white", Direction::Up),
        Player::new("Black", "black", Direction::Down),
    ]
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: default_width(),
            populated_rows: default_populated_rows(),
            players: default_players(),
        }
    }
}

impl GameConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the configuration at `path`, or the defaults if there is no
    /// file there.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }
}

impl Game {
    /// Builds a populated game from a configuration.
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        Game::new(config.players.clone(), config.populated_rows, config.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkers_core::PlayerId;

    #[test]
    fn parse_full_config() {
        let content = r#"
width = 10
populated_rows = 4

[[players]]
name = "Ann"
color = "red"
direction = "down"

[[players]]
name = "Bob"
color = "blue"
direction = "up"

[heuristic]
back_rows = 2
"#;
        let config = GameConfig::from_toml_str(content).unwrap();
        assert_eq!(config.width, 10);
        assert_eq!(config.populated_rows, 4);
        assert_eq!(config.players[0], Player::new("Ann", "red", Direction::Down));
        assert_eq!(config.players[1].direction, Direction::Up);

        let game = Game::from_config(&config).unwrap();
        assert_eq!(game.board().rows(), 10);
        assert_eq!(game.piece_count(PlayerId(0)), 20);
        assert!(game.pieces(PlayerId(0)).all(|p| p.position.row < 4));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.width, 8);
        assert_eq!(config.populated_rows, 3);
        assert_eq!(config.players.len(), 2);
    }

    #[test]
    fn invalid_direction_is_a_parse_error() {
        let content = r#"
[[players]]
name = "Ann"
color = "red"
direction = "sideways"
"#;
        assert!(matches!(
            GameConfig::from_toml_str(content),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn invalid_setup_is_reported_by_game() {
        let config = GameConfig {
            populated_rows: 5,
            ..GameConfig::default()
        };
        assert!(matches!(
            Game::from_config(&config),
            Err(GameError::InvalidSetup(_))
        ));
    }

    #[test]
    fn load_missing_file_returns_default() {
        let config = GameConfig::load("definitely/not/here/checkers.toml").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn serialization_roundtrip() {
        let config = GameConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(GameConfig::from_toml_str(&text).unwrap(), config);
    }
}
