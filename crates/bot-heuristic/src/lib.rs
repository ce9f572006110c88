//! Heuristic checkers bot.
//!
//! [`CheckersBot`] narrows the legal moves through five ordered stages. Each
//! stage keeps the candidates that pass its test, unless none would pass, in
//! which case the stage is skipped:
//!
//! 1. kinging: moves that crown the moving man
//! 2. safety: moves after which the mover cannot be captured
//! 3. longest capture: chains that take the most pieces
//! 4. aggression: moves that end closest to the enemy
//! 5. flank preservation: moves that keep back-row pieces at home
//!
//! The first surviving candidate, in input order, is played.

use std::path::Path;

use checkers_core::{Move, PlayerId};
use checkers_engine::{ConfigError, Game, MovePolicy};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Tunables for [`CheckersBot`], read from the `[heuristic]` table of the
/// game configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeuristicConfig {
    /// How many rows next to its home edge count as the mover's back rows.
    /// Defaults to 1.
    #[serde(default = "default_back_rows")]
    pub back_rows: u32,
}

fn default_back_rows() -> u32 {
    1
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        HeuristicConfig {
            back_rows: default_back_rows(),
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    heuristic: HeuristicConfig,
}

impl HeuristicConfig {
    /// Reads the `[heuristic]` table from TOML text; defaults if absent.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.heuristic)
    }

    /// Loads the `[heuristic]` table from the file at `path`, or the
    /// defaults if there is no file there.
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

/// Deterministic multi-criteria bot.
#[derive(Debug, Clone, Default)]
pub struct CheckersBot {
    name: String,
    config: HeuristicConfig,
}

impl CheckersBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, HeuristicConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: HeuristicConfig) -> Self {
        CheckersBot {
            name: name.into(),
            config,
        }
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Moves whose man reaches its promotion row.
    pub fn kinging_moves(&self, game: &Game, moves: &[Move]) -> Vec<Move> {
        let rows = game.board().rows();
        moves
            .iter()
            .filter(|m| {
                !m.piece.is_king()
                    && game.player(m.piece.owner).is_some_and(|p| {
                        let crown = p.direction.promotion_row(rows);
                        m.path.iter().any(|to| to.row == crown)
                    })
            })
            .cloned()
            .collect()
    }

    /// Moves after which no opponent capture chain takes the moved piece.
    pub fn safe_moves(&self, game: &Game, moves: &[Move]) -> Vec<Move> {
        moves
            .iter()
            .filter(|m| {
                simulate(game, m).is_some_and(|next| {
                    let landing = m.destination();
                    opponents(&next, m.piece.owner).all(|opponent| {
                        next.get_all_jumps(opponent)
                            .iter()
                            .all(|jump| !jump.captured_squares().contains(&landing))
                    })
                })
            })
            .cloned()
            .collect()
    }

    /// The capture chains that take the most pieces.
    pub fn longest_captures(&self, moves: &[Move]) -> Vec<Move> {
        let Some(best) = moves.iter().map(Move::capture_count).max() else {
            return Vec::new();
        };
        moves
            .iter()
            .filter(|m| m.is_jump() && m.capture_count() == best)
            .cloned()
            .collect()
    }

    /// Moves that minimize the summed Manhattan distance from the landing
    /// cell to every remaining enemy piece.
    pub fn aggressive_moves(&self, game: &Game, moves: &[Move]) -> Vec<Move> {
        let scored: Vec<(u32, &Move)> = moves
            .iter()
            .filter_map(|m| {
                let next = simulate(game, m)?;
                let landing = m.destination();
                let distance = opponents(&next, m.piece.owner)
                    .flat_map(|opponent| next.pieces(opponent))
                    .map(|enemy| landing.manhattan(enemy.position))
                    .sum();
                Some((distance, m))
            })
            .collect();

        let Some(best) = scored.iter().map(|(d, _)| *d).min() else {
            return Vec::new();
        };
        scored
            .into_iter()
            .filter(|(d, _)| *d == best)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Moves whose piece does not start on one of the mover's back rows.
    pub fn non_back_moves(&self, game: &Game, moves: &[Move]) -> Vec<Move> {
        let rows = game.board().rows();
        moves
            .iter()
            .filter(|m| {
                game.player(m.piece.owner).is_some_and(|p| {
                    p.direction.rows_from_home(m.origin().row, rows) >= self.config.back_rows
                })
            })
            .cloned()
            .collect()
    }
}

/// Replaces `candidates` with the stage result, unless it is empty.
fn narrow(stage: &str, candidates: &mut Vec<Move>, filtered: Vec<Move>) {
    if filtered.is_empty() {
        trace!("{}: no candidate passes, stage skipped", stage);
        return;
    }
    trace!("{}: {} -> {} candidates", stage, candidates.len(), filtered.len());
    *candidates = filtered;
}

/// The position after `mv`, or `None` if it cannot be applied.
fn simulate(game: &Game, mv: &Move) -> Option<Game> {
    let mut next = game.clone();
    next.make_move(mv).ok()?;
    Some(next)
}

fn opponents(game: &Game, player: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
    game.player_ids().filter(move |&p| p != player)
}

impl MovePolicy for CheckersBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, game: &Game, possible_moves: &[Move]) -> Option<Move> {
        let mut candidates = possible_moves.to_vec();

        let kinging = self.kinging_moves(game, &candidates);
        narrow("kinging", &mut candidates, kinging);
        let safe = self.safe_moves(game, &candidates);
        narrow("safety", &mut candidates, safe);
        let longest = self.longest_captures(&candidates);
        narrow("longest capture", &mut candidates, longest);
        let aggressive = self.aggressive_moves(game, &candidates);
        narrow("aggression", &mut candidates, aggressive);
        let keep_back = self.non_back_moves(game, &candidates);
        narrow("flank", &mut candidates, keep_back);

        candidates.into_iter().next()
    }
}
