//! Move selection seam between the engine and whoever plays a side.

use checkers_core::{Move, PlayerId};
use std::fmt;

use crate::Game;

/// Something that picks one move out of a list of legal moves.
///
/// Implementations must return an element of `possible_moves` (never a
/// synthesized move), and `None` only when the list is empty.
pub trait MovePolicy {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Chooses one of `possible_moves` for the current position of `game`.
    fn choose_move(&mut self, game: &Game, possible_moves: &[Move]) -> Option<Move>;
}

/// A player seat: the player's id plus an optional policy.
///
/// Seats without a policy are human-controlled and driven from outside the
/// engine.
pub struct Participant {
    pub player: PlayerId,
    policy: Option<Box<dyn MovePolicy>>,
}

impl Participant {
    /// A human-controlled seat.
    pub fn human(player: PlayerId) -> Self {
        Participant {
            player,
            policy: None,
        }
    }

    /// A seat played by `policy`.
    pub fn bot(player: PlayerId, policy: impl MovePolicy + 'static) -> Self {
        Participant {
            player,
            policy: Some(Box::new(policy)),
        }
    }

    /// Returns true if a policy plays this seat.
    pub fn is_bot(&self) -> bool {
        self.policy.is_some()
    }

    /// Asks the seat's policy for a move among the player's legal moves.
    ///
    /// Returns `None` for human seats and when the player has no move.
    pub fn choose_move(&mut self, game: &Game) -> Option<Move> {
        let policy = self.policy.as_mut()?;
        let moves = game.get_possible_moves(self.player);
        let choice = policy.choose_move(game, &moves)?;
        tracing::debug!("{} ({}) chose {}", self.player, policy.name(), choice);
        Some(choice)
    }
}

impl fmt::Debug for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Participant")
            .field("player", &self.player)
            .field("policy", &self.policy.as_ref().map(|p| p.name()))
            .finish()
    }
}
