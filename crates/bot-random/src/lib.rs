//! Random move bot - plays a random legal move.
//!
//! The nondeterministic baseline for the heuristic bot. The random source is
//! a type parameter, so tests and reproducible matches can pass a seeded RNG.

use checkers_core::Move;
use checkers_engine::{Game, MovePolicy};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Picks uniformly among the moves it is offered.
#[derive(Debug, Clone)]
pub struct RandomBot<R = StdRng> {
    name: String,
    rng: R,
}

impl RandomBot<StdRng> {
    /// A bot seeded from the operating system.
    pub fn from_entropy(name: impl Into<String>) -> Self {
        Self::new(name, StdRng::from_entropy())
    }

    /// A bot whose choices are fully determined by `seed`.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self::new(name, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomBot<R> {
    /// A bot drawing from `rng`.
    pub fn new(name: impl Into<String>, rng: R) -> Self {
        RandomBot {
            name: name.into(),
            rng,
        }
    }
}

impl<R: Rng> MovePolicy for RandomBot<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, _game: &Game, possible_moves: &[Move]) -> Option<Move> {
        let choice = possible_moves.choose(&mut self.rng).cloned();
        tracing::trace!(
            "{} picked {:?} out of {}",
            self.name,
            choice,
            possible_moves.len()
        );
        choice
    }
}
