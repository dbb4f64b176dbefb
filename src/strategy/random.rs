//! Random: uniform card, uniform legal move.

use crate::cards::Card;
use crate::core::GameRng;

use super::traits::Strategy;
use super::visible::{MoveIntent, VisibleState};

/// Chooses uniformly at random. Deterministic when seeded.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rng: GameRng,
}

impl RandomStrategy {
    /// Registry name.
    pub const NAME: &'static str = "random";

    /// Create a random player; `None` seeds from entropy.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_card(&mut self, state: &VisibleState<'_>) -> Option<Card> {
        self.rng.choose(state.hand).copied()
    }

    fn choose_move(&mut self, state: &VisibleState<'_>, card: Card) -> Option<MoveIntent> {
        let moves = state.legal_moves(card);
        self.rng.choose(&moves).map(|m| m.intent)
    }
}
