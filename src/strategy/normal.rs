//! Normal: releases eagerly, otherwise plays big cards.

use crate::cards::Card;

use super::traits::Strategy;
use super::visible::{MoveIntent, VisibleState};

/// Prefers getting marbles out, then raw distance.
///
/// Plays a release card when nothing is on the board or the base is free,
/// and the highest-step card otherwise. Releases whenever the card allows,
/// else moves the first marble that can move.
#[derive(Clone, Debug, Default)]
pub struct Normal;

impl Normal {
    /// Registry name.
    pub const NAME: &'static str = "normal";

    /// Create a normal player.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for Normal {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_card(&mut self, state: &VisibleState<'_>) -> Option<Card> {
        let wants_release = !state.has_marble_out() || state.marble_on_base().is_none();
        if wants_release {
            if let Some(card) = state.hand.iter().copied().find(|&c| state.can_release(c)) {
                return Some(card);
            }
        }
        state
            .hand
            .iter()
            .copied()
            .max_by_key(|&card| state.steps_of(card))
    }

    fn choose_move(&mut self, state: &VisibleState<'_>, card: Card) -> Option<MoveIntent> {
        let moves = state.legal_moves(card);
        moves
            .iter()
            .find(|m| matches!(m.intent, MoveIntent::Release { .. }))
            .or_else(|| moves.first())
            .map(|m| m.intent)
    }
}
