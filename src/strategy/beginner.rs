//! Beginner: first card, simplest move.

use crate::cards::Card;

use super::traits::Strategy;
use super::visible::{MoveIntent, VisibleState};

/// Plays the first card in hand.
///
/// With that card it moves the marble on its base if it can, otherwise the
/// first marble that moves, and releases a marble only as a last resort.
#[derive(Clone, Debug, Default)]
pub struct Beginner;

impl Beginner {
    /// Registry name.
    pub const NAME: &'static str = "beginner";

    /// Create a beginner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for Beginner {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_card(&mut self, state: &VisibleState<'_>) -> Option<Card> {
        state.hand.first().copied()
    }

    fn choose_move(&mut self, state: &VisibleState<'_>, card: Card) -> Option<MoveIntent> {
        let moves = state.legal_moves(card);
        let on_base = state.marble_on_base();

        let from_base = moves.iter().find(|m| {
            matches!(m.intent, MoveIntent::Advance { marble } if Some(marble) == on_base)
        });
        let any_advance = moves
            .iter()
            .find(|m| matches!(m.intent, MoveIntent::Advance { .. }));
        let release = moves
            .iter()
            .find(|m| matches!(m.intent, MoveIntent::Release { .. }));

        from_base.or(any_advance).or(release).map(|m| m.intent)
    }
}
