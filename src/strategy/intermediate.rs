//! Intermediate: goal-ordered card choice.

use crate::cards::Card;

use super::traits::Strategy;
use super::visible::{LegalMove, MoveIntent, VisibleState};

/// Picks cards by a fixed order of goals.
///
/// 1. a release card while no marble is out
/// 2. a card that enters the safe zone
/// 3. a card that captures an opponent
/// 4. the card whose best move gains the most progress
#[derive(Clone, Debug, Default)]
pub struct Intermediate;

impl Intermediate {
    /// Registry name.
    pub const NAME: &'static str = "intermediate";

    /// Create an intermediate player.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn rank(state: &VisibleState<'_>, legal: &LegalMove) -> (bool, usize, bool, i64) {
        let release = matches!(legal.intent, MoveIntent::Release { .. });
        (
            legal.enters_safe_zone(),
            state.opponent_captures(legal),
            release && !state.has_marble_out(),
            state.progress_gain(legal),
        )
    }
}

impl Strategy for Intermediate {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_card(&mut self, state: &VisibleState<'_>) -> Option<Card> {
        let hand = state.hand;

        if !state.has_marble_out() {
            if let Some(card) = hand.iter().copied().find(|&c| state.can_release(c)) {
                return Some(card);
            }
        }

        let options: Vec<(Card, Vec<LegalMove>)> = hand
            .iter()
            .map(|&card| (card, state.legal_moves(card)))
            .collect();

        let entering = options
            .iter()
            .find(|(_, moves)| moves.iter().any(LegalMove::enters_safe_zone));
        let capturing = options.iter().find(|(_, moves)| {
            moves.iter().any(|m| state.opponent_captures(m) > 0)
        });
        let best_progress = options
            .iter()
            .filter_map(|(card, moves)| {
                moves
                    .iter()
                    .map(|m| state.progress_gain(m))
                    .max()
                    .map(|gain| (*card, gain))
            })
            .max_by_key(|&(_, gain)| gain)
            .map(|(card, _)| card);

        entering
            .or(capturing)
            .map(|(card, _)| *card)
            .or(best_progress)
            .or_else(|| hand.first().copied())
    }

    fn choose_move(&mut self, state: &VisibleState<'_>, card: Card) -> Option<MoveIntent> {
        state
            .legal_moves(card)
            .iter()
            .max_by_key(|m| Self::rank(state, m))
            .map(|m| m.intent)
    }
}
