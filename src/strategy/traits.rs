//! The strategy capability.

use crate::cards::Card;

use super::visible::{MoveIntent, VisibleState};

/// Decision-making for one seat.
///
/// The engine asks for a card, discards it, then asks what to do with it.
/// Declining a move still consumes the card. Strategies never mutate the
/// game; an intent the rules reject is treated as a decline.
pub trait Strategy: Send {
    /// Stable name, as used by the registry.
    fn name(&self) -> &'static str;

    /// Pick a card from `state.hand`, which is never empty.
    ///
    /// Returning `None` or a card not in hand makes the engine play the
    /// first card instead.
    fn choose_card(&mut self, state: &VisibleState<'_>) -> Option<Card>;

    /// Pick a move for `card`, or `None` to decline.
    fn choose_move(&mut self, state: &VisibleState<'_>, card: Card) -> Option<MoveIntent>;
}
