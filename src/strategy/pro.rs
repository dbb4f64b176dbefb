//! Pro: scores every card and move together.

use crate::cards::Card;
use crate::board::Location;

use super::traits::Strategy;
use super::visible::{LegalMove, MoveIntent, VisibleState};

const PROGRESS_WEIGHT: i64 = 10;
const SAFE_ENTRY_BONUS: i64 = 500;
const SAFE_ADVANCE_BONUS: i64 = 300;
const CAPTURE_BONUS: i64 = 400;
const TEAMMATE_CAPTURE_PENALTY: i64 = 300;
const FIRST_RELEASE_BONUS: i64 = 250;
const RELEASE_BONUS: i64 = 150;
const LEAVE_BASE_BONUS: i64 = 50;

/// Evaluates every (card, move) pair and plays the best one.
///
/// The move planned while choosing the card is remembered and replayed in
/// `choose_move`, provided it is still legal.
#[derive(Clone, Debug, Default)]
pub struct Pro {
    planned: Option<(Card, MoveIntent)>,
}

impl Pro {
    /// Registry name.
    pub const NAME: &'static str = "pro";

    /// Create a pro player.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Desirability of a legal move.
    #[must_use]
    pub fn score(state: &VisibleState<'_>, legal: &LegalMove) -> i64 {
        let mut score = state.progress_gain(legal) * PROGRESS_WEIGHT;

        if legal.enters_safe_zone() {
            score += SAFE_ENTRY_BONUS;
        } else if legal.from.is_safe() {
            score += SAFE_ADVANCE_BONUS;
        }

        let opponents = state.opponent_captures(legal) as i64;
        let teammates = legal.captures.len() as i64 - opponents;
        score += opponents * CAPTURE_BONUS - teammates * TEAMMATE_CAPTURE_PENALTY;

        match legal.intent {
            MoveIntent::Release { .. } if !state.has_marble_out() => score += FIRST_RELEASE_BONUS,
            MoveIntent::Release { .. } => score += RELEASE_BONUS,
            MoveIntent::Advance { .. } if legal.from == Location::Track(state.base()) => {
                score += LEAVE_BASE_BONUS;
            }
            MoveIntent::Advance { .. } => {}
        }
        score
    }

    fn best_for(state: &VisibleState<'_>, card: Card) -> Option<(i64, MoveIntent)> {
        state
            .legal_moves(card)
            .iter()
            .map(|m| (Self::score(state, m), m.intent))
            .max_by_key(|&(score, _)| score)
    }
}

impl Strategy for Pro {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_card(&mut self, state: &VisibleState<'_>) -> Option<Card> {
        let best = state
            .hand
            .iter()
            .filter_map(|&card| Self::best_for(state, card).map(|(score, intent)| (score, card, intent)))
            .max_by_key(|&(score, _, _)| score);

        match best {
            Some((_, card, intent)) => {
                self.planned = Some((card, intent));
                Some(card)
            }
            None => {
                self.planned = None;
                // Nothing moves: throw away the card with the fewest steps.
                state.hand.iter().copied().min_by_key(|&c| state.steps_of(c))
            }
        }
    }

    fn choose_move(&mut self, state: &VisibleState<'_>, card: Card) -> Option<MoveIntent> {
        if let Some((planned_card, intent)) = self.planned.take() {
            if planned_card == card && state.find_legal(card, intent).is_some() {
                return Some(intent);
            }
        }
        Self::best_for(state, card).map(|(_, intent)| intent)
    }
}
