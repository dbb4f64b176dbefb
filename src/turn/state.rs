//! Turn bookkeeping.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Where the game is within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Not started.
    Idle,
    /// The current seat must pick a card.
    AwaitingCardChoice,
    /// A card was played; the seat must pick a move or decline.
    AwaitingMove,
    /// Play came back to the starting seat; hands still hold cards.
    RoundComplete,
    /// Hands are empty and must be dealt before play continues.
    DealingHands,
    /// Terminal.
    GameOver,
}

/// Whose turn it is and how far the game has progressed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Seat currently acting.
    pub current: PlayerId,
    /// Seat that opens each round.
    pub starting: PlayerId,
    /// Completed deal-and-exhaust cycles.
    pub loop_count: u32,
    /// Completed circuits of all seats.
    pub round_count: u32,
    /// Set once a team has won; never cleared.
    pub game_over: bool,
    /// Current phase.
    pub phase: TurnPhase,
}

impl TurnState {
    /// Fresh state: seat 0 starts, nothing counted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: PlayerId::new(0),
            starting: PlayerId::new(0),
            loop_count: 0,
            round_count: 0,
            game_over: false,
            phase: TurnPhase::Idle,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
