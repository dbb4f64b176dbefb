//! The round/loop scheduler.
//!
//! Turns pass seat by seat. Coming back to the starting seat completes a
//! round; if every hand is empty at that point a loop completes as well,
//! hands are redealt (larger from a configured loop on), and every few
//! loops the starting seat moves on by one.
//!
//! The scheduler only keeps counts and decides; dealing cards is the
//! caller's job, driven by the returned `Advance`.

use tracing::{debug, info};

use crate::core::{PlayerId, ScheduleConfig};

use super::state::{TurnPhase, TurnState};

/// What one call to `advance` decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Advance {
    /// Seat now acting.
    pub next: PlayerId,
    /// Play returned to the starting seat.
    pub round_completed: bool,
    /// Hand size to deal, if a loop just completed.
    pub redeal: Option<usize>,
    /// The starting seat moved on.
    pub rotated: bool,
}

/// Owns the `TurnState` and drives it through the turn phases.
#[derive(Clone, Debug)]
pub struct TurnScheduler {
    state: TurnState,
    player_count: usize,
    schedule: ScheduleConfig,
}

impl TurnScheduler {
    /// Create an idle scheduler.
    #[must_use]
    pub fn new(player_count: usize, schedule: ScheduleConfig) -> Self {
        Self {
            state: TurnState::new(),
            player_count,
            schedule,
        }
    }

    /// Current turn state.
    #[must_use]
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// Seat currently acting.
    #[must_use]
    pub fn current(&self) -> PlayerId {
        self.state.current
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.phase
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// Reset to a fresh game and request the opening deal.
    ///
    /// Returns the opening hand size.
    pub fn start(&mut self) -> usize {
        self.state = TurnState::new();
        self.state.phase = TurnPhase::DealingHands;
        self.schedule.hand_size_for_loop(0)
    }

    /// Hands have been dealt; the current seat may choose a card.
    pub fn hands_dealt(&mut self) {
        if self.state.phase == TurnPhase::DealingHands {
            self.state.phase = TurnPhase::AwaitingCardChoice;
        }
    }

    /// The current seat has played a card.
    pub fn card_chosen(&mut self) {
        if matches!(
            self.state.phase,
            TurnPhase::AwaitingCardChoice | TurnPhase::RoundComplete
        ) {
            self.state.phase = TurnPhase::AwaitingMove;
        }
    }

    /// Pass the turn to the next seat.
    ///
    /// `all_hands_empty` is consulted only when play returns to the
    /// starting seat. Returns `None`, changing nothing, once the game is
    /// over.
    pub fn advance(&mut self, all_hands_empty: bool) -> Option<Advance> {
        if self.state.game_over {
            return None;
        }

        let state = &mut self.state;
        state.current = state.current.next(self.player_count);
        state.phase = TurnPhase::AwaitingCardChoice;

        let mut advance = Advance {
            next: state.current,
            round_completed: false,
            redeal: None,
            rotated: false,
        };

        if state.current == state.starting {
            state.round_count += 1;
            state.phase = TurnPhase::RoundComplete;
            advance.round_completed = true;
            debug!(round = state.round_count, "round complete");

            if all_hands_empty {
                state.loop_count += 1;
                let hand_size = self.schedule.hand_size_for_loop(state.loop_count);
                state.phase = TurnPhase::DealingHands;
                advance.redeal = Some(hand_size);
                info!(loop_count = state.loop_count, hand_size, "loop complete, redealing");

                if self.schedule.rotates_after(state.loop_count) {
                    state.starting = state.starting.next(self.player_count);
                    state.current = state.starting;
                    advance.next = state.current;
                    advance.rotated = true;
                    info!(starting = %state.starting, "starting seat rotated");
                }
            }
        }

        debug!(player = %advance.next, phase = ?state.phase, "turn advanced");
        Some(advance)
    }

    /// Mark the game as over. Later `advance` calls do nothing.
    pub fn end_game(&mut self) {
        self.state.game_over = true;
        self.state.phase = TurnPhase::GameOver;
    }
}
