//! Notifications emitted by the engine.
//!
//! Events describe state that has already been committed. They are
//! advisory: a renderer may animate them at its own pace, a log may record
//! them, and the engine's state stays authoritative whether or not any
//! sink is attached.

use serde::{Deserialize, Serialize};

use crate::board::{Location, MarbleId};
use crate::cards::Card;
use crate::core::{PlayerId, TeamId};

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card left a hand for the discard pile.
    CardPlayed {
        /// Acting seat.
        player: PlayerId,
        /// Card played.
        card: Card,
    },
    /// A marble changed location, including release from Home.
    MarbleMoved {
        /// Marble moved.
        marble: MarbleId,
        /// Previous location.
        from: Location,
        /// New location.
        to: Location,
    },
    /// A marble was sent back to its Home slot.
    MarbleCaptured {
        /// Captured marble.
        marble: MarbleId,
        /// Home slot it returns to.
        home_slot: u8,
    },
    /// The turn passed to another seat.
    TurnAdvanced {
        /// Seat now acting.
        player: PlayerId,
    },
    /// All hands were dealt anew.
    HandsRedealt {
        /// Cards per hand.
        hand_size: usize,
    },
    /// A team finished; the game is over.
    GameWon {
        /// Winning team.
        team: TeamId,
    },
}

/// Receiver for engine events.
///
/// Sinks are fire-and-forget: they cannot fail and cannot influence the
/// engine.
pub trait EventSink: Send {
    /// Handle one event.
    fn emit(&mut self, event: &GameEvent);
}

/// Sink that records every event it receives.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

impl<F> EventSink for F
where
    F: FnMut(&GameEvent) + Send,
{
    fn emit(&mut self, event: &GameEvent) {
        self(event);
    }
}
