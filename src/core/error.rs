//! Error types.
//!
//! Illegal moves are not errors: the movement resolver answers them with
//! the unchanged position. These enums cover invalid configuration, API
//! misuse by a caller, and invariant violations that indicate a bug.

use thiserror::Error;

use super::config::Cell;
use super::player::PlayerId;
use crate::board::{Location, MarbleId};
use crate::cards::Card;
use crate::turn::TurnPhase;

/// Rejected board or schedule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Ring has no cells.
    #[error("ring length must be positive")]
    EmptyRing,
    /// Not enough seats to play.
    #[error("at least 2 seats are required, got {count}")]
    TooFewSeats {
        /// Number of configured seats.
        count: usize,
    },
    /// Every seat belongs to the same team.
    #[error("at least 2 distinct teams are required")]
    SingleTeam,
    /// A configured cell lies outside `1..=ring_length`.
    #[error("{seat}: cell {cell} is outside the ring")]
    CellOutOfRange {
        /// Offending seat.
        seat: PlayerId,
        /// Offending cell.
        cell: Cell,
    },
    /// Two safe zones share a cell.
    #[error("safe zones of {first} and {second} overlap")]
    ZonesOverlap {
        /// First seat.
        first: PlayerId,
        /// Second seat.
        second: PlayerId,
    },
    /// A safe zone's approach or exit cell belongs to another zone.
    #[error("safe zone of {seat} touches the safe zone of {other}")]
    ZonesAdjacent {
        /// Seat whose zone borders another.
        seat: PlayerId,
        /// Seat owning the bordering zone.
        other: PlayerId,
    },
    /// A base cell lies inside a safe zone.
    #[error("{seat}: base {base} lies inside a safe zone")]
    BaseInSafeZone {
        /// Offending seat.
        seat: PlayerId,
        /// Offending base.
        base: Cell,
    },
    /// Marbles could never all fit in the safe zone.
    #[error("{marbles} marbles per player cannot fit a {zone_len}-cell safe zone")]
    ZoneTooSmall {
        /// Marbles per player.
        marbles: usize,
        /// Safe zone length.
        zone_len: u16,
    },
    /// Safe zones leave no track cells.
    #[error("safe zones cover the whole ring")]
    NoTrackCells,
    /// Hand sizes must be positive.
    #[error("hand sizes must be positive")]
    EmptyHand,
    /// The starting seat must rotate after a positive number of loops.
    #[error("rotation period must be positive")]
    ZeroRotation,
    /// A full deal needs more cards than the deck holds.
    #[error("dealing {hand_size} cards to {seats} seats needs more than {deck_size} cards")]
    HandsExceedDeck {
        /// Largest scheduled hand size.
        hand_size: usize,
        /// Number of seats.
        seats: usize,
        /// Cards in the deck.
        deck_size: usize,
    },
    /// More marbles than `MarbleId` can number.
    #[error("{seats} seats with {per_player} marbles each exceed {max} marbles")]
    TooManyMarbles {
        /// Number of seats.
        seats: usize,
        /// Marbles per seat.
        per_player: usize,
        /// Largest supported total.
        max: usize,
    },
}

/// Engine-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A marble ID not known to the registry.
    #[error("unknown marble {0}")]
    UnknownMarble(MarbleId),
    /// A seat acted out of turn.
    #[error("expected {expected} to act, got {actual}")]
    NotCurrentPlayer {
        /// Seat whose turn it is.
        expected: PlayerId,
        /// Seat that tried to act.
        actual: PlayerId,
    },
    /// A seat tried to play a card it does not hold.
    #[error("{player} does not hold {card}")]
    CardNotInHand {
        /// Acting seat.
        player: PlayerId,
        /// Requested card.
        card: Card,
    },
    /// Deck and discard pile are both empty while a card is needed.
    ///
    /// Cards only cycle between deck, hands and discard, so this means a
    /// card was lost.
    #[error("deck and discard pile are both empty")]
    ExhaustedSupply,
    /// A commit would break the zone/position invariant.
    #[error("marble {marble} cannot be placed at {location:?}")]
    InvalidPlacement {
        /// Marble being committed.
        marble: MarbleId,
        /// Rejected location.
        location: Location,
    },
    /// The number of strategies does not match the number of seats.
    #[error("expected {expected} strategies, got {actual}")]
    StrategyCount {
        /// Seats in the configuration.
        expected: usize,
        /// Strategies supplied.
        actual: usize,
    },
    /// A turn was requested before `start`.
    #[error("game has not been started")]
    NotStarted,
    /// `start` was called on a game already in progress.
    #[error("game has already been started")]
    AlreadyStarted,
    /// A turn step was requested in the wrong phase.
    #[error("cannot {action} during {phase:?}")]
    WrongPhase {
        /// Requested step.
        action: &'static str,
        /// Phase the game is in.
        phase: TurnPhase,
    },
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
