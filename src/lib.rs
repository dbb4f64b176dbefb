//! # jackaroo
//!
//! Rules engine for a four-player, team-based marble race (an
//! Aggravation/Jackaroo variant) played with a standard 52-card deck.
//!
//! ## Design Principles
//!
//! 1. **Geometry as data**: ring length, bases, safe zones, teams and the
//!    card-to-steps table all live in `GameConfig`. Nothing in the rules
//!    code names a concrete cell.
//!
//! 2. **Single writer**: marble state is mutated only through the
//!    registry's `commit`, called by the engine after the movement
//!    resolver and capture evaluator have validated the change.
//!
//! 3. **Illegal is not exceptional**: a move the rules reject resolves to
//!    the unchanged position. Errors are reserved for API misuse and
//!    broken invariants.
//!
//! 4. **Rendering is advisory**: the engine commits state synchronously
//!    and emits `GameEvent`s. Sinks may animate however they like; the
//!    engine never waits on them.
//!
//! ## Modules
//!
//! - `core`: player/team IDs, configuration, RNG, errors
//! - `board`: topology, marbles, registry, movement, captures
//! - `cards`: cards, the step table, deck and discard pile
//! - `events`: notifications for renderers and logs
//! - `turn`: turn state and the round/loop scheduler
//! - `strategy`: the `Strategy` capability and the built-in AI tiers
//! - `engine`: `GameEngine`, tying everything together

pub mod core;
pub mod board;
pub mod cards;
pub mod events;
pub mod turn;
pub mod strategy;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Cell, ConfigError, EngineError, GameConfig, GameRng, PlayerId, PlayerMap,
    ScheduleConfig, SeatConfig, TeamId,
};

pub use crate::board::{
    CaptureEvaluator, Location, Marble, MarbleId, MarbleRegistry, MovementResolver, SafeZone,
    Topology, Zone,
};

pub use crate::cards::{Card, CardRules, DeckManager, Rank, Suit};

pub use crate::events::{EventLog, EventSink, GameEvent};

pub use crate::turn::{Advance, TurnPhase, TurnScheduler, TurnState};

pub use crate::strategy::{
    Beginner, Intermediate, MoveIntent, Normal, Pro, RandomStrategy, Strategy, StrategyFactory,
    VisibleState,
};

pub use crate::engine::{GameEngine, GameSummary, MoveOutcome, TurnOutcome};
