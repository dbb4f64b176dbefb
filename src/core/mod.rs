//! Core engine types: seats, teams, configuration, RNG, errors.
//!
//! These are the building blocks the board, deck and scheduler share.
//! Geometry is configured via `GameConfig` rather than hard-coded.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap, TeamId};
pub use rng::GameRng;
pub use config::{Cell, GameConfig, ScheduleConfig, SeatConfig};
pub use error::{ConfigError, EngineError, EngineResult};
