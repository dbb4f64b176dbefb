//! Turn state and the scheduler that advances it.
//!
//! `TurnState` is a plain value owned by one `TurnScheduler`; there is no
//! global turn state.

pub mod state;
pub mod scheduler;

pub use state::{TurnPhase, TurnState};
pub use scheduler::{Advance, TurnScheduler};
