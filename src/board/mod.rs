//! The board: geometry, marbles and the rules that move them.
//!
//! ## Layers
//!
//! - `Topology`: immutable geometry built from `GameConfig`
//! - `MarbleRegistry`: the single owner of marble locations
//! - `MovementResolver`: steps to target cell, read-only
//! - `CaptureEvaluator`: captures after a move, and win detection
//!
//! Resolver and evaluator borrow the topology and registry rather than
//! owning them, so they are cheap to build per move.

pub mod topology;
pub mod marble;
pub mod registry;
pub mod movement;
pub mod capture;

pub use topology::{SafeZone, Topology};
pub use marble::{Location, Marble, MarbleId, Zone};
pub use registry::{MarbleList, MarbleRegistry};
pub use movement::MovementResolver;
pub use capture::{CaptureEvaluator, Captured};
