//! Seat decision-making.
//!
//! Every player, human adapter or AI, implements `Strategy`. The engine
//! hands it a `VisibleState` and gets back a card, then a `MoveIntent` or
//! a decline. Tiers differ only in how they rank the legal moves that
//! `VisibleState::legal_moves` enumerates; none of them reimplements the
//! movement rules.
//!
//! ## Built-in tiers
//!
//! | Name | Card choice | Move choice |
//! |------|-------------|-------------|
//! | `beginner` | first card | base marble, any marble, release |
//! | `normal` | release card or highest steps | release, first marble |
//! | `intermediate` | release with no marble out, then safe entry, capture, progress | safe entry, capture, first release, progress |
//! | `pro` | best scored (card, move) pair | planned move |
//! | `random` | uniform | uniform |

pub mod traits;
pub mod visible;
pub mod beginner;
pub mod normal;
pub mod intermediate;
pub mod pro;
pub mod random;
pub mod registry;

pub use traits::Strategy;
pub use visible::{LegalMove, MoveIntent, VisibleState};
pub use beginner::Beginner;
pub use normal::Normal;
pub use intermediate::Intermediate;
pub use pro::Pro;
pub use random::RandomStrategy;
pub use registry::{by_name, registered, StrategyFactory};
