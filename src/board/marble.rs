//! Marble identity and location.
//!
//! A marble's zone and position live in one `Location` value, so a Home
//! marble cannot carry a stale cell.

use serde::{Deserialize, Serialize};

use crate::core::{Cell, PlayerId};

/// Marble identifier, unique across all seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarbleId(pub u8);

impl MarbleId {
    /// Number of distinct IDs.
    pub const CAPACITY: usize = u8::MAX as usize + 1;

    /// Create a new marble ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for MarbleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Marble({})", self.0)
    }
}

/// Which area of the board a marble is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Off the board, waiting to be released.
    Home,
    /// On the shared ring.
    Track,
    /// In the owner's safe zone.
    Safe,
}

/// Zone plus cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Off the board.
    Home,
    /// On a ring cell.
    Track(Cell),
    /// On a cell of the owner's safe zone.
    Safe(Cell),
}

impl Location {
    /// The zone part.
    #[must_use]
    pub fn zone(self) -> Zone {
        match self {
            Location::Home => Zone::Home,
            Location::Track(_) => Zone::Track,
            Location::Safe(_) => Zone::Safe,
        }
    }

    /// The cell, unless Home.
    #[must_use]
    pub fn cell(self) -> Option<Cell> {
        match self {
            Location::Home => None,
            Location::Track(cell) | Location::Safe(cell) => Some(cell),
        }
    }

    /// Whether this is `Home`.
    #[must_use]
    pub fn is_home(self) -> bool {
        matches!(self, Location::Home)
    }

    /// Whether this is a safe-zone cell.
    #[must_use]
    pub fn is_safe(self) -> bool {
        matches!(self, Location::Safe(_))
    }
}

/// One marble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marble {
    /// Unique ID.
    pub id: MarbleId,
    /// Owning seat.
    pub owner: PlayerId,
    /// Home slot (0-based) the marble returns to when captured.
    pub slot: u8,
    /// Current location.
    pub location: Location,
}
