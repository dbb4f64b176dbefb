//! Authoritative marble state.
//!
//! The registry owns one `Marble` record per marble, indexed by
//! `MarbleId`, plus the per-seat list of owned IDs. `commit` is its only
//! mutator and refuses placements that would break the board invariants:
//!
//! - Track marbles stand on track cells, never in a safe zone
//! - Safe marbles stand in their owner's zone and only move forward there
//! - a seat never has two marbles on the same cell

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Cell, EngineError, EngineResult, PlayerId, PlayerMap};

use super::marble::{Location, Marble, MarbleId};
use super::topology::Topology;

/// Marble IDs owned by one seat.
pub type MarbleList = SmallVec<[MarbleId; 4]>;

/// Every marble's location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarbleRegistry {
    marbles: Vec<Marble>,
    by_player: PlayerMap<MarbleList>,
    bases: PlayerMap<Cell>,
}

impl MarbleRegistry {
    /// Create `marbles_per_player` Home marbles for every seat.
    ///
    /// IDs are assigned seat by seat: seat 0 owns `0..marbles_per_player`.
    #[must_use]
    pub fn new(topology: &Topology, marbles_per_player: usize) -> Self {
        let count = topology.player_count();
        debug_assert!(count * marbles_per_player <= MarbleId::CAPACITY);
        let mut marbles = Vec::with_capacity(count * marbles_per_player);
        let mut by_player = Vec::with_capacity(count);
        for player in PlayerId::all(count) {
            let mut owned = MarbleList::new();
            for slot in 0..marbles_per_player {
                let id = MarbleId((player.index() * marbles_per_player + slot) as u8);
                owned.push(id);
                marbles.push(Marble {
                    id,
                    owner: player,
                    slot: slot as u8,
                    location: Location::Home,
                });
            }
            by_player.push(owned);
        }

        Self {
            marbles,
            by_player: PlayerMap::from_vec(by_player),
            bases: PlayerMap::new(count, |player| topology.base(player)),
        }
    }

    /// Create a registry with some marbles already placed; the rest stay Home.
    ///
    /// Used to set up positions. Each placement must be valid on its own
    /// and no two marbles may share a cell.
    pub fn from_layout(
        topology: &Topology,
        marbles_per_player: usize,
        layout: &[(MarbleId, Location)],
    ) -> EngineResult<Self> {
        let mut registry = Self::new(topology, marbles_per_player);
        for &(id, location) in layout {
            let taken = location
                .cell()
                .and_then(|cell| registry.occupant(cell))
                .is_some_and(|other| other.id != id);
            if taken {
                return Err(EngineError::InvalidPlacement {
                    marble: id,
                    location,
                });
            }
            registry.commit(topology, id, location)?;
        }
        Ok(registry)
    }

    /// Total number of marbles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.marbles.len()
    }

    /// Whether there are no marbles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marbles.is_empty()
    }

    /// Look up a marble.
    #[must_use]
    pub fn get(&self, id: MarbleId) -> Option<&Marble> {
        self.marbles.get(id.index())
    }

    fn marble(&self, id: MarbleId) -> EngineResult<&Marble> {
        self.get(id).ok_or(EngineError::UnknownMarble(id))
    }

    /// Current location.
    pub fn location(&self, id: MarbleId) -> EngineResult<Location> {
        Ok(self.marble(id)?.location)
    }

    /// Current cell; a Home marble reports its owner's base.
    ///
    /// The base is only a reference point for distance calculations. A
    /// Home marble does not occupy it.
    pub fn position_of(&self, id: MarbleId) -> EngineResult<Cell> {
        let marble = self.marble(id)?;
        Ok(marble
            .location
            .cell()
            .unwrap_or(self.bases[marble.owner]))
    }

    /// Whether the marble is Home.
    pub fn is_home(&self, id: MarbleId) -> EngineResult<bool> {
        Ok(self.marble(id)?.location.is_home())
    }

    /// Owning seat.
    pub fn owner_of(&self, id: MarbleId) -> EngineResult<PlayerId> {
        Ok(self.marble(id)?.owner)
    }

    /// IDs owned by a seat, in slot order.
    #[must_use]
    pub fn marbles_of(&self, player: PlayerId) -> &[MarbleId] {
        &self.by_player[player]
    }

    /// All marbles, in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Marble> {
        self.marbles.iter()
    }

    /// A seat's marbles.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = &Marble> {
        self.by_player[player]
            .iter()
            .filter_map(move |&id| self.get(id))
    }

    /// The marble standing on `cell`, of any seat.
    #[must_use]
    pub fn occupant(&self, cell: Cell) -> Option<&Marble> {
        self.marbles.iter().find(|m| m.location.cell() == Some(cell))
    }

    /// The seat's own marble standing on `cell`.
    #[must_use]
    pub fn own_marble_at(&self, player: PlayerId, cell: Cell) -> Option<MarbleId> {
        self.owned_by(player)
            .find(|m| m.location.cell() == Some(cell))
            .map(|m| m.id)
    }

    /// The seat's first marble still at Home.
    #[must_use]
    pub fn first_home(&self, player: PlayerId) -> Option<MarbleId> {
        self.owned_by(player)
            .find(|m| m.location.is_home())
            .map(|m| m.id)
    }

    /// Whether every marble of the seat is in its safe zone.
    #[must_use]
    pub fn all_safe(&self, player: PlayerId) -> bool {
        self.owned_by(player).all(|m| m.location.is_safe())
    }

    /// Place a marble, returning its previous location.
    pub(crate) fn commit(
        &mut self,
        topology: &Topology,
        id: MarbleId,
        location: Location,
    ) -> EngineResult<Location> {
        let marble = *self.marble(id)?;
        let rejected = EngineError::InvalidPlacement {
            marble: id,
            location,
        };

        let allowed = match (marble.location, location) {
            (Location::Safe(_), Location::Home | Location::Track(_)) => false,
            (Location::Safe(prev), Location::Safe(cell)) => {
                cell >= prev && topology.is_own_safe_zone(marble.owner, cell)
            }
            (_, Location::Safe(cell)) => topology.is_own_safe_zone(marble.owner, cell),
            (_, Location::Track(cell)) => topology.is_track_cell(cell),
            (_, Location::Home) => true,
        };
        let collides = location.cell().is_some_and(|cell| {
            self.own_marble_at(marble.owner, cell)
                .is_some_and(|other| other != id)
        });
        if !allowed || collides {
            return Err(rejected);
        }

        self.marbles[id.index()].location = location;
        Ok(marble.location)
    }
}
