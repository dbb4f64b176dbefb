//! Static board geometry.
//!
//! Ring cells and safe-zone cells share one 1-based numbering space of
//! `ring_length` cells. A safe zone is a run of consecutive cells inside
//! that space; only its owner may stand on it, and only after entering from
//! the approach cell directly before it. Everyone else skips over it.
//!
//! `Topology` is built once from a validated `GameConfig` and never
//! mutated afterwards.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Cell, ConfigError, GameConfig, PlayerId, PlayerMap, TeamId};

use super::marble::Location;

/// A seat's private run of cells at the end of its race.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SafeZone {
    /// Seat allowed to enter.
    pub owner: PlayerId,
    /// First cell, reached from the approach cell.
    pub start: Cell,
    /// Last cell; marbles never move past it.
    pub end: Cell,
}

impl SafeZone {
    /// Whether `cell` lies in this zone.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        (self.start..=self.end).contains(&cell)
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> u16 {
        self.end.raw() - self.start.raw() + 1
    }

    /// Always false; zones have at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// 0-based offset of `cell` from `start`, if inside.
    #[must_use]
    pub fn offset_of(&self, cell: Cell) -> Option<u16> {
        self.contains(cell).then(|| cell.raw() - self.start.raw())
    }

    /// Cell at `offset` from `start`, clamped to `end`.
    #[must_use]
    pub fn cell_at(&self, offset: u16) -> Cell {
        Cell(self.start.raw() + offset.min(self.len() - 1))
    }
}

/// Board geometry derived from `GameConfig`.
#[derive(Clone, Debug)]
pub struct Topology {
    ring_length: u16,
    bases: PlayerMap<Cell>,
    zones: PlayerMap<SafeZone>,
    teams: PlayerMap<TeamId>,
    /// Owner of every safe-zone cell.
    zone_owner: FxHashMap<Cell, PlayerId>,
}

impl Topology {
    /// Build the geometry, validating the configuration first.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let count = config.player_count();
        let seat = |p: PlayerId| config.seats[p.index()];
        let bases = PlayerMap::new(count, |p| seat(p).base);
        let teams = PlayerMap::new(count, |p| seat(p).team);
        let zones = PlayerMap::new(count, |p| {
            let start = seat(p).safe_zone_start;
            SafeZone {
                owner: p,
                start,
                end: Cell(start.raw() + config.safe_zone_len - 1),
            }
        });

        let mut zone_owner = FxHashMap::default();
        for (player, zone) in zones.iter() {
            for raw in zone.start.raw()..=zone.end.raw() {
                zone_owner.insert(Cell(raw), player);
            }
        }

        Ok(Self {
            ring_length: config.ring_length,
            bases,
            zones,
            teams,
            zone_owner,
        })
    }

    /// Cells in the shared numbering space.
    #[must_use]
    pub fn ring_length(&self) -> u16 {
        self.ring_length
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.bases.player_count()
    }

    /// Ring cell where a seat's released marbles appear.
    #[must_use]
    pub fn base(&self, player: PlayerId) -> Cell {
        self.bases[player]
    }

    /// A seat's safe zone.
    #[must_use]
    pub fn safe_zone(&self, player: PlayerId) -> SafeZone {
        self.zones[player]
    }

    /// Ring cell from which a seat enters its safe zone.
    #[must_use]
    pub fn approach(&self, player: PlayerId) -> Cell {
        self.prev_cell(self.zones[player].start)
    }

    /// Whether `cell` is in `player`'s own safe zone.
    #[must_use]
    pub fn is_own_safe_zone(&self, player: PlayerId, cell: Cell) -> bool {
        self.zones[player].contains(cell)
    }

    /// Whether `cell` is in some other seat's safe zone.
    #[must_use]
    pub fn is_foreign_safe_zone(&self, player: PlayerId, cell: Cell) -> bool {
        self.zone_owner.get(&cell).is_some_and(|&owner| owner != player)
    }

    /// The safe zone containing `cell`, if any.
    #[must_use]
    pub fn safe_zone_at(&self, cell: Cell) -> Option<SafeZone> {
        self.zone_owner.get(&cell).map(|&owner| self.zones[owner])
    }

    /// Whether `cell` is a regular track cell (in range, not in any zone).
    #[must_use]
    pub fn is_track_cell(&self, cell: Cell) -> bool {
        (1..=self.ring_length).contains(&cell.raw()) && !self.zone_owner.contains_key(&cell)
    }

    /// The next cell forward, wrapping from the last cell to cell 1.
    #[must_use]
    pub fn next_cell(&self, cell: Cell) -> Cell {
        if cell.raw() >= self.ring_length {
            Cell(1)
        } else {
            Cell(cell.raw() + 1)
        }
    }

    /// The previous cell, wrapping from cell 1 to the last cell.
    #[must_use]
    pub fn prev_cell(&self, cell: Cell) -> Cell {
        if cell.raw() <= 1 {
            Cell(self.ring_length)
        } else {
            Cell(cell.raw() - 1)
        }
    }

    /// Forward distance from `from` to `to` in the numbering space.
    #[must_use]
    pub fn forward_distance(&self, from: Cell, to: Cell) -> u16 {
        let n = u32::from(self.ring_length);
        ((u32::from(to.raw()) + n - u32::from(from.raw())) % n) as u16
    }

    /// A seat's team.
    #[must_use]
    pub fn team_of(&self, player: PlayerId) -> TeamId {
        self.teams[player]
    }

    /// Other seats on the same team.
    pub fn teammates(&self, player: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        let team = self.teams[player];
        self.teams
            .iter()
            .filter(move |&(p, &t)| p != player && t == team)
            .map(|(p, _)| p)
    }

    /// Seats on `team`, in seat order.
    pub fn members(&self, team: TeamId) -> impl Iterator<Item = PlayerId> + '_ {
        self.teams
            .iter()
            .filter(move |&(_, &t)| t == team)
            .map(|(p, _)| p)
    }

    /// Distinct teams, ascending.
    #[must_use]
    pub fn teams(&self) -> Vec<TeamId> {
        let mut teams: Vec<_> = self.teams.values().copied().collect();
        teams.sort_unstable();
        teams.dedup();
        teams
    }

    /// How far along its race a marble at `location` is.
    ///
    /// Home is 0, the base is 1, each ring cell forward adds one, and safe
    /// cells rank above every ring cell.
    #[must_use]
    pub fn progress(&self, player: PlayerId, location: Location) -> u32 {
        match location {
            Location::Home => 0,
            Location::Track(cell) => {
                1 + u32::from(self.forward_distance(self.bases[player], cell))
            }
            Location::Safe(cell) => {
                let offset = self.zones[player].offset_of(cell).unwrap_or(0);
                u32::from(self.ring_length) + 1 + u32::from(offset)
            }
        }
    }
}
