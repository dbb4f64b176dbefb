//! Step resolution.
//!
//! `MovementResolver::resolve` turns a signed step count into a target
//! cell. Steps are consumed one cell at a time because entry, skip and
//! block rules all depend on the cell being crossed.
//!
//! ## Forward
//!
//! - Inside the own safe zone: advance within the zone only, stopping at
//!   its last cell or before an own marble.
//! - From one to three cells short of the own zone, a move that would
//!   overshoot the entry is redirected into the zone (`overshoot_redirect`).
//! - On the ring: stepping from the approach cell enters the own zone
//!   unless its first cell is taken; stepping into a foreign zone jumps to
//!   the first ring cell past it for one step; an own marble blocks.
//! - A final position on an own marble or in a foreign zone rejects the
//!   whole move.
//!
//! ## Backward
//!
//! Refused inside the own safe zone. Otherwise steps back along the ring,
//! jumping over every safe zone, and stops one cell short of an own marble.
//!
//! Illegal moves are not errors: the resolver returns the starting cell.

use tracing::trace;

use crate::core::{Cell, EngineResult, PlayerId};

use super::marble::{Location, MarbleId};
use super::registry::MarbleRegistry;
use super::topology::Topology;

/// How many cells short of the safe zone the overshoot redirect applies.
const REDIRECT_REACH: u32 = 3;

/// Computes move targets against a board snapshot.
#[derive(Clone, Copy, Debug)]
pub struct MovementResolver<'a> {
    topology: &'a Topology,
    registry: &'a MarbleRegistry,
    redirect_overshoot: bool,
}

impl<'a> MovementResolver<'a> {
    /// Create a resolver with the overshoot redirect enabled.
    #[must_use]
    pub fn new(topology: &'a Topology, registry: &'a MarbleRegistry) -> Self {
        Self {
            topology,
            registry,
            redirect_overshoot: true,
        }
    }

    /// Enable or disable the overshoot redirect.
    #[must_use]
    pub fn with_overshoot_redirect(mut self, enabled: bool) -> Self {
        self.redirect_overshoot = enabled;
        self
    }

    /// Target cell for `player` moving `steps` from `from`.
    ///
    /// Returns `from` unchanged when the move is illegal or `steps` is 0.
    /// The marble standing on `from` is the one moving and never blocks.
    #[must_use]
    pub fn resolve(&self, player: PlayerId, from: Cell, steps: i32) -> Cell {
        let target = match steps {
            0 => from,
            s if s > 0 => self.forward(player, from, s.unsigned_abs()),
            s => self.backward(player, from, s.unsigned_abs()),
        };
        trace!(%player, %from, steps, %target, "resolved move");
        target
    }

    /// Where `marble` ends up after `steps`, or `None` if it cannot move.
    ///
    /// Home marbles never move by steps; they are released instead.
    pub fn destination(&self, marble: MarbleId, steps: i32) -> EngineResult<Option<Location>> {
        let player = self.registry.owner_of(marble)?;
        let Some(from) = self.registry.location(marble)?.cell() else {
            return Ok(None);
        };
        let target = self.resolve(player, from, steps);
        Ok((target != from).then(|| self.location_for(player, target)))
    }

    /// Classify a resolved cell for `player`.
    #[must_use]
    pub fn location_for(&self, player: PlayerId, cell: Cell) -> Location {
        if self.topology.is_own_safe_zone(player, cell) {
            Location::Safe(cell)
        } else {
            Location::Track(cell)
        }
    }

    /// Redirect into the safe zone for a marble about to overshoot it.
    ///
    /// Applies when the marble is one to three cells before the zone and
    /// `steps` is larger than that distance without being a multiple of
    /// it. The target is `distance` short of `steps` into the zone, clamped
    /// to its last cell, and must not hold an own marble.
    #[must_use]
    pub fn overshoot_redirect(&self, player: PlayerId, from: Cell, steps: u32) -> Option<Cell> {
        let zone = self.topology.safe_zone(player);
        let distance = u32::from(self.topology.forward_distance(from, zone.start));
        if !(1..=REDIRECT_REACH).contains(&distance) || steps <= distance || steps % distance == 0 {
            return None;
        }

        let offset = u16::try_from(steps - distance).unwrap_or(u16::MAX);
        let target = zone.cell_at(offset);
        if self.blocked(player, from, target) {
            trace!(%player, %target, "overshoot redirect blocked");
            return None;
        }
        trace!(%player, %from, steps, %target, "overshoot redirected into safe zone");
        Some(target)
    }

    fn blocked(&self, player: PlayerId, from: Cell, cell: Cell) -> bool {
        cell != from && self.registry.own_marble_at(player, cell).is_some()
    }

    fn forward(&self, player: PlayerId, from: Cell, steps: u32) -> Cell {
        let zone = self.topology.safe_zone(player);
        if zone.contains(from) {
            return self.advance_in_safe_zone(player, from, from, steps);
        }
        if self.redirect_overshoot {
            if let Some(target) = self.overshoot_redirect(player, from, steps) {
                return target;
            }
        }

        let mut pos = from;
        let mut remaining = steps;
        while remaining > 0 {
            let next = self.topology.next_cell(pos);

            if next == zone.start {
                if self.blocked(player, from, next) {
                    trace!(%player, entry = %next, "safe zone entry blocked");
                    break;
                }
                trace!(%player, entry = %next, "entering safe zone");
                pos = self.advance_in_safe_zone(player, from, next, remaining - 1);
                break;
            }

            if let Some(foreign) = self.topology.safe_zone_at(next) {
                let landing = self.topology.next_cell(foreign.end);
                if self.blocked(player, from, landing) {
                    trace!(%player, %landing, "skip landing blocked by own marble");
                    break;
                }
                trace!(%player, zone_owner = %foreign.owner, %landing, "skipping foreign safe zone");
                pos = landing;
                remaining -= 1;
                continue;
            }

            if self.blocked(player, from, next) {
                trace!(%player, cell = %next, "blocked by own marble");
                break;
            }
            trace!(%player, from = %pos, to = %next, "step");
            pos = next;
            remaining -= 1;
        }

        if self.blocked(player, from, pos) || self.topology.is_foreign_safe_zone(player, pos) {
            return from;
        }
        pos
    }

    /// Walk up to `steps` cells forward inside the own zone from `start`.
    fn advance_in_safe_zone(&self, player: PlayerId, from: Cell, start: Cell, steps: u32) -> Cell {
        let zone = self.topology.safe_zone(player);
        let mut pos = start;
        for _ in 0..steps {
            if pos == zone.end {
                break;
            }
            let next = Cell(pos.raw() + 1);
            if self.blocked(player, from, next) {
                trace!(%player, cell = %next, "safe zone cell occupied");
                break;
            }
            pos = next;
        }
        pos
    }

    fn backward(&self, player: PlayerId, from: Cell, steps: u32) -> Cell {
        if self.topology.is_own_safe_zone(player, from) {
            trace!(%player, %from, "no backward moves inside the safe zone");
            return from;
        }

        let mut pos = from;
        for _ in 0..steps {
            let mut next = self.topology.prev_cell(pos);
            if let Some(zone) = self.topology.safe_zone_at(next) {
                next = self.topology.prev_cell(zone.start);
                trace!(%player, zone_owner = %zone.owner, landing = %next, "skipping safe zone backward");
            }
            if self.blocked(player, from, next) {
                trace!(%player, cell = %next, "backward move blocked by own marble");
                break;
            }
            pos = next;
        }
        pos
    }
}
