//! Captures and victory.
//!
//! A marble landing on a ring cell sends every marble of another seat on
//! that cell back Home. Teammates are not protected; only the mover's own
//! marbles are, and those can never share its cell anyway. Marbles in their
//! own safe zone cannot be reached.
//!
//! A team wins once every marble of every member stands in its safe zone.

use smallvec::SmallVec;
use tracing::debug;

use crate::core::{Cell, EngineResult, TeamId};

use super::marble::{Location, Marble, MarbleId};
use super::registry::MarbleRegistry;
use super::topology::Topology;

/// Marbles sent Home by one move.
pub type Captured = SmallVec<[Marble; 2]>;

/// Applies captures and detects the winning team.
#[derive(Clone, Copy, Debug)]
pub struct CaptureEvaluator<'a> {
    topology: &'a Topology,
}

impl<'a> CaptureEvaluator<'a> {
    /// Create an evaluator for a board.
    #[must_use]
    pub fn new(topology: &'a Topology) -> Self {
        Self { topology }
    }

    /// Marbles that `mover` would capture by landing on `cell`.
    pub fn victims(
        &self,
        registry: &MarbleRegistry,
        mover: MarbleId,
        cell: Cell,
    ) -> EngineResult<SmallVec<[MarbleId; 2]>> {
        let owner = registry.owner_of(mover)?;
        Ok(registry
            .iter()
            .filter(|m| m.id != mover && m.owner != owner)
            .filter(|m| m.location == Location::Track(cell))
            .map(|m| m.id)
            .collect())
    }

    /// Send every victim of `mover` on `cell` Home.
    ///
    /// Returns the captured marbles in their new Home state.
    pub fn apply_captures(
        &self,
        registry: &mut MarbleRegistry,
        mover: MarbleId,
        cell: Cell,
    ) -> EngineResult<Captured> {
        let mut captured = Captured::new();
        for victim in self.victims(registry, mover, cell)? {
            registry.commit(self.topology, victim, Location::Home)?;
            if let Some(marble) = registry.get(victim) {
                debug!(%mover, %victim, owner = %marble.owner, %cell, "marble captured");
                captured.push(*marble);
            }
        }
        Ok(captured)
    }

    /// The first team, in ascending ID order, whose members are all safe.
    #[must_use]
    pub fn winning_team(&self, registry: &MarbleRegistry) -> Option<TeamId> {
        self.topology
            .teams()
            .into_iter()
            .find(|&team| self.topology.members(team).all(|p| registry.all_safe(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, PlayerId};

    fn setup() -> (Topology, MarbleRegistry) {
        let topology = Topology::new(&GameConfig::standard()).unwrap();
        let registry = MarbleRegistry::new(&topology, 4);
        (topology, registry)
    }

    fn marble(registry: &MarbleRegistry, player: u8, slot: usize) -> MarbleId {
        registry.marbles_of(PlayerId::new(player))[slot]
    }

    #[test]
    fn test_captures_enemy() {
        let (topology, mut registry) = setup();
        let mover = marble(&registry, 0, 0);
        let enemy = marble(&registry, 1, 2);
        registry.commit(&topology, enemy, Location::Track(Cell(20))).unwrap();
        registry.commit(&topology, mover, Location::Track(Cell(20))).unwrap();

        let captured = CaptureEvaluator::new(&topology)
            .apply_captures(&mut registry, mover, Cell(20))
            .unwrap();

        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].id, enemy);
        assert_eq!(captured[0].slot, 2);
        assert_eq!(registry.location(enemy), Ok(Location::Home));
        assert_eq!(registry.location(mover), Ok(Location::Track(Cell(20))));
    }

    #[test]
    fn test_teammates_are_not_protected() {
        let (topology, mut registry) = setup();
        let mover = marble(&registry, 0, 0);
        let teammate = marble(&registry, 2, 0);
        registry.commit(&topology, teammate, Location::Track(Cell(25))).unwrap();
        registry.commit(&topology, mover, Location::Track(Cell(25))).unwrap();

        let captured = CaptureEvaluator::new(&topology)
            .apply_captures(&mut registry, mover, Cell(25))
            .unwrap();

        assert_eq!(captured.len(), 1);
        assert_eq!(registry.location(teammate), Ok(Location::Home));
    }

    #[test]
    fn test_no_capture_elsewhere() {
        let (topology, mut registry) = setup();
        let mover = marble(&registry, 0, 0);
        let enemy = marble(&registry, 1, 0);
        registry.commit(&topology, enemy, Location::Track(Cell(21))).unwrap();
        registry.commit(&topology, mover, Location::Track(Cell(20))).unwrap();

        let evaluator = CaptureEvaluator::new(&topology);
        assert!(evaluator.victims(&registry, mover, Cell(20)).unwrap().is_empty());
    }

    #[test]
    fn test_win_requires_whole_team() {
        let (topology, mut registry) = setup();
        let evaluator = CaptureEvaluator::new(&topology);

        for (slot, cell) in (46..=49).enumerate() {
            let id = marble(&registry, 0, slot);
            registry.commit(&topology, id, Location::Safe(Cell(cell))).unwrap();
        }
        assert_eq!(evaluator.winning_team(&registry), None);

        for (slot, cell) in (13..=16).enumerate() {
            let id = marble(&registry, 2, slot);
            registry.commit(&topology, id, Location::Safe(Cell(cell))).unwrap();
        }
        assert_eq!(evaluator.winning_team(&registry), Some(TeamId(0)));
    }
}
