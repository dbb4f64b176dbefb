//! What a strategy is allowed to see, and the moves it may propose.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{CaptureEvaluator, Location, MarbleId, MarbleRegistry, MovementResolver, Topology};
use crate::cards::{Card, CardRules};
use crate::core::{Cell, PlayerId};
use crate::turn::TurnState;

/// A move proposed for a played card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveIntent {
    /// Move a marble on the board by the card's steps.
    Advance {
        /// Marble to move.
        marble: MarbleId,
    },
    /// Bring a Home marble onto its base.
    Release {
        /// Marble to release.
        marble: MarbleId,
    },
}

impl MoveIntent {
    /// The marble this intent moves.
    #[must_use]
    pub fn marble(self) -> MarbleId {
        match self {
            MoveIntent::Advance { marble } | MoveIntent::Release { marble } => marble,
        }
    }
}

/// A legal intent with its outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalMove {
    /// The intent.
    pub intent: MoveIntent,
    /// Location before the move.
    pub from: Location,
    /// Location after the move.
    pub to: Location,
    /// Marbles of other seats that would be sent Home.
    pub captures: SmallVec<[MarbleId; 2]>,
}

impl LegalMove {
    /// Whether the move brings the marble into its safe zone.
    #[must_use]
    pub fn enters_safe_zone(&self) -> bool {
        !self.from.is_safe() && self.to.is_safe()
    }
}

/// Read-only view of the game for the acting seat.
#[derive(Clone, Copy, Debug)]
pub struct VisibleState<'a> {
    /// Acting seat.
    pub player: PlayerId,
    /// Its hand.
    pub hand: &'a [Card],
    /// Board geometry.
    pub topology: &'a Topology,
    /// Marble locations.
    pub registry: &'a MarbleRegistry,
    /// Step table.
    pub card_rules: &'a CardRules,
    /// Turn counters.
    pub turn: &'a TurnState,
    /// Whether the overshoot redirect is active.
    pub redirect_overshoot: bool,
}

impl<'a> VisibleState<'a> {
    /// Resolver configured like the engine's.
    #[must_use]
    pub fn resolver(&self) -> MovementResolver<'a> {
        MovementResolver::new(self.topology, self.registry)
            .with_overshoot_redirect(self.redirect_overshoot)
    }

    /// Signed steps for a card.
    #[must_use]
    pub fn steps_of(&self, card: Card) -> i32 {
        self.card_rules.steps_of(card)
    }

    /// The acting seat's base cell.
    #[must_use]
    pub fn base(&self) -> Cell {
        self.topology.base(self.player)
    }

    /// The acting seat's marble on its base, if any.
    #[must_use]
    pub fn marble_on_base(&self) -> Option<MarbleId> {
        self.registry.own_marble_at(self.player, self.base())
    }

    /// The acting seat's first Home marble, if any.
    #[must_use]
    pub fn home_marble(&self) -> Option<MarbleId> {
        self.registry.first_home(self.player)
    }

    /// Whether any of the acting seat's marbles is on the board.
    #[must_use]
    pub fn has_marble_out(&self) -> bool {
        self.registry
            .owned_by(self.player)
            .any(|m| !m.location.is_home())
    }

    /// Whether a marble can be released right now with `card`.
    #[must_use]
    pub fn can_release(&self, card: Card) -> bool {
        self.card_rules.releases(card.rank)
            && self.home_marble().is_some()
            && self.marble_on_base().is_none()
    }

    /// Whether `player` is on another team than the acting seat.
    #[must_use]
    pub fn is_opponent(&self, player: PlayerId) -> bool {
        self.topology.team_of(player) != self.topology.team_of(self.player)
    }

    /// Number of opposing marbles a move would capture.
    #[must_use]
    pub fn opponent_captures(&self, legal: &LegalMove) -> usize {
        legal
            .captures
            .iter()
            .filter_map(|&id| self.registry.owner_of(id).ok())
            .filter(|&owner| self.is_opponent(owner))
            .count()
    }

    /// Change in race progress a move brings.
    #[must_use]
    pub fn progress_gain(&self, legal: &LegalMove) -> i64 {
        let before = self.topology.progress(self.player, legal.from);
        let after = self.topology.progress(self.player, legal.to);
        i64::from(after) - i64::from(before)
    }

    /// Every intent that changes the board when `card` is played.
    ///
    /// Advances come first in marble order, then the release if any.
    #[must_use]
    pub fn legal_moves(&self, card: Card) -> Vec<LegalMove> {
        let resolver = self.resolver();
        let evaluator = CaptureEvaluator::new(self.topology);
        let steps = self.steps_of(card);
        let mut moves = Vec::new();

        for marble in self.registry.owned_by(self.player) {
            let Ok(Some(to)) = resolver.destination(marble.id, steps) else {
                continue;
            };
            moves.push(LegalMove {
                intent: MoveIntent::Advance { marble: marble.id },
                from: marble.location,
                to,
                captures: self.captures_at(&evaluator, marble.id, to),
            });
        }

        if self.can_release(card) {
            if let Some(marble) = self.home_marble() {
                let to = Location::Track(self.base());
                moves.push(LegalMove {
                    intent: MoveIntent::Release { marble },
                    from: Location::Home,
                    to,
                    captures: self.captures_at(&evaluator, marble, to),
                });
            }
        }

        moves
    }

    /// The legal move matching `intent` for `card`, if it is legal.
    #[must_use]
    pub fn find_legal(&self, card: Card, intent: MoveIntent) -> Option<LegalMove> {
        self.legal_moves(card)
            .into_iter()
            .find(|legal| legal.intent == intent)
    }

    fn captures_at(
        &self,
        evaluator: &CaptureEvaluator<'_>,
        marble: MarbleId,
        to: Location,
    ) -> SmallVec<[MarbleId; 2]> {
        match to {
            Location::Track(cell) => evaluator
                .victims(self.registry, marble, cell)
                .unwrap_or_default(),
            _ => SmallVec::new(),
        }
    }
}
