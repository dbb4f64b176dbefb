//! The game engine.
//!
//! `GameEngine` owns every piece of mutable state and runs the turn loop:
//!
//! 1. the scheduler names the current seat
//! 2. its strategy picks a card, which is discarded
//! 3. its strategy picks a move (or declines)
//! 4. the move is validated against the legal moves, committed, and
//!    captures and victory are evaluated
//! 5. the scheduler advances, redealing when a loop completes
//!
//! Each change is committed synchronously and then emitted as a
//! `GameEvent` to the history and to attached sinks. Nothing waits on a
//! sink.
//!
//! `play_turn` runs steps 1-5. Callers driving a seat by hand can use
//! `play_card`, `apply_move` and `next_turn` instead.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::board::{
    CaptureEvaluator, Captured, Location, MarbleId, MarbleRegistry, MovementResolver, Topology,
};
use crate::cards::{Card, DeckManager};
use crate::core::{Cell, EngineError, EngineResult, GameConfig, GameRng, PlayerId, PlayerMap, TeamId};
use crate::events::{EventSink, GameEvent};
use crate::strategy::{MoveIntent, Strategy, VisibleState};
use crate::turn::{Advance, TurnPhase, TurnScheduler, TurnState};

/// Result of applying a move intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A marble on the board moved.
    Moved {
        /// Marble moved.
        marble: MarbleId,
        /// Previous location.
        from: Location,
        /// New location.
        to: Location,
        /// Marbles sent Home.
        captured: Captured,
    },
    /// A Home marble was placed on its base.
    Released {
        /// Marble released.
        marble: MarbleId,
        /// Marbles sent Home.
        captured: Captured,
    },
    /// The intent was not a legal move; nothing changed.
    Illegal {
        /// Rejected intent.
        intent: MoveIntent,
    },
    /// The seat declined to move.
    Declined,
}

impl MoveOutcome {
    /// Whether the board changed.
    #[must_use]
    pub fn changed_board(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. } | MoveOutcome::Released { .. })
    }
}

/// Result of one `play_turn`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The seat had no cards and was skipped.
    Skipped {
        /// Skipped seat.
        player: PlayerId,
    },
    /// The seat played a card.
    Played {
        /// Acting seat.
        player: PlayerId,
        /// Card played.
        card: Card,
        /// What happened on the board.
        outcome: MoveOutcome,
    },
    /// The game was already over; nothing happened.
    GameOver,
}

/// Totals for a finished or abandoned game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Winning team, if the game finished.
    pub winner: Option<TeamId>,
    /// Turns taken, skipped turns included.
    pub turns: u32,
    /// Completed rounds.
    pub rounds: u32,
    /// Completed loops.
    pub loops: u32,
    /// Marbles captured.
    pub captures: u32,
}

/// Owns and drives one game.
pub struct GameEngine {
    config: GameConfig,
    topology: Topology,
    registry: MarbleRegistry,
    deck: DeckManager,
    scheduler: TurnScheduler,
    strategies: PlayerMap<Box<dyn Strategy>>,
    sinks: Vec<Box<dyn EventSink>>,
    history: Vector<GameEvent>,
    winner: Option<TeamId>,
    turns: u32,
    captures: u32,
    started: bool,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("turn", self.scheduler.state())
            .field("winner", &self.winner)
            .field("turns", &self.turns)
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    /// Create an engine. One strategy per seat, in seat order.
    pub fn new(config: GameConfig, strategies: Vec<Box<dyn Strategy>>, seed: u64) -> EngineResult<Self> {
        let topology = Topology::new(&config)?;
        let player_count = config.player_count();
        if strategies.len() != player_count {
            return Err(EngineError::StrategyCount {
                expected: player_count,
                actual: strategies.len(),
            });
        }

        let rng = GameRng::new(seed);
        let registry = MarbleRegistry::new(&topology, config.marbles_per_player);
        let deck = DeckManager::new(player_count, rng.for_context("deck"));
        let scheduler = TurnScheduler::new(player_count, config.schedule);

        Ok(Self {
            config,
            topology,
            registry,
            deck,
            scheduler,
            strategies: PlayerMap::from_vec(strategies),
            sinks: Vec::new(),
            history: Vector::new(),
            winner: None,
            turns: 0,
            captures: 0,
            started: false,
        })
    }

    /// Start from a prepared position instead of all marbles Home.
    pub fn with_layout(mut self, layout: &[(MarbleId, Location)]) -> EngineResult<Self> {
        self.registry =
            MarbleRegistry::from_layout(&self.topology, self.config.marbles_per_player, layout)?;
        Ok(self)
    }

    /// Attach a sink that receives every subsequent event.
    pub fn attach_sink(&mut self, sink: impl EventSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    // === Accessors ===

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Board geometry.
    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Marble locations.
    #[must_use]
    pub fn registry(&self) -> &MarbleRegistry {
        &self.registry
    }

    /// Deck, discard pile and hands.
    #[must_use]
    pub fn deck(&self) -> &DeckManager {
        &self.deck
    }

    /// Turn counters and phase.
    #[must_use]
    pub fn turn_state(&self) -> &TurnState {
        self.scheduler.state()
    }

    /// Seat currently acting.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.scheduler.current()
    }

    /// Every event emitted so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }

    /// Winning team, once decided.
    #[must_use]
    pub fn winner(&self) -> Option<TeamId> {
        self.winner
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.scheduler.is_game_over()
    }

    /// What `player` may see right now.
    #[must_use]
    pub fn visible_state(&self, player: PlayerId) -> VisibleState<'_> {
        Self::view(
            &self.config,
            &self.topology,
            &self.registry,
            &self.deck,
            &self.scheduler,
            player,
        )
    }

    fn view<'a>(
        config: &'a GameConfig,
        topology: &'a Topology,
        registry: &'a MarbleRegistry,
        deck: &'a DeckManager,
        scheduler: &'a TurnScheduler,
        player: PlayerId,
    ) -> VisibleState<'a> {
        VisibleState {
            player,
            hand: deck.hand(player),
            topology,
            registry,
            card_rules: &config.card_rules,
            turn: scheduler.state(),
            redirect_overshoot: config.redirect_overshoot,
        }
    }

    /// Target cell for `player` moving `steps` from `from`.
    #[must_use]
    pub fn resolve(&self, player: PlayerId, from: Cell, steps: i32) -> Cell {
        MovementResolver::new(&self.topology, &self.registry)
            .with_overshoot_redirect(self.config.redirect_overshoot)
            .resolve(player, from, steps)
    }

    // === Turn flow ===

    /// Build and shuffle the deck, deal opening hands and hand the turn to
    /// seat 0.
    ///
    /// A game starts once; a second call is `AlreadyStarted`.
    pub fn start(&mut self) -> EngineResult<()> {
        if self.started {
            return Err(EngineError::AlreadyStarted);
        }
        self.deck.build();
        self.deck.shuffle();
        let hand_size = self.scheduler.start();
        self.deal(hand_size)?;
        self.started = true;
        info!(players = self.config.player_count(), hand_size, "game started");
        self.check_win();
        Ok(())
    }

    /// Play one full turn for the current seat.
    pub fn play_turn(&mut self) -> EngineResult<TurnOutcome> {
        if !self.started {
            return Err(EngineError::NotStarted);
        }
        if self.is_game_over() {
            return Ok(TurnOutcome::GameOver);
        }

        let player = self.scheduler.current();
        self.turns += 1;

        if self.deck.hand(player).is_empty() {
            debug!(%player, "no cards, skipping");
            self.next_turn()?;
            return Ok(TurnOutcome::Skipped { player });
        }

        let view = Self::view(
            &self.config,
            &self.topology,
            &self.registry,
            &self.deck,
            &self.scheduler,
            player,
        );
        let chosen = self.strategies[player].choose_card(&view);
        let card = match chosen.filter(|c| view.hand.contains(c)) {
            Some(card) => card,
            None => {
                warn!(%player, ?chosen, "strategy chose no held card, playing the first");
                view.hand[0]
            }
        };
        self.play_card(player, card)?;

        let view = Self::view(
            &self.config,
            &self.topology,
            &self.registry,
            &self.deck,
            &self.scheduler,
            player,
        );
        let intent = self.strategies[player].choose_move(&view, card);
        let outcome = match intent {
            Some(intent) => self.apply_move(player, card, intent)?,
            None => {
                debug!(%player, %card, "move declined");
                MoveOutcome::Declined
            }
        };

        self.next_turn()?;
        Ok(TurnOutcome::Played {
            player,
            card,
            outcome,
        })
    }

    /// Discard `card` from the current seat's hand.
    pub fn play_card(&mut self, player: PlayerId, card: Card) -> EngineResult<()> {
        self.expect_current(player)?;
        let phase = self.scheduler.phase();
        if !matches!(phase, TurnPhase::AwaitingCardChoice | TurnPhase::RoundComplete) {
            return Err(EngineError::WrongPhase {
                action: "play a card",
                phase,
            });
        }

        self.deck.discard(player, card)?;
        self.scheduler.card_chosen();
        debug!(%player, %card, "card played");
        self.emit(GameEvent::CardPlayed { player, card });
        Ok(())
    }

    /// Carry out `intent` for the card just played.
    ///
    /// An intent that is not among the legal moves for `card` changes
    /// nothing and yields `MoveOutcome::Illegal`.
    pub fn apply_move(&mut self, player: PlayerId, card: Card, intent: MoveIntent) -> EngineResult<MoveOutcome> {
        self.expect_current(player)?;
        let phase = self.scheduler.phase();
        if phase != TurnPhase::AwaitingMove {
            return Err(EngineError::WrongPhase {
                action: "apply a move",
                phase,
            });
        }

        let Some(legal) = self.visible_state(player).find_legal(card, intent) else {
            warn!(%player, %card, ?intent, "illegal move intent ignored");
            return Ok(MoveOutcome::Illegal { intent });
        };

        let marble = intent.marble();
        let from = self.registry.commit(&self.topology, marble, legal.to)?;
        debug!(%player, %marble, ?from, to = ?legal.to, "marble moved");
        self.emit(GameEvent::MarbleMoved {
            marble,
            from,
            to: legal.to,
        });

        let captured = match legal.to {
            Location::Track(cell) => {
                CaptureEvaluator::new(&self.topology).apply_captures(&mut self.registry, marble, cell)?
            }
            _ => Captured::new(),
        };
        for victim in &captured {
            self.captures += 1;
            self.emit(GameEvent::MarbleCaptured {
                marble: victim.id,
                home_slot: victim.slot,
            });
        }

        self.check_win();

        Ok(match intent {
            MoveIntent::Advance { .. } => MoveOutcome::Moved {
                marble,
                from,
                to: legal.to,
                captured,
            },
            MoveIntent::Release { .. } => MoveOutcome::Released { marble, captured },
        })
    }

    /// Pass the turn on, redealing when a loop completes.
    ///
    /// Does nothing and returns `None` once the game is over.
    pub fn next_turn(&mut self) -> EngineResult<Option<Advance>> {
        if !self.started {
            return Err(EngineError::NotStarted);
        }
        let Some(advance) = self.scheduler.advance(self.deck.all_hands_empty()) else {
            return Ok(None);
        };
        if let Some(hand_size) = advance.redeal {
            self.deal(hand_size)?;
        }
        self.emit(GameEvent::TurnAdvanced {
            player: advance.next,
        });
        Ok(Some(advance))
    }

    /// Whether a team has all its marbles safe.
    ///
    /// The first time this holds the game ends and `GameWon` is emitted.
    pub fn check_win(&mut self) -> bool {
        let Some(team) = CaptureEvaluator::new(&self.topology).winning_team(&self.registry) else {
            return false;
        };
        if self.winner.is_none() {
            self.winner = Some(team);
            self.scheduler.end_game();
            info!(%team, turns = self.turns, "game won");
            self.emit(GameEvent::GameWon { team });
        }
        true
    }

    /// Play until the game ends or `max_turns` turns have been taken.
    ///
    /// Starts the game first if needed.
    pub fn run(&mut self, max_turns: u32) -> EngineResult<GameSummary> {
        if !self.started {
            self.start()?;
        }
        while !self.is_game_over() && self.turns < max_turns {
            self.play_turn()?;
        }
        if !self.is_game_over() {
            info!(max_turns, "turn limit reached without a winner");
        }
        Ok(self.summary())
    }

    /// Totals so far.
    #[must_use]
    pub fn summary(&self) -> GameSummary {
        let state = self.scheduler.state();
        GameSummary {
            winner: self.winner,
            turns: self.turns,
            rounds: state.round_count,
            loops: state.loop_count,
            captures: self.captures,
        }
    }

    // === Internals ===

    fn expect_current(&self, player: PlayerId) -> EngineResult<()> {
        if !self.started {
            return Err(EngineError::NotStarted);
        }
        let expected = self.scheduler.current();
        if player != expected {
            return Err(EngineError::NotCurrentPlayer {
                expected,
                actual: player,
            });
        }
        Ok(())
    }

    fn deal(&mut self, hand_size: usize) -> EngineResult<()> {
        if let Err(err) = self.deck.deal(hand_size) {
            error!(%err, "card supply exhausted while dealing");
            return Err(err);
        }
        self.scheduler.hands_dealt();
        self.emit(GameEvent::HandsRedealt { hand_size });
        Ok(())
    }

    fn emit(&mut self, event: GameEvent) {
        for sink in &mut self.sinks {
            sink.emit(&event);
        }
        self.history.push_back(event);
    }
}
