//! Game configuration types.
//!
//! The board geometry, team pairing, card table and deal schedule are
//! data supplied at startup:
//! - `SeatConfig`: one seat's base cell, safe-zone start and team
//! - `ScheduleConfig`: hand sizes and starting-seat rotation
//! - `GameConfig`: combines all configuration
//!
//! `GameConfig::standard()` is the 67-cell reference board. Smaller boards
//! are built the same way and are convenient in tests.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::{PlayerId, TeamId};
use crate::board::MarbleId;
use crate::cards::{Card, CardRules};

/// A cell in the shared numbering space.
///
/// Ring cells and safe-zone cells share one 1-based numbering; which
/// cells belong to a safe zone is decided by the seats' configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell(pub u16);

impl Cell {
    /// Create a new cell.
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Get the raw cell index.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// Configuration for a single seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    /// Ring cell where marbles leaving Home appear.
    pub base: Cell,

    /// First cell of this seat's safe zone. The zone covers
    /// `GameConfig::safe_zone_len` consecutive cells from here, and is
    /// entered from the ring cell just before it.
    pub safe_zone_start: Cell,

    /// Victory partnership.
    pub team: TeamId,
}

impl SeatConfig {
    /// Create a new seat configuration.
    #[must_use]
    pub const fn new(base: Cell, safe_zone_start: Cell, team: TeamId) -> Self {
        Self {
            base,
            safe_zone_start,
            team,
        }
    }
}

/// Deal sizes and starting-seat rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Cards per hand for the first loops.
    pub initial_hand_size: usize,

    /// Cards per hand once `expand_from_loop` loops have completed.
    pub expanded_hand_size: usize,

    /// Loop count from which `expanded_hand_size` applies.
    pub expand_from_loop: u32,

    /// The starting seat moves on after every this many loops.
    pub rotate_every_loops: u32,
}

impl ScheduleConfig {
    /// Hand size dealt after `loop_count` completed loops.
    ///
    /// ```
    /// use jackaroo::core::ScheduleConfig;
    ///
    /// let schedule = ScheduleConfig::default();
    /// assert_eq!(schedule.hand_size_for_loop(0), 4);
    /// assert_eq!(schedule.hand_size_for_loop(1), 4);
    /// assert_eq!(schedule.hand_size_for_loop(2), 5);
    /// ```
    #[must_use]
    pub fn hand_size_for_loop(&self, loop_count: u32) -> usize {
        if loop_count >= self.expand_from_loop {
            self.expanded_hand_size
        } else {
            self.initial_hand_size
        }
    }

    /// Whether completing loop number `loop_count` rotates the starting seat.
    #[must_use]
    pub fn rotates_after(&self, loop_count: u32) -> bool {
        self.rotate_every_loops > 0 && loop_count % self.rotate_every_loops == 0
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            initial_hand_size: 4,
            expanded_hand_size: 5,
            expand_from_loop: 2,
            rotate_every_loops: 3,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of cells in the shared numbering space, safe zones included.
    pub ring_length: u16,

    /// Cells per safe zone.
    pub safe_zone_len: u16,

    /// Marbles owned by each seat.
    pub marbles_per_player: usize,

    /// Seats in turn order.
    pub seats: Vec<SeatConfig>,

    /// Card value to step count table and release ranks.
    pub card_rules: CardRules,

    /// Deal schedule.
    pub schedule: ScheduleConfig,

    /// Enables the approach-overshoot redirect into the safe zone.
    pub redirect_overshoot: bool,
}

impl GameConfig {
    /// Create a configuration for a ring of `ring_length` cells with no seats.
    #[must_use]
    pub fn new(ring_length: u16) -> Self {
        Self {
            ring_length,
            safe_zone_len: 4,
            marbles_per_player: 4,
            seats: Vec::new(),
            card_rules: CardRules::standard(),
            schedule: ScheduleConfig::default(),
            redirect_overshoot: true,
        }
    }

    /// The 67-cell reference board with four seats in two teams.
    ///
    /// | Seat | Base | Safe zone | Team |
    /// |------|------|-----------|------|
    /// | 0    | 51   | 46-49     | 0    |
    /// | 1    | 1    | 63-66     | 1    |
    /// | 2    | 18   | 13-16     | 0    |
    /// | 3    | 35   | 30-33     | 1    |
    #[must_use]
    pub fn standard() -> Self {
        Self::new(67)
            .with_seat(SeatConfig::new(Cell(51), Cell(46), TeamId(0)))
            .with_seat(SeatConfig::new(Cell(1), Cell(63), TeamId(1)))
            .with_seat(SeatConfig::new(Cell(18), Cell(13), TeamId(0)))
            .with_seat(SeatConfig::new(Cell(35), Cell(30), TeamId(1)))
    }

    /// Add a seat.
    #[must_use]
    pub fn with_seat(mut self, seat: SeatConfig) -> Self {
        self.seats.push(seat);
        self
    }

    /// Set the safe zone length.
    #[must_use]
    pub fn with_safe_zone_len(mut self, len: u16) -> Self {
        self.safe_zone_len = len;
        self
    }

    /// Set the number of marbles per seat.
    #[must_use]
    pub fn with_marbles_per_player(mut self, count: usize) -> Self {
        self.marbles_per_player = count;
        self
    }

    /// Replace the card rules.
    #[must_use]
    pub fn with_card_rules(mut self, rules: CardRules) -> Self {
        self.card_rules = rules;
        self
    }

    /// Replace the deal schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }

    /// Enable or disable the approach-overshoot redirect.
    #[must_use]
    pub fn with_overshoot_redirect(mut self, enabled: bool) -> Self {
        self.redirect_overshoot = enabled;
        self
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Seat configuration by ID.
    #[must_use]
    pub fn seat(&self, player: PlayerId) -> Option<&SeatConfig> {
        self.seats.get(player.index())
    }

    /// Check the configuration for geometric and scheduling consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ring_length == 0 {
            return Err(ConfigError::EmptyRing);
        }
        if self.seats.len() < 2 || self.seats.len() > 255 {
            return Err(ConfigError::TooFewSeats {
                count: self.seats.len(),
            });
        }
        let first_team = self.seats[0].team;
        if self.seats.iter().all(|s| s.team == first_team) {
            return Err(ConfigError::SingleTeam);
        }
        if self.safe_zone_len == 0 || self.marbles_per_player > usize::from(self.safe_zone_len) {
            return Err(ConfigError::ZoneTooSmall {
                marbles: self.marbles_per_player,
                zone_len: self.safe_zone_len,
            });
        }
        if self.schedule.initial_hand_size == 0 || self.schedule.expanded_hand_size == 0 {
            return Err(ConfigError::EmptyHand);
        }
        if self.schedule.rotate_every_loops == 0 {
            return Err(ConfigError::ZeroRotation);
        }

        let largest_hand = self
            .schedule
            .initial_hand_size
            .max(self.schedule.expanded_hand_size);
        if largest_hand.saturating_mul(self.seats.len()) > Card::DECK_SIZE {
            return Err(ConfigError::HandsExceedDeck {
                hand_size: largest_hand,
                seats: self.seats.len(),
                deck_size: Card::DECK_SIZE,
            });
        }
        if self.marbles_per_player.saturating_mul(self.seats.len()) > MarbleId::CAPACITY {
            return Err(ConfigError::TooManyMarbles {
                seats: self.seats.len(),
                per_player: self.marbles_per_player,
                max: MarbleId::CAPACITY,
            });
        }

        let in_range = |cell: u16| (1..=self.ring_length).contains(&cell);
        let wrap_prev = |cell: u16| if cell <= 1 { self.ring_length } else { cell - 1 };
        let wrap_next = |cell: u16| if cell >= self.ring_length { 1 } else { cell + 1 };

        let mut zones = Vec::with_capacity(self.seats.len());
        for (index, seat) in self.seats.iter().enumerate() {
            let player = PlayerId::new(index as u8);
            if !in_range(seat.base.raw()) {
                return Err(ConfigError::CellOutOfRange {
                    seat: player,
                    cell: seat.base,
                });
            }
            let start = seat.safe_zone_start.raw();
            let Some(end) = start.checked_add(self.safe_zone_len - 1) else {
                return Err(ConfigError::CellOutOfRange {
                    seat: player,
                    cell: seat.safe_zone_start,
                });
            };
            if !in_range(start) || !in_range(end) {
                return Err(ConfigError::CellOutOfRange {
                    seat: player,
                    cell: Cell(end),
                });
            }
            zones.push((start, end));
        }

        for (i, seat) in self.seats.iter().enumerate() {
            let player = PlayerId::new(i as u8);
            let (start, end) = zones[i];
            let approach = wrap_prev(start);
            let exit = wrap_next(end);

            for (j, &(o_start, o_end)) in zones.iter().enumerate() {
                let other_player = PlayerId::new(j as u8);
                let inside = |cell: u16| (o_start..=o_end).contains(&cell);

                if inside(seat.base.raw()) {
                    return Err(ConfigError::BaseInSafeZone {
                        seat: player,
                        base: seat.base,
                    });
                }
                if i == j {
                    continue;
                }
                if i < j && start <= o_end && o_start <= end {
                    return Err(ConfigError::ZonesOverlap {
                        first: player,
                        second: other_player,
                    });
                }
                if inside(approach) || inside(exit) {
                    return Err(ConfigError::ZonesAdjacent {
                        seat: player,
                        other: other_player,
                    });
                }
            }
        }

        let zone_cells = usize::from(self.safe_zone_len) * self.seats.len();
        if zone_cells >= usize::from(self.ring_length) {
            return Err(ConfigError::NoTrackCells);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 30-cell board with four 2-cell zones, handy for hand-checked cases.
    fn small_board() -> GameConfig {
        GameConfig::new(30)
            .with_safe_zone_len(2)
            .with_marbles_per_player(2)
            .with_seat(SeatConfig::new(Cell(3), Cell(28), TeamId(0)))
            .with_seat(SeatConfig::new(Cell(10), Cell(6), TeamId(1)))
            .with_seat(SeatConfig::new(Cell(17), Cell(13), TeamId(0)))
            .with_seat(SeatConfig::new(Cell(24), Cell(20), TeamId(1)))
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(format!("{}", Cell::new(12)), "Cell(12)");
        assert_eq!(Cell::new(12).raw(), 12);
    }

    #[test]
    fn test_standard_is_valid() {
        let config = GameConfig::standard();
        assert_eq!(config.player_count(), 4);
        assert_eq!(config.ring_length, 67);
        assert_eq!(config.seat(PlayerId::new(1)).map(|s| s.base), Some(Cell(1)));
        assert!(config.seat(PlayerId::new(4)).is_none());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_small_board_is_valid() {
        assert_eq!(small_board().validate(), Ok(()));
    }

    #[test]
    fn test_schedule_defaults() {
        let schedule = ScheduleConfig::default();
        assert_eq!(schedule.hand_size_for_loop(0), 4);
        assert_eq!(schedule.hand_size_for_loop(7), 5);
        assert!(!schedule.rotates_after(1));
        assert!(schedule.rotates_after(3));
        assert!(schedule.rotates_after(6));
    }

    #[test]
    fn test_rejects_too_few_seats() {
        let config = GameConfig::new(67).with_seat(SeatConfig::new(Cell(1), Cell(63), TeamId(0)));
        assert_eq!(config.validate(), Err(ConfigError::TooFewSeats { count: 1 }));
    }

    #[test]
    fn test_rejects_single_team() {
        let mut config = GameConfig::standard();
        for seat in &mut config.seats {
            seat.team = TeamId(0);
        }
        assert_eq!(config.validate(), Err(ConfigError::SingleTeam));
    }

    #[test]
    fn test_rejects_base_in_zone() {
        let mut config = GameConfig::standard();
        config.seats[2].base = Cell(47);
        assert_eq!(
            config.validate(),
            Err(ConfigError::BaseInSafeZone {
                seat: PlayerId::new(2),
                base: Cell(47)
            })
        );
    }

    #[test]
    fn test_rejects_overlapping_zones() {
        let mut config = GameConfig::standard();
        config.seats[1].safe_zone_start = Cell(47);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZonesOverlap {
                first: PlayerId::new(0),
                second: PlayerId::new(1)
            })
        );
    }

    #[test]
    fn test_rejects_adjacent_zones() {
        let mut config = GameConfig::standard();
        config.seats[1].safe_zone_start = Cell(50);
        config.seats[0].base = Cell(55);
        assert!(matches!(config.validate(), Err(ConfigError::ZonesAdjacent { .. })));
    }

    #[test]
    fn test_rejects_zone_past_ring_end() {
        let mut config = GameConfig::standard();
        config.seats[1].safe_zone_start = Cell(65);
        assert_eq!(
            config.validate(),
            Err(ConfigError::CellOutOfRange {
                seat: PlayerId::new(1),
                cell: Cell(68)
            })
        );
    }

    #[test]
    fn test_rejects_more_marbles_than_zone_cells() {
        let config = GameConfig::standard().with_marbles_per_player(5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZoneTooSmall {
                marbles: 5,
                zone_len: 4
            })
        );
    }

    #[test]
    fn test_rejects_zero_rotation() {
        let schedule = ScheduleConfig {
            rotate_every_loops: 0,
            ..ScheduleConfig::default()
        };
        let config = GameConfig::standard().with_schedule(schedule);
        assert_eq!(config.validate(), Err(ConfigError::ZeroRotation));
    }

    #[test]
    fn test_rejects_zone_end_beyond_cell_numbering() {
        let mut config = GameConfig::standard();
        config.ring_length = u16::MAX;
        config.seats[1].safe_zone_start = Cell(65534);
        assert_eq!(
            config.validate(),
            Err(ConfigError::CellOutOfRange {
                seat: PlayerId::new(1),
                cell: Cell(65534)
            })
        );
    }

    #[test]
    fn test_rejects_hands_larger_than_deck() {
        let schedule = ScheduleConfig {
            initial_hand_size: 14,
            ..ScheduleConfig::default()
        };
        let config = GameConfig::standard().with_schedule(schedule);
        assert_eq!(
            config.validate(),
            Err(ConfigError::HandsExceedDeck {
                hand_size: 14,
                seats: 4,
                deck_size: 52
            })
        );

        // Thirteen each uses the whole deck.
        let schedule = ScheduleConfig {
            initial_hand_size: 13,
            expanded_hand_size: 13,
            ..ScheduleConfig::default()
        };
        assert_eq!(GameConfig::standard().with_schedule(schedule).validate(), Ok(()));
    }

    #[test]
    fn test_rejects_more_marbles_than_ids() {
        let config = GameConfig::standard()
            .with_safe_zone_len(65)
            .with_marbles_per_player(65);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyMarbles {
                seats: 4,
                per_player: 65,
                max: 256
            })
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = small_board().with_overshoot_redirect(false);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
