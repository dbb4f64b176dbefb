//! Property-based tests for movement, captures and card flow.

mod common;

use proptest::prelude::*;

use jackaroo::{CaptureEvaluator, Cell, Location, MarbleId, MarbleRegistry, MovementResolver, PlayerId};

/// Standard board has 67 cells, 16 of them in safe zones.
const TRACK_CELLS: usize = 51;

fn card_steps() -> impl Strategy<Value = i32> {
    prop_oneof![Just(-4), 1i32..=13]
}

fn track_cell(index: usize) -> Cell {
    let (topology, _) = common::standard_board();
    (1..=topology.ring_length())
        .map(Cell)
        .filter(|&c| topology.is_track_cell(c))
        .nth(index)
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// A resolved move lands on the track or in the mover's own zone.
    #[test]
    fn prop_never_lands_in_foreign_zone(
        seat in 0u8..4,
        from in 0..TRACK_CELLS,
        steps in card_steps(),
        redirect in any::<bool>(),
    ) {
        let (topology, registry) = common::standard_board();
        let player = PlayerId(seat);

        let resolver = MovementResolver::new(&topology, &registry).with_overshoot_redirect(redirect);
        let target = resolver.resolve(player, track_cell(from), steps);

        prop_assert!((1..=topology.ring_length()).contains(&target.raw()));
        prop_assert!(!topology.is_foreign_safe_zone(player, target));
        if steps < 0 {
            prop_assert!(topology.is_track_cell(target));
        }
    }

    /// Zero steps never move a marble.
    #[test]
    fn prop_zero_steps_is_identity(seat in 0u8..4, from in 1u16..=67) {
        let (topology, registry) = common::standard_board();
        let resolver = MovementResolver::new(&topology, &registry);
        prop_assert_eq!(resolver.resolve(PlayerId(seat), Cell(from), 0), Cell(from));
    }

    /// Inside the own zone marbles only move forward and never leave.
    #[test]
    fn prop_safe_zone_is_monotonic(seat in 0u8..4, offset in 0u16..4, steps in card_steps()) {
        let (topology, registry) = common::standard_board();
        let player = PlayerId(seat);
        let zone = topology.safe_zone(player);
        let from = zone.cell_at(offset);

        let target = MovementResolver::new(&topology, &registry).resolve(player, from, steps);
        prop_assert!(zone.contains(target));
        prop_assert!(target >= from);
    }

    /// A move never ends on a cell held by another of the mover's marbles.
    #[test]
    fn prop_never_lands_on_own_marble(
        cells in proptest::collection::hash_set(0..TRACK_CELLS, 4),
        steps in card_steps(),
    ) {
        let (topology, _) = common::standard_board();
        let cells: Vec<_> = cells.into_iter().map(track_cell).collect();

        let layout: Vec<_> = cells
            .iter()
            .enumerate()
            .map(|(slot, &cell)| (MarbleId(slot as u8), Location::Track(cell)))
            .collect();
        let registry = MarbleRegistry::from_layout(&topology, 4, &layout).unwrap();
        let resolver = MovementResolver::new(&topology, &registry);

        let from = cells[0];
        let target = resolver.resolve(PlayerId(0), from, steps);
        if target != from {
            prop_assert_eq!(registry.own_marble_at(PlayerId(0), target), None);
        }
        // Resolving is a pure query.
        prop_assert_eq!(resolver.resolve(PlayerId(0), from, steps), target);
    }

    /// Landing captures exactly the marbles of other seats on that cell.
    #[test]
    fn prop_capture_spares_only_own_marbles(
        mover_seat in 0u8..4,
        victim_seat in 0u8..4,
        mover_cell in 0..TRACK_CELLS,
        cell in 0..TRACK_CELLS,
    ) {
        let (topology, _) = common::standard_board();
        prop_assume!(mover_cell != cell);
        let (mover_cell, cell) = (track_cell(mover_cell), track_cell(cell));

        let mover = MarbleId(mover_seat * 4);
        let victim = MarbleId(victim_seat * 4 + 1);
        let registry = MarbleRegistry::from_layout(
            &topology,
            4,
            &[(mover, Location::Track(mover_cell)), (victim, Location::Track(cell))],
        )
        .unwrap();

        let victims = CaptureEvaluator::new(&topology).victims(&registry, mover, cell).unwrap();
        prop_assert_eq!(victims.contains(&victim), mover_seat != victim_seat);
        prop_assert!(!victims.contains(&mover));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Every card is always in exactly one of deck, hands or discard pile.
    #[test]
    fn prop_cards_conserved_in_random_games(seed in any::<u64>()) {
        let mut engine = common::engine("random", seed);
        engine.start().unwrap();
        for _ in 0..300 {
            if engine.is_game_over() {
                break;
            }
            engine.play_turn().unwrap();
            prop_assert_eq!(engine.deck().total_cards(), 52);
        }
    }
}
