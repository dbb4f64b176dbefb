//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use jackaroo::{strategy, GameConfig, GameEngine, MarbleRegistry, Strategy, Topology};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize test logging once per test binary.
///
/// The level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Standard board with every marble Home.
pub fn standard_board() -> (Topology, MarbleRegistry) {
    let topology = Topology::new(&GameConfig::standard()).expect("standard config is valid");
    let registry = MarbleRegistry::new(&topology, 4);
    (topology, registry)
}

/// One strategy per seat, built from registry names.
pub fn strategies(names: [&str; 4], seed: u64) -> Vec<Box<dyn Strategy>> {
    names
        .iter()
        .enumerate()
        .map(|(seat, name)| {
            let factory = strategy::by_name(name).expect("registered strategy");
            (factory.make)(Some(seed.wrapping_add(seat as u64)))
        })
        .collect()
}

/// A standard engine where every seat plays `name`.
pub fn engine(name: &str, seed: u64) -> GameEngine {
    GameEngine::new(GameConfig::standard(), strategies([name; 4], seed), seed)
        .expect("standard engine")
}
