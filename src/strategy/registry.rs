//! Static registry of built-in strategies.
//!
//! To add a strategy, implement `Strategy` and append a `StrategyFactory`
//! with a stable name. Constructors must not have side effects; the same
//! seed must give the same behavior.

use super::beginner::Beginner;
use super::intermediate::Intermediate;
use super::normal::Normal;
use super::pro::Pro;
use super::random::RandomStrategy;
use super::traits::Strategy;

/// Constructor entry for one strategy.
pub struct StrategyFactory {
    /// Stable name.
    pub name: &'static str,
    /// Build an instance; only randomized strategies use the seed.
    pub make: fn(seed: Option<u64>) -> Box<dyn Strategy>,
}

impl std::fmt::Debug for StrategyFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyFactory")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

static STRATEGIES: &[StrategyFactory] = &[
    StrategyFactory {
        name: Beginner::NAME,
        make: make_beginner,
    },
    StrategyFactory {
        name: Normal::NAME,
        make: make_normal,
    },
    StrategyFactory {
        name: Intermediate::NAME,
        make: make_intermediate,
    },
    StrategyFactory {
        name: Pro::NAME,
        make: make_pro,
    },
    StrategyFactory {
        name: RandomStrategy::NAME,
        make: make_random,
    },
];

/// All registered strategies, in a stable order.
#[must_use]
pub fn registered() -> &'static [StrategyFactory] {
    STRATEGIES
}

/// Find a strategy by name.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static StrategyFactory> {
    registered().iter().find(|factory| factory.name == name)
}

fn make_beginner(_seed: Option<u64>) -> Box<dyn Strategy> {
    Box::new(Beginner::new())
}

fn make_normal(_seed: Option<u64>) -> Box<dyn Strategy> {
    Box::new(Normal::new())
}

fn make_intermediate(_seed: Option<u64>) -> Box<dyn Strategy> {
    Box::new(Intermediate::new())
}

fn make_pro(_seed: Option<u64>) -> Box<dyn Strategy> {
    Box::new(Pro::new())
}

fn make_random(seed: Option<u64>) -> Box<dyn Strategy> {
    Box::new(RandomStrategy::new(seed))
}
