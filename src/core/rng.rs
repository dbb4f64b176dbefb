//! Seeded randomness for shuffles and randomized strategies.
//!
//! A game has one seed. The deck and every randomized strategy draw
//! from their own stream derived from it, so adding a random seat never
//! changes the order of the cards.
//!
//! ```
//! use jackaroo::core::GameRng;
//!
//! let mut a = GameRng::new(42).for_context("deck");
//! let mut b = GameRng::new(42).for_context("deck");
//!
//! let mut left: Vec<u8> = (0..52).collect();
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// ChaCha8 stream with a remembered seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Stream for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Stream seeded by the operating system; not reproducible.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive the stream for a named consumer, e.g. `"deck"`.
    ///
    /// Depends only on the seed and the name, never on how much of this
    /// stream has been used.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform in-place permutation.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Uniform pick; `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    fn shuffled_deck(rng: &mut GameRng) -> Vec<Card> {
        let mut deck: Vec<_> = Card::standard_deck().collect();
        rng.shuffle(&mut deck);
        deck
    }

    #[test]
    fn test_same_seed_same_deal() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        assert_eq!(shuffled_deck(&mut a), shuffled_deck(&mut b));
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_seeds_differ() {
        let first = shuffled_deck(&mut GameRng::new(1));
        let second = shuffled_deck(&mut GameRng::new(2));
        assert_ne!(first, second);
    }

    #[test]
    fn test_contexts_are_independent() {
        let master = GameRng::new(42);
        let mut deck = master.for_context("deck");
        let mut seat = master.for_context("seat-1");
        assert_ne!(shuffled_deck(&mut deck), shuffled_deck(&mut seat));

        // Drawing from the master does not move a derived stream.
        let mut used = GameRng::new(42);
        shuffled_deck(&mut used);
        assert_eq!(
            shuffled_deck(&mut used.for_context("deck")),
            shuffled_deck(&mut master.for_context("deck"))
        );
    }

    #[test]
    fn test_shuffle_keeps_every_card() {
        let mut deck = shuffled_deck(&mut GameRng::new(9));
        assert_ne!(deck, Card::standard_deck().collect::<Vec<_>>());
        deck.sort();
        let mut sorted: Vec<_> = Card::standard_deck().collect();
        sorted.sort();
        assert_eq!(deck, sorted);
    }

    #[test]
    fn test_choose_from_hand() {
        let mut rng = GameRng::new(7);
        let hand: Vec<_> = Card::standard_deck().take(4).collect();
        let picked = rng.choose(&hand).copied();
        assert!(picked.is_some_and(|c| hand.contains(&c)));

        let empty: [Card; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
