//! Deck, discard pile and hands.
//!
//! Cards cycle deck -> hand -> discard -> deck. The deck is drawn from the
//! front; when it runs dry the discard pile is shuffled back in. Both piles
//! are `im::Vector`s so snapshots handed to strategies are O(1).

use im::Vector;
use tracing::debug;

use crate::core::{EngineError, EngineResult, GameRng, PlayerId, PlayerMap};

use super::card::Card;

/// Owns every card in the game and where it currently is.
#[derive(Clone, Debug)]
pub struct DeckManager {
    deck: Vector<Card>,
    discard: Vector<Card>,
    hands: PlayerMap<Vec<Card>>,
    rng: GameRng,
}

impl DeckManager {
    /// Create an empty manager for `player_count` seats.
    #[must_use]
    pub fn new(player_count: usize, rng: GameRng) -> Self {
        Self {
            deck: Vector::new(),
            discard: Vector::new(),
            hands: PlayerMap::with_default(player_count),
            rng,
        }
    }

    /// Replace all cards with a fresh, unshuffled 52-card deck.
    pub fn build(&mut self) {
        self.deck = Card::standard_deck().collect();
        self.discard.clear();
        for hand in self.hands.values_mut() {
            hand.clear();
        }
    }

    /// Uniformly permute the deck.
    pub fn shuffle(&mut self) {
        let mut cards: Vec<Card> = self.deck.iter().copied().collect();
        self.rng.shuffle(&mut cards);
        self.deck = cards.into_iter().collect();
    }

    /// Move the discard pile into the deck and shuffle, if the deck is empty.
    ///
    /// Returns true if a refill happened.
    pub fn refill_if_empty(&mut self) -> bool {
        if !self.deck.is_empty() || self.discard.is_empty() {
            return false;
        }
        debug!(cards = self.discard.len(), "recycling discard pile into deck");
        self.deck.append(std::mem::take(&mut self.discard));
        self.shuffle();
        true
    }

    /// Take the front card of the deck, refilling first if needed.
    pub fn draw(&mut self) -> EngineResult<Card> {
        self.refill_if_empty();
        self.deck.pop_front().ok_or(EngineError::ExhaustedSupply)
    }

    /// Clear all hands, then deal `hand_size` rounds of one card per seat.
    ///
    /// Cards still held are moved to the discard pile first so no card
    /// leaves circulation.
    pub fn deal(&mut self, hand_size: usize) -> EngineResult<()> {
        for hand in self.hands.values_mut() {
            self.discard.extend(hand.drain(..));
        }

        let seats: Vec<PlayerId> = self.hands.iter().map(|(p, _)| p).collect();
        for _ in 0..hand_size {
            for &player in &seats {
                let card = self.draw()?;
                self.hands[player].push(card);
            }
        }
        debug!(hand_size, deck = self.deck.len(), "hands dealt");
        Ok(())
    }

    /// Move a card from a seat's hand to the discard pile.
    pub fn discard(&mut self, player: PlayerId, card: Card) -> EngineResult<()> {
        let hand = &mut self.hands[player];
        let index = hand
            .iter()
            .position(|&c| c == card)
            .ok_or(EngineError::CardNotInHand { player, card })?;
        hand.remove(index);
        self.discard.push_back(card);
        Ok(())
    }

    /// A seat's hand, in deal order.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        &self.hands[player]
    }

    /// Whether every hand is empty.
    #[must_use]
    pub fn all_hands_empty(&self) -> bool {
        self.hands.values().all(Vec::is_empty)
    }

    /// The draw pile, front first.
    #[must_use]
    pub fn deck(&self) -> &Vector<Card> {
        &self.deck
    }

    /// The discard pile, oldest first.
    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Card> {
        &self.discard
    }

    /// Cards across deck, discard pile and hands.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.discard.len() + self.hands.values().map(Vec::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn manager() -> DeckManager {
        let mut manager = DeckManager::new(4, GameRng::new(42));
        manager.build();
        manager
    }

    #[test]
    fn test_build() {
        let manager = manager();
        assert_eq!(manager.deck().len(), 52);
        assert!(manager.discard_pile().is_empty());
        assert!(manager.all_hands_empty());
    }

    #[test]
    fn test_shuffle_preserves_cards() {
        let mut manager = manager();
        let before: Vec<_> = manager.deck().iter().copied().collect();
        manager.shuffle();
        let mut after: Vec<_> = manager.deck().iter().copied().collect();

        assert_ne!(before, after);
        after.sort();
        let mut sorted = before;
        sorted.sort();
        assert_eq!(after, sorted);
    }

    #[test]
    fn test_deal_round_robin() {
        let mut manager = manager();
        let order: Vec<_> = manager.deck().iter().copied().take(8).collect();

        manager.deal(2).unwrap();

        // Seat 0 gets cards 0 and 4, seat 1 gets 1 and 5, ...
        assert_eq!(manager.hand(PlayerId::new(0)), &[order[0], order[4]]);
        assert_eq!(manager.hand(PlayerId::new(3)), &[order[3], order[7]]);
        assert_eq!(manager.deck().len(), 44);
        assert_eq!(manager.total_cards(), 52);
    }

    #[test]
    fn test_discard_moves_card() {
        let mut manager = manager();
        manager.deal(4).unwrap();

        let player = PlayerId::new(1);
        let card = manager.hand(player)[2];
        manager.discard(player, card).unwrap();

        assert_eq!(manager.hand(player).len(), 3);
        assert!(!manager.hand(player).contains(&card));
        assert_eq!(manager.discard_pile().back(), Some(&card));
        assert_eq!(manager.total_cards(), 52);
    }

    #[test]
    fn test_discard_missing_card() {
        let mut manager = manager();
        let card = Card::new(Rank::Ace, Suit::Hearts);
        assert_eq!(
            manager.discard(PlayerId::new(0), card),
            Err(EngineError::CardNotInHand {
                player: PlayerId::new(0),
                card
            })
        );
    }

    #[test]
    fn test_draw_refills_from_discard() {
        let mut manager = manager();
        manager.deal(13).unwrap();
        assert!(manager.deck().is_empty());

        let player = PlayerId::new(0);
        let card = manager.hand(player)[0];
        manager.discard(player, card).unwrap();

        assert_eq!(manager.draw(), Ok(card));
        assert!(manager.discard_pile().is_empty());
    }

    #[test]
    fn test_draw_with_no_supply() {
        let mut manager = manager();
        manager.deal(13).unwrap();
        assert_eq!(manager.draw(), Err(EngineError::ExhaustedSupply));
    }

    #[test]
    fn test_redeal_returns_held_cards() {
        let mut manager = manager();
        manager.deal(4).unwrap();
        manager.deal(5).unwrap();

        for player in PlayerId::all(4) {
            assert_eq!(manager.hand(player).len(), 5);
        }
        assert_eq!(manager.total_cards(), 52);
    }
}
