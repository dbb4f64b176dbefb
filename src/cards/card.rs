//! Playing cards and the card-to-steps table.
//!
//! Suits are cosmetic. A card's rank maps to a signed step count through
//! `CardRules`; the standard table is Ace=1, Two..Ten=face value except
//! Four=-4 (the only backward card), Jack=11, Queen=12, King=13.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Card suit. Has no effect on the rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs.
    Clubs,
    /// Diamonds.
    Diamonds,
    /// Hearts.
    Hearts,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

/// Card rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Ace.
    Ace,
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl Rank {
    /// All thirteen ranks, Ace first.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Position in `Rank::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Rank; decides the step count.
    pub rank: Rank,
    /// Suit; cosmetic.
    pub suit: Suit,
}

impl Card {
    /// Cards in a standard deck.
    pub const DECK_SIZE: usize = Suit::ALL.len() * Rank::ALL.len();

    /// Create a card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Every card of a standard 52-card deck, grouped by suit.
    pub fn standard_deck() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(rank, suit)))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} of {:?}", self.rank, self.suit)
    }
}

/// Rank-dependent rules: step counts and which ranks release a marble.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRules {
    /// Signed step count per rank, indexed by `Rank::index`.
    pub steps: [i32; 13],

    /// Ranks that may bring a Home marble onto its base.
    pub release_ranks: SmallVec<[Rank; 2]>,
}

impl CardRules {
    /// The reference table.
    ///
    /// ```
    /// use jackaroo::cards::{CardRules, Rank};
    ///
    /// let rules = CardRules::standard();
    /// assert_eq!(rules.steps_for(Rank::Ace), 1);
    /// assert_eq!(rules.steps_for(Rank::Four), -4);
    /// assert_eq!(rules.steps_for(Rank::King), 13);
    /// assert!(rules.releases(Rank::King));
    /// assert!(!rules.releases(Rank::Queen));
    /// ```
    #[must_use]
    pub fn standard() -> Self {
        Self {
            steps: [1, 2, 3, -4, 5, 6, 7, 8, 9, 10, 11, 12, 13],
            release_ranks: SmallVec::from_slice(&[Rank::Ace, Rank::King]),
        }
    }

    /// Override the step count of one rank.
    #[must_use]
    pub fn with_steps(mut self, rank: Rank, steps: i32) -> Self {
        self.steps[rank.index()] = steps;
        self
    }

    /// Step count for a rank.
    #[must_use]
    pub fn steps_for(&self, rank: Rank) -> i32 {
        self.steps[rank.index()]
    }

    /// Step count for a card.
    #[must_use]
    pub fn steps_of(&self, card: Card) -> i32 {
        self.steps_for(card.rank)
    }

    /// Whether this rank can release a marble from Home.
    #[must_use]
    pub fn releases(&self, rank: Rank) -> bool {
        self.release_ranks.contains(&rank)
    }
}

impl Default for CardRules {
    fn default() -> Self {
        Self::standard()
    }
}
