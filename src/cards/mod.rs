//! Cards, the step table, and the deck manager.
//!
//! ## Card vs CardRules
//!
//! - `Card`: a rank and a suit; plain data.
//! - `CardRules`: what a rank means on the board (signed steps, whether
//!   it releases a marble from Home). Supplied through `GameConfig`.
//!
//! `DeckManager` owns the deck, discard pile and every hand.

pub mod card;
pub mod deck;

pub use card::{Card, CardRules, Rank, Suit};
pub use deck::DeckManager;
