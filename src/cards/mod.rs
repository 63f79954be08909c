//! Command cards: the catalog and the deck.

pub mod card;
pub mod deck;

pub use card::{CardId, CardKind, CommandCard};
pub use deck::{Deck, DECK_TEMPLATE};
