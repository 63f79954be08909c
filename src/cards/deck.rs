//! Deck construction and dealing.
//!
//! The deck is always rebuilt from the fixed template and shuffled whole;
//! the draw pile is never persisted between refills, so "reshuffle" means
//! "start from the full template again". Dealing pops from the top (the end
//! of the vec).

use crate::core::{EngineRng, GameState};

use super::card::{CardKind, CommandCard};

/// The fixed multiset the deck is built from.
pub const DECK_TEMPLATE: &[(CardKind, usize)] = &[
    (CardKind::MoveOne, 6),
    (CardKind::MoveTwo, 5),
    (CardKind::MoveThree, 4),
    (CardKind::Impulse, 3),
    (CardKind::Hesitate, 3),
    (CardKind::Charge, 3),
    (CardKind::Empower, 2),
    (CardKind::Degrade, 3),
    (CardKind::Deny, 3),
    (CardKind::Rethink, 2),
    (CardKind::Homage, 2),
    (CardKind::Foresight, 2),
    (CardKind::Inhibit, 2),
    (CardKind::Interact, 6),
    (CardKind::Gamble, 2),
    (CardKind::HailMary, 1),
    (CardKind::Reload, 2),
    (CardKind::Buffer, 3),
];

/// A shuffled draw pile.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<CommandCard>,
}

impl Deck {
    /// Build a full template deck, shuffled. Card ids are allocated from the
    /// game state so copies stay unique across re-deals.
    #[must_use]
    pub fn shuffled(state: &mut GameState, rng: &mut EngineRng) -> Self {
        let mut cards = Vec::with_capacity(Self::template_size());
        for &(kind, count) in DECK_TEMPLATE {
            for _ in 0..count {
                cards.push(CommandCard::new(state.alloc_card_id(), kind));
            }
        }
        rng.shuffle(&mut cards);
        Self { cards }
    }

    /// Total number of cards in the template.
    #[must_use]
    pub fn template_size() -> usize {
        DECK_TEMPLATE.iter().map(|&(_, count)| count).sum()
    }

    /// Deal up to `count` cards from the top.
    pub fn deal(&mut self, count: usize) -> Vec<CommandCard> {
        let take = count.min(self.cards.len());
        self.cards.split_off(self.cards.len() - take)
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardSpace, PlayerId, PlayerMap, PlayerSummary};

    fn empty_state() -> GameState {
        let players = PlayerMap::new(2, |p| PlayerSummary::new(format!("p{}", p.index())));
        GameState::new(
            players,
            vec![PlayerId::new(0), PlayerId::new(1)],
            BoardSpace::new(1, 1),
        )
    }

    #[test]
    fn test_template_size() {
        assert_eq!(Deck::template_size(), 54);
    }

    #[test]
    fn test_shuffled_deck_has_full_template() {
        let mut state = empty_state();
        let mut rng = EngineRng::new(42);
        let deck = Deck::shuffled(&mut state, &mut rng);

        assert_eq!(deck.remaining(), 54);

        for &(kind, count) in DECK_TEMPLATE {
            let found = deck.cards.iter().filter(|c| c.kind == kind).count();
            assert_eq!(found, count, "wrong count for {}", kind);
        }
    }

    #[test]
    fn test_card_ids_unique_across_decks() {
        let mut state = empty_state();
        let mut rng = EngineRng::new(42);

        let first = Deck::shuffled(&mut state, &mut rng);
        let second = Deck::shuffled(&mut state, &mut rng);

        let mut ids = std::collections::HashSet::new();
        for card in first.cards.iter().chain(second.cards.iter()) {
            assert!(ids.insert(card.id), "duplicate id {}", card.id);
        }
    }

    #[test]
    fn test_deal_pops_from_top() {
        let mut state = empty_state();
        let mut rng = EngineRng::new(42);
        let mut deck = Deck::shuffled(&mut state, &mut rng);

        let top: Vec<_> = deck.cards[deck.cards.len() - 4..].to_vec();
        let hand = deck.deal(4);

        assert_eq!(hand, top);
        assert_eq!(deck.remaining(), 50);
    }

    #[test]
    fn test_deal_beyond_pile_is_clamped() {
        let mut state = empty_state();
        let mut rng = EngineRng::new(42);
        let mut deck = Deck::shuffled(&mut state, &mut rng);

        deck.deal(50);
        let rest = deck.deal(10);
        assert_eq!(rest.len(), 4);
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn test_shuffle_is_seed_deterministic() {
        let mut state_a = empty_state();
        let mut state_b = empty_state();
        let mut rng_a = EngineRng::new(7);
        let mut rng_b = EngineRng::new(7);

        let deck_a = Deck::shuffled(&mut state_a, &mut rng_a);
        let deck_b = Deck::shuffled(&mut state_b, &mut rng_b);

        assert_eq!(deck_a.cards, deck_b.cards);
    }
}
