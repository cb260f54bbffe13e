use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

/// Number of cards in a full deck, every suit and rank plus the flower.
pub const DECK_SIZE: usize = Suit::ALL.len() * Rank::ALL.len() + 1;

pub trait DeckShuffler {
    fn shuffle(self, deck: &mut [Card]);
}

/// Every suit and rank combination in suit-major order, followed by the flower.
pub fn build_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(suit, rank));
        }
    }
    deck.push(Card::FLOWER);
    deck
}

/// Builds a full deck and puts it in random order.
pub fn shuffled_deck(shuffler: impl DeckShuffler) -> Vec<Card> {
    let mut deck = build_deck();
    shuffler.shuffle(&mut deck);
    deck
}
