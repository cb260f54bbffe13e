use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Seeded uniform shuffle, the same seed always yields the same deal.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomShuffler {
    seed: u64,
}

impl RandomShuffler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckShuffler for RandomShuffler {
    fn shuffle(self, deck: &mut [Card]) {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        shuffle(deck, &mut rng);
    }
}

/// Fisher-Yates backward scan: every position from the end swaps with a uniformly drawn position at or before it.
pub fn shuffle<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
}
