//! The shoe: several decks shuffled together and dealt from the top.
//!
//! Cards are consumed from the end of the internal vector (stack semantics).
//! Callers are expected to call [`Shoe::replenish_if_low`] before a draw can
//! run the shoe dry; drawing from an empty shoe is an invariant violation.

use fastrand::Rng;
use log::{debug, error};

use super::card::{Card, canonical_deck};

/// Cards in one standard deck.
pub const DECK_SIZE: usize = 52;

pub struct Shoe {
    cards: Vec<Card>,
    num_decks: usize,
    rng: Rng,
}

impl Shoe {
    /// Build and shuffle a shoe of `num_decks` decks (at least one).
    pub fn new(num_decks: usize, rng: Rng) -> Self {
        let mut shoe = Self {
            cards: Vec::with_capacity(DECK_SIZE * num_decks.max(1)),
            num_decks: num_decks.max(1),
            rng,
        };
        shoe.rebuild();
        shoe
    }

    /// Deterministic shoe for a given seed.
    pub fn with_seed(num_decks: usize, seed: u64) -> Self {
        Self::new(num_decks, Rng::with_seed(seed))
    }

    /// A freshly shuffled shoe with `top` placed on top, `top[0]` drawn first.
    ///
    /// Used for scripted rounds.
    pub fn stacked(num_decks: usize, top: &[Card], rng: Rng) -> Self {
        let mut shoe = Self::new(num_decks, rng);
        shoe.cards.extend(top.iter().rev().copied());
        shoe
    }

    /// Produce `num_decks × 52` cards in canonical order, then permute them
    /// uniformly.
    pub fn build(num_decks: usize, rng: &mut Rng) -> Vec<Card> {
        let mut cards: Vec<Card> = (0..num_decks).flat_map(|_| canonical_deck()).collect();
        rng.shuffle(&mut cards);
        cards
    }

    /// Replace the contents with a fresh, shuffled set of decks.
    pub fn rebuild(&mut self) {
        self.cards = Self::build(self.num_decks, &mut self.rng);
        debug!("Shoe rebuilt with {} decks", self.num_decks);
    }

    /// Rebuild when fewer than `threshold` cards remain.
    ///
    /// Returns true if the shoe was rebuilt.
    pub fn replenish_if_low(&mut self, threshold: usize) -> bool {
        if self.cards.len() < threshold {
            debug!(
                "Shoe low ({} < {}), reshuffling",
                self.cards.len(),
                threshold
            );
            self.rebuild();
            true
        } else {
            false
        }
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Card {
        if self.cards.is_empty() {
            debug_assert!(false, "draw from an empty shoe");
            error!("Draw from an empty shoe, rebuilding");
            self.rebuild();
        }
        self.cards
            .pop()
            .expect("shoe holds at least one deck after rebuild")
    }

    /// Next card without removing it.
    pub fn peek(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn num_decks(&self) -> usize {
        self.num_decks
    }

    /// Remaining cards, bottom first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
