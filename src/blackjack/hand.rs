//! Hand evaluation.
//!
//! Aces count 11 until the total would exceed 21, then drop to 1 one at a
//! time. Evaluation is a pure function of the cards; order does not matter.

use smallvec::SmallVec;
use std::fmt;

use super::card::Card;

pub const BLACKJACK: u32 = 21;

/// Total of `cards` and the number of aces still counted as 11.
fn evaluate(cards: &[Card]) -> (u32, u32) {
    let mut total = 0;
    let mut soft_aces = 0;
    for card in cards {
        total += card.value();
        if card.is_ace() {
            soft_aces += 1;
        }
    }
    while total > BLACKJACK && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    (total, soft_aces)
}

/// Best total for `cards`.
pub fn total(cards: &[Card]) -> u32 {
    evaluate(cards).0
}

/// Exactly two cards totalling 21.
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && total(cards) == BLACKJACK
}

pub fn is_bust(cards: &[Card]) -> bool {
    total(cards) > BLACKJACK
}

/// An ordered set of cards held by the player or the dealer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: SmallVec<[Card; 8]>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: SmallVec::from_slice(cards),
        }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn total(&self) -> u32 {
        total(&self.cards)
    }

    /// At least one ace is still counted as 11.
    pub fn is_soft(&self) -> bool {
        evaluate(&self.cards).1 > 0
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        is_bust(&self.cards)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        write!(f, " ({})", self.total())
    }
}
