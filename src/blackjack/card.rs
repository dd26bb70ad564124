//! Playing cards.
//!
//! A [`Card`] is an immutable `(rank, suit)` pair. [`canonical_deck`] yields
//! the 52 cards of a standard deck in a fixed order, suit by suit.

use std::fmt;

/// The four French suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Unicode symbol, for logs.
    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    /// ASCII letter, for the default raylib font which lacks the suit glyphs.
    pub fn letter(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

/// Card rank. Number cards carry their pip value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Ace,
    /// 2 through 10.
    Number(u8),
    Jack,
    Queen,
    King,
}

impl Rank {
    /// The 13 ranks in canonical order (A, 2..10, J, Q, K).
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Number(2),
        Rank::Number(3),
        Rank::Number(4),
        Rank::Number(5),
        Rank::Number(6),
        Rank::Number(7),
        Rank::Number(8),
        Rank::Number(9),
        Rank::Number(10),
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Blackjack value with the ace counted high.
    pub fn value(self) -> u32 {
        match self {
            Rank::Ace => 11,
            Rank::Number(n) => n as u32,
            Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    pub fn label(self) -> String {
        match self {
            Rank::Ace => "A".into(),
            Rank::Number(n) => n.to_string(),
            Rank::Jack => "J".into(),
            Rank::Queen => "Q".into(),
            Rank::King => "K".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn value(&self) -> u32 {
        self.rank.value()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// One standard 52-card deck in canonical order.
pub fn canonical_deck() -> impl Iterator<Item = Card> {
    Suit::ALL
        .into_iter()
        .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(rank, suit)))
}
