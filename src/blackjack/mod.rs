//! Blackjack rules engine.
//!
//! Pure game logic with no ECS or rendering dependencies beyond raylib's
//! `Vector2` for card positions:
//! - [`card`] – ranks, suits and the canonical deck
//! - [`shoe`] – the shuffled multi-deck draw pile
//! - [`hand`] – totals, naturals and busts
//! - [`settlement`] – payout precedence and the house override
//! - [`dealing`] – the animated opening deal
//! - [`round`] – the round state machine tying everything together
//!
//! The ECS side wraps a [`round::Round`] in
//! [`crate::resources::table::BlackjackTable`].

pub mod card;
pub mod dealing;
pub mod hand;
pub mod round;
pub mod settlement;
pub mod shoe;

pub use card::{Card, Rank, Suit};
pub use hand::Hand;
pub use round::{Round, RoundError, RoundPhase, TableRules};
pub use settlement::{Outcome, Settlement};
pub use shoe::Shoe;
