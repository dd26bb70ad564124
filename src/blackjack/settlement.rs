//! Round settlement and the house override.
//!
//! [`settle`] applies the fixed precedence of blackjack outcomes and yields
//! the signed bankroll delta for a bet. [`apply_house_override`] then gives
//! the table a chance to turn a player loss into a win.

use fastrand::Rng;

use super::hand::Hand;

/// How a finished round was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    BothBlackjack,
    PlayerBlackjack,
    DealerBlackjack,
    PlayerBust,
    DealerBust,
    PlayerWins,
    DealerWins,
    Push,
    /// A player loss reversed by the house override.
    ReversedLoss,
}

impl Outcome {
    /// Text shown at the table. `delta` is the final bankroll change.
    pub fn message(self, delta: i64) -> String {
        match self {
            Outcome::BothBlackjack => "Both blackjack - Push.".into(),
            Outcome::PlayerBlackjack => format!("Blackjack! You win ${}.", delta),
            Outcome::DealerBlackjack => "Dealer blackjack. You lose.".into(),
            Outcome::PlayerBust => "You bust.".into(),
            Outcome::DealerBust => "Dealer busts. You win!".into(),
            Outcome::PlayerWins => "You win!".into(),
            Outcome::DealerWins => "Dealer wins.".into(),
            Outcome::Push => "Push.".into(),
            Outcome::ReversedLoss => "Lucky streak! Dealer loses.".into(),
        }
    }
}

/// Result of settling one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub outcome: Outcome,
    /// Signed bankroll change.
    pub delta: i64,
}

impl Settlement {
    pub fn new(outcome: Outcome, delta: i64) -> Self {
        Self { outcome, delta }
    }

    pub fn message(&self) -> String {
        self.outcome.message(self.delta)
    }
}

/// Decide the round for `bet`, first matching rule wins.
pub fn settle(player: &Hand, dealer: &Hand, bet: u32) -> Settlement {
    let bet = i64::from(bet);
    let player_bj = player.is_blackjack();
    let dealer_bj = dealer.is_blackjack();

    if player_bj && dealer_bj {
        return Settlement::new(Outcome::BothBlackjack, 0);
    }
    if player_bj {
        // 3:2, rounded down
        return Settlement::new(Outcome::PlayerBlackjack, bet * 3 / 2);
    }
    if dealer_bj {
        return Settlement::new(Outcome::DealerBlackjack, -bet);
    }
    if player.is_bust() {
        return Settlement::new(Outcome::PlayerBust, -bet);
    }
    if dealer.is_bust() {
        return Settlement::new(Outcome::DealerBust, bet);
    }

    let (p, d) = (player.total(), dealer.total());
    if p > d {
        Settlement::new(Outcome::PlayerWins, bet)
    } else if p < d {
        Settlement::new(Outcome::DealerWins, -bet)
    } else {
        Settlement::new(Outcome::Push, 0)
    }
}

/// Reverse a loss into a win of `bet` when `roll < loss_rate`.
///
/// `roll` is a uniform draw from `[0, 1)`. Wins and pushes pass through.
pub fn reverse_loss(settlement: Settlement, bet: u32, loss_rate: f64, roll: f64) -> Settlement {
    if settlement.delta < 0 && roll < loss_rate {
        Settlement::new(Outcome::ReversedLoss, i64::from(bet))
    } else {
        settlement
    }
}

/// [`reverse_loss`] with a fresh draw from `rng`.
///
/// The draw is taken only when the settlement is a loss, so wins and pushes
/// leave the generator untouched.
pub fn apply_house_override(
    settlement: Settlement,
    bet: u32,
    loss_rate: f64,
    rng: &mut Rng,
) -> Settlement {
    if settlement.delta >= 0 {
        return settlement;
    }
    reverse_loss(settlement, bet, loss_rate, rng.f64())
}
