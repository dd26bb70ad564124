//! The blackjack round state machine.
//!
//! A [`Round`] owns the shoe, both hands, the bet and the bankroll, and walks
//! through [`RoundPhase`] in a fixed order:
//!
//! ```text
//! Betting -> Dealing -> PlayerTurn -> DealerTurn -> Settling -> Done
//!               |            |                        ^
//!               +-- natural -+------- player bust ----+
//! ```
//!
//! Player actions are methods returning `Result<_, RoundError>`; an action
//! issued in the wrong phase changes nothing. Time-driven progress (the
//! opening deal, the dealer's paced draws and settlement) happens in
//! [`Round::tick`].

use std::fmt;

use fastrand::Rng;
use log::{debug, info};

use super::dealing::{DealSequencer, Recipient, TableLayout};
use super::hand::Hand;
use super::settlement::{Settlement, apply_house_override, settle};
use super::shoe::Shoe;

pub const STARTING_BANKROLL: i64 = 200;
pub const MIN_BET: u32 = 10;
pub const MAX_BET: u32 = 500;
pub const NUM_DECKS: usize = 6;
pub const RESHUFFLE_BELOW: usize = 20;
pub const DEALER_STANDS_ON: u32 = 17;
pub const RIG_LOSS_RATE: f64 = 0.95;
pub const DEALER_STEP_SECS: f32 = 0.35;

/// Table limits and pacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRules {
    pub starting_bankroll: i64,
    pub min_bet: u32,
    pub max_bet: u32,
    /// Amount added or removed by one bet adjustment.
    pub bet_step: u32,
    pub num_decks: usize,
    /// The shoe is rebuilt when fewer cards than this remain.
    pub reshuffle_below: usize,
    /// Probability that a player loss is reversed into a win.
    pub rig_loss_rate: f64,
    /// Seconds between dealer draws.
    pub dealer_step_secs: f32,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            starting_bankroll: STARTING_BANKROLL,
            min_bet: MIN_BET,
            max_bet: MAX_BET,
            bet_step: MIN_BET,
            num_decks: NUM_DECKS,
            reshuffle_below: RESHUFFLE_BELOW,
            rig_loss_rate: RIG_LOSS_RATE,
            dealer_step_secs: DEALER_STEP_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundPhase {
    #[default]
    Betting,
    Dealing,
    PlayerTurn,
    DealerTurn,
    Settling,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    /// The bet is zero or exceeds the bankroll.
    InvalidBet { bet: u32, bankroll: i64 },
    WrongPhase {
        action: &'static str,
        phase: RoundPhase,
    },
    /// No money left to start another hand.
    Bankrupt,
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundError::InvalidBet { bet, bankroll } => {
                write!(f, "invalid bet ${} with bankroll ${}", bet, bankroll)
            }
            RoundError::WrongPhase { action, phase } => {
                write!(f, "cannot {} during {:?}", action, phase)
            }
            RoundError::Bankrupt => write!(f, "bankroll exhausted"),
        }
    }
}

impl std::error::Error for RoundError {}

pub struct Round {
    rules: TableRules,
    shoe: Shoe,
    rng: Rng,
    player: Hand,
    dealer: Hand,
    bet: u32,
    bankroll: i64,
    phase: RoundPhase,
    hole_revealed: bool,
    sequencer: DealSequencer,
    layout: TableLayout,
    dealer_timer: f32,
    message: String,
    last_settlement: Option<Settlement>,
}

impl Round {
    /// New session with a shoe and override generator derived from `rng`.
    pub fn new(rules: TableRules, mut rng: Rng) -> Self {
        let shoe = Shoe::new(rules.num_decks, rng.fork());
        Self::with_shoe(rules, shoe, rng)
    }

    pub fn with_seed(rules: TableRules, seed: u64) -> Self {
        Self::new(rules, Rng::with_seed(seed))
    }

    /// New session dealing from a prepared shoe.
    pub fn with_shoe(rules: TableRules, shoe: Shoe, rng: Rng) -> Self {
        let mut round = Self {
            rules,
            shoe,
            rng,
            player: Hand::new(),
            dealer: Hand::new(),
            bet: 0,
            bankroll: rules.starting_bankroll,
            phase: RoundPhase::Betting,
            hole_revealed: false,
            sequencer: DealSequencer::new(),
            layout: TableLayout::default(),
            dealer_timer: 0.0,
            message: String::new(),
            last_settlement: None,
        };
        round.bet = rules.min_bet;
        round.clamp_bet();
        round
    }

    /// Inclusive `(low, high)` bet range for the current bankroll.
    ///
    /// When the bankroll is below the table minimum the player may still go
    /// all-in.
    pub fn bet_bounds(&self) -> (u32, u32) {
        let bankroll = u32::try_from(self.bankroll.max(0)).unwrap_or(u32::MAX);
        let high = self.rules.max_bet.min(bankroll);
        let low = self.rules.min_bet.min(high);
        (low, high)
    }

    fn clamp_bet(&mut self) {
        let (low, high) = self.bet_bounds();
        self.bet = self.bet.clamp(low, high);
    }

    fn expect_phase(&self, action: &'static str, phase: RoundPhase) -> Result<(), RoundError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(RoundError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }

    /// Raise or lower the bet by `steps` increments, clamped to the bounds.
    pub fn adjust_bet(&mut self, steps: i32) -> Result<u32, RoundError> {
        self.expect_phase("adjust the bet", RoundPhase::Betting)?;
        let (low, high) = self.bet_bounds();
        let wanted = i64::from(self.bet) + i64::from(steps) * i64::from(self.rules.bet_step);
        self.bet = wanted.clamp(i64::from(low), i64::from(high)) as u32;
        Ok(self.bet)
    }

    /// Commit the bet and start the opening deal.
    pub fn place_bet(&mut self) -> Result<(), RoundError> {
        self.expect_phase("deal", RoundPhase::Betting)?;
        if self.bet == 0 || i64::from(self.bet) > self.bankroll {
            self.message = "Adjust your bet.".into();
            return Err(RoundError::InvalidBet {
                bet: self.bet,
                bankroll: self.bankroll,
            });
        }

        self.clear_table();
        self.shoe.replenish_if_low(self.rules.reshuffle_below);
        let order = [
            (Recipient::Player, 0),
            (Recipient::Dealer, 0),
            (Recipient::Player, 1),
            (Recipient::Dealer, 1),
        ];
        for (recipient, index) in order {
            let card = self.shoe.draw();
            self.sequencer.schedule(recipient, index, card, &self.layout);
        }
        self.phase = RoundPhase::Dealing;
        debug!("Bet ${} placed, dealing", self.bet);
        Ok(())
    }

    pub fn hit(&mut self) -> Result<(), RoundError> {
        self.expect_phase("hit", RoundPhase::PlayerTurn)?;
        let card = self.shoe.draw();
        self.player.push(card);
        self.shoe.replenish_if_low(self.rules.reshuffle_below);
        debug!("Player hits {} -> {}", card, self.player);
        if self.player.is_bust() {
            self.hole_revealed = true;
            self.phase = RoundPhase::Settling;
        }
        Ok(())
    }

    pub fn stand(&mut self) -> Result<(), RoundError> {
        self.expect_phase("stand", RoundPhase::PlayerTurn)?;
        self.dealer_timer = 0.0;
        self.phase = RoundPhase::DealerTurn;
        Ok(())
    }

    /// Advance time-driven phases by `dt` seconds.
    ///
    /// Returns the settlement when the round was settled during this call.
    pub fn tick(&mut self, dt: f32) -> Option<Settlement> {
        match self.phase {
            RoundPhase::Dealing => {
                for (recipient, card) in self.sequencer.advance(dt) {
                    match recipient {
                        Recipient::Player => self.player.push(card),
                        Recipient::Dealer => self.dealer.push(card),
                    }
                }
                if self.sequencer.is_complete() {
                    self.sequencer.reset();
                    if self.player.is_blackjack() || self.dealer.is_blackjack() {
                        self.hole_revealed = true;
                        self.phase = RoundPhase::Settling;
                    } else {
                        self.phase = RoundPhase::PlayerTurn;
                    }
                }
                None
            }
            RoundPhase::DealerTurn => {
                self.dealer_timer += dt;
                if self.dealer_timer >= self.rules.dealer_step_secs {
                    self.dealer_timer -= self.rules.dealer_step_secs;
                    self.dealer_step();
                }
                None
            }
            RoundPhase::Settling => Some(self.finish()),
            RoundPhase::Betting | RoundPhase::PlayerTurn | RoundPhase::Done => None,
        }
    }

    // Soft 17 stands like hard 17.
    fn dealer_step(&mut self) {
        if self.dealer.total() < DEALER_STANDS_ON {
            let card = self.shoe.draw();
            self.dealer.push(card);
            self.shoe.replenish_if_low(self.rules.reshuffle_below);
            debug!("Dealer draws {} -> {}", card, self.dealer);
        } else {
            self.hole_revealed = true;
            self.phase = RoundPhase::Settling;
        }
    }

    fn finish(&mut self) -> Settlement {
        let base = settle(&self.player, &self.dealer, self.bet);
        let settlement =
            apply_house_override(base, self.bet, self.rules.rig_loss_rate, &mut self.rng);
        self.bankroll += settlement.delta;
        self.message = settlement.message();
        self.last_settlement = Some(settlement);
        self.phase = RoundPhase::Done;
        info!(
            "Round settled: player {} vs dealer {}, {:?} ({:+}), bankroll ${}",
            self.player, self.dealer, settlement.outcome, settlement.delta, self.bankroll
        );
        settlement
    }

    /// Clear the table for another hand.
    pub fn next_hand(&mut self) -> Result<(), RoundError> {
        self.expect_phase("start the next hand", RoundPhase::Done)?;
        if self.is_bankrupt() {
            return Err(RoundError::Bankrupt);
        }
        self.clear_table();
        self.message.clear();
        self.phase = RoundPhase::Betting;
        self.clamp_bet();
        Ok(())
    }

    /// Abandon the hand in progress without settling it.
    pub fn abort(&mut self) {
        if self.phase != RoundPhase::Betting && self.phase != RoundPhase::Done {
            info!("Hand abandoned during {:?}, unsettled", self.phase);
        }
        self.clear_table();
        self.message.clear();
        self.phase = RoundPhase::Betting;
        self.clamp_bet();
    }

    /// Sit down at the table: an empty felt waiting for a bet.
    pub fn open_table(&mut self) {
        self.abort();
    }

    fn clear_table(&mut self) {
        self.player.clear();
        self.dealer.clear();
        self.sequencer.reset();
        self.hole_revealed = false;
        self.dealer_timer = 0.0;
    }

    /// Restore the session to its starting bankroll.
    pub fn reset_bankroll(&mut self) {
        self.bankroll = self.rules.starting_bankroll;
        self.last_settlement = None;
        self.bet = self.rules.min_bet;
        self.abort();
    }

    pub fn set_layout(&mut self, layout: TableLayout) {
        self.layout = layout;
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn bankroll(&self) -> i64 {
        self.bankroll
    }

    pub fn is_bankrupt(&self) -> bool {
        self.bankroll <= 0
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    /// Whether the dealer's first card is face up.
    pub fn hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn last_settlement(&self) -> Option<Settlement> {
        self.last_settlement
    }

    pub fn sequencer(&self) -> &DealSequencer {
        &self.sequencer
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackjack::card::{Card, Rank, Suit};
    use crate::blackjack::settlement::Outcome;

    fn fair_rules() -> TableRules {
        TableRules {
            rig_loss_rate: 0.0,
            ..TableRules::default()
        }
    }

    fn c(rank: Rank) -> Card {
        Card::new(rank, Suit::Diamonds)
    }

    const fn n(v: u8) -> Rank {
        Rank::Number(v)
    }

    /// Round whose next cards are `top`, first element drawn first.
    fn stacked(rules: TableRules, top: &[Rank]) -> Round {
        let cards: Vec<Card> = top.iter().map(|&r| c(r)).collect();
        let shoe = Shoe::stacked(rules.num_decks, &cards, Rng::with_seed(11));
        Round::with_shoe(rules, shoe, Rng::with_seed(12))
    }

    fn deal(round: &mut Round) {
        round.place_bet().unwrap();
        round.tick(10.0);
    }

    fn run_until_done(round: &mut Round) -> Settlement {
        for _ in 0..64 {
            if let Some(s) = round.tick(1.0) {
                return s;
            }
        }
        panic!("round never settled, phase {:?}", round.phase());
    }

    #[test]
    fn test_new_round_waits_for_bet() {
        let round = Round::with_seed(TableRules::default(), 1);
        assert_eq!(round.phase(), RoundPhase::Betting);
        assert_eq!(round.bankroll(), 200);
        assert_eq!(round.bet(), 10);
        assert!(round.player().is_empty());
    }

    #[test]
    fn test_adjust_bet_is_bounded() {
        let mut round = Round::with_seed(TableRules::default(), 1);
        assert_eq!(round.adjust_bet(-1).unwrap(), 10);
        assert_eq!(round.adjust_bet(3).unwrap(), 40);
        assert_eq!(round.adjust_bet(100).unwrap(), 200);
        assert_eq!(round.adjust_bet(-100).unwrap(), 10);
    }

    #[test]
    fn test_max_bet_caps_large_bankroll() {
        let rules = TableRules {
            starting_bankroll: 10_000,
            ..TableRules::default()
        };
        let mut round = Round::with_seed(rules, 1);
        assert_eq!(round.adjust_bet(1000).unwrap(), 500);
    }

    #[test]
    fn test_place_bet_with_empty_bankroll_is_rejected() {
        let rules = TableRules {
            starting_bankroll: 0,
            ..TableRules::default()
        };
        let mut round = Round::with_seed(rules, 1);
        let err = round.place_bet().unwrap_err();
        assert!(matches!(err, RoundError::InvalidBet { bet: 0, .. }));
        assert_eq!(round.phase(), RoundPhase::Betting);
        assert_eq!(round.message(), "Adjust your bet.");
    }

    #[test]
    fn test_opening_deal_order() {
        let mut round = stacked(fair_rules(), &[n(2), n(3), n(4), n(5)]);
        round.place_bet().unwrap();
        assert_eq!(round.phase(), RoundPhase::Dealing);
        assert!(round.player().is_empty());
        round.tick(10.0);
        assert_eq!(round.player().cards(), &[c(n(2)), c(n(4))]);
        assert_eq!(round.dealer().cards(), &[c(n(3)), c(n(5))]);
        assert_eq!(round.phase(), RoundPhase::PlayerTurn);
        assert!(!round.hole_revealed());
    }

    #[test]
    fn test_deal_progresses_with_small_steps() {
        let mut round = stacked(fair_rules(), &[n(2), n(3), n(4), n(5)]);
        round.place_bet().unwrap();
        let mut ticks = 0;
        while round.phase() == RoundPhase::Dealing {
            round.tick(1.0 / 60.0);
            ticks += 1;
            assert!(ticks < 120);
        }
        assert_eq!(round.player().len(), 2);
        assert_eq!(round.dealer().len(), 2);
    }

    #[test]
    fn test_wrong_phase_actions_change_nothing() {
        let mut round = Round::with_seed(fair_rules(), 3);
        assert!(matches!(
            round.hit(),
            Err(RoundError::WrongPhase {
                phase: RoundPhase::Betting,
                ..
            })
        ));
        assert!(round.stand().is_err());
        assert!(round.next_hand().is_err());
        assert_eq!(round.phase(), RoundPhase::Betting);
        assert!(round.player().is_empty());

        round.place_bet().unwrap();
        assert!(round.adjust_bet(1).is_err());
        assert_eq!(round.bet(), 10);
    }

    #[test]
    fn test_player_natural_pays_three_to_two() {
        let mut round = stacked(fair_rules(), &[Rank::Ace, n(9), Rank::King, n(8)]);
        deal(&mut round);
        assert_eq!(round.phase(), RoundPhase::Settling);
        assert!(round.hole_revealed());
        let s = run_until_done(&mut round);
        assert_eq!(s.outcome, Outcome::PlayerBlackjack);
        assert_eq!(round.bankroll(), 215);
        assert_eq!(round.message(), "Blackjack! You win $15.");
        assert_eq!(round.phase(), RoundPhase::Done);
    }

    #[test]
    fn test_dealer_draws_to_seventeen() {
        // player 10+9, dealer 6+10, then 2 for the dealer
        let mut round = stacked(fair_rules(), &[n(10), n(6), n(9), n(10), n(2)]);
        deal(&mut round);
        round.stand().unwrap();
        assert_eq!(round.phase(), RoundPhase::DealerTurn);
        round.tick(DEALER_STEP_SECS);
        assert_eq!(round.dealer().total(), 18);
        let s = run_until_done(&mut round);
        assert_eq!(s.outcome, Outcome::PlayerWins);
        assert_eq!(round.bankroll(), 210);
    }

    #[test]
    fn test_hole_card_stays_down_until_dealer_stands() {
        // player 10+9, dealer 6+10, then 2 for the dealer
        let mut round = stacked(fair_rules(), &[n(10), n(6), n(9), n(10), n(2)]);
        deal(&mut round);
        round.stand().unwrap();
        assert_eq!(round.dealer().total(), 16);
        assert!(!round.hole_revealed());
        round.tick(DEALER_STEP_SECS);
        assert_eq!(round.dealer().total(), 18);
        assert!(!round.hole_revealed());
        round.tick(DEALER_STEP_SECS);
        assert_eq!(round.phase(), RoundPhase::Settling);
        assert!(round.hole_revealed());
    }

    #[test]
    fn test_dealer_waits_between_draws() {
        let mut round = stacked(fair_rules(), &[n(10), n(2), n(9), n(3), n(2)]);
        deal(&mut round);
        round.stand().unwrap();
        round.tick(DEALER_STEP_SECS / 2.0);
        assert_eq!(round.dealer().len(), 2);
        round.tick(DEALER_STEP_SECS / 2.0 + 0.01);
        assert_eq!(round.dealer().len(), 3);
    }

    #[test]
    fn test_dealer_stands_on_soft_seventeen() {
        let mut round = stacked(fair_rules(), &[n(10), Rank::Ace, n(8), n(6), n(5)]);
        deal(&mut round);
        round.stand().unwrap();
        let s = run_until_done(&mut round);
        assert_eq!(round.dealer().len(), 2);
        assert_eq!(s.outcome, Outcome::PlayerWins);
    }

    #[test]
    fn test_player_bust_settles_without_dealer_turn() {
        let mut round = stacked(fair_rules(), &[n(10), n(7), n(6), n(9), Rank::King]);
        deal(&mut round);
        round.hit().unwrap();
        assert!(round.player().is_bust());
        assert_eq!(round.phase(), RoundPhase::Settling);
        let s = run_until_done(&mut round);
        assert_eq!(s.outcome, Outcome::PlayerBust);
        assert_eq!(round.dealer().len(), 2);
        assert_eq!(round.bankroll(), 190);
    }

    #[test]
    fn test_house_override_reverses_loss() {
        let rules = TableRules {
            rig_loss_rate: 1.0,
            ..TableRules::default()
        };
        let mut round = stacked(rules, &[n(10), n(7), n(6), n(9), Rank::King]);
        deal(&mut round);
        round.hit().unwrap();
        let s = run_until_done(&mut round);
        assert_eq!(s.outcome, Outcome::ReversedLoss);
        assert_eq!(round.bankroll(), 210);
        assert_eq!(round.message(), "Lucky streak! Dealer loses.");
    }

    #[test]
    fn test_abort_keeps_bankroll() {
        let mut round = stacked(fair_rules(), &[n(10), n(7), n(6), n(9)]);
        deal(&mut round);
        round.abort();
        assert_eq!(round.phase(), RoundPhase::Betting);
        assert_eq!(round.bankroll(), 200);
        assert!(round.player().is_empty());
        assert!(round.dealer().is_empty());
        assert!(round.last_settlement().is_none());
    }

    #[test]
    fn test_next_hand_after_bankruptcy_fails() {
        let rules = TableRules {
            starting_bankroll: 10,
            ..fair_rules()
        };
        let mut round = stacked(rules, &[n(10), n(10), n(7), n(9)]);
        deal(&mut round);
        round.stand().unwrap();
        let s = run_until_done(&mut round);
        assert_eq!(s.outcome, Outcome::DealerWins);
        assert!(round.is_bankrupt());
        assert_eq!(round.next_hand(), Err(RoundError::Bankrupt));
        assert_eq!(round.phase(), RoundPhase::Done);
    }

    #[test]
    fn test_next_hand_clamps_bet_to_bankroll() {
        let rules = TableRules {
            starting_bankroll: 50,
            ..fair_rules()
        };
        let mut round = stacked(rules, &[n(10), n(10), n(7), n(9)]);
        round.adjust_bet(4).unwrap();
        assert_eq!(round.bet(), 50);
        deal(&mut round);
        round.stand().unwrap();
        run_until_done(&mut round);
        assert_eq!(round.bankroll(), 0);

        let rules = TableRules {
            starting_bankroll: 45,
            ..fair_rules()
        };
        let mut round = stacked(rules, &[n(10), n(10), n(9), n(7)]);
        round.adjust_bet(3).unwrap();
        assert_eq!(round.bet(), 40);
        deal(&mut round);
        round.stand().unwrap();
        run_until_done(&mut round);
        assert_eq!(round.bankroll(), 85);
        round.next_hand().unwrap();
        assert_eq!(round.bet(), 40);
        assert_eq!(round.phase(), RoundPhase::Betting);
        assert!(round.message().is_empty());
    }

    #[test]
    fn test_all_in_below_table_minimum() {
        let rules = TableRules {
            starting_bankroll: 5,
            ..fair_rules()
        };
        let round = Round::with_seed(rules, 1);
        assert_eq!(round.bet_bounds(), (5, 5));
        assert_eq!(round.bet(), 5);
    }

    #[test]
    fn test_reset_bankroll() {
        let rules = TableRules {
            starting_bankroll: 10,
            ..fair_rules()
        };
        let mut round = stacked(rules, &[n(10), n(10), n(7), n(9)]);
        deal(&mut round);
        round.stand().unwrap();
        run_until_done(&mut round);
        assert!(round.is_bankrupt());
        round.reset_bankroll();
        assert_eq!(round.bankroll(), 10);
        assert_eq!(round.phase(), RoundPhase::Betting);
        assert_eq!(round.bet(), 10);
    }
}
