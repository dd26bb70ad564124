//! Animated opening deal.
//!
//! The four opening cards are scheduled at a fixed stagger and fly in a
//! straight line from an off-screen shoe position to their slot on the felt.
//! [`DealSequencer::advance`] is driven by the frame delta; cards join their
//! hand only when their flight is over.

use arrayvec::ArrayVec;
use raylib::prelude::Vector2;

use super::card::Card;

/// Seconds between the start of consecutive cards.
pub const DEAL_STAGGER: f32 = 0.22;
/// Flight time of a single card.
pub const DEAL_FLIGHT: f32 = 0.22;
/// Cards dealt before the player acts.
pub const OPENING_CARDS: usize = 4;

pub const CARD_WIDTH: f32 = 80.0;
pub const CARD_HEIGHT: f32 = 112.0;
const SLOT_LEFT: f32 = 160.0;
const SLOT_SPACING: f32 = 90.0;
const DEALER_ROW_Y: f32 = 120.0;
const PLAYER_ROW_FROM_BOTTOM: f32 = 200.0;
const SHOE_Y: f32 = -140.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Player,
    Dealer,
}

/// Where cards come from and where they land, for a given screen size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableLayout {
    pub source: Vector2,
    pub dealer_row_y: f32,
    pub player_row_y: f32,
}

impl TableLayout {
    pub fn for_screen(width: f32, height: f32) -> Self {
        Self {
            source: Vector2::new(width / 2.0, SHOE_Y),
            dealer_row_y: DEALER_ROW_Y,
            player_row_y: height - PLAYER_ROW_FROM_BOTTOM,
        }
    }

    /// Top-left corner of card `index` in the recipient's row.
    pub fn slot(&self, recipient: Recipient, index: usize) -> Vector2 {
        let x = SLOT_LEFT + index as f32 * SLOT_SPACING;
        match recipient {
            Recipient::Player => Vector2::new(x, self.player_row_y),
            Recipient::Dealer => Vector2::new(x, self.dealer_row_y),
        }
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::for_screen(960.0, 540.0)
    }
}

/// One scheduled card flight.
#[derive(Debug, Clone, Copy)]
pub struct DealAnimation {
    pub recipient: Recipient,
    /// Position of the card in the recipient's hand.
    pub index: usize,
    /// Seconds after the deal began.
    pub start: f32,
    pub source: Vector2,
    pub dest: Vector2,
    pub card: Card,
    pub arrived: bool,
}

impl DealAnimation {
    /// Flight progress in `[0, 1]` at `elapsed` seconds into the deal.
    pub fn fraction(&self, elapsed: f32) -> f32 {
        ((elapsed - self.start) / DEAL_FLIGHT).clamp(0.0, 1.0)
    }

    /// Interpolated position at `elapsed`.
    pub fn position(&self, elapsed: f32) -> Vector2 {
        lerp_v2(self.source, self.dest, self.fraction(elapsed))
    }
}

pub(crate) fn lerp_v2(a: Vector2, b: Vector2, t: f32) -> Vector2 {
    Vector2 {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
    }
}

/// Schedule of the opening deal.
#[derive(Debug, Clone, Default)]
pub struct DealSequencer {
    entries: ArrayVec<DealAnimation, OPENING_CARDS>,
    elapsed: f32,
}

impl DealSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any schedule and start over at time zero.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.elapsed = 0.0;
    }

    /// Append the next card. Its start time follows from its deal order.
    ///
    /// Returns false once the opening deal is fully scheduled.
    pub fn schedule(
        &mut self,
        recipient: Recipient,
        index: usize,
        card: Card,
        layout: &TableLayout,
    ) -> bool {
        let order = self.entries.len();
        self.entries
            .try_push(DealAnimation {
                recipient,
                index,
                start: order as f32 * DEAL_STAGGER,
                source: layout.source,
                dest: layout.slot(recipient, index),
                card,
                arrived: false,
            })
            .is_ok()
    }

    /// Advance the clock by `dt` and return the cards that landed, in deal
    /// order.
    pub fn advance(&mut self, dt: f32) -> ArrayVec<(Recipient, Card), OPENING_CARDS> {
        self.elapsed += dt.max(0.0);
        let mut landed = ArrayVec::new();
        for entry in self.entries.iter_mut().filter(|e| !e.arrived) {
            if entry.fraction(self.elapsed) >= 1.0 {
                entry.arrived = true;
                landed.push((entry.recipient, entry.card));
            }
        }
        landed
    }

    /// True when something was scheduled and every card has landed.
    pub fn is_complete(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|e| e.arrived)
    }

    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cards still travelling (started or waiting), with their current
    /// position.
    pub fn in_flight(&self) -> impl Iterator<Item = (&DealAnimation, Vector2)> + '_ {
        self.entries
            .iter()
            .filter(|e| !e.arrived)
            .map(|e| (e, e.position(self.elapsed)))
    }

    pub fn entries(&self) -> &[DealAnimation] {
        &self.entries
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
