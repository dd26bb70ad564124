//! Non-player characters.
//!
//! Every NPC carries a [`Npc`] component with its role and dialogue line.
//! Only patrons move: they pick a new heading every few seconds (see
//! [`crate::systems::npc::npc_wander_system`]).

use bevy_ecs::prelude::Component;
use fastrand::Rng;
use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};

/// Side of the square NPC bounding box, in pixels.
pub const NPC_SIZE: f32 = 24.0;
/// Patron walking speed in pixels per second.
pub const WANDER_SPEED: f32 = 20.0;
/// Range of seconds a patron keeps its heading.
pub const WANDER_INTERVAL: (f32, f32) = (1.0, 3.0);
/// Distance between centres within which the player can talk to an NPC.
pub const TALK_RANGE: f32 = 50.0;

const PATRON_LINES: [&str; 5] = [
    "I'm feeling lucky tonight!",
    "This place is amazing!",
    "Have you tried the blackjack table?",
    "The slots are calling my name!",
    "I love the atmosphere here!",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NpcKind {
    Dealer,
    Security,
    Patron,
    Bartender,
    Hostess,
}

impl NpcKind {
    /// Line spoken when the player talks to this kind of NPC.
    ///
    /// Patrons pick one of several lines at random.
    pub fn default_dialogue(self, rng: &mut Rng) -> String {
        match self {
            NpcKind::Dealer => "Welcome to my table! Care to play?".into(),
            NpcKind::Security => "Keep it clean, folks.".into(),
            NpcKind::Patron => PATRON_LINES[rng.usize(..PATRON_LINES.len())].into(),
            NpcKind::Bartender => "What can I get you to drink?".into(),
            NpcKind::Hostess => "Welcome to our casino!".into(),
        }
    }

    pub fn wanders(self) -> bool {
        matches!(self, NpcKind::Patron)
    }

    /// Body colour as RGB.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            NpcKind::Dealer => (50, 50, 150),
            NpcKind::Security => (100, 50, 50),
            NpcKind::Patron => (100, 150, 100),
            NpcKind::Bartender => (150, 100, 50),
            NpcKind::Hostess => (150, 50, 150),
        }
    }
}

/// A character on the casino floor.
#[derive(Component, Debug, Clone)]
pub struct Npc {
    pub kind: NpcKind,
    pub dialogue: String,
    /// Seconds until a new heading is chosen.
    pub move_timer: f32,
    /// Unit heading, or zero when standing still.
    pub direction: Vector2,
    pub speed: f32,
}

impl Npc {
    pub fn new(kind: NpcKind, dialogue: impl Into<String>) -> Self {
        Self {
            kind,
            dialogue: dialogue.into(),
            move_timer: 0.0,
            direction: Vector2::zero(),
            speed: WANDER_SPEED,
        }
    }

    /// Pick one of the four cardinal headings or a stop, and how long to
    /// keep it.
    pub fn choose_heading(&mut self, rng: &mut Rng) {
        const HEADINGS: [(f32, f32); 5] = [
            (1.0, 0.0),
            (-1.0, 0.0),
            (0.0, 1.0),
            (0.0, -1.0),
            (0.0, 0.0),
        ];
        let (x, y) = HEADINGS[rng.usize(..HEADINGS.len())];
        self.direction = Vector2::new(x, y);
        let (lo, hi) = WANDER_INTERVAL;
        self.move_timer = lo + rng.f32() * (hi - lo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patrons_alone_wander() {
        assert!(NpcKind::Patron.wanders());
        assert!(!NpcKind::Dealer.wanders());
        assert!(!NpcKind::Security.wanders());
    }

    #[test]
    fn test_patron_dialogue_comes_from_the_pool() {
        let mut rng = Rng::with_seed(5);
        for _ in 0..20 {
            let line = NpcKind::Patron.default_dialogue(&mut rng);
            assert!(PATRON_LINES.contains(&line.as_str()));
        }
        assert_eq!(
            NpcKind::Security.default_dialogue(&mut rng),
            "Keep it clean, folks."
        );
    }

    #[test]
    fn test_choose_heading_is_cardinal_and_timed() {
        let mut rng = Rng::with_seed(9);
        let mut npc = Npc::new(NpcKind::Patron, "hi");
        for _ in 0..100 {
            npc.choose_heading(&mut rng);
            let d = npc.direction;
            assert!(d.x == 0.0 || d.y == 0.0);
            assert!(d.x.abs() + d.y.abs() <= 1.0);
            assert!((1.0..3.0).contains(&npc.move_timer));
        }
    }

    #[test]
    fn test_kind_deserializes_lowercase() {
        let kind: NpcKind = serde_json::from_str("\"bartender\"").unwrap();
        assert_eq!(kind, NpcKind::Bartender);
    }
}
