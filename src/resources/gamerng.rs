//! Shared random number generator for world behaviour.
//!
//! Seeded from `--seed` when given, so NPC wandering and patron dialogue
//! replay identically. The blackjack table forks its own generators from the
//! same seed at setup.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub Rng);

impl GameRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => GameRng(Rng::with_seed(seed)),
            None => GameRng(Rng::new()),
        }
    }
}
