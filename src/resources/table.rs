//! The blackjack table resource.
//!
//! One table session exists per game: the bankroll carries over between
//! hands and between visits to the table, and is only reset by a restart
//! after going broke.

use bevy_ecs::prelude::Resource;
use std::ops::{Deref, DerefMut};

use crate::blackjack::round::Round;

#[derive(Resource)]
pub struct BlackjackTable(pub Round);

impl Deref for BlackjackTable {
    type Target = Round;

    fn deref(&self) -> &Round {
        &self.0
    }
}

impl DerefMut for BlackjackTable {
    fn deref_mut(&mut self) -> &mut Round {
        &mut self.0
    }
}
