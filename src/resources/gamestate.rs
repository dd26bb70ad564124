//! High-level game state resources.
//!
//! These resources track the authoritative current state of the game and any
//! pending transition requested by systems. See
//! `crate::events::gamestate::observe_gamestate_change_event` for how a
//! transition is applied and hooks are invoked.

use bevy_ecs::prelude::Resource;

/// Discrete high-level states the game can be in.
///
/// ```text
/// Setup -> Exploring <-> Paused -> Quitting
///              ^  |
///              |  v
///   GameOver <- AtTable
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    /// Load maps, build the table and spawn the first scene.
    Setup,
    /// Walking around the street or the casino floor.
    Exploring,
    /// Simulation frozen, overlay shown.
    Paused,
    /// Seated at a blackjack table.
    AtTable,
    /// The bankroll ran out; waiting for a restart.
    GameOver,
    Quitting,
}

/// Representation of a requested next state.
///
/// Use [`NextGameState::set`] to mark a transition as pending; an observer
/// will later apply it and reset the value to [`NextGameStates::Unchanged`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

/// Authoritative current game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    /// Create a new state initialized to [`GameStates::None`].
    pub fn new() -> Self {
        GameState {
            current: GameStates::None,
        }
    }
    /// Whether the current state is `state`.
    pub fn is(&self, state: GameStates) -> bool {
        self.current == state
    }
    /// Read-only access to the current state.
    pub fn get(&self) -> &GameStates {
        &self.current
    }
    /// Update the current state immediately.
    ///
    /// Prefer requesting transitions via [`NextGameState`] and the event
    /// observer when setup/teardown hooks must be triggered.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

/// Intent to change to a new game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    /// Create a new value initialized to [`NextGameStates::Unchanged`].
    pub fn new() -> Self {
        NextGameState {
            next: NextGameStates::Unchanged,
        }
    }

    /// Get the current transition request.
    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    /// Request a transition to `next` by marking it as pending.
    ///
    /// An observer will apply the transition and clear the request.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    /// Reset to [`NextGameStates::Unchanged`].
    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for NextGameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_none() {
        let state = GameState::new();
        assert_eq!(state.get(), &GameStates::None);
        assert!(state.is(GameStates::None));
    }

    #[test]
    fn test_next_state_set_and_reset() {
        let mut next = NextGameState::new();
        assert_eq!(next.get(), &NextGameStates::Unchanged);
        next.set(GameStates::AtTable);
        assert_eq!(next.get(), &NextGameStates::Pending(GameStates::AtTable));
        next.reset();
        assert_eq!(next.get(), &NextGameStates::Unchanged);
    }
}
