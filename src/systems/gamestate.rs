//! State transition polling and run conditions.
use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use crate::resources::input::InputState;
use bevy_ecs::prelude::*;

/// Trigger [`GameStateChangedEvent`] when a transition is pending.
pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_exploring(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Exploring)
}

pub fn state_is_at_table(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::AtTable)
}

/// State changes driven directly by keys.
///
/// - Exploring: `Escape` pauses.
/// - Paused: `Escape` resumes, `Q` quits.
/// - AtTable: `Escape` leaves the table, abandoning the hand.
/// - GameOver: `R` restarts on the street.
pub fn game_flow_keys(
    input: Res<InputState>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
) {
    let back = input.action_back.just_pressed;
    match state.get() {
        GameStates::Exploring if back => next_state.set(GameStates::Paused),
        GameStates::Paused if back => next_state.set(GameStates::Exploring),
        GameStates::Paused if input.quit.just_pressed => next_state.set(GameStates::Quitting),
        GameStates::AtTable if back => next_state.set(GameStates::Exploring),
        GameStates::GameOver if input.restart.just_pressed => {
            next_state.set(GameStates::Exploring)
        }
        _ => {}
    }
}
