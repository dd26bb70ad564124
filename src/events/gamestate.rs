//! Game state transition event and observer.
//!
//! Systems request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers the
//! observer in this module, which applies the transition to [`GameState`]
//! and runs the exit hook of the old state and the enter hook of the new one
//! from [`SystemsStore`].
//!
//! Hooks by name:
//!
//! | state     | enter             | exit           |
//! |-----------|-------------------|----------------|
//! | Setup     | `setup`           |                |
//! | AtTable   | `enter_table`     | `exit_table`   |
//! | GameOver  | `enter_game_over` | `restart_game` |
//! | Quitting  | `quit_game`       |                |
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
///
/// Emitting this event causes [`observe_gamestate_change_event`] to read
/// [`NextGameState`]. If it contains [`Pending`], the observer updates the
/// authoritative [`GameState`], runs exit/enter hooks, and clears the pending
/// value; if it is [`Unchanged`], nothing happens.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// If any required resource is missing, logs a diagnostic and returns.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Res<SystemsStore>,
) {
    debug!("GameStateChangedEvent triggered");

    if let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    {
        let next_state_value = next_game_state.get().clone();
        match next_state_value {
            Pending(new_state) => {
                let old_state = game_state.get().clone();
                if old_state == new_state {
                    debug!("Already in {:?}, ignoring transition", new_state);
                    next_game_state.reset();
                    return;
                }
                info!("Transitioning from {:?} to {:?}", old_state, new_state);
                game_state.set(new_state.clone());
                next_game_state.reset();
                on_state_exit(&old_state, &mut commands, &systems_store);
                on_state_enter(&new_state, &mut commands, &systems_store);
            }
            Unchanged => {
                debug!("No state change pending.");
            }
        }
    } else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
    }
}

fn run_hook(name: &str, commands: &mut Commands, systems_store: &SystemsStore) {
    match systems_store.get(name) {
        Some(id) => commands.run_system(*id),
        None => warn!("State hook '{}' not found in SystemsStore", name),
    }
}

fn on_state_enter(state: &GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    match state {
        GameStates::None => debug!("Entered None state"),
        GameStates::Setup => run_hook("setup", commands, systems_store),
        GameStates::Exploring => debug!("Entered Exploring state"),
        GameStates::Paused => debug!("Entered Paused state"),
        GameStates::AtTable => run_hook("enter_table", commands, systems_store),
        GameStates::GameOver => run_hook("enter_game_over", commands, systems_store),
        GameStates::Quitting => run_hook("quit_game", commands, systems_store),
    }
}

fn on_state_exit(state: &GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    match state {
        GameStates::AtTable => run_hook("exit_table", commands, systems_store),
        GameStates::GameOver => run_hook("restart_game", commands, systems_store),
        other => debug!("Exited {:?} state", other),
    }
}
