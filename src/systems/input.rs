//! Input systems.
//!
//! [`update_input_state`] reads hardware input from Raylib each frame and
//! writes the results into [`InputState`]. The debug toggle is emitted here
//! as a [`SwitchDebugEvent`] since it works in every state.
use bevy_ecs::prelude::*;
use raylib::prelude::MouseButton;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;

/// Poll Raylib for keyboard and mouse input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    for state in input.keys_mut() {
        let key = state.key_binding;
        state.update(
            rl.is_key_down(key),
            rl.is_key_pressed(key),
            rl.is_key_released(key),
        );
    }

    input.pointer.position = rl.get_mouse_position();
    input.pointer.primary_down = rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT);
    input.pointer.primary_pressed = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT);

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}
