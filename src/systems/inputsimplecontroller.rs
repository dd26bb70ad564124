//! Simple input-to-velocity controller.
//!
//! Reads the shared [`InputState`](crate::resources::input::InputState) and
//! applies directional velocities to entities with an
//! [`InputControlled`](crate::components::inputcontrolled::InputControlled)
//! component. WASD and the arrow keys are interchangeable. Diagonal movement
//! is normalized to maintain constant speed.
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::inputcontrolled::InputControlled;
use crate::components::rigidbody::RigidBody;
use crate::resources::input::InputState;

/// Update each controlled entity's `RigidBody` velocity based on input.
pub fn input_simple_controller(
    mut query: Query<(&InputControlled, &mut RigidBody)>,
    input_state: Res<InputState>,
) {
    let (up, down, left, right) = (
        input_state.up(),
        input_state.down(),
        input_state.left(),
        input_state.right(),
    );
    for (keyboard_controlled, mut rigidbody) in query.iter_mut() {
        rigidbody.velocity = Vector2 { x: 0.0, y: 0.0 };

        if up {
            rigidbody.velocity += keyboard_controlled.up_velocity;
        }
        if down {
            rigidbody.velocity += keyboard_controlled.down_velocity;
        }
        if left {
            rigidbody.velocity += keyboard_controlled.left_velocity;
        }
        if right {
            rigidbody.velocity += keyboard_controlled.right_velocity;
        }

        // Normalize diagonal movement
        if (up || down) && (left || right) {
            rigidbody.velocity.x *= std::f32::consts::FRAC_1_SQRT_2;
            rigidbody.velocity.y *= std::f32::consts::FRAC_1_SQRT_2;
        }
    }
}

