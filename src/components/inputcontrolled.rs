//! Keyboard-driven movement component.
//!
//! [`crate::systems::inputsimplecontroller::input_simple_controller`] reads
//! the shared input state and turns it into a velocity on entities carrying
//! [`InputControlled`].

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Movement intent derived from player keyboard input.
///
/// Each field stores the velocity to apply when the corresponding directional
/// input is active.
#[derive(Component, Clone, Copy, Debug)]
pub struct InputControlled {
    /// Velocity when moving up.
    pub up_velocity: Vector2,
    /// Velocity when moving down.
    pub down_velocity: Vector2,
    /// Velocity when moving left.
    pub left_velocity: Vector2,
    /// Velocity when moving right.
    pub right_velocity: Vector2,
}

impl InputControlled {
    /// Create an InputControlled component with specified velocities.
    pub fn new(up: Vector2, down: Vector2, left: Vector2, right: Vector2) -> Self {
        Self {
            up_velocity: up,
            down_velocity: down,
            left_velocity: left,
            right_velocity: right,
        }
    }

    /// Same speed in the four screen directions.
    pub fn with_speed(speed: f32) -> Self {
        Self::new(
            Vector2::new(0.0, -speed),
            Vector2::new(0.0, speed),
            Vector2::new(-speed, 0.0),
            Vector2::new(speed, 0.0),
        )
    }
}
