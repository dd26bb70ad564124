//! Kinematic body component.
//!
//! Controllers write the desired `velocity` each frame; the tile movement
//! system integrates it and decides, axis by axis, how much of the step the
//! map allows.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Component, Clone, Copy, Debug)]
pub struct RigidBody {
    /// Current velocity in pixels per second.
    pub velocity: Vector2,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity.
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
        }
    }
}
