//! Shared 2D camera resource.
//!
//! Wraps raylib's [`raylib::prelude::Camera2D`]. The camera follow system
//! writes it every frame while exploring; the world renderer reads it.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera2D, Vector2};

/// ECS resource that holds the active 2D camera parameters.
#[derive(Resource)]
pub struct Camera2DRes(pub Camera2D);

impl Camera2DRes {
    /// Camera looking at the world origin, with `offset` at the screen centre.
    pub fn centered(screen_w: f32, screen_h: f32) -> Self {
        Camera2DRes(Camera2D {
            offset: Vector2::new(screen_w / 2.0, screen_h / 2.0),
            target: Vector2::zero(),
            rotation: 0.0,
            zoom: 1.0,
        })
    }
}
