//! Player marker component.
//!
//! Exactly one entity carries [`Player`] while a scene is loaded. Interaction,
//! the camera and the table check all look it up through this marker.

use bevy_ecs::prelude::Component;

/// Width of the player's bounding box in pixels.
pub const PLAYER_WIDTH: f32 = 22.0;
/// Height of the player's bounding box in pixels.
pub const PLAYER_HEIGHT: f32 = 28.0;

/// Marker for the player-controlled character.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
