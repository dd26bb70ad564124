//! Debug overlay toggle.
//!
//! While this resource exists the renderer outlines solid cells, actor boxes
//! and interaction ranges, and prints the player's cell. F1 or `--debug`
//! inserts it.

use bevy_ecs::prelude::Resource;

/// Marker resource: present while the debug overlay is on.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode {}
