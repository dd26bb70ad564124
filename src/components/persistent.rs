//! Persistent entity marker component.
//!
//! Scene switches despawn every entity without [`Persistent`]. Observers and
//! registered state hooks carry it so they survive.

use bevy_ecs::prelude::Component;

/// Tag component used to mark entities that should persist across scene changes.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
