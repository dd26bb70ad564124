//! Neon Casino library.
//!
//! Exposes the blackjack engine and the game's ECS components, resources,
//! systems and events for use by the binary and by integration tests.

pub mod blackjack;
pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
