//! Game systems.
//!
//! Submodules overview
//! - [`camera`] – follow the player, clamped to the map
//! - [`gamestate`] – pending transitions, run conditions and flow keys
//! - [`input`] – read hardware input into [`crate::resources::input::InputState`]
//! - [`inputsimplecontroller`] – translate input state into velocity
//! - [`interaction`] – doors, NPC talk and sitting down while exploring
//! - [`movement`] – axis-separated movement against the tile grid
//! - [`npc`] – patron wandering
//! - [`render`] – draw the world, the table screen and overlays
//! - [`table`] – table buttons, table input and the round clock
//! - [`time`] – advance simulation time

pub mod camera;
pub mod gamestate;
pub mod input;
pub mod inputsimplecontroller;
pub mod interaction;
pub mod movement;
pub mod npc;
pub mod render;
pub mod table;
pub mod time;
