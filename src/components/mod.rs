//! ECS components for entities.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned box used for tile collision and proximity
//! - [`inputcontrolled`] – keyboard-driven movement intent
//! - [`mapposition`] – world-space position (top-left of the box)
//! - [`npc`] – casino characters, their dialogue and wandering state
//! - [`persistent`] – marker for entities that survive scene switches
//! - [`player`] – marker for the player character
//! - [`rigidbody`] – kinematic body storing velocity

pub mod boxcollider;
pub mod inputcontrolled;
pub mod mapposition;
pub mod npc;
pub mod persistent;
pub mod player;
pub mod rigidbody;
