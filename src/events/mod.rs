//! Event types and observers.
//!
//! Events let systems communicate without direct dependencies: a system
//! triggers the event and the observer applies it to the world.
//!
//! Submodules:
//! - [`gamestate`] – apply pending state transitions and run state hooks
//! - [`scene`] – swap the active map and respawn its actors
//! - [`switchdebug`] – toggle the debug overlay
//! - [`table`] – player actions at the blackjack table
pub mod gamestate;
pub mod scene;
pub mod switchdebug;
pub mod table;
