//! ECS resources made available to systems.
//!
//! Overview
//! - `camera2d` – shared 2D camera used for the world view
//! - `debugmode` – presence toggles the debug overlay
//! - `gameconfig` – settings loaded from `config.ini`
//! - `gamerng` – seedable generator for world behaviour
//! - `gamestate` – authoritative and pending high-level game state
//! - `hudmessage` – transient dialogue line
//! - `input` – per-frame keyboard and mouse state
//! - `scene` – active scene and where the player left the others
//! - `screensize` – current framebuffer dimensions in pixels
//! - `systemsstore` – state hooks by name
//! - `table` – the blackjack session
//! - `tilemap` – tile kinds, collision grid and map files
//! - `tilemapstore` – loaded scene maps
//! - `worldtime` – simulation time and delta
pub mod camera2d;
pub mod debugmode;
pub mod gameconfig;
pub mod gamerng;
pub mod gamestate;
pub mod hudmessage;
pub mod input;
pub mod scene;
pub mod screensize;
pub mod systemsstore;
pub mod table;
pub mod tilemap;
pub mod tilemapstore;
pub mod worldtime;
