//! ECS resources made available to systems.
//!
//! Overview
//! - `collisionhashes` – the interactive and solid spatial hashes
//! - `debugmode` – presence toggles extra per-tick logging
//! - `physicsconfig` – world bounds, cell sizes and tick length from INI
//! - `relations` – per-tick colliding and touching edges
//! - `worldtime` – simulation time and delta
pub mod collisionhashes;
pub mod debugmode;
pub mod physicsconfig;
pub mod relations;
pub mod worldtime;
