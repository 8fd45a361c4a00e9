//! Engine systems.
//!
//! This module groups the ECS systems that make up one collision tick, in the
//! order they run:
//!
//! Submodules overview
//! - [`time`] – update simulation time and delta
//! - [`collision`] – rebuild both spatial hashes and the colliding relation
//! - [`movement`] – sweep solids, integrate everything else, post-process velocity
//! - [`touching`] – probe solids in four directions and record touching edges

pub mod collision;
pub mod movement;
pub mod time;
pub mod touching;
