//! Aberred Motion library.
//!
//! Movement and collision for top-down 2D worlds built on `bevy_ecs`: a
//! generic grid spatial hash, an axis-separated unit-stepped sweep that keeps
//! solids from interpenetrating, and per-tick colliding / touching relations
//! for gameplay systems to read.
//!
//! This module exposes the components, resources, systems, and events for use
//! in integration tests and as a reusable library.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod spatial;
pub mod systems;
