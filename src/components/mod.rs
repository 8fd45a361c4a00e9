//! ECS components for entities.
//!
//! This module groups the component types the collision systems read and
//! write.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned rectangular collider, local to the position
//! - [`mapposition`] – world-space position with a float accumulator
//! - [`markers`] – `Solid` and `Interactive` pass selectors
//! - [`rigidbody`] – velocity plus named forces, friction and speed clamp

pub mod boxcollider;
pub mod mapposition;
pub mod markers;
pub mod rigidbody;
