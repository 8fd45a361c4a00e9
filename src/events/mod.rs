//! Event types triggered by the collision systems.
//!
//! - [`collision`] – a swept solid was blocked on one axis

pub mod collision;
