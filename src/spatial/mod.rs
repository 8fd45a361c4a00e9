//! Broad-phase and sweep primitives with no knowledge of the ECS.
//!
//! Submodules overview
//! - [`rect`] – integer AABB and the narrow-phase intersection test
//! - [`pool`] – reusable deduplication sets handed out per query
//! - [`hash`] – generic uniform-grid spatial hash
//! - [`sweep`] – unit-stepped, axis-separated movement against a hash

pub mod hash;
pub mod pool;
pub mod rect;
pub mod sweep;

pub use hash::SpatialHash;
pub use rect::Rect;
