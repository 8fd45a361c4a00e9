//! Debug toggle resource.
//!
//! The mere presence of this resource indicates that the collision systems
//! should log per-tick relation counts. Remove it to disable.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, systems print extra logs.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode {}
