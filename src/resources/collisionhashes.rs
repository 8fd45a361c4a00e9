//! The two spatial hashes the resolver rebuilds every tick.
//!
//! Only the collision systems touch this resource. Gameplay code reads the
//! results from [`Relations`](super::relations::Relations) and
//! [`MapPosition`](crate::components::mapposition::MapPosition) instead.

use bevy_ecs::prelude::*;

use crate::spatial::hash::SpatialHash;

#[derive(Resource, Debug)]
pub struct CollisionHashes {
    /// Interactive entities, for the overlap relation.
    pub interactive: SpatialHash<Entity>,
    /// Solid entities, for sweeps and touching probes.
    pub solid: SpatialHash<Entity>,
}

impl CollisionHashes {
    pub fn new(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        interactive_cell_size: i32,
        solid_cell_size: i32,
    ) -> Self {
        Self {
            interactive: SpatialHash::new(x, y, width, height, interactive_cell_size),
            solid: SpatialHash::new(x, y, width, height, solid_cell_size),
        }
    }

    pub fn clear(&mut self) {
        self.interactive.clear();
        self.solid.clear();
    }
}
