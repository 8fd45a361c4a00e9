//! Overlap detection and hash rebuilding.
//!
//! [`collision_detector`] opens every tick: it clears both spatial hashes,
//! fills the interactive hash and recomputes the colliding relation from
//! scratch. [`rebuild_solid_hash`] then fills the solid hash that the
//! movement and touching systems query.
//!
//! Overlap is decided in two phases. The hash yields every interactive entity
//! that shares a grid cell with the querying rectangle, and an exact AABB test
//! keeps only real intersections.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::markers::{Interactive, Solid};
use crate::resources::collisionhashes::CollisionHashes;
use crate::resources::relations::{RelationKind, Relations};

/// Rebuild the interactive hash and the colliding relation.
///
/// Every interactive entity gets an edge to every other interactive entity its
/// world rectangle intersects, so each overlapping pair ends up with one edge
/// per direction.
pub fn collision_detector(
    query: Query<(Entity, &MapPosition, &BoxCollider), With<Interactive>>,
    mut hashes: ResMut<CollisionHashes>,
    mut relations: ResMut<Relations>,
) {
    hashes.clear();
    for (entity, position, collider) in query.iter() {
        hashes
            .interactive
            .insert(entity, collider.world_rect(position.coords()));
    }

    relations.clear_kind(RelationKind::Colliding);
    for (entity, position, collider) in query.iter() {
        let rect = collider.world_rect(position.coords());
        for (other, other_rect) in hashes.interactive.retrieve_excluding(entity, rect) {
            if other_rect.intersects(&rect) {
                relations.add_edge(RelationKind::Colliding, entity, other);
            }
        }
    }

    log::debug!(
        "collision_detector: {} interactive, {} colliding edges",
        hashes.interactive.len(),
        relations.count(RelationKind::Colliding)
    );
}

/// Fill the solid hash with every solid's current world rectangle.
pub fn rebuild_solid_hash(
    query: Query<(Entity, &MapPosition, &BoxCollider), With<Solid>>,
    mut hashes: ResMut<CollisionHashes>,
) {
    for (entity, position, collider) in query.iter() {
        hashes
            .solid
            .insert(entity, collider.world_rect(position.coords()));
    }
}
