//! Touching relation.
//!
//! Runs after all movement is resolved. Each solid probes the solid hash with
//! its world rectangle shifted one unit left, right, up and down; every other
//! solid a probe hits gets a [`RelationKind::Touching`] edge in that
//! direction. Two solids resting flush against each other therefore touch
//! without overlapping.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::markers::Solid;
use crate::resources::collisionhashes::CollisionHashes;
use crate::resources::debugmode::DebugMode;
use crate::resources::relations::{Direction, RelationKind, Relations};

pub fn touching_detector(
    query: Query<(Entity, &MapPosition, &BoxCollider), With<Solid>>,
    mut hashes: ResMut<CollisionHashes>,
    mut relations: ResMut<Relations>,
    debug: Option<Res<DebugMode>>,
) {
    relations.clear_touching();
    for (entity, position, collider) in query.iter() {
        let rect = collider.world_rect(position.coords());
        for direction in Direction::ALL {
            let probe = rect.translated(direction.offset());
            for (other, other_rect) in hashes.solid.retrieve_excluding(entity, probe) {
                if other_rect.intersects(&probe) {
                    relations.add_edge(RelationKind::Touching(direction), entity, other);
                }
            }
        }
    }

    if debug.is_some() {
        log::info!(
            "collision relations: {} colliding, {} touching",
            relations.count(RelationKind::Colliding),
            relations.touching_count()
        );
    }
}
