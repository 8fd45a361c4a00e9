//! Position integration.
//!
//! Solid bodies with a collider are swept unit by unit through the solid hash
//! (see [`crate::spatial::sweep`]) and stop flush against other solids. Every
//! other body simply adds `velocity * delta`, floored to whole units when
//! the body asks for integer steps.
//!
//! A swept body that ends up somewhere new is inserted into the solid hash
//! again so that bodies moving after it, and the touching probes, see where it
//! actually is.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::markers::Solid;
use crate::components::rigidbody::RigidBody;
use crate::events::collision::BlockedEvent;
use crate::resources::collisionhashes::CollisionHashes;
use crate::resources::worldtime::WorldTime;
use crate::spatial::sweep::{Axis, sweep};

pub fn movement(
    mut query: Query<(
        Entity,
        &mut MapPosition,
        &mut RigidBody,
        Option<&BoxCollider>,
        Has<Solid>,
    )>,
    mut hashes: ResMut<CollisionHashes>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    let delta = time.delta;
    for (entity, mut position, mut rigidbody, collider, solid) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }

        match collider.filter(|_| solid) {
            Some(collider) => {
                let result = sweep(
                    &mut hashes.solid,
                    entity,
                    collider.local_rect(),
                    position.pos,
                    rigidbody.velocity * delta,
                );
                if result.position != position.pos {
                    position.pos = result.position;
                    let rect = collider.world_rect(position.coords());
                    if hashes.solid.rect(entity) != Some(rect) {
                        hashes.solid.insert(entity, rect);
                    }
                }
                if let Some(blocker) = result.blocked_x {
                    log::trace!("{:?} blocked on X by {:?}", entity, blocker);
                    commands.trigger(BlockedEvent {
                        entity,
                        blocker,
                        axis: Axis::X,
                    });
                }
                if let Some(blocker) = result.blocked_y {
                    log::trace!("{:?} blocked on Y by {:?}", entity, blocker);
                    commands.trigger(BlockedEvent {
                        entity,
                        blocker,
                        axis: Axis::Y,
                    });
                }
            }
            None => {
                let displacement = rigidbody.displacement(delta);
                if displacement != glam::Vec2::ZERO {
                    position.pos += displacement;
                }
            }
        }

        rigidbody.post_step(delta);
    }
}
