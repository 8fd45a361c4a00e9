//! Marker components selecting which collision passes an entity joins.

use bevy_ecs::prelude::Component;

/// Blocks movement of other solids. Needs a
/// [`BoxCollider`](super::boxcollider::BoxCollider) and a
/// [`MapPosition`](super::mapposition::MapPosition).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Solid;

/// Takes part in the non-blocking overlap relation ("can pick up", "can talk
/// to"). May be combined with [`Solid`].
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Interactive;
