//! Collision event types.
//!
//! The movement system triggers a [`BlockedEvent`] whenever a swept solid is
//! stopped by another solid on one axis. Observers can subscribe to this event
//! to react in a decoupled manner (bump sounds, damage, AI re-pathing).
//!
//! Persistent adjacency is better read from the touching relation in
//! [`Relations`](crate::resources::relations::Relations); this event fires on
//! every tick the body keeps pushing.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::spatial::sweep::Axis;

/// A moving solid was stopped by `blocker` while sweeping along `axis`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockedEvent {
    pub entity: Entity,
    pub blocker: Entity,
    pub axis: Axis,
}

/// Observer that logs every blocked sweep at debug level.
///
/// Use this as a reference or replace it with your own game-specific logic.
pub fn observe_log_blocked(trigger: On<BlockedEvent>) {
    let event = trigger.event();
    log::debug!(
        "{:?} blocked by {:?} on {:?}",
        event.entity,
        event.blocker,
        event.axis
    );
}
