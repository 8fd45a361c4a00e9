use bevy_ecs::prelude::Component;
use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::spatial::rect::Rect;
use crate::spatial::sweep::to_coords;

/// Axis-aligned collision footprint relative to the entity's [`MapPosition`].
///
/// [`MapPosition`]: super::mapposition::MapPosition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component, Serialize, Deserialize)]
pub struct BoxCollider {
    pub size: IVec2,
    pub offset: IVec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: IVec2::new(width, height),
            offset: IVec2::ZERO,
        }
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, offset: IVec2) -> Self {
        self.offset = offset;
        self
    }

    /// Collider centered on the entity origin.
    pub fn centered(width: i32, height: i32) -> Self {
        Self::new(width, height).with_offset(IVec2::new(-width / 2, -height / 2))
    }

    /// Local rectangle. Handles negative size by normalizing to proper min/max.
    pub fn local_rect(&self) -> Rect {
        let p0 = self.offset;
        let p1 = p0 + self.size;
        let min = p0.min(p1);
        let max = p0.max(p1);
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// World rectangle for an entity standing at integer `coords`.
    pub fn world_rect(&self, coords: IVec2) -> Rect {
        self.local_rect().translated(coords)
    }

    /// World rectangle for a float position, rounded the way positions are
    /// published.
    pub fn world_rect_at(&self, position: Vec2) -> Rect {
        self.world_rect(to_coords(position))
    }

    /// AABB overlap test against another BoxCollider at a different entity position.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        self.world_rect_at(position)
            .intersects(&other.world_rect_at(other_position))
    }
}
