use bevy_ecs::prelude::Component;
use glam::{IVec2, Vec2};

use crate::spatial::sweep::to_coords;

/// World-space position of an entity.
///
/// `pos` is the float accumulator the movement systems integrate into, so
/// sub-unit velocities are not lost between ticks. Everything that collides
/// reads the rounded [`coords`](Self::coords).
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    /// Published integer coordinate.
    pub fn coords(&self) -> IVec2 {
        to_coords(self.pos)
    }

    /// Move instantly, e.g. a teleport from gameplay code.
    pub fn set(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_rounds() {
        assert_eq!(MapPosition::new(1.67, -2.2).coords(), IVec2::new(2, -2));
        assert_eq!(MapPosition::new(0.49, 0.5).coords(), IVec2::new(0, 1));
    }
}
