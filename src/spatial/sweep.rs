//! Axis-separated, unit-stepped sweep against a hash of solid rectangles.
//!
//! A moving body advances one whole unit at a time along X, then along Y from
//! the X-resolved position. At every step its rectangle is tested against the
//! other solids; the first hit snaps that axis back to the last free integer
//! coordinate. Resolving the axes independently is what lets a body slide along
//! a wall it runs into diagonally.
//!
//! Bodies that already overlap a solid when the sweep starts are not pushed
//! apart. The sweep only refuses new overlaps.

use std::hash::Hash;
use std::iter::FusedIterator;

use glam::{IVec2, Vec2};

use super::hash::SpatialHash;
use super::rect::Rect;

/// Which axis a sweep was resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Integer coordinates after `from` up to and including `to`, stepping toward
/// `to`. Empty when `from == to`.
pub fn walk(from: i32, to: i32) -> Walk {
    Walk {
        next: from,
        to,
        step: to.cmp(&from) as i32,
    }
}

#[derive(Debug, Clone)]
pub struct Walk {
    next: i32,
    to: i32,
    step: i32,
}

impl Iterator for Walk {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.next == self.to {
            return None;
        }
        self.next += self.step;
        Some(self.next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.to as i64 - self.next as i64).unsigned_abs() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Walk {}

impl FusedIterator for Walk {}

/// Outcome of [`sweep`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepResult<K> {
    /// Resolved float position. Unblocked axes keep their sub-unit remainder.
    pub position: Vec2,
    /// Solid that stopped the X walk.
    pub blocked_x: Option<K>,
    /// Solid that stopped the Y walk.
    pub blocked_y: Option<K>,
}

impl<K> SweepResult<K> {
    pub fn is_blocked(&self) -> bool {
        self.blocked_x.is_some() || self.blocked_y.is_some()
    }
}

/// Public integer coordinate of a float position.
pub fn to_coords(position: Vec2) -> IVec2 {
    position.round().as_ivec2()
}

/// Move `id` from `position` by `displacement`, refusing to enter any other
/// rectangle in `solids`.
///
/// `local` is the body's rectangle relative to its position. The body itself
/// may be present in `solids`; it is never tested against itself.
///
/// A non-finite displacement or target is treated as no movement.
pub fn sweep<K: Copy + Eq + Hash>(
    solids: &mut SpatialHash<K>,
    id: K,
    local: Rect,
    position: Vec2,
    displacement: Vec2,
) -> SweepResult<K> {
    let mut target = position + displacement;
    if !target.is_finite() {
        log::warn!("sweep ignored non-finite displacement {displacement:?} from {position:?}");
        target = position;
    }
    let start = to_coords(position);

    let (x, blocked_x) = sweep_axis(
        solids,
        id,
        local,
        start,
        Axis::X,
        position.x,
        target.x,
    );
    let resolved_x = x.round() as i32;
    let (y, blocked_y) = sweep_axis(
        solids,
        id,
        local,
        IVec2::new(resolved_x, start.y),
        Axis::Y,
        position.y,
        target.y,
    );

    SweepResult {
        position: Vec2::new(x, y),
        blocked_x,
        blocked_y,
    }
}

fn sweep_axis<K: Copy + Eq + Hash>(
    solids: &mut SpatialHash<K>,
    id: K,
    local: Rect,
    start: IVec2,
    axis: Axis,
    from: f32,
    to: f32,
) -> (f32, Option<K>) {
    let (first, last) = match axis {
        Axis::X => (start.x, to.round() as i32),
        Axis::Y => (start.y, to.round() as i32),
    };

    let mut last_valid = first;
    for step in walk(first, last) {
        let at = match axis {
            Axis::X => IVec2::new(step, start.y),
            Axis::Y => IVec2::new(start.x, step),
        };
        let rect = local.translated(at);
        if let Some((other, _)) = solids.first_overlap(id, rect) {
            log::trace!("sweep {:?} blocked at {} of {} -> {}", axis, step, from, to);
            return (last_valid as f32, Some(other));
        }
        last_valid = step;
    }
    (to, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn solids() -> SpatialHash<u32> {
        SpatialHash::new(-256, -256, 512, 512, 32)
    }

    // ==================== WALK TESTS ====================

    #[test]
    fn test_walk_forward() {
        assert_eq!(walk(0, 4).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_walk_backward() {
        assert_eq!(walk(2, -2).collect::<Vec<_>>(), vec![1, 0, -1, -2]);
    }

    #[test]
    fn test_walk_empty_when_equal() {
        assert_eq!(walk(5, 5).count(), 0);
    }

    #[test]
    fn test_walk_len() {
        assert_eq!(walk(-3, 7).len(), 10);
    }

    #[test]
    fn test_walk_at_integer_limits() {
        assert_eq!(walk(i32::MAX - 2, i32::MAX).collect::<Vec<_>>(), vec![i32::MAX - 1, i32::MAX]);
        assert_eq!(walk(i32::MIN + 1, i32::MIN).collect::<Vec<_>>(), vec![i32::MIN]);
        assert_eq!(walk(i32::MIN, i32::MAX).len(), u32::MAX as usize);
    }

    // ==================== SWEEP TESTS ====================

    #[test]
    fn test_zero_displacement_is_noop() {
        let mut h = solids();
        h.insert(1, Rect::new(-8, -8, 16, 16));
        let result = sweep(&mut h, 1, Rect::new(-8, -8, 16, 16), Vec2::new(0.25, 0.0), Vec2::ZERO);
        assert_eq!(result.position, Vec2::new(0.25, 0.0));
        assert!(!result.is_blocked());
    }

    #[test]
    fn test_unblocked_keeps_fraction() {
        let mut h = solids();
        let local = Rect::new(-8, -8, 16, 16);
        h.insert(1, local);
        h.insert(2, Rect::new(20, 0, 32, 32));

        let result = sweep(&mut h, 1, local, Vec2::ZERO, Vec2::new(100.0 / 60.0, 0.0));
        assert!(approx_eq(result.position.x, 1.6666666));
        assert_eq!(to_coords(result.position).x, 2);
        assert_eq!(result.blocked_x, None);
    }

    #[test]
    fn test_blocked_snaps_flush() {
        let mut h = solids();
        let local = Rect::new(-8, -8, 16, 16);
        h.insert(1, local);
        h.insert(2, Rect::new(20, 0, 32, 32));

        let result = sweep(&mut h, 1, local, Vec2::ZERO, Vec2::new(2000.0 / 60.0, 0.0));
        assert_eq!(result.position.x, 12.0);
        assert_eq!(result.blocked_x, Some(2));
        let moved = local.translated(to_coords(result.position));
        assert_eq!(moved.right(), 20);
        assert!(!moved.intersects(&Rect::new(20, 0, 32, 32)));
    }

    #[test]
    fn test_sub_unit_steps_accumulate() {
        let mut h = solids();
        let local = Rect::new(0, 0, 4, 4);
        h.insert(1, local);

        let mut position = Vec2::ZERO;
        for _ in 0..10 {
            position = sweep(&mut h, 1, local, position, Vec2::new(0.3, 0.0)).position;
        }
        assert!(approx_eq(position.x, 3.0));
    }

    #[test]
    fn test_slides_along_wall() {
        let mut h = solids();
        let local = Rect::new(0, 0, 8, 8);
        h.insert(1, local);
        // tall wall directly to the right
        h.insert(2, Rect::new(8, -100, 8, 200));

        let result = sweep(&mut h, 1, local, Vec2::ZERO, Vec2::new(5.0, 5.0));
        assert_eq!(result.position, Vec2::new(0.0, 5.0));
        assert_eq!(result.blocked_x, Some(2));
        assert_eq!(result.blocked_y, None);
    }

    #[test]
    fn test_negative_direction_blocked() {
        let mut h = solids();
        let local = Rect::new(0, 0, 8, 8);
        h.insert(1, local.translated(IVec2::new(0, 40)));
        h.insert(2, Rect::new(0, 0, 8, 8));

        let result = sweep(&mut h, 1, local, Vec2::new(0.0, 40.0), Vec2::new(0.0, -100.0));
        assert_eq!(result.position, Vec2::new(0.0, 8.0));
        assert_eq!(result.blocked_y, Some(2));
    }

    #[test]
    fn test_fast_body_does_not_tunnel() {
        let mut h = solids();
        let local = Rect::new(0, 0, 4, 4);
        h.insert(1, local);
        // one unit thin wall
        h.insert(2, Rect::new(50, 0, 1, 4));

        let result = sweep(&mut h, 1, local, Vec2::ZERO, Vec2::new(200.0, 0.0));
        assert_eq!(result.position.x, 46.0);
    }

    #[test]
    fn test_pre_existing_overlap_not_separated() {
        let mut h = solids();
        let local = Rect::new(0, 0, 8, 8);
        h.insert(1, local);
        h.insert(2, Rect::new(4, 0, 8, 8));

        let result = sweep(&mut h, 1, local, Vec2::ZERO, Vec2::new(-3.0, 0.0));
        assert_eq!(result.position.x, 0.0);
        assert_eq!(result.blocked_x, Some(2));
    }

    #[test]
    fn test_non_finite_displacement_does_not_move() {
        let mut h = solids();
        let local = Rect::new(0, 0, 4, 4);
        h.insert(1, local);
        let start = Vec2::new(3.25, -2.0);

        for displacement in [
            Vec2::new(f32::INFINITY, 0.0),
            Vec2::new(0.0, f32::NEG_INFINITY),
            Vec2::new(f32::NAN, 1.0),
        ] {
            let result = sweep(&mut h, 1, local, start, displacement);
            assert_eq!(result.position, start);
            assert!(!result.is_blocked());
        }
    }
}
