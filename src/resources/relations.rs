//! Per-tick collision relations.
//!
//! [`Relations`] is a small directed multigraph keyed by
//! `(RelationKind, source)`. The resolver rebuilds it from scratch every tick,
//! so an edge only ever describes the current frame:
//!
//! - [`RelationKind::Colliding`] – two interactive rectangles overlap. The
//!   relation is symmetric in meaning and stored as one edge each way.
//! - [`RelationKind::Touching`] – the source solid, probed one unit in the
//!   given direction, meets the target solid.
//!
//! Gameplay systems scheduled after the resolver read edges with
//! [`Relations::edges_from`] and [`Relations::has_edge`].
//!
//! # Usage
//!
//! ```ignore
//! fn bump_sound(relations: Res<Relations>, players: Query<Entity, With<Player>>) {
//!     for player in players.iter() {
//!         if !relations.edges_from(RelationKind::Touching(Direction::Up), player).is_empty() {
//!             // head hit something
//!         }
//!     }
//! }
//! ```

use bevy_ecs::prelude::*;
use glam::IVec2;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Cardinal probe direction. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// One-unit offset toward this direction.
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Colliding,
    Touching(Direction),
}

/// Targets of one source. Most entities touch or overlap only a handful of
/// others, so they stay inline.
type Targets = SmallVec<[Entity; 4]>;

#[derive(Debug, Default, Clone)]
struct EdgeSet {
    edges: FxHashMap<Entity, Targets>,
}

impl EdgeSet {
    fn add(&mut self, source: Entity, target: Entity) -> bool {
        let targets = self.edges.entry(source).or_default();
        if targets.contains(&target) {
            return false;
        }
        targets.push(target);
        true
    }

    fn remove(&mut self, source: Entity, target: Entity) -> bool {
        let Some(targets) = self.edges.get_mut(&source) else {
            return false;
        };
        let Some(index) = targets.iter().position(|t| *t == target) else {
            return false;
        };
        targets.swap_remove(index);
        if targets.is_empty() {
            self.edges.remove(&source);
        }
        true
    }

    fn targets(&self, source: Entity) -> &[Entity] {
        self.edges.get(&source).map(|t| t.as_slice()).unwrap_or(&[])
    }

    fn len(&self) -> usize {
        self.edges.values().map(|t| t.len()).sum()
    }
}

/// Directed collision edges for the current tick.
#[derive(Resource, Debug, Default, Clone)]
pub struct Relations {
    colliding: EdgeSet,
    touching: [EdgeSet; 4],
}

impl Relations {
    fn set(&self, kind: RelationKind) -> &EdgeSet {
        match kind {
            RelationKind::Colliding => &self.colliding,
            RelationKind::Touching(direction) => &self.touching[direction.index()],
        }
    }

    fn set_mut(&mut self, kind: RelationKind) -> &mut EdgeSet {
        match kind {
            RelationKind::Colliding => &mut self.colliding,
            RelationKind::Touching(direction) => &mut self.touching[direction.index()],
        }
    }

    /// Add `source -> target`. Returns false if the edge already existed.
    pub fn add_edge(&mut self, kind: RelationKind, source: Entity, target: Entity) -> bool {
        self.set_mut(kind).add(source, target)
    }

    /// Remove `source -> target`. Returns false if there was no such edge.
    pub fn remove_edge(&mut self, kind: RelationKind, source: Entity, target: Entity) -> bool {
        self.set_mut(kind).remove(source, target)
    }

    pub fn has_edge(&self, kind: RelationKind, source: Entity, target: Entity) -> bool {
        self.set(kind).targets(source).contains(&target)
    }

    /// Every target `source` points at.
    pub fn edges_from(&self, kind: RelationKind, source: Entity) -> &[Entity] {
        self.set(kind).targets(source)
    }

    /// Targets touched by `source` in any direction, with the direction.
    pub fn touching(&self, source: Entity) -> impl Iterator<Item = (Direction, Entity)> + '_ {
        Direction::ALL.into_iter().flat_map(move |direction| {
            self.touching[direction.index()]
                .targets(source)
                .iter()
                .map(move |target| (direction, *target))
        })
    }

    /// Drop every outgoing edge of `source` for `kind`.
    pub fn clear_from(&mut self, kind: RelationKind, source: Entity) {
        self.set_mut(kind).edges.remove(&source);
    }

    /// Drop every edge of `kind`.
    pub fn clear_kind(&mut self, kind: RelationKind) {
        self.set_mut(kind).edges.clear();
    }

    /// Drop every touching edge in all four directions.
    pub fn clear_touching(&mut self) {
        for set in &mut self.touching {
            set.edges.clear();
        }
    }

    /// Number of edges stored for `kind`.
    pub fn count(&self, kind: RelationKind) -> usize {
        self.set(kind).len()
    }

    /// Number of touching edges across all directions.
    pub fn touching_count(&self) -> usize {
        self.touching.iter().map(EdgeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn test_add_edge_is_directed() {
        let e = entities(2);
        let mut relations = Relations::default();
        assert!(relations.add_edge(RelationKind::Colliding, e[0], e[1]));
        assert!(relations.has_edge(RelationKind::Colliding, e[0], e[1]));
        assert!(!relations.has_edge(RelationKind::Colliding, e[1], e[0]));
    }

    #[test]
    fn test_duplicate_edge_not_stored_twice() {
        let e = entities(2);
        let mut relations = Relations::default();
        relations.add_edge(RelationKind::Colliding, e[0], e[1]);
        assert!(!relations.add_edge(RelationKind::Colliding, e[0], e[1]));
        assert_eq!(relations.edges_from(RelationKind::Colliding, e[0]), &[e[1]]);
        assert_eq!(relations.count(RelationKind::Colliding), 1);
    }

    #[test]
    fn test_kinds_are_independent() {
        let e = entities(2);
        let mut relations = Relations::default();
        relations.add_edge(RelationKind::Touching(Direction::Right), e[0], e[1]);
        assert!(relations.edges_from(RelationKind::Colliding, e[0]).is_empty());
        assert!(relations
            .edges_from(RelationKind::Touching(Direction::Left), e[0])
            .is_empty());
        assert_eq!(
            relations.touching(e[0]).collect::<Vec<_>>(),
            vec![(Direction::Right, e[1])]
        );
    }

    #[test]
    fn test_remove_edge() {
        let e = entities(3);
        let mut relations = Relations::default();
        relations.add_edge(RelationKind::Colliding, e[0], e[1]);
        relations.add_edge(RelationKind::Colliding, e[0], e[2]);
        assert!(relations.remove_edge(RelationKind::Colliding, e[0], e[1]));
        assert!(!relations.remove_edge(RelationKind::Colliding, e[0], e[1]));
        assert_eq!(relations.edges_from(RelationKind::Colliding, e[0]), &[e[2]]);
    }

    #[test]
    fn test_clear_from_and_clear_kind() {
        let e = entities(3);
        let mut relations = Relations::default();
        relations.add_edge(RelationKind::Colliding, e[0], e[1]);
        relations.add_edge(RelationKind::Colliding, e[1], e[0]);
        relations.add_edge(RelationKind::Touching(Direction::Down), e[2], e[0]);

        relations.clear_from(RelationKind::Colliding, e[0]);
        assert!(relations.edges_from(RelationKind::Colliding, e[0]).is_empty());
        assert_eq!(relations.count(RelationKind::Colliding), 1);

        relations.clear_kind(RelationKind::Colliding);
        assert_eq!(relations.count(RelationKind::Colliding), 0);
        assert_eq!(relations.touching_count(), 1);

        relations.clear_touching();
        assert_eq!(relations.touching_count(), 0);
    }

    #[test]
    fn test_direction_offsets_are_opposite() {
        for direction in Direction::ALL {
            assert_eq!(direction.offset(), -direction.opposite().offset());
        }
    }
}
