//! High-level setup: resources, the per-tick schedule and scene spawning.
//!
//! A host application calls [`init_physics`] once, builds the schedule with
//! [`physics_schedule`] (or adds the systems to its own with
//! [`add_physics_systems`]) and then calls [`step`] once per fixed tick.
//!
//! Scenes are plain JSON so the headless binary and the integration tests can
//! lay out bodies without writing spawn code:
//!
//! ```json
//! { "bodies": [
//!     { "x": 0, "y": 0, "collider": { "size": [16, 16], "offset": [-8, -8] },
//!       "velocity": [100, 0], "solid": true },
//!     { "x": 20, "y": 0, "collider": { "size": [32, 32], "offset": [0, 0] },
//!       "solid": true, "interactive": true },
//!     { "x": 0, "y": -40, "forces": [{ "name": "gravity", "value": [0, 600] }] }
//! ] }
//! ```

use std::path::Path;

use bevy_ecs::prelude::*;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::markers::{Interactive, Solid};
use crate::components::rigidbody::RigidBody;
use crate::error::SceneError;
use crate::resources::physicsconfig::PhysicsConfig;
use crate::resources::relations::Relations;
use crate::resources::worldtime::WorldTime;
use crate::spatial::rect::Rect;
use crate::systems::collision::{collision_detector, rebuild_solid_hash};
use crate::systems::movement::movement;
use crate::systems::time::update_world_time;
use crate::systems::touching::touching_detector;

/// Insert every resource the collision systems need.
pub fn init_physics(world: &mut World, config: &PhysicsConfig) {
    world.insert_resource(config.build_hashes());
    world.insert_resource(Relations::default());
    if !world.contains_resource::<WorldTime>() {
        world.insert_resource(WorldTime::default());
    }
    world.insert_resource(config.clone());
}

/// Register the collision tick, strictly ordered.
pub fn add_physics_systems(schedule: &mut Schedule) {
    schedule.add_systems(
        (
            collision_detector,
            rebuild_solid_hash,
            movement,
            touching_detector,
        )
            .chain(),
    );
}

pub fn physics_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    add_physics_systems(&mut schedule);
    schedule
}

/// Advance the clock by `dt` seconds and run one tick.
pub fn step(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

/// One body in a scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyDesc {
    pub name: Option<String>,
    pub x: f32,
    pub y: f32,
    pub collider: Option<BoxCollider>,
    pub velocity: Option<Vec2>,
    pub solid: bool,
    pub interactive: bool,
    pub integer_steps: bool,
    pub friction: f32,
    pub max_speed: Option<f32>,
    pub forces: Vec<ForceDesc>,
    pub frozen: bool,
}

impl BodyDesc {
    /// Whether this body gets a [`RigidBody`] at all.
    fn moves(&self) -> bool {
        self.velocity.is_some() || !self.forces.is_empty()
    }
}

/// Named acceleration force attached to a scene body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceDesc {
    pub name: String,
    pub value: Vec2,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDesc {
    pub bodies: Vec<BodyDesc>,
}

impl SceneDesc {
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Spawn one body. Returns the new entity.
pub fn spawn_body(world: &mut World, body: &BodyDesc) -> Entity {
    let mut entity = world.spawn(MapPosition::new(body.x, body.y));
    if let Some(collider) = body.collider {
        entity.insert(collider);
    }
    if body.moves() {
        let mut rigidbody = RigidBody::with_physics(body.friction, body.max_speed);
        rigidbody.velocity = body.velocity.unwrap_or_default();
        rigidbody.integer_steps = body.integer_steps;
        for force in &body.forces {
            rigidbody.add_force_with_state(&force.name, force.value, force.enabled);
        }
        if body.frozen {
            rigidbody.freeze();
        }
        entity.insert(rigidbody);
    }
    if body.solid {
        entity.insert(Solid);
    }
    if body.interactive {
        entity.insert(Interactive);
    }
    entity.id()
}

/// Spawn every body of `scene` in order.
pub fn spawn_scene(world: &mut World, scene: &SceneDesc) -> Vec<Entity> {
    let entities: Vec<Entity> = scene
        .bodies
        .iter()
        .map(|body| spawn_body(world, body))
        .collect();
    log::info!("Spawned {} bodies", entities.len());
    entities
}

/// Scatter `count` moving solid crates inside `bounds`, skipping spots that
/// would start overlapping an earlier crate.
pub fn spawn_random_bodies(
    world: &mut World,
    rng: &mut fastrand::Rng,
    bounds: Rect,
    count: usize,
    max_speed: f32,
) -> Vec<Entity> {
    let mut placed: Vec<Rect> = Vec::with_capacity(count);
    let mut entities = Vec::with_capacity(count);
    let mut attempts = 0;
    while entities.len() < count && attempts < count * 20 {
        attempts += 1;
        let size = rng.i32(4..=24);
        let x = rng.i32(bounds.left()..bounds.right() - size);
        let y = rng.i32(bounds.top()..bounds.bottom() - size);
        let collider = BoxCollider::new(size, size);
        let rect = collider.world_rect(glam::IVec2::new(x, y));
        if placed.iter().any(|other| other.intersects(&rect)) {
            continue;
        }
        placed.push(rect);

        let velocity = Vec2::new(
            (rng.f32() * 2.0 - 1.0) * max_speed,
            (rng.f32() * 2.0 - 1.0) * max_speed,
        );
        let body = BodyDesc {
            x: x as f32,
            y: y as f32,
            collider: Some(collider),
            velocity: Some(velocity),
            solid: true,
            interactive: rng.bool(),
            ..Default::default()
        };
        entities.push(spawn_body(world, &body));
    }
    if entities.len() < count {
        log::warn!(
            "Only placed {} of {} random bodies without overlap",
            entities.len(),
            count
        );
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_from_json() {
        let scene = SceneDesc::from_json(
            r#"{ "bodies": [
                { "x": 1.5, "y": 2, "collider": { "size": [16, 16], "offset": [-8, -8] },
                  "velocity": [100, 0], "solid": true },
                { "name": "pickup", "interactive": true }
            ] }"#,
        )
        .unwrap();
        assert_eq!(scene.bodies.len(), 2);
        assert_eq!(scene.bodies[0].velocity, Some(Vec2::new(100.0, 0.0)));
        assert!(scene.bodies[0].solid);
        assert!(!scene.bodies[0].interactive);
        assert_eq!(scene.bodies[1].name.as_deref(), Some("pickup"));
        assert!(scene.bodies[1].collider.is_none());
    }

    #[test]
    fn test_bad_scene_json_is_error() {
        assert!(matches!(
            SceneDesc::from_json("{ \"bodies\": 3 }"),
            Err(SceneError::Json(_))
        ));
    }

    #[test]
    fn test_spawn_body_components() {
        let mut world = World::new();
        let body = BodyDesc {
            x: 3.0,
            collider: Some(BoxCollider::new(2, 2)),
            velocity: Some(Vec2::new(1.0, 0.0)),
            solid: true,
            ..Default::default()
        };
        let entity = spawn_body(&mut world, &body);
        assert!(world.get::<Solid>(entity).is_some());
        assert!(world.get::<Interactive>(entity).is_none());
        assert!(world.get::<RigidBody>(entity).is_some());
        assert_eq!(world.get::<MapPosition>(entity).unwrap().pos, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_scene_forces_reach_rigidbody() {
        let scene = SceneDesc::from_json(
            r#"{ "bodies": [
                { "forces": [
                    { "name": "gravity", "value": [0, 600] },
                    { "name": "wind", "value": [50, 0], "enabled": false }
                ] },
                { "velocity": [10, 0], "frozen": true },
                { "x": 5 }
            ] }"#,
        )
        .unwrap();
        let mut world = World::new();
        let entities = spawn_scene(&mut world, &scene);

        let falling = world.get::<RigidBody>(entities[0]).unwrap();
        assert_eq!(falling.velocity, Vec2::ZERO);
        assert_eq!(falling.forces.len(), 2);
        assert!(!falling.forces["wind"].enabled);
        assert_eq!(falling.total_acceleration(), Vec2::new(0.0, 600.0));

        assert!(world.get::<RigidBody>(entities[1]).unwrap().frozen);
        assert!(world.get::<RigidBody>(entities[2]).is_none());
    }

    #[test]
    fn test_random_bodies_do_not_start_overlapping() {
        let mut world = World::new();
        let mut rng = fastrand::Rng::with_seed(7);
        let bounds = Rect::new(0, 0, 512, 512);
        let entities = spawn_random_bodies(&mut world, &mut rng, bounds, 30, 50.0);
        assert!(!entities.is_empty());

        let rects: Vec<Rect> = entities
            .iter()
            .map(|e| {
                let position = world.get::<MapPosition>(*e).unwrap();
                world.get::<BoxCollider>(*e).unwrap().world_rect(position.coords())
            })
            .collect();
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.intersects(b));
            }
        }
    }
}
