//! Kinematic body component with multiple named acceleration forces.
//!
//! The [`RigidBody`] component stores the velocity the movement system
//! integrates each tick, plus the parameters of the velocity post-processing
//! step that runs after integration: named acceleration forces that can be
//! toggled independently (gravity, wind, motor thrust), friction and an
//! optional speed clamp.
//!
//! Post-processing only ever looks at the velocity, never at collisions, so
//! the sweep does not depend on it.
//!
//! The `frozen` flag allows temporarily disabling all movement calculations,
//! useful when an entity's position is controlled externally.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use rustc_hash::FxHashMap;

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccelerationForce {
    /// The acceleration vector in world units per second squared.
    pub value: Vec2,
    /// Whether this force is currently active.
    pub enabled: bool,
}

impl AccelerationForce {
    /// Create a new enabled acceleration force.
    pub fn new(value: Vec2) -> Self {
        Self {
            value,
            enabled: true,
        }
    }

    /// Create a new acceleration force with specified enabled state.
    pub fn with_enabled(value: Vec2, enabled: bool) -> Self {
        Self { value, enabled }
    }
}

/// Kinematic body storing velocity and multiple named acceleration forces.
///
/// # Fields
/// - `velocity` - Current velocity in world units per second
/// - `forces` - Named acceleration forces that can be individually toggled
/// - `friction` - Velocity damping factor (0.0 = no friction, higher = more drag)
/// - `max_speed` - Optional maximum speed clamp
/// - `integer_steps` - Non-solid bodies move by whole units only
/// - `frozen` - When true, movement system skips all calculations for this entity
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_physics(5.0, Some(300.0));
/// rb.add_force("gravity", Vec2::new(0.0, 980.0));
/// rb.set_force_enabled("gravity", false);
/// ```
#[derive(Component, Clone, Debug, Default)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Named acceleration forces. The total acceleration is the sum of all enabled forces.
    pub forces: FxHashMap<String, AccelerationForce>,
    /// Velocity damping factor. Applied as: velocity *= (1 - friction * delta).
    pub friction: f32,
    /// Optional maximum speed. If set, velocity magnitude is clamped to this value.
    pub max_speed: Option<f32>,
    /// Floor each tick's displacement to whole units. Only honoured for
    /// bodies that are not swept against solids.
    pub integer_steps: bool,
    /// When true, movement system skips all physics calculations for this entity.
    pub frozen: bool,
}

impl RigidBody {
    /// Create a RigidBody with zero velocity and no forces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a RigidBody already moving at `velocity`.
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::default()
        }
    }

    /// Create a RigidBody with physics parameters configured.
    ///
    /// # Arguments
    /// * `friction` - Velocity damping (0.0 = none, ~5.0 = responsive, ~10.0 = heavy)
    /// * `max_speed` - Optional velocity magnitude limit
    pub fn with_physics(friction: f32, max_speed: Option<f32>) -> Self {
        Self {
            friction,
            max_speed,
            ..Self::default()
        }
    }

    /// Builder toggle for whole-unit stepping.
    pub fn with_integer_steps(mut self) -> Self {
        self.integer_steps = true;
        self
    }

    /// Add or update a named acceleration force (enabled by default).
    pub fn add_force(&mut self, name: &str, value: Vec2) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Add or update a named acceleration force with specified enabled state.
    pub fn add_force_with_state(&mut self, name: &str, value: Vec2, enabled: bool) {
        self.forces.insert(
            name.to_string(),
            AccelerationForce::with_enabled(value, enabled),
        );
    }

    /// Enable or disable a specific force by name.
    /// Returns false if the force doesn't exist.
    pub fn set_force_enabled(&mut self, name: &str, enabled: bool) -> bool {
        if let Some(force) = self.forces.get_mut(name) {
            force.enabled = enabled;
            true
        } else {
            false
        }
    }

    /// Calculate the total acceleration from all enabled forces.
    pub fn total_acceleration(&self) -> Vec2 {
        self.forces
            .values()
            .filter(|force| force.enabled)
            .map(|force| force.value)
            .sum()
    }

    /// Displacement this body asks for over `delta` seconds.
    pub fn displacement(&self, delta: f32) -> Vec2 {
        let d = self.velocity * delta;
        if self.integer_steps { d.floor() } else { d }
    }

    /// Velocity post-processing run after the position was integrated:
    /// acceleration, then friction, then the speed clamp.
    pub fn post_step(&mut self, delta: f32) {
        self.velocity += self.total_acceleration() * delta;
        if self.friction > 0.0 {
            let damping = (1.0 - self.friction * delta).max(0.0);
            self.velocity *= damping;
        }
        if let Some(max_speed) = self.max_speed {
            self.velocity = self.velocity.clamp_length_max(max_speed);
        }
    }

    /// Freeze the rigid body, preventing movement system from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Unfreeze the rigid body, allowing movement system to update it.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec2, b: Vec2) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
    }

    // ==================== FORCE MANAGEMENT TESTS ====================

    #[test]
    fn test_add_force_overwrites() {
        let mut rb = RigidBody::new();
        rb.add_force("gravity", Vec2::new(0.0, 100.0));
        rb.add_force("gravity", Vec2::new(0.0, 200.0));
        assert_eq!(rb.forces.len(), 1);
        assert!(approx_eq(rb.forces["gravity"].value.y, 200.0));
    }

    #[test]
    fn test_set_force_enabled_nonexistent() {
        let mut rb = RigidBody::new();
        assert!(!rb.set_force_enabled("nonexistent", true));
        assert!(rb.forces.is_empty());
    }

    #[test]
    fn test_total_acceleration_disabled_forces_excluded() {
        let mut rb = RigidBody::new();
        rb.add_force("gravity", Vec2::new(0.0, 100.0));
        rb.add_force_with_state("wind", Vec2::new(50.0, 0.0), false);
        rb.add_force("thrust", Vec2::new(0.0, -30.0));
        assert!(vec_approx_eq(rb.total_acceleration(), Vec2::new(0.0, 70.0)));

        assert!(rb.set_force_enabled("gravity", false));
        assert!(vec_approx_eq(rb.total_acceleration(), Vec2::new(0.0, -30.0)));
    }

    // ==================== DISPLACEMENT TESTS ====================

    #[test]
    fn test_displacement_scales_by_delta() {
        let rb = RigidBody::with_velocity(Vec2::new(100.0, -60.0));
        assert!(vec_approx_eq(rb.displacement(0.5), Vec2::new(50.0, -30.0)));
    }

    #[test]
    fn test_integer_steps_floor_displacement() {
        let rb = RigidBody::with_velocity(Vec2::new(100.0, -100.0)).with_integer_steps();
        // 1.67 -> 1, -1.67 -> -2
        assert_eq!(rb.displacement(1.0 / 60.0), Vec2::new(1.0, -2.0));
        let slow = RigidBody::with_velocity(Vec2::new(30.0, -30.0)).with_integer_steps();
        assert_eq!(slow.displacement(1.0 / 60.0), Vec2::new(0.0, -1.0));
        let left = RigidBody::with_velocity(Vec2::new(-100.0, 0.0)).with_integer_steps();
        assert_eq!(left.displacement(1.0 / 60.0), Vec2::new(-2.0, 0.0));
    }

    // ==================== POST STEP TESTS ====================

    #[test]
    fn test_post_step_applies_acceleration() {
        let mut rb = RigidBody::new();
        rb.add_force("gravity", Vec2::new(0.0, 10.0));
        rb.post_step(0.5);
        assert!(vec_approx_eq(rb.velocity, Vec2::new(0.0, 5.0)));
    }

    #[test]
    fn test_post_step_friction_damps_toward_zero() {
        let mut rb = RigidBody::with_physics(2.0, None);
        rb.velocity = Vec2::new(10.0, 0.0);
        rb.post_step(0.25);
        assert!(vec_approx_eq(rb.velocity, Vec2::new(5.0, 0.0)));
        // damping never reverses direction
        rb.post_step(10.0);
        assert!(vec_approx_eq(rb.velocity, Vec2::ZERO));
    }

    #[test]
    fn test_post_step_clamps_speed() {
        let mut rb = RigidBody::with_physics(0.0, Some(5.0));
        rb.velocity = Vec2::new(30.0, 40.0);
        rb.post_step(0.0);
        assert!(approx_eq(rb.velocity.length(), 5.0));
        assert!(vec_approx_eq(rb.velocity, Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn test_post_step_zero_velocity_stays_zero() {
        let mut rb = RigidBody::with_physics(3.0, Some(10.0));
        rb.post_step(1.0 / 60.0);
        assert_eq!(rb.velocity, Vec2::ZERO);
    }

    // ==================== FREEZE TESTS ====================

    #[test]
    fn test_freeze_unfreeze() {
        let mut rb = RigidBody::new();
        rb.freeze();
        assert!(rb.frozen);
        rb.unfreeze();
        assert!(!rb.frozen);
    }
}
