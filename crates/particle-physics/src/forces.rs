//! Pointer interaction
//!
//! The pointer does not apply a physical force. It nudges positions directly
//! each frame, so nothing decays or accumulates in the velocities.

use glam::Vec2;

use crate::constants::{POINTER_RADIUS, REPULSION_STRENGTH};

/// Where the pointer is over the surface, if anywhere
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    /// Surface-relative position; `None` once the pointer has left
    pub position: Option<Vec2>,
    /// Interaction radius
    pub radius: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::with_radius(POINTER_RADIUS)
    }
}

impl PointerState {
    pub fn with_radius(radius: f32) -> Self {
        Self {
            position: None,
            radius,
        }
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = Some(position);
    }

    /// Forget the pointer; nothing is repelled until it moves again
    pub fn reset(&mut self) {
        self.position = None;
    }

    /// Positional nudge for a particle currently at `at`
    pub fn repulsion(&self, at: Vec2) -> Vec2 {
        match self.position {
            Some(pointer) => pointer_repulsion(pointer, self.radius, at),
            None => Vec2::ZERO,
        }
    }
}

/// Push `at` directly away from `pointer`.
///
/// The magnitude falls off linearly from `REPULSION_STRENGTH` at the pointer to
/// zero at `radius`. A particle sitting exactly on the pointer is pushed
/// towards -x. A non-positive radius never interacts.
pub fn pointer_repulsion(pointer: Vec2, radius: f32, at: Vec2) -> Vec2 {
    if radius <= 0.0 {
        return Vec2::ZERO;
    }

    let offset = at - pointer;
    let distance = offset.length();
    if distance >= radius {
        return Vec2::ZERO;
    }

    let direction = offset.try_normalize().unwrap_or(Vec2::NEG_X);
    let falloff = (radius - distance) / radius;

    direction * falloff * REPULSION_STRENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repulsion_points_away_from_pointer() {
        let push = pointer_repulsion(Vec2::new(100.0, 100.0), 100.0, Vec2::new(150.0, 100.0));

        assert!(push.x > 0.0);
        assert_eq!(push.y, 0.0);
        assert!((push.x - 1.0).abs() < 1e-6); // halfway out: (100 - 50) / 100 * 2
    }

    #[test]
    fn test_repulsion_outside_radius_is_zero() {
        let pointer = Vec2::new(0.0, 0.0);

        assert_eq!(pointer_repulsion(pointer, 100.0, Vec2::new(100.0, 0.0)), Vec2::ZERO);
        assert_eq!(pointer_repulsion(pointer, 100.0, Vec2::new(300.0, 40.0)), Vec2::ZERO);
    }

    #[test]
    fn test_repulsion_at_pointer_falls_back_to_negative_x() {
        let push = pointer_repulsion(Vec2::new(10.0, 10.0), 100.0, Vec2::new(10.0, 10.0));
        assert_eq!(push, Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn test_zero_radius_never_interacts() {
        let push = pointer_repulsion(Vec2::new(10.0, 10.0), 0.0, Vec2::new(10.0, 10.0));
        assert_eq!(push, Vec2::ZERO);
    }

    #[test]
    fn test_reset_pointer_is_inert() {
        let mut pointer = PointerState::default();
        pointer.move_to(Vec2::new(5.0, 5.0));
        assert_ne!(pointer.repulsion(Vec2::new(6.0, 5.0)), Vec2::ZERO);

        pointer.reset();
        assert_eq!(pointer.position, None);
        assert_eq!(pointer.repulsion(Vec2::new(6.0, 5.0)), Vec2::ZERO);
        assert_eq!(pointer.repulsion(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_repulsion_moves_particle_further_than_velocity_alone() {
        use crate::color::TEAL;
        use crate::particle::{Bounds, Particle};

        let bounds = Bounds::new(800.0, 600.0);
        let mut pointer = PointerState::default();
        pointer.move_to(Vec2::new(400.0, 300.0));

        let start = Particle::new(Vec2::new(430.0, 320.0), Vec2::new(-0.2, 0.1), 2.0, TEAL);

        let mut drifted = start;
        drifted.step(&PointerState::default(), bounds);

        let mut pushed = start;
        pushed.step(&pointer, bounds);

        let pointer_at = Vec2::new(400.0, 300.0);
        assert!(pushed.position.distance(pointer_at) > drifted.position.distance(pointer_at));
        assert_eq!(pushed.velocity, start.velocity);
    }
}
