//! Particles and the surface they move on

use glam::Vec2;
use rand::Rng;

use crate::color::Rgba;
use crate::config::FieldConfig;
use crate::constants::{EDGE_INSET, MIN_RADIUS};
use crate::forces::PointerState;

/// Size of the drawing surface in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when `point` lies strictly inside, never on an edge
    pub fn contains_strict(&self, point: Vec2) -> bool {
        point.x > 0.0 && point.x < self.width && point.y > 0.0 && point.y < self.height
    }

    /// Room for at least one interior pixel between the edge insets on both
    /// axes. Particles on anything smaller could never end an update inside.
    pub fn is_drawable(&self) -> bool {
        self.width > 2.0 * EDGE_INSET && self.height > 2.0 * EDGE_INSET
    }

    /// Uniformly sampled point in `[0, width) x [0, height)`
    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random::<f32>() * self.width,
            rng.random::<f32>() * self.height,
        )
    }
}

/// A single dot of the field. Owned by exactly one field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Pixels per frame
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, color: Rgba) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
        }
    }

    /// Spawn a particle somewhere inside `bounds`.
    ///
    /// Radius is drawn from `[1, particle_size + 1)` and each velocity component
    /// from `[-speed / 2, speed / 2)`.
    pub fn random<R: Rng>(rng: &mut R, bounds: Bounds, config: &FieldConfig) -> Self {
        let position = bounds.random_point(rng);
        let radius = rng.random::<f32>() * config.particle_size + MIN_RADIUS;
        let velocity = Vec2::new(
            (rng.random::<f32>() - 0.5) * config.speed,
            (rng.random::<f32>() - 0.5) * config.speed,
        );

        Self::new(position, velocity, radius, config.particle_color)
    }

    /// Move by one frame's worth of velocity
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Bounce off any edge the particle has reached or crossed.
    ///
    /// The offending velocity component flips sign and the coordinate is put
    /// back `EDGE_INSET` inside the surface so it cannot stick to the edge.
    pub fn reflect(&mut self, bounds: Bounds) {
        reflect_axis(&mut self.position.x, &mut self.velocity.x, bounds.width);
        reflect_axis(&mut self.position.y, &mut self.velocity.y, bounds.height);
    }

    /// One full update: integrate, get pushed by the pointer, bounce.
    ///
    /// Only reads this particle and the pointer, so particles can be stepped
    /// in any order.
    pub fn step(&mut self, pointer: &PointerState, bounds: Bounds) {
        self.advance();
        self.position += pointer.repulsion(self.position);
        self.reflect(bounds);
    }
}

fn reflect_axis(position: &mut f32, velocity: &mut f32, extent: f32) {
    if *position <= 0.0 || *position >= extent {
        *velocity = -*velocity;
        *position = if *position <= 0.0 {
            EDGE_INSET
        } else {
            extent - EDGE_INSET
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::TEAL;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOUNDS: Bounds = Bounds::new(800.0, 600.0);

    fn particle_at(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::new(vx, vy), 2.0, TEAL)
    }

    #[test]
    fn test_reflect_off_right_edge() {
        let mut p = particle_at(BOUNDS.width - 0.1, 300.0, 1.0, 0.0);
        p.step(&PointerState::default(), BOUNDS);

        assert!(p.velocity.x < 0.0);
        assert_eq!(p.position.x, BOUNDS.width - 1.0);
        assert_eq!(p.position.y, 300.0);
    }

    #[test]
    fn test_reflect_off_top_left_corner() {
        let mut p = particle_at(0.2, 0.3, -0.5, -0.5);
        p.step(&PointerState::default(), BOUNDS);

        assert_eq!(p.position, Vec2::new(1.0, 1.0));
        assert_eq!(p.velocity, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_reflect_on_exact_edge() {
        let mut p = particle_at(0.0, BOUNDS.height, 0.0, 0.0);
        p.reflect(BOUNDS);

        assert_eq!(p.position, Vec2::new(1.0, BOUNDS.height - 1.0));
    }

    #[test]
    fn test_degenerate_bounds_are_not_drawable() {
        assert!(BOUNDS.is_drawable());
        assert!(!Bounds::new(0.0, 0.0).is_drawable());
        assert!(!Bounds::new(800.0, 2.0).is_drawable());
        assert!(!Bounds::new(1.5, 600.0).is_drawable());
        assert!(Bounds::new(2.5, 2.5).is_drawable());
    }

    #[test]
    fn test_interior_particle_only_advances() {
        let mut p = particle_at(400.0, 300.0, 0.25, -0.25);
        p.step(&PointerState::default(), BOUNDS);

        assert_eq!(p.position, Vec2::new(400.25, 299.75));
        assert_eq!(p.velocity, Vec2::new(0.25, -0.25));
    }

    #[test]
    fn test_random_particles_respect_sampling_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = FieldConfig::default();

        for _ in 0..500 {
            let p = Particle::random(&mut rng, BOUNDS, &config);

            assert!(p.position.x >= 0.0 && p.position.x < BOUNDS.width);
            assert!(p.position.y >= 0.0 && p.position.y < BOUNDS.height);
            assert!(p.radius >= 1.0 && p.radius < config.particle_size + 1.0);
            assert!(p.velocity.x >= -config.speed / 2.0 && p.velocity.x < config.speed / 2.0);
            assert!(p.velocity.y >= -config.speed / 2.0 && p.velocity.y < config.speed / 2.0);
            assert_eq!(p.color, config.particle_color);
        }
    }

    #[test]
    fn test_steps_keep_particles_strictly_inside() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = FieldConfig {
            speed: 40.0,
            ..Default::default()
        };
        let mut pointer = PointerState::default();
        pointer.move_to(Vec2::new(5.0, 5.0));

        let mut particles: Vec<Particle> = (0..200)
            .map(|_| Particle::random(&mut rng, BOUNDS, &config))
            .collect();

        for _ in 0..100 {
            for p in &mut particles {
                p.step(&pointer, BOUNDS);
                assert!(BOUNDS.contains_strict(p.position), "{:?}", p.position);
            }
        }
    }
}
