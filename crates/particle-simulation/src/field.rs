//! A single particle field bound to one drawing surface

use std::time::{Duration, Instant};

use glam::Vec2;
use particle_physics::{
    proximity_links, Bounds, FieldConfig, Particle, PointerState, LINE_WIDTH,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::canvas::Canvas;
use crate::debounce::Debouncer;

/// Quiet period a burst of resize notifications must settle for before the
/// field is rebuilt
pub const RESIZE_QUIET_PERIOD: Duration = Duration::from_millis(250);

/// Input a host forwards to a field. Positions are surface-relative pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    PointerLeft,
    /// Position of the first active touch
    TouchMoved(Vec2),
    TouchEnded,
    /// The surface's displayed size may have changed
    Resized,
}

pub struct ParticleField {
    config: FieldConfig,
    bounds: Bounds,
    particles: Vec<Particle>,
    pointer: PointerState,
    resize: Debouncer<()>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: FieldConfig, bounds: Bounds) -> Self {
        Self::with_rng(config, bounds, StdRng::from_rng(&mut rand::rng()))
    }

    /// Build with an explicit generator, for reproducible layouts
    pub fn with_rng(config: FieldConfig, bounds: Bounds, rng: StdRng) -> Self {
        let mut field = Self {
            config,
            bounds,
            particles: Vec::with_capacity(config.particle_count),
            pointer: PointerState::default(),
            resize: Debouncer::new(RESIZE_QUIET_PERIOD),
            rng,
        };
        field.spawn();
        field
    }

    /// Fresh particles for the current bounds. A surface too small to hold
    /// any particle strictly inside stays empty until the next rebuild.
    fn spawn(&mut self) {
        self.particles.clear();
        if !self.bounds.is_drawable() {
            log::debug!(
                "Surface is {}x{}, deferring particles until it has room",
                self.bounds.width,
                self.bounds.height
            );
            return;
        }

        for _ in 0..self.config.particle_count {
            let particle = Particle::random(&mut self.rng, self.bounds, &self.config);
            self.particles.push(particle);
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the current particles. The count itself is fixed.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// False while spawning is deferred on a degenerate surface
    pub fn is_populated(&self) -> bool {
        self.particles.len() == self.config.particle_count
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Run one animation frame: clear, update, lines, dots
    pub fn frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        canvas.clear();
        self.update();
        self.draw_links(canvas);
        self.draw_particles(canvas);
    }

    /// Advance every particle by one step
    pub fn update(&mut self) {
        let pointer = self.pointer;
        let bounds = self.bounds;
        for particle in &mut self.particles {
            particle.step(&pointer, bounds);
        }
    }

    pub fn draw_links<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let links = proximity_links(
            &self.particles,
            self.config.line_distance,
            self.config.line_color.a,
        );

        for link in links {
            canvas.stroke_line(
                self.particles[link.a].position,
                self.particles[link.b].position,
                self.config.line_color.with_alpha(link.alpha),
                LINE_WIDTH,
            );
        }
    }

    pub fn draw_particles<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for particle in &self.particles {
            canvas.fill_circle(particle.position, particle.radius, particle.color);
        }
    }

    /// Apply one input notification.
    ///
    /// Returns `true` when the field consumed the gesture and the host should
    /// suppress its default handling (scrolling/zooming on touch).
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> bool {
        match event {
            InputEvent::PointerMoved(position) => {
                self.pointer.move_to(position);
                false
            }
            InputEvent::TouchMoved(position) => {
                self.pointer.move_to(position);
                true
            }
            InputEvent::PointerLeft | InputEvent::TouchEnded => {
                self.pointer.reset();
                false
            }
            InputEvent::Resized => {
                self.resize.notify((), now);
                false
            }
        }
    }

    /// When a pending resize rebuild becomes due
    pub fn resize_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    /// True once, when the resize quiet window has elapsed
    pub fn take_due_resize(&mut self, now: Instant) -> bool {
        self.resize.poll(now).is_some()
    }

    /// Resize to `bounds` and throw away every particle for a fresh set.
    ///
    /// Regenerating instead of rescaling keeps particles from clustering or
    /// picking up extreme velocities when the aspect ratio changes a lot.
    pub fn rebuild(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.spawn();
        log::debug!(
            "Rebuilt field at {}x{} with {} particles",
            bounds.width,
            bounds.height,
            self.particles.len()
        );
    }
}
