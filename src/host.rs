//! Glue between a winit window and the particle stage

use particle_physics::Bounds;
use particle_simulation::SurfaceHost;
use thiserror::Error;
use winit::window::Window;

/// Errors that can stop the host from starting.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Unknown preset '{0}' (expected 'default' or 'hero')")]
    UnknownPreset(String),

    #[error("Missing value after --preset")]
    MissingPresetName,

    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Failed to create surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to request adapter: {0}")]
    AdapterRequest(#[from] wgpu::RequestAdapterError),

    #[error("Failed to request device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("Surface not supported by adapter")]
    SurfaceNotSupported,
}

/// The window is the only drawing surface; it answers to a single id.
pub struct WindowHost<'a> {
    pub window: &'a Window,
    pub surface_id: &'a str,
    /// While hidden no frames are requested, which pauses the loop
    pub occluded: bool,
}

impl SurfaceHost for WindowHost<'_> {
    fn displayed_size(&self, surface_id: &str) -> Option<Bounds> {
        if surface_id != self.surface_id {
            return None;
        }
        let size = self.window.inner_size();
        Some(Bounds::new(size.width as f32, size.height as f32))
    }

    fn request_frame(&mut self, surface_id: &str) {
        if surface_id == self.surface_id && !self.occluded {
            self.window.request_redraw();
        }
    }
}

/// Keeps touches in the order they went down so "first active touch"
/// means the same finger until it lifts.
#[derive(Debug, Default)]
pub struct TouchTracker {
    active: Vec<u64>,
}

impl TouchTracker {
    pub fn start(&mut self, id: u64) {
        if !self.active.contains(&id) {
            self.active.push(id);
        }
    }

    /// Whether a move of `id` should drive the pointer
    pub fn is_primary(&mut self, id: u64) -> bool {
        self.start(id);
        self.active.first() == Some(&id)
    }

    /// Lift `id`. Returns true when it was the primary touch, i.e. the one
    /// driving the pointer.
    pub fn end(&mut self, id: u64) -> bool {
        let was_primary = self.active.first() == Some(&id);
        self.active.retain(|&active| active != id);
        was_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_touch_stays_primary() {
        let mut touches = TouchTracker::default();
        touches.start(3);
        touches.start(9);

        assert!(touches.is_primary(3));
        assert!(!touches.is_primary(9));

        assert!(touches.end(3));
        assert!(touches.is_primary(9));
    }

    #[test]
    fn test_lifting_secondary_touch_keeps_pointer() {
        let mut touches = TouchTracker::default();
        touches.start(1);
        touches.start(2);

        assert!(!touches.end(2));
        assert!(touches.is_primary(1));
        assert!(touches.end(1));
        assert!(!touches.end(1));
    }

    #[test]
    fn test_move_without_start_becomes_primary() {
        let mut touches = TouchTracker::default();
        assert!(touches.is_primary(5));
        assert!(!touches.is_primary(6));
    }
}
