//! Fixed tuning values shared by the field and its hosts

/// Radius (in surface pixels) within which the pointer pushes particles away
pub const POINTER_RADIUS: f32 = 100.0;

/// Multiplier applied to the normalized repulsion falloff.
/// A particle sitting right on the pointer is nudged this many pixels per frame.
pub const REPULSION_STRENGTH: f32 = 2.0;

/// Distance from an edge a particle is placed at after bouncing off it
pub const EDGE_INSET: f32 = 1.0;

/// Stroke width of proximity lines
pub const LINE_WIDTH: f32 = 0.5;

/// Smallest particle radius; sampled radii lie in `[MIN_RADIUS, particle_size + MIN_RADIUS)`
pub const MIN_RADIUS: f32 = 1.0;
