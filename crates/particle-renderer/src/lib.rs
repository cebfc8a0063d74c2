//! # Particle Renderer
//!
//! wgpu backend that draws a recorded particle-field frame: distance-faded
//! lines first, then the dots on top.

pub mod instance;
pub mod renderer;
pub mod viewport;

pub use instance::*;
pub use renderer::*;
pub use viewport::*;
