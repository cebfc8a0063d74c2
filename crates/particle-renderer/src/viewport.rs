//! Pixel-space viewport shared by both pipelines

use bytemuck::{Pod, Zeroable};

/// Viewport uniform for GPU. Shaders map pixel coordinates (origin top-left)
/// to clip space with it.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ViewportUniform {
    pub size: [f32; 2],
    pub _padding: [f32; 2],
}

impl ViewportUniform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: [width.max(1) as f32, height.max(1) as f32],
            _padding: [0.0; 2],
        }
    }
}
