use particle_simulation::{DrawCommand, DrawList};

/// Instance data for one SDF-masked dot.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CircleInstance {
    /// Center in surface pixels
    pub center: [f32; 2],
    pub radius: f32,
    pub _padding: f32,
    /// Linear RGBA, straight alpha
    pub color: [f32; 4],
}

impl CircleInstance {
    /// Vertex buffer layout for instance attributes
    pub const fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: &[wgpu::VertexAttribute] = &[
            // center: vec2<f32> at location 0
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            // radius: f32 at location 1
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32,
            },
            // color: vec4<f32> at location 2 (after the padding word)
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            },
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: ATTRIBUTES,
        }
    }
}

/// Instance data for one line segment, expanded to a quad in the vertex shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineInstance {
    pub from: [f32; 2],
    pub to: [f32; 2],
    /// Linear RGBA, straight alpha
    pub color: [f32; 4],
    /// Stroke width in pixels
    pub width: f32,
    pub _padding: [f32; 3],
}

impl LineInstance {
    pub const fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: &[wgpu::VertexAttribute] = &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                shader_location: 3,
                format: wgpu::VertexFormat::Float32,
            },
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: ATTRIBUTES,
        }
    }
}

/// GPU-ready split of a draw list. Lines are drawn before circles so dots
/// always sit on top, which is also the order the field records them in.
#[derive(Clone, Debug, Default)]
pub struct InstanceBatch {
    pub lines: Vec<LineInstance>,
    pub circles: Vec<CircleInstance>,
}

impl InstanceBatch {
    /// Refill from `draw_list`, reusing the existing allocations
    pub fn fill(&mut self, draw_list: &DrawList) {
        self.lines.clear();
        self.circles.clear();

        for command in draw_list.commands() {
            match *command {
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => self.lines.push(LineInstance {
                    from: from.to_array(),
                    to: to.to_array(),
                    color: color.to_linear(),
                    width,
                    _padding: [0.0; 3],
                }),
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => self.circles.push(CircleInstance {
                    center: center.to_array(),
                    radius,
                    _padding: 0.0,
                    color: color.to_linear(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use particle_physics::TEAL;
    use particle_simulation::Canvas;

    #[test]
    fn test_instance_sizes_match_layouts() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 32);
        assert_eq!(std::mem::size_of::<LineInstance>(), 48);
    }

    #[test]
    fn test_fill_splits_and_reuses() {
        let mut list = DrawList::new();
        list.stroke_line(Vec2::ZERO, Vec2::new(3.0, 4.0), TEAL.with_alpha(0.1), 0.5);
        list.fill_circle(Vec2::new(1.0, 2.0), 2.5, TEAL.with_alpha(0.5));
        list.fill_circle(Vec2::new(5.0, 6.0), 1.5, TEAL.with_alpha(0.5));

        let mut batch = InstanceBatch::default();
        batch.fill(&list);
        batch.fill(&list);

        assert_eq!(batch.lines.len(), 1);
        assert_eq!(batch.circles.len(), 2);
        assert_eq!(batch.lines[0].to, [3.0, 4.0]);
        assert_eq!(batch.lines[0].color[3], 0.1);
        assert_eq!(batch.circles[1].center, [5.0, 6.0]);
        assert_eq!(batch.circles[1].radius, 1.5);
    }
}
