//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// Sky blue (#87CEEB)
    pub const BACKGROUND: [f32; 4] = [0.529, 0.808, 0.922, 1.0];
    /// Coral (#FF6B6B)
    pub const PLAYER: [f32; 4] = [1.0, 0.42, 0.42, 1.0];
    /// Turquoise (#4ECDC4)
    pub const PLATFORM: [f32; 4] = [0.306, 0.804, 0.769, 1.0];
    /// Cerulean (#45B7D1)
    pub const PLATFORM_ALT: [f32; 4] = [0.271, 0.718, 0.82, 1.0];
    pub const PLATFORM_SHINE: [f32; 4] = [1.0, 1.0, 1.0, 0.3];
    pub const PLAYER_SHINE: [f32; 4] = [1.0, 1.0, 1.0, 0.4];
}
