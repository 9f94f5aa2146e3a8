//! Vertex layout shared by every chunk mesh.
//!
//! This module defines the vertex format chunk meshing emits and the buffer layout a
//! host render pipeline uses to consume it.

/// A vertex of a chunk mesh.
///
/// Positions are chunk-local; the draw pass supplies the chunk's translation.
///
/// # Memory Layout
/// - Position: [f32; 4] (16 bytes), `w = 1`
/// - Normal: [f32; 4] (16 bytes), `w = 0`
/// - Color: [f32; 4] (16 bytes), RGBA
/// - UV: [f32; 4] (16 bytes), `(u, v, 0, animated)`
///
/// Total size: 64 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Homogeneous chunk-local position
    pub position: [f32; 4],
    /// Face normal
    pub normal: [f32; 4],
    /// Block colour
    pub color: [f32; 4],
    /// Atlas coordinates, with the animation flag in the last lane
    pub uv: [f32; 4],
}

impl Vertex {
    /// Returns the vertex buffer layout description for the shader pipeline.
    ///
    /// # Returns
    /// A `wgpu::VertexBufferLayout` describing the vertex format
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec4<f32>)
    /// - `location = 1`: normal (vec4<f32>)
    /// - `location = 2`: color (vec4<f32>)
    /// - `location = 3`: uv + animated flag (vec4<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_struct() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 64);
        assert_eq!(layout.attributes.len(), 4);
        for (index, attribute) in layout.attributes.iter().enumerate() {
            assert_eq!(attribute.offset, 16 * index as u64);
            assert_eq!(attribute.shader_location, index as u32);
            assert_eq!(attribute.format, wgpu::VertexFormat::Float32x4);
        }
    }
}
