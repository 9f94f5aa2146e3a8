//! Mesh buffers produced by chunk meshing.
//!
//! This module provides the CPU-side vertex and index buffers that chunk meshing fills
//! and a host render pipeline uploads.
//!
//! # Architecture
//! - [`Face`]: a single quad of a voxel, with its corners and attributes
//! - [`Mesh`]: one vertex buffer and one triangle index buffer
//! - [`ChunkMesh`]: the opaque and translucent meshes of one chunk

mod face;

pub use face::Face;

use crate::rendering::Vertex;

/// A vertex buffer plus a triangle index buffer.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Mesh {
    /// The vertex data of this mesh
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Appends one face as four vertices and two triangles.
    pub fn push_face(&mut self, face: &Face) {
        let start = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&face.vertices());
        self.indices
            .extend_from_slice(&Mesh::generate_face_indices(start));
    }

    /// Generates the six indices of a quad whose first vertex is at `start`.
    ///
    /// # Returns
    /// `[start, start + 1, start + 2, start, start + 2, start + 3]`
    pub fn generate_face_indices(start: u32) -> [u32; 6] {
        [start, start + 1, start + 2, start, start + 2, start + 3]
    }

    /// Number of quads in this mesh.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Whether the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// The two meshes of a chunk.
///
/// Opaque faces are drawn first; translucent faces afterwards so they blend over them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChunkMesh {
    /// Faces of opaque blocks
    pub opaque: Mesh,
    /// Faces of transparent blocks
    pub translucent: Mesh,
}
