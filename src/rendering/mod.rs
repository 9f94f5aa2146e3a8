//! # Rendering Module
//!
//! The boundary between the voxel world and a host render pipeline. The world never
//! touches the GPU itself: chunk meshing produces [`mesh::ChunkMesh`] buffers in the
//! [`Vertex`] layout, and terrain drawing hands them to a [`ChunkDrawer`] the host
//! implements on top of its own pipeline.

pub mod mesh;
mod vertex;

pub use vertex::Vertex;

use cgmath::Vector3;

use mesh::Mesh;

/// Receives the draw calls issued by terrain drawing.
///
/// For every visible chunk the drawer first gets the chunk's model translation, then
/// the chunk's opaque mesh. Translucent meshes are issued in a second pass after every
/// opaque mesh in the region, each preceded by its translation again.
pub trait ChunkDrawer {
    /// Sets the model translation for the meshes that follow.
    fn set_model_translation(&mut self, translation: Vector3<f32>);

    /// Draws an opaque mesh.
    fn draw_opaque(&mut self, mesh: &Mesh);

    /// Draws a translucent mesh, blended over what is already drawn.
    fn draw_translucent(&mut self, mesh: &Mesh);
}
