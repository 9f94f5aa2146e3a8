use cgmath::Point3;

use crate::voxels::block::{
    block_atlas_cell, block_color, block_type::BlockType, direction::Direction, ATLAS_CELL_SIZE,
};

use crate::rendering::Vertex;

/// A single quad face of a voxel.
///
/// The four corners wind clockwise when seen from outside the block; the index pattern
/// `0 1 2, 0 2 3` keeps that winding for both triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Corners in chunk-local coordinates
    pub corners: [Point3<f32>; 4],
    /// The block this face belongs to
    pub block_type: BlockType,
    /// Which way the face points
    pub direction: Direction,
}

impl Face {
    /// Creates the face of the voxel at chunk-local `(x, y, z)` pointing in `direction`.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - The coordinates of the voxel in chunk space
    /// * `block_type` - The type of the block, used for colour and texture lookup
    /// * `direction` - Which side of the block this face represents
    pub fn new(x: i32, y: i32, z: i32, block_type: BlockType, direction: Direction) -> Self {
        let offsets: [[i32; 3]; 4] = match direction {
            Direction::XPOS => [[1, 0, 0], [1, 0, 1], [1, 1, 1], [1, 1, 0]],
            Direction::XNEG => [[0, 0, 1], [0, 0, 0], [0, 1, 0], [0, 1, 1]],
            Direction::YPOS => [[0, 1, 0], [1, 1, 0], [1, 1, 1], [0, 1, 1]],
            Direction::YNEG => [[0, 0, 0], [0, 0, 1], [1, 0, 1], [1, 0, 0]],
            Direction::ZPOS => [[1, 0, 1], [0, 0, 1], [0, 1, 1], [1, 1, 1]],
            Direction::ZNEG => [[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]],
        };

        Face {
            corners: offsets.map(|[dx, dy, dz]| {
                Point3::new((x + dx) as f32, (y + dy) as f32, (z + dz) as f32)
            }),
            block_type,
            direction,
        }
    }

    /// Builds the four vertices of this face.
    ///
    /// Every vertex carries the face normal, the block colour and one corner of the
    /// block's atlas cell.
    pub fn vertices(&self) -> [Vertex; 4] {
        let normal = self.direction.offset();
        let normal = [normal.x as f32, normal.y as f32, normal.z as f32, 0.0];
        let color = block_color(self.block_type);
        let cell = block_atlas_cell(self.block_type, self.direction);
        let animated = if cell.animated { 1.0 } else { 0.0 };

        let uv_offsets = [
            [ATLAS_CELL_SIZE, 0.0],
            [0.0, 0.0],
            [0.0, ATLAS_CELL_SIZE],
            [ATLAS_CELL_SIZE, ATLAS_CELL_SIZE],
        ];

        let mut vertices = [Vertex {
            position: [0.0; 4],
            normal,
            color,
            uv: [0.0; 4],
        }; 4];
        for (vertex, (corner, [du, dv])) in vertices
            .iter_mut()
            .zip(self.corners.iter().zip(uv_offsets))
        {
            vertex.position = [corner.x, corner.y, corner.z, 1.0];
            vertex.uv = [cell.u + du, cell.v + dv, 0.0, animated];
        }
        vertices
    }
}
