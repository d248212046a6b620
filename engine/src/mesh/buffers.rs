//! Terrain Mesh Buffers
//!
//! CPU-side vertex and index data for one chunk, laid out for direct upload.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Vertex format for terrain chunks.
///
/// Matches the terrain shader's vertex input:
/// - position: vec3<f32> at @location(0)
/// - normal: vec3<f32> at @location(1)
/// - blend: vec3<f32> at @location(2), splat weights over the three terrain slots
/// - terrain: vec3<f32> at @location(3), terrain indices for those slots
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub blend: [f32; 3],
    pub terrain: [f32; 3],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 48]);

impl TerrainVertex {
    /// Vertex with a zero normal; normals are filled in by [`MeshBuffers::recalculate_normals`].
    pub fn new(position: Vec3, blend: Vec3, terrain: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: [0.0; 3],
            blend: blend.to_array(),
            terrain: terrain.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Indexed triangle list for one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all geometry, keeping the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Triangle `index` as three positions, in winding order.
    pub fn triangle(&self, index: usize) -> [Vec3; 3] {
        let i = index * 3;
        [
            self.vertices[self.indices[i] as usize].position(),
            self.vertices[self.indices[i + 1] as usize].position(),
            self.vertices[self.indices[i + 2] as usize].position(),
        ]
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        (0..self.triangle_count()).map(|i| self.triangle(i))
    }

    /// Area-weighted vertex normals from accumulated face normals.
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let a = self.vertices[tri[0] as usize].position();
            let b = self.vertices[tri[1] as usize].position();
            let c = self.vertices[tri[2] as usize].position();
            let face = (b - a).cross(c - a);
            for &i in tri {
                normals[i as usize] += face;
            }
        }
        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            vertex.normal = normal.normalize_or(Vec3::Y).to_array();
        }
    }
}
