//! Terrain Triangulator
//!
//! Turns cells into a continuous terrain surface. Each hexagon is split into
//! a flat solid region and a blend region:
//!
//! - the solid region is a fan of triangles from the cell center, each edge
//!   subdivided into `hex_edge_factor` segments
//! - bridges are quads spanning the gap between two facing solid edges
//! - corners are triangles filling the gap where three cells meet
//!
//! Bridges are built only for NE, E and SE and corners only for NE and E, so
//! every shared piece is emitted by exactly one cell.
//!
//! # Example
//!
//! ```ignore
//! let triangulator = Triangulator::for_grid(&grid);
//! for mesh in triangulator.rebuild_dirty(&mut grid) {
//!     upload(mesh.chunk, &mesh.buffers);
//! }
//! ```

use glam::Vec3;

use super::buffers::MeshBuffers;
use super::builder::{MeshBuilder, WEIGHTS_1, WEIGHTS_2, WEIGHTS_3};
use crate::world::{CellId, ChunkId, HexCell, HexDirection, HexGrid, HexMetrics};

/// Rebuilt geometry for one chunk.
#[derive(Clone, Debug)]
pub struct ChunkMesh {
    pub chunk: ChunkId,
    pub buffers: MeshBuffers,
}

/// Builds chunk meshes from grid cells.
#[derive(Clone, Debug)]
pub struct Triangulator {
    builder: MeshBuilder,
}

impl Triangulator {
    /// Triangulator using the grid's metrics and perturbation field.
    pub fn for_grid(grid: &HexGrid) -> Self {
        Self {
            builder: MeshBuilder::new(grid.metrics(), grid.perturb_field().clone()),
        }
    }

    /// Fresh mesh of every cell in `chunk`.
    pub fn triangulate_chunk(&self, grid: &HexGrid, chunk: ChunkId) -> MeshBuffers {
        let mut buffers = MeshBuffers::new();
        self.triangulate_cells(grid, grid.chunk_cells(chunk), &mut buffers);
        buffers
    }

    /// Replace the contents of `buffers` with the mesh of `cells`.
    pub fn triangulate_cells(&self, grid: &HexGrid, cells: &[CellId], buffers: &mut MeshBuffers) {
        buffers.clear();
        for &id in cells {
            self.triangulate_cell(grid, grid.cell(id), buffers);
        }
        buffers.recalculate_normals();
    }

    /// Drain the grid's dirty chunks and rebuild each of them once.
    pub fn rebuild_dirty(&self, grid: &mut HexGrid) -> Vec<ChunkMesh> {
        let dirty = grid.take_dirty_chunks();
        if dirty.is_empty() {
            return Vec::new();
        }

        let meshes: Vec<ChunkMesh> = dirty
            .into_iter()
            .map(|chunk| ChunkMesh {
                chunk,
                buffers: self.triangulate_chunk(grid, chunk),
            })
            .collect();

        let triangles: usize = meshes.iter().map(|m| m.buffers.triangle_count()).sum();
        println!(
            "[Triangulator] Rebuilt {} chunks ({} triangles)",
            meshes.len(),
            triangles
        );
        meshes
    }

    fn triangulate_cell(&self, grid: &HexGrid, cell: &HexCell, buffers: &mut MeshBuffers) {
        for direction in HexDirection::ALL {
            self.triangulate_direction(grid, cell, direction, buffers);
        }
    }

    fn triangulate_direction(
        &self,
        grid: &HexGrid,
        cell: &HexCell,
        direction: HexDirection,
        buffers: &mut MeshBuffers,
    ) {
        let metrics = grid.metrics();
        let center = cell.position();
        let edge = edge_points(
            metrics,
            center + metrics.first_solid_corner(direction),
            center + metrics.second_solid_corner(direction),
        );
        let own = terrain_index(cell);

        for segment in edge.windows(2) {
            self.builder.add_triangle(
                buffers,
                [center, segment[0], segment[1]],
                [WEIGHTS_1; 3],
                Vec3::splat(own),
            );
        }

        if !direction.owns_bridge() {
            return;
        }
        let Some(neighbor) = cell.neighbor(direction).map(|id| grid.cell(id)) else {
            return;
        };

        let bridge = metrics.bridge(direction);
        let far_height = neighbor.position().y;
        let bridge_terrain = Vec3::new(own, terrain_index(neighbor), own);
        for segment in edge.windows(2) {
            let (v1, v2) = (segment[0], segment[1]);
            let v3 = with_height(v1 + bridge, far_height);
            let v4 = with_height(v2 + bridge, far_height);
            self.builder
                .add_quad(buffers, [v1, v2, v3, v4], WEIGHTS_1, WEIGHTS_2, bridge_terrain);
        }

        if !direction.owns_corner() {
            return;
        }
        let Some(next) = cell.neighbor(direction.next()).map(|id| grid.cell(id)) else {
            return;
        };

        let Some(&v1) = edge.last() else {
            return;
        };
        let v2 = with_height(v1 + bridge, far_height);
        let v3 = with_height(v1 + metrics.bridge(direction.next()), next.position().y);
        self.builder.add_triangle(
            buffers,
            [v1, v2, v3],
            [WEIGHTS_1, WEIGHTS_2, WEIGHTS_3],
            Vec3::new(own, terrain_index(neighbor), terrain_index(next)),
        );
    }
}

/// Evenly spaced points along a solid edge, both ends included.
fn edge_points(metrics: &HexMetrics, start: Vec3, end: Vec3) -> Vec<Vec3> {
    let segments = metrics.hex_edge_factor.max(1);
    (0..=segments)
        .map(|i| start.lerp(end, i as f32 / segments as f32))
        .collect()
}

fn with_height(mut position: Vec3, y: f32) -> Vec3 {
    position.y = y;
    position
}

fn terrain_index(cell: &HexCell) -> f32 {
    cell.terrain().index() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseCache;
    use crate::world::{GridConfig, HexCoordinates, TerrainType};

    fn flat_grid(width: u32, height: u32) -> HexGrid {
        HexGrid::new(&GridConfig::flat(width, height, width, height), &mut NoiseCache::new())
            .unwrap()
    }

    #[test]
    fn test_isolated_cell_is_only_fans() {
        let grid = flat_grid(1, 1);
        let mesh = Triangulator::for_grid(&grid).triangulate_chunk(&grid, 0);
        let factor = grid.metrics().hex_edge_factor as usize;
        assert_eq!(mesh.triangle_count(), 6 * factor);
        for vertex in &mesh.vertices {
            assert_eq!(vertex.blend, [1.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_flat_terrain_faces_up() {
        let grid = flat_grid(4, 4);
        let mesh = Triangulator::for_grid(&grid).triangulate_chunk(&grid, 0);
        for [a, b, c] in mesh.triangles() {
            let normal = (b - a).cross(c - a);
            assert!(normal.y > 0.0);
            assert!(normal.x.abs() < 1e-3 && normal.z.abs() < 1e-3);
        }
        for vertex in &mesh.vertices {
            assert!((vertex.normal() - Vec3::Y).length() < 1e-4);
        }
    }

    #[test]
    fn test_bridge_reaches_neighbor_height() {
        let mut grid = flat_grid(2, 1);
        grid.set_elevation(1, 2);
        grid.set_terrain(1, TerrainType::Sand);
        let high = grid.cell(1).position().y;

        let mut mesh = MeshBuffers::new();
        Triangulator::for_grid(&grid).triangulate_cells(&grid, &[0], &mut mesh);

        let far: Vec<_> = mesh
            .vertices
            .iter()
            .filter(|v| v.blend == [0.0, 1.0, 0.0])
            .collect();
        assert_eq!(far.len(), 2 * grid.metrics().hex_edge_factor as usize);
        for vertex in far {
            assert_eq!(vertex.position[1], high);
            assert_eq!(vertex.terrain, [4.0, 2.0, 4.0]);
        }
    }

    #[test]
    fn test_corner_blends_three_cells() {
        let mut grid = flat_grid(2, 2);
        // Cell 0 at offset (0, 0) has NE = (0, 1) and E = (1, 0).
        let ne = grid.cell_id_at(HexCoordinates::from_offset(0, 1)).unwrap();
        grid.set_terrain(ne, TerrainType::Snow);
        grid.set_terrain(1, TerrainType::Mud);

        let mut mesh = MeshBuffers::new();
        Triangulator::for_grid(&grid).triangulate_cells(&grid, &[0], &mut mesh);

        let corner: Vec<_> = mesh
            .vertices
            .iter()
            .filter(|v| v.blend == [0.0, 0.0, 1.0])
            .collect();
        assert_eq!(corner.len(), 1);
        assert_eq!(corner[0].terrain, [4.0, 3.0, 1.0]);
    }

    #[test]
    fn test_triangulate_cells_replaces_contents() {
        let grid = flat_grid(2, 2);
        let triangulator = Triangulator::for_grid(&grid);
        let mut mesh = MeshBuffers::new();
        triangulator.triangulate_cells(&grid, &[0, 1, 2, 3], &mut mesh);
        let full = mesh.triangle_count();
        triangulator.triangulate_cells(&grid, &[3], &mut mesh);
        assert!(mesh.triangle_count() < full);

        let mut fresh = MeshBuffers::new();
        triangulator.triangulate_cells(&grid, &[3], &mut fresh);
        assert_eq!(mesh, fresh);
    }
}
