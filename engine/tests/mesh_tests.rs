//! Mesh Tests - Closure, Winding, and Dirty Rebuilds
//!
//! Checks that triangulated terrain has no cracks around a fully surrounded
//! cell, that shared edges are wound consistently, and that edits rebuild
//! exactly the chunks they touch.

use glam::Vec3;
use hex_terrain_engine::mesh::{MeshBuffers, TerrainVertex, Triangulator};
use hex_terrain_engine::world::{GridConfig, HexCoordinates, HexGrid};
use hex_terrain_engine::NoiseCache;

const EPSILON: f32 = 1e-3;

fn build_grid(config: &GridConfig) -> HexGrid {
    HexGrid::new(config, &mut NoiseCache::new()).unwrap()
}

fn same_point(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

/// Directed edges of every triangle, in winding order.
fn directed_edges(mesh: &MeshBuffers) -> Vec<(Vec3, Vec3)> {
    mesh.triangles()
        .flat_map(|[a, b, c]| [(a, b), (b, c), (c, a)])
        .collect()
}

fn count_matching(edges: &[(Vec3, Vec3)], from: Vec3, to: Vec3) -> usize {
    edges
        .iter()
        .filter(|(a, b)| same_point(*a, from) && same_point(*b, to))
        .count()
}

fn full_mesh(grid: &HexGrid) -> MeshBuffers {
    let cells: Vec<_> = (0..grid.cell_count()).collect();
    let mut mesh = MeshBuffers::new();
    Triangulator::for_grid(grid).triangulate_cells(grid, &cells, &mut mesh);
    mesh
}

// ============================================================================
// Closure
// ============================================================================

#[test]
fn test_interior_cell_is_closed() {
    let grid = build_grid(&GridConfig::flat(3, 3, 3, 3));
    let center = grid
        .get_cell(HexCoordinates::from_offset(1, 1))
        .unwrap()
        .position();
    let radius = grid.metrics().outer_radius * grid.metrics().solid_factor + EPSILON;

    let mesh = full_mesh(&grid);
    let edges = directed_edges(&mesh);

    let touching: Vec<_> = edges
        .iter()
        .filter(|(a, b)| (*a - center).length() <= radius || (*b - center).length() <= radius)
        .collect();
    assert!(!touching.is_empty());

    for &&(a, b) in &touching {
        assert_eq!(
            count_matching(&edges, a, b),
            1,
            "edge {a:?} -> {b:?} appears more than once in the same direction"
        );
        assert_eq!(
            count_matching(&edges, b, a),
            1,
            "edge {a:?} -> {b:?} has no opposite twin"
        );
    }
}

#[test]
fn test_perturbed_terrain_keeps_edges_consistent() {
    let mut config = GridConfig::flat(3, 3, 3, 3);
    config.metrics.perturb_enabled = true;
    let mut grid = build_grid(&config);
    grid.set_elevation(0, 3);
    grid.set_elevation(4, 1);
    grid.set_elevation(5, -2);
    grid.set_elevation(7, 5);

    let perturbed = directed_edges(&full_mesh(&grid));
    let flat = directed_edges(&full_mesh(&build_grid(&GridConfig::flat(3, 3, 3, 3))));

    let boundary = |edges: &[(Vec3, Vec3)]| {
        edges
            .iter()
            .filter(|(a, b)| {
                assert!(count_matching(edges, *a, *b) == 1, "duplicated directed edge");
                count_matching(edges, *b, *a) == 0
            })
            .count()
    };

    // Displacement and cliffs must not open or close any seam.
    assert_eq!(boundary(&perturbed), boundary(&flat));
}

// ============================================================================
// Winding and vertex layout
// ============================================================================

#[test]
fn test_terrain_vertex_layout() {
    assert_eq!(std::mem::size_of::<TerrainVertex>(), 48);
    assert_eq!(std::mem::align_of::<TerrainVertex>(), 4);
}

#[test]
fn test_sloped_terrain_still_faces_up() {
    let mut grid = build_grid(&GridConfig::flat(4, 4, 4, 4));
    for id in 0..grid.cell_count() {
        grid.set_elevation(id, (id % 4) as i32 - 1);
    }
    let mesh = full_mesh(&grid);
    for [a, b, c] in mesh.triangles() {
        assert!((b - a).cross(c - a).y > 0.0);
    }
    for vertex in &mesh.vertices {
        assert!(vertex.normal().y > 0.0);
        assert!((vertex.normal().length() - 1.0).abs() < 1e-4);
    }
}

// ============================================================================
// Dirty rebuilds
// ============================================================================

#[test]
fn test_rebuild_dirty_coalesces_edits() {
    let mut grid = build_grid(&GridConfig::flat(10, 10, 5, 5));
    let triangulator = Triangulator::for_grid(&grid);

    let initial = triangulator.rebuild_dirty(&mut grid);
    assert_eq!(initial.len(), 4);
    assert!(triangulator.rebuild_dirty(&mut grid).is_empty());

    // (5, 0) is on the west border of chunk 1; chunk 0 bridges into it.
    let border = grid.cell_id_at(HexCoordinates::from_offset(5, 0)).unwrap();
    for elevation in 1..=4 {
        grid.set_elevation(border, elevation);
    }

    let rebuilt = triangulator.rebuild_dirty(&mut grid);
    let chunks: Vec<_> = rebuilt.iter().map(|m| m.chunk).collect();
    assert_eq!(chunks, vec![1, 0]);

    for mesh in &rebuilt {
        assert_eq!(mesh.buffers, triangulator.triangulate_chunk(&grid, mesh.chunk));
    }

    let before = &initial.iter().find(|m| m.chunk == 0).unwrap().buffers;
    let after = &rebuilt.iter().find(|m| m.chunk == 0).unwrap().buffers;
    assert_ne!(before, after);
    assert_eq!(before.triangle_count(), after.triangle_count());
}

#[test]
fn test_triangulation_is_deterministic() {
    let config = GridConfig::default();
    let a = build_grid(&config);
    let b = build_grid(&config);
    let ta = Triangulator::for_grid(&a);
    let tb = Triangulator::for_grid(&b);
    for chunk in 0..a.chunk_count() {
        assert_eq!(ta.triangulate_chunk(&a, chunk), tb.triangulate_chunk(&b, chunk));
    }
}
