//! Pathfinding Tests - Optimality and Reachability
//!
//! Compares search results against an exhaustive relaxation over the same
//! grid, so any path the search returns must be both valid and cheapest.

use hex_terrain_engine::pathfinding::{Pathfinder, path_cost, step_cost};
use hex_terrain_engine::world::{CellId, GridConfig, HexCoordinates, HexGrid};
use hex_terrain_engine::NoiseCache;

/// Cheapest cost from `from` to every cell by repeated edge relaxation.
fn reference_costs(grid: &HexGrid, from: CellId) -> Vec<Option<u32>> {
    let mut costs = vec![None; grid.cell_count()];
    costs[from] = Some(0);
    let mut changed = true;
    while changed {
        changed = false;
        for cell in grid.cells() {
            let Some(base) = costs[cell.id()] else {
                continue;
            };
            for (_, id) in cell.neighbors() {
                let next = grid.cell(id);
                if !next.is_passable() {
                    continue;
                }
                let candidate = base + step_cost(cell, next);
                if costs[id].is_none_or(|c| candidate < c) {
                    costs[id] = Some(candidate);
                    changed = true;
                }
            }
        }
    }
    costs
}

fn rugged_grid() -> HexGrid {
    let mut grid =
        HexGrid::new(&GridConfig::flat(12, 10, 6, 5), &mut NoiseCache::new()).unwrap();
    for id in 0..grid.cell_count() {
        let (x, z) = grid.cell(id).coordinates().to_offset();
        grid.set_elevation(id, (x * 7 + z * 3) % 9 - 3);
        if (x + 2 * z) % 11 == 5 {
            grid.set_passable(id, false);
        }
    }
    grid
}

fn assert_valid_path(grid: &HexGrid, from: CellId, to: CellId, path: &[CellId]) {
    assert_eq!(path.last(), Some(&to));
    assert!(!path.contains(&from));
    let mut previous = from;
    for &step in path {
        assert!(grid.cell(step).is_passable(), "path enters impassable cell {step}");
        assert!(
            grid.cell(previous).neighbors().any(|(_, n)| n == step),
            "{previous} and {step} are not adjacent"
        );
        previous = step;
    }
}

#[test]
fn test_paths_are_optimal_on_rugged_grid() {
    let mut grid = rugged_grid();
    let mut pathfinder = Pathfinder::new();
    let from = grid.cell_id_at(HexCoordinates::from_offset(0, 0)).unwrap();
    let reference = reference_costs(&grid, from);

    for to in 0..grid.cell_count() {
        if to == from {
            continue;
        }
        let path = pathfinder.find_path(&mut grid, from, to);
        match reference[to] {
            Some(cost) => {
                assert_valid_path(&grid, from, to, &path);
                assert_eq!(path_cost(&grid, from, &path), cost, "suboptimal path to {to}");
            }
            None => assert!(path.is_empty(), "path to unreachable cell {to}"),
        }
    }
}

#[test]
fn test_climbing_and_descending_cost_differ() {
    let mut grid =
        HexGrid::new(&GridConfig::flat(4, 1, 4, 1), &mut NoiseCache::new()).unwrap();
    for id in 0..4 {
        grid.set_elevation(id, id as i32);
    }
    let mut pathfinder = Pathfinder::new();

    let up = pathfinder.find_path(&mut grid, 0, 3);
    assert_eq!(path_cost(&grid, 0, &up), 6);
    let down = pathfinder.find_path(&mut grid, 3, 0);
    assert_eq!(path_cost(&grid, 3, &down), 3);
}

#[test]
fn test_wall_blocks_every_route() {
    let mut grid =
        HexGrid::new(&GridConfig::flat(6, 6, 6, 6), &mut NoiseCache::new()).unwrap();
    // A full column of impassable cells splits the map in two.
    for z in 0..6 {
        let id = grid.cell_id_at(HexCoordinates::from_offset(3, z)).unwrap();
        grid.set_passable(id, false);
    }
    let west = grid.cell_id_at(HexCoordinates::from_offset(0, 3)).unwrap();
    let east = grid.cell_id_at(HexCoordinates::from_offset(5, 3)).unwrap();
    assert!(Pathfinder::new().find_path(&mut grid, west, east).is_empty());

    // Reopening one cell restores a route through it.
    let gate = grid.cell_id_at(HexCoordinates::from_offset(3, 0)).unwrap();
    grid.set_passable(gate, true);
    let path = Pathfinder::new().find_path(&mut grid, west, east);
    assert!(path.contains(&gate));
}

#[test]
fn test_search_does_not_dirty_chunks() {
    let mut grid = rugged_grid();
    grid.take_dirty_chunks();
    let last = grid.cell_count() - 1;
    Pathfinder::new().find_path(&mut grid, 0, last);
    assert!(grid.take_dirty_chunks().is_empty());
}
