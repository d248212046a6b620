//! Path Search
//!
//! Cheapest-path search over the cell graph. Climbing costs one extra unit
//! per elevation level gained; descending and level moves cost one. The hex
//! distance to the target orders the frontier, and since every step costs at
//! least one it never overestimates.

use crate::world::{CellId, HexCell, HexGrid, UNREACHED};

use super::priority_queue::CellPriorityQueue;

/// Cost of moving from `from` into the adjacent cell `to`.
pub fn step_cost(from: &HexCell, to: &HexCell) -> u32 {
    (to.elevation() - from.elevation()).max(0) as u32 + 1
}

/// Total cost of walking `path` starting at `from`.
///
/// `path` is in the format returned by [`Pathfinder::find_path`]: it excludes
/// `from` and ends at the target.
pub fn path_cost(grid: &HexGrid, from: CellId, path: &[CellId]) -> u32 {
    let mut previous = grid.cell(from);
    let mut total = 0;
    for &id in path {
        let cell = grid.cell(id);
        total += step_cost(previous, cell);
        previous = cell;
    }
    total
}

/// Reusable path search. The queue keeps its allocation between searches.
#[derive(Debug, Default)]
pub struct Pathfinder {
    queue: CellPriorityQueue,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cheapest path from `from` to `to`, excluding `from` and ending with `to`.
    ///
    /// Empty when `from == to`, when either id is out of range, or when `to`
    /// cannot be reached through passable cells. Overwrites every cell's
    /// search state.
    pub fn find_path(&mut self, grid: &mut HexGrid, from: CellId, to: CellId) -> Vec<CellId> {
        if from == to || grid.get(from).is_none() || grid.get(to).is_none() {
            return Vec::new();
        }

        let target = grid.cell(to).coordinates();
        let cells = grid.cells_mut();
        for cell in cells.iter_mut() {
            cell.search = Default::default();
        }

        self.queue.clear();
        cells[from].search.distance = 0;
        self.queue.enqueue(cells, from);

        while let Some(current) = self.queue.dequeue_min(cells) {
            if current == to {
                return Self::trace_back(cells, from, to);
            }

            let distance = cells[current].search.distance;
            let neighbors = cells[current].neighbors;
            for neighbor in neighbors.into_iter().flatten() {
                let next = &cells[neighbor];
                if !next.is_passable() {
                    continue;
                }

                let candidate = distance + step_cost(&cells[current], next);
                if next.search.distance == UNREACHED {
                    let heuristic = next.coordinates().distance(&target);
                    let state = &mut cells[neighbor].search;
                    state.distance = candidate;
                    state.heuristic = heuristic;
                    state.path_from = Some(current);
                    self.queue.enqueue(cells, neighbor);
                } else if candidate < next.search.distance {
                    let old_priority = next.search_priority();
                    let state = &mut cells[neighbor].search;
                    state.distance = candidate;
                    state.path_from = Some(current);
                    let moved = self.queue.change_priority(cells, neighbor, old_priority);
                    debug_assert!(moved, "cell {neighbor} not queued at priority {old_priority}");
                }
            }
        }

        Vec::new()
    }

    fn trace_back(cells: &[HexCell], from: CellId, to: CellId) -> Vec<CellId> {
        let mut path = Vec::new();
        let mut current = to;
        while current != from {
            path.push(current);
            match cells[current].search.path_from {
                Some(previous) => current = previous,
                None => break,
            }
        }
        path.reverse();
        path
    }
}
