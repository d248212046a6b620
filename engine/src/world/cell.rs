//! Hex Cells
//!
//! Plain cell records stored in the grid's arena. Neighbors are arena indices,
//! never owning references. Mutators live on [`HexGrid`](super::grid::HexGrid)
//! so every edit can mark the affected chunks dirty.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::coordinates::HexCoordinates;
use super::direction::HexDirection;

/// Stable index of a cell in its grid.
pub type CellId = usize;

/// Index of a chunk in its grid.
pub type ChunkId = usize;

/// Distance value of a cell the current search has not reached.
pub const UNREACHED: u32 = u32::MAX;

/// Surface classification, blended between cells by the terrain shader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    Stone = 0,
    Mud = 1,
    Sand = 2,
    Snow = 3,
    #[default]
    Grass = 4,
}

impl TerrainType {
    pub const COUNT: usize = 5;

    pub const ALL: [TerrainType; Self::COUNT] = [
        TerrainType::Stone,
        TerrainType::Mud,
        TerrainType::Sand,
        TerrainType::Snow,
        TerrainType::Grass,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Terrain for an index, clamped to the last variant.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::COUNT - 1)]
    }
}

/// Shape of the connection between two adjacent cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeType {
    Flat,
    Slope,
    Cliff,
}

impl EdgeType {
    /// Classify the edge between two elevations.
    pub fn between(a: i32, b: i32, slope_break_point: i32) -> Self {
        let delta = (a - b).abs();
        if delta == 0 {
            EdgeType::Flat
        } else if delta <= slope_break_point {
            EdgeType::Slope
        } else {
            EdgeType::Cliff
        }
    }
}

/// Per-cell bookkeeping owned by the pathfinder. Only meaningful while a
/// search is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SearchState {
    pub distance: u32,
    pub heuristic: u32,
    pub path_from: Option<CellId>,
    pub next_with_same_priority: Option<CellId>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            distance: UNREACHED,
            heuristic: 0,
            path_from: None,
            next_with_same_priority: None,
        }
    }
}

/// A single hex cell.
#[derive(Clone, Debug)]
pub struct HexCell {
    pub(crate) id: CellId,
    pub(crate) coordinates: HexCoordinates,
    pub(crate) chunk: ChunkId,
    pub(crate) elevation: i32,
    pub(crate) terrain: TerrainType,
    pub(crate) passable: bool,
    pub(crate) neighbors: [Option<CellId>; 6],
    /// World position of the cell center, including elevation and vertical perturbation
    pub(crate) position: Vec3,
    pub(crate) search: SearchState,
}

impl HexCell {
    pub(crate) fn new(id: CellId, coordinates: HexCoordinates, chunk: ChunkId, position: Vec3) -> Self {
        Self {
            id,
            coordinates,
            chunk,
            elevation: 0,
            terrain: TerrainType::default(),
            passable: true,
            neighbors: [None; 6],
            position,
            search: SearchState::default(),
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn coordinates(&self) -> HexCoordinates {
        self.coordinates
    }

    pub fn chunk(&self) -> ChunkId {
        self.chunk
    }

    pub fn elevation(&self) -> i32 {
        self.elevation
    }

    pub fn terrain(&self) -> TerrainType {
        self.terrain
    }

    pub fn is_passable(&self) -> bool {
        self.passable
    }

    /// World-space center of the cell's surface.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn neighbor(&self, direction: HexDirection) -> Option<CellId> {
        self.neighbors[direction.index()]
    }

    /// Present neighbors with their directions.
    pub fn neighbors(&self) -> impl Iterator<Item = (HexDirection, CellId)> + '_ {
        HexDirection::ALL
            .into_iter()
            .filter_map(|d| self.neighbor(d).map(|id| (d, id)))
    }

    /// Distance from the last search origin. Stale outside a search.
    pub fn search_distance(&self) -> u32 {
        self.search.distance
    }

    /// Queue priority: distance so far plus heuristic estimate.
    pub fn search_priority(&self) -> usize {
        self.search.distance.saturating_add(self.search.heuristic) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_type_thresholds() {
        assert_eq!(EdgeType::between(2, 2, 2), EdgeType::Flat);
        assert_eq!(EdgeType::between(2, 3, 2), EdgeType::Slope);
        assert_eq!(EdgeType::between(4, 2, 2), EdgeType::Slope);
        assert_eq!(EdgeType::between(5, 2, 2), EdgeType::Cliff);
        assert_eq!(EdgeType::between(-3, 5, 2), EdgeType::Cliff);
    }

    #[test]
    fn test_terrain_from_index_clamps() {
        assert_eq!(TerrainType::from_index(0), TerrainType::Stone);
        assert_eq!(TerrainType::from_index(4), TerrainType::Grass);
        assert_eq!(TerrainType::from_index(9), TerrainType::Grass);
        assert_eq!(TerrainType::default(), TerrainType::Grass);
    }

    #[test]
    fn test_new_cell_defaults() {
        let cell = HexCell::new(3, HexCoordinates::new(1, 1), 0, Vec3::ZERO);
        assert_eq!(cell.elevation(), 0);
        assert!(cell.is_passable());
        assert_eq!(cell.neighbors().count(), 0);
        assert_eq!(cell.search_distance(), UNREACHED);
    }
}
