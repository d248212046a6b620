//! Hex Grid
//!
//! Owns every cell of a map in a flat arena addressed by offset coordinates,
//! the chunk partition, and the dirty-chunk set that drives mesh rebuilds.
//!
//! ## Adjacency
//! Cells are created row by row. Each new cell links its W, SE and SW
//! neighbors, which already exist; [`HexGrid::set_neighbor`] writes the
//! reverse link at the same time, so the relation is symmetric by
//! construction and never changes afterwards on its own.
//!
//! ## Edits
//! Elevation and terrain edits only touch cell data and mark chunks dirty.
//! Call [`HexGrid::take_dirty_chunks`] once per update to learn which chunks
//! need a new mesh.

use std::sync::Arc;

use glam::Vec3;

use super::cell::{CellId, ChunkId, EdgeType, HexCell, TerrainType};
use super::chunk::{DirtyChunks, HexGridChunk};
use super::config::GridConfig;
use super::coordinates::HexCoordinates;
use super::direction::HexDirection;
use super::metrics::HexMetrics;
use crate::noise::{NoiseCache, NoiseField, NoiseStoreError, PerturbOrientation, perturb};

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors raised while building or restructuring a grid.
#[derive(Debug)]
pub enum GridError {
    /// Width or height is zero.
    InvalidDimensions { width: u32, height: u32 },
    /// A chunk dimension is zero.
    InvalidChunkSize { chunk_size_x: u32, chunk_size_z: u32 },
    /// Grid dimensions are not whole multiples of the chunk size.
    ChunkMismatch {
        width: u32,
        height: u32,
        chunk_size_x: u32,
        chunk_size_z: u32,
    },
    /// `elevation_min` is above `elevation_max`.
    InvalidElevationBounds { min: i32, max: i32 },
    /// A cell index does not belong to this grid.
    CellOutOfRange(CellId),
    /// A cell cannot be its own neighbor.
    SelfNeighbor(CellId),
    /// A noise field could not be loaded or stored.
    Noise(NoiseStoreError),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::InvalidDimensions { width, height } => {
                write!(f, "grid dimensions must be positive, got {width}x{height}")
            }
            GridError::InvalidChunkSize {
                chunk_size_x,
                chunk_size_z,
            } => write!(
                f,
                "chunk size must be positive, got {chunk_size_x}x{chunk_size_z}"
            ),
            GridError::ChunkMismatch {
                width,
                height,
                chunk_size_x,
                chunk_size_z,
            } => write!(
                f,
                "grid {width}x{height} is not a multiple of chunk size {chunk_size_x}x{chunk_size_z}"
            ),
            GridError::InvalidElevationBounds { min, max } => {
                write!(f, "elevation bounds are inverted: min {min} > max {max}")
            }
            GridError::CellOutOfRange(id) => write!(f, "cell {id} is out of range"),
            GridError::SelfNeighbor(id) => write!(f, "cell {id} cannot neighbor itself"),
            GridError::Noise(e) => write!(f, "noise error: {e}"),
        }
    }
}

impl std::error::Error for GridError {}

impl From<NoiseStoreError> for GridError {
    fn from(e: NoiseStoreError) -> Self {
        GridError::Noise(e)
    }
}

// ============================================================================
// GRID
// ============================================================================

/// A rectangular hex map.
#[derive(Debug)]
pub struct HexGrid {
    metrics: HexMetrics,
    width: u32,
    height: u32,
    chunk_size_x: u32,
    chunk_size_z: u32,
    chunk_count_x: u32,
    cells: Vec<HexCell>,
    chunks: Vec<HexGridChunk>,
    dirty: DirtyChunks,
    perturb_field: Arc<NoiseField>,
}

impl HexGrid {
    /// Build a grid from `config`, pulling noise fields through `noise`.
    ///
    /// Every chunk starts dirty so the first drain builds the whole map.
    pub fn new(config: &GridConfig, noise: &mut NoiseCache) -> Result<Self, GridError> {
        config.validate()?;

        let perturb_field = if config.metrics.perturb_enabled {
            noise.get_or_generate(&config.perturb_noise)?
        } else {
            Arc::new(NoiseField::neutral())
        };
        let map_field = match &config.map_noise {
            Some(map_noise) => {
                Some(noise.get_or_generate(&map_noise.params(config.width, config.height))?)
            }
            None => None,
        };

        let chunk_count_x = config.chunk_count_x();
        let chunk_count = (chunk_count_x * config.chunk_count_z()) as usize;
        let chunk_capacity = (config.chunk_size_x * config.chunk_size_z) as usize;

        let mut grid = Self {
            metrics: config.metrics.clone(),
            width: config.width,
            height: config.height,
            chunk_size_x: config.chunk_size_x,
            chunk_size_z: config.chunk_size_z,
            chunk_count_x,
            cells: Vec::with_capacity((config.width * config.height) as usize),
            chunks: vec![HexGridChunk::with_capacity(chunk_capacity); chunk_count],
            dirty: DirtyChunks::new(chunk_count),
            perturb_field,
        };

        for z in 0..config.height {
            for x in 0..config.width {
                grid.create_cell(x, z)?;
            }
        }

        if let Some(field) = map_field {
            grid.seed_from_noise(&field);
        }

        grid.dirty.mark_all();

        println!(
            "[HexGrid] Created {}x{} cells in {} chunks of {}x{}",
            grid.width, grid.height, chunk_count, grid.chunk_size_x, grid.chunk_size_z
        );

        Ok(grid)
    }

    fn create_cell(&mut self, x: u32, z: u32) -> Result<CellId, GridError> {
        let id = self.cells.len();
        let coordinates = HexCoordinates::from_offset(x as i32, z as i32);
        let chunk = (x / self.chunk_size_x + (z / self.chunk_size_z) * self.chunk_count_x) as ChunkId;
        let position = self.surface_position(coordinates, 0);

        self.cells.push(HexCell::new(id, coordinates, chunk, position));
        self.chunks[chunk].push(id);

        let width = self.width as usize;
        if x > 0 {
            self.set_neighbor(id, HexDirection::W, id - 1)?;
        }
        if z > 0 {
            if z % 2 == 0 {
                self.set_neighbor(id, HexDirection::SE, id - width)?;
                if x > 0 {
                    self.set_neighbor(id, HexDirection::SW, id - width - 1)?;
                }
            } else {
                self.set_neighbor(id, HexDirection::SW, id - width)?;
                if x + 1 < self.width {
                    self.set_neighbor(id, HexDirection::SE, id - width + 1)?;
                }
            }
        }

        Ok(id)
    }

    /// Elevation from the red channel, terrain from the alpha channel.
    fn seed_from_noise(&mut self, field: &NoiseField) {
        let min = self.metrics.elevation_min as f32;
        let max = self.metrics.elevation_max as f32;
        let last_terrain = (TerrainType::COUNT - 1) as f32;

        for id in 0..self.cells.len() {
            let (x, z) = self.cells[id].coordinates.to_offset();
            let sample = field.pixel(x, z);
            let elevation = (min + (max - min) * sample.x).round() as i32;
            let terrain = (last_terrain * sample.w).round() as usize;
            self.set_elevation(id, elevation);
            self.set_terrain(id, TerrainType::from_index(terrain));
        }
    }

    /// World position of a cell surface at `elevation`, with vertical perturbation.
    fn surface_position(&self, coordinates: HexCoordinates, elevation: i32) -> Vec3 {
        let mut position = coordinates.to_position(&self.metrics);
        position.y = elevation as f32 * self.metrics.elevation_step;
        if self.metrics.perturb_enabled {
            position = perturb(
                position,
                self.metrics.elevation_perturb_strength,
                &self.perturb_field,
                self.metrics.noise_scale,
                PerturbOrientation::Vertical,
            );
        }
        position
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn metrics(&self) -> &HexMetrics {
        &self.metrics
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Field used to perturb cell heights and mesh vertices.
    pub fn perturb_field(&self) -> &Arc<NoiseField> {
        &self.perturb_field
    }

    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [HexCell] {
        &mut self.cells
    }

    /// Cell by id.
    ///
    /// # Panics
    /// If `id` does not belong to this grid.
    pub fn cell(&self, id: CellId) -> &HexCell {
        &self.cells[id]
    }

    /// Cell by id, `None` if out of range.
    pub fn get(&self, id: CellId) -> Option<&HexCell> {
        self.cells.get(id)
    }

    /// Id of the cell at `coordinates`, `None` outside the grid.
    pub fn cell_id_at(&self, coordinates: HexCoordinates) -> Option<CellId> {
        let z = coordinates.z();
        if z < 0 || z >= self.height as i32 {
            return None;
        }
        let x = coordinates.x() + z / 2;
        if x < 0 || x >= self.width as i32 {
            return None;
        }
        Some((x + z * self.width as i32) as CellId)
    }

    pub fn get_cell(&self, coordinates: HexCoordinates) -> Option<&HexCell> {
        self.cell_id_at(coordinates).map(|id| &self.cells[id])
    }

    /// Cell under a world position (height ignored).
    pub fn get_cell_at_position(&self, position: Vec3) -> Option<&HexCell> {
        self.get_cell(HexCoordinates::from_position(position, &self.metrics))
    }

    /// Ids of the in-bounds cells within `radius` steps of `center`.
    pub fn cells_in_radius(&self, center: HexCoordinates, radius: u32) -> Vec<CellId> {
        center
            .within_radius(radius)
            .filter_map(|c| self.cell_id_at(c))
            .collect()
    }

    pub fn neighbor(&self, cell: CellId, direction: HexDirection) -> Option<CellId> {
        self.cells.get(cell).and_then(|c| c.neighbor(direction))
    }

    /// Edge shape towards `direction`, `None` if there is no neighbor there.
    ///
    /// Always derived from current elevations.
    pub fn edge_type(&self, cell: CellId, direction: HexDirection) -> Option<EdgeType> {
        let neighbor = self.neighbor(cell, direction)?;
        Some(self.edge_type_between(cell, neighbor))
    }

    pub fn edge_type_between(&self, a: CellId, b: CellId) -> EdgeType {
        EdgeType::between(
            self.cells[a].elevation,
            self.cells[b].elevation,
            self.metrics.slope_break_point,
        )
    }

    // ------------------------------------------------------------------------
    // Chunks
    // ------------------------------------------------------------------------

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Cells of a chunk in local row-major order; empty for unknown chunks.
    pub fn chunk_cells(&self, chunk: ChunkId) -> &[CellId] {
        self.chunks.get(chunk).map(HexGridChunk::cells).unwrap_or(&[])
    }

    pub fn is_chunk_dirty(&self, chunk: ChunkId) -> bool {
        self.dirty.is_dirty(chunk)
    }

    /// Drain the chunks edited since the last call, each reported once.
    pub fn take_dirty_chunks(&mut self) -> Vec<ChunkId> {
        self.dirty.take()
    }

    /// Mark a cell's chunk dirty, plus any neighboring chunk that shares its edges.
    fn refresh(&mut self, cell: CellId) {
        let chunk = self.cells[cell].chunk;
        self.dirty.mark(chunk);
        for direction in HexDirection::ALL {
            if let Some(neighbor) = self.cells[cell].neighbor(direction) {
                let neighbor_chunk = self.cells[neighbor].chunk;
                if neighbor_chunk != chunk {
                    self.dirty.mark(neighbor_chunk);
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Link `cell` to `other` in `direction` and `other` back in the opposite one.
    ///
    /// Both ids are validated before either side is written. Links that would
    /// be left dangling by the relink are cleared, so symmetry always holds.
    pub fn set_neighbor(
        &mut self,
        cell: CellId,
        direction: HexDirection,
        other: CellId,
    ) -> Result<(), GridError> {
        if cell >= self.cells.len() {
            return Err(GridError::CellOutOfRange(cell));
        }
        if other >= self.cells.len() {
            return Err(GridError::CellOutOfRange(other));
        }
        if cell == other {
            return Err(GridError::SelfNeighbor(cell));
        }

        let forward = direction.index();
        let backward = direction.opposite().index();

        if let Some(old) = self.cells[cell].neighbors[forward] {
            if old != other && self.cells[old].neighbors[backward] == Some(cell) {
                self.cells[old].neighbors[backward] = None;
            }
        }
        if let Some(old) = self.cells[other].neighbors[backward] {
            if old != cell && self.cells[old].neighbors[forward] == Some(other) {
                self.cells[old].neighbors[forward] = None;
            }
        }

        self.cells[cell].neighbors[forward] = Some(other);
        self.cells[other].neighbors[backward] = Some(cell);

        let (a, b) = (self.cells[cell].chunk, self.cells[other].chunk);
        self.dirty.mark(a);
        self.dirty.mark(b);
        Ok(())
    }

    /// Set a cell's elevation, clamped to the metrics bounds.
    ///
    /// Returns `true` if the elevation changed. Unknown ids are ignored.
    pub fn set_elevation(&mut self, cell: CellId, elevation: i32) -> bool {
        let elevation = self.metrics.clamp_elevation(elevation);
        let Some(current) = self.cells.get(cell) else {
            return false;
        };
        if current.elevation == elevation {
            return false;
        }

        let position = self.surface_position(current.coordinates, elevation);
        let target = &mut self.cells[cell];
        target.elevation = elevation;
        target.position = position;
        self.refresh(cell);
        true
    }

    /// Set a cell's terrain. Returns `true` if it changed.
    pub fn set_terrain(&mut self, cell: CellId, terrain: TerrainType) -> bool {
        match self.cells.get_mut(cell) {
            Some(target) if target.terrain != terrain => {
                target.terrain = terrain;
                self.refresh(cell);
                true
            }
            _ => false,
        }
    }

    /// Toggle whether the pathfinder may enter a cell. Has no effect on meshes.
    pub fn set_passable(&mut self, cell: CellId, passable: bool) {
        if let Some(target) = self.cells.get_mut(cell) {
            target.passable = passable;
        }
    }
}
