//! Hex Terrain Engine Library
//!
//! Core of a hex-map terrain system: the cell grid and its coordinates,
//! deterministic noise fields, cheapest-path search, and chunked terrain
//! mesh generation.
//!
//! # Modules
//!
//! - [`world`] - Coordinates, metrics, cells, chunks and the grid
//! - [`noise`] - Noise fields, perturbation, cache and PNG persistence
//! - [`pathfinding`] - Bucket priority queue and path search
//! - [`mesh`] - Vertex buffers and the terrain triangulator
//!
//! # Example
//!
//! ```ignore
//! use hex_terrain_engine::{GridConfig, HexGrid, NoiseCache, Pathfinder, Triangulator};
//!
//! let mut noise = NoiseCache::new();
//! let mut grid = HexGrid::new(&GridConfig::default(), &mut noise)?;
//!
//! // Edit a cell, then rebuild whatever changed
//! grid.set_elevation(42, 3);
//! let triangulator = Triangulator::for_grid(&grid);
//! for mesh in triangulator.rebuild_dirty(&mut grid) {
//!     // upload mesh.buffers for mesh.chunk
//! }
//!
//! // Find a path
//! let mut pathfinder = Pathfinder::new();
//! let path = pathfinder.find_path(&mut grid, 0, 120);
//! ```

pub mod mesh;
pub mod noise;
pub mod pathfinding;
pub mod world;

// Re-export the types most callers need
pub use mesh::{ChunkMesh, MeshBuffers, TerrainVertex, Triangulator};
pub use self::noise::{NoiseCache, NoiseField, NoiseParams, NoiseStore, NoiseStoreError};
pub use pathfinding::{CellPriorityQueue, Pathfinder, PriorityLinks};
pub use world::{
    CellId, ChunkId, ConfigError, EdgeType, GridConfig, GridError, HexCell, HexCoordinates,
    HexDirection, HexGrid, HexMetrics, TerrainType,
};
