//! World Module
//!
//! The hex map itself: coordinates, directions, metrics, cells, chunks and
//! the grid that ties them together.
//!
//! ## Layout
//! Pointy-top hexes, odd rows shifted right. A grid of `width x height`
//! cells is split into equal chunks, each the unit of mesh rebuilding.

pub mod cell;
pub mod chunk;
pub mod config;
pub mod coordinates;
pub mod direction;
pub mod grid;
pub mod metrics;

pub use cell::{CellId, ChunkId, EdgeType, HexCell, TerrainType, UNREACHED};
pub use chunk::{DirtyChunks, HexGridChunk};
pub use config::{ConfigError, GridConfig, MapNoiseConfig};
pub use coordinates::HexCoordinates;
pub use direction::HexDirection;
pub use grid::{GridError, HexGrid};
pub use metrics::{HexMetrics, INNER_RADIUS_RATIO};
