//! Grid Configuration
//!
//! Everything a map needs at construction time: dimensions, chunking, hex
//! metrics and the two noise fields (map seeding and mesh perturbation).
//! Loadable from JSON; every field falls back to its default when omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::grid::GridError;
use super::metrics::HexMetrics;
use crate::noise::NoiseParams;

/// Noise used to seed cell elevation (red channel) and terrain (alpha channel).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapNoiseConfig {
    /// Perlin seed
    pub seed: u32,
    /// Frequency of the elevation channels
    pub scale: f32,
    /// Frequency of the terrain channel
    pub terrain_scale: f32,
}

impl Default for MapNoiseConfig {
    fn default() -> Self {
        Self {
            seed: 100,
            scale: 1.0,
            terrain_scale: 0.9,
        }
    }
}

impl MapNoiseConfig {
    /// Field params covering one sample per cell.
    pub fn params(&self, width: u32, height: u32) -> NoiseParams {
        NoiseParams {
            seed: self.seed,
            scales: [self.scale, self.scale, self.scale, self.terrain_scale],
            width,
            height,
            shift: false,
        }
    }
}

/// Construction parameters for a [`HexGrid`](super::grid::HexGrid).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Width of the grid in cells
    pub width: u32,
    /// Height of the grid in cells
    pub height: u32,
    /// Chunk width in cells; must divide `width`
    pub chunk_size_x: u32,
    /// Chunk height in cells; must divide `height`
    pub chunk_size_z: u32,
    /// Geometry and elevation constants
    pub metrics: HexMetrics,
    /// Seeds elevation and terrain; `None` leaves a flat grass map
    pub map_noise: Option<MapNoiseConfig>,
    /// Field used for vertex and elevation perturbation
    pub perturb_noise: NoiseParams,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            chunk_size_x: 5,
            chunk_size_z: 5,
            metrics: HexMetrics::default(),
            map_noise: Some(MapNoiseConfig::default()),
            perturb_noise: NoiseParams::default(),
        }
    }
}

impl GridConfig {
    /// A flat, unperturbed grid. Used by tests and tools that need exact geometry.
    pub fn flat(width: u32, height: u32, chunk_size_x: u32, chunk_size_z: u32) -> Self {
        Self {
            width,
            height,
            chunk_size_x,
            chunk_size_z,
            metrics: HexMetrics::unperturbed(),
            map_noise: None,
            perturb_noise: NoiseParams::default(),
        }
    }

    /// Check dimensions before anything is allocated.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.width == 0 || self.height == 0 {
            return Err(GridError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.chunk_size_x == 0 || self.chunk_size_z == 0 {
            return Err(GridError::InvalidChunkSize {
                chunk_size_x: self.chunk_size_x,
                chunk_size_z: self.chunk_size_z,
            });
        }
        if self.width % self.chunk_size_x != 0 || self.height % self.chunk_size_z != 0 {
            return Err(GridError::ChunkMismatch {
                width: self.width,
                height: self.height,
                chunk_size_x: self.chunk_size_x,
                chunk_size_z: self.chunk_size_z,
            });
        }
        if self.metrics.elevation_min > self.metrics.elevation_max {
            return Err(GridError::InvalidElevationBounds {
                min: self.metrics.elevation_min,
                max: self.metrics.elevation_max,
            });
        }
        Ok(())
    }

    pub fn chunk_count_x(&self) -> u32 {
        self.width / self.chunk_size_x.max(1)
    }

    pub fn chunk_count_z(&self) -> u32 {
        self.height / self.chunk_size_z.max(1)
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors that can occur while loading a grid config.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    IoError(std::io::Error),
    /// JSON deserialization error.
    JsonError(serde_json::Error),
    /// Parsed config failed validation.
    Invalid(GridError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::JsonError(e) => write!(f, "JSON error: {e}"),
            ConfigError::Invalid(e) => write!(f, "invalid grid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::JsonError(e)
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        ConfigError::Invalid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_count_x(), 4);
        assert_eq!(config.chunk_count_z(), 3);
    }

    #[test]
    fn test_rejects_partial_chunks() {
        let config = GridConfig::flat(7, 5, 5, 5);
        match config.validate() {
            Err(GridError::ChunkMismatch { width: 7, .. }) => {}
            other => panic!("expected ChunkMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert!(matches!(
            GridConfig::flat(0, 5, 5, 5).validate(),
            Err(GridError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            GridConfig::flat(5, 5, 0, 5).validate(),
            Err(GridError::InvalidChunkSize { .. })
        ));
    }

    #[test]
    fn test_json_partial_override() {
        let config = GridConfig::from_json_str(
            r#"{ "width": 10, "height": 10, "metrics": { "elevation_max": 8 } }"#,
        )
        .unwrap();
        assert_eq!(config.width, 10);
        assert_eq!(config.chunk_size_x, 5);
        assert_eq!(config.metrics.elevation_max, 8);
        assert_eq!(config.metrics.elevation_min, -3);
    }

    #[test]
    fn test_json_negative_dimension_rejected() {
        assert!(matches!(
            GridConfig::from_json_str(r#"{ "width": -5 }"#),
            Err(ConfigError::JsonError(_))
        ));
    }

    #[test]
    fn test_json_invalid_config_rejected() {
        assert!(matches!(
            GridConfig::from_json_str(r#"{ "width": 12 }"#),
            Err(ConfigError::Invalid(GridError::ChunkMismatch { .. }))
        ));
    }

    #[test]
    fn test_map_noise_params() {
        let params = MapNoiseConfig::default().params(20, 15);
        assert_eq!(params.width, 20);
        assert_eq!(params.scales, [1.0, 1.0, 1.0, 0.9]);
        assert!(!params.shift);
    }
}
