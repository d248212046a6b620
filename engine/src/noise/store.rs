//! Noise Field Persistence
//!
//! Stores generated fields as 16-bit RGBA PNG files named after their params
//! key, so a map can be regenerated bit-identically across runs without paying
//! for generation again.

use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgba};

use super::field::{NoiseField, NoiseParams, dequantize, quantize};

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors that can occur while loading or saving a noise field.
#[derive(Debug)]
pub enum NoiseStoreError {
    /// Standard I/O error (directory creation, file access).
    IoError(std::io::Error),
    /// PNG encode/decode error.
    ImageError(image::ImageError),
    /// Stored image does not have the dimensions its key promises.
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },
}

impl std::fmt::Display for NoiseStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoiseStoreError::IoError(e) => write!(f, "IO error: {e}"),
            NoiseStoreError::ImageError(e) => write!(f, "image error: {e}"),
            NoiseStoreError::DimensionMismatch { expected, found } => write!(
                f,
                "stored noise is {}x{}, expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for NoiseStoreError {}

impl From<std::io::Error> for NoiseStoreError {
    fn from(e: std::io::Error) -> Self {
        NoiseStoreError::IoError(e)
    }
}

impl From<image::ImageError> for NoiseStoreError {
    fn from(e: image::ImageError) -> Self {
        NoiseStoreError::ImageError(e)
    }
}

// ============================================================================
// STORE
// ============================================================================

/// A directory of persisted noise fields.
#[derive(Clone, Debug)]
pub struct NoiseStore {
    directory: PathBuf,
}

impl NoiseStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File that holds the field for `params`.
    pub fn path_for(&self, params: &NoiseParams) -> PathBuf {
        self.directory.join(format!("{}.png", params.key()))
    }

    /// Load the field for `params`, or `Ok(None)` if it was never stored.
    pub fn load(&self, params: &NoiseParams) -> Result<Option<NoiseField>, NoiseStoreError> {
        let path = self.path_for(params);
        if !path.exists() {
            return Ok(None);
        }

        let image = image::open(&path)?.to_rgba16();
        let expected = (params.width.max(1), params.height.max(1));
        let found = image.dimensions();
        if found != expected {
            return Err(NoiseStoreError::DimensionMismatch { expected, found });
        }

        let samples = image
            .pixels()
            .map(|pixel| pixel.0.map(dequantize))
            .collect();
        Ok(NoiseField::from_samples(found.0, found.1, samples))
    }

    /// Write `field` under the key of `params`, creating the directory if needed.
    pub fn save(&self, params: &NoiseParams, field: &NoiseField) -> Result<(), NoiseStoreError> {
        std::fs::create_dir_all(&self.directory)?;

        let image: ImageBuffer<Rgba<u16>, Vec<u16>> =
            ImageBuffer::from_fn(field.width(), field.height(), |x, y| {
                let sample = field.samples()[(x + y * field.width()) as usize];
                Rgba(sample.map(quantize))
            });

        let path = self.path_for(params);
        image.save(&path)?;
        println!("[NoiseStore] Saved {}", path.display());
        Ok(())
    }
}
