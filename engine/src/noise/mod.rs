//! Noise Module
//!
//! Deterministic noise fields used to seed terrain and to perturb mesh
//! geometry, plus the cache and optional PNG persistence around them.

pub mod cache;
pub mod field;
pub mod perturb;
pub mod store;

pub use cache::NoiseCache;
pub use field::{NoiseField, NoiseParams};
pub use perturb::{PerturbOrientation, perturb};
pub use store::{NoiseStore, NoiseStoreError};
