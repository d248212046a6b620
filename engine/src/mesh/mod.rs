//! Mesh Module
//!
//! CPU terrain mesh generation. Output buffers are plain `Pod` data; uploading
//! them is left to the renderer.

pub mod buffers;
pub mod builder;
pub mod triangulator;

pub use buffers::{MeshBuffers, TerrainVertex};
pub use builder::MeshBuilder;
pub use triangulator::{ChunkMesh, Triangulator};
