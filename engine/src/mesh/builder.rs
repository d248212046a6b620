//! Mesh Builder
//!
//! Appends perturbed triangles and quads to [`MeshBuffers`]. Vertices are
//! never shared between primitives, so every primitive carries its own blend
//! weights and terrain indices.

use std::sync::Arc;

use glam::Vec3;

use super::buffers::{MeshBuffers, TerrainVertex};
use crate::noise::{NoiseField, PerturbOrientation, perturb};
use crate::world::HexMetrics;

/// Full weight on the first terrain slot.
pub const WEIGHTS_1: Vec3 = Vec3::new(1.0, 0.0, 0.0);
/// Full weight on the second terrain slot.
pub const WEIGHTS_2: Vec3 = Vec3::new(0.0, 1.0, 0.0);
/// Full weight on the third terrain slot.
pub const WEIGHTS_3: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Primitive writer shared by all triangulation passes.
#[derive(Clone, Debug)]
pub struct MeshBuilder {
    field: Option<Arc<NoiseField>>,
    strength: f32,
    scale: f32,
}

impl MeshBuilder {
    /// Builder that perturbs laterally with `field` when the metrics enable it.
    pub fn new(metrics: &HexMetrics, field: Arc<NoiseField>) -> Self {
        Self {
            field: metrics.perturb_enabled.then_some(field),
            strength: metrics.cell_perturb_strength,
            scale: metrics.noise_scale,
        }
    }

    /// Builder that writes positions unchanged.
    pub fn flat() -> Self {
        Self {
            field: None,
            strength: 0.0,
            scale: 0.0,
        }
    }

    pub fn perturb(&self, position: Vec3) -> Vec3 {
        match &self.field {
            Some(field) => perturb(
                position,
                self.strength,
                field,
                self.scale,
                PerturbOrientation::Lateral,
            ),
            None => position,
        }
    }

    /// Append triangle `(a, b, c)` with per-vertex blend weights.
    pub fn add_triangle(
        &self,
        buffers: &mut MeshBuffers,
        positions: [Vec3; 3],
        weights: [Vec3; 3],
        terrain: Vec3,
    ) {
        let base = buffers.vertices.len() as u32;
        for (position, blend) in positions.into_iter().zip(weights) {
            buffers
                .vertices
                .push(TerrainVertex::new(self.perturb(position), blend, terrain));
        }
        buffers.indices.extend([base, base + 1, base + 2]);
    }

    /// Append quad `v1 v2` (near edge) to `v3 v4` (far edge) as triangles
    /// `(v1, v3, v2)` and `(v2, v3, v4)`.
    pub fn add_quad(
        &self,
        buffers: &mut MeshBuffers,
        positions: [Vec3; 4],
        near: Vec3,
        far: Vec3,
        terrain: Vec3,
    ) {
        let base = buffers.vertices.len() as u32;
        for (position, blend) in positions.into_iter().zip([near, near, far, far]) {
            buffers
                .vertices
                .push(TerrainVertex::new(self.perturb(position), blend, terrain));
        }
        buffers
            .indices
            .extend([base, base + 2, base + 1, base + 1, base + 2, base + 3]);
    }
}
