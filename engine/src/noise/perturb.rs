//! Vertex Perturbation
//!
//! Displaces positions by a noise field so hex geometry looks organic. The
//! displacement is a pure function of the lateral position, so two vertices
//! that coincide before perturbation coincide afterwards and shared edges stay
//! closed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::field::NoiseField;

/// Which axes a perturbation displaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerturbOrientation {
    /// X, Y and Z
    Universal,
    /// X and Z only (cell fans, bridges, corners)
    Lateral,
    /// Y only (cell center heights)
    Vertical,
}

impl PerturbOrientation {
    fn lateral(self) -> bool {
        matches!(self, PerturbOrientation::Universal | PerturbOrientation::Lateral)
    }

    fn vertical(self) -> bool {
        matches!(self, PerturbOrientation::Universal | PerturbOrientation::Vertical)
    }
}

/// Displace `position` by `(sample * 2 - 1) * strength` on the selected axes.
///
/// X and Y use the red channel, Z uses the blue channel. The field is sampled
/// at `(position.x, position.z) * scale`.
pub fn perturb(
    position: Vec3,
    strength: f32,
    field: &NoiseField,
    scale: f32,
    orientation: PerturbOrientation,
) -> Vec3 {
    let sample = field.sample_bilinear(position.x, position.z, scale);
    let mut out = position;
    if orientation.lateral() {
        out.x += (sample.x * 2.0 - 1.0) * strength;
        out.z += (sample.z * 2.0 - 1.0) * strength;
    }
    if orientation.vertical() {
        out.y += (sample.x * 2.0 - 1.0) * strength;
    }
    out
}
