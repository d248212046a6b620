//! Hex Metrics
//!
//! Geometric and gameplay constants shared by the grid, the pathfinder and the
//! triangulator. Defaults match the tuned values of the terrain shader, so
//! change them together with the renderer's depth range.
//!
//! ## Layout
//! Pointy-top hexagons with the first corner at +Z. Rows advance along +Z by
//! `1.5 * outer_radius`; columns along +X by `2 * inner_radius`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::direction::HexDirection;

/// Ratio between the inner (edge) and outer (corner) radius of a hexagon.
pub const INNER_RADIUS_RATIO: f32 = 0.866_025_404;

/// Geometry and elevation configuration for a hex map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexMetrics {
    /// Distance from the hex center to a corner (world units)
    pub outer_radius: f32,
    /// Fraction of the hexagon that is solid (unblended) terrain
    pub solid_factor: f32,
    /// World height of one elevation level
    pub elevation_step: f32,
    /// Lowest allowed elevation level
    pub elevation_min: i32,
    /// Highest allowed elevation level
    pub elevation_max: i32,
    /// Largest elevation difference still classified as a slope
    pub slope_break_point: i32,
    /// Number of fan segments per hex edge
    pub hex_edge_factor: u32,
    /// Lateral displacement strength applied to mesh vertices
    pub cell_perturb_strength: f32,
    /// Vertical displacement strength applied to cell centers
    pub elevation_perturb_strength: f32,
    /// World-to-texture scale used when sampling the perturbation field
    pub noise_scale: f32,
    /// Master switch for all noise displacement
    pub perturb_enabled: bool,
}

impl Default for HexMetrics {
    fn default() -> Self {
        Self {
            outer_radius: 10.0,
            solid_factor: 0.8,
            elevation_step: 5.0,
            elevation_min: -3,
            elevation_max: 5,
            slope_break_point: 2,
            hex_edge_factor: 4,
            cell_perturb_strength: 3.0,
            elevation_perturb_strength: 2.0,
            noise_scale: 0.003,
            perturb_enabled: true,
        }
    }
}

impl HexMetrics {
    /// Metrics with every perturbation disabled. Handy for exact geometry checks.
    pub fn unperturbed() -> Self {
        Self {
            perturb_enabled: false,
            ..Self::default()
        }
    }

    /// Distance from the hex center to the middle of an edge.
    pub fn inner_radius(&self) -> f32 {
        self.outer_radius * INNER_RADIUS_RATIO
    }

    /// Fraction of each edge-to-edge gap covered by bridges.
    pub fn blend_factor(&self) -> f32 {
        1.0 - self.solid_factor
    }

    /// Corner `index` of the hexagon relative to its center (wraps modulo 6).
    pub fn corner(&self, index: usize) -> Vec3 {
        let outer = self.outer_radius;
        let inner = self.inner_radius();
        match index % 6 {
            0 => Vec3::new(0.0, 0.0, outer),
            1 => Vec3::new(inner, 0.0, 0.5 * outer),
            2 => Vec3::new(inner, 0.0, -0.5 * outer),
            3 => Vec3::new(0.0, 0.0, -outer),
            4 => Vec3::new(-inner, 0.0, -0.5 * outer),
            _ => Vec3::new(-inner, 0.0, 0.5 * outer),
        }
    }

    pub fn first_corner(&self, direction: HexDirection) -> Vec3 {
        self.corner(direction.index())
    }

    pub fn second_corner(&self, direction: HexDirection) -> Vec3 {
        self.corner(direction.index() + 1)
    }

    pub fn first_solid_corner(&self, direction: HexDirection) -> Vec3 {
        self.first_corner(direction) * self.solid_factor
    }

    pub fn second_solid_corner(&self, direction: HexDirection) -> Vec3 {
        self.second_corner(direction) * self.solid_factor
    }

    /// Offset from a solid edge to the facing solid edge of the neighbor.
    pub fn bridge(&self, direction: HexDirection) -> Vec3 {
        (self.first_corner(direction) + self.second_corner(direction)) * self.blend_factor()
    }

    /// Clamp an elevation level into the configured bounds.
    pub fn clamp_elevation(&self, elevation: i32) -> i32 {
        elevation.clamp(self.elevation_min, self.elevation_max)
    }

    /// Elevation mapped to 0..1 across the configured bounds (shader depth).
    pub fn normalized_elevation(&self, elevation: i32) -> f32 {
        let span = (self.elevation_max - self.elevation_min) as f32;
        if span <= 0.0 {
            return 0.0;
        }
        ((elevation - self.elevation_min) as f32 / span).clamp(0.0, 1.0)
    }
}
