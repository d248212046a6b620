//! Hex Coordinates
//!
//! Cube coordinates for a pointy-top hex grid stored as `(x, z)` with the third
//! component derived as `y = -x - z`. Offset coordinates (the grid's storage
//! layout) shift every row `z` laterally by `z / 2` hexes.
//!
//! # Example
//!
//! ```ignore
//! use hex_terrain_engine::world::{HexCoordinates, HexMetrics};
//!
//! let metrics = HexMetrics::default();
//! let coords = HexCoordinates::from_offset(3, 4);
//! let world = coords.to_position(&metrics);
//! assert_eq!(HexCoordinates::from_position(world, &metrics), coords);
//! ```

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::direction::HexDirection;
use super::metrics::HexMetrics;

/// Cube coordinate step for each direction, as `(dx, dz)`.
const DIRECTION_OFFSETS: [(i32, i32); 6] = [
    (0, 1),  // NE
    (1, 0),  // E
    (1, -1), // SE
    (0, -1), // SW
    (-1, 0), // W
    (-1, 1), // NW
];

/// Immutable cube coordinate of a hex cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoordinates {
    x: i32,
    z: i32,
}

impl HexCoordinates {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    /// Derived third cube component; `x + y + z == 0` always holds.
    pub fn y(&self) -> i32 {
        -self.x - self.z
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    /// Convert grid offset coordinates (column, row) to cube coordinates.
    pub fn from_offset(x: i32, z: i32) -> Self {
        Self::new(x - z / 2, z)
    }

    /// Inverse of [`HexCoordinates::from_offset`]: `(column, row)`.
    pub fn to_offset(&self) -> (i32, i32) {
        (self.x + self.z / 2, self.z)
    }

    /// World-space center of the hex at height zero.
    pub fn to_position(&self, metrics: &HexMetrics) -> Vec3 {
        Vec3::new(
            (self.x as f32 + self.z as f32 * 0.5) * (metrics.inner_radius() * 2.0),
            0.0,
            self.z as f32 * (metrics.outer_radius * 1.5),
        )
    }

    /// Coordinate of the hex containing a world position (height is ignored).
    ///
    /// All three cube components are interpolated exactly and rounded; when the
    /// rounded triple does not sum to zero, the component with the largest
    /// rounding error is re-derived from the other two.
    pub fn from_position(position: Vec3, metrics: &HexMetrics) -> Self {
        let z = position.z / (metrics.outer_radius * 1.5);
        let x = position.x / (metrics.inner_radius() * 2.0) - z * 0.5;
        let y = -x - z;

        let mut ix = x.round() as i32;
        let iy = y.round() as i32;
        let mut iz = z.round() as i32;

        if ix + iy + iz != 0 {
            let dx = (x - ix as f32).abs();
            let dy = (y - iy as f32).abs();
            let dz = (z - iz as f32).abs();

            if dx > dy && dx > dz {
                ix = -iy - iz;
            } else if dz > dy {
                iz = -ix - iy;
            }
            // Otherwise y carried the largest error; it is derived, so nothing to fix.
        }

        Self::new(ix, iz)
    }

    /// Hex distance in cube space.
    pub fn distance(&self, other: &HexCoordinates) -> u32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y() - other.y()).abs();
        let dz = (self.z - other.z).abs();
        ((dx + dy + dz) / 2) as u32
    }

    /// Adjacent coordinate in `direction`.
    pub fn neighbor(&self, direction: HexDirection) -> Self {
        let (dx, dz) = DIRECTION_OFFSETS[direction.index()];
        Self::new(self.x + dx, self.z + dz)
    }

    /// Direction from `self` to an adjacent coordinate, `None` if not adjacent.
    pub fn direction_to(&self, other: &HexCoordinates) -> Option<HexDirection> {
        HexDirection::ALL
            .into_iter()
            .find(|&d| self.neighbor(d) == *other)
    }

    /// Every coordinate within `radius` steps of `self`, including `self`.
    ///
    /// Pure coordinate math; callers filter against grid bounds.
    pub fn within_radius(self, radius: u32) -> impl Iterator<Item = HexCoordinates> {
        let r = radius as i32;
        (-r..=r).flat_map(move |dx| {
            let low = (-r).max(-dx - r);
            let high = r.min(-dx + r);
            (low..=high).map(move |dz| HexCoordinates::new(self.x + dx, self.z + dz))
        })
    }
}

impl fmt::Display for HexCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y(), self.z)
    }
}
