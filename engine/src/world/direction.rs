//! Hex Directions
//!
//! The six neighbor directions of a pointy-top hex, clockwise from north-east.
//! The discriminant doubles as the index into corner tables and neighbor arrays.

use serde::{Deserialize, Serialize};

/// One of the six edges of a pointy-top hexagon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HexDirection {
    NE = 0,
    E = 1,
    SE = 2,
    SW = 3,
    W = 4,
    NW = 5,
}

impl HexDirection {
    /// All directions in clockwise order starting at NE.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::NE,
        HexDirection::E,
        HexDirection::SE,
        HexDirection::SW,
        HexDirection::W,
        HexDirection::NW,
    ];

    /// Index of this direction (0..6).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction for an index, wrapping modulo 6.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Next direction clockwise.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Previous direction (counter-clockwise).
    pub fn previous(self) -> Self {
        Self::from_index(self.index() + 5)
    }

    /// Heading of the edge midpoint in degrees, measured clockwise from +Z.
    pub fn angle(self) -> f32 {
        self.index() as f32 * 60.0 + 30.0
    }

    /// Sign of the shortest rotation from `self` towards `dest`.
    ///
    /// Returns -1.0 when `dest` is one or two steps counter-clockwise and 1.0
    /// otherwise (including the opposite direction).
    pub fn turn_sign(self, dest: HexDirection) -> f32 {
        let previous = self.previous();
        if dest == previous || dest == previous.previous() {
            -1.0
        } else {
            1.0
        }
    }

    /// Bridges are only emitted for NE, E and SE so every shared edge is built once.
    pub fn owns_bridge(self) -> bool {
        self <= HexDirection::SE
    }

    /// Corner fillers are only emitted for NE and E so every triple is built once.
    pub fn owns_corner(self) -> bool {
        self <= HexDirection::E
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for d in HexDirection::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
        assert_eq!(HexDirection::NE.opposite(), HexDirection::SW);
        assert_eq!(HexDirection::W.opposite(), HexDirection::E);
    }

    #[test]
    fn test_next_previous_wrap() {
        assert_eq!(HexDirection::NW.next(), HexDirection::NE);
        assert_eq!(HexDirection::NE.previous(), HexDirection::NW);
        for d in HexDirection::ALL {
            assert_eq!(d.next().previous(), d);
        }
    }

    #[test]
    fn test_angles() {
        assert_eq!(HexDirection::NE.angle(), 30.0);
        assert_eq!(HexDirection::SW.angle(), 210.0);
        assert_eq!(HexDirection::NW.angle(), 330.0);
    }

    #[test]
    fn test_turn_sign() {
        assert_eq!(HexDirection::E.turn_sign(HexDirection::NE), -1.0);
        assert_eq!(HexDirection::E.turn_sign(HexDirection::NW), -1.0);
        assert_eq!(HexDirection::E.turn_sign(HexDirection::SE), 1.0);
        assert_eq!(HexDirection::E.turn_sign(HexDirection::W), 1.0);
    }

    #[test]
    fn test_ownership_split() {
        let bridges: Vec<_> = HexDirection::ALL.iter().filter(|d| d.owns_bridge()).collect();
        let corners: Vec<_> = HexDirection::ALL.iter().filter(|d| d.owns_corner()).collect();
        assert_eq!(bridges.len(), 3);
        assert_eq!(corners.len(), 2);
    }
}
