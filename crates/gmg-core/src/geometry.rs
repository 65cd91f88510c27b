//! Small enums shared by every layer of the engine: which axis, which face,
//! how that axis is stretched, and whether the run is planar or 3-D.

use serde::{Deserialize, Serialize};

/// One of the three coordinate directions. Z is never decomposed across
/// ranks (see the parallel topology's contract), but it still has its own
/// mesh, stencil, and stretching law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    X,
    Y,
    Z,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::X, Direction::Y, Direction::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::X => 0,
            Direction::Y => 1,
            Direction::Z => 2,
        }
    }
}

/// A face of a rank's sub-domain. Only X and Y faces ever need halo
/// exchange or a physical boundary condition; Z is not decomposed and has
/// no face in this sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    XMinus,
    XPlus,
    YMinus,
    YPlus,
}

impl Face {
    pub const ALL: [Face; 4] = [Face::XMinus, Face::XPlus, Face::YMinus, Face::YPlus];

    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            Face::XMinus | Face::XPlus => Direction::X,
            Face::YMinus | Face::YPlus => Direction::Y,
        }
    }

    /// `true` for the low-index face of its direction (`XMinus`, `YMinus`).
    #[inline]
    pub fn is_low(self) -> bool {
        matches!(self, Face::XMinus | Face::YMinus)
    }

    /// The opposite face of the same direction: what a neighbour across
    /// `self` calls the face pointing back at this rank.
    #[inline]
    pub fn opposite(self) -> Face {
        match self {
            Face::XMinus => Face::XPlus,
            Face::XPlus => Face::XMinus,
            Face::YMinus => Face::YPlus,
            Face::YPlus => Face::YMinus,
        }
    }
}

/// The tangent-hyperbolic grid-stretch law for one direction, matching the
/// `xGrid`/`yGrid`/`zGrid ∈ {0,1,2}` configuration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum StretchMode {
    Uniform = 0,
    SingleTanh = 1,
    DoubleTanh = 2,
}

impl StretchMode {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(StretchMode::Uniform),
            1 => Some(StretchMode::SingleTanh),
            2 => Some(StretchMode::DoubleTanh),
            _ => None,
        }
    }
}

/// Runtime dimensionality tag, replacing the preprocessor switch the
/// original solver used (see the Design Notes' "Compile-time dimensionality
/// switch" entry). `Planar2D` drops every j-indexed term from the stencils;
/// `ThreeD` with `ny == 1` must agree with it bit-for-bit up to rounding
/// (the "Dimension parity" testable property).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimensionality {
    Planar2D,
    ThreeD,
}

impl Dimensionality {
    #[inline]
    pub fn active_directions(self) -> &'static [Direction] {
        match self {
            Dimensionality::Planar2D => &[Direction::X, Direction::Z],
            Dimensionality::ThreeD => &[Direction::X, Direction::Y, Direction::Z],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_direction_mapping() {
        assert_eq!(Face::XMinus.direction(), Direction::X);
        assert_eq!(Face::YPlus.direction(), Direction::Y);
        assert!(Face::XMinus.is_low());
        assert!(!Face::XPlus.is_low());
        assert_eq!(Face::XMinus.opposite(), Face::XPlus);
        assert_eq!(Face::YPlus.opposite(), Face::YMinus);
    }

    #[test]
    fn stretch_mode_round_trip() {
        assert_eq!(StretchMode::from_code(0), Some(StretchMode::Uniform));
        assert_eq!(StretchMode::from_code(1), Some(StretchMode::SingleTanh));
        assert_eq!(StretchMode::from_code(2), Some(StretchMode::DoubleTanh));
        assert_eq!(StretchMode::from_code(3), None);
    }

    #[test]
    fn planar_drops_y() {
        assert_eq!(
            Dimensionality::Planar2D.active_directions(),
            &[Direction::X, Direction::Z]
        );
        assert_eq!(Dimensionality::ThreeD.active_directions().len(), 3);
    }
}
