//! The 24 rigid rotations of a cube.
//!
//! An [`Orientation`] is fully determined by where it sends the canonical
//! `+X` and `+Y` directions; the image of `+Z` follows from the right-hand
//! rule. Codes are assigned as `x_image.index() * 4 + k`, where `k` is the
//! position of `y_image` among the four directions perpendicular to
//! `x_image` in [`Direction::ALL`] order. Code 0 is the identity.
//!
//! # Examples
//!
//! ```
//! use voxlogic_core::{Direction, Orientation};
//!
//! let quarter = Orientation::from_basis(Direction::PosY, Direction::NegX).unwrap();
//! assert_eq!(quarter.transform(Direction::PosX), Direction::PosY);
//! assert_eq!(quarter.inverse().transform(Direction::PosY), Direction::PosX);
//! assert_eq!(quarter * quarter.inverse(), Orientation::IDENTITY);
//! ```

use crate::direction::Direction;
use std::fmt;
use std::ops::Mul;

/// One of the 24 proper rotations of the cube, mapping canonical block faces
/// to physical directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Orientation(u8);

impl Orientation {
    /// Number of distinct orientations.
    pub const COUNT: u8 = 24;

    /// The rotation that leaves every direction in place.
    pub const IDENTITY: Orientation = Orientation(0);

    /// Look up an orientation by code. Returns `None` for codes `>= 24`.
    pub fn from_code(code: u8) -> Option<Self> {
        (code < Self::COUNT).then_some(Self(code))
    }

    /// Wrap an arbitrary integer onto the 24 codes (floored modulo).
    pub fn from_code_wrapping(code: i64) -> Self {
        // rem_euclid(24) is always in 0..24.
        Self(code.rem_euclid(i64::from(Self::COUNT)) as u8)
    }

    /// The numeric code of this orientation, in `0..24`.
    pub fn code(self) -> u8 {
        self.0
    }

    /// All 24 orientations in code order.
    pub fn all() -> impl Iterator<Item = Orientation> {
        (0..Self::COUNT).map(Self)
    }

    /// Build the orientation sending `+X` to `x_image` and `+Y` to `y_image`.
    ///
    /// Returns `None` when the two images share an axis.
    pub fn from_basis(x_image: Direction, y_image: Direction) -> Option<Self> {
        let k = perpendicular(x_image).iter().position(|&d| d == y_image)?;
        Some(Self((x_image.index() * 4 + k) as u8))
    }

    /// Images of the canonical `+X`, `+Y` and `+Z` directions.
    pub fn basis(self) -> [Direction; 3] {
        let x = Direction::from_index(usize::from(self.0 / 4));
        let y = perpendicular(x)[usize::from(self.0 % 4)];
        // x and y are perpendicular by construction.
        let z = x.cross(y).unwrap_or(Direction::PosZ);
        [x, y, z]
    }

    /// The physical direction that canonical `direction` is rotated onto.
    pub fn transform(self, direction: Direction) -> Direction {
        let image = self.basis()[direction.axis().index()];
        if direction.is_positive() {
            image
        } else {
            image.opposite()
        }
    }

    /// The rotation applying `inner` first and then `self`.
    pub fn compose(self, inner: Orientation) -> Orientation {
        let x = self.transform(inner.transform(Direction::PosX));
        let y = self.transform(inner.transform(Direction::PosY));
        Self::from_basis(x, y).unwrap_or(Self::IDENTITY)
    }

    /// The canonical direction that `self` rotates onto `direction`.
    pub fn untransform(self, direction: Direction) -> Direction {
        let basis = self.basis();
        // The three images cover all three axes.
        let axis = basis
            .iter()
            .position(|image| image.axis() == direction.axis())
            .unwrap_or(0);
        let canonical = Direction::from_index(axis);
        if basis[axis] == direction {
            canonical
        } else {
            canonical.opposite()
        }
    }

    /// The rotation undoing `self`.
    pub fn inverse(self) -> Orientation {
        let x = self.untransform(Direction::PosX);
        let y = self.untransform(Direction::PosY);
        Self::from_basis(x, y).unwrap_or(Self::IDENTITY)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Orientation {
    type Output = Orientation;

    fn mul(self, rhs: Orientation) -> Orientation {
        self.compose(rhs)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.basis();
        write!(f, "R{}[{x},{y},{z}]", self.0)
    }
}

/// The four directions perpendicular to `d`, in [`Direction::ALL`] order.
fn perpendicular(d: Direction) -> [Direction; 4] {
    let mut out = [Direction::PosX; 4];
    let mut i = 0;
    for candidate in Direction::ALL {
        if candidate.axis() != d.axis() {
            out[i] = candidate;
            i += 1;
        }
    }
    out
}
