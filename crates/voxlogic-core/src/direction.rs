//! The six axis-aligned unit [`Direction`]s and their [`Axis`].

use std::fmt;

/// One of the three coordinate axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// The x axis.
    X,
    /// The y axis.
    Y,
    /// The z axis.
    Z,
}

impl Axis {
    /// All axes in x, y, z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in [`Axis::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// A unit step along one axis.
///
/// The declaration order is significant: [`Direction::ALL`] is the fixed
/// iteration order used for net discovery and tie-breaking, and
/// `ALL[i].opposite() == ALL[(i + 3) % 6]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// `(+1, 0, 0)`
    PosX,
    /// `(0, +1, 0)`
    PosY,
    /// `(0, 0, +1)`
    PosZ,
    /// `(-1, 0, 0)`
    NegX,
    /// `(0, -1, 0)`
    NegY,
    /// `(0, 0, -1)`
    NegZ,
}

impl Direction {
    /// All six directions in canonical iteration order.
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::PosY,
        Direction::PosZ,
        Direction::NegX,
        Direction::NegY,
        Direction::NegZ,
    ];

    /// Position of this direction in [`Direction::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::PosX => 0,
            Self::PosY => 1,
            Self::PosZ => 2,
            Self::NegX => 3,
            Self::NegY => 4,
            Self::NegZ => 5,
        }
    }

    /// Inverse of [`index`](Self::index). Indices wrap modulo 6.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// The direction pointing the other way along the same axis.
    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// The axis this direction lies on.
    pub fn axis(self) -> Axis {
        match self {
            Self::PosX | Self::NegX => Axis::X,
            Self::PosY | Self::NegY => Axis::Y,
            Self::PosZ | Self::NegZ => Axis::Z,
        }
    }

    /// Whether this direction points along the positive half of its axis.
    pub fn is_positive(self) -> bool {
        self.index() < 3
    }

    /// The direction along `axis` with the given sign.
    pub fn from_axis(axis: Axis, positive: bool) -> Self {
        let base = axis.index();
        if positive {
            Self::from_index(base)
        } else {
            Self::from_index(base + 3)
        }
    }

    /// Unit offset vector `(dx, dy, dz)`.
    pub fn vector(self) -> [i32; 3] {
        match self {
            Self::PosX => [1, 0, 0],
            Self::PosY => [0, 1, 0],
            Self::PosZ => [0, 0, 1],
            Self::NegX => [-1, 0, 0],
            Self::NegY => [0, -1, 0],
            Self::NegZ => [0, 0, -1],
        }
    }

    /// Right-handed cross product of two perpendicular directions.
    ///
    /// Returns `None` when the directions share an axis.
    pub fn cross(self, other: Self) -> Option<Self> {
        let [ax, ay, az] = self.vector();
        let [bx, by, bz] = other.vector();
        let c = [ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx];
        Self::ALL.into_iter().find(|d| d.vector() == c)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PosX => "+X",
            Self::PosY => "+Y",
            Self::PosZ => "+Z",
            Self::NegX => "-X",
            Self::NegY => "-Y",
            Self::NegZ => "-Z",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_is_fixed() {
        let names: Vec<String> = Direction::ALL.iter().map(|d| d.to_string()).collect();
        assert_eq!(names, ["+X", "+Y", "+Z", "-X", "-Y", "-Z"]);
    }

    #[test]
    fn opposite_is_involution_on_same_axis() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
            assert_eq!(d.opposite().axis(), d.axis());
            assert_ne!(d.opposite().is_positive(), d.is_positive());
        }
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        assert_eq!(Direction::PosX.cross(Direction::PosY), Some(Direction::PosZ));
        assert_eq!(Direction::PosY.cross(Direction::PosZ), Some(Direction::PosX));
        assert_eq!(Direction::PosZ.cross(Direction::PosX), Some(Direction::PosY));
        assert_eq!(Direction::PosY.cross(Direction::PosX), Some(Direction::NegZ));
        assert_eq!(Direction::PosX.cross(Direction::NegX), None);
    }

    #[test]
    fn from_axis_round_trips() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_axis(d.axis(), d.is_positive()), d);
        }
    }
}
