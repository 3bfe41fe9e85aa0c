//! Block coordinates and axis-aligned bounding boxes.

use crate::direction::Direction;
use std::fmt;

/// Integer coordinate of a voxel within a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    /// x coordinate.
    pub x: i32,
    /// y coordinate.
    pub y: i32,
    /// z coordinate.
    pub z: i32,
}

impl BlockPos {
    /// The origin `(0, 0, 0)`.
    pub const ORIGIN: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    /// Construct a position from its components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The neighbouring position one step along `direction`.
    pub fn offset(self, direction: Direction) -> Self {
        let [dx, dy, dz] = direction.vector();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Components as an array.
    pub fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i32; 3]> for BlockPos {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Half-open axis-aligned box of voxels: `low <= p < high` on every axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Aabb {
    low: BlockPos,
    high: BlockPos,
}

impl Aabb {
    /// Box spanning `low` (inclusive) to `high` (exclusive).
    ///
    /// Returns `None` if `high` is not strictly greater than `low` on every axis.
    pub fn new(low: BlockPos, high: BlockPos) -> Option<Self> {
        (low.x < high.x && low.y < high.y && low.z < high.z).then_some(Self { low, high })
    }

    /// The unit cube occupied by a single block.
    pub fn from_block(pos: BlockPos) -> Self {
        Self {
            low: pos,
            high: BlockPos::new(pos.x + 1, pos.y + 1, pos.z + 1),
        }
    }

    /// Smallest box containing both `self` and the unit cube at `pos`.
    pub fn union_block(self, pos: BlockPos) -> Self {
        Self {
            low: BlockPos::new(
                self.low.x.min(pos.x),
                self.low.y.min(pos.y),
                self.low.z.min(pos.z),
            ),
            high: BlockPos::new(
                self.high.x.max(pos.x + 1),
                self.high.y.max(pos.y + 1),
                self.high.z.max(pos.z + 1),
            ),
        }
    }

    /// Inclusive lower corner.
    pub fn low(&self) -> BlockPos {
        self.low
    }

    /// Exclusive upper corner.
    pub fn high(&self) -> BlockPos {
        self.high
    }

    /// Extent along each axis.
    pub fn size(&self) -> [u32; 3] {
        [
            self.high.x.abs_diff(self.low.x),
            self.high.y.abs_diff(self.low.y),
            self.high.z.abs_diff(self.low.z),
        ]
    }

    /// Number of voxels inside the box.
    pub fn volume(&self) -> u64 {
        self.size().iter().map(|&s| u64::from(s)).product()
    }

    /// Whether `pos` lies inside the box.
    pub fn contains(&self, pos: BlockPos) -> bool {
        (self.low.x..self.high.x).contains(&pos.x)
            && (self.low.y..self.high.y).contains(&pos.y)
            && (self.low.z..self.high.z).contains(&pos.z)
    }

    /// Every position in the box, z outermost and x innermost.
    pub fn positions(self) -> impl Iterator<Item = BlockPos> {
        (self.low.z..self.high.z).flat_map(move |z| {
            (self.low.y..self.high.y)
                .flat_map(move |y| (self.low.x..self.high.x).map(move |x| BlockPos::new(x, y, z)))
        })
    }
}
