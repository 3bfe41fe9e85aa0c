//! Reusable grid fixtures.
//!
//! - [`ids`]: the block ids of the [`standard_catalog`].
//! - [`GridBuilder`]: places blocks and wire runs with terse calls.
//! - [`SelfNestingGrid`]: a one-block grid whose `ic` block contains itself,
//!   for exercising the embedding depth limit.

use std::sync::Arc;
use voxlogic_core::{Aabb, Behavior, BlockId, BlockPos, Direction, Orientation};
use voxlogic_grid::{BlockCatalog, BlockCatalogBuilder, BlockType, Grid, GridError, VoxelGrid};

/// Block ids of the standard catalog.
pub mod ids {
    use voxlogic_core::BlockId;

    pub const WIRE: BlockId = BlockId(1);
    pub const PAD: BlockId = BlockId(2);
    pub const INDICATOR: BlockId = BlockId(3);
    pub const JUNCTION: BlockId = BlockId(4);
    pub const NOR: BlockId = BlockId(5);
    pub const GATE: BlockId = BlockId(6);
    pub const GET_SUB_DATUM: BlockId = BlockId(7);
    pub const GET_NEIGHBOR_ID: BlockId = BlockId(8);
    pub const SPONTANEOUS: BlockId = BlockId(9);
    pub const SET_ROTATION: BlockId = BlockId(10);
    pub const BECOME: BlockId = BlockId(11);
    pub const IC_OUTPUT: BlockId = BlockId(12);
    /// Plain scenery, no behavior.
    pub const STONE: BlockId = BlockId(20);
    /// Free ids for `ic` block types registered by individual tests.
    pub const CHIP: BlockId = BlockId(30);
    pub const CHIP_2: BlockId = BlockId(31);
}

/// A catalog builder pre-loaded with one block type per behavior except
/// `ic`, plus stone. Tests add their `ic` types before building.
pub fn standard_catalog() -> BlockCatalogBuilder {
    let typed = |name: &str| BlockType::new(name).with_behavior(behavior(name));
    BlockCatalog::builder()
        .block(ids::WIRE, typed("wire"))
        .block(ids::PAD, typed("pad"))
        .block(ids::INDICATOR, typed("indicator"))
        .block(ids::JUNCTION, typed("junction"))
        .block(ids::NOR, typed("nor"))
        .block(ids::GATE, typed("gate"))
        .block(ids::GET_SUB_DATUM, typed("getSubDatum"))
        .block(ids::GET_NEIGHBOR_ID, typed("getNeighborID"))
        .block(ids::SPONTANEOUS, typed("spontaneous"))
        .block(ids::SET_ROTATION, typed("setRotation"))
        .block(ids::BECOME, typed("become"))
        .block(ids::IC_OUTPUT, typed("icOutput"))
        .block(ids::STONE, BlockType::new("stone"))
}

fn behavior(name: &str) -> Behavior {
    Behavior::from_name(name).unwrap_or_else(|| panic!("unknown behavior {name}"))
}

/// The built [`standard_catalog`].
pub fn catalog() -> Arc<BlockCatalog> {
    Arc::new(standard_catalog().build().expect("standard catalog is valid"))
}

/// Fluent placement on a [`VoxelGrid`]. Panics on any grid error.
pub struct GridBuilder {
    grid: VoxelGrid,
}

impl GridBuilder {
    /// An all-air grid of `size` over the standard catalog.
    pub fn new(size: [u32; 3]) -> Self {
        Self::with_catalog(catalog(), size)
    }

    pub fn with_catalog(catalog: Arc<BlockCatalog>, size: [u32; 3]) -> Self {
        Self {
            grid: VoxelGrid::new(catalog, size).expect("valid grid size"),
        }
    }

    /// Place an unrotated block with sub-datum 0.
    pub fn block(mut self, pos: impl Into<BlockPos>, id: BlockId) -> Self {
        self.grid.place(pos.into(), id).expect("place block");
        self
    }

    /// Place a rotated block.
    pub fn rotated(mut self, pos: impl Into<BlockPos>, id: BlockId, o: Orientation) -> Self {
        self.grid
            .set_block(pos.into(), id, o, 0)
            .expect("place rotated block");
        self
    }

    /// Place an unrotated block with a sub-datum.
    pub fn datum(mut self, pos: impl Into<BlockPos>, id: BlockId, sub_datum: i32) -> Self {
        self.grid
            .set_block(pos.into(), id, Orientation::IDENTITY, sub_datum)
            .expect("place block with sub-datum");
        self
    }

    /// `len` wires starting one step from `from` along `direction`.
    pub fn wires(mut self, from: impl Into<BlockPos>, direction: Direction, len: usize) -> Self {
        let mut pos = from.into();
        for _ in 0..len {
            pos = pos.offset(direction);
            self.grid.place(pos, ids::WIRE).expect("place wire");
        }
        self
    }

    pub fn build(self) -> VoxelGrid {
        self.grid
    }
}

/// A 1×1×1 grid holding one `ic` block whose nested grid is another
/// `SelfNestingGrid`. Every lookup allocates a fresh nested instance, so
/// only the engine's depth limit stops compilation.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelfNestingGrid;

/// Type id of the block in a [`SelfNestingGrid`].
pub const SELF_NESTING_CHIP: BlockId = ids::CHIP;

impl Grid for SelfNestingGrid {
    fn bounds(&self) -> Aabb {
        Aabb::from_block(BlockPos::ORIGIN)
    }

    fn block_id(&self, pos: BlockPos) -> BlockId {
        if pos == BlockPos::ORIGIN {
            SELF_NESTING_CHIP
        } else {
            BlockId::AIR
        }
    }

    fn behavior(&self, pos: BlockPos) -> Option<Behavior> {
        (pos == BlockPos::ORIGIN).then_some(Behavior::Ic)
    }

    fn orientation(&self, _pos: BlockPos) -> Orientation {
        Orientation::IDENTITY
    }

    fn sub_datum(&self, _pos: BlockPos) -> i32 {
        0
    }

    fn nested_grid(&self, pos: BlockPos) -> Option<Arc<dyn Grid>> {
        (pos == BlockPos::ORIGIN).then(|| Arc::new(SelfNestingGrid) as Arc<dyn Grid>)
    }

    fn set_sub_datum(&mut self, pos: BlockPos, _value: i32) -> Result<(), GridError> {
        Err(self.out_of_bounds(pos))
    }

    fn set_orientation(&mut self, pos: BlockPos, _o: Orientation) -> Result<(), GridError> {
        Err(self.out_of_bounds(pos))
    }

    fn replace_block(&mut self, pos: BlockPos, _id: BlockId, _sub: i32) -> Result<(), GridError> {
        Err(self.out_of_bounds(pos))
    }
}

impl SelfNestingGrid {
    // Read-only: every write is refused.
    fn out_of_bounds(&self, pos: BlockPos) -> GridError {
        GridError::OutOfBounds {
            pos,
            bounds: self.bounds(),
        }
    }
}
