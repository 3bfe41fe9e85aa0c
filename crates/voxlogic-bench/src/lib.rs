//! Benchmark profiles for the voxlogic circuit engine.
//!
//! Provides pre-built grids for benchmarking:
//!
//! - [`wire_chain`]: one pad driving a lamp through a long wire run
//! - [`gate_lattice`]: rows of pad-opened gates, one cluster per row
//! - [`chip_row`]: `ic` blocks alternating with lamps, each evaluating a
//!   nested grid

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;
use voxlogic_core::{Behavior, BlockId, BlockPos, Orientation};
use voxlogic_grid::{BlockCatalog, BlockType, GridError, VoxelGrid};

/// Block type ids used by every profile.
pub mod ids {
    use voxlogic_core::BlockId;

    pub const WIRE: BlockId = BlockId(1);
    pub const PAD: BlockId = BlockId(2);
    pub const LAMP: BlockId = BlockId(3);
    pub const GATE: BlockId = BlockId(4);
    pub const SENSOR: BlockId = BlockId(5);
    pub const OUTPUT: BlockId = BlockId(6);
    pub const CHIP: BlockId = BlockId(7);
}

/// Catalog shared by the profiles. The chip's nested grid reads the chip's
/// sub-datum and publishes it on the chip's -X face.
pub fn profile_catalog() -> Result<Arc<BlockCatalog>, GridError> {
    let base = || {
        BlockCatalog::builder()
            .block(ids::WIRE, BlockType::new("wire").with_behavior(Behavior::Wire))
            .block(ids::PAD, BlockType::new("pad").with_behavior(Behavior::Pad))
            .block(ids::LAMP, BlockType::new("lamp").with_behavior(Behavior::Indicator))
            .block(ids::GATE, BlockType::new("gate").with_behavior(Behavior::Gate))
            .block(
                ids::SENSOR,
                BlockType::new("sensor").with_behavior(Behavior::GetSubDatum),
            )
            .block(
                ids::OUTPUT,
                BlockType::new("output").with_behavior(Behavior::IcOutput),
            )
    };
    let mut inner = VoxelGrid::new(Arc::new(base().build()?), [2, 1, 1])?;
    inner.place(BlockPos::new(0, 0, 0), ids::SENSOR)?;
    inner.place(BlockPos::new(1, 0, 0), ids::OUTPUT)?;
    let catalog = base()
        .block(
            ids::CHIP,
            BlockType::new("chip")
                .with_behavior(Behavior::Ic)
                .with_nested(Arc::new(inner)),
        )
        .build()?;
    Ok(Arc::new(catalog))
}

/// A lit pad at the origin, `len` wires along +X, then a lamp.
pub fn wire_chain(len: u32) -> Result<VoxelGrid, GridError> {
    let mut grid = VoxelGrid::new(profile_catalog()?, [len + 2, 1, 1])?;
    grid.set_block(BlockPos::ORIGIN, ids::PAD, Orientation::IDENTITY, 1)?;
    for x in 1..=len as i32 {
        grid.place(BlockPos::new(x, 0, 0), ids::WIRE)?;
    }
    grid.place(BlockPos::new(len as i32 + 1, 0, 0), ids::LAMP)?;
    Ok(grid)
}

/// `rows` independent rows of `gates` gates each, spaced two apart on z.
///
/// Each row runs along +X: a lit pad, then `gates` times a wire and a gate,
/// then a wire and a lamp. A lit pad sits on top of every gate to open it,
/// so every lamp ends up lit.
pub fn gate_lattice(rows: u32, gates: u32) -> Result<VoxelGrid, GridError> {
    let width = 2 * gates + 3;
    let depth = (2 * rows).saturating_sub(1).max(1);
    let mut grid = VoxelGrid::new(profile_catalog()?, [width, 2, depth])?;
    for row in 0..rows as i32 {
        let z = 2 * row;
        grid.set_block(BlockPos::new(0, 0, z), ids::PAD, Orientation::IDENTITY, 1)?;
        for g in 0..gates as i32 {
            grid.place(BlockPos::new(1 + 2 * g, 0, z), ids::WIRE)?;
            grid.place(BlockPos::new(2 + 2 * g, 0, z), ids::GATE)?;
            grid.set_block(
                BlockPos::new(2 + 2 * g, 1, z),
                ids::PAD,
                Orientation::IDENTITY,
                1,
            )?;
        }
        grid.place(BlockPos::new(width as i32 - 2, 0, z), ids::WIRE)?;
        grid.place(BlockPos::new(width as i32 - 1, 0, z), ids::LAMP)?;
    }
    Ok(grid)
}

/// Positions of the lamps of a [`gate_lattice`].
pub fn lattice_lamps(rows: u32, gates: u32) -> Vec<BlockPos> {
    let x = 2 * gates as i32 + 2;
    (0..rows as i32).map(|r| BlockPos::new(x, 0, 2 * r)).collect()
}

/// `chips` chips along +X, each with a lamp on its -X side. Chip `i` has
/// sub-datum `i + 1`.
pub fn chip_row(chips: u32) -> Result<VoxelGrid, GridError> {
    let mut grid = VoxelGrid::new(profile_catalog()?, [2 * chips + 1, 1, 1])?;
    for i in 0..chips as i32 {
        grid.place(BlockPos::new(2 * i, 0, 0), ids::LAMP)?;
        grid.set_block(
            BlockPos::new(2 * i + 1, 0, 0),
            ids::CHIP,
            Orientation::IDENTITY,
            i + 1,
        )?;
    }
    Ok(grid)
}

/// Type id at `pos` is one of the profile ids.
pub fn is_profile_block(id: BlockId) -> bool {
    (ids::WIRE.0..=ids::CHIP.0).contains(&id.0)
}
