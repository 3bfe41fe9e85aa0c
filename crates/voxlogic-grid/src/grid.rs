//! The [`Grid`] collaborator trait and [`WorldEdit`] requests.

use crate::error::GridError;
use std::sync::Arc;
use voxlogic_core::{Aabb, Behavior, BlockId, BlockPos, Orientation};

/// A world-mutation request emitted by circuit evaluation.
///
/// Evaluation never writes to the grid directly: effects borrow the grid
/// immutably and queue edits, which the driver applies afterwards with
/// [`Grid::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldEdit {
    /// Overwrite a block's sub-datum.
    SetSubDatum {
        /// Target block.
        pos: BlockPos,
        /// New sub-datum.
        value: i32,
    },
    /// Re-orient a block.
    SetOrientation {
        /// Target block.
        pos: BlockPos,
        /// New orientation.
        orientation: Orientation,
    },
    /// Replace a block with another type.
    ReplaceBlock {
        /// Target block.
        pos: BlockPos,
        /// Type of the replacement.
        id: BlockId,
        /// Sub-datum carried over to the replacement.
        sub_datum: i32,
    },
}

impl WorldEdit {
    /// The block this edit targets.
    pub fn pos(&self) -> BlockPos {
        match *self {
            Self::SetSubDatum { pos, .. }
            | Self::SetOrientation { pos, .. }
            | Self::ReplaceBlock { pos, .. } => pos,
        }
    }
}

/// Voxel storage as seen by the circuit engine.
///
/// Reads outside [`bounds`](Grid::bounds) behave as air: no behavior,
/// identity orientation, sub-datum 0. Writes outside the bounds fail with
/// [`GridError::OutOfBounds`].
///
/// # Object safety
///
/// The trait is object-safe; compiled circuits read through `&dyn Grid` and
/// nested grids are shared as `Arc<dyn Grid>`.
pub trait Grid {
    /// Region of valid positions.
    fn bounds(&self) -> Aabb;

    /// Type of the block at `pos`.
    fn block_id(&self, pos: BlockPos) -> BlockId;

    /// Logic behavior of the block at `pos`, if it has one.
    fn behavior(&self, pos: BlockPos) -> Option<Behavior>;

    /// Physical rotation of the block at `pos`.
    fn orientation(&self, pos: BlockPos) -> Orientation;

    /// Per-block numeric state (pad level, indicator lamp, ...).
    fn sub_datum(&self, pos: BlockPos) -> i32;

    /// The sub-grid owned by the type of the block at `pos`, if any.
    fn nested_grid(&self, pos: BlockPos) -> Option<Arc<dyn Grid>>;

    /// Overwrite the sub-datum of the block at `pos`.
    fn set_sub_datum(&mut self, pos: BlockPos, value: i32) -> Result<(), GridError>;

    /// Re-orient the block at `pos`.
    fn set_orientation(&mut self, pos: BlockPos, orientation: Orientation)
        -> Result<(), GridError>;

    /// Replace the block at `pos` with a block of type `id`, keeping
    /// `preserved_sub_datum` as its sub-datum and resetting its orientation.
    fn replace_block(
        &mut self,
        pos: BlockPos,
        id: BlockId,
        preserved_sub_datum: i32,
    ) -> Result<(), GridError>;

    /// Apply a queued [`WorldEdit`].
    fn apply(&mut self, edit: &WorldEdit) -> Result<(), GridError> {
        match *edit {
            WorldEdit::SetSubDatum { pos, value } => self.set_sub_datum(pos, value),
            WorldEdit::SetOrientation { pos, orientation } => self.set_orientation(pos, orientation),
            WorldEdit::ReplaceBlock { pos, id, sub_datum } => self.replace_block(pos, id, sub_datum),
        }
    }

    /// Whether `pos` is inside the grid.
    fn contains(&self, pos: BlockPos) -> bool {
        self.bounds().contains(pos)
    }
}
