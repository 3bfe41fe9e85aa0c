//! Dense in-memory voxel grid.

use crate::catalog::BlockCatalog;
use crate::error::GridError;
use crate::grid::Grid;
use std::sync::Arc;
use voxlogic_core::{Aabb, Behavior, BlockId, BlockPos, Orientation};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Cell {
    id: BlockId,
    orientation: Orientation,
    sub_datum: i32,
}

/// A dense `w × h × d` box of blocks with its origin at `(0, 0, 0)`.
///
/// Storage is a flat vector in z-then-y-then-x order. Every cell starts as
/// air with identity orientation and sub-datum 0.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    bounds: Aabb,
    cells: Vec<Cell>,
    catalog: Arc<BlockCatalog>,
}

impl VoxelGrid {
    /// Maximum extent along any axis.
    pub const MAX_DIM: u32 = 1 << 10;

    /// Create an all-air grid of the given size.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if any extent is zero or larger
    /// than [`MAX_DIM`](Self::MAX_DIM).
    pub fn new(catalog: Arc<BlockCatalog>, size: [u32; 3]) -> Result<Self, GridError> {
        if size.iter().any(|&s| s == 0 || s > Self::MAX_DIM) {
            return Err(GridError::EmptyGrid);
        }
        // MAX_DIM keeps every extent inside i32.
        let [w, h, d] = size.map(|s| s as i32);
        let bounds =
            Aabb::new(BlockPos::ORIGIN, BlockPos::new(w, h, d)).ok_or(GridError::EmptyGrid)?;
        let count = bounds.volume() as usize;
        Ok(Self {
            bounds,
            cells: vec![Cell::default(); count],
            catalog,
        })
    }

    /// The catalog this grid resolves block ids against.
    pub fn catalog(&self) -> &Arc<BlockCatalog> {
        &self.catalog
    }

    /// Place a block with the given orientation and sub-datum.
    pub fn set_block(
        &mut self,
        pos: BlockPos,
        id: BlockId,
        orientation: Orientation,
        sub_datum: i32,
    ) -> Result<(), GridError> {
        if !self.catalog.contains(id) {
            return Err(GridError::UnknownBlock { id });
        }
        let cell = self.cell_mut(pos)?;
        *cell = Cell {
            id,
            orientation,
            sub_datum,
        };
        Ok(())
    }

    /// Place an unrotated block with sub-datum 0.
    pub fn place(&mut self, pos: BlockPos, id: BlockId) -> Result<(), GridError> {
        self.set_block(pos, id, Orientation::IDENTITY, 0)
    }

    /// Number of non-air blocks.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.id != BlockId::AIR).count()
    }

    fn index(&self, pos: BlockPos) -> Option<usize> {
        if !self.bounds.contains(pos) {
            return None;
        }
        let [w, h, _] = self.bounds.size();
        let (w, h) = (w as usize, h as usize);
        // contains() guarantees non-negative offsets from the origin.
        Some(pos.x as usize + w * (pos.y as usize + h * pos.z as usize))
    }

    fn cell(&self, pos: BlockPos) -> Option<&Cell> {
        self.index(pos).and_then(|i| self.cells.get(i))
    }

    fn cell_mut(&mut self, pos: BlockPos) -> Result<&mut Cell, GridError> {
        let bounds = self.bounds;
        self.index(pos)
            .and_then(|i| self.cells.get_mut(i))
            .ok_or(GridError::OutOfBounds { pos, bounds })
    }
}

impl Grid for VoxelGrid {
    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn block_id(&self, pos: BlockPos) -> BlockId {
        self.cell(pos).map_or(BlockId::AIR, |c| c.id)
    }

    fn behavior(&self, pos: BlockPos) -> Option<Behavior> {
        self.catalog.behavior(self.block_id(pos))
    }

    fn orientation(&self, pos: BlockPos) -> Orientation {
        self.cell(pos).map_or(Orientation::IDENTITY, |c| c.orientation)
    }

    fn sub_datum(&self, pos: BlockPos) -> i32 {
        self.cell(pos).map_or(0, |c| c.sub_datum)
    }

    fn nested_grid(&self, pos: BlockPos) -> Option<Arc<dyn Grid>> {
        self.catalog.nested(self.block_id(pos))
    }

    fn set_sub_datum(&mut self, pos: BlockPos, value: i32) -> Result<(), GridError> {
        self.cell_mut(pos)?.sub_datum = value;
        Ok(())
    }

    fn set_orientation(
        &mut self,
        pos: BlockPos,
        orientation: Orientation,
    ) -> Result<(), GridError> {
        self.cell_mut(pos)?.orientation = orientation;
        Ok(())
    }

    fn replace_block(
        &mut self,
        pos: BlockPos,
        id: BlockId,
        preserved_sub_datum: i32,
    ) -> Result<(), GridError> {
        self.set_block(pos, id, Orientation::IDENTITY, preserved_sub_datum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BlockType;
    use crate::grid::WorldEdit;
    use voxlogic_core::Direction;

    fn catalog() -> Arc<BlockCatalog> {
        Arc::new(
            BlockCatalog::builder()
                .block(BlockId(1), BlockType::new("wire").with_behavior(Behavior::Wire))
                .block(BlockId(2), BlockType::new("stone"))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn zero_extent_rejected() {
        assert_eq!(VoxelGrid::new(catalog(), [0, 1, 1]).unwrap_err(), GridError::EmptyGrid);
    }

    #[test]
    fn out_of_bounds_reads_as_air() {
        let g = VoxelGrid::new(catalog(), [2, 2, 2]).unwrap();
        let outside = BlockPos::new(-1, 0, 0);
        assert_eq!(g.block_id(outside), BlockId::AIR);
        assert_eq!(g.behavior(outside), None);
        assert_eq!(g.orientation(outside), Orientation::IDENTITY);
        assert_eq!(g.sub_datum(outside), 0);
    }

    #[test]
    fn out_of_bounds_writes_fail() {
        let mut g = VoxelGrid::new(catalog(), [2, 2, 2]).unwrap();
        let outside = BlockPos::new(2, 0, 0);
        assert!(matches!(
            g.set_sub_datum(outside, 1),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn unknown_block_rejected() {
        let mut g = VoxelGrid::new(catalog(), [2, 2, 2]).unwrap();
        assert_eq!(
            g.place(BlockPos::ORIGIN, BlockId(77)).unwrap_err(),
            GridError::UnknownBlock { id: BlockId(77) }
        );
    }

    #[test]
    fn cells_are_independent() {
        let mut g = VoxelGrid::new(catalog(), [3, 2, 2]).unwrap();
        let o = Orientation::from_code(5).unwrap();
        g.set_block(BlockPos::new(2, 1, 1), BlockId(1), o, 4).unwrap();
        assert_eq!(g.behavior(BlockPos::new(2, 1, 1)), Some(Behavior::Wire));
        assert_eq!(g.orientation(BlockPos::new(2, 1, 1)), o);
        assert_eq!(g.sub_datum(BlockPos::new(2, 1, 1)), 4);
        assert_eq!(g.occupied(), 1);
        for p in g.bounds().positions().filter(|&p| p != BlockPos::new(2, 1, 1)) {
            assert_eq!(g.block_id(p), BlockId::AIR, "{p}");
        }
    }

    #[test]
    fn apply_dispatches_edits() {
        let mut g = VoxelGrid::new(catalog(), [2, 1, 1]).unwrap();
        let p = BlockPos::ORIGIN;
        g.set_block(p, BlockId(1), Orientation::from_code(3).unwrap(), 0).unwrap();
        g.apply(&WorldEdit::SetSubDatum { pos: p, value: 9 }).unwrap();
        assert_eq!(g.sub_datum(p), 9);
        g.apply(&WorldEdit::ReplaceBlock {
            pos: p,
            id: BlockId(2),
            sub_datum: 9,
        })
        .unwrap();
        assert_eq!(g.block_id(p), BlockId(2));
        assert_eq!(g.sub_datum(p), 9);
        assert_eq!(g.orientation(p), Orientation::IDENTITY);
        let east = p.offset(Direction::PosX);
        let o = Orientation::from_code(7).unwrap();
        g.apply(&WorldEdit::SetOrientation { pos: east, orientation: o })
            .unwrap();
        assert_eq!(g.orientation(east), o);
    }
}
