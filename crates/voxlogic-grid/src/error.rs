//! Error types for grid construction and mutation.

use voxlogic_core::{Aabb, BlockId, BlockPos};
use std::fmt;

/// Errors arising from grid construction, catalog lookups or edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A position is outside the bounds of the grid.
    OutOfBounds {
        /// The offending position.
        pos: BlockPos,
        /// The grid bounds.
        bounds: Aabb,
    },
    /// Attempted to construct a grid with zero cells.
    EmptyGrid,
    /// A block id has no entry in the catalog.
    UnknownBlock {
        /// The unregistered id.
        id: BlockId,
    },
    /// A catalog entry was registered twice.
    DuplicateBlock {
        /// The id registered twice.
        id: BlockId,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, bounds } => write!(
                f,
                "position {pos} out of bounds {}..{}",
                bounds.low(),
                bounds.high()
            ),
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::UnknownBlock { id } => write!(f, "block id {id} is not in the catalog"),
            Self::DuplicateBlock { id } => write!(f, "block id {id} registered twice"),
        }
    }
}

impl std::error::Error for GridError {}
