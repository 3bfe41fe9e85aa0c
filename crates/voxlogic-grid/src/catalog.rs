//! Immutable table of block types.
//!
//! A [`BlockCatalog`] is built once, frozen, and shared by every grid that
//! uses it. It maps each [`BlockId`] to a [`BlockType`]: a name, at most one
//! [`Behavior`], and optionally a nested grid evaluated by `ic` blocks and
//! event dispatch.
//!
//! ```
//! use voxlogic_core::{Behavior, BlockId};
//! use voxlogic_grid::{BlockCatalog, BlockType};
//!
//! let catalog = BlockCatalog::builder()
//!     .block(BlockId(1), BlockType::new("wire").with_behavior(Behavior::Wire))
//!     .block(BlockId(2), BlockType::new("pad").with_behavior(Behavior::Pad))
//!     .build()
//!     .unwrap();
//! assert_eq!(catalog.behavior(BlockId(2)), Some(Behavior::Pad));
//! assert_eq!(catalog.by_name("wire"), Some(BlockId(1)));
//! assert_eq!(catalog.behavior(BlockId::AIR), None);
//! ```

use crate::error::GridError;
use crate::grid::Grid;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use voxlogic_core::{Behavior, BlockId};

/// Description of one block type.
#[derive(Clone)]
pub struct BlockType {
    name: String,
    behavior: Option<Behavior>,
    nested: Option<Arc<dyn Grid>>,
}

impl BlockType {
    /// A scenery block type with no behavior and no nested grid.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            behavior: None,
            nested: None,
        }
    }

    /// Attach a logic behavior.
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Attach a nested grid.
    pub fn with_nested(mut self, nested: Arc<dyn Grid>) -> Self {
        self.nested = Some(nested);
        self
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logic behavior, if any.
    pub fn behavior(&self) -> Option<Behavior> {
        self.behavior
    }

    /// Nested grid, if any.
    pub fn nested(&self) -> Option<&Arc<dyn Grid>> {
        self.nested.as_ref()
    }
}

impl fmt::Debug for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockType")
            .field("name", &self.name)
            .field("behavior", &self.behavior)
            .field("nested", &self.nested.as_ref().map(|g| g.bounds()))
            .finish()
    }
}

/// Frozen mapping from [`BlockId`] to [`BlockType`].
///
/// Id 0 is always air and cannot be overridden.
#[derive(Clone, Debug)]
pub struct BlockCatalog {
    types: IndexMap<BlockId, BlockType>,
}

impl BlockCatalog {
    /// Start building a catalog.
    pub fn builder() -> BlockCatalogBuilder {
        BlockCatalogBuilder {
            types: IndexMap::new(),
            error: None,
        }
    }

    /// The type registered under `id`.
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.types.get(&id)
    }

    /// Behavior of the type registered under `id`.
    pub fn behavior(&self, id: BlockId) -> Option<Behavior> {
        self.get(id).and_then(BlockType::behavior)
    }

    /// Nested grid of the type registered under `id`.
    pub fn nested(&self, id: BlockId) -> Option<Arc<dyn Grid>> {
        self.get(id).and_then(|t| t.nested().cloned())
    }

    /// Id of the first type registered under `name`.
    pub fn by_name(&self, name: &str) -> Option<BlockId> {
        self.types
            .iter()
            .find(|(_, t)| t.name() == name)
            .map(|(&id, _)| id)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: BlockId) -> bool {
        self.types.contains_key(&id)
    }

    /// Number of registered types, air included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always `false`: air is always registered.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Builder for [`BlockCatalog`].
pub struct BlockCatalogBuilder {
    types: IndexMap<BlockId, BlockType>,
    error: Option<GridError>,
}

impl BlockCatalogBuilder {
    /// Register `block_type` under `id`.
    ///
    /// Registering an id twice (or registering air) makes
    /// [`build`](Self::build) fail with [`GridError::DuplicateBlock`].
    pub fn block(mut self, id: BlockId, block_type: BlockType) -> Self {
        if self.error.is_none() && (id == BlockId::AIR || self.types.contains_key(&id)) {
            self.error = Some(GridError::DuplicateBlock { id });
        }
        self.types.insert(id, block_type);
        self
    }

    /// Freeze the catalog.
    pub fn build(self) -> Result<BlockCatalog, GridError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let mut types = IndexMap::with_capacity(self.types.len() + 1);
        types.insert(BlockId::AIR, BlockType::new("air"));
        types.extend(self.types);
        Ok(BlockCatalog { types })
    }
}
