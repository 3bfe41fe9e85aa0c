//! Per-call evaluation state.
//!
//! An [`EvalState`] is created fresh for every evaluation and discarded
//! afterwards. It holds the signal values written by the pipeline, the grid
//! being evaluated, whether world edits are permitted, the optional
//! [`Embedding`] context of a nested evaluation, and the queue of requested
//! [`WorldEdit`]s.

use indexmap::IndexMap;
use std::fmt;
use voxlogic_core::{BlockPos, Direction, NetId, Value};
use voxlogic_grid::{Grid, WorldEdit};

/// Key of a value in an [`EvalState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateKey {
    /// Value a compiled block drives on one of its physical faces.
    Output(BlockPos, Direction),
    /// Merged value of a net.
    Net(NetId),
    /// Value published by an `icOutput` block for the enclosing `ic` block,
    /// by direction in the nested grid's frame.
    EmbeddedOutput(Direction),
    /// Block id requested by a `become` block for the embedding block.
    Become,
    /// Orientation code requested by a `setRotation` block for the
    /// embedding block.
    Rotation,
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output(pos, d) => write!(f, "{pos} {d}"),
            Self::Net(id) => write!(f, "{id}"),
            Self::EmbeddedOutput(d) => write!(f, "embedded {d}"),
            Self::Become => f.write_str("become"),
            Self::Rotation => f.write_str("rotation"),
        }
    }
}

/// Context of an evaluation running inside another block's nested grid.
#[derive(Clone, Copy)]
pub struct Embedding<'g> {
    /// The grid containing the embedding block.
    pub outer: &'g dyn Grid,
    /// Position of the embedding block in `outer`.
    pub pos: BlockPos,
    /// Optional one-shot event value injected by the caller.
    pub extra: Option<Value>,
}

impl fmt::Debug for Embedding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Embedding")
            .field("outer", &self.outer.bounds())
            .field("pos", &self.pos)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Mutable state threaded through one pipeline run.
pub struct EvalState<'g> {
    grid: &'g dyn Grid,
    values: IndexMap<StateKey, Value>,
    allow_edits: bool,
    embedding: Option<Embedding<'g>>,
    edits: Vec<WorldEdit>,
}

impl<'g> EvalState<'g> {
    /// A top-level state over `grid` that forbids world edits.
    pub fn new(grid: &'g dyn Grid) -> Self {
        Self {
            grid,
            values: IndexMap::new(),
            allow_edits: false,
            embedding: None,
            edits: Vec::new(),
        }
    }

    /// A top-level state over `grid` that permits world edits.
    pub fn local(grid: &'g dyn Grid) -> Self {
        Self {
            allow_edits: true,
            ..Self::new(grid)
        }
    }

    /// A state for a nested grid evaluated on behalf of an embedding block.
    ///
    /// World edits are not permitted.
    pub fn embedded(grid: &'g dyn Grid, embedding: Embedding<'g>) -> Self {
        Self {
            embedding: Some(embedding),
            ..Self::new(grid)
        }
    }

    /// A nested state seeded from `parent`: inherits its edit permission.
    pub fn seeded(parent: &EvalState<'_>, grid: &'g dyn Grid, embedding: Embedding<'g>) -> Self {
        Self {
            allow_edits: parent.allow_edits,
            ..Self::embedded(grid, embedding)
        }
    }

    /// The grid being evaluated.
    pub fn grid(&self) -> &'g dyn Grid {
        self.grid
    }

    /// Embedding context, when evaluating a nested grid.
    pub fn embedding(&self) -> Option<Embedding<'g>> {
        self.embedding
    }

    /// Whether effects may request world edits.
    pub fn allow_edits(&self) -> bool {
        self.allow_edits
    }

    /// Value under `key`, or `Null` when nothing wrote it.
    pub fn get(&self, key: StateKey) -> Value {
        self.values.get(&key).copied().unwrap_or_default()
    }

    /// Value under `key`, distinguishing "never written" from `Null`.
    pub fn value(&self, key: StateKey) -> Option<Value> {
        self.values.get(&key).copied()
    }

    /// Merged value of `net`, `Null` for an unconnected input.
    pub fn net(&self, net: Option<NetId>) -> Value {
        net.map_or(Value::Null, |id| self.get(StateKey::Net(id)))
    }

    /// Write `value` under `key`.
    pub fn set(&mut self, key: StateKey, value: Value) {
        self.values.insert(key, value);
    }

    /// Queue a world edit for the driver to apply.
    pub fn request(&mut self, edit: WorldEdit) {
        self.edits.push(edit);
    }

    /// Edits queued so far.
    pub fn edits(&self) -> &[WorldEdit] {
        &self.edits
    }

    /// Freeze the current values for introspection.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            values: self.values.clone(),
        }
    }

    /// Consume the state, releasing the grid borrow.
    pub fn into_parts(self) -> (Snapshot, Vec<WorldEdit>) {
        (
            Snapshot {
                values: self.values,
            },
            self.edits,
        )
    }
}

impl fmt::Debug for EvalState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalState")
            .field("values", &self.values)
            .field("allow_edits", &self.allow_edits)
            .field("embedding", &self.embedding)
            .field("edits", &self.edits)
            .finish()
    }
}

/// Read-only copy of the values of one evaluation, kept for debug overlays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    values: IndexMap<StateKey, Value>,
}

impl Snapshot {
    /// Value under `key`, if written.
    pub fn get(&self, key: StateKey) -> Option<Value> {
        self.values.get(&key).copied()
    }

    /// Merged value of a net.
    pub fn net(&self, id: NetId) -> Option<Value> {
        self.get(StateKey::Net(id))
    }

    /// Value a block drives on a physical face.
    pub fn output(&self, pos: BlockPos, direction: Direction) -> Option<Value> {
        self.get(StateKey::Output(pos, direction))
    }

    /// All values in write order.
    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &Value)> {
        self.values.iter()
    }

    /// Number of recorded values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.values {
            writeln!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}
