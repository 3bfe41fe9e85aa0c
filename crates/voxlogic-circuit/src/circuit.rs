//! Circuit instances: members, derived bounds, net graph and pipeline.

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::options::CompileOptions;
use crate::pipeline::{Compiler, Pipeline};
use crate::state::{EvalState, Snapshot};
use crate::tracer::{trace, NetGraph};
use indexmap::IndexSet;
use voxlogic_core::{Aabb, BlockPos, CompileError};
use voxlogic_grid::{discover_clusters, Grid, GridError, WorldEdit};

/// One connected circuit in a grid.
///
/// Members are kept in insertion order; tracing and compilation follow that
/// order, so rebuilding an unchanged circuit reproduces the same nets and
/// the same pipeline.
///
/// # Lifecycle
///
/// 1. add members ([`add_member`](Self::add_member) or
///    [`from_members`](Self::from_members));
/// 2. [`compile`](Self::compile) after any change to the member blocks;
/// 3. [`evaluate`](Self::evaluate) into caller-owned state, or
///    [`refresh_local`](Self::refresh_local) to evaluate and apply edits.
#[derive(Debug, Default)]
pub struct Circuit {
    members: IndexSet<BlockPos>,
    bounds: Option<Aabb>,
    graph: NetGraph,
    pipeline: Pipeline,
    snapshot: Snapshot,
}

impl Circuit {
    /// An empty circuit. Must gain members before it can compile.
    pub fn new() -> Self {
        Self::default()
    }

    /// A circuit over `members`, in order. Duplicates are ignored.
    pub fn from_members(members: impl IntoIterator<Item = BlockPos>) -> Self {
        let mut circuit = Self::new();
        for pos in members {
            circuit.add_member(pos);
        }
        circuit
    }

    /// Add a member block, growing the bounds. Returns `false` if it was
    /// already a member.
    pub fn add_member(&mut self, pos: BlockPos) -> bool {
        if !self.members.insert(pos) {
            return false;
        }
        self.bounds = Some(match self.bounds {
            Some(b) => b.union_block(pos),
            None => Aabb::from_block(pos),
        });
        true
    }

    /// Member blocks in insertion order.
    pub fn members(&self) -> impl Iterator<Item = BlockPos> + '_ {
        self.members.iter().copied()
    }

    /// Whether `pos` is a member.
    pub fn contains(&self, pos: BlockPos) -> bool {
        self.members.contains(&pos)
    }

    /// Smallest box containing every member, `None` while empty.
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// Rebuild the net graph and pipeline from the current grid contents.
    ///
    /// On failure the previously compiled graph and pipeline stay in place.
    ///
    /// # Errors
    ///
    /// [`CompileError::EmptyCircuit`] without members; tracing and nested
    /// compile failures are passed through.
    pub fn compile(
        &mut self,
        grid: &dyn Grid,
        options: &CompileOptions,
        sink: &dyn DiagnosticSink,
    ) -> Result<(), CompileError> {
        self.compile_at(grid, options, sink, 0)
    }

    /// [`compile`](Self::compile) for a circuit nested `depth` levels below
    /// the top-level grid. Embedding depth limits count from here.
    ///
    /// # Errors
    ///
    /// As [`compile`](Self::compile).
    pub fn compile_at(
        &mut self,
        grid: &dyn Grid,
        options: &CompileOptions,
        sink: &dyn DiagnosticSink,
        depth: u32,
    ) -> Result<(), CompileError> {
        if self.members.is_empty() {
            return Err(CompileError::EmptyCircuit);
        }
        let members: Vec<BlockPos> = self.members.iter().copied().collect();
        let graph = trace(grid, &members, options.record_trace_edges)?;

        let mut compiler = Compiler::new(grid, &graph, options, sink, depth);
        for &pos in &members {
            compiler.block(pos)?;
        }
        for id in graph.ids() {
            compiler.net(id)?;
        }
        let pipeline = compiler.finish();

        sink.report(&Diagnostic::Compiled {
            depth,
            members: members.len(),
            nets: graph.len(),
            effects: pipeline.len(),
        });
        self.graph = graph;
        self.pipeline = pipeline;
        Ok(())
    }

    /// Run the compiled pipeline against `state`.
    pub fn evaluate(&self, state: &mut EvalState<'_>) {
        self.pipeline.run(state);
    }

    /// Evaluate with world edits allowed, keep the resulting values as the
    /// circuit's snapshot, then apply the requested edits to `grid`.
    ///
    /// Returns the edits in the order they were applied.
    ///
    /// # Errors
    ///
    /// Stops at the first edit the grid rejects.
    pub fn refresh_local(&mut self, grid: &mut dyn Grid) -> Result<Vec<WorldEdit>, GridError> {
        let (snapshot, edits) = {
            let mut state = EvalState::local(&*grid);
            self.evaluate(&mut state);
            state.into_parts()
        };
        self.snapshot = snapshot;
        for edit in &edits {
            grid.apply(edit)?;
        }
        Ok(edits)
    }

    /// Values of the last [`refresh_local`](Self::refresh_local).
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Nets of the last successful compile.
    pub fn graph(&self) -> &NetGraph {
        &self.graph
    }

    /// Pipeline of the last successful compile.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

/// Discover and compile every circuit in `grid`.
///
/// # Errors
///
/// The first failing circuit aborts the whole build.
pub fn compile_all(
    grid: &dyn Grid,
    options: &CompileOptions,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<Circuit>, CompileError> {
    compile_all_at(grid, options, sink, 0)
}

/// [`compile_all`] for a grid nested `depth` levels below the top level.
///
/// # Errors
///
/// As [`compile_all`].
pub fn compile_all_at(
    grid: &dyn Grid,
    options: &CompileOptions,
    sink: &dyn DiagnosticSink,
    depth: u32,
) -> Result<Vec<Circuit>, CompileError> {
    discover_clusters(grid)
        .into_iter()
        .map(|members| {
            let mut circuit = Circuit::from_members(members);
            circuit.compile_at(grid, options, sink, depth)?;
            Ok(circuit)
        })
        .collect()
}
