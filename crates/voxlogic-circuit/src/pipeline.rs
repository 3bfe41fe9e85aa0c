//! Evaluation pipelines and the demand-driven compiler that builds them.
//!
//! A [`Pipeline`] is an ordered list of [`Effect`]s. Order is the order in
//! which the compiler first demanded each block and net: a block's input
//! nets are compiled before the block, and a net's driving blocks before the
//! net. Memoization by position and serial guarantees at most one effect per
//! target per compile and terminates on feedback loops.

use crate::behaviors;
use crate::diag::DiagnosticSink;
use crate::options::CompileOptions;
use crate::state::{EvalState, StateKey};
use crate::tracer::NetGraph;
use indexmap::IndexSet;
use smallvec::SmallVec;
use std::fmt;
use voxlogic_core::{BlockPos, CompileError, Direction, NetId, Value};
use voxlogic_grid::Grid;

// ── Effects ────────────────────────────────────────────────────────

/// Compiled evaluation step. Reads and writes only through the state.
pub type EffectFn = Box<dyn Fn(&mut EvalState<'_>)>;

/// What an [`Effect`] computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectTarget {
    /// Outputs (or edits) of one block.
    Block(BlockPos),
    /// Merged value of one net.
    Net(NetId),
}

/// One step of a [`Pipeline`].
pub struct Effect {
    target: EffectTarget,
    run: EffectFn,
}

impl Effect {
    /// Wrap a step computing `target`.
    pub fn new(target: EffectTarget, run: impl Fn(&mut EvalState<'_>) + 'static) -> Self {
        Self {
            target,
            run: Box::new(run),
        }
    }

    /// A step that does nothing. Keeps introspection total for blocks that
    /// compute nothing.
    pub fn noop(target: EffectTarget) -> Self {
        Self::new(target, |_| {})
    }

    /// What this step computes.
    pub fn target(&self) -> EffectTarget {
        self.target
    }

    /// Execute the step.
    pub fn apply(&self, state: &mut EvalState<'_>) {
        (self.run)(state)
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Ordered list of compiled effects.
#[derive(Debug, Default)]
pub struct Pipeline {
    effects: Vec<Effect>,
}

impl Pipeline {
    /// Run every effect in order.
    pub fn run(&self, state: &mut EvalState<'_>) {
        for effect in &self.effects {
            effect.apply(state);
        }
    }

    /// Number of effects.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the pipeline does nothing.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Targets in execution order.
    pub fn targets(&self) -> impl Iterator<Item = EffectTarget> + '_ {
        self.effects.iter().map(Effect::target)
    }
}

// ── Inputs ─────────────────────────────────────────────────────────

/// Nets attached to a block's reading faces, by canonical direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Inputs([Option<NetId>; 6]);

impl Inputs {
    /// Net feeding the canonical face `direction`.
    pub(crate) fn net(&self, direction: Direction) -> Option<NetId> {
        self.0[direction.index()]
    }

    /// Value on the canonical face `direction`, `Null` if unconnected.
    pub(crate) fn value(&self, state: &EvalState<'_>, direction: Direction) -> Value {
        state.net(self.net(direction))
    }

    /// OR of the values on the given canonical faces.
    pub(crate) fn any(&self, state: &EvalState<'_>, directions: &[Direction]) -> Value {
        directions
            .iter()
            .fold(Value::Null, |acc, &d| acc.or(self.value(state, d)))
    }
}

// ── Compiler ───────────────────────────────────────────────────────

/// Demand-driven builder of one circuit's pipeline.
pub(crate) struct Compiler<'a> {
    grid: &'a dyn Grid,
    graph: &'a NetGraph,
    options: &'a CompileOptions,
    sink: &'a dyn DiagnosticSink,
    depth: u32,
    blocks: IndexSet<BlockPos>,
    nets: IndexSet<NetId>,
    effects: Vec<Effect>,
}

impl<'a> Compiler<'a> {
    pub(crate) fn new(
        grid: &'a dyn Grid,
        graph: &'a NetGraph,
        options: &'a CompileOptions,
        sink: &'a dyn DiagnosticSink,
        depth: u32,
    ) -> Self {
        Self {
            grid,
            graph,
            options,
            sink,
            depth,
            blocks: IndexSet::new(),
            nets: IndexSet::new(),
            effects: Vec::new(),
        }
    }

    pub(crate) fn grid(&self) -> &'a dyn Grid {
        self.grid
    }

    pub(crate) fn options(&self) -> &'a CompileOptions {
        self.options
    }

    pub(crate) fn sink(&self) -> &'a dyn DiagnosticSink {
        self.sink
    }

    pub(crate) fn depth(&self) -> u32 {
        self.depth
    }

    /// Compile the block at `pos` after its input nets. No-op when already
    /// compiled or when the block is wire or has no behavior.
    pub(crate) fn block(&mut self, pos: BlockPos) -> Result<(), CompileError> {
        if !self.blocks.insert(pos) {
            return Ok(());
        }
        let Some(behavior) = self.grid.behavior(pos) else {
            return Ok(());
        };
        if behavior.is_wire() {
            return Ok(());
        }
        let orientation = self.grid.orientation(pos);
        let mut inputs = Inputs::default();
        for c in Direction::ALL {
            if !behavior.canonical_role(c).reads() {
                continue;
            }
            let net = self.graph.net_at(pos, orientation.transform(c));
            if let Some(id) = net {
                self.net(id)?;
            }
            inputs.0[c.index()] = net;
        }
        let effect = behaviors::compile(self, pos, behavior, orientation, inputs)?;
        self.effects.push(effect);
        Ok(())
    }

    /// Compile net `id` after every block driving it.
    pub(crate) fn net(&mut self, id: NetId) -> Result<(), CompileError> {
        if !self.nets.insert(id) {
            return Ok(());
        }
        let Some(net) = self.graph.net(id) else {
            return Ok(());
        };
        let drivers: SmallVec<[StateKey; 4]> = net
            .drivers()
            .map(|m| StateKey::Output(m.pos, m.direction))
            .collect();
        for key in &drivers {
            if let StateKey::Output(pos, _) = *key {
                self.block(pos)?;
            }
        }
        // Outputs never written (a junction, or the face closing a loop)
        // do not take part.
        self.effects.push(Effect::new(EffectTarget::Net(id), move |state| {
            let value = drivers
                .iter()
                .filter_map(|&key| state.value(key))
                .fold(Value::Null, Value::or);
            state.set(StateKey::Net(id), value);
        }));
        Ok(())
    }

    pub(crate) fn finish(self) -> Pipeline {
        Pipeline {
            effects: self.effects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::NullSink;
    use crate::tracer::trace;
    use std::sync::Arc;
    use voxlogic_core::{Behavior, BlockId};
    use voxlogic_grid::{BlockCatalog, BlockType, VoxelGrid};

    fn grid() -> VoxelGrid {
        let catalog = BlockCatalog::builder()
            .block(BlockId(1), BlockType::new("wire").with_behavior(Behavior::Wire))
            .block(BlockId(2), BlockType::new("pad").with_behavior(Behavior::Pad))
            .block(
                BlockId(3),
                BlockType::new("indicator").with_behavior(Behavior::Indicator),
            )
            .build()
            .unwrap();
        VoxelGrid::new(Arc::new(catalog), [4, 1, 1]).unwrap()
    }

    #[test]
    fn inputs_compiled_before_block() {
        let mut g = grid();
        let pad = BlockPos::new(0, 0, 0);
        let lamp = BlockPos::new(2, 0, 0);
        g.place(pad, BlockId(2)).unwrap();
        g.place(BlockPos::new(1, 0, 0), BlockId(1)).unwrap();
        g.place(lamp, BlockId(3)).unwrap();
        let graph = trace(&g, &[pad, lamp], true).unwrap();
        let net = graph.net_at(lamp, Direction::NegX).unwrap();
        let options = CompileOptions::default();
        let mut compiler = Compiler::new(&g, &graph, &options, &NullSink, 0);
        compiler.block(lamp).unwrap();
        compiler.block(pad).unwrap();
        compiler.net(net).unwrap();
        let pipeline = compiler.finish();
        let order: Vec<EffectTarget> = pipeline.targets().collect();
        assert_eq!(
            order,
            vec![
                EffectTarget::Block(pad),
                EffectTarget::Net(net),
                EffectTarget::Block(lamp),
            ]
        );
    }

    #[test]
    fn unconnected_inputs_read_null() {
        let g = grid();
        let state = EvalState::new(&g);
        let inputs = Inputs::default();
        assert_eq!(inputs.value(&state, Direction::PosX), Value::Null);
        assert_eq!(inputs.any(&state, &Direction::ALL), Value::Null);
    }

    #[test]
    fn effect_debug_names_target() {
        let effect = Effect::noop(EffectTarget::Net(NetId(7)));
        assert!(format!("{effect:?}").contains("Net(NetId(7))"));
    }
}
