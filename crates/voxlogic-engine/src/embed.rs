//! Evaluation of a block's nested grid on behalf of that block.
//!
//! This is the top-level counterpart of the `ic` behavior: the driver
//! injects an event value into the circuits inside a block's type and reads
//! back what they publish. Nested circuits see the event through
//! `spontaneous` blocks and the embedding block through `getSubDatum` and
//! `getNeighborID`; they answer through `icOutput` and `become`.

use crate::engine::{Engine, EngineError};
use crate::events::CircuitEvent;
use voxlogic_circuit::{compile_all_at, Diagnostic, Embedding, EvalState, StateKey};
use voxlogic_core::{BlockId, BlockPos, CompileError, Direction, Value};
use voxlogic_grid::Grid;

/// What the circuits of a nested grid published.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EmbeddedOutcome {
    /// `icOutput` values by direction in the nested grid's frame, OR-ed
    /// across circuits. `None` where nothing was published.
    pub outputs: [Option<Value>; 6],
    /// Replacement type requested by a `become` block.
    pub replacement: Option<BlockId>,
}

impl EmbeddedOutcome {
    /// Published value for `direction`.
    pub fn output(&self, direction: Direction) -> Option<Value> {
        self.outputs[direction.index()]
    }
}

/// Compile and evaluate every circuit of `nested` as embedded in the block
/// at `outer_pos` of `outer`, with `extra` as the injected event value.
///
/// Edits are never allowed: requests surface only through the outcome.
/// The nested grid runs one level deep, so a `max_embed_depth` of 0 reports
/// [`Diagnostic::EmbedDepthExceeded`] and returns an empty outcome.
///
/// Every call traces and compiles `nested` afresh; nothing is cached
/// between events.
///
/// # Errors
///
/// Compile failures of the nested circuits.
pub fn evaluate_embedded(
    engine: &Engine,
    nested: &dyn Grid,
    outer: &dyn Grid,
    outer_pos: BlockPos,
    extra: Option<Value>,
) -> Result<EmbeddedOutcome, CompileError> {
    let limit = engine.options().max_embed_depth;
    if limit == 0 {
        engine.diagnostics().report(&Diagnostic::EmbedDepthExceeded {
            pos: outer_pos,
            limit,
        });
        return Ok(EmbeddedOutcome::default());
    }
    let circuits = compile_all_at(nested, engine.options(), engine.diagnostics(), 1)?;
    let mut outcome = EmbeddedOutcome::default();
    for circuit in &circuits {
        let mut state = EvalState::embedded(
            nested,
            Embedding {
                outer,
                pos: outer_pos,
                extra,
            },
        );
        circuit.evaluate(&mut state);
        for d in Direction::ALL {
            if let Some(v) = state.value(StateKey::EmbeddedOutput(d)) {
                let slot = &mut outcome.outputs[d.index()];
                *slot = Some(slot.map_or(v, |prev| prev.or(v)));
            }
        }
        if let Some(n) = state.value(StateKey::Become).and_then(Value::as_number) {
            outcome.replacement = Some(BlockId::from_signal(n));
        }
    }
    Ok(outcome)
}

impl Engine {
    /// [`evaluate_embedded`] with this engine's options and sinks.
    pub fn evaluate_embedded(
        &self,
        nested: &dyn Grid,
        outer: &dyn Grid,
        outer_pos: BlockPos,
        extra: Option<Value>,
    ) -> Result<EmbeddedOutcome, CompileError> {
        evaluate_embedded(self, nested, outer, outer_pos, extra)
    }

    /// Deliver `event` to the circuits inside the block at `pos`.
    ///
    /// If they request a different block type, the block is replaced
    /// (keeping its sub-datum) and the event sink is notified. Returns the
    /// new type when that happened. Blocks without a nested grid ignore the
    /// event.
    ///
    /// # Errors
    ///
    /// Nested compile failures and grid write failures.
    pub fn dispatch_event(
        &self,
        grid: &mut dyn Grid,
        pos: BlockPos,
        event: Value,
    ) -> Result<Option<BlockId>, EngineError> {
        let Some(nested) = grid.nested_grid(pos) else {
            return Ok(None);
        };
        let outcome = self.evaluate_embedded(&*nested, &*grid, pos, Some(event))?;
        let Some(to) = outcome.replacement else {
            return Ok(None);
        };
        let from = grid.block_id(pos);
        if from == to {
            return Ok(None);
        }
        let sub_datum = grid.sub_datum(pos);
        grid.replace_block(pos, to, sub_datum)?;
        self.events().notify(CircuitEvent::Became { pos, from, to });
        Ok(Some(to))
    }
}
