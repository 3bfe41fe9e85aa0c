//! Per-behavior compile routines.
//!
//! [`compile`] turns one block into an [`Effect`] given the nets feeding its
//! reading faces. Everything that does not depend on the evaluation (face
//! mappings, nested circuits) is resolved here, once; grid reads that can
//! change between evaluations (sub-data, neighbours) happen inside the
//! effect.
//!
//! Outputs are written under the block's *physical* face directions; inputs
//! are looked up by *canonical* direction.

use crate::circuit::{compile_all_at, Circuit};
use crate::diag::Diagnostic;
use crate::pipeline::{Compiler, Effect, EffectTarget, Inputs};
use crate::state::{Embedding, EvalState, StateKey};
use smallvec::SmallVec;
use std::sync::Arc;
use voxlogic_core::{
    Behavior, BlockId, BlockPos, CompileError, Direction, Orientation, Value,
};
use voxlogic_grid::{Grid, GridError, WorldEdit};

use Direction::{NegX, NegY, NegZ, PosX, PosY, PosZ};

/// Physical faces of `pos` for the canonical faces of `behavior` that drive.
fn output_faces(behavior: Behavior, orientation: Orientation) -> SmallVec<[Direction; 6]> {
    Direction::ALL
        .into_iter()
        .filter(|&c| behavior.canonical_role(c).drives())
        .map(|c| orientation.transform(c))
        .collect()
}

fn drive(state: &mut EvalState<'_>, pos: BlockPos, faces: &[Direction], value: Value) {
    for &d in faces {
        state.set(StateKey::Output(pos, d), value);
    }
}

/// Block-type id encoded as a signal.
fn id_signal(id: BlockId) -> Value {
    Value::Number(f64::from(id.0))
}

/// Compile the block at `pos`.
pub(crate) fn compile(
    cx: &mut Compiler<'_>,
    pos: BlockPos,
    behavior: Behavior,
    orientation: Orientation,
    inputs: Inputs,
) -> Result<Effect, CompileError> {
    let target = EffectTarget::Block(pos);
    let faces = output_faces(behavior, orientation);
    let effect = match behavior {
        Behavior::Wire | Behavior::Junction => Effect::noop(target),

        Behavior::Pad => Effect::new(target, move |state| {
            let level = state.grid().sub_datum(pos);
            drive(state, pos, &faces, Value::from(level));
        }),

        Behavior::Indicator => Effect::new(target, move |state| {
            let lit = i32::from(inputs.any(state, &Direction::ALL).truthy());
            if state.allow_edits() && state.grid().sub_datum(pos) != lit {
                state.request(WorldEdit::SetSubDatum { pos, value: lit });
            }
        }),

        Behavior::Nor => Effect::new(target, move |state| {
            let any = inputs.any(state, &[NegX, PosX]);
            drive(state, pos, &faces, Value::Bool(!any.truthy()));
        }),

        Behavior::Gate => Effect::new(target, move |state| {
            let open = inputs.any(state, &[PosY, PosZ, NegY, NegZ]).truthy();
            let value = if open {
                inputs.value(state, NegX)
            } else {
                Value::Null
            };
            drive(state, pos, &faces, value);
        }),

        Behavior::GetSubDatum => Effect::new(target, move |state| {
            let datum = match state.embedding() {
                Some(e) => e.outer.sub_datum(e.pos),
                None => state.grid().sub_datum(pos),
            };
            drive(state, pos, &faces, Value::from(datum));
        }),

        Behavior::GetNeighborId => {
            let sensed = orientation.transform(NegX);
            Effect::new(target, move |state| {
                let id = match state.embedding() {
                    Some(e) => {
                        let d = e.outer.orientation(e.pos).transform(sensed);
                        e.outer.block_id(e.pos.offset(d))
                    }
                    None => state.grid().block_id(pos.offset(sensed)),
                };
                drive(state, pos, &faces, id_signal(id));
            })
        }

        Behavior::Spontaneous => Effect::new(target, move |state| {
            let value = state
                .embedding()
                .and_then(|e| e.extra)
                .unwrap_or(Value::Bool(false));
            drive(state, pos, &faces, value);
        }),

        Behavior::SetRotation => Effect::new(target, move |state| {
            if !state.allow_edits() {
                return;
            }
            let Some(n) = inputs.any(state, &Direction::ALL).as_number() else {
                return;
            };
            // Saturating cast; NaN becomes code 0.
            let rotation = Orientation::from_code_wrapping(n.floor() as i64);
            if state.embedding().is_some() {
                state.set(StateKey::Rotation, Value::from(i32::from(rotation.code())));
            } else if state.grid().orientation(pos) != rotation {
                state.request(WorldEdit::SetOrientation {
                    pos,
                    orientation: rotation,
                });
            }
        }),

        Behavior::Become => Effect::new(target, move |state| {
            let Some(n) = inputs.any(state, &Direction::ALL).as_number() else {
                return;
            };
            let id = BlockId::from_signal(n);
            if state.embedding().is_some() {
                state.set(StateKey::Become, id_signal(id));
            } else if state.allow_edits() && state.grid().block_id(pos) != id {
                let sub_datum = state.grid().sub_datum(pos);
                state.request(WorldEdit::ReplaceBlock { pos, id, sub_datum });
            }
        }),

        Behavior::IcOutput => Effect::new(target, move |state| {
            for p in Direction::ALL {
                let c = orientation.untransform(p);
                if inputs.net(c).is_none() {
                    continue;
                }
                let value = inputs.value(state, c);
                let key = StateKey::EmbeddedOutput(p);
                let merged = state.value(key).map_or(value, |prev| prev.or(value));
                state.set(key, merged);
            }
        }),

        Behavior::Ic => compile_ic(cx, pos, orientation)?,
    };
    Ok(effect)
}

/// Compile an `ic` block: every circuit of its nested grid, one level
/// deeper, evaluated afresh on each run of the effect.
fn compile_ic(
    cx: &mut Compiler<'_>,
    pos: BlockPos,
    orientation: Orientation,
) -> Result<Effect, CompileError> {
    let target = EffectTarget::Block(pos);
    let Some(nested) = cx.grid().nested_grid(pos) else {
        cx.sink().report(&Diagnostic::MissingNestedGrid { pos });
        return Ok(Effect::noop(target));
    };
    let limit = cx.options().max_embed_depth;
    if cx.depth() >= limit {
        cx.sink().report(&Diagnostic::EmbedDepthExceeded { pos, limit });
        return Ok(Effect::noop(target));
    }
    let circuits = compile_all_at(&*nested, cx.options(), cx.sink(), cx.depth() + 1)
        .map_err(|e| CompileError::Nested {
            pos,
            source: Box::new(e),
        })?;
    Ok(Effect::new(target, move |state| {
        run_ic(state, pos, orientation, &nested, &circuits)
    }))
}

fn run_ic(
    state: &mut EvalState<'_>,
    pos: BlockPos,
    orientation: Orientation,
    nested: &Arc<dyn Grid>,
    circuits: &[Circuit],
) {
    let extra = state.embedding().and_then(|e| e.extra);
    let mut outputs = [None::<Value>; 6];
    let mut replacement = None;
    let mut rotation = None;
    for circuit in circuits {
        let embedding = Embedding {
            outer: state.grid(),
            pos,
            extra,
        };
        let mut inner = EvalState::seeded(state, &**nested, embedding);
        circuit.evaluate(&mut inner);
        for c in Direction::ALL {
            if let Some(v) = inner.value(StateKey::EmbeddedOutput(c)) {
                let slot = &mut outputs[c.index()];
                *slot = Some(slot.map_or(v, |prev| prev.or(v)));
            }
        }
        replacement = inner.value(StateKey::Become).or(replacement);
        rotation = inner.value(StateKey::Rotation).or(rotation);
        // Edits the nested circuit queued against its own grid are dropped:
        // nested grids are shared block-type templates.
    }
    for c in Direction::ALL {
        if let Some(v) = outputs[c.index()] {
            state.set(StateKey::Output(pos, orientation.transform(c)), v);
        }
    }
    if !state.allow_edits() {
        return;
    }
    if let Some(n) = replacement.and_then(Value::as_number) {
        let id = BlockId::from_signal(n);
        if state.grid().block_id(pos) != id {
            let sub_datum = state.grid().sub_datum(pos);
            state.request(WorldEdit::ReplaceBlock { pos, id, sub_datum });
        }
    }
    if let Some(n) = rotation.and_then(Value::as_number) {
        let rotation = Orientation::from_code_wrapping(n.floor() as i64);
        if state.grid().orientation(pos) != rotation {
            state.request(WorldEdit::SetOrientation {
                pos,
                orientation: rotation,
            });
        }
    }
}

/// Update a pad for a body standing on it (`on`) or leaving it.
///
/// Writes 1 or 0 into the pad's sub-datum when that changes its state and
/// reports whether it did. Blocks that are not pads are left alone.
///
/// # Errors
///
/// Propagates the grid's write failure.
pub fn stand_on(grid: &mut dyn Grid, pos: BlockPos, on: bool) -> Result<bool, GridError> {
    if grid.behavior(pos) != Some(Behavior::Pad) {
        return Ok(false);
    }
    let level = i32::from(on);
    if grid.sub_datum(pos) == level {
        return Ok(false);
    }
    grid.set_sub_datum(pos, level)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxlogic_grid::{BlockCatalog, BlockType, VoxelGrid};

    const PAD: BlockId = BlockId(1);
    const STONE: BlockId = BlockId(2);

    fn grid() -> VoxelGrid {
        let catalog = BlockCatalog::builder()
            .block(PAD, BlockType::new("pad").with_behavior(Behavior::Pad))
            .block(STONE, BlockType::new("stone"))
            .build()
            .unwrap();
        VoxelGrid::new(Arc::new(catalog), [2, 1, 1]).unwrap()
    }

    #[test]
    fn stand_on_reports_changes_only() {
        let mut g = grid();
        let pad = BlockPos::new(0, 0, 0);
        g.place(pad, PAD).unwrap();
        assert!(stand_on(&mut g, pad, true).unwrap());
        assert_eq!(g.sub_datum(pad), 1);
        assert!(!stand_on(&mut g, pad, true).unwrap());
        assert!(stand_on(&mut g, pad, false).unwrap());
        assert_eq!(g.sub_datum(pad), 0);
    }

    #[test]
    fn stand_on_ignores_other_blocks() {
        let mut g = grid();
        let stone = BlockPos::new(1, 0, 0);
        g.place(stone, STONE).unwrap();
        assert!(!stand_on(&mut g, stone, true).unwrap());
        assert_eq!(g.sub_datum(stone), 0);
    }

    #[test]
    fn output_faces_follow_orientation() {
        let o = Orientation::from_basis(PosY, NegX).unwrap();
        let faces = output_faces(Behavior::Gate, o);
        assert_eq!(faces.as_slice(), &[PosY]);
        assert_eq!(output_faces(Behavior::Indicator, o).len(), 0);
        assert_eq!(output_faces(Behavior::GetNeighborId, Orientation::IDENTITY).len(), 5);
    }
}
