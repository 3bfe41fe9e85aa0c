//! `ic` blocks: circuits inside a block type's nested grid.

use std::sync::Arc;
use voxlogic_circuit::{compile_all, Circuit, CompileOptions, Diagnostic, EvalState, NullSink};
use voxlogic_core::{Behavior, BlockPos, Direction, Orientation, Value};
use voxlogic_grid::{BlockType, Grid, VoxelGrid, WorldEdit};
use voxlogic_test_utils::{ids, standard_catalog, GridBuilder, RecordingSink, SelfNestingGrid};

const CHIP: BlockPos = BlockPos::new(1, 1, 0);

/// A nested grid where `sensor` (at the origin) feeds `sink` along +X.
fn inner(sensor: voxlogic_core::BlockId, sink: voxlogic_core::BlockId) -> VoxelGrid {
    GridBuilder::new([2, 1, 1])
        .block([0, 0, 0], sensor)
        .block([1, 0, 0], sink)
        .build()
}

/// A 3×3 outer grid with a chip at the center whose nested grid is
/// `nested`, and lamps on the chip's -X and +Y sides.
fn outer(nested: VoxelGrid, chip_datum: i32) -> VoxelGrid {
    let catalog = standard_catalog()
        .block(
            ids::CHIP,
            BlockType::new("chip")
                .with_behavior(Behavior::Ic)
                .with_nested(Arc::new(nested)),
        )
        .build()
        .unwrap();
    GridBuilder::with_catalog(Arc::new(catalog), [3, 3, 1])
        .datum(CHIP, ids::CHIP, chip_datum)
        .block([0, 1, 0], ids::INDICATOR)
        .block([1, 2, 0], ids::INDICATOR)
        .build()
}

fn refresh(grid: &mut VoxelGrid) -> Vec<Circuit> {
    let mut circuits = compile_all(grid, &CompileOptions::default(), &NullSink).unwrap();
    for circuit in &mut circuits {
        circuit.refresh_local(grid).unwrap();
    }
    circuits
}

#[test]
fn ic_output_reaches_outer_face() {
    // getSubDatum reads the chip's own sub-datum in the outer grid; the
    // icOutput receives it on its -X face.
    let mut grid = outer(inner(ids::GET_SUB_DATUM, ids::IC_OUTPUT), 4);
    let circuits = refresh(&mut grid);
    assert_eq!(
        circuits[0].snapshot().output(CHIP, Direction::NegX),
        Some(Value::Number(4.0))
    );
    assert_eq!(circuits[0].snapshot().output(CHIP, Direction::PosY), None);
    assert_eq!(grid.sub_datum(BlockPos::new(0, 1, 0)), 1);
    assert_eq!(grid.sub_datum(BlockPos::new(1, 2, 0)), 0);
}

#[test]
fn rotated_chip_moves_output_after_rebuild() {
    let mut grid = outer(inner(ids::GET_SUB_DATUM, ids::IC_OUTPUT), 4);
    refresh(&mut grid);
    assert_eq!(grid.sub_datum(BlockPos::new(0, 1, 0)), 1);

    // Canonical -X now faces +Y.
    let o = Orientation::from_basis(Direction::NegY, Direction::PosX).unwrap();
    assert_eq!(o.transform(Direction::NegX), Direction::PosY);
    grid.set_orientation(CHIP, o).unwrap();

    let circuits = refresh(&mut grid);
    assert_eq!(
        circuits[0].snapshot().output(CHIP, Direction::PosY),
        Some(Value::Number(4.0))
    );
    assert_eq!(grid.sub_datum(BlockPos::new(1, 2, 0)), 1);
    assert_eq!(grid.sub_datum(BlockPos::new(0, 1, 0)), 0);
}

#[test]
fn every_nested_face_maps_through_chip_rotation() {
    // icOutput at the center of a 3×3×3 grid, one pad per face, each pad
    // holding a distinct level.
    let center = BlockPos::new(1, 1, 1);
    let level = |d: Direction| 10 + d.index() as i32;
    let mut nested = GridBuilder::new([3, 3, 3]).block(center, ids::IC_OUTPUT);
    for d in Direction::ALL {
        nested = nested.datum(center.offset(d), ids::PAD, level(d));
    }
    let catalog = Arc::new(
        standard_catalog()
            .block(
                ids::CHIP,
                BlockType::new("chip")
                    .with_behavior(Behavior::Ic)
                    .with_nested(Arc::new(nested.build())),
            )
            .build()
            .unwrap(),
    );

    for o in Orientation::all() {
        let mut grid = GridBuilder::with_catalog(Arc::clone(&catalog), [1, 1, 1])
            .rotated([0, 0, 0], ids::CHIP, o)
            .build();
        let circuits = refresh(&mut grid);
        let snapshot = circuits[0].snapshot();
        for d in Direction::ALL {
            assert_eq!(
                snapshot.output(BlockPos::ORIGIN, o.transform(d)),
                Some(Value::from(level(d))),
                "{o}: canonical {d}"
            );
        }
    }
}

#[test]
fn nested_become_forwarded_when_edits_allowed() {
    let datum = i32::from(ids::STONE.0);
    let mut grid = outer(inner(ids::GET_SUB_DATUM, ids::BECOME), datum);
    let mut circuits = compile_all(&grid, &CompileOptions::default(), &NullSink).unwrap();

    // Without edit permission the request goes nowhere.
    let mut state = EvalState::new(&grid);
    circuits[0].evaluate(&mut state);
    assert!(state.edits().is_empty());

    let edits = circuits[0].refresh_local(&mut grid).unwrap();
    assert_eq!(
        edits,
        vec![WorldEdit::ReplaceBlock {
            pos: CHIP,
            id: ids::STONE,
            sub_datum: datum,
        }]
    );
    assert_eq!(grid.block_id(CHIP), ids::STONE);
}

#[test]
fn nested_set_rotation_forwarded() {
    let mut grid = outer(inner(ids::GET_SUB_DATUM, ids::SET_ROTATION), 7);
    refresh(&mut grid);
    assert_eq!(grid.orientation(CHIP).code(), 7);
}

#[test]
fn nested_neighbor_sensor_uses_outer_orientation() {
    // The sensor looks past the chip's -X face, mapped through the chip's
    // orientation: with -X turned to +Y it sees the +Y lamp.
    let o = Orientation::from_basis(Direction::NegY, Direction::PosX).unwrap();
    let mut grid = outer(inner(ids::GET_NEIGHBOR_ID, ids::IC_OUTPUT), 0);
    grid.set_orientation(CHIP, o).unwrap();
    let circuits = refresh(&mut grid);
    // The icOutput reads on -X; the chip turns that to +Y.
    assert_eq!(
        circuits[0].snapshot().output(CHIP, Direction::PosY),
        Some(Value::Number(f64::from(ids::INDICATOR.0)))
    );
}

#[test]
fn missing_nested_grid_is_a_diagnostic() {
    let catalog = standard_catalog()
        .block(ids::CHIP, BlockType::new("hollow").with_behavior(Behavior::Ic))
        .build()
        .unwrap();
    let grid = GridBuilder::with_catalog(Arc::new(catalog), [2, 1, 1])
        .block([0, 0, 0], ids::CHIP)
        .block([1, 0, 0], ids::INDICATOR)
        .build();
    let sink = RecordingSink::new();
    let circuits = compile_all(&grid, &CompileOptions::default(), &sink).unwrap();
    assert_eq!(circuits.len(), 1);
    assert_eq!(
        sink.warnings(),
        vec![Diagnostic::MissingNestedGrid {
            pos: BlockPos::ORIGIN
        }]
    );
}

#[test]
fn embedding_depth_is_bounded() {
    let sink = RecordingSink::new();
    let options = CompileOptions {
        max_embed_depth: 3,
        ..CompileOptions::default()
    };
    let circuits = compile_all(&SelfNestingGrid, &options, &sink).unwrap();
    assert_eq!(circuits.len(), 1);
    assert_eq!(
        sink.warnings(),
        vec![Diagnostic::EmbedDepthExceeded {
            pos: BlockPos::ORIGIN,
            limit: 3
        }]
    );
    let depths: Vec<u32> = sink
        .diagnostics()
        .into_iter()
        .filter_map(|d| match d {
            Diagnostic::Compiled { depth, .. } => Some(depth),
            _ => None,
        })
        .collect();
    assert_eq!(depths, vec![3, 2, 1, 0]);

    // The innermost chip is inert; evaluating the tower does nothing.
    let mut state = EvalState::new(&SelfNestingGrid);
    circuits[0].evaluate(&mut state);
    assert!(state.snapshot().is_empty());
}
