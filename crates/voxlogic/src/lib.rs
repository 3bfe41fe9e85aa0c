//! Voxlogic: circuit extraction, compilation and evaluation for voxel worlds.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! voxlogic sub-crates. For most users, adding `voxlogic` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use voxlogic::prelude::*;
//!
//! // A pad wired to a lamp.
//! let catalog = BlockCatalog::builder()
//!     .block(BlockId(1), BlockType::new("pad").with_behavior(Behavior::Pad))
//!     .block(BlockId(2), BlockType::new("wire").with_behavior(Behavior::Wire))
//!     .block(BlockId(3), BlockType::new("lamp").with_behavior(Behavior::Indicator))
//!     .build()
//!     .unwrap();
//! let mut grid = VoxelGrid::new(Arc::new(catalog), [4, 1, 1]).unwrap();
//! grid.place(BlockPos::new(0, 0, 0), BlockId(1)).unwrap();
//! grid.place(BlockPos::new(1, 0, 0), BlockId(2)).unwrap();
//! grid.place(BlockPos::new(2, 0, 0), BlockId(2)).unwrap();
//! grid.place(BlockPos::new(3, 0, 0), BlockId(3)).unwrap();
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let mut circuits = CircuitSet::new();
//! circuits.rebuild(&engine, &grid).unwrap();
//!
//! // Step on the pad and let the circuit settle.
//! stand_on(&mut grid, BlockPos::ORIGIN, true).unwrap();
//! circuits.refresh_all(&mut grid).unwrap();
//! assert_eq!(grid.sub_datum(BlockPos::new(3, 0, 0)), 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `voxlogic-core` | Positions, directions, orientations, behaviors, values |
//! | [`grid`] | `voxlogic-grid` | The `Grid` trait, block catalog, voxel backend, clusters |
//! | [`circuit`] | `voxlogic-circuit` | Net tracing, compilation, evaluation state |
//! | [`engine`] | `voxlogic-engine` | Configuration, event dispatch, circuit sets |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vocabulary types (`voxlogic-core`).
///
/// Contains [`types::BlockPos`], [`types::Direction`], the 24
/// [`types::Orientation`]s, the [`types::Behavior`] catalog with its face
/// roles, signal [`types::Value`]s and [`types::CompileError`].
pub use voxlogic_core as types;

/// The world interface (`voxlogic-grid`).
///
/// Provides the [`grid::Grid`] trait, [`grid::BlockCatalog`], the in-memory
/// [`grid::VoxelGrid`] and [`grid::discover_clusters`].
pub use voxlogic_grid as grid;

/// Circuit compilation and evaluation (`voxlogic-circuit`).
///
/// [`circuit::Circuit`] owns a traced [`circuit::NetGraph`] and a compiled
/// [`circuit::Pipeline`]; [`circuit::EvalState`] carries one evaluation.
pub use voxlogic_circuit as circuit;

/// Engine layer (`voxlogic-engine`).
///
/// [`engine::Engine`] bundles configuration with diagnostic and event sinks;
/// [`engine::CircuitSet`] holds a grid's circuits between rebuilds.
pub use voxlogic_engine as engine;

/// Common imports for typical voxlogic usage.
///
/// ```rust
/// use voxlogic::prelude::*;
/// ```
///
/// This imports the grid trait and backend, the core value types, circuit
/// compilation and evaluation, and the engine entry points.
pub mod prelude {
    // Core types
    pub use voxlogic_core::{
        Aabb, Behavior, BlockId, BlockPos, Direction, FaceRole, NetId, Orientation, Value,
    };

    // Errors
    pub use voxlogic_core::CompileError;
    pub use voxlogic_grid::GridError;

    // Grid
    pub use voxlogic_grid::{BlockCatalog, BlockType, Grid, VoxelGrid, WorldEdit};

    // Circuit
    pub use voxlogic_circuit::{
        compile_all, stand_on, Circuit, CompileOptions, Diagnostic, DiagnosticSink, EvalState,
        Snapshot,
    };

    // Engine
    pub use voxlogic_engine::{
        CircuitEvent, CircuitSet, Engine, EngineConfig, EngineError, EventSink,
    };
}
