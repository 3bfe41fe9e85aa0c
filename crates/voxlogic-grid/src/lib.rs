//! Voxel grid interface for the voxlogic circuit engine.
//!
//! This crate defines the [`Grid`] trait, the collaborator boundary through
//! which the circuit engine reads block behaviors, orientations and
//! sub-data and through which it requests world edits. Alongside it live an
//! immutable [`BlockCatalog`], the in-memory [`VoxelGrid`] backend, and
//! cluster discovery.
//!
//! # Coordinates
//!
//! Positions outside [`Grid::bounds`] read as air. Iteration over a grid is
//! z-then-y-then-x (x fastest), matching [`Aabb::positions`](voxlogic_core::Aabb::positions).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod cluster;
pub mod error;
pub mod grid;
pub mod voxel;

pub use catalog::{BlockCatalog, BlockCatalogBuilder, BlockType};
pub use cluster::discover_clusters;
pub use error::GridError;
pub use grid::{Grid, WorldEdit};
pub use voxel::VoxelGrid;
