//! Circuit extraction, compilation and evaluation for voxlogic.
//!
//! A [`Circuit`] is built over a cluster of blocks in a [`Grid`](voxlogic_grid::Grid):
//!
//! 1. the [`tracer`] walks wire chains outward from every logic block and
//!    groups connected faces into [nets](tracer::Net), discarding nets that
//!    carry no information;
//! 2. the [`pipeline`] compiler demands each block's input nets before the
//!    block itself, invoking the per-behavior routines in [`behaviors`] at
//!    most once per block and net;
//! 3. [`Circuit::evaluate`] runs the compiled effects in order against a
//!    fresh [`EvalState`], producing a value for every connected face and
//!    queueing [`WorldEdit`](voxlogic_grid::WorldEdit) requests.
//!
//! # Cycles
//!
//! Compilation memoizes blocks and nets but does not detect logical cycles.
//! A feedback loop is evaluated in a single pass: the member of the loop
//! compiled first reads `Null` for the value that closes the loop. There is
//! no fixed-point iteration.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod behaviors;
pub mod circuit;
pub mod diag;
pub mod options;
pub mod pipeline;
pub mod state;
pub mod tracer;

pub use behaviors::stand_on;
pub use circuit::{compile_all, compile_all_at, Circuit};
pub use diag::{Diagnostic, DiagnosticSink, LogSink, NullSink};
pub use options::CompileOptions;
pub use pipeline::{Effect, EffectFn, EffectTarget, Pipeline};
pub use state::{Embedding, EvalState, Snapshot, StateKey};
pub use tracer::{trace, Net, NetGraph, NetMember};
