//! Injected diagnostic sink.
//!
//! The engine never logs through ambient global state of its own; every
//! compile and evaluation path reports through a [`DiagnosticSink`] handed
//! in by the caller. [`LogSink`] forwards to the `log` facade.

use std::fmt;
use voxlogic_core::BlockPos;

/// Something worth telling a human about, but not worth failing over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// An `ic` block's type has no nested grid; it compiles to a no-op.
    MissingNestedGrid {
        /// The `ic` block.
        pos: BlockPos,
    },
    /// Nested evaluation would exceed the configured depth; the block is
    /// treated as having no nested grid.
    EmbedDepthExceeded {
        /// The `ic` block at which the limit was hit.
        pos: BlockPos,
        /// The configured limit.
        limit: u32,
    },
    /// Summary of a finished compile.
    Compiled {
        /// Nesting depth of the compiled circuit (0 = top level).
        depth: u32,
        /// Member block count.
        members: usize,
        /// Retained net count.
        nets: usize,
        /// Effect count in the pipeline.
        effects: usize,
    },
}

impl Diagnostic {
    /// Severity used by [`LogSink`].
    pub fn level(&self) -> log::Level {
        match self {
            Self::MissingNestedGrid { .. } | Self::EmbedDepthExceeded { .. } => log::Level::Warn,
            Self::Compiled { .. } => log::Level::Debug,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNestedGrid { pos } => {
                write!(f, "ic block at {pos} has no nested grid; ignoring")
            }
            Self::EmbedDepthExceeded { pos, limit } => {
                write!(f, "ic block at {pos} exceeds embedding depth {limit}; ignoring")
            }
            Self::Compiled {
                depth,
                members,
                nets,
                effects,
            } => write!(
                f,
                "compiled circuit at depth {depth}: {members} members, {nets} nets, {effects} effects"
            ),
        }
    }
}

/// Receiver for [`Diagnostic`]s.
pub trait DiagnosticSink {
    /// Report one diagnostic. Must not fail or block.
    fn report(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to the `log` facade under the `voxlogic` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: &Diagnostic) {
        log::log!(target: "voxlogic", diagnostic.level(), "{diagnostic}");
    }
}

/// Drops every diagnostic.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}
