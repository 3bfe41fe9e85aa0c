//! Error types for circuit compilation.
//!
//! Only conditions that abort a whole circuit build are errors. Per-block
//! anomalies (an `ic` block without a nested grid, an embedding past the
//! depth limit) are reported as diagnostics and compile to no-op effects.

use crate::direction::Direction;
use crate::id::NetId;
use crate::pos::BlockPos;
use std::error::Error;
use std::fmt;

/// Errors that abort `Circuit::compile()`.
///
/// No partial circuit is installed when compilation fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileError {
    /// The circuit has no member blocks.
    EmptyCircuit,
    /// Two different nets reached the same block face during tracing.
    ///
    /// Indicates malformed geometry or a tracer defect; never a normal
    /// input-validation failure.
    ConflictingNetMerge {
        /// Block whose face was contested.
        pos: BlockPos,
        /// Physical direction of the contested face.
        direction: Direction,
        /// Net that already claimed the face.
        existing: NetId,
        /// Net that tried to claim it.
        incoming: NetId,
    },
    /// Compiling a circuit inside an `ic` block's nested grid failed.
    Nested {
        /// Position of the `ic` block in the enclosing grid.
        pos: BlockPos,
        /// The nested failure.
        source: Box<CompileError>,
    },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCircuit => write!(f, "circuit has no member blocks"),
            Self::ConflictingNetMerge {
                pos,
                direction,
                existing,
                incoming,
            } => write!(
                f,
                "conflicting net merge at {pos} face {direction}: \
                 claimed by {existing}, reached by {incoming}"
            ),
            Self::Nested { pos, source } => {
                write!(f, "nested circuit of block at {pos}: {source}")
            }
        }
    }
}

impl Error for CompileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Nested { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_error_chains_source() {
        let inner = CompileError::ConflictingNetMerge {
            pos: BlockPos::new(1, 0, 0),
            direction: Direction::NegX,
            existing: NetId(0),
            incoming: NetId(2),
        };
        let outer = CompileError::Nested {
            pos: BlockPos::ORIGIN,
            source: Box::new(inner.clone()),
        };
        assert_eq!(
            inner.to_string(),
            "conflicting net merge at (1, 0, 0) face -X: claimed by net#0, reached by net#2"
        );
        assert!(outer.to_string().starts_with("nested circuit of block at (0, 0, 0)"));
        assert!(outer.source().is_some());
    }
}
