//! Core types for the voxlogic circuit engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by every other crate in the workspace: block positions
//! and bounding boxes, the six axis [`Direction`]s, the 24 cube
//! [`Orientation`]s, per-face [`FaceRole`]s, the closed [`Behavior`] catalog,
//! signal [`Value`]s, identifiers, and the compile error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod behavior;
pub mod direction;
pub mod error;
pub mod id;
pub mod orientation;
pub mod pos;
pub mod value;

pub use behavior::{Behavior, FaceRole};
pub use direction::{Axis, Direction};
pub use error::CompileError;
pub use id::{BlockId, NetId};
pub use orientation::Orientation;
pub use pos::{Aabb, BlockPos};
pub use value::Value;
