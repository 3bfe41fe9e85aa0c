//! Engine layer for voxlogic circuits.
//!
//! Wraps the circuit compiler with a validated [`EngineConfig`], injected
//! diagnostic and event sinks, top-level evaluation of a block's nested grid
//! ([`Engine::dispatch_event`]), and the [`CircuitSet`] a driver keeps per
//! grid.
//!
//! Everything here is synchronous: the driver serializes grid mutation with
//! compiling and evaluating.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod circuits;
pub mod config;
pub mod embed;
pub mod engine;
pub mod events;

pub use circuits::CircuitSet;
pub use config::{ConfigError, EngineConfig};
pub use embed::{evaluate_embedded, EmbeddedOutcome};
pub use engine::{Engine, EngineError};
pub use events::{ChannelEventSink, CircuitEvent, EventSink, NullEvents};
