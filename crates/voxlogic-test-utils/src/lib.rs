//! Test utilities for voxlogic development.
//!
//! Provides grid fixtures ([`fixtures`]) and recording implementations of
//! the injected sinks ([`RecordingSink`], [`RecordingEvents`]) so tests can
//! assert on diagnostics and notifications.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{catalog, ids, standard_catalog, GridBuilder, SelfNestingGrid};

use std::sync::{Arc, Mutex, PoisonError};
use voxlogic_circuit::{Diagnostic, DiagnosticSink};
use voxlogic_engine::{CircuitEvent, EventSink};

/// Collects every diagnostic. Clones share one log, so a test can hand a
/// clone to the engine and inspect the original.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    seen: Arc<Mutex<Vec<Diagnostic>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far, in order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reports other than compile summaries.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|d| !matches!(d, Diagnostic::Compiled { .. }))
            .collect()
    }

    pub fn clear(&self) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic.clone());
    }
}

/// Collects every event. Clones share one log.
#[derive(Clone, Debug, Default)]
pub struct RecordingEvents {
    seen: Arc<Mutex<Vec<CircuitEvent>>>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CircuitEvent> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EventSink for RecordingEvents {
    fn notify(&self, event: CircuitEvent) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
