//! The [`Engine`]: validated configuration plus injected collaborators.

use crate::config::{ConfigError, EngineConfig};
use crate::events::{EventSink, NullEvents};
use std::error::Error;
use std::fmt;
use voxlogic_circuit::{compile_all, Circuit, CompileOptions, DiagnosticSink, LogSink};
use voxlogic_core::CompileError;
use voxlogic_grid::{Grid, GridError};

// ── EngineError ────────────────────────────────────────────────────

/// Errors from engine entry points that both compile and touch the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Building a circuit failed.
    Compile(CompileError),
    /// The grid rejected a write.
    Grid(GridError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compile(e) => write!(f, "compile: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Compile(e) => Some(e),
            Self::Grid(e) => Some(e),
        }
    }
}

impl From<CompileError> for EngineError {
    fn from(e: CompileError) -> Self {
        Self::Compile(e)
    }
}

impl From<GridError> for EngineError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── Engine ─────────────────────────────────────────────────────────

/// Entry point for compiling and driving circuits.
///
/// Diagnostics go to a [`DiagnosticSink`] (default [`LogSink`]) and
/// notifications to an [`EventSink`] (default [`NullEvents`]); both are
/// injected so that tests and embedders can observe them.
pub struct Engine {
    config: EngineConfig,
    options: CompileOptions,
    diagnostics: Box<dyn DiagnosticSink>,
    events: Box<dyn EventSink>,
}

impl Engine {
    /// Build an engine from a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            options: config.compile_options(),
            config,
            diagnostics: Box::new(LogSink),
            events: Box::new(NullEvents),
        })
    }

    /// Replace the diagnostic sink.
    pub fn with_diagnostics(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Replace the event sink.
    pub fn with_events(mut self, sink: Box<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    /// The validated configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Options handed to the circuit compiler.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// The injected diagnostic sink.
    pub fn diagnostics(&self) -> &dyn DiagnosticSink {
        &*self.diagnostics
    }

    /// The injected event sink.
    pub fn events(&self) -> &dyn EventSink {
        &*self.events
    }

    /// Discover and compile every circuit in `grid`.
    pub fn compile_all(&self, grid: &dyn Grid) -> Result<Vec<Circuit>, CompileError> {
        compile_all(grid, &self.options, self.diagnostics())
    }

    /// Recompile one circuit against the current grid contents.
    pub fn compile(&self, circuit: &mut Circuit, grid: &dyn Grid) -> Result<(), CompileError> {
        circuit.compile(grid, &self.options, self.diagnostics())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_rejected() {
        let cfg = EngineConfig {
            max_embed_depth: 1000,
            ..EngineConfig::default()
        };
        assert!(matches!(
            Engine::new(cfg),
            Err(ConfigError::EmbedDepthTooLarge { .. })
        ));
    }

    #[test]
    fn options_mirror_config() {
        let cfg = EngineConfig {
            max_embed_depth: 3,
            record_trace_edges: false,
        };
        let engine = Engine::new(cfg).unwrap();
        assert_eq!(engine.options().max_embed_depth, 3);
        assert!(!engine.options().record_trace_edges);
    }

    #[test]
    fn error_sources_chain() {
        let err = EngineError::from(CompileError::EmptyCircuit);
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "compile: circuit has no member blocks");
    }
}
