//! Engine configuration, validation, and error types.

use std::error::Error;
use std::fmt;
use voxlogic_circuit::CompileOptions;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_embed_depth` is above [`EngineConfig::MAX_EMBED_DEPTH`].
    EmbedDepthTooLarge {
        /// The configured depth.
        configured: u32,
        /// The largest accepted depth.
        max: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmbedDepthTooLarge { configured, max } => {
                write!(f, "max_embed_depth {configured} exceeds maximum of {max}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── EngineConfig ───────────────────────────────────────────────────

/// Tunables for an [`Engine`](crate::Engine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum nesting depth of `ic` evaluation. Compiling a nested grid
    /// past this depth reports a diagnostic and treats the `ic` block as
    /// having no nested grid. 0 disables nesting. Default: 8.
    pub max_embed_depth: u32,
    /// Record walked wire segments on each net for overlays. Default: `true`.
    pub record_trace_edges: bool,
}

impl EngineConfig {
    /// Upper bound on [`max_embed_depth`](Self::max_embed_depth). Nested
    /// compilation recurses once per level.
    pub const MAX_EMBED_DEPTH: u32 = 64;

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_embed_depth > Self::MAX_EMBED_DEPTH {
            return Err(ConfigError::EmbedDepthTooLarge {
                configured: self.max_embed_depth,
                max: Self::MAX_EMBED_DEPTH,
            });
        }
        Ok(())
    }

    /// The subset of the configuration the circuit compiler consumes.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            max_embed_depth: self.max_embed_depth,
            record_trace_edges: self.record_trace_edges,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let options = CompileOptions::default();
        Self {
            max_embed_depth: options.max_embed_depth,
            record_trace_edges: options.record_trace_edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_embed_depth, 8);
        assert_eq!(cfg.compile_options(), CompileOptions::default());
    }

    #[test]
    fn zero_depth_is_valid() {
        let cfg = EngineConfig {
            max_embed_depth: 0,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn excessive_depth_rejected() {
        let cfg = EngineConfig {
            max_embed_depth: 65,
            ..EngineConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::EmbedDepthTooLarge {
                configured: 65,
                max: 64,
            }) => {}
            other => panic!("expected EmbedDepthTooLarge, got {other:?}"),
        }
    }
}
