//! Compile-time options.

/// Options that shape circuit compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Maximum nesting depth of `ic` evaluation. A block whose nested grid
    /// would be compiled past this depth is treated as having none.
    /// Default: 8.
    pub max_embed_depth: u32,
    /// Whether nets record the wire segments walked while tracing. Only
    /// diagnostic overlays read them. Default: `true`.
    pub record_trace_edges: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_embed_depth: 8,
            record_trace_edges: true,
        }
    }
}
