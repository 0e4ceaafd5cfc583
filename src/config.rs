//! Run configuration
//!
//! [`Config`] bundles the tokenizer and engine options. The binary builds it
//! from command-line flags; library callers usually take `Config::default()`.

use crate::interpreter::constants::{DEFAULT_MAX_STEPS, UNDEFINED_MARKER};

/// Order in which a print statement's parts are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintOrder {
    /// Parts appear exactly as written
    #[default]
    SourceOrder,
    /// All literals, then all variables, then one newline if `endl` was
    /// present. Matches how programs published for the original web
    /// playground were rendered.
    LiteralsFirst,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    pub print_order: PrintOrder,
}

/// Engine limits and presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Tokens a single `resume` may execute before the run is halted.
    /// `None` runs unbounded.
    pub max_steps: Option<usize>,
    /// Printed in place of a variable that was never assigned
    pub undefined_marker: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_steps: Some(DEFAULT_MAX_STEPS),
            undefined_marker: UNDEFINED_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub tokenizer: TokenizerOptions,
    pub engine: EngineConfig,
}
