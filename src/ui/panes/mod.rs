//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code with syntax highlighting, the current line and
//!   skipped statements
//! - [`terminal`]: The simulated console
//! - [`variables`]: Variable values and active loops
//! - [`input`]: The line the learner types answers into
//! - [`status`]: Status bar with keybindings and run state
//!
//! Each pane module exports a `render_*` function taking the frame, its
//! area, the data to draw and, where the pane scrolls, its scroll state.

pub mod input;
pub mod source;
pub mod status;
pub mod terminal;
pub mod variables;

pub use input::render_input_pane;
pub use source::{render_source_pane, LineHighlight, SourceRenderData, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use terminal::render_terminal_pane;
pub use variables::{render_variables_pane, VariablesRenderData, VariablesScrollState};
