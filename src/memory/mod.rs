//! Memory model
//!
//! - [`value`]: Runtime value representation (`Int`, `Str`)
//! - [`variables`]: The flat variable store owned by one run

pub mod value;
pub mod variables;

pub use value::Value;
pub use variables::VariableStore;
