//! Execution engine
//!
//! This module provides the resumable interpreter:
//! - [`engine`]: [`ExecutionState`] with `start` / `resume` / `supply_input`
//! - [`errors`]: Runtime and input error types
//! - [`constants`]: Defaults and console messages
//!
//! # Execution Model
//!
//! The engine walks the token list with a program counter. It runs until the
//! program ends, a runtime fault halts it, or it reaches a read, where it
//! returns control to the caller. The caller answers with
//! [`ExecutionState::supply_input`], which continues the run.
//!
//! Runtime faults never surface as `Err`; they become a diagnostic line on
//! the console.

pub mod constants;
pub mod engine;
pub mod errors;
mod expressions;
mod loops;
mod statements;

pub use engine::{ExecutionState, LoopFrame, PendingRead, Status};
pub use errors::{InputError, RuntimeError};
