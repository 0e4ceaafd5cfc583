//! Runtime error types
//!
//! [`RuntimeError`] covers faults that stop a run after it started. They never
//! escape [`ExecutionState::resume`](crate::interpreter::ExecutionState::resume):
//! the engine turns them into a diagnostic line on the console.
//!
//! [`InputError`] is the only error a caller of the engine can see, and only
//! when it supplies input at the wrong time.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A loop end was reached whose loop is not the innermost active one
    #[error("the end of a loop was reached without its start")]
    LoopMismatch { location: SourceLocation },

    /// `i++` on a variable holding text
    #[error("cannot add 1 to '{name}' because it holds \"{value}\", not a number")]
    NonNumericIncrement {
        name: String,
        value: String,
        location: SourceLocation,
    },

    #[error("'{name}' became too large to count")]
    IntegerOverflow {
        name: String,
        location: SourceLocation,
    },

    /// The step guard tripped
    #[error("too many steps ({limit}), the program may be stuck in a loop")]
    StepLimitExceeded {
        limit: usize,
        location: SourceLocation,
    },
}

impl RuntimeError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            RuntimeError::LoopMismatch { location } => Some(location),
            RuntimeError::NonNumericIncrement { location, .. } => Some(location),
            RuntimeError::IntegerOverflow { location, .. } => Some(location),
            RuntimeError::StepLimitExceeded { location, .. } => Some(location),
        }
    }

    /// The console form of this error
    pub fn diagnostic(&self) -> String {
        match self.location() {
            Some(location) => format!("Runtime error (line {}): {}", location.line, self),
            None => format!("Runtime error: {}", self),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("the program is not waiting for input")]
    NotAwaitingInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_carries_line() {
        let err = RuntimeError::NonNumericIncrement {
            name: "i".to_string(),
            value: "abc".to_string(),
            location: SourceLocation::new(7, 9),
        };
        assert_eq!(
            err.diagnostic(),
            "Runtime error (line 7): cannot add 1 to 'i' because it holds \"abc\", not a number"
        );
    }
}
