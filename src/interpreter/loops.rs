//! Counting `for` loop execution.
//!
//! Adds `impl ExecutionState` methods for the two loop tokens. A loop behaves
//! like C's `for`: the condition is tested on entry, and after each pass the
//! variable is incremented before the condition is tested again, so
//! `for (i = 0; i < 3; i++)` runs its body exactly three times.

use crate::interpreter::engine::{ExecutionState, LoopFrame};
use crate::interpreter::errors::RuntimeError;
use crate::memory::Value;
use crate::parser::ast::{ComparisonExpr, SourceLocation};
use tracing::debug;

impl ExecutionState {
    /// Initialise the loop variable and either enter the body or jump past
    /// the paired `LoopEnd` at `end`.
    pub(crate) fn execute_loop_start(
        &mut self,
        init_variable: String,
        init_value: i64,
        condition: ComparisonExpr,
        increment_variable: String,
        end: usize,
    ) {
        self.variables.set(&init_variable, Value::Int(init_value));

        if self.evaluate_condition(&condition) {
            debug!(pc = self.pc, %condition, depth = self.loop_stack.len() + 1, "enter loop");
            self.loop_stack.push(LoopFrame {
                start_index: self.pc,
                body_start: self.pc + 1,
                condition,
                increment_variable,
            });
            self.pc += 1;
        } else {
            debug!(pc = self.pc, %condition, "loop skipped");
            self.pc = end + 1;
        }
    }

    /// Increment, re-test, and either jump back to the body or leave the loop.
    pub(crate) fn execute_loop_end(
        &mut self,
        start: usize,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let frame = match self.loop_stack.last() {
            Some(frame) if frame.start_index == start => frame.clone(),
            _ => return Err(RuntimeError::LoopMismatch { location }),
        };

        self.increment(&frame.increment_variable, location)?;

        if self.evaluate_condition(&frame.condition) {
            self.pc = frame.body_start;
        } else {
            debug!(pc = self.pc, condition = %frame.condition, "leave loop");
            self.loop_stack.pop();
            self.pc += 1;
        }
        Ok(())
    }

    /// `name++`. An unset variable counts from 0.
    fn increment(&mut self, name: &str, location: SourceLocation) -> Result<(), RuntimeError> {
        let current = match self.variables.get(name) {
            None => 0,
            Some(value) => value.as_number().ok_or_else(|| RuntimeError::NonNumericIncrement {
                name: name.to_string(),
                value: value.to_string(),
                location,
            })?,
        };

        let next = current.checked_add(1).ok_or_else(|| RuntimeError::IntegerOverflow {
            name: name.to_string(),
            location,
        })?;

        self.variables.set(name, Value::Int(next));
        Ok(())
    }
}
