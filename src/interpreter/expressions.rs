//! Loop condition evaluation
//!
//! Conditions are a fixed shape, `operand op operand`, so evaluation is a
//! lookup plus one integer comparison. Nothing from the program's text is
//! ever run as code.
//!
//! Operand resolution:
//! - integer literal: itself
//! - unset variable: 0
//! - `Int` variable: its value
//! - `Str` variable: parsed after trimming; text that is not a number makes
//!   the whole condition false

use crate::interpreter::engine::ExecutionState;
use crate::parser::ast::{ComparisonExpr, Operand};
use tracing::warn;

impl ExecutionState {
    pub(crate) fn evaluate_condition(&self, condition: &ComparisonExpr) -> bool {
        match (self.resolve_operand(&condition.left), self.resolve_operand(&condition.right)) {
            (Some(left), Some(right)) => condition.op.apply(left, right),
            _ => {
                warn!(%condition, "condition compares text that is not a number, treating it as false");
                false
            }
        }
    }

    #[inline]
    fn resolve_operand(&self, operand: &Operand) -> Option<i64> {
        match operand {
            Operand::Literal(n) => Some(*n),
            Operand::Variable(name) => match self.variables.get(name) {
                None => Some(0),
                Some(value) => value.as_number(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::interpreter::engine::ExecutionState;
    use crate::memory::Value;
    use crate::parser::ast::*;

    fn state_with(vars: &[(&str, Value)]) -> ExecutionState {
        let mut state = ExecutionState::start(&Program::new(), EngineConfig::default());
        for (name, value) in vars {
            state.variables.set(name, value.clone());
        }
        state
    }

    fn cond(left: Operand, op: CompareOp, right: Operand) -> ComparisonExpr {
        ComparisonExpr { left, op, right }
    }

    fn var(name: &str) -> Operand {
        Operand::Variable(name.into())
    }

    #[test]
    fn test_all_operators() {
        let state = state_with(&[("i", Value::Int(2))]);
        let lit = Operand::Literal;

        assert!(state.evaluate_condition(&cond(var("i"), CompareOp::Lt, lit(3))));
        assert!(state.evaluate_condition(&cond(var("i"), CompareOp::Le, lit(2))));
        assert!(!state.evaluate_condition(&cond(var("i"), CompareOp::Gt, lit(2))));
        assert!(state.evaluate_condition(&cond(var("i"), CompareOp::Ge, lit(2))));
        assert!(state.evaluate_condition(&cond(var("i"), CompareOp::Eq, lit(2))));
        assert!(state.evaluate_condition(&cond(lit(1), CompareOp::Ne, var("i"))));
    }

    #[test]
    fn test_input_strings_compare_numerically() {
        let state = state_with(&[("i", Value::Int(9)), ("n", Value::from(" 10 "))]);
        assert!(state.evaluate_condition(&cond(var("i"), CompareOp::Lt, var("n"))));
    }

    #[test]
    fn test_unset_is_zero() {
        let state = state_with(&[]);
        assert!(state.evaluate_condition(&cond(var("ghost"), CompareOp::Eq, Operand::Literal(0))));
    }

    #[test]
    fn test_non_numeric_text_is_false() {
        let state = state_with(&[("n", Value::from("1; launch()"))]);
        assert!(!state.evaluate_condition(&cond(Operand::Literal(0), CompareOp::Lt, var("n"))));
        assert!(!state.evaluate_condition(&cond(Operand::Literal(0), CompareOp::Ne, var("n"))));
    }
}
