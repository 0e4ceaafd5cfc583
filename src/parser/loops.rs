//! `for` header parsing.
//!
//! Only the counting form is accepted:
//!
//! ```text
//! for ( [type] ident = ["-"] int ; operand cmp operand ; ident "++" | "++" ident )
//! ```
//!
//! Errors are returned as a short learner-facing reason; the caller wraps it
//! in a `StructuralError` carrying the header's line.

use crate::parser::ast::{CompareOp, ComparisonExpr, Operand};
use crate::parser::lexer::Lexeme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoopHeader {
    pub init_variable: String,
    pub init_value: i64,
    pub condition: ComparisonExpr,
    pub increment_variable: String,
}

pub(crate) fn parse_loop_header(chunk: &[Lexeme]) -> Result<LoopHeader, String> {
    let inner = match chunk {
        [keyword, Lexeme::LParen(_), inner @ .., Lexeme::RParen(_)] if keyword.is_ident("for") => {
            inner
        }
        _ => return Err("expected `for (start; condition; step)`".to_string()),
    };

    let sections: Vec<&[Lexeme]> = inner
        .split(|l| matches!(l, Lexeme::Semicolon(_)))
        .collect();
    let [init, condition, step] = sections.as_slice() else {
        return Err("a for-loop header has exactly three parts separated by `;`".to_string());
    };

    let (init_variable, init_value) = parse_init(init)?;
    let condition = parse_condition(condition)?;
    let increment_variable = parse_step(step)?;

    Ok(LoopHeader {
        init_variable,
        init_value,
        condition,
        increment_variable,
    })
}

fn parse_init(init: &[Lexeme]) -> Result<(String, i64), String> {
    // A leading type name is optional: `int i = 0` or `i = 0`
    let init = match init {
        [Lexeme::Ident(_, _), Lexeme::Ident(_, _), ..] => &init[1..],
        _ => init,
    };

    let parsed = match init {
        [Lexeme::Ident(name, _), Lexeme::Eq(_), value @ ..] => {
            parse_int(value).map(|v| (name.clone(), v))
        }
        _ => None,
    };

    parsed.ok_or_else(|| "the loop must start from a whole number, like `int i = 0`".to_string())
}

fn parse_condition(condition: &[Lexeme]) -> Result<ComparisonExpr, String> {
    let op_index = condition.iter().position(|l| compare_op(l).is_some());

    let parsed = op_index.and_then(|i| {
        let op = compare_op(&condition[i])?;
        let left = parse_operand(&condition[..i])?;
        let right = parse_operand(&condition[i + 1..])?;
        Some(ComparisonExpr { left, op, right })
    });

    parsed.ok_or_else(|| "the loop condition must compare two values, like `i < 10`".to_string())
}

fn parse_step(step: &[Lexeme]) -> Result<String, String> {
    match step {
        [Lexeme::Ident(name, _), Lexeme::PlusPlus(_)] | [Lexeme::PlusPlus(_), Lexeme::Ident(name, _)] => {
            Ok(name.clone())
        }
        _ => Err("only `i++` is supported as the loop step".to_string()),
    }
}

fn compare_op(lexeme: &Lexeme) -> Option<CompareOp> {
    match lexeme {
        Lexeme::Lt(_) => Some(CompareOp::Lt),
        Lexeme::Le(_) => Some(CompareOp::Le),
        Lexeme::Gt(_) => Some(CompareOp::Gt),
        Lexeme::Ge(_) => Some(CompareOp::Ge),
        Lexeme::EqEq(_) => Some(CompareOp::Eq),
        Lexeme::NotEq(_) => Some(CompareOp::Ne),
        _ => None,
    }
}

fn parse_operand(lexemes: &[Lexeme]) -> Option<Operand> {
    match lexemes {
        [Lexeme::Ident(name, _)] => Some(Operand::Variable(name.clone())),
        _ => parse_int(lexemes).map(Operand::Literal),
    }
}

fn parse_int(lexemes: &[Lexeme]) -> Option<i64> {
    match lexemes {
        [Lexeme::IntLiteral(n, _)] => Some(*n),
        [Lexeme::Minus(_), Lexeme::IntLiteral(n, _)] => Some(-*n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn header(src: &str) -> Result<LoopHeader, String> {
        parse_loop_header(&Lexer::new(src).tokenize())
    }

    #[test]
    fn test_counting_loop() {
        let h = header("for (int i = 0; i < n; i++)").unwrap();

        assert_eq!(h.init_variable, "i");
        assert_eq!(h.init_value, 0);
        assert_eq!(h.condition.op, CompareOp::Lt);
        assert_eq!(h.condition.right, Operand::Variable("n".into()));
        assert_eq!(h.increment_variable, "i");
    }

    #[test]
    fn test_negative_start_and_prefix_step() {
        let h = header("for(k=-3;k<=-1;++k)").unwrap();

        assert_eq!(h.init_value, -3);
        assert_eq!(h.condition.right, Operand::Literal(-1));
        assert_eq!(h.increment_variable, "k");
    }

    #[test]
    fn test_rejections() {
        assert!(header("for (i = 0; i < 3; i--)").is_err());
        assert!(header("for (i = start; i < 3; i++)").is_err());
        assert!(header("for (i = 0; i; i++)").is_err());
        assert!(header("for (i = 0; i < 3)").is_err());
        assert!(header("for (;;)").is_err());
    }
}
