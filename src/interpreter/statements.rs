//! Print and input statement execution
//!
//! `impl ExecutionState` methods for rendering a print token and for storing
//! the answer to a pending read.

use crate::interpreter::engine::{ExecutionState, PendingRead};
use crate::memory::Value;
use crate::parser::ast::{FormatHint, PrintPart, ReadMode, SourceLocation};
use tracing::debug;

impl ExecutionState {
    pub(crate) fn execute_print(&mut self, parts: &[PrintPart], location: SourceLocation) {
        let text = self.render_print(parts);
        self.console.print(text, location);
    }

    /// Literal text and current variable values in part order. Output that
    /// does not end in a newline gets one trailing space so consecutive
    /// prints never run together.
    pub(crate) fn render_print(&self, parts: &[PrintPart]) -> String {
        let mut out = String::new();
        for part in parts {
            match part {
                PrintPart::Literal(text) => out.push_str(text),
                PrintPart::VariableRef(name) => match self.variables.get(name) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => out.push_str(&self.config.undefined_marker),
                },
                PrintPart::Newline => out.push('\n'),
            }
        }

        if !matches!(parts.last(), Some(PrintPart::Newline)) {
            out.push(' ');
        }
        out
    }

    pub(crate) fn assign_read(&mut self, variable: &str, mode: ReadMode, value: &str) {
        let stored = match mode {
            ReadMode::Stream | ReadMode::Line => value.to_string(),
            ReadMode::Char => first_char(value),
        };
        self.variables.set(variable, Value::Str(stored));
    }

    /// Assign whitespace- or comma-separated pieces to `variables` in order.
    ///
    /// Returns the read that is still pending when the answer had fewer
    /// pieces than variables.
    pub(crate) fn assign_scanned(
        &mut self,
        variables: Vec<String>,
        hints: Vec<FormatHint>,
        value: &str,
    ) -> Option<PendingRead> {
        let pieces: Vec<&str> = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .collect();

        if pieces.len() > variables.len() {
            debug!(extra = pieces.len() - variables.len(), "ignoring extra scanf values");
        }

        let filled = pieces.len().min(variables.len());
        for ((name, hint), piece) in variables.iter().zip(&hints).zip(&pieces) {
            self.variables.set(name, scanned_value(*hint, piece));
        }

        if filled == variables.len() {
            return None;
        }
        Some(PendingRead::Multi {
            variables: variables[filled..].to_vec(),
            hints: hints[filled..].to_vec(),
        })
    }
}

fn scanned_value(hint: FormatHint, piece: &str) -> Value {
    match hint {
        FormatHint::Integer => piece
            .parse::<i64>()
            .map(Value::Int)
            .unwrap_or_else(|_| Value::from(piece)),
        FormatHint::Char => Value::Str(first_char(piece)),
        FormatHint::Float | FormatHint::String => Value::from(piece),
    }
}

fn first_char(value: &str) -> String {
    value.chars().next().map(String::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::interpreter::engine::{ExecutionState, PendingRead, Status};
    use crate::memory::Value;
    use crate::parser::ast::*;

    fn state(kinds: Vec<TokenKind>, config: EngineConfig) -> ExecutionState {
        let mut program = Program::new();
        for kind in kinds {
            program.tokens.push(Token::new(kind, SourceLocation::new(2, 5)));
        }
        ExecutionState::start(&program, config)
    }

    fn scanf(vars: &[&str], hints: &[FormatHint]) -> TokenKind {
        TokenKind::MultiRead {
            variables: vars.iter().map(|v| v.to_string()).collect(),
            hints: hints.to_vec(),
        }
    }

    #[test]
    fn test_render_print_spacing() {
        let mut s = state(vec![], EngineConfig::default());
        s.variables.set("x", Value::Int(4));

        let parts = vec![PrintPart::Literal("x = ".into()), PrintPart::VariableRef("x".into())];
        assert_eq!(s.render_print(&parts), "x = 4 ");

        let parts = vec![PrintPart::Literal("hi".into()), PrintPart::Newline];
        assert_eq!(s.render_print(&parts), "hi\n");
    }

    #[test]
    fn test_custom_undefined_marker() {
        let config = EngineConfig {
            undefined_marker: "??".into(),
            ..EngineConfig::default()
        };
        let s = state(vec![], config);
        let parts = vec![PrintPart::VariableRef("y".into()), PrintPart::Newline];
        assert_eq!(s.render_print(&parts), "??\n");
    }

    #[test]
    fn test_scanf_both_values() {
        let mut s = state(
            vec![scanf(&["a", "b"], &[FormatHint::Integer, FormatHint::Integer])],
            EngineConfig::default(),
        );
        s.resume();

        assert_eq!(s.supply_input("3, 4"), Ok(Status::Finished));
        assert_eq!(s.variables().get("a"), Some(&Value::Int(3)));
        assert_eq!(s.variables().get("b"), Some(&Value::Int(4)));
    }

    #[test]
    fn test_scanf_partial_answer() {
        let mut s = state(
            vec![scanf(&["a", "c"], &[FormatHint::Integer, FormatHint::Char])],
            EngineConfig::default(),
        );
        s.resume();

        assert_eq!(s.supply_input("3"), Ok(Status::AwaitingInput));
        assert_eq!(
            s.pending_read(),
            Some(&PendingRead::Multi {
                variables: vec!["c".into()],
                hints: vec![FormatHint::Char],
            })
        );

        assert_eq!(s.supply_input("yes"), Ok(Status::Finished));
        assert_eq!(s.variables().get("c"), Some(&Value::from("y")));
        assert_eq!(s.console().program_text(), "3\nyes\n");
    }

    #[test]
    fn test_scanf_integer_hint_keeps_bad_text() {
        let mut s = state(
            vec![scanf(&["n", "f"], &[FormatHint::Integer, FormatHint::Float])],
            EngineConfig::default(),
        );
        s.resume();
        s.supply_input("ten 2.5 extra").unwrap();

        assert_eq!(s.variables().get("n"), Some(&Value::from("ten")));
        assert_eq!(s.variables().get("f"), Some(&Value::from("2.5")));
    }

    #[test]
    fn test_char_read() {
        let mut s = state(
            vec![TokenKind::Read {
                variable: "c".into(),
                mode: ReadMode::Char,
            }],
            EngineConfig::default(),
        );
        s.resume();
        s.supply_input("  xyz").unwrap();
        assert_eq!(s.variables().get("c"), Some(&Value::from("x")));
    }

    #[test]
    fn test_line_read_keeps_spaces() {
        let mut s = state(
            vec![TokenKind::Read {
                variable: "name".into(),
                mode: ReadMode::Line,
            }],
            EngineConfig::default(),
        );
        s.resume();
        s.supply_input(" Ada  Lovelace \n").unwrap();
        assert_eq!(s.variables().get("name"), Some(&Value::from("Ada  Lovelace")));
    }
}
