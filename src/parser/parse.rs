//! Tokenizer coordinator
//!
//! This module provides the [`Tokenizer`] and the block-structure pass that
//! turns the lexeme stream into a [`Program`].
//!
//! # Block structure
//!
//! Lexemes are cut into statement chunks at `;` (outside parentheses), `{`
//! and `}`. A chunk closed by `{` is a block header: `int main()` opens the
//! entry block, `for (...)` opens a loop block and emits a `LoopStart`, and
//! anything else opens a plain block. Every `}` closes exactly the innermost
//! open block, so each `LoopEnd` is paired with its `LoopStart` by depth and
//! both carry the other's index.
//!
//! Only chunks inside the entry block produce tokens.

use crate::config::TokenizerOptions;
use crate::parser::ast::*;
use crate::parser::lexer::{Lexeme, Lexer};
use crate::parser::loops::parse_loop_header;
use crate::parser::statements::{recognize, Recognized};
use thiserror::Error;

/// Structural problems that stop a program from running at all
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StructuralError {
    #[error("the program needs an `int main()` function")]
    MissingEntryPoint,

    #[error("line {line}: `int main()` is defined again (first defined on line {first_line})")]
    DuplicateEntryPoint { line: usize, first_line: usize },

    #[error("line {line}: this `}}` has no matching `{{`")]
    UnmatchedClosingBrace { line: usize },

    #[error("line {line}: this `{{` is never closed")]
    UnclosedBlock { line: usize },

    #[error("line {line}: malformed for-loop: {reason}")]
    MalformedLoopHeader { line: usize, reason: String },

    #[error("line {line}: the for-loop body must be wrapped in `{{ }}`")]
    LoopWithoutBody { line: usize },
}

impl StructuralError {
    /// The offending 1-based line, if the error points at one
    pub fn line(&self) -> Option<usize> {
        match self {
            StructuralError::MissingEntryPoint => None,
            StructuralError::DuplicateEntryPoint { line, .. }
            | StructuralError::UnmatchedClosingBrace { line }
            | StructuralError::UnclosedBlock { line }
            | StructuralError::MalformedLoopHeader { line, .. }
            | StructuralError::LoopWithoutBody { line } => Some(*line),
        }
    }

    /// Format the error together with the surrounding source lines.
    ///
    /// The offending line is marked with `>` and underlined with carets; two
    /// lines of context are shown on either side.
    pub fn render(&self, source: &str) -> String {
        let mut out = format!("error: {}\n", self);

        let Some(line) = self.line() else {
            return out;
        };

        let lines: Vec<&str> = source.lines().collect();
        if line == 0 || line > lines.len() {
            return out;
        }

        let first = line.saturating_sub(2).max(1);
        let last = (line + 2).min(lines.len());
        let width = last.to_string().len();

        for n in first..=last {
            let text = lines[n - 1];
            let marker = if n == line { '>' } else { ' ' };
            out.push_str(&format!("{} {:>width$} | {}\n", marker, n, text, width = width));

            if n == line {
                let indent = text.len() - text.trim_start().len();
                let carets = text.trim().chars().count().max(1);
                out.push_str(&format!(
                    "  {:>width$} | {}{}\n",
                    "",
                    " ".repeat(indent),
                    "^".repeat(carets),
                    width = width
                ));
            }
        }

        out
    }
}

/// Tokenize with default options.
pub fn tokenize(source: &str) -> Result<Program, StructuralError> {
    Tokenizer::default().tokenize(source)
}

/// Converts source text into an executable [`Program`]
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    options: TokenizerOptions,
}

impl Tokenizer {
    pub fn new(options: TokenizerOptions) -> Self {
        Self { options }
    }

    /// Run the lexer and the block-structure pass over `source`
    pub fn tokenize(&self, source: &str) -> Result<Program, StructuralError> {
        let lexemes = Lexer::new(source).tokenize();
        let mut pass = BlockPass::new(source, &self.options);

        for lexeme in lexemes {
            pass.feed(lexeme)?;
        }

        let program = pass.finish()?;
        tracing::debug!(
            tokens = program.tokens.len(),
            skipped = program.skipped.len(),
            "tokenized program"
        );
        Ok(program)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Entry,
    Loop { start: usize },
    Plain,
}

#[derive(Debug)]
struct Block {
    kind: BlockKind,
    location: SourceLocation,
}

struct BlockPass<'a> {
    source_lines: Vec<&'a str>,
    options: &'a TokenizerOptions,
    program: Program,
    blocks: Vec<Block>,
    chunk: Vec<Lexeme>,
    paren_depth: usize,
    entry_line: Option<usize>,
}

impl<'a> BlockPass<'a> {
    fn new(source: &'a str, options: &'a TokenizerOptions) -> Self {
        Self {
            source_lines: source.lines().collect(),
            options,
            program: Program::new(),
            blocks: Vec::new(),
            chunk: Vec::new(),
            paren_depth: 0,
            entry_line: None,
        }
    }

    fn feed(&mut self, lexeme: Lexeme) -> Result<(), StructuralError> {
        match lexeme {
            Lexeme::LParen(_) => {
                self.paren_depth += 1;
                self.chunk.push(lexeme);
            }
            Lexeme::RParen(_) => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                self.chunk.push(lexeme);
            }
            Lexeme::Semicolon(_) if self.paren_depth == 0 => self.finish_statement()?,
            Lexeme::LBrace(loc) => {
                self.paren_depth = 0;
                self.open_block(loc)?;
            }
            Lexeme::RBrace(loc) => {
                self.paren_depth = 0;
                self.close_block(loc)?;
            }
            other => self.chunk.push(other),
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Program, StructuralError> {
        self.finish_statement()?;

        if let Some(block) = self.blocks.last() {
            return Err(StructuralError::UnclosedBlock {
                line: block.location.line,
            });
        }
        if self.entry_line.is_none() {
            return Err(StructuralError::MissingEntryPoint);
        }

        Ok(self.program)
    }

    fn in_entry(&self) -> bool {
        self.blocks.iter().any(|b| b.kind == BlockKind::Entry)
    }

    fn open_block(&mut self, brace: SourceLocation) -> Result<(), StructuralError> {
        let chunk = std::mem::take(&mut self.chunk);
        let header_loc = chunk.first().map(Lexeme::location).unwrap_or(brace);

        let kind = if is_entry_header(&chunk) {
            if let Some(first_line) = self.entry_line {
                return Err(StructuralError::DuplicateEntryPoint {
                    line: header_loc.line,
                    first_line,
                });
            }
            self.entry_line = Some(header_loc.line);
            BlockKind::Entry
        } else if chunk.first().is_some_and(|l| l.is_ident("for")) && self.in_entry() {
            let header = parse_loop_header(&chunk).map_err(|reason| {
                StructuralError::MalformedLoopHeader {
                    line: header_loc.line,
                    reason,
                }
            })?;
            let start = self.program.tokens.len();
            self.program.tokens.push(Token::new(
                TokenKind::LoopStart {
                    init_variable: header.init_variable,
                    init_value: header.init_value,
                    condition: header.condition,
                    increment_variable: header.increment_variable,
                    end: start,
                },
                header_loc,
            ));
            BlockKind::Loop { start }
        } else {
            if !chunk.is_empty() && self.in_entry() {
                self.skip(&chunk, "only counting for-loops are simulated; this block runs once");
            }
            BlockKind::Plain
        };

        self.blocks.push(Block {
            kind,
            location: brace,
        });
        Ok(())
    }

    fn close_block(&mut self, brace: SourceLocation) -> Result<(), StructuralError> {
        self.finish_statement()?;

        let block = self
            .blocks
            .pop()
            .ok_or(StructuralError::UnmatchedClosingBrace { line: brace.line })?;

        if let BlockKind::Loop { start } = block.kind {
            let end = self.program.tokens.len();
            if let TokenKind::LoopStart { end: pair, .. } = &mut self.program.tokens[start].kind {
                *pair = end;
            }
            self.program
                .tokens
                .push(Token::new(TokenKind::LoopEnd { start }, brace));
        }
        Ok(())
    }

    fn finish_statement(&mut self) -> Result<(), StructuralError> {
        let chunk = std::mem::take(&mut self.chunk);
        let Some(first) = chunk.first() else {
            return Ok(());
        };
        if !self.in_entry() {
            return Ok(());
        }

        let location = first.location();
        if first.is_ident("for") {
            return Err(StructuralError::LoopWithoutBody {
                line: location.line,
            });
        }

        match recognize(&chunk, self.options.print_order) {
            Recognized::Tokens(kinds) => {
                for kind in kinds {
                    tracing::trace!(line = location.line, ?kind, "token");
                    self.program.tokens.push(Token::new(kind, location));
                }
            }
            Recognized::Silent => {}
            Recognized::Skipped(reason) => self.skip(&chunk, reason),
        }
        Ok(())
    }

    fn skip(&mut self, chunk: &[Lexeme], reason: &'static str) {
        let Some(first) = chunk.first() else {
            return;
        };
        let location = first.location();
        let text = self
            .source_lines
            .get(location.line - 1)
            .map(|l| l.trim().to_string())
            .unwrap_or_default();

        tracing::debug!(line = location.line, reason, "statement skipped");
        self.program.skipped.push(SkippedStatement {
            location,
            text,
            reason,
        });
    }
}

/// `int main()` or `int main(void)`
fn is_entry_header(chunk: &[Lexeme]) -> bool {
    match chunk {
        [ret, name, Lexeme::LParen(_), Lexeme::RParen(_)] => {
            ret.is_ident("int") && name.is_ident("main")
        }
        [ret, name, Lexeme::LParen(_), param, Lexeme::RParen(_)] => {
            ret.is_ident("int") && name.is_ident("main") && param.is_ident("void")
        }
        _ => false,
    }
}
