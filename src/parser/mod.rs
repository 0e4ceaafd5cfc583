//! Source tokenizer
//!
//! This module turns beginner C++ source text into a [`ast::Program`]:
//! - [`lexer`]: Lexing (source text → lexemes)
//! - [`parse`]: Block-structure pass and the [`parse::Tokenizer`] entry point
//! - [`statements`]: Recognizers for `cout`, `cin`, `scanf`, `gets`, `getchar`
//! - `loops`: `for` header parsing
//! - [`ast`]: Token and program definitions
//!
//! # Supported subset
//!
//! Inside `int main()` the tokenizer recognizes print chains, reads and
//! counting `for` loops. Declarations, assignments and other control flow
//! produce no tokens; the ones with a visible effect in real C++ are listed
//! in [`ast::Program::skipped`] so front ends can point them out.
//!
//! Structural problems (no `main`, unbalanced braces, malformed loop headers)
//! are the only failures; see [`parse::StructuralError`].

pub mod ast;
pub mod lexer;
mod loops;
pub mod parse;
pub mod statements;

pub use parse::{tokenize, StructuralError, Tokenizer};
