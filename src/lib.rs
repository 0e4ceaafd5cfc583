//! # Introduction
//!
//! Sprout runs the small C++ programs beginners write in their first weeks
//! (`cout`, `cin`, `scanf`, counting `for` loops) inside a simulated console.
//! The run pauses whenever the program reads input and continues when the
//! learner types a value, so a front end can drive it one answer at a time.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Block pass → Program (tokens) → ExecutionState ⇄ input → Console
//! ```
//!
//! 1. [`parser`]: lexes the source, pairs braces and recognizes the
//!    statements that have a visible effect.
//! 2. [`interpreter`]: a resumable engine over the token list, suspending at
//!    every read.
//! 3. [`memory`]: the flat variable store and tagged [`memory::Value`]s.
//! 4. [`console`]: the append-only transcript shown to the learner.
//! 5. [`config`]: tokenizer and engine options.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use sprout::{run, tokenize, Config, Status};
//!
//! let program = tokenize(r#"
//!     #include <iostream>
//!     using namespace std;
//!     int main() {
//!         int age;
//!         cout << "How old are you? ";
//!         cin >> age;
//!         cout << "Next year you will be older than " << age << endl;
//!         return 0;
//!     }
//! "#).unwrap();
//!
//! let mut state = run(&program, &Config::default());
//! assert_eq!(state.pending_read().unwrap().prompt(), "enter a value for age");
//!
//! assert_eq!(state.supply_input("9"), Ok(Status::Finished));
//! assert!(state.output().ends_with("older than 9\nProgram finished, exit code 0\n"));
//! ```

pub mod config;
pub mod console;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod ui;

pub use config::{Config, EngineConfig, PrintOrder, TokenizerOptions};
pub use interpreter::{ExecutionState, InputError, PendingRead, Status};
pub use parser::{ast::Program, tokenize, StructuralError, Tokenizer};

/// Start a run and execute it up to the first read or the end.
pub fn run(program: &Program, config: &Config) -> ExecutionState {
    let mut state = ExecutionState::start(program, config.engine.clone());
    state.resume();
    state
}
