// Execution engine for the simulated console

use crate::config::EngineConfig;
use crate::console::Console;
use crate::interpreter::errors::{InputError, RuntimeError};
use crate::memory::VariableStore;
use crate::parser::ast::{ComparisonExpr, FormatHint, Program, ReadMode, SourceLocation, Token, TokenKind};
use crate::parser::statements::GETCHAR_SLOT;
use std::fmt;
use tracing::{debug, info, warn};

/// Where a run stands after `resume` or `supply_input`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// All tokens executed
    Finished,
    /// Suspended at a read; call `supply_input`
    AwaitingInput,
    /// Stopped by a runtime fault; the diagnostic is on the console
    Halted,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Finished => write!(f, "FINISHED"),
            Status::AwaitingInput => write!(f, "INPUT"),
            Status::Halted => write!(f, "HALTED"),
        }
    }
}

/// The read the engine is suspended on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRead {
    /// `cin >> x`, `gets(x)`, `getchar()`
    Single { variable: String, mode: ReadMode },
    /// `scanf`; after a partial answer only the unfilled variables remain
    Multi {
        variables: Vec<String>,
        hints: Vec<FormatHint>,
    },
}

impl PendingRead {
    pub fn variables(&self) -> Vec<&str> {
        match self {
            PendingRead::Single { variable, .. } => vec![variable.as_str()],
            PendingRead::Multi { variables, .. } => variables.iter().map(String::as_str).collect(),
        }
    }

    /// Text shown next to the input box
    pub fn prompt(&self) -> String {
        match self {
            PendingRead::Single { variable, mode } => match mode {
                ReadMode::Stream => format!("enter a value for {}", variable),
                ReadMode::Line => format!("enter a line for {}", variable),
                ReadMode::Char if variable == GETCHAR_SLOT => "enter a character".to_string(),
                ReadMode::Char => format!("enter a character for {}", variable),
            },
            PendingRead::Multi { variables, hints } => {
                let hints: Vec<String> = hints.iter().map(ToString::to_string).collect();
                format!("enter {} ({})", variables.join(", "), hints.join(" "))
            }
        }
    }
}

/// Bookkeeping for one active `for` loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopFrame {
    /// Index of the `LoopStart` token
    pub start_index: usize,
    pub body_start: usize,
    pub condition: ComparisonExpr,
    pub increment_variable: String,
}

/// One run of a program
///
/// Built by [`ExecutionState::start`] and advanced by [`ExecutionState::resume`]
/// and [`ExecutionState::supply_input`]. Nothing is shared between states, so
/// any number of runs of the same program can coexist.
#[derive(Debug, Clone)]
pub struct ExecutionState {
    pub(crate) tokens: Vec<Token>,
    pub(crate) pc: usize,
    pub(crate) variables: VariableStore,
    pub(crate) console: Console,
    pub(crate) loop_stack: Vec<LoopFrame>,
    running: bool,
    halted: bool,
    pending_read: Option<PendingRead>,
    pub(crate) config: EngineConfig,
    current_location: SourceLocation,
    /// Tokens executed by the current `resume` call
    steps: usize,
}

impl ExecutionState {
    /// Fresh state positioned before the first token. Nothing runs until
    /// [`resume`](Self::resume) is called.
    pub fn start(program: &Program, config: EngineConfig) -> Self {
        let current_location = program
            .tokens
            .first()
            .map(|t| t.location)
            .unwrap_or_default();

        info!(tokens = program.len(), "starting run");

        ExecutionState {
            tokens: program.tokens.clone(),
            pc: 0,
            variables: VariableStore::new(),
            console: Console::new(),
            loop_stack: Vec::new(),
            running: true,
            halted: false,
            pending_read: None,
            config,
            current_location,
            steps: 0,
        }
    }

    /// Run until the program ends, faults or reaches a read.
    ///
    /// Calling this on a finished or suspended state changes nothing and
    /// returns the current status.
    pub fn resume(&mut self) -> Status {
        if !self.running {
            return self.stopped_status();
        }
        if self.pending_read.is_some() {
            return Status::AwaitingInput;
        }

        self.steps = 0;
        match self.run_until_blocked() {
            Ok(status) => status,
            Err(err) => self.halt(err),
        }
    }

    /// Answer the pending read, then resume.
    ///
    /// The value is trimmed and echoed to the console before assignment.
    pub fn supply_input(&mut self, raw: &str) -> Result<Status, InputError> {
        let pending = self.pending_read.take().ok_or(InputError::NotAwaitingInput)?;
        let value = raw.trim();
        debug!(value, "input supplied");
        self.console.echo(value);

        match pending {
            PendingRead::Single { variable, mode } => self.assign_read(&variable, mode, value),
            PendingRead::Multi { variables, hints } => {
                if let Some(rest) = self.assign_scanned(variables, hints, value) {
                    debug!(remaining = ?rest.variables(), "partial scanf answer");
                    self.pending_read = Some(rest);
                    return Ok(Status::AwaitingInput);
                }
            }
        }

        self.pc += 1;
        Ok(self.resume())
    }

    fn run_until_blocked(&mut self) -> Result<Status, RuntimeError> {
        while let Some(token) = self.tokens.get(self.pc).cloned() {
            self.current_location = token.location;

            if let Some(pending) = Self::pending_for(&token.kind) {
                debug!(line = token.location.line, prompt = %pending.prompt(), "awaiting input");
                self.pending_read = Some(pending);
                return Ok(Status::AwaitingInput);
            }

            self.count_step()?;
            self.execute_token(token)?;
        }

        self.finish();
        Ok(Status::Finished)
    }

    fn pending_for(kind: &TokenKind) -> Option<PendingRead> {
        match kind {
            TokenKind::Read { variable, mode } => Some(PendingRead::Single {
                variable: variable.clone(),
                mode: *mode,
            }),
            TokenKind::MultiRead { variables, hints } => Some(PendingRead::Multi {
                variables: variables.clone(),
                hints: hints.clone(),
            }),
            _ => None,
        }
    }

    fn execute_token(&mut self, token: Token) -> Result<(), RuntimeError> {
        debug!(pc = self.pc, line = token.location.line, "execute {:?}", token.kind);

        match token.kind {
            TokenKind::Print { parts } => {
                self.execute_print(&parts, token.location);
                self.pc += 1;
                Ok(())
            }
            TokenKind::LoopStart {
                init_variable,
                init_value,
                condition,
                increment_variable,
                end,
            } => {
                self.execute_loop_start(init_variable, init_value, condition, increment_variable, end);
                Ok(())
            }
            TokenKind::LoopEnd { start } => self.execute_loop_end(start, token.location),
            // Reads never get here, they suspend in `run_until_blocked`
            TokenKind::Read { .. } | TokenKind::MultiRead { .. } => Ok(()),
        }
    }

    fn count_step(&mut self) -> Result<(), RuntimeError> {
        self.steps += 1;
        match self.config.max_steps {
            Some(limit) if self.steps > limit => Err(RuntimeError::StepLimitExceeded {
                limit,
                location: self.current_location,
            }),
            _ => Ok(()),
        }
    }

    fn finish(&mut self) {
        self.running = false;
        self.loop_stack.clear();

        let message = if self.console.has_program_output() {
            crate::interpreter::constants::FINISHED_MESSAGE
        } else {
            crate::interpreter::constants::FINISHED_NO_OUTPUT_MESSAGE
        };
        self.console.system(message);
        info!("run finished");
    }

    fn halt(&mut self, err: RuntimeError) -> Status {
        warn!(error = %err, "run halted");
        self.running = false;
        self.halted = true;
        self.pending_read = None;
        self.loop_stack.clear();
        self.console.system(&err.diagnostic());
        Status::Halted
    }

    fn stopped_status(&self) -> Status {
        if self.halted {
            Status::Halted
        } else {
            Status::Finished
        }
    }

    // Accessors for the front ends

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.pending_read.is_some()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// `None` while the run is still going and not waiting for input
    pub fn status(&self) -> Option<Status> {
        if self.pending_read.is_some() {
            Some(Status::AwaitingInput)
        } else if self.running {
            None
        } else {
            Some(self.stopped_status())
        }
    }

    pub fn pending_read(&self) -> Option<&PendingRead> {
        self.pending_read.as_ref()
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Full console transcript
    pub fn output(&self) -> String {
        self.console.text()
    }

    /// Location of the token last executed or awaited
    pub fn current_location(&self) -> SourceLocation {
        self.current_location
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn loop_stack(&self) -> &[LoopFrame] {
        &self.loop_stack
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Value;
    use crate::parser::ast::{CompareOp, Operand, PrintPart};

    fn loc(line: usize) -> SourceLocation {
        SourceLocation::new(line, 5)
    }

    fn program(kinds: Vec<TokenKind>) -> Program {
        let mut program = Program::new();
        for (i, kind) in kinds.into_iter().enumerate() {
            program.tokens.push(Token::new(kind, loc(i + 2)));
        }
        program
    }

    fn print_var(name: &str) -> TokenKind {
        TokenKind::Print {
            parts: vec![PrintPart::VariableRef(name.into()), PrintPart::Newline],
        }
    }

    #[test]
    fn test_start_does_not_execute() {
        let state = ExecutionState::start(&program(vec![print_var("x")]), EngineConfig::default());

        assert!(state.is_running());
        assert_eq!(state.pc(), 0);
        assert!(state.console().is_empty());
        assert_eq!(state.status(), None);
    }

    #[test]
    fn test_read_then_print() {
        let prog = program(vec![
            TokenKind::Read {
                variable: "x".into(),
                mode: ReadMode::Stream,
            },
            print_var("x"),
        ]);
        let mut state = ExecutionState::start(&prog, EngineConfig::default());

        assert_eq!(state.resume(), Status::AwaitingInput);
        assert_eq!(state.pending_read().map(PendingRead::variables), Some(vec!["x"]));
        assert_eq!(state.current_location().line, 2);

        // Resuming while suspended is a no-op
        assert_eq!(state.resume(), Status::AwaitingInput);
        assert_eq!(state.pc(), 0);

        assert_eq!(state.supply_input("  5 "), Ok(Status::Finished));
        assert_eq!(state.console().program_text(), "5\n5\n");
        assert_eq!(state.variables().get("x"), Some(&Value::from("5")));
        assert!(!state.is_running());
        assert!(state.pending_read().is_none());
    }

    #[test]
    fn test_input_when_not_waiting() {
        let mut state = ExecutionState::start(&program(vec![]), EngineConfig::default());
        assert_eq!(state.supply_input("1"), Err(InputError::NotAwaitingInput));

        assert_eq!(state.resume(), Status::Finished);
        assert_eq!(state.supply_input("1"), Err(InputError::NotAwaitingInput));
        assert_eq!(state.output(), "Program finished with no output\n");
    }

    #[test]
    fn test_prompts() {
        let single = |mode| PendingRead::Single {
            variable: "x".into(),
            mode,
        };
        assert_eq!(single(ReadMode::Stream).prompt(), "enter a value for x");
        assert_eq!(single(ReadMode::Line).prompt(), "enter a line for x");
        assert_eq!(
            PendingRead::Single {
                variable: GETCHAR_SLOT.into(),
                mode: ReadMode::Char
            }
            .prompt(),
            "enter a character"
        );
        let multi = PendingRead::Multi {
            variables: vec!["n".into(), "m".into()],
            hints: vec![FormatHint::Integer, FormatHint::Integer],
        };
        assert_eq!(multi.prompt(), "enter n, m (integer integer)");
    }

    #[test]
    fn test_step_guard_halts() {
        let prog = program(vec![
            TokenKind::LoopStart {
                init_variable: "i".into(),
                init_value: 0,
                condition: ComparisonExpr {
                    left: Operand::Variable("i".into()),
                    op: CompareOp::Ge,
                    right: Operand::Literal(0),
                },
                increment_variable: "i".into(),
                end: 1,
            },
            TokenKind::LoopEnd { start: 0 },
        ]);
        let config = EngineConfig {
            max_steps: Some(50),
            ..EngineConfig::default()
        };
        let mut state = ExecutionState::start(&prog, config);

        assert_eq!(state.resume(), Status::Halted);
        assert!(state.is_halted());
        assert!(state.loop_stack().is_empty());
        assert!(state.output().contains("too many steps (50)"));
        assert_eq!(state.resume(), Status::Halted);
    }
}
