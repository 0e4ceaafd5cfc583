// Token definitions for the simulated console

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// One piece of a `cout` chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintPart {
    Literal(String),
    VariableRef(String),
    Newline,
}

/// How a single-variable read consumes its input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// `cin >> x`
    Stream,
    /// `gets(x)` / `getline(cin, x)`
    Line,
    /// `getchar()`
    Char,
}

/// Expected shape of one scanf argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    Integer,
    Float,
    String,
    Char,
}

impl FormatHint {
    /// Map a scanf conversion character to a hint.
    pub fn from_conversion(c: char) -> Option<Self> {
        match c {
            'd' | 'i' | 'u' => Some(FormatHint::Integer),
            'f' => Some(FormatHint::Float),
            's' => Some(FormatHint::String),
            'c' => Some(FormatHint::Char),
            _ => None,
        }
    }
}

impl fmt::Display for FormatHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatHint::Integer => write!(f, "integer"),
            FormatHint::Float => write!(f, "float"),
            FormatHint::String => write!(f, "string"),
            FormatHint::Char => write!(f, "char"),
        }
    }
}

/// Comparison operators allowed in a loop condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CompareOp {
    pub fn apply(self, left: i64, right: i64) -> bool {
        match self {
            CompareOp::Lt => left < right,
            CompareOp::Le => left <= right,
            CompareOp::Gt => left > right,
            CompareOp::Ge => left >= right,
            CompareOp::Eq => left == right,
            CompareOp::Ne => left != right,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
        };
        f.write_str(s)
    }
}

/// A comparison operand: a variable name or an integer literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Variable(String),
    Literal(i64),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Variable(name) => f.write_str(name),
            Operand::Literal(n) => write!(f, "{}", n),
        }
    }
}

/// `left op right`, the only condition form a loop header may carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonExpr {
    pub left: Operand,
    pub op: CompareOp,
    pub right: Operand,
}

impl fmt::Display for ComparisonExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

/// Executable statement kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Print {
        parts: Vec<PrintPart>,
    },
    Read {
        variable: String,
        mode: ReadMode,
    },
    MultiRead {
        variables: Vec<String>,
        hints: Vec<FormatHint>,
    },
    LoopStart {
        init_variable: String,
        init_value: i64,
        condition: ComparisonExpr,
        increment_variable: String,
        /// Index of the paired `LoopEnd`
        end: usize,
    },
    LoopEnd {
        /// Index of the paired `LoopStart`
        start: usize,
    },
}

/// One recognized statement with the location of its first lexeme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    /// Whether executing this token suspends the engine
    pub fn is_read(&self) -> bool {
        matches!(self.kind, TokenKind::Read { .. } | TokenKind::MultiRead { .. })
    }
}

/// A statement inside `main` that the simulator recognized but does not run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedStatement {
    pub location: SourceLocation,
    pub text: String,
    pub reason: &'static str,
}

/// Output of the tokenizer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub tokens: Vec<Token>,
    pub skipped: Vec<SkippedStatement>,
}

impl Program {
    pub fn new() -> Self {
        Program {
            tokens: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when there is nothing to execute
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
