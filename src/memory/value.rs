//! Runtime value representation
//!
//! Programs only ever hold two kinds of value:
//!
//! - [`Value::Int`]: set by a loop initializer, a loop increment, or an
//!   integer `scanf` placeholder
//! - [`Value::Str`]: everything read from input
//!
//! Printing goes through [`Value`]'s `Display`; comparisons go through
//! [`Value::as_number`].

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
}

impl Value {
    /// Numeric view used by loop conditions and increments.
    /// Strings are parsed after trimming; `None` if that fails.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Str(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Str(_) => None,
        }
    }

    /// Short type label for the variables pane
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "str",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}
