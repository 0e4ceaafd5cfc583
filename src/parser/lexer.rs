//! Lexer for beginner C++ source
//!
//! Converts raw source text into a flat [`Lexeme`] stream consumed by the
//! statement recognizers. `#include` and other preprocessor directives are
//! silently skipped, as are `//` and `/* */` comments.
//!
//! Unlike a compiler front end this lexer never fails: text it cannot make
//! sense of becomes a [`Lexeme::Invalid`] and the statement containing it is
//! later skipped. An unterminated string or character literal ends at the end
//! of its line.

use super::ast::SourceLocation;
use std::fmt;

/// All lexeme variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that structural errors can
/// report an accurate line without a separate lexeme→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme {
    // Literals
    IntLiteral(i64, SourceLocation),
    FloatLiteral(String, SourceLocation),
    StringLiteral(String, SourceLocation),
    CharLiteral(String, SourceLocation),

    // Identifiers (keywords included; the recognizers match on text)
    Ident(String, SourceLocation),

    // Stream operators
    LtLt(SourceLocation), // <<
    GtGt(SourceLocation), // >>

    // Comparison
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=

    // Assignment and arithmetic
    Eq(SourceLocation),         // =
    PlusPlus(SourceLocation),   // ++
    MinusMinus(SourceLocation), // --
    Plus(SourceLocation),       // +
    Minus(SourceLocation),      // -
    Amp(SourceLocation),        // &

    // Punctuation
    ColonColon(SourceLocation), // ::
    LParen(SourceLocation),     // (
    RParen(SourceLocation),     // )
    LBrace(SourceLocation),     // {
    RBrace(SourceLocation),     // }
    Semicolon(SourceLocation),  // ;
    Comma(SourceLocation),      // ,

    /// Anything else: operators the simulator ignores, malformed numbers
    Invalid(String, SourceLocation),
}

impl Lexeme {
    /// Returns the source location where this lexeme appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Lexeme::IntLiteral(_, loc)
            | Lexeme::FloatLiteral(_, loc)
            | Lexeme::StringLiteral(_, loc)
            | Lexeme::CharLiteral(_, loc)
            | Lexeme::Ident(_, loc)
            | Lexeme::Invalid(_, loc)
            | Lexeme::LtLt(loc)
            | Lexeme::GtGt(loc)
            | Lexeme::Lt(loc)
            | Lexeme::Le(loc)
            | Lexeme::Gt(loc)
            | Lexeme::Ge(loc)
            | Lexeme::EqEq(loc)
            | Lexeme::NotEq(loc)
            | Lexeme::Eq(loc)
            | Lexeme::PlusPlus(loc)
            | Lexeme::MinusMinus(loc)
            | Lexeme::Plus(loc)
            | Lexeme::Minus(loc)
            | Lexeme::Amp(loc)
            | Lexeme::ColonColon(loc)
            | Lexeme::LParen(loc)
            | Lexeme::RParen(loc)
            | Lexeme::LBrace(loc)
            | Lexeme::RBrace(loc)
            | Lexeme::Semicolon(loc)
            | Lexeme::Comma(loc) => *loc,
        }
    }

    /// True if this is the identifier `name`
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, Lexeme::Ident(s, _) if s == name)
    }

    pub fn ident(&self) -> Option<&str> {
        match self {
            Lexeme::Ident(s, _) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lexeme::IntLiteral(n, _) => write!(f, "{}", n),
            Lexeme::FloatLiteral(s, _) => write!(f, "{}", s),
            Lexeme::StringLiteral(s, _) => write!(f, "\"{}\"", s.escape_default()),
            Lexeme::CharLiteral(s, _) => write!(f, "'{}'", s.escape_default()),
            Lexeme::Ident(s, _) => write!(f, "{}", s),
            Lexeme::Invalid(s, _) => write!(f, "{}", s),
            Lexeme::LtLt(_) => write!(f, "<<"),
            Lexeme::GtGt(_) => write!(f, ">>"),
            Lexeme::Lt(_) => write!(f, "<"),
            Lexeme::Le(_) => write!(f, "<="),
            Lexeme::Gt(_) => write!(f, ">"),
            Lexeme::Ge(_) => write!(f, ">="),
            Lexeme::EqEq(_) => write!(f, "=="),
            Lexeme::NotEq(_) => write!(f, "!="),
            Lexeme::Eq(_) => write!(f, "="),
            Lexeme::PlusPlus(_) => write!(f, "++"),
            Lexeme::MinusMinus(_) => write!(f, "--"),
            Lexeme::Plus(_) => write!(f, "+"),
            Lexeme::Minus(_) => write!(f, "-"),
            Lexeme::Amp(_) => write!(f, "&"),
            Lexeme::ColonColon(_) => write!(f, "::"),
            Lexeme::LParen(_) => write!(f, "("),
            Lexeme::RParen(_) => write!(f, ")"),
            Lexeme::LBrace(_) => write!(f, "{{"),
            Lexeme::RBrace(_) => write!(f, "}}"),
            Lexeme::Semicolon(_) => write!(f, ";"),
            Lexeme::Comma(_) => write!(f, ","),
        }
    }
}

/// Lexer for beginner C++ source
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Lexeme> {
        let mut lexemes = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.is_at_end() {
                break;
            }

            if self.peek() == Some('#') {
                self.skip_preprocessor_directive();
                continue;
            }

            lexemes.push(self.next_lexeme());
        }

        lexemes
    }

    fn next_lexeme(&mut self) -> Lexeme {
        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Lexeme::Invalid(String::new(), loc);
        };

        match ch {
            '"' => self.string_literal(loc),
            '\'' => self.char_literal(loc),
            '0'..='9' => self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier(ch, loc),

            '<' => {
                if self.match_char('<') {
                    Lexeme::LtLt(loc)
                } else if self.match_char('=') {
                    Lexeme::Le(loc)
                } else {
                    Lexeme::Lt(loc)
                }
            }
            '>' => {
                if self.match_char('>') {
                    Lexeme::GtGt(loc)
                } else if self.match_char('=') {
                    Lexeme::Ge(loc)
                } else {
                    Lexeme::Gt(loc)
                }
            }
            '=' => {
                if self.match_char('=') {
                    Lexeme::EqEq(loc)
                } else {
                    Lexeme::Eq(loc)
                }
            }
            '!' => {
                if self.match_char('=') {
                    Lexeme::NotEq(loc)
                } else {
                    Lexeme::Invalid("!".to_string(), loc)
                }
            }
            '+' => {
                if self.match_char('+') {
                    Lexeme::PlusPlus(loc)
                } else {
                    Lexeme::Plus(loc)
                }
            }
            '-' => {
                if self.match_char('-') {
                    Lexeme::MinusMinus(loc)
                } else {
                    Lexeme::Minus(loc)
                }
            }
            ':' => {
                if self.match_char(':') {
                    Lexeme::ColonColon(loc)
                } else {
                    Lexeme::Invalid(":".to_string(), loc)
                }
            }
            '&' => Lexeme::Amp(loc),
            '(' => Lexeme::LParen(loc),
            ')' => Lexeme::RParen(loc),
            '{' => Lexeme::LBrace(loc),
            '}' => Lexeme::RBrace(loc),
            ';' => Lexeme::Semicolon(loc),
            ',' => Lexeme::Comma(loc),

            other => Lexeme::Invalid(other.to_string(), loc),
        }
    }

    /// Read the body of a quoted literal up to `quote` or the end of the line
    fn quoted_body(&mut self, quote: char) -> String {
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if ch == quote {
                self.advance();
                return text;
            }
            if ch == '\n' {
                break;
            }

            self.advance();
            if ch == '\\' {
                match self.peek() {
                    Some('\n') | None => break,
                    Some(escaped) => {
                        self.advance();
                        text.push(match escaped {
                            'n' => '\n',
                            't' => '\t',
                            'r' => '\r',
                            '0' => '\0',
                            other => other,
                        });
                    }
                }
            } else {
                text.push(ch);
            }
        }

        tracing::debug!(line = self.line, "unterminated literal closed at end of line");
        text
    }

    fn string_literal(&mut self, loc: SourceLocation) -> Lexeme {
        Lexeme::StringLiteral(self.quoted_body('"'), loc)
    }

    fn char_literal(&mut self, loc: SourceLocation) -> Lexeme {
        Lexeme::CharLiteral(self.quoted_body('\''), loc)
    }

    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Lexeme {
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.take_digits(&mut num_str);

        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            num_str.push('.');
            self.advance();
            self.take_digits(&mut num_str);
            return Lexeme::FloatLiteral(num_str, loc);
        }

        match num_str.parse::<i64>() {
            Ok(value) => Lexeme::IntLiteral(value, loc),
            Err(_) => Lexeme::Invalid(num_str, loc),
        }
    }

    fn take_digits(&mut self, into: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                into.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn identifier(&mut self, first_char: char, loc: SourceLocation) -> Lexeme {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Lexeme::Ident(ident, loc)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => self.skip_line_comment(),
                Some('/') if self.peek_ahead(1) == Some('*') => self.skip_block_comment(),
                _ => break,
            }
        }
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip multi-line comment (/* ... */); an unterminated one runs to the end
    fn skip_block_comment(&mut self) {
        self.advance();
        self.advance();

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }
    }

    /// Skip preprocessor directive (#include, etc.)
    fn skip_preprocessor_directive(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<Lexeme> {
        Lexer::new(src).tokenize()
    }

    #[test]
    fn test_cout_chain() {
        let lexemes = lex(r#"cout << "Hi" << x << endl;"#);

        assert!(lexemes[0].is_ident("cout"));
        assert!(matches!(lexemes[1], Lexeme::LtLt(_)));
        assert!(matches!(lexemes[2], Lexeme::StringLiteral(ref s, _) if s == "Hi"));
        assert!(matches!(lexemes[3], Lexeme::LtLt(_)));
        assert!(lexemes[4].is_ident("x"));
        assert!(matches!(lexemes[5], Lexeme::LtLt(_)));
        assert!(lexemes[6].is_ident("endl"));
        assert!(matches!(lexemes[7], Lexeme::Semicolon(_)));
        assert_eq!(lexemes.len(), 8);
    }

    #[test]
    fn test_operators() {
        let lexemes = lex("<< >> <= >= == != ++ :: < >");

        assert!(matches!(lexemes[0], Lexeme::LtLt(_)));
        assert!(matches!(lexemes[1], Lexeme::GtGt(_)));
        assert!(matches!(lexemes[2], Lexeme::Le(_)));
        assert!(matches!(lexemes[3], Lexeme::Ge(_)));
        assert!(matches!(lexemes[4], Lexeme::EqEq(_)));
        assert!(matches!(lexemes[5], Lexeme::NotEq(_)));
        assert!(matches!(lexemes[6], Lexeme::PlusPlus(_)));
        assert!(matches!(lexemes[7], Lexeme::ColonColon(_)));
        assert!(matches!(lexemes[8], Lexeme::Lt(_)));
        assert!(matches!(lexemes[9], Lexeme::Gt(_)));
    }

    #[test]
    fn test_comments_and_directives() {
        let lexemes = lex("#include <iostream>\nint x; // note\n/* a\nb */ cin >> x;");

        assert!(lexemes[0].is_ident("int"));
        assert!(lexemes[1].is_ident("x"));
        assert!(matches!(lexemes[2], Lexeme::Semicolon(_)));
        assert!(lexemes[3].is_ident("cin"));
        assert_eq!(lexemes[3].location().line, 4);
    }

    #[test]
    fn test_string_escapes_and_single_quotes() {
        let lexemes = lex(r#""a\nb" 'c'"#);

        assert!(matches!(lexemes[0], Lexeme::StringLiteral(ref s, _) if s == "a\nb"));
        assert!(matches!(lexemes[1], Lexeme::CharLiteral(ref s, _) if s == "c"));
    }

    #[test]
    fn test_unterminated_string_stops_at_line_end() {
        let lexemes = lex("cout << \"oops;\ncin >> x;");

        assert!(matches!(lexemes[2], Lexeme::StringLiteral(ref s, _) if s == "oops;"));
        assert!(lexemes[3].is_ident("cin"));
        assert_eq!(lexemes[3].location().line, 2);
    }

    #[test]
    fn test_numbers() {
        let lexemes = lex("42 3.14 99999999999999999999");

        assert!(matches!(lexemes[0], Lexeme::IntLiteral(42, _)));
        assert!(matches!(lexemes[1], Lexeme::FloatLiteral(ref s, _) if s == "3.14"));
        assert!(matches!(lexemes[2], Lexeme::Invalid(_, _)));
    }

    #[test]
    fn test_locations_are_one_based() {
        let lexemes = lex("  for");
        assert_eq!(lexemes[0].location(), SourceLocation::new(1, 3));
    }
}
