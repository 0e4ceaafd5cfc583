//! Statement recognizers
//!
//! Each statement chunk (the lexemes between two `;`, `{` or `}`) inside
//! `main` is matched against the handful of forms the simulator runs:
//!
//! ```text
//! print  ::= cout ("<<" operand)+
//! read   ::= cin (">>" ident)+
//! scanf  ::= scanf "(" string ("," ["&"] ident)* ")"
//! line   ::= gets "(" ident ")" | getline "(" cin "," ident ")"
//! char   ::= [type] ident "=" getchar "(" ")" | getchar "(" ")"
//! ```
//!
//! `std::` prefixes are dropped before matching. Everything else is either
//! silent (declarations, `return`, `using`) or reported as skipped.

use crate::config::PrintOrder;
use crate::parser::ast::{FormatHint, PrintPart, ReadMode, TokenKind};
use crate::parser::lexer::Lexeme;

/// Variable that receives the character read by a bare `getchar()`
pub const GETCHAR_SLOT: &str = "_getchar_";

const TYPE_NAMES: &[&str] = &[
    "int", "char", "float", "double", "string", "bool", "long", "short", "unsigned", "signed",
    "auto", "const",
];

/// What a statement chunk turned into
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Recognized {
    Tokens(Vec<TokenKind>),
    /// Known to have no observable effect
    Silent,
    /// Not simulated; reported to the learner
    Skipped(&'static str),
}

pub(crate) fn recognize(chunk: &[Lexeme], order: PrintOrder) -> Recognized {
    let chunk = strip_std(chunk);
    let Some(first) = chunk.first() else {
        return Recognized::Silent;
    };

    match first.ident() {
        Some("cout") => recognize_print(&chunk[1..], order),
        Some("cin") => recognize_cin(&chunk[1..]),
        Some("scanf") => recognize_scanf(&chunk[1..]),
        Some("gets") => match &chunk[1..] {
            [Lexeme::LParen(_), Lexeme::Ident(name, _), Lexeme::RParen(_)] => {
                read(name, ReadMode::Line)
            }
            _ => Recognized::Skipped("gets needs one variable, like `gets(name)`"),
        },
        Some("getline") => match &chunk[1..] {
            [Lexeme::LParen(_), stream, Lexeme::Comma(_), Lexeme::Ident(name, _), Lexeme::RParen(_)]
                if stream.is_ident("cin") =>
            {
                read(name, ReadMode::Line)
            }
            _ => Recognized::Skipped("getline needs the form `getline(cin, name)`"),
        },
        Some("getchar") if is_getchar_call(&chunk) => read(GETCHAR_SLOT, ReadMode::Char),
        Some("printf") | Some("puts") => {
            Recognized::Skipped("printf is not simulated; use cout to print")
        }
        Some("return") | Some("using") => Recognized::Silent,
        Some("break") | Some("continue") => {
            Recognized::Skipped("break and continue are not simulated")
        }
        Some("if") | Some("else") | Some("while") | Some("do") | Some("switch") => {
            Recognized::Skipped("only counting for-loops are simulated")
        }
        Some(word) if TYPE_NAMES.contains(&word) => recognize_declaration(&chunk),
        Some(name) => match &chunk[1..] {
            [Lexeme::Eq(_), rest @ ..] if is_getchar_call(rest) => read(name, ReadMode::Char),
            [Lexeme::Eq(_), ..] => Recognized::Skipped(
                "assignments are not simulated; values come from input or a loop",
            ),
            [Lexeme::PlusPlus(_)] | [Lexeme::MinusMinus(_)] => {
                Recognized::Skipped("++ and -- only work in a for-loop header")
            }
            _ => Recognized::Skipped("this statement is not simulated"),
        },
        None => Recognized::Skipped("this statement is not simulated"),
    }
}

fn read(name: &str, mode: ReadMode) -> Recognized {
    Recognized::Tokens(vec![TokenKind::Read {
        variable: name.to_string(),
        mode,
    }])
}

/// Drop every `std ::` pair
fn strip_std(chunk: &[Lexeme]) -> Vec<Lexeme> {
    let mut out = Vec::with_capacity(chunk.len());
    let mut i = 0;
    while i < chunk.len() {
        if chunk[i].is_ident("std") && matches!(chunk.get(i + 1), Some(Lexeme::ColonColon(_))) {
            i += 2;
            continue;
        }
        out.push(chunk[i].clone());
        i += 1;
    }
    out
}

fn is_getchar_call(lexemes: &[Lexeme]) -> bool {
    matches!(
        lexemes,
        [name, Lexeme::LParen(_), Lexeme::RParen(_)] if name.is_ident("getchar")
    )
}

fn recognize_print(rest: &[Lexeme], order: PrintOrder) -> Recognized {
    if !matches!(rest.first(), Some(Lexeme::LtLt(_))) {
        return Recognized::Skipped("cout needs `<<` before each value");
    }

    let mut parts = Vec::new();
    for operand in rest.split(|l| matches!(l, Lexeme::LtLt(_))).skip(1) {
        let part = match operand.first() {
            Some(Lexeme::StringLiteral(s, _)) | Some(Lexeme::CharLiteral(s, _)) => {
                PrintPart::Literal(s.clone())
            }
            Some(Lexeme::IntLiteral(n, _)) => PrintPart::Literal(n.to_string()),
            Some(Lexeme::FloatLiteral(s, _)) => PrintPart::Literal(s.clone()),
            Some(Lexeme::Ident(name, _)) if name == "endl" => PrintPart::Newline,
            Some(Lexeme::Ident(name, _)) => PrintPart::VariableRef(name.clone()),
            _ => continue,
        };
        if operand.len() > 1 {
            tracing::debug!(operand = %operand[0], "ignoring expression after print operand");
        }
        parts.push(part);
    }

    if parts.is_empty() {
        return Recognized::Skipped("nothing to print");
    }
    if order == PrintOrder::LiteralsFirst {
        parts = literals_first(parts);
    }

    Recognized::Tokens(vec![TokenKind::Print { parts }])
}

/// Reorder parts as literals, then variables, then one newline if any was present
fn literals_first(parts: Vec<PrintPart>) -> Vec<PrintPart> {
    let has_newline = parts.contains(&PrintPart::Newline);
    let (literals, variables): (Vec<_>, Vec<_>) = parts
        .into_iter()
        .filter(|p| *p != PrintPart::Newline)
        .partition(|p| matches!(p, PrintPart::Literal(_)));

    let mut reordered = literals;
    reordered.extend(variables);
    if has_newline {
        reordered.push(PrintPart::Newline);
    }
    reordered
}

fn recognize_cin(rest: &[Lexeme]) -> Recognized {
    if !matches!(rest.first(), Some(Lexeme::GtGt(_))) {
        return Recognized::Skipped("cin needs `>>` before each variable");
    }

    let reads: Vec<TokenKind> = rest
        .split(|l| matches!(l, Lexeme::GtGt(_)))
        .skip(1)
        .filter_map(|target| target.first().and_then(Lexeme::ident))
        .map(|name| TokenKind::Read {
            variable: name.to_string(),
            mode: ReadMode::Stream,
        })
        .collect();

    if reads.is_empty() {
        Recognized::Skipped("cin needs a variable to read into")
    } else {
        Recognized::Tokens(reads)
    }
}

fn recognize_scanf(rest: &[Lexeme]) -> Recognized {
    let format = match rest {
        [Lexeme::LParen(_), Lexeme::StringLiteral(format, _), ..] => format,
        _ => return Recognized::Skipped("scanf needs a format string, like `scanf(\"%d\", &x)`"),
    };

    let args_end = rest
        .iter()
        .rposition(|l| matches!(l, Lexeme::RParen(_)))
        .unwrap_or(rest.len());
    let args = &rest[2..args_end.max(2)];

    let variables: Vec<String> = args
        .split(|l| matches!(l, Lexeme::Comma(_)))
        .skip(1)
        .filter_map(|arg| {
            let arg = match arg {
                [Lexeme::Amp(_), tail @ ..] => tail,
                _ => arg,
            };
            arg.first().and_then(Lexeme::ident).map(str::to_string)
        })
        .collect();

    if variables.is_empty() {
        return Recognized::Skipped("scanf needs at least one variable");
    }

    let mut hints = parse_format_hints(format);
    hints.resize(variables.len(), FormatHint::Integer);

    Recognized::Tokens(vec![TokenKind::MultiRead { variables, hints }])
}

/// Placeholders of a scanf format string, in order.
///
/// Widths and `l`/`h` length modifiers are accepted and ignored; `%%` and
/// unknown conversions produce no hint.
pub fn parse_format_hints(format: &str) -> Vec<FormatHint> {
    let mut hints = Vec::new();
    let mut chars = format.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            continue;
        }
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() || c == 'l' || c == 'h' {
                chars.next();
            } else {
                break;
            }
        }
        if let Some(conversion) = chars.next() {
            if let Some(hint) = FormatHint::from_conversion(conversion) {
                hints.push(hint);
            }
        }
    }

    hints
}

fn recognize_declaration(chunk: &[Lexeme]) -> Recognized {
    let body: Vec<&Lexeme> = chunk
        .iter()
        .skip_while(|l| l.ident().is_some_and(|w| TYPE_NAMES.contains(&w)))
        .collect();

    match body.as_slice() {
        [Lexeme::Ident(name, _), Lexeme::Eq(_), call, Lexeme::LParen(_), Lexeme::RParen(_)]
            if call.is_ident("getchar") =>
        {
            read(name, ReadMode::Char)
        }
        _ if body.iter().any(|l| matches!(l, Lexeme::Eq(_))) => Recognized::Skipped(
            "initial values are not simulated; values come from input or a loop",
        ),
        _ => Recognized::Silent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn chunk(src: &str) -> Vec<Lexeme> {
        Lexer::new(src).tokenize()
    }

    fn tokens(src: &str) -> Vec<TokenKind> {
        match recognize(&chunk(src), PrintOrder::SourceOrder) {
            Recognized::Tokens(t) => t,
            other => panic!("expected tokens for {:?}, got {:?}", src, other),
        }
    }

    #[test]
    fn test_print_keeps_source_order() {
        let kinds = tokens(r#"cout << "a=" << a << ", b=" << b << endl"#);
        assert_eq!(
            kinds,
            vec![TokenKind::Print {
                parts: vec![
                    PrintPart::Literal("a=".into()),
                    PrintPart::VariableRef("a".into()),
                    PrintPart::Literal(", b=".into()),
                    PrintPart::VariableRef("b".into()),
                    PrintPart::Newline,
                ]
            }]
        );
    }

    #[test]
    fn test_print_literals_first() {
        let result = recognize(&chunk(r#"cout << "a=" << a << endl << "!""#), PrintOrder::LiteralsFirst);
        assert_eq!(
            result,
            Recognized::Tokens(vec![TokenKind::Print {
                parts: vec![
                    PrintPart::Literal("a=".into()),
                    PrintPart::Literal("!".into()),
                    PrintPart::VariableRef("a".into()),
                    PrintPart::Newline,
                ]
            }])
        );
    }

    #[test]
    fn test_std_prefix() {
        let kinds = tokens(r#"std::cout << 'x' << 7 << std::endl"#);
        assert_eq!(
            kinds,
            vec![TokenKind::Print {
                parts: vec![
                    PrintPart::Literal("x".into()),
                    PrintPart::Literal("7".into()),
                    PrintPart::Newline,
                ]
            }]
        );
    }

    #[test]
    fn test_cin_chain_reads_each_target() {
        let kinds = tokens("cin >> a >> b");
        assert_eq!(kinds.len(), 2);
        assert_eq!(
            kinds[1],
            TokenKind::Read {
                variable: "b".into(),
                mode: ReadMode::Stream
            }
        );
    }

    #[test]
    fn test_scanf_hints_match_variables() {
        let kinds = tokens(r#"scanf("%d %5s", &n, name, &extra)"#);
        assert_eq!(
            kinds,
            vec![TokenKind::MultiRead {
                variables: vec!["n".into(), "name".into(), "extra".into()],
                hints: vec![FormatHint::Integer, FormatHint::String, FormatHint::Integer],
            }]
        );
    }

    #[test]
    fn test_format_hints() {
        assert_eq!(
            parse_format_hints("%d,%lf %c %% %u %i"),
            vec![
                FormatHint::Integer,
                FormatHint::Float,
                FormatHint::Char,
                FormatHint::Integer,
                FormatHint::Integer,
            ]
        );
    }

    #[test]
    fn test_line_and_char_reads() {
        assert_eq!(
            tokens("gets(line)"),
            vec![TokenKind::Read {
                variable: "line".into(),
                mode: ReadMode::Line
            }]
        );
        assert_eq!(
            tokens("getline(cin, line)"),
            vec![TokenKind::Read {
                variable: "line".into(),
                mode: ReadMode::Line
            }]
        );
        assert_eq!(
            tokens("char c = getchar()"),
            vec![TokenKind::Read {
                variable: "c".into(),
                mode: ReadMode::Char
            }]
        );
        assert_eq!(
            tokens("getchar()"),
            vec![TokenKind::Read {
                variable: GETCHAR_SLOT.into(),
                mode: ReadMode::Char
            }]
        );
    }

    #[test]
    fn test_silent_and_skipped() {
        let order = PrintOrder::SourceOrder;
        assert_eq!(recognize(&chunk("int x"), order), Recognized::Silent);
        assert_eq!(recognize(&chunk("return 0"), order), Recognized::Silent);
        assert!(matches!(recognize(&chunk("int x = 5"), order), Recognized::Skipped(_)));
        assert!(matches!(recognize(&chunk("x = x + 1"), order), Recognized::Skipped(_)));
        assert!(matches!(recognize(&chunk(r#"printf("hi")"#), order), Recognized::Skipped(_)));
    }
}
