//! Simulated console
//!
//! An append-only transcript of everything a run shows the learner. Each
//! entry remembers which [`Stream`] produced it and, for program output, the
//! source line of the statement that printed it, so front ends can colour
//! echoed input and system lines differently from program output.

use crate::parser::ast::SourceLocation;

/// Producer of a console entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// Text printed by the program
    Program,
    /// Input typed by the user, echoed back
    Echo,
    /// Terminal messages and runtime diagnostics
    System,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleEntry {
    pub text: String,
    pub stream: Stream,
    pub location: Option<SourceLocation>,
}

/// One display line, made of the stream-tagged pieces that fell on it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleLine {
    pub spans: Vec<(Stream, String)>,
}

impl ConsoleLine {
    pub fn text(&self) -> String {
        self.spans.iter().map(|(_, s)| s.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Console {
    entries: Vec<ConsoleEntry>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program output, without newline handling
    pub fn print(&mut self, text: String, location: SourceLocation) {
        if text.is_empty() {
            return;
        }
        // Consecutive prints from the same statement share one entry
        if let Some(last) = self.entries.last_mut() {
            if last.stream == Stream::Program && last.location == Some(location) {
                last.text.push_str(&text);
                return;
            }
        }
        self.entries.push(ConsoleEntry {
            text,
            stream: Stream::Program,
            location: Some(location),
        });
    }

    /// Echo of a value typed by the user, always newline-terminated
    pub fn echo(&mut self, value: &str) {
        self.entries.push(ConsoleEntry {
            text: format!("{}\n", value),
            stream: Stream::Echo,
            location: None,
        });
    }

    /// A system line. Starts on a fresh line even if the program left the
    /// cursor mid-line.
    pub fn system(&mut self, message: &str) {
        if !self.ends_at_line_start() {
            self.push_system("\n".to_string());
        }
        self.push_system(format!("{}\n", message));
    }

    fn push_system(&mut self, text: String) {
        self.entries.push(ConsoleEntry {
            text,
            stream: Stream::System,
            location: None,
        });
    }

    fn ends_at_line_start(&self) -> bool {
        self.entries
            .iter()
            .rev()
            .find(|e| !e.text.is_empty())
            .map_or(true, |e| e.text.ends_with('\n'))
    }

    /// Whether the program itself printed anything
    pub fn has_program_output(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.stream == Stream::Program && !e.text.is_empty())
    }

    pub fn entries(&self) -> &[ConsoleEntry] {
        &self.entries
    }

    /// Full transcript, system lines included
    pub fn text(&self) -> String {
        self.entries.iter().map(|e| e.text.as_str()).collect()
    }

    /// Program output and echoed input only
    pub fn program_text(&self) -> String {
        self.entries
            .iter()
            .filter(|e| e.stream != Stream::System)
            .map(|e| e.text.as_str())
            .collect()
    }

    /// Transcript split into display lines. A trailing newline does not
    /// produce an empty last line.
    pub fn lines(&self) -> Vec<ConsoleLine> {
        let mut lines = Vec::new();
        let mut current = ConsoleLine::default();

        for entry in &self.entries {
            let mut pieces = entry.text.split('\n').peekable();
            while let Some(piece) = pieces.next() {
                if !piece.is_empty() {
                    current.spans.push((entry.stream, piece.to_string()));
                }
                if pieces.peek().is_some() {
                    lines.push(std::mem::take(&mut current));
                }
            }
        }

        if !current.spans.is_empty() {
            lines.push(current);
        }
        lines
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: usize) -> SourceLocation {
        SourceLocation::new(line, 5)
    }

    #[test]
    fn test_system_line_starts_fresh() {
        let mut console = Console::new();
        console.print("Hi ".to_string(), loc(3));
        console.system("done");

        assert_eq!(console.text(), "Hi \ndone\n");
        assert_eq!(console.program_text(), "Hi ");
    }

    #[test]
    fn test_lines_mix_streams() {
        let mut console = Console::new();
        console.print("Age? ".to_string(), loc(4));
        console.echo("9");
        console.print("You are 9\n".to_string(), loc(6));

        let lines = console.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0].spans,
            vec![
                (Stream::Program, "Age? ".to_string()),
                (Stream::Echo, "9".to_string())
            ]
        );
        assert_eq!(lines[1].text(), "You are 9");
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let mut console = Console::new();
        console.print("a\n\nb\n".to_string(), loc(2));

        let texts: Vec<String> = console.lines().iter().map(ConsoleLine::text).collect();
        assert_eq!(texts, vec!["a", "", "b"]);
    }

    #[test]
    fn test_program_output_tracking() {
        let mut console = Console::new();
        assert!(!console.has_program_output());
        console.echo("5");
        assert!(!console.has_program_output());
        console.print("x".to_string(), loc(1));
        assert!(console.has_program_output());
    }
}
