//! Source code pane rendering with syntax highlighting
//!
//! Displays the program with basic C++ highlighting and marks:
//!
//! - the line the run is on (current line background)
//! - the line waiting for input (orange) or the line that halted (red)
//! - statements the simulator skips (`~` in the gutter)
//!
//! The highlighted line is kept at a fixed row while the run moves, the
//! same way for every redraw.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// How the current line should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineHighlight {
    Current,
    AwaitingInput,
    Error,
}

/// Simple syntax highlighting for beginner C++
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte, c) = chars[i];

        // Comments and preprocessor lines run to the end
        let next = chars.get(i + 1).map(|&(_, n)| n);
        if (c == '/' && next == Some('/')) || (c == '#' && line[..byte].trim().is_empty()) {
            flush_word(&mut spans, &mut current_word, false);
            spans.push(Span::styled(
                line[byte..].to_string(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        if c == '"' || c == '\'' {
            flush_word(&mut spans, &mut current_word, false);
            let mut end = i + 1;
            while end < chars.len() && chars[end].1 != c {
                end += if chars[end].1 == '\\' { 2 } else { 1 };
            }
            end = (end + 1).min(chars.len());
            let end_byte = chars.get(end).map_or(line.len(), |&(b, _)| b);
            spans.push(Span::styled(
                line[byte..end_byte].to_string(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        if !c.is_alphanumeric() && c != '_' {
            flush_word(&mut spans, &mut current_word, c == '(');

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                '<' | '>' | '=' | '+' | '-' | '*' | '/' | '&' | '!' | ';' | ',' | ':' => {
                    Style::default().fg(DEFAULT_THEME.fg)
                }
                _ => Style::default(),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word, false);
    Line::from(spans)
}

fn flush_word(spans: &mut Vec<Span<'_>>, word: &mut String, is_call: bool) {
    if word.is_empty() {
        return;
    }
    let style = get_keyword_style(word, is_call);
    spans.push(Span::styled(std::mem::take(word), style));
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    match word {
        "int" | "char" | "void" | "bool" | "float" | "double" | "long" | "short" | "unsigned"
        | "signed" | "string" | "auto" | "const" => Style::default().fg(DEFAULT_THEME.type_name),
        "return" | "if" | "else" | "while" | "for" | "do" | "switch" | "case" | "break"
        | "continue" | "using" | "namespace" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "cout" | "cin" | "endl" | "std" => Style::default().fg(DEFAULT_THEME.function),
        _ if word.chars().all(|c| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ if is_function => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub source_code: &'a str,
    pub current_line: usize,
    pub highlight: LineHighlight,
    /// 1-based lines holding statements the simulator does not run
    pub skipped_lines: &'a [usize],
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = data.source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Start with the current line centred
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if data.current_line > 0 && data.current_line <= total_lines {
        scroll_state.offset = (data.current_line - 1).saturating_sub(target_row);
        if total_lines > visible_height {
            scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == data.current_line;
            let is_skipped = data.skipped_lines.contains(&line_num);

            let (num_style, content_style) = match (is_current, data.highlight) {
                (true, LineHighlight::Error) => (
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                    Some(
                        Style::default()
                            .bg(DEFAULT_THEME.error)
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ),
                (true, LineHighlight::AwaitingInput) => (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Some(
                        Style::default()
                            .bg(DEFAULT_THEME.secondary)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD),
                    ),
                ),
                (true, LineHighlight::Current) => (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    None,
                ),
                (false, _) => (Style::default().fg(DEFAULT_THEME.comment), None),
            };

            let mut content_line = highlight_source_code(line);
            match content_style {
                // Error and input lines override the syntax colours
                Some(style) => {
                    for span in &mut content_line.spans {
                        span.style = style;
                    }
                }
                None if is_current => {
                    let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                    for span in &mut content_line.spans {
                        span.style = span.style.patch(bg);
                    }
                }
                None => {}
            }

            let gutter = if is_skipped { "~" } else { " " };
            let mut spans = vec![
                Span::styled(format!("{:4}", line_num), num_style),
                Span::styled(gutter, Style::default().fg(DEFAULT_THEME.comment)),
            ];
            spans.extend(content_line.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_string_literal_is_one_span() {
        let line = highlight_source_code(r#"cout << "a \"b\"" << x;"#);
        assert!(texts(&line).contains(&r#""a \"b\"""#.to_string()));
    }

    #[test]
    fn test_comment_runs_to_end() {
        let line = highlight_source_code("int x; // count");
        assert_eq!(texts(&line).last().map(String::as_str), Some("// count"));
    }

    #[test]
    fn test_non_ascii_text() {
        let line = highlight_source_code("cout << \"héllo\"; // ñ");
        let joined: String = texts(&line).concat();
        assert_eq!(joined, "cout << \"héllo\"; // ñ");
    }
}
