//! Status bar rendering with keybindings and state indicators

use crate::interpreter::Status;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub status: Option<Status>,
    /// Tokens executed so far / total
    pub position: usize,
    pub total: usize,
    pub skipped: usize,
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let badge_bg = match data.status {
        Some(Status::Halted) => DEFAULT_THEME.error,
        Some(Status::AwaitingInput) => DEFAULT_THEME.secondary,
        Some(Status::Finished) => DEFAULT_THEME.success,
        None => DEFAULT_THEME.primary,
    };

    let mut left_spans = vec![
        Span::styled(
            format!(" Token {}/{} ", data.position.min(data.total), data.total),
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(if data.status == Some(Status::Halted) {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];
    if data.skipped > 0 {
        left_spans.push(Span::styled(
            format!(" ~{} skipped ", data.skipped),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ));
    }

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = if data.status == Some(Status::AwaitingInput) {
        vec![
            Span::styled(" ↵ ", key_style),
            Span::styled(" submit ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ", desc_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" quit ", desc_style),
        ]
    } else {
        vec![
            Span::styled(" r ", key_style),
            Span::styled(" run again ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ", desc_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", desc_style),
        ]
    };
    right_spans.extend([
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⇥ ", key_style),
        Span::styled(" focus ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" scroll ", desc_style),
    ]);

    let indicator = match data.status {
        Some(Status::AwaitingInput) => Some((" ⌨ INPUT ", DEFAULT_THEME.secondary)),
        Some(Status::Finished) => Some((" FINISHED ", DEFAULT_THEME.success)),
        Some(Status::Halted) => Some((" HALTED ", DEFAULT_THEME.error)),
        None => None,
    };
    if let Some((label, bg)) = indicator {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            label,
            Style::default()
                .bg(bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
