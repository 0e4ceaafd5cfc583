//! Input line rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the input box. With `prompt` set the box is active, shows the
/// typed `buffer` and places the cursor after it.
pub fn render_input_pane(frame: &mut Frame, area: Rect, prompt: Option<&str>, buffer: &str) {
    let Some(prompt) = prompt else {
        let block = Block::default()
            .title(" Input ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DEFAULT_THEME.border_normal));
        let paragraph = Paragraph::new("(the program is not waiting for input)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let block = Block::default()
        .title(format!(" Input: {} ", prompt))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        );

    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(DEFAULT_THEME.secondary)),
        Span::styled(buffer.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);

    let cursor_x = area.x + 3 + buffer.chars().count() as u16;
    let max_x = area.x + area.width.saturating_sub(2);
    frame.set_cursor_position(Position::new(cursor_x.min(max_x), area.y + 1));
}
