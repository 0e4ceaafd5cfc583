//! Console pane rendering

use crate::console::{Console, Stream};
use crate::interpreter::constants::{FINISHED_MESSAGE, FINISHED_NO_OUTPUT_MESSAGE};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the console pane.
///
/// `scroll_offset` is clamped here, so callers can set it to `usize::MAX`
/// to follow the newest output.
pub fn render_terminal_pane(
    frame: &mut Frame,
    area: Rect,
    console: &Console,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Console ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = console.lines();

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = lines
        .into_iter()
        .map(|line| {
            let spans: Vec<Span> = line
                .spans
                .into_iter()
                .map(|(stream, text)| {
                    let style = stream_style(stream, &text);
                    Span::styled(text, style)
                })
                .collect();
            ListItem::new(Line::from(spans))
        })
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}

fn stream_style(stream: Stream, text: &str) -> Style {
    match stream {
        Stream::Program => Style::default().fg(DEFAULT_THEME.fg),
        Stream::Echo => Style::default()
            .fg(DEFAULT_THEME.echo)
            .add_modifier(Modifier::BOLD),
        Stream::System if text == FINISHED_MESSAGE || text == FINISHED_NO_OUTPUT_MESSAGE => {
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::ITALIC)
        }
        Stream::System => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
    }
}
