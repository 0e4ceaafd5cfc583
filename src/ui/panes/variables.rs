//! Variables pane rendering
//!
//! Lists every variable of the run in first-assignment order with its type
//! tag and value, followed by the active loops from outermost to innermost.

use crate::interpreter::LoopFrame;
use crate::memory::{Value, VariableStore};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the variables pane
#[derive(Debug, Default)]
pub struct VariablesScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

/// Data needed to render the variables pane
pub struct VariablesRenderData<'a> {
    pub variables: &'a VariableStore,
    pub loops: &'a [LoopFrame],
    /// Names the pending read will assign
    pub awaited: &'a [&'a str],
}

pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    data: VariablesRenderData,
    is_focused: bool,
    scroll_state: &mut VariablesScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Variables ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut all_items = Vec::new();

    if data.variables.is_empty() {
        all_items.push(ListItem::new("(none yet)").style(Style::default().fg(DEFAULT_THEME.comment)));
    }

    for (name, value) in data.variables.iter() {
        let name_style = if data.awaited.contains(&name) {
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };

        all_items.push(ListItem::new(Line::from(vec![
            Span::styled(format!("{:<4}", value.kind()), Style::default().fg(DEFAULT_THEME.type_name)),
            Span::styled(name.to_string(), name_style),
            Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
            value_span(value),
        ])));
    }

    for name in data.awaited.iter().filter(|n| !data.variables.contains(n)) {
        all_items.push(ListItem::new(Line::from(vec![
            Span::styled("    ", Style::default()),
            Span::styled(
                name.to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ← waiting", Style::default().fg(DEFAULT_THEME.comment)),
        ])));
    }

    if !data.loops.is_empty() {
        all_items.push(ListItem::new(""));
        all_items.push(ListItem::new(Span::styled(
            "Active loops",
            Style::default()
                .fg(DEFAULT_THEME.comment)
                .add_modifier(Modifier::BOLD),
        )));
        for (depth, frame_info) in data.loops.iter().enumerate() {
            all_items.push(ListItem::new(Line::from(vec![
                Span::styled("▸ ", Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(format!("{}", depth), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(" │ ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    format!("while {}", frame_info.condition),
                    Style::default().fg(DEFAULT_THEME.keyword),
                ),
                Span::styled(
                    format!(", {}++", frame_info.increment_variable),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
            ])));
        }
    }

    // Follow newly assigned variables
    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_items > scroll_state.prev_item_count && total_items > visible_height {
        scroll_state.offset = total_items - visible_height;
    }
    scroll_state.prev_item_count = total_items;
    scroll_state.offset = scroll_state.offset.min(total_items.saturating_sub(visible_height));

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

fn value_span(value: &Value) -> Span<'static> {
    match value {
        Value::Int(n) => Span::styled(n.to_string(), Style::default().fg(DEFAULT_THEME.number)),
        Value::Str(s) => Span::styled(format!("\"{}\"", s), Style::default().fg(DEFAULT_THEME.string)),
    }
}
