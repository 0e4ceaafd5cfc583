//! Main TUI application state and logic

use crate::config::Config;
use crate::interpreter::{ExecutionState, Status};
use crate::parser::ast::Program;
use crate::ui::panes::{
    self, LineHighlight, SourceRenderData, SourceScrollState, StatusRenderData,
    VariablesRenderData, VariablesScrollState,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use tracing::debug;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Console,
    Variables,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> console -> variables)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Console,
            FocusedPane::Console => FocusedPane::Variables,
            FocusedPane::Variables => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    program: Program,
    config: Config,

    /// The current run
    pub state: ExecutionState,

    /// The source code being executed
    pub source_code: String,

    /// Lines with statements the simulator skips
    skipped_lines: Vec<usize>,

    /// Text typed into the input box
    pub input_buffer: String,

    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    pub console_scroll: usize,
    pub variables_scroll: VariablesScrollState,

    /// Number of runs started, the first included
    pub runs: usize,

    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create the app and start the first run
    pub fn new(program: Program, config: Config, source_code: String) -> Self {
        let state = crate::run(&program, &config);
        let mut skipped_lines: Vec<usize> = program.skipped.iter().map(|s| s.location.line).collect();
        skipped_lines.dedup();

        let mut app = App {
            program,
            config,
            state,
            source_code,
            skipped_lines,
            input_buffer: String::new(),
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            console_scroll: usize::MAX,
            variables_scroll: VariablesScrollState::default(),
            runs: 1,
            should_quit: false,
            status_message: String::new(),
        };
        app.update_status_message();
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes, input box, status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Console (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);

        let status = self.state.status();
        let highlight = match status {
            Some(Status::AwaitingInput) => LineHighlight::AwaitingInput,
            Some(Status::Halted) => LineHighlight::Error,
            _ => LineHighlight::Current,
        };

        panes::render_source_pane(
            frame,
            left_rows[0],
            SourceRenderData {
                source_code: &self.source_code,
                current_line: self.state.current_location().line,
                highlight,
                skipped_lines: &self.skipped_lines,
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_terminal_pane(
            frame,
            left_rows[1],
            self.state.console(),
            self.focused_pane == FocusedPane::Console,
            &mut self.console_scroll,
        );

        let awaited = self
            .state
            .pending_read()
            .map(|p| p.variables())
            .unwrap_or_default();
        panes::render_variables_pane(
            frame,
            columns[1],
            VariablesRenderData {
                variables: self.state.variables(),
                loops: self.state.loop_stack(),
                awaited: &awaited,
            },
            self.focused_pane == FocusedPane::Variables,
            &mut self.variables_scroll,
        );

        let prompt = self.state.pending_read().map(|p| p.prompt());
        panes::render_input_pane(frame, main_chunks[1], prompt.as_deref(), &self.input_buffer);

        panes::render_status_bar(
            frame,
            main_chunks[2],
            StatusRenderData {
                message: &self.status_message,
                status,
                position: self.state.pc(),
                total: self.state.tokens().len(),
                skipped: self.program.skipped.len(),
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        let awaiting = self.state.is_awaiting_input();

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.focused_pane = self.focused_pane.next(),
            KeyCode::Up => self.scroll_up(),
            KeyCode::Down => self.scroll_down(),
            KeyCode::Enter if awaiting => self.submit_input(),
            KeyCode::Backspace if awaiting => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) if awaiting => self.input_buffer.push(c),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('r') | KeyCode::Char('R') => self.rerun(),
            _ => {}
        }
    }

    fn submit_input(&mut self) {
        let value = std::mem::take(&mut self.input_buffer);
        match self.state.supply_input(&value) {
            Ok(status) => debug!(%status, "input accepted"),
            Err(err) => self.status_message = err.to_string(),
        }
        self.console_scroll = usize::MAX;
        self.update_status_message();
    }

    /// Start a fresh run of the same program
    fn rerun(&mut self) {
        self.state = crate::run(&self.program, &self.config);
        self.runs += 1;
        self.input_buffer.clear();
        self.console_scroll = usize::MAX;
        self.variables_scroll = VariablesScrollState::default();
        self.update_status_message();
        debug!(runs = self.runs, "program restarted");
    }

    fn update_status_message(&mut self) {
        self.status_message = match self.state.status() {
            Some(Status::AwaitingInput) => match self.state.pending_read() {
                Some(pending) => format!("Waiting: {}", pending.prompt()),
                None => "Waiting for input".to_string(),
            },
            Some(Status::Finished) => "Program finished".to_string(),
            Some(Status::Halted) => "Program stopped by an error".to_string(),
            None => "Running".to_string(),
        };
        if self.runs > 1 {
            self.status_message.push_str(&format!(" (run {})", self.runs));
        }
    }

    fn scroll_up(&mut self) {
        match self.focused_pane {
            FocusedPane::Source => {
                // Scrolling up makes the current line move down visually
                if let Some(row) = self.source_scroll.target_line_row {
                    self.source_scroll.target_line_row = Some(row.saturating_add(1));
                }
            }
            FocusedPane::Console => {
                self.console_scroll = self.console_scroll.saturating_sub(1);
            }
            FocusedPane::Variables => {
                self.variables_scroll.offset = self.variables_scroll.offset.saturating_sub(1);
            }
        }
    }

    fn scroll_down(&mut self) {
        match self.focused_pane {
            FocusedPane::Source => {
                if let Some(row) = self.source_scroll.target_line_row {
                    self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                }
            }
            FocusedPane::Console => {
                self.console_scroll = self.console_scroll.saturating_add(1);
            }
            FocusedPane::Variables => {
                self.variables_scroll.offset = self.variables_scroll.offset.saturating_add(1);
            }
        }
    }
}
