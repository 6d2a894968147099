//! Main TUI application state and logic

use crate::parser::ast::{Node, OutlineRow, SyntaxTree};
use crate::parser::token::Token;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use tracing::debug;

/// Rows moved by PageUp/PageDown
const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Source,
    Tokens,
}

impl FocusedPane {
    /// Move focus to the next pane (tree -> source -> tokens)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Tokens,
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The parsed program
    pub tree: SyntaxTree,

    /// Outline rows of `tree`, computed once
    pub outline: Vec<OutlineRow>,

    /// The program text and its tokens
    pub source_code: String,
    pub tokens: Vec<Token>,

    /// Shown in the status bar
    pub file_name: String,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index into `outline` of the selected node
    pub selected: usize,

    /// Per-pane scroll offsets
    pub tree_scroll: usize,
    pub source_scroll: usize,
    pub tokens_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app for a parsed program
    pub fn new(
        tree: SyntaxTree,
        source_code: String,
        tokens: Vec<Token>,
        file_name: impl Into<String>,
    ) -> Self {
        let outline = tree.outline();
        App {
            tree,
            outline,
            source_code,
            tokens,
            file_name: file_name.into(),
            focused_pane: FocusedPane::Tree,
            selected: 0,
            tree_scroll: 0,
            source_scroll: 0,
            tokens_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        debug!(nodes = self.tree.len(), tokens = self.tokens.len(), "viewer started");

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

    /// The node under the selection cursor
    pub fn selected_node(&self) -> Option<&Node> {
        self.outline
            .get(self.selected)
            .and_then(|row| self.tree.node(row.id))
    }

    /// Source line of the selected node
    pub fn current_line(&self) -> Option<usize> {
        self.selected_node().map(|node| node.location.line)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Left column: tree; right column: source (top) | tokens (bottom)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let current_line = self.current_line();

        super::panes::render_tree_pane(
            frame,
            columns[0],
            &self.tree,
            &self.outline,
            self.selected,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_source_pane(
            frame,
            right_rows[0],
            &self.source_code,
            current_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            right_rows[1],
            &self.tokens,
            current_line,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        let status = super::panes::StatusRenderData {
            file_name: &self.file_name,
            message: &self.status_message,
            selected: self.selected_node(),
            position: self.selected,
            total: self.outline.len(),
        };
        super::panes::render_status_bar(frame, main_chunks[1], &status);
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(PAGE as isize)),
            KeyCode::PageDown => self.move_by(PAGE as isize),
            KeyCode::Home => self.move_by(isize::MIN),
            KeyCode::End => self.move_by(isize::MAX),
            KeyCode::Enter => {
                self.status_message = self.describe_selection();
            }
            _ => {}
        }
    }

    /// Move the selection (tree pane) or scroll (other panes) by `delta` rows.
    /// Offsets past the end are clamped when the pane is drawn.
    fn move_by(&mut self, delta: isize) {
        let target = match self.focused_pane {
            FocusedPane::Tree => &mut self.selected,
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
        };

        *target = if delta < 0 {
            target.saturating_sub(delta.unsigned_abs())
        } else {
            target.saturating_add(delta as usize)
        };

        if self.focused_pane == FocusedPane::Tree {
            self.selected = self.selected.min(self.outline.len().saturating_sub(1));
            self.status_message.clear();
        }
    }

    fn describe_selection(&self) -> String {
        let Some(node) = self.selected_node() else {
            return String::from("Nothing selected");
        };

        let children: Vec<String> = node
            .children
            .iter()
            .map(|id| format!("#{}", id))
            .collect();
        let mut description = format!("#{} children [{}]", node.id, children.join(", "));
        if let Some(next) = self.tree.next_in_sequence(node.id) {
            description.push_str(&format!(", next statement #{}", next));
        }
        description
    }
}
