//! Status bar rendering with keybindings and selection details

use crate::parser::ast::Node;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Everything the status bar shows.
pub struct StatusRenderData<'a> {
    pub file_name: &'a str,
    pub message: &'a str,
    pub selected: Option<&'a Node>,
    pub position: usize,
    pub total: usize,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);

    let mut left_spans = vec![
        Span::styled(
            format!(" {} ", data.file_name),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" Node {}/{} ", data.position + 1, data.total),
            bar.fg(DEFAULT_THEME.fg),
        ),
    ];

    if let Some(node) = data.selected {
        left_spans.push(Span::styled("| ", bar.fg(DEFAULT_THEME.comment)));
        left_spans.push(Span::styled(
            format!("{} at {} ", node, node.location),
            bar.fg(DEFAULT_THEME.secondary),
        ));
    }

    if !data.message.is_empty() {
        left_spans.push(Span::styled("| ", bar.fg(DEFAULT_THEME.comment)));
        left_spans.push(Span::styled(
            format!("{} ", data.message),
            bar.fg(DEFAULT_THEME.fg),
        ));
    }

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar.fg(DEFAULT_THEME.fg);
    let sep_style = bar.fg(DEFAULT_THEME.comment);

    let right_spans = vec![
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" move ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⇥ ", key_style),
        Span::styled(" focus ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↵ ", key_style),
        Span::styled(" details ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
