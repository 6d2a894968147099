//! Token listing pane

use super::{clamp_scroll, inner_height, pane_block};
use crate::parser::token::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render every scanned token as `line:column KIND text`. Tokens on
/// `current_line` are highlighted.
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    current_line: Option<usize>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = pane_block(format!(" Tokens ({}) ", tokens.len()), is_focused);
    let visible_height = inner_height(area.height);
    *scroll = clamp_scroll(*scroll, tokens.len(), visible_height);

    let lines: Vec<Line> = tokens
        .iter()
        .skip(*scroll)
        .take(visible_height)
        .map(|token| {
            let kind_style = if token.kind.is_keyword() {
                Style::default().fg(DEFAULT_THEME.keyword)
            } else if token.is_eof() {
                Style::default().fg(DEFAULT_THEME.success)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };

            let mut line = Line::from(vec![
                Span::styled(
                    format!("{:>4}:{:<3} ", token.location.line, token.location.column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(format!("{:<13}", token.kind.name()), kind_style),
                Span::styled(token.text.clone(), Style::default().fg(DEFAULT_THEME.number)),
            ]);

            if current_line == Some(token.location.line) {
                line = line.style(Style::default().bg(DEFAULT_THEME.current_line_bg));
            }
            line
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
