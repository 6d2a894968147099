//! Source pane rendering with TINY syntax highlighting
//!
//! Highlighting is line based and reuses [`TokenKind::from_word`] to spot
//! reserved words. Brace comments may span lines, so the comment state is
//! carried from one line to the next.

use super::{clamp_scroll, inner_height, keep_visible, pane_block};
use crate::parser::token::TokenKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split one line into styled spans. `in_comment` is updated for the next line.
pub(crate) fn highlight_line(line: &str, in_comment: &mut bool) -> Line<'static> {
    let comment_style = Style::default().fg(DEFAULT_THEME.comment);
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if *in_comment || c == '{' {
            let start = i;
            // Skip the opening brace so it cannot close the comment itself
            if !*in_comment {
                i += 1;
            }
            *in_comment = true;
            while i < chars.len() {
                i += 1;
                if chars[i - 1] == '}' {
                    *in_comment = false;
                    break;
                }
            }
            let text: String = chars[start..i].iter().collect();
            spans.push(Span::styled(text, comment_style));
            continue;
        }

        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let style = if TokenKind::from_word(&word).is_keyword() {
                Style::default()
                    .fg(DEFAULT_THEME.keyword)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            spans.push(Span::styled(word, style));
            continue;
        }

        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let digits: String = chars[start..i].iter().collect();
            spans.push(Span::styled(digits, Style::default().fg(DEFAULT_THEME.number)));
            continue;
        }

        let style = match c {
            '(' | ')' => Style::default().fg(DEFAULT_THEME.primary),
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
        i += 1;
    }

    Line::from(spans)
}

/// Render the source pane.
///
/// While the pane is not focused it follows `current_line` (1-based); when
/// focused, `scroll` is driven by the keyboard and only clamped here.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current_line: Option<usize>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = pane_block(" Source ".to_string(), is_focused);
    let visible_height = inner_height(area.height);

    let mut in_comment = false;
    let highlighted: Vec<Line> = source_code
        .lines()
        .map(|line| highlight_line(line, &mut in_comment))
        .collect();

    if !is_focused {
        if let Some(line) = current_line {
            *scroll = keep_visible(*scroll, line.saturating_sub(1), visible_height);
        }
    }
    *scroll = clamp_scroll(*scroll, highlighted.len(), visible_height);

    let visible_lines: Vec<Line> = highlighted
        .into_iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, content)| {
            let line_num = idx + 1;
            let is_current = current_line == Some(line_num);

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            if is_current {
                let background = Style::default().bg(DEFAULT_THEME.current_line_bg);
                // For current line, just apply background
                spans.extend(content.spans.into_iter().map(|mut span| {
                    span.style = span.style.patch(background);
                    span
                }));
            } else {
                spans.extend(content.spans);
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
