//! Syntax tree pane
//!
//! Draws the tree as an outline: one row per node, children indented under
//! their parent and statements of a sequence aligned at the same depth.
//! Statement nodes get a square marker, expression nodes a round one.

use super::{clamp_scroll, inner_height, keep_visible, pane_block};
use crate::parser::ast::{Node, NodeShape, OutlineRow, SyntaxTree};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn node_spans(node: &Node, depth: usize) -> Vec<Span<'static>> {
    let (marker, color) = match node.kind.shape() {
        NodeShape::Statement => ("■ ", DEFAULT_THEME.statement),
        NodeShape::Expression => ("● ", DEFAULT_THEME.expression),
    };

    vec![
        Span::raw("  ".repeat(depth)),
        Span::styled(marker, Style::default().fg(color)),
        Span::styled(node.to_string(), Style::default().fg(color)),
        Span::styled(
            format!("  #{}", node.id),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
    ]
}

/// Render the syntax tree pane. `selected` indexes into `outline`.
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    tree: &SyntaxTree,
    outline: &[OutlineRow],
    selected: usize,
    is_focused: bool,
    scroll: &mut usize,
) {
    let title = format!(" Syntax Tree ({} nodes) ", tree.len());
    let block = pane_block(title, is_focused);
    let visible_height = inner_height(area.height);

    *scroll = keep_visible(*scroll, selected, visible_height);
    *scroll = clamp_scroll(*scroll, outline.len(), visible_height);

    let lines: Vec<Line> = outline
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .filter_map(|(idx, row)| {
            let node = tree.node(row.id)?;
            let mut spans = node_spans(node, row.depth);
            if idx == selected {
                let highlight = Style::default()
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD);
                for span in &mut spans {
                    span.style = span.style.patch(highlight);
                }
            }
            Some(Line::from(spans))
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
