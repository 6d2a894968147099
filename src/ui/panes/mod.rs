//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Program text with TINY highlighting and the selected node's line
//! - [`tree`]: Syntax tree outline with node selection
//! - [`tokens`]: Token listing produced by the scanner
//! - [`status`]: Status bar with keybindings and selection details
//!
//! Each pane module exports a `render_*` function. Scroll offsets are owned by
//! the [`App`](crate::ui::App) and adjusted in place while rendering.

pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

// Re-export render functions for convenience
pub use source::render_source_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use tokens::render_tokens_pane;
pub use tree::render_tree_pane;

/// Bordered block with the focus-dependent border style shared by all panes.
pub(crate) fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Scroll offset that keeps `row` inside a window of `height` rows starting
/// at `offset`.
pub(crate) fn keep_visible(offset: usize, row: usize, height: usize) -> usize {
    if height == 0 || row < offset {
        row
    } else if row >= offset + height {
        row + 1 - height
    } else {
        offset
    }
}

/// Largest useful scroll offset for `total` rows in a window of `height`.
pub(crate) fn clamp_scroll(offset: usize, total: usize, height: usize) -> usize {
    offset.min(total.saturating_sub(height))
}

/// Rows available inside a bordered pane of the given outer height.
pub(crate) fn inner_height(outer: u16) -> usize {
    outer.saturating_sub(2).max(1) as usize
}
