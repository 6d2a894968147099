//! Terminal tree viewer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: viewer state, keyboard event loop, pane focus, node selection
//! - **[`panes`]**: stateless render functions for each visible pane (source,
//!   syntax tree, tokens, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a parsed
//! [`SyntaxTree`] and call [`App::run`] to start the event loop.
//!
//! [`SyntaxTree`]: crate::parser::ast::SyntaxTree
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
