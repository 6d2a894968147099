//! # Introduction
//!
//! `tiny-front` scans and parses programs written in TINY, a small imperative
//! teaching language, and builds a labeled syntax tree that later stages
//! (interpreters, code generators, viewers) can consume.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Parser → TreeBuilder → SyntaxTree → Viewer
//! ```
//!
//! 1. [`parser::scanner`]: DFA tokenizer over any `Read + Seek` source.
//! 2. [`parser::parser`]: recursive descent, one method per production.
//! 3. [`parser::ast`]: node ids, children, same-level annotations and the
//!    finished [`parser::ast::SyntaxTree`].
//! 4. [`ui`]: ratatui-based tree viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! let tree = tiny_front::parser::parse("read x; write x * 2").unwrap();
//! assert_eq!(tree.to_string(), "read (x)\nwrite\n  op (*)\n    id (x)\n    const (2)\n");
//! ```

pub mod parser;
pub mod ui;
