//! TINY front end
//!
//! This module transforms TINY source text into a syntax tree:
//! - [`token`]: Token kinds and token values
//! - [`scanner`]: Tokenization (characters → tokens), DFA driven, with
//!   one-token lookahead by seek/rewind
//! - [`parser`]: Parsing (tokens → tree), one method per grammar production
//! - [`ast`]: Node definitions, the tree builder and the finished tree
//!
//! # TINY
//!
//! The language has five statements (`if`, `repeat`, assignment, `read`,
//! `write`), integer literals, identifiers, `+ - * /` and the comparisons
//! `< = >`. Statements are separated by `;` and comments are `{ ... }`.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent; precedence comes from layering the
//! grammar (comparison < additive < multiplicative < factor).
//! No external parser generator dependencies.

pub mod ast;
pub mod parser;
pub mod scanner;
pub mod token;

pub use parser::{parse, ParseError, Parser};
pub use scanner::{LexError, Scanner};
