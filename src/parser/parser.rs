//! Recursive descent parser for TINY
//!
//! One method per grammar production. Every method leaves the scanner on the
//! first token it did not consume and returns the id of the node it built;
//! `stmt_sequence` returns the id of the first statement of the sequence.
//!
//! # Grammar
//!
//! ```text
//! program        -> stmt_sequence END_OF_FILE
//! stmt_sequence  -> statement ( ';' statement )*
//! statement      -> if_stmt | repeat_stmt | assign_stmt | read_stmt | write_stmt
//! if_stmt        -> 'if' exp 'then' stmt_sequence ('else' stmt_sequence)? 'end'
//! repeat_stmt    -> 'repeat' stmt_sequence 'until' exp
//! assign_stmt    -> IDENTIFIER ':=' exp
//! read_stmt      -> 'read' IDENTIFIER
//! write_stmt     -> 'write' exp
//! exp            -> simple_exp ( ('<'|'='|'>') simple_exp )?
//! simple_exp     -> term ( ('+'|'-') term )*
//! term           -> factor ( ('*'|'/') factor )*
//! factor         -> '(' exp ')' | NUMBER | IDENTIFIER
//! ```
//!
//! Sequences are chained: each statement after the first becomes the last
//! child of its predecessor, and the pair is marked same-level in the tree.

use crate::parser::ast::*;
use crate::parser::scanner::{LexError, Scanner};
use crate::parser::token::{Token, TokenKind};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

/// Parser error type
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexError),

    /// The current token does not fit the grammar. `expected` is set when a
    /// specific kind was required and `None` when no alternative applied.
    #[error("Syntax error at {}: {}", .found.location, describe_mismatch(.expected, .found))]
    UnexpectedToken {
        expected: Option<TokenKind>,
        found: Token,
    },

    #[error("Cannot read source: {0}")]
    Io(#[from] io::Error),
}

fn describe_mismatch(expected: &Option<TokenKind>, found: &Token) -> String {
    match expected {
        Some(kind) => format!("expected {}, found {}", kind, found),
        None => format!("unexpected token {}", found),
    }
}

impl ParseError {
    /// The offending token, for syntax errors.
    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseError::UnexpectedToken { found, .. } => Some(found),
            _ => None,
        }
    }
}

/// Parse a complete program held in memory.
pub fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
    Parser::new(source).parse_program()
}

/// Recursive descent parser. One instance parses one program.
pub struct Parser<R> {
    scanner: Scanner<R>,
    tree: TreeBuilder,
}

impl Parser<io::Cursor<Vec<u8>>> {
    pub fn new(source: &str) -> Self {
        Parser::with_scanner(Scanner::from_source(source))
    }
}

impl Parser<BufReader<File>> {
    /// Open a source file. Failure to open is reported here, before parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        Ok(Parser::with_scanner(Scanner::open(path)?))
    }
}

impl<R: Read + Seek> Parser<R> {
    pub fn with_scanner(scanner: Scanner<R>) -> Self {
        Self {
            scanner,
            tree: TreeBuilder::new(),
        }
    }

    /// Parse the entire program and return the finished tree.
    ///
    /// Consumes the parser: the scanner and tree builder live for exactly one
    /// session. The first error aborts and no partial tree is returned.
    pub fn parse_program(mut self) -> Result<SyntaxTree, ParseError> {
        let root = self.stmt_sequence()?;
        self.match_token(TokenKind::EndOfFile)?;

        let tree = self.tree.finalize(root);
        debug!(nodes = tree.len(), root, "parsed program");
        Ok(tree)
    }

    fn stmt_sequence(&mut self) -> Result<NodeId, ParseError> {
        let head = self.statement()?;
        let mut last = head;

        while self.check(TokenKind::Semicolon)? {
            self.match_token(TokenKind::Semicolon)?;
            let next = self.statement()?;
            self.tree.add_child(last, next);
            self.tree.mark_same_level(last, next);
            last = next;
        }

        Ok(head)
    }

    fn statement(&mut self) -> Result<NodeId, ParseError> {
        let token = self.scanner.peek()?;
        debug!(kind = %token.kind, location = %token.location, "statement");

        match token.kind {
            TokenKind::If => self.if_stmt(),
            TokenKind::Repeat => self.repeat_stmt(),
            TokenKind::Identifier => self.assign_stmt(),
            TokenKind::Read => self.read_stmt(),
            TokenKind::Write => self.write_stmt(),
            _ => Err(ParseError::UnexpectedToken {
                expected: None,
                found: token,
            }),
        }
    }

    fn if_stmt(&mut self) -> Result<NodeId, ParseError> {
        let keyword = self.match_token(TokenKind::If)?;
        let node = self.tree.make_node(NodeKind::If, None, keyword.location);

        let condition = self.exp()?;
        self.tree.add_child(node, condition);

        self.match_token(TokenKind::Then)?;
        let then_branch = self.stmt_sequence()?;
        self.tree.add_child(node, then_branch);

        if self.check(TokenKind::Else)? {
            self.match_token(TokenKind::Else)?;
            let else_branch = self.stmt_sequence()?;
            self.tree.add_child(node, else_branch);
        }

        self.match_token(TokenKind::End)?;
        Ok(node)
    }

    fn repeat_stmt(&mut self) -> Result<NodeId, ParseError> {
        let keyword = self.match_token(TokenKind::Repeat)?;
        let node = self.tree.make_node(NodeKind::Repeat, None, keyword.location);

        let body = self.stmt_sequence()?;
        self.match_token(TokenKind::Until)?;
        let condition = self.exp()?;

        // Condition first, body second, whatever the source order
        self.tree.add_child(node, condition);
        self.tree.add_child(node, body);
        Ok(node)
    }

    fn assign_stmt(&mut self) -> Result<NodeId, ParseError> {
        let target = self.match_token(TokenKind::Identifier)?;
        self.match_token(TokenKind::Assign)?;
        let node = self
            .tree
            .make_node(NodeKind::Assign, Some(target.text), target.location);

        let value = self.exp()?;
        self.tree.add_child(node, value);
        Ok(node)
    }

    fn read_stmt(&mut self) -> Result<NodeId, ParseError> {
        let keyword = self.match_token(TokenKind::Read)?;
        let target = self.match_token(TokenKind::Identifier)?;
        Ok(self
            .tree
            .make_node(NodeKind::Read, Some(target.text), keyword.location))
    }

    fn write_stmt(&mut self) -> Result<NodeId, ParseError> {
        let keyword = self.match_token(TokenKind::Write)?;
        let node = self.tree.make_node(NodeKind::Write, None, keyword.location);

        let value = self.exp()?;
        self.tree.add_child(node, value);
        Ok(node)
    }

    /// Comparison is non-associative: at most one operator per `exp`.
    fn exp(&mut self) -> Result<NodeId, ParseError> {
        let left = self.simple_exp()?;

        let token = self.scanner.peek()?;
        match token.kind {
            TokenKind::LessThan | TokenKind::Equal | TokenKind::GreaterThan => {
                let op = self.operator(token.kind)?;
                self.tree.add_child(op, left);
                let right = self.simple_exp()?;
                self.tree.add_child(op, right);
                Ok(op)
            }
            _ => Ok(left),
        }
    }

    fn simple_exp(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.term()?;

        loop {
            let kind = self.scanner.peek()?.kind;
            if !matches!(kind, TokenKind::Plus | TokenKind::Minus) {
                break;
            }
            let op = self.operator(kind)?;
            self.tree.add_child(op, left);
            let right = self.term()?;
            self.tree.add_child(op, right);
            left = op;
        }

        Ok(left)
    }

    fn term(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.factor()?;

        loop {
            let kind = self.scanner.peek()?.kind;
            if !matches!(kind, TokenKind::Times | TokenKind::Divide) {
                break;
            }
            let op = self.operator(kind)?;
            self.tree.add_child(op, left);
            let right = self.factor()?;
            self.tree.add_child(op, right);
            left = op;
        }

        Ok(left)
    }

    fn factor(&mut self) -> Result<NodeId, ParseError> {
        let token = self.scanner.peek()?;
        trace!(kind = %token.kind, "factor");

        match token.kind {
            TokenKind::LeftParen => {
                self.match_token(TokenKind::LeftParen)?;
                let inner = self.exp()?;
                self.match_token(TokenKind::RightParen)?;
                Ok(inner)
            }
            TokenKind::Number => {
                let node = self
                    .tree
                    .make_node(NodeKind::Const, Some(token.text), token.location);
                self.match_token(TokenKind::Number)?;
                Ok(node)
            }
            TokenKind::Identifier => {
                let node = self
                    .tree
                    .make_node(NodeKind::Id, Some(token.text), token.location);
                self.match_token(TokenKind::Identifier)?;
                Ok(node)
            }
            _ => Err(ParseError::UnexpectedToken {
                expected: None,
                found: token,
            }),
        }
    }

    /// Consume an operator token of `kind` and create its `Op` node.
    fn operator(&mut self, kind: TokenKind) -> Result<NodeId, ParseError> {
        let token = self.match_token(kind)?;
        Ok(self
            .tree
            .make_node(NodeKind::Op, Some(token.text), token.location))
    }

    // ===== Helper methods =====

    /// Consume the current token if it has the expected kind.
    fn match_token(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        let token = self.scanner.peek()?;
        if token.kind == expected {
            self.scanner.advance()?;
            trace!(kind = %expected, "matched");
            Ok(token)
        } else {
            Err(ParseError::UnexpectedToken {
                expected: Some(expected),
                found: token,
            })
        }
    }

    fn check(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        Ok(self.scanner.peek()?.kind == kind)
    }
}
