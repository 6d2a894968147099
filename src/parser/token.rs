//! Token model shared by the scanner and the parser
//!
//! A [`Token`] is a classified lexeme: its [`TokenKind`], the literal text it
//! was scanned from and the [`SourceLocation`] of its first character.

use super::ast::SourceLocation;
use serde::Serialize;
use std::fmt;

/// Every kind of token the TINY scanner can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Reserved words
    If,
    Then,
    Else,
    End,
    Repeat,
    Until,
    Read,
    Write,

    // Operators
    Plus,        // +
    Minus,       // -
    Times,       // *
    Divide,      // /
    Equal,       // =
    LessThan,    // <
    GreaterThan, // >

    // Punctuation
    LeftParen,  // (
    RightParen, // )
    Semicolon,  // ;
    Assign,     // :=

    // Literals
    Number,
    Identifier,

    EndOfFile,
}

impl TokenKind {
    /// Classify a run of letters as a reserved word or a plain identifier.
    ///
    /// Matching is case-sensitive: `If` is an identifier.
    pub fn from_word(word: &str) -> TokenKind {
        match word {
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "end" => TokenKind::End,
            "repeat" => TokenKind::Repeat,
            "until" => TokenKind::Until,
            "read" => TokenKind::Read,
            "write" => TokenKind::Write,
            _ => TokenKind::Identifier,
        }
    }

    /// Kind of a single-character symbol, if `ch` is one.
    pub fn from_symbol(ch: char) -> Option<TokenKind> {
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Times,
            '/' => TokenKind::Divide,
            '=' => TokenKind::Equal,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ';' => TokenKind::Semicolon,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Then
                | TokenKind::Else
                | TokenKind::End
                | TokenKind::Repeat
                | TokenKind::Until
                | TokenKind::Read
                | TokenKind::Write
        )
    }

    /// Upper-case name used in listings and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::End => "END",
            TokenKind::Repeat => "REPEAT",
            TokenKind::Until => "UNTIL",
            TokenKind::Read => "READ",
            TokenKind::Write => "WRITE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Equal => "EQUAL",
            TokenKind::LessThan => "LESS_THAN",
            TokenKind::GreaterThan => "GREATER_THAN",
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::EndOfFile => "END_OF_FILE",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token. Tokens are values: the parser reads them and drops them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// The synthetic end-of-input token; it has no text.
    pub fn end_of_file(location: SourceLocation) -> Self {
        Self::new(TokenKind::EndOfFile, String::new(), location)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "\"{}\" ({})", self.text, self.kind)
        }
    }
}
