//! DFA scanner for TINY source
//!
//! The scanner reads one character at a time from any `Read + Seek` source and
//! drives a small state machine to produce one [`Token`] per call. There is no
//! token buffer: [`Scanner::peek`] saves the cursor, scans a whole token and
//! seeks back, so lookahead costs a rescan but never changes what the next
//! [`Scanner::advance`] consumes.
//!
//! Identifiers and numbers are maximal runs. While a run is being extended the
//! scanner keeps re-marking the furthest valid cursor; the first character
//! that does not belong to the run is un-read by seeking back to that mark.
//!
//! # States
//!
//! ```text
//! START ──ws──▶ START          START ──{──▶ IN_COMMENT ──}──▶ START
//! START ──letter──▶ IN_ID      START ──digit──▶ IN_NUM
//! START ──:──▶ IN_ASSIGN ──=──▶ DONE
//!                          └──other──▶ ERROR
//! START ──symbol / eof / unknown──▶ DONE
//! ```

use super::ast::SourceLocation;
use super::token::{Token, TokenKind};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while scanning.
#[derive(Debug, Error)]
pub enum LexError {
    /// A `:` that is not immediately followed by `=`.
    #[error("Lexer error at {location}: expected '=' after ':', found {}", describe_found(.found))]
    MalformedAssign {
        found: Option<char>,
        location: SourceLocation,
    },

    #[error("Lexer error: {0}")]
    Io(#[from] io::Error),
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(ch) if ch.is_ascii_graphic() => format!("'{}'", ch),
        Some(ch) => format!("{:?}", ch),
        None => "end of input".to_string(),
    }
}

/// DFA states. `Done` and `Error` end the scan of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InComment,
    InId,
    InNum,
    InAssign,
    Done,
    Error,
}

/// Read position together with the line/column it corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    offset: u64,
    line: usize,
    column: usize,
}

impl Cursor {
    fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// Tokenizer over a seekable character source.
///
/// A scanner belongs to exactly one parse session; it is not meant to be
/// shared or restarted.
pub struct Scanner<R> {
    reader: R,
    cursor: Cursor,
}

impl Scanner<io::Cursor<Vec<u8>>> {
    /// Scanner over an in-memory copy of `source`.
    pub fn from_source(source: &str) -> Self {
        Scanner::new(io::Cursor::new(source.as_bytes().to_vec()))
    }
}

impl Scanner<BufReader<File>> {
    /// Open `path` for scanning. Fails here, before any token is produced,
    /// if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened source file");
        Ok(Scanner::new(BufReader::new(file)))
    }
}

impl<R: Read + Seek> Scanner<R> {
    /// Wrap a reader positioned at the beginning of the program text.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            cursor: Cursor::start(),
        }
    }

    /// Return the next token without consuming it.
    ///
    /// Repeated calls return the same token and leave the read position
    /// untouched, including when the scan fails.
    pub fn peek(&mut self) -> Result<Token, LexError> {
        let saved = self.cursor;
        let result = self.scan_token();
        self.rewind(saved)?;
        result
    }

    /// Consume the current token.
    pub fn advance(&mut self) -> Result<(), LexError> {
        let token = self.scan_token()?;
        trace!(kind = %token.kind, text = %token.text, "advanced past token");
        Ok(())
    }

    /// Scan every remaining token, up to and including `END_OF_FILE`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.scan_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Location of the next unread character.
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.cursor.line, self.cursor.column)
    }

    /// Run the DFA from `START` until it reaches `DONE` or `ERROR`.
    fn scan_token(&mut self) -> Result<Token, LexError> {
        let mut state = State::Start;
        let mut kind = TokenKind::EndOfFile;
        let mut text = String::new();
        let mut start = self.location();
        let mut mark = self.cursor;
        let mut found = None;

        while state != State::Done && state != State::Error {
            let here = self.location();
            let ch = self.read_char()?;

            match state {
                State::Start => match ch {
                    Some(c) if c.is_ascii_whitespace() => {}
                    Some('{') => state = State::InComment,
                    Some(c) if c.is_ascii_alphabetic() => {
                        start = here;
                        text.push(c);
                        mark = self.cursor;
                        state = State::InId;
                    }
                    Some(c) if c.is_ascii_digit() => {
                        start = here;
                        text.push(c);
                        mark = self.cursor;
                        state = State::InNum;
                    }
                    Some(':') => {
                        start = here;
                        text.push(':');
                        state = State::InAssign;
                    }
                    Some(c) => {
                        start = here;
                        match TokenKind::from_symbol(c) {
                            Some(symbol) => {
                                kind = symbol;
                                text.push(c);
                            }
                            None => {
                                debug!(character = ?c, %here, "unrecognized character ends the token stream");
                            }
                        }
                        state = State::Done;
                    }
                    None => {
                        start = here;
                        state = State::Done;
                    }
                },
                State::InComment => match ch {
                    Some('}') => state = State::Start,
                    Some(_) => {}
                    None => {
                        start = here;
                        state = State::Done;
                    }
                },
                State::InId => match ch {
                    Some(c) if c.is_ascii_alphabetic() => {
                        text.push(c);
                        mark = self.cursor;
                    }
                    _ => {
                        self.rewind(mark)?;
                        kind = TokenKind::from_word(&text);
                        state = State::Done;
                    }
                },
                State::InNum => match ch {
                    Some(c) if c.is_ascii_digit() => {
                        text.push(c);
                        mark = self.cursor;
                    }
                    _ => {
                        self.rewind(mark)?;
                        kind = TokenKind::Number;
                        state = State::Done;
                    }
                },
                State::InAssign => match ch {
                    Some('=') => {
                        text.push('=');
                        kind = TokenKind::Assign;
                        state = State::Done;
                    }
                    other => {
                        found = other;
                        state = State::Error;
                    }
                },
                State::Done | State::Error => unreachable!("scan loop exits on terminal states"),
            }
        }

        if state == State::Error {
            return Err(LexError::MalformedAssign {
                found,
                location: start,
            });
        }

        let token = Token::new(kind, text, start);
        trace!(kind = %token.kind, text = %token.text, location = %token.location, "scanned token");
        Ok(token)
    }

    /// Read one character, or `None` at end of input.
    fn read_char(&mut self) -> Result<Option<char>, LexError> {
        let mut byte = [0u8; 1];
        let read = loop {
            match self.reader.read(&mut byte) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(LexError::Io(e)),
            }
        };

        if read == 0 {
            return Ok(None);
        }

        let ch = byte[0] as char;
        self.cursor.offset += 1;
        if ch == '\n' {
            self.cursor.line += 1;
            self.cursor.column = 1;
        } else {
            self.cursor.column += 1;
        }

        Ok(Some(ch))
    }

    fn rewind(&mut self, to: Cursor) -> Result<(), LexError> {
        if to != self.cursor {
            self.reader.seek(SeekFrom::Start(to.offset))?;
            self.cursor = to;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::from_source(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let mut scanner = Scanner::from_source("x := 12 + y;");
        let tokens = scanner.tokenize().unwrap();

        assert_eq!(tokens[0], Token::new(TokenKind::Identifier, "x", SourceLocation::new(1, 1)));
        assert_eq!(tokens[1], Token::new(TokenKind::Assign, ":=", SourceLocation::new(1, 3)));
        assert_eq!(tokens[2], Token::new(TokenKind::Number, "12", SourceLocation::new(1, 6)));
        assert_eq!(tokens[3].kind, TokenKind::Plus);
        assert_eq!(tokens[4].text, "y");
        assert_eq!(tokens[5].kind, TokenKind::Semicolon);
        assert!(tokens[6].is_eof());
        assert_eq!(tokens.len(), 7);
    }

    #[test]
    fn test_all_symbols() {
        assert_eq!(
            kinds("+-*/=<>();"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Times,
                TokenKind::Divide,
                TokenKind::Equal,
                TokenKind::LessThan,
                TokenKind::GreaterThan,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Semicolon,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("if then else end repeat until read write iff"),
            vec![
                TokenKind::If,
                TokenKind::Then,
                TokenKind::Else,
                TokenKind::End,
                TokenKind::Repeat,
                TokenKind::Until,
                TokenKind::Read,
                TokenKind::Write,
                TokenKind::Identifier,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_runs_stop_at_class_change() {
        // No whitespace: each run must un-read the character that ended it
        let tokens = Scanner::from_source("abc12:=x1").tokenize().unwrap();
        let pairs: Vec<(TokenKind, &str)> =
            tokens.iter().map(|t| (t.kind, t.text.as_str())).collect();

        assert_eq!(
            pairs,
            vec![
                (TokenKind::Identifier, "abc"),
                (TokenKind::Number, "12"),
                (TokenKind::Assign, ":="),
                (TokenKind::Identifier, "x"),
                (TokenKind::Number, "1"),
                (TokenKind::EndOfFile, ""),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = Scanner::from_source("{ if }x := 1").tokenize().unwrap();

        assert_eq!(tokens[0], Token::new(TokenKind::Identifier, "x", SourceLocation::new(1, 7)));
        assert_eq!(tokens[1].kind, TokenKind::Assign);
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert!(tokens[3].is_eof());
    }

    #[test]
    fn test_comments_do_not_nest() {
        // The first '}' closes the comment, so "b }" is scanned
        assert_eq!(
            kinds("{ a { } b }"),
            vec![TokenKind::Identifier, TokenKind::EndOfFile]
        );
    }

    #[test]
    fn test_unterminated_comment_ends_input() {
        assert_eq!(kinds("x { never closed"), vec![TokenKind::Identifier, TokenKind::EndOfFile]);
    }

    #[test]
    fn test_peek_is_idempotent() {
        let mut scanner = Scanner::from_source("  repeat x");
        let first = scanner.peek().unwrap();
        let second = scanner.peek().unwrap();
        let third = scanner.peek().unwrap();

        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(first.kind, TokenKind::Repeat);
        assert_eq!(scanner.location(), SourceLocation::new(1, 1));

        scanner.advance().unwrap();
        let next = scanner.peek().unwrap();
        assert_eq!(next, Token::new(TokenKind::Identifier, "x", SourceLocation::new(1, 10)));
    }

    #[test]
    fn test_malformed_assign() {
        let mut scanner = Scanner::from_source("x :1");
        scanner.advance().unwrap();

        let err = scanner.peek().unwrap_err();
        match err {
            LexError::MalformedAssign { found, location } => {
                assert_eq!(found, Some('1'));
                assert_eq!(location, SourceLocation::new(1, 3));
            }
            other => panic!("Expected malformed assign, got {:?}", other),
        }

        // A failed peek leaves the cursor in place
        assert!(matches!(scanner.peek(), Err(LexError::MalformedAssign { .. })));
    }

    #[test]
    fn test_colon_at_end_of_input() {
        let err = Scanner::from_source(":").tokenize().unwrap_err();
        assert!(matches!(err, LexError::MalformedAssign { found: None, .. }));
        assert!(err.to_string().contains("end of input"));
    }

    #[test]
    fn test_unrecognized_character_is_end_of_file() {
        let tokens = Scanner::from_source("x @ y").tokenize().unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[1].is_eof());
        assert_eq!(tokens[1].location, SourceLocation::new(1, 3));
    }

    #[test]
    fn test_locations_follow_newlines() {
        let tokens = Scanner::from_source("read x;\n  write x").tokenize().unwrap();
        assert_eq!(tokens[3].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[4].location, SourceLocation::new(2, 9));
    }
}
