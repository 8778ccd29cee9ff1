//! Hand-written tokenizer with position tracking and typed-literal
//! lookahead.

mod cursor;
mod esc;
pub(crate) mod ident;
pub(crate) mod num;
mod quoted;
mod token;

pub use token::{Token, TokenKind};

use crate::diag::{Error, ErrorKind, Span};
use cursor::Cursor;

/// Converts a source text into a lazy stream of [`Token`]s, skipping
/// whitespace and comments and recognizing typed-literal prefixes.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { cursor: Cursor::new(text.as_bytes()) }
    }

    /// Returns the next token, or an [`Error`] if the input does not
    /// tokenize.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_trivia();

        let span = self.cursor.span();
        let Some(byte) = self.cursor.peek() else {
            return Ok(Token::new(TokenKind::Eof, String::new(), span));
        };

        log::trace!("lexer: scanning at {span} byte {byte:#04x}");

        if let Some(kind) = typed_literal_kind(byte) {
            if self.cursor.peek_at(1) == Some(b'"') {
                return self.scan_typed_literal(kind, span);
            }
        }

        match byte {
            b'{' => self.single(TokenKind::LCurly, span),
            b'}' => self.single(TokenKind::RCurly, span),
            b'[' => self.single(TokenKind::LSquare, span),
            b']' => self.single(TokenKind::RSquare, span),
            b'(' => self.single(TokenKind::LParen, span),
            b')' => self.single(TokenKind::RParen, span),
            b':' => self.single(TokenKind::Colon, span),
            b',' => self.single(TokenKind::Comma, span),
            b'$' => self.single(TokenKind::Dollar, span),
            b'#' => self.single(TokenKind::Hash, span),
            b'@' => self.single(TokenKind::At, span),

            b'"' => self.scan_quoted(span),

            b'+' | b'-' => self.scan_number(span),
            b if b.is_ascii_digit() => self.scan_number(span),

            b if ident::is_start(b) => Ok(self.scan_ident(span)),

            _ => Err(Error::new(
                ErrorKind::InvalidToken,
                span,
                format!("unexpected byte {:#04x}", byte),
            )),
        }
    }

    fn single(&mut self, kind: TokenKind, span: Span) -> Result<Token, Error> {
        let byte = self.cursor.advance().expect("byte already peeked");
        Ok(Token::new(kind, (byte as char).to_string(), span))
    }

    fn scan_ident(&mut self, span: Span) -> Token {
        let start = self.cursor.offset();
        self.cursor.advance();
        while self.cursor.advance_if_matches(ident::is_continue).is_some() {}
        let text = String::from_utf8_lossy(self.cursor.slice_from(start)).into_owned();

        let kind = match text.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => TokenKind::Ident,
        };
        Token::new(kind, text, span)
    }

    fn scan_number(&mut self, span: Span) -> Result<Token, Error> {
        let scanned = num::scan(&mut self.cursor, span)?;
        let kind = if scanned.is_float { TokenKind::Float } else { TokenKind::Int };
        Ok(Token::new(kind, scanned.text, span))
    }

    fn scan_quoted(&mut self, span: Span) -> Result<Token, Error> {
        self.cursor.advance(); // opening '"'
        if self.cursor.peek() == Some(b'"') && self.cursor.peek_at(1) == Some(b'"') {
            self.cursor.advance();
            self.cursor.advance();
            let text = quoted::scan_triple(&mut self.cursor, span)?;
            return Ok(Token::new(TokenKind::TripleString, text, span));
        }
        let text = quoted::scan_string(&mut self.cursor, span)?;
        Ok(Token::new(TokenKind::String, text, span))
    }

    fn scan_typed_literal(&mut self, kind: TokenKind, span: Span) -> Result<Token, Error> {
        self.cursor.advance(); // prefix letter
        self.cursor.advance(); // opening '"'
        let text = quoted::scan_raw(&mut self.cursor, span)?;
        Ok(Token::new(kind, text, span))
    }

    /// Skips whitespace, `//` line comments, and `/* … */` block comments
    /// (not nested). An unterminated block comment at EOF is tolerated, not
    /// an error.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.peek() {
                Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') => {
                    self.cursor.advance();
                }
                Some(b'/') if self.cursor.peek_at(1) == Some(b'/') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    while !matches!(self.cursor.peek(), None | Some(b'\n')) {
                        self.cursor.advance();
                    }
                }
                Some(b'/') if self.cursor.peek_at(1) == Some(b'*') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    loop {
                        match self.cursor.peek() {
                            None => break,
                            Some(b'*') if self.cursor.peek_at(1) == Some(b'/') => {
                                self.cursor.advance();
                                self.cursor.advance();
                                break;
                            }
                            Some(_) => {
                                self.cursor.advance();
                            }
                        }
                    }
                }
                _ => break,
            }
        }
    }
}

fn typed_literal_kind(byte: u8) -> Option<TokenKind> {
    match byte {
        b'd' => Some(TokenKind::Decimal),
        b'b' => Some(TokenKind::Bytes),
        b'u' => Some(TokenKind::Uuid),
        b't' => Some(TokenKind::DateTime),
        b'r' => Some(TokenKind::Duration),
        _ => None,
    }
}
