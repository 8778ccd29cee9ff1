//! Quoted literal bodies: ordinary strings, typed-literal bodies, and
//! triple-quoted strings.

use crate::diag::{Error, ErrorKind, Span};
use crate::lexer::cursor::Cursor;
use crate::lexer::esc;

/// Scans an ordinary `"…"` string body. Assumes the opening quote has
/// already been consumed. Decodes `\"` and `\\`; re-emits every other
/// recognized escape verbatim (see [`esc::scan`]).
pub fn scan_string(cursor: &mut Cursor, start_span: Span) -> Result<String, Error> {
    let mut buf = Vec::new();
    loop {
        match cursor.peek() {
            None => {
                return Err(Error::new(ErrorKind::UnexpectedEof, start_span, "unterminated string"))
            }
            Some(b'"') => {
                cursor.advance();
                break;
            }
            Some(b'\\') => {
                let bs_span = cursor.span();
                cursor.advance();
                buf.extend(esc::scan(cursor, bs_span)?);
            }
            Some(b) => {
                cursor.advance();
                buf.push(b);
            }
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Scans a typed-literal body (`d"…"`, `b"…"`, `u"…"`, `t"…"`, `r"…"`).
/// Assumes the opening quote has already been consumed. No escape decoding
/// is performed; a `\` and the byte following it are copied through
/// verbatim so that an escaped quote does not terminate the literal early.
pub fn scan_raw(cursor: &mut Cursor, start_span: Span) -> Result<String, Error> {
    let mut buf = Vec::new();
    loop {
        match cursor.peek() {
            None => {
                return Err(Error::new(ErrorKind::UnexpectedEof, start_span, "unterminated string"))
            }
            Some(b'"') => {
                cursor.advance();
                break;
            }
            Some(b'\\') => {
                cursor.advance();
                buf.push(b'\\');
                match cursor.advance() {
                    Some(b) => buf.push(b),
                    None => {
                        return Err(Error::new(
                            ErrorKind::UnexpectedEof,
                            start_span,
                            "unterminated string",
                        ))
                    }
                }
            }
            Some(b) => {
                cursor.advance();
                buf.push(b);
            }
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Scans a `"""…"""` triple-quoted string body. Assumes the three opening
/// quotes have already been consumed. No escape processing; the terminator
/// is a literal `"""`.
pub fn scan_triple(cursor: &mut Cursor, start_span: Span) -> Result<String, Error> {
    let mut buf = Vec::new();
    loop {
        if cursor.is_eof() {
            return Err(Error::new(
                ErrorKind::UnexpectedEof,
                start_span,
                "unterminated triple-quoted string",
            ));
        }
        if cursor.peek() == Some(b'"') && cursor.peek_at(1) == Some(b'"') && cursor.peek_at(2) == Some(b'"') {
            cursor.advance();
            cursor.advance();
            cursor.advance();
            break;
        }
        buf.push(cursor.advance().expect("checked not eof"));
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
