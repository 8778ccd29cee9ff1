//! Escape sequence recognition for ordinary (non-triple, non-typed) strings.
//!
//! Only `\"` and `\\` are decoded to their literal byte. `\/`, `\b`, `\f`,
//! `\n`, `\r`, `\t`, and `\uXXXX` are recognized as valid but are re-emitted
//! into the buffer as the original escape text, undecoded — see the open
//! question on string escape semantics. Anything else after a `\` is
//! `INVALID_ESCAPE`.

use crate::diag::{Error, ErrorKind, Span};
use crate::lexer::cursor::Cursor;

/// Scans one escape sequence. Assumes the leading `\` has already been
/// consumed from `cursor`; `backslash_span` is its span, used for error
/// reporting. Returns the bytes that should be appended to the string being
/// built.
pub fn scan(cursor: &mut Cursor, backslash_span: Span) -> Result<Vec<u8>, Error> {
    let Some(c) = cursor.peek() else {
        return Err(Error::new(
            ErrorKind::InvalidEscape,
            backslash_span,
            "unexpected end of input after '\\'",
        ));
    };

    match c {
        b'"' => {
            cursor.advance();
            Ok(vec![b'"'])
        }
        b'\\' => {
            cursor.advance();
            Ok(vec![b'\\'])
        }
        b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {
            cursor.advance();
            Ok(vec![b'\\', c])
        }
        b'u' => {
            cursor.advance();
            let mut out = vec![b'\\', b'u'];
            for _ in 0..4 {
                match cursor.advance_if_matches(|b| b.is_ascii_hexdigit()) {
                    Some(h) => out.push(h),
                    None => {
                        return Err(Error::new(
                            ErrorKind::InvalidEscape,
                            backslash_span,
                            "'\\u' escape requires four hex digits",
                        ))
                    }
                }
            }
            Ok(out)
        }
        other => Err(Error::new(
            ErrorKind::InvalidEscape,
            backslash_span,
            format!("invalid escape sequence '\\{}'", other as char),
        )),
    }
}
