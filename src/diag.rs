//! Source positions and the closed set of parse/lex error kinds.

use std::fmt;

// ----------------------------------------------------------------------------

/// A location in source text: a 0-based byte offset plus the 1-based
/// line/column it corresponds to.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Span {
    /// 0-based byte offset from the start of the source text.
    pub offset: usize,

    /// 1-based line number.
    pub line: u32,

    /// 1-based column number.
    pub column: u32,
}

impl Span {
    /// The span at the very start of a source text.
    pub const START: Self = Self { offset: 0, line: 1, column: 1 };

    pub const fn new(offset: usize, line: u32, column: u32) -> Self {
        Self { offset, line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// ----------------------------------------------------------------------------

/// The closed set of error kinds a lexer or parser operation can fail with.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// Input ended while a token (string, block comment, etc.) was open.
    UnexpectedEof,

    /// A byte (or byte sequence) does not begin any recognized token.
    InvalidToken,

    /// The parser expected one syntactic construct and found another.
    Expected,

    /// A `\` escape in a quoted string is not one of the recognized forms.
    InvalidEscape,

    /// A numeric literal has no digits, or its value overflows its type.
    InvalidNumber,

    /// Reserved for future structural validation of `d"…"` bodies.
    /// Decimal bodies are currently accepted verbatim; unused by this
    /// implementation but kept in the closed set.
    InvalidDecimal,

    /// Reserved for future structural validation of `t"…"` bodies.
    InvalidDateTime,

    /// Reserved for future structural validation of `r"…"` bodies.
    InvalidDuration,

    /// A `u"…"` body is not 36 characters in the `8-4-4-4-12` hex-and-hyphen
    /// form.
    InvalidUuid,

    /// A `b"…"` body contains a byte outside the accepted base64 alphabet.
    InvalidBase64,

    /// A generic error not otherwise classified.
    Message,

    /// Allocation failure. Not raised by this implementation directly, but
    /// part of the closed error-kind set.
    OutOfMemory,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            ErrorKind::UnexpectedEof  => "unexpected end of input",
            ErrorKind::InvalidToken   => "invalid token",
            ErrorKind::Expected       => "expected",
            ErrorKind::InvalidEscape  => "invalid escape sequence",
            ErrorKind::InvalidNumber  => "invalid number",
            ErrorKind::InvalidDecimal => "invalid decimal literal",
            ErrorKind::InvalidDateTime => "invalid datetime literal",
            ErrorKind::InvalidDuration => "invalid duration literal",
            ErrorKind::InvalidUuid    => "invalid UUID literal",
            ErrorKind::InvalidBase64  => "invalid base64 literal",
            ErrorKind::Message        => "error",
            ErrorKind::OutOfMemory    => "out of memory",
        };
        f.write_str(s)
    }
}

// ----------------------------------------------------------------------------

/// An error produced by the lexer or parser.
///
/// Carries the [`ErrorKind`] (the machine-discriminable field), the [`Span`]
/// of the offending token, and a human-readable `message`.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
#[error("{span}: {message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self { kind, span, message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_display() {
        assert_eq!(format!("{}", Span::new(5, 2, 3)), "2:3");
    }

    #[test]
    fn span_start() {
        assert_eq!(Span::START, Span::new(0, 1, 1));
    }

    #[test]
    fn error_display_includes_span_and_message() {
        let err = Error::new(ErrorKind::Expected, Span::new(3, 1, 4), "expected ':'");
        assert_eq!(format!("{}", err), "1:4: expected ':'");
    }
}
