//! Token kinds produced by the lexer.

use crate::diag::Span;

/// A single lexical token: its kind, its text (pre-decode, as it appeared in
/// the source), and the span of its first byte.
#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: String, span: Span) -> Self {
        Self { kind, text, span }
    }
}

/// The kinds of token the lexer can yield.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenKind {
    LCurly,
    RCurly,
    LSquare,
    RSquare,
    LParen,
    RParen,
    Colon,
    Comma,
    Dollar,
    Hash,
    At,

    True,
    False,
    Null,

    Ident,
    Int,
    Float,

    /// Ordinary `"…"` string. `text` holds the body with `\"`/`\\` already
    /// reduced and every other recognized escape re-emitted verbatim.
    String,

    /// `"""…"""` string. `text` holds the raw body, no escape processing.
    TripleString,

    /// `d"…"` — decimal literal body, escapes preserved as-is.
    Decimal,

    /// `b"…"` — bytes literal body (base64 text), escapes preserved as-is.
    Bytes,

    /// `u"…"` — UUID literal body, escapes preserved as-is.
    Uuid,

    /// `t"…"` — datetime literal body, escapes preserved as-is.
    DateTime,

    /// `r"…"` — duration literal body, escapes preserved as-is.
    Duration,

    Eof,
}
