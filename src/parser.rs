//! Recursive-descent parser with a one-token buffered lookahead.

use crate::ast::{Annotation, Array, Directive, Document, Node, Object, Value};
use crate::codec;
use crate::diag::{Error, ErrorKind};
use crate::lexer::num;
use crate::lexer::{Lexer, Token, TokenKind};

/// Parses `text` as an xCDN document.
pub fn parse(text: &str) -> Result<Document, Error> {
    Parser::new(text).parse_document()
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: Option<Token>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self { lexer: Lexer::new(text), lookahead: None }
    }

    fn peek(&mut self) -> Result<&Token, Error> {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.lexer.next_token()?);
        }
        Ok(self.lookahead.as_ref().expect("just filled"))
    }

    fn advance(&mut self) -> Result<Token, Error> {
        match self.lookahead.take() {
            Some(tok) => Ok(tok),
            None => self.lexer.next_token(),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        let tok = self.advance()?;
        if tok.kind == kind {
            Ok(tok)
        } else {
            Err(Error::new(
                ErrorKind::Expected,
                tok.span,
                format!("expected {kind:?}, found {:?}", tok.kind),
            ))
        }
    }

    fn parse_document(&mut self) -> Result<Document, Error> {
        let mut doc = Document::new();
        self.parse_prolog(&mut doc)?;

        match self.peek()?.kind {
            TokenKind::Eof => {}
            TokenKind::Ident | TokenKind::String => {
                let key_tok = self.advance()?;
                if self.peek()?.kind == TokenKind::Colon {
                    self.advance()?;
                    let obj = self.parse_implicit_object(key_tok.text)?;
                    doc.push_value(Node::new(Value::Object(obj)));
                } else if key_tok.kind == TokenKind::Ident {
                    return Err(Error::new(
                        ErrorKind::Expected,
                        key_tok.span,
                        "bare identifier is not a valid value; only 'true', 'false', and 'null' qualify",
                    ));
                } else {
                    doc.push_value(Node::new(Value::String(key_tok.text)));
                    self.parse_value_stream_rest(&mut doc)?;
                }
            }
            _ => self.parse_value_stream_rest(&mut doc)?,
        }

        Ok(doc)
    }

    fn parse_prolog(&mut self, doc: &mut Document) -> Result<(), Error> {
        while self.peek()?.kind == TokenKind::Dollar {
            self.advance()?;
            let name = self.expect(TokenKind::Ident)?.text;
            self.expect(TokenKind::Colon)?;
            let node = self.parse_node()?;
            doc.push_directive(Directive::new(name, node.value));
            if self.peek()?.kind == TokenKind::Comma {
                self.advance()?;
            }
        }
        Ok(())
    }

    fn parse_value_stream_rest(&mut self, doc: &mut Document) -> Result<(), Error> {
        while self.peek()?.kind != TokenKind::Eof {
            let node = self.parse_node()?;
            doc.push_value(node);
        }
        Ok(())
    }

    /// Parses the remainder of an implicit top-level object, given its
    /// first key (the colon following it has already been consumed).
    fn parse_implicit_object(&mut self, first_key: String) -> Result<Object, Error> {
        let mut obj = Object::new();
        let first_node = self.parse_node()?;
        obj.set(first_key, first_node);

        loop {
            match self.peek()?.kind {
                TokenKind::Eof => break,
                TokenKind::Comma => {
                    self.advance()?;
                }
                _ => {
                    let key = self.parse_key()?;
                    self.expect(TokenKind::Colon)?;
                    let node = self.parse_node()?;
                    obj.set(key, node);
                }
            }
        }
        Ok(obj)
    }

    fn parse_key(&mut self) -> Result<String, Error> {
        let tok = self.advance()?;
        match tok.kind {
            TokenKind::Ident | TokenKind::String => Ok(tok.text),
            _ => Err(Error::new(ErrorKind::Expected, tok.span, format!("expected a key, found {:?}", tok.kind))),
        }
    }

    fn parse_node(&mut self) -> Result<Node, Error> {
        let mut tags = Vec::new();
        let mut annotations = Vec::new();

        loop {
            match self.peek()?.kind {
                TokenKind::Hash => {
                    self.advance()?;
                    tags.push(self.expect(TokenKind::Ident)?.text);
                }
                TokenKind::At => {
                    self.advance()?;
                    let name = self.expect(TokenKind::Ident)?.text;
                    let mut annotation = Annotation::new(name);
                    if self.peek()?.kind == TokenKind::LParen {
                        self.advance()?;
                        self.parse_arg_list(&mut annotation)?;
                    }
                    annotations.push(annotation);
                }
                _ => break,
            }
        }

        let value = self.parse_value()?;
        let mut node = Node::new(value);
        for tag in tags {
            node.add_tag(tag);
        }
        for annotation in annotations {
            node.add_annotation(annotation);
        }
        Ok(node)
    }

    /// Parses `(arg (',' arg)* ','?)?`, assuming the opening `(` has already
    /// been consumed and the closing `)` has not.
    fn parse_arg_list(&mut self, annotation: &mut Annotation) -> Result<(), Error> {
        if self.peek()?.kind == TokenKind::RParen {
            self.advance()?;
            return Ok(());
        }
        loop {
            let value = self.parse_value()?;
            annotation.push_arg(value);
            match self.peek()?.kind {
                TokenKind::Comma => {
                    self.advance()?;
                    if self.peek()?.kind == TokenKind::RParen {
                        self.advance()?;
                        break;
                    }
                }
                TokenKind::RParen => {
                    self.advance()?;
                    break;
                }
                _ => {
                    let tok = self.peek()?.clone();
                    return Err(Error::new(
                        ErrorKind::Expected,
                        tok.span,
                        "expected ',' or ')' in annotation argument list",
                    ));
                }
            }
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value, Error> {
        let tok = self.peek()?.clone();
        match tok.kind {
            TokenKind::LCurly => {
                self.advance()?;
                Ok(Value::Object(self.parse_object()?))
            }
            TokenKind::LSquare => {
                self.advance()?;
                Ok(Value::Array(self.parse_array()?))
            }
            TokenKind::True => {
                self.advance()?;
                Ok(Value::Bool(true))
            }
            TokenKind::False => {
                self.advance()?;
                Ok(Value::Bool(false))
            }
            TokenKind::Null => {
                self.advance()?;
                Ok(Value::Null)
            }
            TokenKind::Int => {
                self.advance()?;
                Ok(Value::Int(num::parse_int(&tok.text, tok.span)?))
            }
            TokenKind::Float => {
                self.advance()?;
                Ok(Value::Float(num::parse_float(&tok.text, tok.span)?))
            }
            TokenKind::String | TokenKind::TripleString => {
                self.advance()?;
                Ok(Value::String(tok.text))
            }
            TokenKind::Decimal => {
                self.advance()?;
                Ok(Value::Decimal(tok.text))
            }
            TokenKind::DateTime => {
                self.advance()?;
                Ok(Value::DateTime(tok.text))
            }
            TokenKind::Duration => {
                self.advance()?;
                Ok(Value::Duration(tok.text))
            }
            TokenKind::Uuid => {
                self.advance()?;
                if codec::is_valid_uuid(&tok.text) {
                    Ok(Value::Uuid(tok.text))
                } else {
                    Err(Error::new(
                        ErrorKind::InvalidUuid,
                        tok.span,
                        format!("invalid UUID literal '{}'", tok.text),
                    ))
                }
            }
            TokenKind::Bytes => {
                self.advance()?;
                codec::decode_base64(&tok.text)
                    .map(Value::Bytes)
                    .map_err(|msg| Error::new(ErrorKind::InvalidBase64, tok.span, msg))
            }
            _ => Err(Error::new(ErrorKind::Expected, tok.span, format!("expected a value, found {:?}", tok.kind))),
        }
    }

    fn parse_object(&mut self) -> Result<Object, Error> {
        let mut obj = Object::new();
        if self.peek()?.kind == TokenKind::RCurly {
            self.advance()?;
            return Ok(obj);
        }
        loop {
            let key = self.parse_key()?;
            self.expect(TokenKind::Colon)?;
            let node = self.parse_node()?;
            obj.set(key, node);

            match self.peek()?.kind {
                TokenKind::Comma => {
                    self.advance()?;
                    if self.peek()?.kind == TokenKind::RCurly {
                        self.advance()?;
                        break;
                    }
                }
                TokenKind::RCurly => {
                    self.advance()?;
                    break;
                }
                TokenKind::Ident | TokenKind::String => {
                    // no separator comma; the next entry starts immediately
                }
                _ => {
                    let tok = self.peek()?.clone();
                    return Err(Error::new(
                        ErrorKind::Expected,
                        tok.span,
                        "expected ',', '}', or the next key in object",
                    ));
                }
            }
        }
        Ok(obj)
    }

    fn parse_array(&mut self) -> Result<Array, Error> {
        let mut arr = Array::new();
        if self.peek()?.kind == TokenKind::RSquare {
            self.advance()?;
            return Ok(arr);
        }
        loop {
            let node = self.parse_node()?;
            arr.push(node);

            match self.peek()?.kind {
                TokenKind::Comma => {
                    self.advance()?;
                    if self.peek()?.kind == TokenKind::RSquare {
                        self.advance()?;
                        break;
                    }
                }
                TokenKind::RSquare => {
                    self.advance()?;
                    break;
                }
                _ => {
                    // optional separator comma omitted; retry as the next
                    // element. parse_node errors out if nothing valid
                    // follows, so this cannot loop forever.
                }
            }
        }
        Ok(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;

    #[test]
    fn empty_input_is_empty_document() {
        let doc = parse("").unwrap();
        assert!(doc.prolog().is_empty());
        assert!(doc.values().is_empty());
    }

    #[test]
    fn whitespace_and_comments_only_is_empty_document() {
        let doc = parse("  // hi\n /* block */ ").unwrap();
        assert!(doc.values().is_empty());
    }

    #[test]
    fn prolog_and_explicit_object() {
        let doc = parse(r#"$schema: "https://ex/s", $version: 2, { answer: 42 }"#).unwrap();
        assert_eq!(doc.prolog().len(), 2);
        assert_eq!(doc.prolog()[0].name, "schema");
        assert_eq!(doc.prolog()[0].value, Value::String("https://ex/s".into()));
        assert_eq!(doc.prolog()[1].name, "version");
        assert_eq!(doc.prolog()[1].value, Value::Int(2));

        assert_eq!(doc.values().len(), 1);
        let obj = doc.values()[0].value.as_object().unwrap();
        assert_eq!(obj.get("answer").unwrap().value, Value::Int(42));
    }

    #[test]
    fn implicit_object() {
        let doc = parse("name: \"xcdn\",\nnested: { flag: true },").unwrap();
        assert_eq!(doc.values().len(), 1);
        let obj = doc.values()[0].value.as_object().unwrap();
        assert_eq!(obj.get("name").unwrap().value, Value::String("xcdn".into()));
        let nested = obj.get("nested").unwrap().value.as_object().unwrap();
        assert_eq!(nested.get("flag").unwrap().value, Value::Bool(true));
    }

    #[test]
    fn decorations_and_bytes() {
        let doc = parse(r#"@mime("image/png") #thumbnail b"aGVsbG8=""#).unwrap();
        assert_eq!(doc.values().len(), 1);
        let node = &doc.values()[0];
        assert_eq!(node.value, Value::Bytes(b"hello".to_vec()));
        assert!(node.has_tag("thumbnail"));
        let ann = node.find_annotation("mime").unwrap();
        assert_eq!(ann.arg(0), Some(&Value::String("image/png".into())));
    }

    #[test]
    fn stream_of_values() {
        let doc = parse("{ a: 1 }\n42\n").unwrap();
        assert_eq!(doc.values().len(), 2);
        assert_eq!(doc.values()[0].value.as_object().unwrap().get("a").unwrap().value, Value::Int(1));
        assert_eq!(doc.values()[1].value, Value::Int(42));
    }

    #[test]
    fn missing_colon_is_expected_error() {
        let err = parse("{ a 1 }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Expected);
    }

    #[test]
    fn all_typed_scalars() {
        let input = concat!(
            "n: null, b: true, i: 42, f: 3.14, s: \"hello\", d: d\"19.99\", ",
            "bytes: b\"aGVsbG8=\", dt: t\"2025-01-15T10:30:00Z\", dur: r\"PT30S\", ",
            "uuid: u\"550e8400-e29b-41d4-a716-446655440000\", arr: [1, 2], obj: { a: 1 }",
        );
        let doc = parse(input).unwrap();
        let obj = doc.values()[0].value.as_object().unwrap();
        assert_eq!(obj.get("n").unwrap().value, Value::Null);
        assert_eq!(obj.get("b").unwrap().value, Value::Bool(true));
        assert_eq!(obj.get("i").unwrap().value, Value::Int(42));
        assert_eq!(obj.get("f").unwrap().value, Value::Float(3.14));
        assert_eq!(obj.get("s").unwrap().value, Value::String("hello".into()));
        assert_eq!(obj.get("d").unwrap().value, Value::Decimal("19.99".into()));
        assert_eq!(obj.get("bytes").unwrap().value, Value::Bytes(b"hello".to_vec()));
        assert_eq!(obj.get("dt").unwrap().value, Value::DateTime("2025-01-15T10:30:00Z".into()));
        assert_eq!(obj.get("dur").unwrap().value, Value::Duration("PT30S".into()));
        assert_eq!(
            obj.get("uuid").unwrap().value,
            Value::Uuid("550e8400-e29b-41d4-a716-446655440000".into())
        );
        assert_eq!(obj.get("arr").unwrap().value.as_array().unwrap().len(), 2);
        assert_eq!(obj.get("obj").unwrap().value.as_object().unwrap().len(), 1);
    }

    #[test]
    fn invalid_uuid_fails() {
        let err = parse(r#"u"not-a-uuid""#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidUuid);
    }

    #[test]
    fn invalid_base64_fails() {
        let err = parse(r#"b"***""#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidBase64);
    }

    #[test]
    fn bare_identifier_at_root_is_error() {
        let err = parse("oops").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Expected);
    }

    #[test]
    fn object_entries_without_commas() {
        let doc = parse("{a:1 b:2}").unwrap();
        let obj = doc.values()[0].value.as_object().unwrap();
        assert_eq!(obj.get("a").unwrap().value, Value::Int(1));
        assert_eq!(obj.get("b").unwrap().value, Value::Int(2));
    }

    #[test]
    fn duplicate_keys_last_wins_and_keeps_position() {
        let doc = parse("{a: 1, b: 2, a: 3}").unwrap();
        let obj = doc.values()[0].value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.key_at(0), Some("a"));
        assert_eq!(obj.get("a").unwrap().value, Value::Int(3));
    }

    #[test]
    fn empty_object_and_array() {
        let doc = parse("{obj: {}, arr: []}").unwrap();
        let obj = doc.values()[0].value.as_object().unwrap();
        assert!(obj.get("obj").unwrap().value.as_object().unwrap().is_empty());
        assert!(obj.get("arr").unwrap().value.as_array().unwrap().is_empty());
    }

    #[test]
    fn integer_bounds() {
        let doc = parse("[9223372036854775807, -9223372036854775808]").unwrap();
        let arr = doc.values()[0].value.as_array().unwrap();
        assert_eq!(arr.get(0).unwrap().value, Value::Int(i64::MAX));
        assert_eq!(arr.get(1).unwrap().value, Value::Int(i64::MIN));

        let err = parse("9223372036854775808").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidNumber);
    }

    #[test]
    fn value_stream_of_plain_strings() {
        let doc = parse("\"a\" \"b\"").unwrap();
        assert_eq!(doc.values().len(), 2);
        assert_eq!(doc.values()[0].value, Value::String("a".into()));
        assert_eq!(doc.values()[1].value, Value::String("b".into()));
    }
}
