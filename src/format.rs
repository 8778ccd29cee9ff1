//! Tree-walking serializer: walks a [`Document`] and writes a textual form
//! honoring a [`Format`] configuration.

use crate::ast::{Annotation, Array, Document, Node, Object, Value};
use crate::codec;
use crate::lexer::ident;

/// Layout configuration for [`serialize`]. Defaults to `{ pretty: true,
/// indent: 2, trailing_commas: true }`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Format {
    pub pretty: bool,
    pub indent: usize,
    pub trailing_commas: bool,
}

impl Default for Format {
    fn default() -> Self {
        Self { pretty: true, indent: 2, trailing_commas: true }
    }
}

impl Format {
    /// The compact preset: `{ pretty: false, indent: 0, trailing_commas:
    /// false }`.
    pub const fn compact() -> Self {
        Self { pretty: false, indent: 0, trailing_commas: false }
    }
}

/// Serializes `doc` to text under `format`.
pub fn serialize(doc: &Document, format: &Format) -> String {
    let mut writer = Writer::new(*format);
    writer.write_document(doc);
    writer.buf
}

struct Writer {
    format: Format,
    buf: String,
}

impl Writer {
    fn new(format: Format) -> Self {
        Self { format, buf: String::new() }
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..(depth * self.format.indent) {
            self.buf.push(' ');
        }
    }

    fn write_document(&mut self, doc: &Document) {
        for directive in doc.prolog() {
            self.buf.push('$');
            self.buf.push_str(&directive.name);
            self.buf.push_str(": ");
            self.write_value(&directive.value, 0);
            if self.format.trailing_commas {
                self.buf.push(',');
            }
            self.buf.push('\n');
        }

        let values = doc.values();
        for (i, node) in values.iter().enumerate() {
            if i > 0 {
                self.buf.push(if self.format.pretty { '\n' } else { ' ' });
            }
            self.write_node(node, 0);
        }
    }

    fn write_node(&mut self, node: &Node, depth: usize) {
        for tag in node.tags() {
            self.buf.push('#');
            self.buf.push_str(tag);
            self.buf.push(' ');
        }
        for annotation in node.annotations() {
            self.write_annotation(annotation);
            self.buf.push(' ');
        }
        self.write_value(&node.value, depth);
    }

    fn write_annotation(&mut self, annotation: &Annotation) {
        self.buf.push('@');
        self.buf.push_str(&annotation.name);
        if annotation.arg_count() == 0 {
            return;
        }
        self.buf.push('(');
        for (i, arg) in annotation.args().iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            // Annotation arguments always serialize compact, regardless of
            // the outer format.
            let mut inner = Writer::new(Format::compact());
            inner.write_value(arg, 0);
            self.buf.push_str(&inner.buf);
        }
        self.buf.push(')');
    }

    fn write_value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.buf.push_str("null"),
            Value::Bool(true) => self.buf.push_str("true"),
            Value::Bool(false) => self.buf.push_str("false"),
            Value::Int(n) => self.buf.push_str(&n.to_string()),
            Value::Float(f) => self.buf.push_str(&format_float(*f)),
            Value::Decimal(s) => self.write_typed('d', s),
            Value::String(s) => self.write_string(s),
            Value::Bytes(b) => self.write_bytes(b),
            Value::DateTime(s) => self.write_typed('t', s),
            Value::Duration(s) => self.write_typed('r', s),
            Value::Uuid(s) => self.write_typed('u', s),
            Value::Array(a) => self.write_array(a, depth),
            Value::Object(o) => self.write_object(o, depth),
        }
    }

    fn write_typed(&mut self, prefix: char, body: &str) {
        self.buf.push(prefix);
        self.buf.push('"');
        self.buf.push_str(body);
        self.buf.push('"');
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.push_str("b\"");
        self.buf.push_str(&codec::encode_base64(bytes));
        self.buf.push('"');
    }

    fn write_string(&mut self, s: &str) {
        self.buf.push('"');
        for c in s.chars() {
            match c {
                '\\' => self.buf.push_str("\\\\"),
                '"' => self.buf.push_str("\\\""),
                '\n' => self.buf.push_str("\\n"),
                '\r' => self.buf.push_str("\\r"),
                '\t' => self.buf.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    self.buf.push_str(&format!("\\u{:04X}", c as u32));
                }
                c => self.buf.push(c),
            }
        }
        self.buf.push('"');
    }

    fn write_key(&mut self, key: &str) {
        if is_plain_key(key) {
            self.buf.push_str(key);
        } else {
            self.write_string(key);
        }
    }

    fn write_object(&mut self, obj: &Object, depth: usize) {
        self.buf.push('{');
        let len = obj.len();
        if len == 0 {
            self.buf.push('}');
            return;
        }

        if self.format.pretty {
            self.buf.push('\n');
            for (key, node) in obj.iter() {
                self.indent(depth + 1);
                self.write_key(key);
                self.buf.push_str(": ");
                self.write_node(node, depth + 1);
                if self.format.trailing_commas {
                    self.buf.push(',');
                }
                self.buf.push('\n');
            }
            self.indent(depth);
            self.buf.push('}');
        } else {
            for (i, (key, node)) in obj.iter().enumerate() {
                if i > 0 {
                    self.buf.push_str(", ");
                }
                self.write_key(key);
                self.buf.push_str(": ");
                self.write_node(node, depth);
            }
            if self.format.trailing_commas {
                self.buf.push(',');
            }
            self.buf.push('}');
        }
    }

    fn write_array(&mut self, arr: &Array, depth: usize) {
        self.buf.push('[');
        let len = arr.len();
        if len == 0 {
            self.buf.push(']');
            return;
        }

        if self.format.pretty {
            self.buf.push('\n');
            for node in arr.iter() {
                self.indent(depth + 1);
                self.write_node(node, depth + 1);
                if self.format.trailing_commas {
                    self.buf.push(',');
                }
                self.buf.push('\n');
            }
            self.indent(depth);
            self.buf.push(']');
        } else {
            for (i, node) in arr.iter().enumerate() {
                if i > 0 {
                    self.buf.push_str(", ");
                }
                self.write_node(node, depth);
            }
            if self.format.trailing_commas {
                self.buf.push(',');
            }
            self.buf.push(']');
        }
    }
}

fn is_plain_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    match bytes.split_first() {
        Some((&first, rest)) => {
            ident::is_start(first) && rest.iter().all(|&b| ident::is_continue(b)) && !is_keyword(key)
        }
        None => false,
    }
}

fn is_keyword(text: &str) -> bool {
    matches!(text, "true" | "false" | "null")
}

fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return format!("{f}");
    }
    let s = format!("{f}");
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{s}.0")
    }
}
