//! xCDN: lexer, recursive-descent parser, document model, and serializer
//! for a human-first, JSON-superset configuration notation.
//!
//! ```
//! let doc = xcdn::parse(r#"name: "demo", port: 8080"#).unwrap();
//! let text = xcdn::serialize(&doc, &xcdn::Format::default());
//! assert!(text.contains("name"));
//! ```

pub mod ast;
mod codec;
mod diag;
mod format;
mod lexer;
mod parser;

pub use ast::{Annotation, Array, Directive, Document, Node, Object, Value};
pub use diag::{Error, ErrorKind, Span};
pub use format::{serialize, Format};
pub use parser::parse;
