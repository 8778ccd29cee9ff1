//! The in-memory xCDN document model.
//!
//! A [`Document`] is a prolog of [`Directive`]s followed by a stream of
//! [`Node`]s. Every value in the tree — whether a top-level stream entry, an
//! object member, or an array element — is wrapped in a `Node`, since tags
//! and annotations can decorate a value at any position.

use indexmap::IndexMap;

// ----------------------------------------------------------------------------

/// The closed set of value shapes xCDN can represent.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Verbatim body of a `d"…"` literal; not interpreted as any particular
    /// decimal representation.
    Decimal(String),
    String(String),
    Bytes(Vec<u8>),
    /// Verbatim body of a `t"…"` literal.
    DateTime(String),
    /// Verbatim body of a `r"…"` literal.
    Duration(String),
    /// Validated but otherwise verbatim body of a `u"…"` literal.
    Uuid(String),
    Array(Array),
    Object(Object),
}

impl Value {
    pub fn as_bool(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    pub fn as_int(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            _ => 0,
        }
    }

    pub fn as_float(&self) -> f64 {
        match self {
            Value::Float(n) => *n,
            Value::Int(n) => *n as f64,
            _ => 0.0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Value::String(s) | Value::Decimal(s) | Value::DateTime(s) | Value::Duration(s) | Value::Uuid(s) => s,
            _ => "",
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Value::Bytes(b) => b,
            _ => &[],
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

// ----------------------------------------------------------------------------

/// An `@name(args…)` annotation attached to a [`Node`].
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Annotation {
    pub name: String,
    args: Vec<Value>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), args: Vec::new() }
    }

    pub fn push_arg(&mut self, value: Value) {
        self.args.push(value);
    }

    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

// ----------------------------------------------------------------------------

/// A value together with its ordered `#tag` markers and `@annotation(…)`s.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Node {
    pub value: Value,
    tags: Vec<String>,
    annotations: Vec<Annotation>,
}

impl Node {
    pub fn new(value: Value) -> Self {
        Self { value, tags: Vec::new(), annotations: Vec::new() }
    }

    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    pub fn tag_at(&self, index: usize) -> Option<&str> {
        self.tags.get(index).map(String::as_str)
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn find_annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.find_annotation(name).is_some()
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

// ----------------------------------------------------------------------------

/// An ordered sequence of [`Node`]s.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Array {
    items: Vec<Node>,
}

impl Array {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, node: Node) {
        self.items.push(node);
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ----------------------------------------------------------------------------

/// An ordered, key-unique map of [`Node`]s. Setting an existing key replaces
/// its value in place, preserving that key's original position.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Object {
    entries: IndexMap<String, Node>,
}

impl Object {
    pub fn new() -> Self {
        Self { entries: IndexMap::new() }
    }

    /// Inserts or replaces the member at `key`. An existing key keeps its
    /// original position in iteration order; a new key is appended.
    pub fn set(&mut self, key: impl Into<String>, node: Node) {
        self.entries.insert(key.into(), node);
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.entries.get_index(index).map(|(k, _)| k.as_str())
    }

    pub fn node_at(&self, index: usize) -> Option<&Node> {
        self.entries.get_index(index).map(|(_, v)| v)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ----------------------------------------------------------------------------

/// A prolog `$name: value` directive.
#[derive(Clone, PartialEq, Debug)]
pub struct Directive {
    pub name: String,
    pub value: Value,
}

impl Directive {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self { name: name.into(), value }
    }
}

// ----------------------------------------------------------------------------

/// A parsed xCDN source: an ordered prolog plus an ordered stream of
/// top-level values.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Document {
    prolog: Vec<Directive>,
    values: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self { prolog: Vec::new(), values: Vec::new() }
    }

    pub fn push_directive(&mut self, directive: Directive) {
        self.prolog.push(directive);
    }

    pub fn push_value(&mut self, node: Node) {
        self.values.push(node);
    }

    pub fn prolog(&self) -> &[Directive] {
        &self.prolog
    }

    pub fn values(&self) -> &[Node] {
        &self.values
    }

    pub fn get_directive(&self, name: &str) -> Option<&Directive> {
        self.prolog.iter().find(|d| d.name == name)
    }

    /// Returns the top-level value at `index` in the value stream.
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.values.get(index)
    }

    /// Looks up `key` in the first top-level value, when that value is an
    /// object. Shorthand for the common case of a document written as a
    /// single (implicit) top-level object.
    pub fn get_key(&self, key: &str) -> Option<&Node> {
        self.get(0)?.value.as_object()?.get(key)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.get_key(key).is_some()
    }

    /// Resolves a dotted path (`a.b.c`) through nested objects, starting
    /// from the first top-level value. Each segment must name an object
    /// member; the final segment's node is returned.
    pub fn get_path(&self, path: &str) -> Option<&Node> {
        let mut node = self.get(0)?;
        for segment in path.split('.') {
            node = node.value.as_object()?.get(segment)?;
        }
        Some(node)
    }
}
