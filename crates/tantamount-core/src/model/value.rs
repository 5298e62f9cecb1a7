//! Dynamic value graph compared by the engine
//!
//! The engine does not compare Rust types directly; it compares nodes in a
//! dynamic graph. A `Value` is a cheap handle to one node: cloning a handle
//! aliases the node, so clones share identity, and cycles are built by
//! storing a clone of a node inside one of its own members.

use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use tantamount_core_types::{ObjectIdentity, TypeToken};

/// A node in a dynamic value graph
///
/// Handles are cheap to clone and compare by reference with [`Value::ptr_eq`].
/// The mutators (`set_field`, `push`, `insert`) exist so callers can build
/// shared and cyclic graphs; the engine never mutates values while comparing.
#[derive(Clone)]
pub struct Value(Rc<RefCell<ValueKind>>);

/// The kinds of value the engine understands
#[derive(Debug)]
pub enum ValueKind {
    /// The absent value
    Unit,
    /// Boolean scalar
    Bool(bool),
    /// Signed integer scalar
    Int(i64),
    /// Floating-point scalar
    Float(f64),
    /// Text scalar
    Text(String),
    /// Ordered sequence of values
    Seq(Vec<Value>),
    /// String-keyed map of values
    Map(BTreeMap<String, Value>),
    /// Named record with ordered fields
    Record {
        type_name: String,
        fields: Vec<(String, Value)>,
    },
}

impl Value {
    fn from_kind(kind: ValueKind) -> Self {
        Self(Rc::new(RefCell::new(kind)))
    }

    /// The absent value
    pub fn unit() -> Self {
        Self::from_kind(ValueKind::Unit)
    }

    /// A boolean scalar node
    pub fn bool(value: bool) -> Self {
        Self::from_kind(ValueKind::Bool(value))
    }

    /// An integer scalar node
    pub fn int(value: i64) -> Self {
        Self::from_kind(ValueKind::Int(value))
    }

    /// A float scalar node
    pub fn float(value: f64) -> Self {
        Self::from_kind(ValueKind::Float(value))
    }

    /// A text scalar node
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_kind(ValueKind::Text(text.into()))
    }

    /// A sequence node over the given elements
    pub fn seq(items: Vec<Value>) -> Self {
        Self::from_kind(ValueKind::Seq(items))
    }

    /// A map node over the given entries
    pub fn map(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self::from_kind(ValueKind::Map(entries.into_iter().collect()))
    }

    /// A record node with a type name and ordered fields
    pub fn record<N: Into<String>>(type_name: impl Into<String>, fields: Vec<(N, Value)>) -> Self {
        Self::from_kind(ValueKind::Record {
            type_name: type_name.into(),
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        })
    }

    /// Borrow the node's kind
    pub fn kind(&self) -> Ref<'_, ValueKind> {
        self.0.borrow()
    }

    /// Reference identity of the node
    pub fn identity(&self) -> ObjectIdentity {
        ObjectIdentity::from_addr(Rc::as_ptr(&self.0) as usize)
    }

    /// Whether two handles alias the same node
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Runtime type of the node
    pub fn type_token(&self) -> TypeToken {
        match &*self.0.borrow() {
            ValueKind::Unit => TypeToken::Unit,
            ValueKind::Bool(_) => TypeToken::Bool,
            ValueKind::Int(_) => TypeToken::Int,
            ValueKind::Float(_) => TypeToken::Float,
            ValueKind::Text(_) => TypeToken::Text,
            ValueKind::Seq(_) => TypeToken::Seq,
            ValueKind::Map(_) => TypeToken::Map,
            ValueKind::Record { type_name, .. } => TypeToken::Record(type_name.clone()),
        }
    }

    /// Whether the node is the absent value
    pub fn is_unit(&self) -> bool {
        matches!(&*self.0.borrow(), ValueKind::Unit)
    }

    /// Boolean payload, if the node is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match &*self.0.borrow() {
            ValueKind::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer payload, if the node is an int
    pub fn as_int(&self) -> Option<i64> {
        match &*self.0.borrow() {
            ValueKind::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Float payload, if the node is a float
    pub fn as_float(&self) -> Option<f64> {
        match &*self.0.borrow() {
            ValueKind::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Text payload, if the node is text
    pub fn as_text(&self) -> Option<String> {
        match &*self.0.borrow() {
            ValueKind::Text(text) => Some(text.clone()),
            _ => None,
        }
    }

    /// Element handles of a sequence node
    pub fn elements(&self) -> Option<Vec<Value>> {
        match &*self.0.borrow() {
            ValueKind::Seq(items) => Some(items.clone()),
            _ => None,
        }
    }

    /// Entry handles of a map node, in key order
    pub fn entries(&self) -> Option<Vec<(String, Value)>> {
        match &*self.0.borrow() {
            ValueKind::Map(entries) => Some(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Field handles of a record node, in declaration order
    pub fn fields(&self) -> Option<Vec<(String, Value)>> {
        match &*self.0.borrow() {
            ValueKind::Record { fields, .. } => Some(fields.clone()),
            _ => None,
        }
    }

    /// Field of a record node by name
    pub fn field(&self, name: &str) -> Option<Value> {
        match &*self.0.borrow() {
            ValueKind::Record { fields, .. } => fields
                .iter()
                .find(|(field_name, _)| field_name == name)
                .map(|(_, value)| value.clone()),
            _ => None,
        }
    }

    /// Insert or replace a record field, returning whether this node is a record
    ///
    /// Assigning a clone of the record's own handle to a field is how cyclic
    /// graphs are built.
    pub fn set_field(&self, name: impl Into<String>, value: Value) -> bool {
        let name = name.into();
        match &mut *self.0.borrow_mut() {
            ValueKind::Record { fields, .. } => {
                match fields.iter_mut().find(|(existing, _)| *existing == name) {
                    Some(slot) => slot.1 = value,
                    None => fields.push((name, value)),
                }
                true
            }
            _ => false,
        }
    }

    /// Append a sequence element, returning whether this node is a sequence
    pub fn push(&self, value: Value) -> bool {
        match &mut *self.0.borrow_mut() {
            ValueKind::Seq(items) => {
                items.push(value);
                true
            }
            _ => false,
        }
    }

    /// Insert or replace a map entry, returning whether this node is a map
    pub fn insert(&self, key: impl Into<String>, value: Value) -> bool {
        match &mut *self.0.borrow_mut() {
            ValueKind::Map(entries) => {
                entries.insert(key.into(), value);
                true
            }
            _ => false,
        }
    }

    /// Deep structural equality of two graphs
    ///
    /// Scalars compare by payload (two NaN floats are equal; ints and floats
    /// never are), sequences element-wise, maps entry-wise, and records by
    /// type name plus fields in declaration order. Revisiting a pair of
    /// composite nodes already under comparison terminates that branch as
    /// equal, so cyclic graphs cannot loop.
    pub fn structurally_equal(&self, other: &Value) -> bool {
        let mut in_progress = HashSet::new();
        eq_values(self, other, &mut in_progress)
    }

    /// Structural copy of the reachable graph with fresh node identities
    ///
    /// Shared nodes stay shared in the copy and cycles are preserved, so the
    /// copy is structurally equal to the original without aliasing any of
    /// its nodes.
    pub fn deep_clone(&self) -> Value {
        let mut memo = HashMap::new();
        self.clone_node(&mut memo)
    }

    fn clone_node(&self, memo: &mut HashMap<ObjectIdentity, Value>) -> Value {
        if let Some(found) = memo.get(&self.identity()) {
            return found.clone();
        }
        match &*self.0.borrow() {
            ValueKind::Unit => Value::unit(),
            ValueKind::Bool(value) => Value::bool(*value),
            ValueKind::Int(value) => Value::int(*value),
            ValueKind::Float(value) => Value::float(*value),
            ValueKind::Text(text) => Value::text(text.clone()),
            ValueKind::Seq(items) => {
                let copy = Value::seq(Vec::new());
                memo.insert(self.identity(), copy.clone());
                for item in items {
                    let cloned = item.clone_node(memo);
                    copy.push(cloned);
                }
                copy
            }
            ValueKind::Map(entries) => {
                let copy = Value::map(Vec::<(String, Value)>::new());
                memo.insert(self.identity(), copy.clone());
                for (key, value) in entries {
                    let cloned = value.clone_node(memo);
                    copy.insert(key.clone(), cloned);
                }
                copy
            }
            ValueKind::Record { type_name, fields } => {
                let copy = Value::record(type_name.clone(), Vec::<(String, Value)>::new());
                memo.insert(self.identity(), copy.clone());
                for (name, value) in fields {
                    let cloned = value.clone_node(memo);
                    copy.set_field(name.clone(), cloned);
                }
                copy
            }
        }
    }

    fn render_into(&self, out: &mut String, active: &mut Vec<ObjectIdentity>) {
        let composite = self.type_token().is_composite();
        if composite {
            if active.contains(&self.identity()) {
                out.push_str("<cycle>");
                return;
            }
            active.push(self.identity());
        }
        match &*self.0.borrow() {
            ValueKind::Unit => out.push_str("<unit>"),
            ValueKind::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
            ValueKind::Int(value) => out.push_str(&value.to_string()),
            ValueKind::Float(value) => out.push_str(&format!("{:?}", value)),
            ValueKind::Text(text) => out.push_str(&format!("{:?}", text)),
            ValueKind::Seq(items) => {
                out.push('[');
                for (position, item) in items.iter().enumerate() {
                    if position > 0 {
                        out.push_str(", ");
                    }
                    item.render_into(out, active);
                }
                out.push(']');
            }
            ValueKind::Map(entries) => {
                out.push('{');
                for (position, (key, value)) in entries.iter().enumerate() {
                    if position > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&format!("{:?}: ", key));
                    value.render_into(out, active);
                }
                out.push('}');
            }
            ValueKind::Record { type_name, fields } => {
                out.push_str(type_name);
                if fields.is_empty() {
                    out.push_str(" {}");
                } else {
                    out.push_str(" { ");
                    for (position, (name, value)) in fields.iter().enumerate() {
                        if position > 0 {
                            out.push_str(", ");
                        }
                        out.push_str(name);
                        out.push_str(": ");
                        value.render_into(out, active);
                    }
                    out.push_str(" }");
                }
            }
        }
        if composite {
            active.pop();
        }
    }
}

fn float_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn eq_values(
    a: &Value,
    b: &Value,
    in_progress: &mut HashSet<(ObjectIdentity, ObjectIdentity)>,
) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    if a.type_token().is_composite()
        && b.type_token().is_composite()
        && !in_progress.insert((a.identity(), b.identity()))
    {
        // Already comparing this pair higher up the chain
        return true;
    }
    let left = a.0.borrow();
    let right = b.0.borrow();
    match (&*left, &*right) {
        (ValueKind::Unit, ValueKind::Unit) => true,
        (ValueKind::Bool(x), ValueKind::Bool(y)) => x == y,
        (ValueKind::Int(x), ValueKind::Int(y)) => x == y,
        (ValueKind::Float(x), ValueKind::Float(y)) => float_eq(*x, *y),
        (ValueKind::Text(x), ValueKind::Text(y)) => x == y,
        (ValueKind::Seq(xs), ValueKind::Seq(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(x, y)| eq_values(x, y, in_progress))
        }
        (ValueKind::Map(xs), ValueKind::Map(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|((kx, x), (ky, y))| kx == ky && eq_values(x, y, in_progress))
        }
        (
            ValueKind::Record {
                type_name: x_name,
                fields: xs,
            },
            ValueKind::Record {
                type_name: y_name,
                fields: ys,
            },
        ) => {
            x_name == y_name
                && xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|((nx, x), (ny, y))| nx == ny && eq_values(x, y, in_progress))
        }
        _ => false,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render_into(&mut out, &mut Vec::new());
        f.write_str(&out)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
