//! Generic data-model tree.
//!
//! `Node` is what the encoders consume and what generated bindings encode to
//! and decode from. Maps keep their entries as an ordered list so a document
//! can be emitted exactly in the order it was built (duplicates included,
//! which matters when dumping a DMT that has not been validated yet).
pub mod ser;
pub mod repr;

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

pub use indexmap::IndexMap;
pub use repr::{Bytes, DecodeError, Representable, StringRepr};
pub use ser::to_node;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Link(Link),
    List(Vec<Node>),
    Map(Vec<(String, Node)>),
}

/// A link, carried as the textual form of its CID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Link(pub String);

/// Data-model kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Bytes,
    List,
    Map,
    Link,
}

// ————————————————————————————————————————————————————————————————————————————
// KIND
// ————————————————————————————————————————————————————————————————————————————

impl Kind {
    pub const ALL: [Kind; 9] = [
        Kind::Null,
        Kind::Bool,
        Kind::Int,
        Kind::Float,
        Kind::String,
        Kind::Bytes,
        Kind::List,
        Kind::Map,
        Kind::Link,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Link => "link",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("{s:?} is not a data model kind"))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// NODE
// ————————————————————————————————————————————————————————————————————————————

impl Node {
    pub fn kind(&self) -> Kind {
        match self {
            Node::Null => Kind::Null,
            Node::Bool(_) => Kind::Bool,
            Node::Int(_) => Kind::Int,
            Node::Float(_) => Kind::Float,
            Node::String(_) => Kind::String,
            Node::Bytes(_) => Kind::Bytes,
            Node::Link(_) => Kind::Link,
            Node::List(_) => Kind::List,
            Node::Map(_) => Kind::Map,
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Node::String(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// First entry under `key`, if this is a map.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(String, Node)]> {
        match self {
            Node::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    /// Recursively reorder map entries with `cmp`. Used by the canonical codecs.
    pub fn sort_maps_by<F>(&mut self, cmp: &F)
    where
        F: Fn(&str, &str) -> std::cmp::Ordering,
    {
        match self {
            Node::List(items) => {
                for item in items {
                    item.sort_maps_by(cmp);
                }
            }
            Node::Map(entries) => {
                for (_, v) in entries.iter_mut() {
                    v.sort_maps_by(cmp);
                }
                entries.sort_by(|(a, _), (b, _)| cmp(a, b));
            }
            _ => {}
        }
    }

    /// Depth-first search for the first node of the given kind.
    pub fn find_kind(&self, kind: Kind) -> Option<&Node> {
        if self.kind() == kind {
            return Some(self);
        }
        match self {
            Node::List(items) => items.iter().find_map(|n| n.find_kind(kind)),
            Node::Map(entries) => entries.iter().find_map(|(_, n)| n.find_kind(kind)),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Int(i),
                None => Node::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Node::String(s),
            Value::Array(xs) => Node::List(xs.into_iter().map(Node::from).collect()),
            Value::Object(m) => Node::Map(m.into_iter().map(|(k, v)| (k, Node::from(v))).collect()),
        }
    }
}

/// Bridge back to `serde_json::Value` so serde-derived types can be decoded
/// from a tree. Bytes become arrays of numbers, links become their CID text,
/// and repeated map keys collapse to the last entry.
impl From<&Node> for serde_json::Value {
    fn from(node: &Node) -> Self {
        use serde_json::Value;
        match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Int(i) => Value::from(*i),
            Node::Float(f) => serde_json::Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            Node::String(s) => Value::String(s.clone()),
            Node::Bytes(b) => Value::Array(b.iter().map(|x| Value::from(*x)).collect()),
            Node::Link(l) => Value::String(l.0.clone()),
            Node::List(xs) => Value::Array(xs.iter().map(Value::from).collect()),
            Node::Map(entries) => {
                let mut m = serde_json::Map::new();
                for (k, v) in entries {
                    m.insert(k.clone(), Value::from(v));
                }
                Value::Object(m)
            }
        }
    }
}

/// Streams the tree through any serde data format. Map entries are emitted in
/// stored order; links are emitted as their CID text.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Int(i) => serializer.serialize_i64(*i),
            Node::Float(f) => serializer.serialize_f64(*f),
            Node::String(s) => serializer.serialize_str(s),
            Node::Bytes(b) => serializer.serialize_bytes(b),
            Node::Link(l) => serializer.serialize_str(&l.0),
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
