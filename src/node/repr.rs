//! Traits and helpers that generated bindings build on.
//!
//! `Representable` maps a value to and from its representation-level
//! [`Node`]; `StringRepr` covers the types that can appear inside string
//! representations (stringjoin fields, stringprefix members, map keys).
use std::hash::Hash;

use indexmap::IndexMap;

use super::{Kind, Link, Node};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("expected {expected}, found {found}")]
    WrongKind { expected: Kind, found: Kind },
    #[error("missing required field {0:?}")]
    MissingField(String),
    #[error("unexpected field {0:?}")]
    UnexpectedField(String),
    #[error("no member matches discriminant {0:?}")]
    UnknownDiscriminant(String),
    #[error("{0}")]
    Invalid(String),
    #[error("in {context}: {source}")]
    Within {
        context: String,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DecodeError::Invalid(msg.into())
    }

    pub fn within(self, context: impl Into<String>) -> Self {
        DecodeError::Within { context: context.into(), source: Box::new(self) }
    }

    pub fn wrong_kind(expected: Kind, found: &Node) -> Self {
        DecodeError::WrongKind { expected, found: found.kind() }
    }
}

pub trait Representable: Sized {
    fn to_node(&self) -> Node;
    fn from_node(node: &Node) -> Result<Self, DecodeError>;
}

pub trait StringRepr: Sized {
    fn to_repr_string(&self) -> String;
    fn from_repr_string(s: &str) -> Result<Self, DecodeError>;
}

/// Byte strings. A newtype so `Vec<T>` stays the list mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Bytes(pub Vec<u8>);

// ————————————————————————————————————————————————————————————————————————————
// SCALARS
// ————————————————————————————————————————————————————————————————————————————

impl Representable for bool {
    fn to_node(&self) -> Node {
        Node::Bool(*self)
    }
    fn from_node(node: &Node) -> Result<Self, DecodeError> {
        match node {
            Node::Bool(b) => Ok(*b),
            other => Err(DecodeError::wrong_kind(Kind::Bool, other)),
        }
    }
}

impl Representable for i64 {
    fn to_node(&self) -> Node {
        Node::Int(*self)
    }
    fn from_node(node: &Node) -> Result<Self, DecodeError> {
        match node {
            Node::Int(i) => Ok(*i),
            other => Err(DecodeError::wrong_kind(Kind::Int, other)),
        }
    }
}

impl Representable for f64 {
    fn to_node(&self) -> Node {
        Node::Float(*self)
    }
    fn from_node(node: &Node) -> Result<Self, DecodeError> {
        match node {
            Node::Float(f) => Ok(*f),
            // integral floats survive a json round trip as ints
            Node::Int(i) => int_to_float(*i),
            other => Err(DecodeError::wrong_kind(Kind::Float, other)),
        }
    }
}

impl Representable for String {
    fn to_node(&self) -> Node {
        Node::String(self.clone())
    }
    fn from_node(node: &Node) -> Result<Self, DecodeError> {
        expect_str(node).map(str::to_string)
    }
}

impl Representable for Bytes {
    fn to_node(&self) -> Node {
        Node::Bytes(self.0.clone())
    }
    fn from_node(node: &Node) -> Result<Self, DecodeError> {
        match node {
            Node::Bytes(b) => Ok(Bytes(b.clone())),
            other => Err(DecodeError::wrong_kind(Kind::Bytes, other)),
        }
    }
}

impl Representable for Link {
    fn to_node(&self) -> Node {
        Node::Link(self.clone())
    }
    fn from_node(node: &Node) -> Result<Self, DecodeError> {
        match node {
            Node::Link(l) => Ok(l.clone()),
            other => Err(DecodeError::wrong_kind(Kind::Link, other)),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// WRAPPERS
// ————————————————————————————————————————————————————————————————————————————

/// `Option` is the nullable mapping: `None` is an explicit null.
impl<T: Representable> Representable for Option<T> {
    fn to_node(&self) -> Node {
        match self {
            Some(v) => v.to_node(),
            None => Node::Null,
        }
    }
    fn from_node(node: &Node) -> Result<Self, DecodeError> {
        match node {
            Node::Null => Ok(None),
            other => T::from_node(other).map(Some),
        }
    }
}

impl<T: Representable> Representable for Box<T> {
    fn to_node(&self) -> Node {
        self.as_ref().to_node()
    }
    fn from_node(node: &Node) -> Result<Self, DecodeError> {
        T::from_node(node).map(Box::new)
    }
}

impl<T: Representable> Representable for Vec<T> {
    fn to_node(&self) -> Node {
        Node::List(self.iter().map(Representable::to_node).collect())
    }
    fn from_node(node: &Node) -> Result<Self, DecodeError> {
        expect_list(node)?
            .iter()
            .enumerate()
            .map(|(i, n)| T::from_node(n).map_err(|e| e.within(format!("index {i}"))))
            .collect()
    }
}

impl<K, V> Representable for IndexMap<K, V>
where
    K: StringRepr + Hash + Eq,
    V: Representable,
{
    fn to_node(&self) -> Node {
        Node::Map(self.iter().map(|(k, v)| (k.to_repr_string(), v.to_node())).collect())
    }
    fn from_node(node: &Node) -> Result<Self, DecodeError> {
        let mut out = IndexMap::new();
        for (k, v) in expect_map(node)? {
            let key = K::from_repr_string(k).map_err(|e| e.within(format!("key {k:?}")))?;
            let value = V::from_node(v).map_err(|e| e.within(format!("key {k:?}")))?;
            out.insert(key, value);
        }
        Ok(out)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// STRING FORMS
// ————————————————————————————————————————————————————————————————————————————

impl StringRepr for String {
    fn to_repr_string(&self) -> String {
        self.clone()
    }
    fn from_repr_string(s: &str) -> Result<Self, DecodeError> {
        Ok(s.to_string())
    }
}

impl StringRepr for i64 {
    fn to_repr_string(&self) -> String {
        self.to_string()
    }
    fn from_repr_string(s: &str) -> Result<Self, DecodeError> {
        s.parse().map_err(|_| DecodeError::invalid(format!("{s:?} is not an int")))
    }
}

impl StringRepr for f64 {
    fn to_repr_string(&self) -> String {
        self.to_string()
    }
    fn from_repr_string(s: &str) -> Result<Self, DecodeError> {
        s.parse().map_err(|_| DecodeError::invalid(format!("{s:?} is not a float")))
    }
}

impl StringRepr for bool {
    fn to_repr_string(&self) -> String {
        self.to_string()
    }
    fn from_repr_string(s: &str) -> Result<Self, DecodeError> {
        match s {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(DecodeError::invalid(format!("{s:?} is not a bool"))),
        }
    }
}

impl<T: StringRepr> StringRepr for Box<T> {
    fn to_repr_string(&self) -> String {
        self.as_ref().to_repr_string()
    }
    fn from_repr_string(s: &str) -> Result<Self, DecodeError> {
        T::from_repr_string(s).map(Box::new)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// HELPERS FOR GENERATED CODE
// ————————————————————————————————————————————————————————————————————————————

/// Largest magnitude an `f64` holds without rounding.
pub const MAX_EXACT_FLOAT_INT: i64 = 1 << 53;

/// Ints standing in for floats, refused once the conversion would round.
pub fn int_to_float(i: i64) -> Result<f64, DecodeError> {
    if (-MAX_EXACT_FLOAT_INT..=MAX_EXACT_FLOAT_INT).contains(&i) {
        Ok(i as f64)
    } else {
        Err(DecodeError::invalid(format!("int {i} cannot be held exactly by a float")))
    }
}

pub fn expect_str(node: &Node) -> Result<&str, DecodeError> {
    node.as_str().ok_or_else(|| DecodeError::wrong_kind(Kind::String, node))
}

pub fn expect_map(node: &Node) -> Result<&[(String, Node)], DecodeError> {
    node.as_map().ok_or_else(|| DecodeError::wrong_kind(Kind::Map, node))
}

pub fn expect_list(node: &Node) -> Result<&[Node], DecodeError> {
    node.as_list().ok_or_else(|| DecodeError::wrong_kind(Kind::List, node))
}

pub fn expect_list_len(node: &Node, len: usize) -> Result<&[Node], DecodeError> {
    let items = expect_list(node)?;
    if items.len() != len {
        return Err(DecodeError::invalid(format!("expected {len} list entries, found {}", items.len())));
    }
    Ok(items)
}

pub fn expect_int(node: &Node) -> Result<i64, DecodeError> {
    match node {
        Node::Int(i) => Ok(*i),
        other => Err(DecodeError::wrong_kind(Kind::Int, other)),
    }
}

/// Map entries as borrowed pairs, the same shape [`list_pairs`] yields.
pub fn map_entries(node: &Node) -> Result<Vec<(&str, &Node)>, DecodeError> {
    Ok(expect_map(node)?.iter().map(|(k, v)| (k.as_str(), v)).collect())
}

pub fn lookup<T: Copy>(entries: &[(&str, T)], name: &str) -> Option<T> {
    entries.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
}

pub fn lookup_required<T: Copy>(entries: &[(&str, T)], name: &str) -> Result<T, DecodeError> {
    lookup(entries, name).ok_or_else(|| DecodeError::MissingField(name.to_string()))
}

pub fn reject_unknown<T>(entries: &[(&str, T)], known: &[&str]) -> Result<(), DecodeError> {
    match entries.iter().find(|(k, _)| !known.contains(k)) {
        Some((k, _)) => Err(DecodeError::UnexpectedField(k.to_string())),
        None => Ok(()),
    }
}

/// Split a stringjoin value into exactly `n` parts. The last part keeps any
/// further separators.
pub fn split_join<'a>(s: &'a str, sep: &str, n: usize) -> Result<Vec<&'a str>, DecodeError> {
    let parts: Vec<&str> = s.splitn(n, sep).collect();
    if parts.len() != n {
        return Err(DecodeError::invalid(format!(
            "expected {n} parts joined by {sep:?}, found {}",
            parts.len()
        )));
    }
    Ok(parts)
}

/// Parse `k<inner>v<entry>k<inner>v`.
pub fn split_pairs<'a>(s: &'a str, inner: &str, entry: &str) -> Result<Vec<(&'a str, &'a str)>, DecodeError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(entry)
        .map(|pair| {
            pair.split_once(inner)
                .ok_or_else(|| DecodeError::invalid(format!("{pair:?} is missing the {inner:?} delimiter")))
        })
        .collect()
}

pub fn join_pairs(pairs: &[(String, String)], inner: &str, entry: &str) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}{inner}{v}"))
        .collect::<Vec<_>>()
        .join(entry)
}

/// Read `[[k, v], ...]`.
pub fn list_pairs(node: &Node) -> Result<Vec<(&str, &Node)>, DecodeError> {
    expect_list(node)?
        .iter()
        .map(|pair| {
            let kv = expect_list_len(pair, 2)?;
            Ok((expect_str(&kv[0])?, &kv[1]))
        })
        .collect()
}
