// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Name`: string with string representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(pub String);

impl Representable for Name {
    fn to_node(&self) -> ipld::Node {
        self.0.to_node()
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        Representable::from_node(node).map(Self)
    }
}

impl StringRepr for Name {
    fn to_repr_string(&self) -> String {
        self.0.to_repr_string()
    }
    fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError> {
        StringRepr::from_repr_string(s).map(Self)
    }
}
