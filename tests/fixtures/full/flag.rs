// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Flag`: bool with bool representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flag(pub bool);

impl Representable for Flag {
    fn to_node(&self) -> ipld::Node {
        self.0.to_node()
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        Representable::from_node(node).map(Self)
    }
}

impl StringRepr for Flag {
    fn to_repr_string(&self) -> String {
        self.0.to_repr_string()
    }
    fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError> {
        StringRepr::from_repr_string(s).map(Self)
    }
}
