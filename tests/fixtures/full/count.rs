// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Count`: int with int representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Count(pub i64);

impl Representable for Count {
    fn to_node(&self) -> ipld::Node {
        self.0.to_node()
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        Representable::from_node(node).map(Self)
    }
}

impl StringRepr for Count {
    fn to_repr_string(&self) -> String {
        self.0.to_repr_string()
    }
    fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError> {
        StringRepr::from_repr_string(s).map(Self)
    }
}
