// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Blob`: bytes with bytes representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Blob(pub Bytes);

impl Representable for Blob {
    fn to_node(&self) -> ipld::Node {
        self.0.to_node()
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        Representable::from_node(node).map(Self)
    }
}
