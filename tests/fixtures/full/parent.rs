// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Parent`: link with link representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parent(pub Link);

impl Representable for Parent {
    fn to_node(&self) -> ipld::Node {
        self.0.to_node()
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        Representable::from_node(node).map(Self)
    }
}
