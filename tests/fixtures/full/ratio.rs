// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Ratio`: float with float representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Ratio(pub f64);

impl Representable for Ratio {
    fn to_node(&self) -> ipld::Node {
        self.0.to_node()
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        Representable::from_node(node).map(Self)
    }
}

impl StringRepr for Ratio {
    fn to_repr_string(&self) -> String {
        self.0.to_repr_string()
    }
    fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError> {
        StringRepr::from_repr_string(s).map(Self)
    }
}
