// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Range`: struct with stringjoin representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub start: i64,
    pub end: i64,
}

impl StringRepr for Range {
    fn to_repr_string(&self) -> String {
        [self.start.to_repr_string(), self.end.to_repr_string()].join(":")
    }
    fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError> {
        let parts = ipld::repr::split_join(s, ":", 2)?;
        Ok(Self {
            start: StringRepr::from_repr_string(parts[0]).map_err(|e| e.within("field \"start\""))?,
            end: StringRepr::from_repr_string(parts[1]).map_err(|e| e.within("field \"end\""))?,
        })
    }
}

impl Representable for Range {
    fn to_node(&self) -> ipld::Node {
        ipld::Node::String(self.to_repr_string())
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        Self::from_repr_string(ipld::repr::expect_str(node)?)
    }
}
