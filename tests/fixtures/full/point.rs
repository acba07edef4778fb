// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Point`: struct with tuple representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Representable for Point {
    fn to_node(&self) -> ipld::Node {
        ipld::Node::List(vec![self.x.to_node(), self.y.to_node()])
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        let items = ipld::repr::expect_list_len(node, 2)?;
        Ok(Self {
            x: Representable::from_node(&items[0]).map_err(|e| e.within("field \"x\""))?,
            y: Representable::from_node(&items[1]).map_err(|e| e.within("field \"y\""))?,
        })
    }
}
