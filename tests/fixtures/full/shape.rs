// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Shape`: union with keyed representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(Point),
    Range(Range),
}

impl Representable for Shape {
    fn to_node(&self) -> ipld::Node {
        match self {
            Self::Point(value) => ipld::Node::Map(vec![("point".to_string(), value.to_node())]),
            Self::Range(value) => ipld::Node::Map(vec![("range".to_string(), value.to_node())]),
        }
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        let entries = ipld::repr::expect_map(node)?;
        let [(key, value)] = entries else {
            return Err(ipld::DecodeError::invalid(format!(
                "keyed union needs exactly one entry, found {}",
                entries.len()
            )));
        };
        match key.as_str() {
            "point" => Ok(Self::Point(Representable::from_node(value).map_err(|e| e.within("member \"Point\""))?)),
            "range" => Ok(Self::Range(Representable::from_node(value).map_err(|e| e.within("member \"Range\""))?)),
            other => Err(ipld::DecodeError::UnknownDiscriminant(other.to_string())),
        }
    }
}
