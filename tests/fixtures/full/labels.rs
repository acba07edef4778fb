// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Labels`: map with listpairs representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Labels(pub IndexMap<String, i64>);

impl Representable for Labels {
    fn to_node(&self) -> ipld::Node {
        ipld::Node::List(
            self.0
                .iter()
                .map(|(k, v)| ipld::Node::List(vec![ipld::Node::String(k.to_repr_string()), v.to_node()]))
                .collect(),
        )
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        let mut out: IndexMap<String, i64> = IndexMap::new();
        for (k, v) in ipld::repr::list_pairs(node)? {
            out.insert(StringRepr::from_repr_string(k)?, Representable::from_node(v)?);
        }
        Ok(Self(out))
    }
}
