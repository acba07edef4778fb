// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Pairs`: struct with listpairs representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Pairs {
    pub left: i64,
    pub right: Option<String>,
}

impl Representable for Pairs {
    fn to_node(&self) -> ipld::Node {
        let mut entries: Vec<(String, ipld::Node)> = Vec::new();
        entries.push(("left".to_string(), self.left.to_node()));
        if let Some(value) = &self.right {
            entries.push(("right".to_string(), value.to_node()));
        }
        ipld::Node::List(
            entries
                .into_iter()
                .map(|(k, v)| ipld::Node::List(vec![ipld::Node::String(k), v]))
                .collect(),
        )
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        let entries = ipld::repr::list_pairs(node)?;
        ipld::repr::reject_unknown(&entries, &["left", "right"])?;
        Ok(Self {
            left: Representable::from_node(ipld::repr::lookup_required(&entries, "left")?).map_err(|e| e.within("field \"left\""))?,
            right: ipld::repr::lookup(&entries, "right").map(Representable::from_node).transpose().map_err(|e| e.within("field \"right\""))?,
        })
    }
}
