// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Closed`: struct with map representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Closed {
    pub at: i64,
    pub reason: Option<String>,
}

impl Representable for Closed {
    fn to_node(&self) -> ipld::Node {
        let mut entries: Vec<(String, ipld::Node)> = Vec::new();
        entries.push(("at".to_string(), self.at.to_node()));
        if let Some(value) = &self.reason {
            entries.push(("reason".to_string(), value.to_node()));
        }
        ipld::Node::Map(entries)
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        let entries = ipld::repr::map_entries(node)?;
        ipld::repr::reject_unknown(&entries, &["at", "reason"])?;
        Ok(Self {
            at: Representable::from_node(ipld::repr::lookup_required(&entries, "at")?).map_err(|e| e.within("field \"at\""))?,
            reason: ipld::repr::lookup(&entries, "reason").map(Representable::from_node).transpose().map_err(|e| e.within("field \"reason\""))?,
        })
    }
}
