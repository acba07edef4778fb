// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Event`: union with inline representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Opened(Opened),
    Closed(Closed),
}

impl Representable for Event {
    fn to_node(&self) -> ipld::Node {
        let (discriminant, mut content) = match self {
            Self::Opened(value) => ("open", value.to_node()),
            Self::Closed(value) => ("close", value.to_node()),
        };
        if let ipld::Node::Map(entries) = &mut content {
            entries.insert(0, ("kind".to_string(), ipld::Node::String(discriminant.to_string())));
        }
        content
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        let entries = ipld::repr::map_entries(node)?;
        let discriminant = ipld::repr::expect_str(ipld::repr::lookup_required(&entries, "kind")?)?;
        let rest = ipld::Node::Map(
            entries
                .iter()
                .filter(|(k, _)| *k != "kind")
                .map(|(k, v)| (k.to_string(), (*v).clone()))
                .collect(),
        );
        match discriminant {
            "open" => Ok(Self::Opened(Representable::from_node(&rest).map_err(|e| e.within("member \"Opened\""))?)),
            "close" => Ok(Self::Closed(Representable::from_node(&rest).map_err(|e| e.within("member \"Closed\""))?)),
            other => Err(ipld::DecodeError::UnknownDiscriminant(other.to_string())),
        }
    }
}
