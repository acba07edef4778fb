// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Status`: union with stringprefix representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Name(Name),
    Range(Range),
}

impl StringRepr for Status {
    fn to_repr_string(&self) -> String {
        match self {
            Self::Name(value) => format!("{}{}", "rw:", value.to_repr_string()),
            Self::Range(value) => format!("{}{}", "ro:", value.to_repr_string()),
        }
    }
    fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError> {
        if let Some(rest) = s.strip_prefix("rw:") {
            return StringRepr::from_repr_string(rest).map(Self::Name).map_err(|e| e.within("member \"Name\""));
        }
        if let Some(rest) = s.strip_prefix("ro:") {
            return StringRepr::from_repr_string(rest).map(Self::Range).map_err(|e| e.within("member \"Range\""));
        }
        Err(ipld::DecodeError::UnknownDiscriminant(s.to_string()))
    }
}

impl Representable for Status {
    fn to_node(&self) -> ipld::Node {
        ipld::Node::String(self.to_repr_string())
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        Self::from_repr_string(ipld::repr::expect_str(node)?)
    }
}
