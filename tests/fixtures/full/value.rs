// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Value`: union with kinded representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Name(Name),
    Count(Count),
    Tags(Tags),
}

impl Representable for Value {
    fn to_node(&self) -> ipld::Node {
        match self {
            Self::Name(value) => value.to_node(),
            Self::Count(value) => value.to_node(),
            Self::Tags(value) => value.to_node(),
        }
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        match node.kind() {
            ipld::Kind::String => Ok(Self::Name(Representable::from_node(node).map_err(|e| e.within("member \"Name\""))?)),
            ipld::Kind::Int => Ok(Self::Count(Representable::from_node(node).map_err(|e| e.within("member \"Count\""))?)),
            ipld::Kind::List => Ok(Self::Tags(Representable::from_node(node).map_err(|e| e.within("member \"Tags\""))?)),
            other => Err(ipld::DecodeError::UnknownDiscriminant(other.to_string())),
        }
    }
}
