// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Shade`: enum with string representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shade {
    Light,
    Dark,
}

impl StringRepr for Shade {
    fn to_repr_string(&self) -> String {
        let value = match self {
            Self::Light => "l",
            Self::Dark => "d",
        };
        value.to_string()
    }
    fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError> {
        match s {
            "l" => Ok(Self::Light),
            "d" => Ok(Self::Dark),
            other => Err(ipld::DecodeError::UnknownDiscriminant(other.to_string())),
        }
    }
}

impl Representable for Shade {
    fn to_node(&self) -> ipld::Node {
        ipld::Node::String(self.to_repr_string())
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        Self::from_repr_string(ipld::repr::expect_str(node)?)
    }
}
