// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Level`: enum with int representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Low,
    High,
}

impl StringRepr for Level {
    fn to_repr_string(&self) -> String {
        let value = match self {
            Self::Low => "1",
            Self::High => "2",
        };
        value.to_string()
    }
    fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError> {
        match s {
            "1" => Ok(Self::Low),
            "2" => Ok(Self::High),
            other => Err(ipld::DecodeError::UnknownDiscriminant(other.to_string())),
        }
    }
}

impl Representable for Level {
    fn to_node(&self) -> ipld::Node {
        ipld::Node::Int(match self {
            Self::Low => 1,
            Self::High => 2,
        })
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        match ipld::repr::expect_int(node)? {
            1 => Ok(Self::Low),
            2 => Ok(Self::High),
            other => Err(ipld::DecodeError::UnknownDiscriminant(other.to_string())),
        }
    }
}
