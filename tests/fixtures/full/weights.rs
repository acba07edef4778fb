// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Weights`: map with stringpairs representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights(pub IndexMap<Shade, i64>);

impl StringRepr for Weights {
    fn to_repr_string(&self) -> String {
        let pairs: Vec<(String, String)> =
            self.0.iter().map(|(k, v)| (k.to_repr_string(), v.to_repr_string())).collect();
        ipld::repr::join_pairs(&pairs, "=", "&")
    }
    fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError> {
        let mut out: IndexMap<Shade, i64> = IndexMap::new();
        for (k, v) in ipld::repr::split_pairs(s, "=", "&")? {
            out.insert(StringRepr::from_repr_string(k)?, StringRepr::from_repr_string(v)?);
        }
        Ok(Self(out))
    }
}

impl Representable for Weights {
    fn to_node(&self) -> ipld::Node {
        ipld::Node::String(self.to_repr_string())
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        Self::from_repr_string(ipld::repr::expect_str(node)?)
    }
}
