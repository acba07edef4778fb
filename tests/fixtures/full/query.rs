// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Query`: struct with stringpairs representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub page: i64,
    pub shade: Shade,
}

impl StringRepr for Query {
    fn to_repr_string(&self) -> String {
        let mut pairs: Vec<(String, String)> = Vec::new();
        pairs.push(("page".to_string(), self.page.to_repr_string()));
        pairs.push(("shade".to_string(), self.shade.to_repr_string()));
        ipld::repr::join_pairs(&pairs, "=", "&")
    }
    fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError> {
        let entries = ipld::repr::split_pairs(s, "=", "&")?;
        ipld::repr::reject_unknown(&entries, &["page", "shade"])?;
        Ok(Self {
            page: StringRepr::from_repr_string(ipld::repr::lookup_required(&entries, "page")?).map_err(|e| e.within("field \"page\""))?,
            shade: StringRepr::from_repr_string(ipld::repr::lookup_required(&entries, "shade")?).map_err(|e| e.within("field \"shade\""))?,
        })
    }
}

impl Representable for Query {
    fn to_node(&self) -> ipld::Node {
        ipld::Node::String(self.to_repr_string())
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        Self::from_repr_string(ipld::repr::expect_str(node)?)
    }
}
