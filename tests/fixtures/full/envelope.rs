// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Envelope`: union with envelope representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Point(Point),
    Scores(Scores),
}

impl Representable for Envelope {
    fn to_node(&self) -> ipld::Node {
        let (discriminant, mut content) = match self {
            Self::Point(value) => ("point", value.to_node()),
            Self::Scores(value) => ("scores", value.to_node()),
        };
        ipld::Node::Map(vec![
            ("tag".to_string(), ipld::Node::String(discriminant.to_string())),
            ("body".to_string(), content),
        ])
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        let entries = ipld::repr::map_entries(node)?;
        ipld::repr::reject_unknown(&entries, &["tag", "body"])?;
        let discriminant = ipld::repr::expect_str(ipld::repr::lookup_required(&entries, "tag")?)?;
        let content = ipld::repr::lookup_required(&entries, "body")?;
        match discriminant {
            "point" => Ok(Self::Point(Representable::from_node(content).map_err(|e| e.within("member \"Point\""))?)),
            "scores" => Ok(Self::Scores(Representable::from_node(content).map_err(|e| e.within("member \"Scores\""))?)),
            other => Err(ipld::DecodeError::UnknownDiscriminant(other.to_string())),
        }
    }
}
