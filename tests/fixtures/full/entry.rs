// Code generated by ipld-schema-tool. DO NOT EDIT.
#![allow(unused)]
use ipld_schema_tool::node as ipld;
use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};

use super::*;

/// Schema type `Entry`: struct with map representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: Name,
    pub count: Option<Count>,
    pub note: Option<Option<String>>,
    pub ratio: Option<Ratio>,
    pub flag: Flag,
    pub blob: Blob,
    pub parent: Option<Parent>,
    pub target: Option<Link>,
    pub tags: Tags,
    pub scores: Scores,
    pub weights: Weights,
    pub labels: Labels,
    pub point: Point,
    pub query: Query,
    pub pairs: Pairs,
    pub status: Status,
    pub shape: Shape,
    pub value: Value,
    pub event: Event,
    pub envelope: Envelope,
    pub level: Level,
    pub children: Vec<Entry>,
    pub meta: IndexMap<String, i64>,
}

impl Representable for Entry {
    fn to_node(&self) -> ipld::Node {
        let mut entries: Vec<(String, ipld::Node)> = Vec::new();
        entries.push(("name".to_string(), self.name.to_node()));
        if let Some(value) = &self.count {
            entries.push(("count".to_string(), value.to_node()));
        }
        if let Some(value) = &self.note {
            entries.push(("note".to_string(), value.to_node()));
        }
        entries.push(("ratio".to_string(), self.ratio.to_node()));
        entries.push(("flag".to_string(), self.flag.to_node()));
        entries.push(("blob".to_string(), self.blob.to_node()));
        if let Some(value) = &self.parent {
            entries.push(("parent".to_string(), value.to_node()));
        }
        entries.push(("target".to_string(), self.target.to_node()));
        entries.push(("tags".to_string(), self.tags.to_node()));
        entries.push(("scores".to_string(), self.scores.to_node()));
        entries.push(("weights".to_string(), self.weights.to_node()));
        entries.push(("labels".to_string(), self.labels.to_node()));
        entries.push(("point".to_string(), self.point.to_node()));
        entries.push(("query".to_string(), self.query.to_node()));
        entries.push(("pairs".to_string(), self.pairs.to_node()));
        entries.push(("status".to_string(), self.status.to_node()));
        entries.push(("shape".to_string(), self.shape.to_node()));
        entries.push(("value".to_string(), self.value.to_node()));
        entries.push(("event".to_string(), self.event.to_node()));
        entries.push(("envelope".to_string(), self.envelope.to_node()));
        entries.push(("level".to_string(), self.level.to_node()));
        entries.push(("children".to_string(), self.children.to_node()));
        entries.push(("meta".to_string(), self.meta.to_node()));
        ipld::Node::Map(entries)
    }
    fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError> {
        let entries = ipld::repr::map_entries(node)?;
        ipld::repr::reject_unknown(&entries, &["name", "count", "note", "ratio", "flag", "blob", "parent", "target", "tags", "scores", "weights", "labels", "point", "query", "pairs", "status", "shape", "value", "event", "envelope", "level", "children", "meta"])?;
        Ok(Self {
            name: Representable::from_node(ipld::repr::lookup_required(&entries, "name")?).map_err(|e| e.within("field \"name\""))?,
            count: ipld::repr::lookup(&entries, "count").map(Representable::from_node).transpose().map_err(|e| e.within("field \"count\""))?,
            note: ipld::repr::lookup(&entries, "note").map(Representable::from_node).transpose().map_err(|e| e.within("field \"note\""))?,
            ratio: Representable::from_node(ipld::repr::lookup_required(&entries, "ratio")?).map_err(|e| e.within("field \"ratio\""))?,
            flag: Representable::from_node(ipld::repr::lookup_required(&entries, "flag")?).map_err(|e| e.within("field \"flag\""))?,
            blob: Representable::from_node(ipld::repr::lookup_required(&entries, "blob")?).map_err(|e| e.within("field \"blob\""))?,
            parent: ipld::repr::lookup(&entries, "parent").map(Representable::from_node).transpose().map_err(|e| e.within("field \"parent\""))?,
            target: Representable::from_node(ipld::repr::lookup_required(&entries, "target")?).map_err(|e| e.within("field \"target\""))?,
            tags: Representable::from_node(ipld::repr::lookup_required(&entries, "tags")?).map_err(|e| e.within("field \"tags\""))?,
            scores: Representable::from_node(ipld::repr::lookup_required(&entries, "scores")?).map_err(|e| e.within("field \"scores\""))?,
            weights: Representable::from_node(ipld::repr::lookup_required(&entries, "weights")?).map_err(|e| e.within("field \"weights\""))?,
            labels: Representable::from_node(ipld::repr::lookup_required(&entries, "labels")?).map_err(|e| e.within("field \"labels\""))?,
            point: Representable::from_node(ipld::repr::lookup_required(&entries, "point")?).map_err(|e| e.within("field \"point\""))?,
            query: Representable::from_node(ipld::repr::lookup_required(&entries, "query")?).map_err(|e| e.within("field \"query\""))?,
            pairs: Representable::from_node(ipld::repr::lookup_required(&entries, "pairs")?).map_err(|e| e.within("field \"pairs\""))?,
            status: Representable::from_node(ipld::repr::lookup_required(&entries, "status")?).map_err(|e| e.within("field \"status\""))?,
            shape: Representable::from_node(ipld::repr::lookup_required(&entries, "shape")?).map_err(|e| e.within("field \"shape\""))?,
            value: Representable::from_node(ipld::repr::lookup_required(&entries, "value")?).map_err(|e| e.within("field \"value\""))?,
            event: Representable::from_node(ipld::repr::lookup_required(&entries, "event")?).map_err(|e| e.within("field \"event\""))?,
            envelope: Representable::from_node(ipld::repr::lookup_required(&entries, "envelope")?).map_err(|e| e.within("field \"envelope\""))?,
            level: Representable::from_node(ipld::repr::lookup_required(&entries, "level")?).map_err(|e| e.within("field \"level\""))?,
            children: Representable::from_node(ipld::repr::lookup_required(&entries, "children")?).map_err(|e| e.within("field \"children\""))?,
            meta: Representable::from_node(ipld::repr::lookup_required(&entries, "meta")?).map_err(|e| e.within("field \"meta\""))?,
        })
    }
}
