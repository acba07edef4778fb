//! Format tokens → encoders.
//!
//! A token is `codec:<name>`, `codec:0x<multicodec code>` or `debug`; the
//! empty token means `codec:json`. Names resolve through an explicit
//! [`EncoderRegistry`] handed to the [`EncoderSelector`], so callers decide
//! which codecs exist.
use std::fmt::Write as _;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::Error;
use crate::node::{Kind, Node};

pub const DEFAULT_TOKEN: &str = "codec:json";

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("{codec} cannot encode {kind} values")]
    Unsupported { codec: &'static str, kind: Kind },
    #[error("{codec} cannot encode non-finite float {value}")]
    NonFinite { codec: &'static str, value: f64 },
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cbor: {0}")]
    Cbor(String),
    #[error(transparent)]
    Node(#[from] crate::node::ser::ToNodeError),
}

pub trait Encoder: Send + Sync {
    fn name(&self) -> &'static str;

    /// Multicodec table code, when the format has one.
    fn code(&self) -> Option<u64>;

    /// Whether the output is text meant for a terminal.
    fn is_text(&self) -> bool;

    fn encode(&self, node: &Node) -> Result<Vec<u8>, EncodeError>;
}

#[derive(Default)]
pub struct EncoderRegistry {
    encoders: Vec<Box<dyn Encoder>>,
}

pub struct EncoderSelector {
    registry: EncoderRegistry,
}

pub struct JsonEncoder;
pub struct DagJsonEncoder;
pub struct CborEncoder;
pub struct DagCborEncoder;
pub struct DebugEncoder;

// ————————————————————————————————————————————————————————————————————————————
// SELECTION
// ————————————————————————————————————————————————————————————————————————————

impl EncoderRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// json, dag-json, cbor and dag-cbor.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(JsonEncoder);
        registry.register(DagJsonEncoder);
        registry.register(CborEncoder);
        registry.register(DagCborEncoder);
        registry
    }

    /// Later registrations shadow earlier ones with the same name.
    pub fn register(&mut self, encoder: impl Encoder + 'static) {
        self.encoders.retain(|e| e.name() != encoder.name());
        self.encoders.push(Box::new(encoder));
    }

    pub fn by_name(&self, name: &str) -> Option<&dyn Encoder> {
        self.encoders.iter().find(|e| e.name() == name).map(|e| e.as_ref())
    }

    pub fn by_code(&self, code: u64) -> Option<&dyn Encoder> {
        self.encoders.iter().find(|e| e.code() == Some(code)).map(|e| e.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.encoders.iter().map(|e| e.name()).collect()
    }
}

impl EncoderSelector {
    pub fn new(registry: EncoderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &EncoderRegistry {
        &self.registry
    }

    /// Resolve a format token for the argument named `argument`.
    pub fn select(&self, argument: &str, token: &str) -> Result<&dyn Encoder, Error> {
        let token = token.trim();
        let token = if token.is_empty() { DEFAULT_TOKEN } else { token };
        if token == "debug" {
            return Ok(&DebugEncoder);
        }
        let unrecognized = |name: &str| Error::CodecUnrecognized {
            argument: argument.to_string(),
            token: name.to_string(),
        };
        let Some(name) = token.strip_prefix("codec:") else {
            return Err(unrecognized(token));
        };
        let found = match name.strip_prefix("0x").or_else(|| name.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16).ok().and_then(|code| self.registry.by_code(code)),
            None => self.registry.by_name(name),
        };
        let encoder = found.ok_or_else(|| unrecognized(name))?;
        tracing::debug!(token, encoder = encoder.name(), "selected encoder");
        Ok(encoder)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CODECS
// ————————————————————————————————————————————————————————————————————————————

fn reject(codec: &'static str, node: &Node, kinds: &[Kind]) -> Result<(), EncodeError> {
    for &kind in kinds {
        if node.find_kind(kind).is_some() {
            return Err(EncodeError::Unsupported { codec, kind });
        }
    }
    Ok(())
}

fn reject_non_finite(codec: &'static str, node: &Node) -> Result<(), EncodeError> {
    match node {
        Node::Float(f) if !f.is_finite() => Err(EncodeError::NonFinite { codec, value: *f }),
        Node::List(items) => items.iter().try_for_each(|n| reject_non_finite(codec, n)),
        Node::Map(entries) => entries.iter().try_for_each(|(_, n)| reject_non_finite(codec, n)),
        _ => Ok(()),
    }
}

fn bytewise(a: &str, b: &str) -> std::cmp::Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

fn length_first(a: &str, b: &str) -> std::cmp::Ordering {
    a.len().cmp(&b.len()).then_with(|| bytewise(a, b))
}

impl Encoder for JsonEncoder {
    fn name(&self) -> &'static str {
        "json"
    }
    fn code(&self) -> Option<u64> {
        Some(0x0200)
    }
    fn is_text(&self) -> bool {
        true
    }
    fn encode(&self, node: &Node) -> Result<Vec<u8>, EncodeError> {
        reject(self.name(), node, &[Kind::Bytes, Kind::Link])?;
        reject_non_finite(self.name(), node)?;
        Ok(serde_json::to_vec_pretty(node)?)
    }
}

impl Encoder for DagJsonEncoder {
    fn name(&self) -> &'static str {
        "dag-json"
    }
    fn code(&self) -> Option<u64> {
        Some(0x0129)
    }
    fn is_text(&self) -> bool {
        true
    }
    fn encode(&self, node: &Node) -> Result<Vec<u8>, EncodeError> {
        reject_non_finite(self.name(), node)?;
        let mut sorted = node.clone();
        sorted.sort_maps_by(&bytewise);
        Ok(serde_json::to_vec(&DagJson(&sorted))?)
    }
}

/// Streams a tree in dag-json form. Bytes and links use the reserved `"/"`
/// forms; map entries go out as stored, repeated keys included.
struct DagJson<'a>(&'a Node);

impl Serialize for DagJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Node::Bytes(b) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("/", &serde_json::json!({ "bytes": STANDARD_NO_PAD.encode(b) }))?;
                map.end()
            }
            Node::Link(l) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("/", &l.0)?;
                map.end()
            }
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&DagJson(item))?;
                }
                seq.end()
            }
            Node::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, &DagJson(v))?;
                }
                map.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}

fn write_cbor(node: &Node) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    ciborium::into_writer(node, &mut out).map_err(|e| EncodeError::Cbor(e.to_string()))?;
    Ok(out)
}

impl Encoder for CborEncoder {
    fn name(&self) -> &'static str {
        "cbor"
    }
    fn code(&self) -> Option<u64> {
        Some(0x51)
    }
    fn is_text(&self) -> bool {
        false
    }
    fn encode(&self, node: &Node) -> Result<Vec<u8>, EncodeError> {
        reject(self.name(), node, &[Kind::Link])?;
        write_cbor(node)
    }
}

impl Encoder for DagCborEncoder {
    fn name(&self) -> &'static str {
        "dag-cbor"
    }
    fn code(&self) -> Option<u64> {
        Some(0x71)
    }
    fn is_text(&self) -> bool {
        false
    }
    fn encode(&self, node: &Node) -> Result<Vec<u8>, EncodeError> {
        reject(self.name(), node, &[Kind::Link])?;
        reject_non_finite(self.name(), node)?;
        let mut sorted = node.clone();
        sorted.sort_maps_by(&length_first);
        write_cbor(&sorted)
    }
}

impl Encoder for DebugEncoder {
    fn name(&self) -> &'static str {
        "debug"
    }
    fn code(&self) -> Option<u64> {
        None
    }
    fn is_text(&self) -> bool {
        true
    }
    fn encode(&self, node: &Node) -> Result<Vec<u8>, EncodeError> {
        let mut out = String::new();
        dump(&mut out, node, 0);
        Ok(out.into_bytes())
    }
}

fn dump(out: &mut String, node: &Node, depth: usize) {
    let pad = "  ".repeat(depth);
    // fmt::Write into a String cannot fail
    let _ = match node {
        Node::Null => writeln!(out, "null"),
        Node::Bool(b) => writeln!(out, "bool {b}"),
        Node::Int(i) => writeln!(out, "int {i}"),
        Node::Float(f) => writeln!(out, "float {f}"),
        Node::String(s) => writeln!(out, "string {s:?}"),
        Node::Bytes(b) => writeln!(out, "bytes {}", b.iter().map(|x| format!("{x:02x}")).collect::<String>()),
        Node::Link(l) => writeln!(out, "link {}", l.0),
        Node::List(items) => {
            let _ = writeln!(out, "list ({} items)", items.len());
            for (i, item) in items.iter().enumerate() {
                let _ = write!(out, "{pad}  [{i}]: ");
                dump(out, item, depth + 1);
            }
            Ok(())
        }
        Node::Map(entries) => {
            let _ = writeln!(out, "map ({} entries)", entries.len());
            for (k, v) in entries {
                let _ = write!(out, "{pad}  {k:?}: ");
                dump(out, v, depth + 1);
            }
            Ok(())
        }
    };
}
