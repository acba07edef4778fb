//! Document Model Tree: a schema exactly as written, valid or not.
//!
//! The serde layout follows the IPLD schema-DMT shape:
//! `{"types": {"Name": {"struct": {"fields": {...}, "representation": {"map": {}}}}}}`.
//! Ordered name/definition lists are serialized as maps but kept as vectors,
//! so duplicate names survive until the compiler reports them.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::node::{Node, ser::ToNodeError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(with = "entries")]
    pub types: Vec<(String, TypeDefn)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeDefn {
    Bool {},
    String {},
    Bytes {},
    Int {},
    Float {},
    Link(LinkDefn),
    List(ListDefn),
    Map(MapDefn),
    Struct(StructDefn),
    Union(UnionDefn),
    Enum(EnumDefn),
    Copy(CopyDefn),
}

/// A reference to a type from inside another definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Named(String),
    Inline(Box<InlineDefn>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineDefn {
    List(ListDefn),
    Map(MapDefn),
    Link(LinkDefn),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDefn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDefn {
    pub value_type: TypeRef,
    #[serde(default, skip_serializing_if = "is_false")]
    pub value_nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDefn {
    pub key_type: String,
    pub value_type: TypeRef,
    #[serde(default, skip_serializing_if = "is_false")]
    pub value_nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representation: Option<Representation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDefn {
    #[serde(with = "entries")]
    pub fields: Vec<(String, FieldDefn)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representation: Option<Representation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefn {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionDefn {
    pub members: Vec<UnionMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representation: Option<Representation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionMember {
    pub discriminant: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDefn {
    pub members: Vec<EnumMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representation: Option<Representation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyDefn {
    pub from_type: String,
}

/// `representation <strategy>(<params>)`, serialized as `{"<strategy>": {<params>}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Representation {
    pub strategy: String,
    pub params: IndexMap<String, String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Schema {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|(n, _)| n.as_str())
    }

    /// Convert to the generic document tree, preserving declaration order and
    /// any duplicate names or fields.
    pub fn to_node(&self) -> Result<Node, ToNodeError> {
        crate::node::to_node(self)
    }

    /// Read a DMT back from its JSON form, with JSON-path context on failure.
    pub fn from_json(src: &str) -> Result<Self, String> {
        crate::path_de::from_str_with_path(src)
    }
}

impl TypeDefn {
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeDefn::Bool {} => "bool",
            TypeDefn::String {} => "string",
            TypeDefn::Bytes {} => "bytes",
            TypeDefn::Int {} => "int",
            TypeDefn::Float {} => "float",
            TypeDefn::Link(_) => "link",
            TypeDefn::List(_) => "list",
            TypeDefn::Map(_) => "map",
            TypeDefn::Struct(_) => "struct",
            TypeDefn::Union(_) => "union",
            TypeDefn::Enum(_) => "enum",
            TypeDefn::Copy(_) => "copy",
        }
    }

    pub fn representation(&self) -> Option<&Representation> {
        match self {
            TypeDefn::Map(m) => m.representation.as_ref(),
            TypeDefn::Struct(s) => s.representation.as_ref(),
            TypeDefn::Union(u) => u.representation.as_ref(),
            TypeDefn::Enum(e) => e.representation.as_ref(),
            _ => None,
        }
    }
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }
}

impl Representation {
    pub fn new(strategy: impl Into<String>) -> Self {
        Self { strategy: strategy.into(), params: IndexMap::new() }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl Serialize for Representation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.strategy, &self.params)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Representation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let outer = IndexMap::<String, IndexMap<String, String>>::deserialize(deserializer)?;
        if outer.len() != 1 {
            return Err(serde::de::Error::custom(format!(
                "a representation has exactly one strategy, found {}",
                outer.len()
            )));
        }
        let (strategy, params) = outer.into_iter().next().ok_or_else(|| {
            serde::de::Error::custom("a representation has exactly one strategy")
        })?;
        Ok(Representation { strategy, params })
    }
}

/// `Vec<(String, T)>` as a map, keeping order and repeated keys.
mod entries {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(entries: &[(String, T)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (k, v) in entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = Vec<(String, T)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, T>()? {
                    out.push((k, v));
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}
