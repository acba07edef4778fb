//! Runtime side of minimal-mode bindings.
//!
//! Generated `schema.rs` files embed their schema text and call
//! [`Bindings::load`] once at start-up; each placeholder type then goes
//! through its [`Prototype`] to reach the representation-level [`Node`]:
//!
//! ```text
//! placeholder ──serde──▶ type-level shape ──Prototype::encode──▶ representation
//! ```
pub mod convert;

use std::sync::Arc;

use indexmap::IndexMap;
pub use once_cell::sync::Lazy;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::dsl::{self, ParseError};
use crate::ir::{Type, TypeRef, TypeSystem};
use crate::lower::{self, CompileError};
use crate::node::ser::ToNodeError;
use crate::node::{self, DecodeError, Node};

#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("schema failed to parse: {0}")]
    Parse(#[from] ParseError),
    #[error("schema failed to compile: {0}")]
    Compile(#[from] CompileError),
    #[error("no type named {0:?} in the schema")]
    UnknownType(String),
    #[error("{type_name}: cannot serialize value: {source}")]
    Serialize {
        type_name: String,
        #[source]
        source: ToNodeError,
    },
    #[error("{type_name}: {source}")]
    Convert {
        type_name: String,
        #[source]
        source: DecodeError,
    },
    #[error("{type_name}: {message}")]
    Deserialize { type_name: String, message: String },
}

/// Name → prototype table over one compiled schema.
#[derive(Debug, Clone)]
pub struct Bindings {
    ts: Arc<TypeSystem>,
    prototypes: IndexMap<String, Prototype>,
}

/// A declared schema type, bound to the TypeSystem it came from.
#[derive(Debug, Clone)]
pub struct Prototype {
    name: String,
    ty: Type,
    ts: Arc<TypeSystem>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Bindings {
    /// Parse and compile `source`, then bind every declared type.
    pub fn load(source: &str) -> Result<Self, BindError> {
        let schema = dsl::parse("embedded schema", source)?;
        let ts = lower::lower_to_ir(&schema)?;
        Ok(Self::from_type_system(ts))
    }

    pub fn from_type_system(ts: TypeSystem) -> Self {
        let ts = Arc::new(ts);
        let prototypes = ts
            .declared()
            .map(|(name, ty)| {
                let proto = Prototype { name: name.to_string(), ty: ty.clone(), ts: Arc::clone(&ts) };
                (name.to_string(), proto)
            })
            .collect();
        tracing::debug!(types = ts.len(), "bound schema types");
        Self { ts, prototypes }
    }

    pub fn get(&self, name: &str) -> Option<&Prototype> {
        self.prototypes.get(name)
    }

    pub fn prototype(&self, name: &str) -> Result<Prototype, BindError> {
        self.get(name).cloned().ok_or_else(|| BindError::UnknownType(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prototypes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    pub fn type_system(&self) -> &TypeSystem {
        &self.ts
    }
}

impl Prototype {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Placeholder value → representation-level tree.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Node, BindError> {
        let shape = node::to_node(value)
            .map_err(|source| BindError::Serialize { type_name: self.name.clone(), source })?;
        convert::to_repr(&self.ts, &TypeRef::named(&self.name), shape)
            .map_err(|source| BindError::Convert { type_name: self.name.clone(), source })
    }

    /// Representation-level tree → placeholder value.
    pub fn decode<T: DeserializeOwned>(&self, node: &Node) -> Result<T, BindError> {
        let shape = convert::from_repr(&self.ts, &TypeRef::named(&self.name), node)
            .map_err(|source| BindError::Convert { type_name: self.name.clone(), source })?;
        crate::path_de::from_value_with_path(serde_json::Value::from(&shape))
            .map_err(|message| BindError::Deserialize { type_name: self.name.clone(), message })
    }
}

/// `#[serde(with = ...)]` helper for optional nullable fields: absent is
/// `None`, null is `Some(None)`. Pair with `default` and
/// `skip_serializing_if = "Option::is_none"`.
pub mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
