// Compiled, reference-resolved type system. Only `lower` builds one.

use indexmap::IndexMap;

use crate::node::Kind;

/// Prelude types every TypeSystem starts with, in this order.
pub const PRELUDE: [&str; 6] = ["Bool", "Int", "Float", "String", "Bytes", "Link"];

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSystem {
    types: IndexMap<String, Type>, // prelude first, then declaration order
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Bool,
    Int,
    Float,
    String,
    Bytes,
    Link { expected: Option<String> },
    List { value: TypeRef, value_nullable: bool },
    Map { key: String, value: TypeRef, value_nullable: bool, repr: MapRepr },
    Struct { fields: Vec<Field>, repr: StructRepr },
    Union { members: Vec<Member>, repr: UnionRepr },
    Enum { members: Vec<EnumMember>, repr: EnumRepr },
}

/// A resolved reference: a name guaranteed to exist, or an anonymous inline type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Named(String),
    List { value: Box<TypeRef>, value_nullable: bool },
    Map { key: String, value: Box<TypeRef>, value_nullable: bool },
    Link { expected: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
    pub optional: bool, // may be absent
    pub nullable: bool, // present, may be null
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub discriminant: String,
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: String, // representation value; defaults to the name
}

#[derive(Debug, Clone, PartialEq)]
pub enum StructRepr {
    Map,
    Tuple,
    StringJoin { join: String },
    StringPairs { inner_delim: String, entry_delim: String },
    ListPairs,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnionRepr {
    Keyed,
    Kinded,
    Inline { discriminant_key: String },
    Envelope { discriminant_key: String, content_key: String },
    StringPrefix,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnumRepr {
    String,
    Int,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapRepr {
    Map,
    StringPairs { inner_delim: String, entry_delim: String },
    ListPairs,
}

/// What a reference points at, with inline types viewed as anonymous types.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Named(&'a str, &'a Type),
    List { value: &'a TypeRef, value_nullable: bool },
    Map { key: &'a str, value: &'a TypeRef, value_nullable: bool },
    Link,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl TypeSystem {
    pub(crate) fn with_prelude() -> Self {
        let mut types = IndexMap::new();
        types.insert("Bool".to_string(), Type::Bool);
        types.insert("Int".to_string(), Type::Int);
        types.insert("Float".to_string(), Type::Float);
        types.insert("String".to_string(), Type::String);
        types.insert("Bytes".to_string(), Type::Bytes);
        types.insert("Link".to_string(), Type::Link { expected: None });
        Self { types }
    }

    pub(crate) fn insert(&mut self, name: String, ty: Type) {
        self.types.insert(name, ty);
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Every name, prelude first.
    pub fn names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    /// Declared (non-prelude) types in declaration order.
    pub fn declared(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.types.iter().skip(PRELUDE.len()).map(|(n, t)| (n.as_str(), t))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.types.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve a reference. Names are guaranteed present after compilation;
    /// a missing one is treated as an opaque link so callers never panic.
    pub fn target<'a>(&'a self, r: &'a TypeRef) -> Target<'a> {
        match r {
            TypeRef::Named(n) => match self.types.get_key_value(n) {
                Some((name, ty)) => Target::Named(name, ty),
                None => Target::Link,
            },
            TypeRef::List { value, value_nullable } => Target::List { value, value_nullable: *value_nullable },
            TypeRef::Map { key, value, value_nullable } => {
                Target::Map { key, value, value_nullable: *value_nullable }
            }
            TypeRef::Link { .. } => Target::Link,
        }
    }

    /// The data-model kind a value of this reference serializes as.
    pub fn repr_kind_of(&self, r: &TypeRef) -> Kind {
        match self.target(r) {
            Target::Named(_, ty) => ty.repr_kind(),
            Target::List { .. } => Kind::List,
            Target::Map { .. } => Kind::Map,
            Target::Link => Kind::Link,
        }
    }
}

impl Type {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Bool => "bool",
            Type::Int => "int",
            Type::Float => "float",
            Type::String => "string",
            Type::Bytes => "bytes",
            Type::Link { .. } => "link",
            Type::List { .. } => "list",
            Type::Map { .. } => "map",
            Type::Struct { .. } => "struct",
            Type::Union { .. } => "union",
            Type::Enum { .. } => "enum",
        }
    }

    /// Data-model kind of the representation. Kinded unions have no single
    /// kind; they report `Map` and callers special-case them.
    pub fn repr_kind(&self) -> Kind {
        match self {
            Type::Bool => Kind::Bool,
            Type::Int => Kind::Int,
            Type::Float => Kind::Float,
            Type::String => Kind::String,
            Type::Bytes => Kind::Bytes,
            Type::Link { .. } => Kind::Link,
            Type::List { .. } => Kind::List,
            Type::Map { repr, .. } => match repr {
                MapRepr::Map => Kind::Map,
                MapRepr::StringPairs { .. } => Kind::String,
                MapRepr::ListPairs => Kind::List,
            },
            Type::Struct { repr, .. } => match repr {
                StructRepr::Map => Kind::Map,
                StructRepr::Tuple | StructRepr::ListPairs => Kind::List,
                StructRepr::StringJoin { .. } | StructRepr::StringPairs { .. } => Kind::String,
            },
            Type::Union { repr, .. } => match repr {
                UnionRepr::StringPrefix => Kind::String,
                _ => Kind::Map,
            },
            Type::Enum { repr, .. } => match repr {
                EnumRepr::String => Kind::String,
                EnumRepr::Int => Kind::Int,
            },
        }
    }

    pub fn repr_name(&self) -> &'static str {
        match self {
            Type::Map { repr, .. } => match repr {
                MapRepr::Map => "map",
                MapRepr::StringPairs { .. } => "stringpairs",
                MapRepr::ListPairs => "listpairs",
            },
            Type::Struct { repr, .. } => match repr {
                StructRepr::Map => "map",
                StructRepr::Tuple => "tuple",
                StructRepr::StringJoin { .. } => "stringjoin",
                StructRepr::StringPairs { .. } => "stringpairs",
                StructRepr::ListPairs => "listpairs",
            },
            Type::Union { repr, .. } => match repr {
                UnionRepr::Keyed => "keyed",
                UnionRepr::Kinded => "kinded",
                UnionRepr::Inline { .. } => "inline",
                UnionRepr::Envelope { .. } => "envelope",
                UnionRepr::StringPrefix => "stringprefix",
            },
            Type::Enum { repr, .. } => match repr {
                EnumRepr::String => "string",
                EnumRepr::Int => "int",
            },
            other => other.kind_name(),
        }
    }

    pub fn is_kinded_union(&self) -> bool {
        matches!(self, Type::Union { repr: UnionRepr::Kinded, .. })
    }
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Named(n) => Some(n),
            _ => None,
        }
    }
}
