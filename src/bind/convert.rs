//! Conversions between a placeholder's serde shape and the
//! representation-level tree.
//!
//! The serde shape of a value is what `#[derive(Serialize)]` produces for the
//! minimal-mode placeholders: structs are maps keyed by schema field name,
//! unions are `{MemberTypeName: value}`, enums are member names, newtypes are
//! their contents, bytes are lists of ints and links are strings.
use crate::ir::{EnumMember, EnumRepr, Field, MapRepr, Member, StructRepr, Target, Type, TypeRef, TypeSystem, UnionRepr};
use crate::node::repr::{
    expect_int, expect_list, expect_list_len, expect_str, int_to_float, join_pairs, list_pairs, lookup,
    lookup_required, map_entries, reject_unknown, split_join, split_pairs,
};
use crate::node::{DecodeError, Kind, Link, Node, StringRepr};

// ————————————————————————————————————————————————————————————————————————————
// SHAPE → REPRESENTATION
// ————————————————————————————————————————————————————————————————————————————

pub fn to_repr(ts: &TypeSystem, r: &TypeRef, shape: Node) -> Result<Node, DecodeError> {
    match ts.target(r) {
        Target::Link => link(shape),
        Target::List { value, value_nullable } => list_to_repr(ts, value, value_nullable, shape),
        Target::Map { key, value, value_nullable } => {
            entries_to_repr(ts, key, value, value_nullable, shape).map(Node::Map)
        }
        Target::Named(_, ty) => match ty {
            Type::Bool => expect_kind(Kind::Bool, shape),
            Type::Int => expect_kind(Kind::Int, shape),
            Type::String => expect_kind(Kind::String, shape),
            Type::Float => match shape {
                Node::Int(i) => int_to_float(i).map(Node::Float),
                other => expect_kind(Kind::Float, other),
            },
            Type::Bytes => bytes(shape),
            Type::Link { .. } => link(shape),
            Type::List { value, value_nullable } => list_to_repr(ts, value, *value_nullable, shape),
            Type::Map { key, value, value_nullable, repr } => {
                let entries = entries_to_repr(ts, key, value, *value_nullable, shape)?;
                match repr {
                    MapRepr::Map => Ok(Node::Map(entries)),
                    MapRepr::StringPairs { inner_delim, entry_delim } => {
                        let pairs = string_pairs(entries)?;
                        Ok(Node::String(join_pairs(&pairs, inner_delim, entry_delim)))
                    }
                    MapRepr::ListPairs => Ok(list_of_pairs(entries)),
                }
            }
            Type::Struct { fields, repr } => struct_to_repr(ts, fields, repr, shape),
            Type::Union { members, repr } => union_to_repr(ts, members, repr, shape),
            Type::Enum { members, repr } => enum_to_repr(members, *repr, shape),
        },
    }
}

fn value_to_repr(ts: &TypeSystem, r: &TypeRef, nullable: bool, shape: Node) -> Result<Node, DecodeError> {
    match shape {
        Node::Null if nullable => Ok(Node::Null),
        other => to_repr(ts, r, other),
    }
}

fn list_to_repr(ts: &TypeSystem, value: &TypeRef, nullable: bool, shape: Node) -> Result<Node, DecodeError> {
    let items = match shape {
        Node::List(items) => items,
        other => return Err(DecodeError::wrong_kind(Kind::List, &other)),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| value_to_repr(ts, value, nullable, item).map_err(|e| e.within(format!("index {i}"))))
        .collect::<Result<_, _>>()
        .map(Node::List)
}

fn entries_to_repr(
    ts: &TypeSystem,
    key: &str,
    value: &TypeRef,
    nullable: bool,
    shape: Node,
) -> Result<Vec<(String, Node)>, DecodeError> {
    let entries = match shape {
        Node::Map(entries) => entries,
        other => return Err(DecodeError::wrong_kind(Kind::Map, &other)),
    };
    entries
        .into_iter()
        .map(|(k, v)| {
            let value = value_to_repr(ts, value, nullable, v).map_err(|e| e.within(format!("key {k:?}")))?;
            Ok((key_to_repr(ts, key, k)?, value))
        })
        .collect()
}

/// Enum-typed keys travel as member names in the serde shape.
fn key_to_repr(ts: &TypeSystem, key: &str, k: String) -> Result<String, DecodeError> {
    match ts.get(key) {
        Some(Type::Enum { members, .. }) => members
            .iter()
            .find(|m| m.name == k)
            .map(|m| m.value.clone())
            .ok_or(DecodeError::UnknownDiscriminant(k)),
        _ => Ok(k),
    }
}

fn struct_to_repr(ts: &TypeSystem, fields: &[Field], repr: &StructRepr, shape: Node) -> Result<Node, DecodeError> {
    let entries = match shape {
        Node::Map(entries) => entries,
        other => return Err(DecodeError::wrong_kind(Kind::Map, &other)),
    };
    if let Some((k, _)) = entries.iter().find(|(k, _)| !fields.iter().any(|f| f.name == *k)) {
        return Err(DecodeError::UnexpectedField(k.clone()));
    }
    let mut entries: Vec<(String, Option<Node>)> = entries.into_iter().map(|(k, v)| (k, Some(v))).collect();

    // `None` marks an absent field
    let mut values: Vec<(&str, Option<Node>)> = Vec::with_capacity(fields.len());
    for field in fields {
        let taken = entries.iter_mut().find(|(k, _)| *k == field.name).and_then(|(_, v)| v.take());
        let value = match taken {
            None if field.optional => None,
            None if field.nullable => Some(Node::Null),
            None => return Err(DecodeError::MissingField(field.name.clone())),
            Some(Node::Null) if field.nullable => Some(Node::Null),
            Some(Node::Null) if field.optional => None,
            Some(Node::Null) => {
                return Err(DecodeError::invalid(format!("field {:?} is not nullable", field.name)));
            }
            Some(v) => Some(to_repr(ts, &field.ty, v).map_err(|e| e.within(format!("field {:?}", field.name)))?),
        };
        values.push((field.name.as_str(), value));
    }

    let present = values.into_iter().filter_map(|(k, v)| v.map(|v| (k.to_string(), v)));
    match repr {
        StructRepr::Map => Ok(Node::Map(present.collect())),
        StructRepr::Tuple => Ok(Node::List(present.map(|(_, v)| v).collect())),
        StructRepr::ListPairs => Ok(list_of_pairs(present.collect())),
        StructRepr::StringJoin { join } => {
            let parts = present.map(|(_, v)| string_form(&v)).collect::<Result<Vec<_>, _>>()?;
            Ok(Node::String(parts.join(join)))
        }
        StructRepr::StringPairs { inner_delim, entry_delim } => {
            let pairs = string_pairs(present.collect())?;
            Ok(Node::String(join_pairs(&pairs, inner_delim, entry_delim)))
        }
    }
}

fn union_to_repr(ts: &TypeSystem, members: &[Member], repr: &UnionRepr, shape: Node) -> Result<Node, DecodeError> {
    let (name, inner) = single_entry(shape)?;
    let member = members
        .iter()
        .find(|m| m.ty == name)
        .ok_or_else(|| DecodeError::UnknownDiscriminant(name.clone()))?;
    let value = to_repr(ts, &TypeRef::named(&member.ty), inner).map_err(|e| e.within(member.ty.clone()))?;
    let discriminant = member.discriminant.clone();
    match repr {
        UnionRepr::Keyed => Ok(Node::Map(vec![(discriminant, value)])),
        UnionRepr::Kinded => Ok(value),
        UnionRepr::Inline { discriminant_key } => match value {
            Node::Map(mut entries) => {
                entries.insert(0, (discriminant_key.clone(), Node::String(discriminant)));
                Ok(Node::Map(entries))
            }
            other => Err(DecodeError::wrong_kind(Kind::Map, &other)),
        },
        UnionRepr::Envelope { discriminant_key, content_key } => Ok(Node::Map(vec![
            (discriminant_key.clone(), Node::String(discriminant)),
            (content_key.clone(), value),
        ])),
        UnionRepr::StringPrefix => Ok(Node::String(format!("{discriminant}{}", string_form(&value)?))),
    }
}

fn enum_to_repr(members: &[EnumMember], repr: EnumRepr, shape: Node) -> Result<Node, DecodeError> {
    let name = expect_str(&shape)?;
    let member = members
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| DecodeError::UnknownDiscriminant(name.to_string()))?;
    match repr {
        EnumRepr::String => Ok(Node::String(member.value.clone())),
        EnumRepr::Int => i64::from_repr_string(&member.value).map(Node::Int),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// REPRESENTATION → SHAPE
// ————————————————————————————————————————————————————————————————————————————

pub fn from_repr(ts: &TypeSystem, r: &TypeRef, node: &Node) -> Result<Node, DecodeError> {
    match ts.target(r) {
        Target::Link => link_text(node),
        Target::List { value, value_nullable } => list_from_repr(ts, value, value_nullable, node),
        Target::Map { key, value, value_nullable } => {
            entries_from_repr(ts, key, value, value_nullable, map_entries(node)?).map(Node::Map)
        }
        Target::Named(_, ty) => match ty {
            Type::Bool => expect_kind(Kind::Bool, node.clone()),
            Type::Int => expect_kind(Kind::Int, node.clone()),
            Type::String => expect_kind(Kind::String, node.clone()),
            Type::Float => match node {
                Node::Int(_) => Ok(node.clone()),
                other => expect_kind(Kind::Float, other.clone()),
            },
            Type::Bytes => match node {
                Node::Bytes(_) => Ok(node.clone()),
                other => Err(DecodeError::wrong_kind(Kind::Bytes, other)),
            },
            Type::Link { .. } => link_text(node),
            Type::List { value, value_nullable } => list_from_repr(ts, value, *value_nullable, node),
            Type::Map { key, value, value_nullable, repr } => {
                let entries: Vec<(&str, Node)> = match repr {
                    MapRepr::Map => map_entries(node)?.into_iter().map(|(k, v)| (k, v.clone())).collect(),
                    MapRepr::ListPairs => list_pairs(node)?.into_iter().map(|(k, v)| (k, v.clone())).collect(),
                    MapRepr::StringPairs { inner_delim, entry_delim } => {
                        let pairs = split_pairs(expect_str(node)?, inner_delim, entry_delim)?;
                        return pairs
                            .into_iter()
                            .map(|(k, v)| {
                                let value = from_string(ts, value, v).map_err(|e| e.within(format!("key {k:?}")))?;
                                Ok((key_from_repr(ts, key, k)?, value))
                            })
                            .collect::<Result<_, _>>()
                            .map(Node::Map);
                    }
                };
                let borrowed: Vec<(&str, &Node)> = entries.iter().map(|(k, v)| (*k, v)).collect();
                entries_from_repr(ts, key, value, *value_nullable, borrowed).map(Node::Map)
            }
            Type::Struct { fields, repr } => struct_from_repr(ts, fields, repr, node),
            Type::Union { members, repr } => union_from_repr(ts, members, repr, node),
            Type::Enum { members, repr } => {
                let member = match repr {
                    EnumRepr::String => {
                        let s = expect_str(node)?;
                        members.iter().find(|m| m.value == s).ok_or_else(|| DecodeError::UnknownDiscriminant(s.into()))?
                    }
                    EnumRepr::Int => {
                        let i = expect_int(node)?;
                        members
                            .iter()
                            .find(|m| m.value.parse::<i64>() == Ok(i))
                            .ok_or_else(|| DecodeError::UnknownDiscriminant(i.to_string()))?
                    }
                };
                Ok(Node::String(member.name.clone()))
            }
        },
    }
}

fn value_from_repr(ts: &TypeSystem, r: &TypeRef, nullable: bool, node: &Node) -> Result<Node, DecodeError> {
    match node {
        Node::Null if nullable => Ok(Node::Null),
        other => from_repr(ts, r, other),
    }
}

fn list_from_repr(ts: &TypeSystem, value: &TypeRef, nullable: bool, node: &Node) -> Result<Node, DecodeError> {
    expect_list(node)?
        .iter()
        .enumerate()
        .map(|(i, item)| value_from_repr(ts, value, nullable, item).map_err(|e| e.within(format!("index {i}"))))
        .collect::<Result<_, _>>()
        .map(Node::List)
}

fn entries_from_repr(
    ts: &TypeSystem,
    key: &str,
    value: &TypeRef,
    nullable: bool,
    entries: Vec<(&str, &Node)>,
) -> Result<Vec<(String, Node)>, DecodeError> {
    entries
        .into_iter()
        .map(|(k, v)| {
            let value = value_from_repr(ts, value, nullable, v).map_err(|e| e.within(format!("key {k:?}")))?;
            Ok((key_from_repr(ts, key, k)?, value))
        })
        .collect()
}

fn key_from_repr(ts: &TypeSystem, key: &str, k: &str) -> Result<String, DecodeError> {
    match ts.get(key) {
        Some(Type::Enum { members, .. }) => members
            .iter()
            .find(|m| m.value == k)
            .map(|m| m.name.clone())
            .ok_or_else(|| DecodeError::UnknownDiscriminant(k.to_string())),
        _ => Ok(k.to_string()),
    }
}

fn struct_from_repr(ts: &TypeSystem, fields: &[Field], repr: &StructRepr, node: &Node) -> Result<Node, DecodeError> {
    let known: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    let decode_field = |field: &Field, v: &Node| {
        value_from_repr(ts, &field.ty, field.nullable, v).map_err(|e| e.within(format!("field {:?}", field.name)))
    };
    let decode_string = |field: &Field, s: &str| {
        from_string(ts, &field.ty, s).map_err(|e| e.within(format!("field {:?}", field.name)))
    };

    let mut out = Vec::with_capacity(fields.len());
    match repr {
        StructRepr::Map | StructRepr::ListPairs => {
            let entries = match repr {
                StructRepr::Map => map_entries(node)?,
                _ => list_pairs(node)?,
            };
            reject_unknown(&entries, &known)?;
            for field in fields {
                match lookup(&entries, &field.name) {
                    Some(v) => out.push((field.name.clone(), decode_field(field, v)?)),
                    None if field.optional => {}
                    None => return Err(DecodeError::MissingField(field.name.clone())),
                }
            }
        }
        StructRepr::Tuple => {
            let items = expect_list_len(node, fields.len())?;
            for (field, v) in fields.iter().zip(items) {
                out.push((field.name.clone(), decode_field(field, v)?));
            }
        }
        StructRepr::StringJoin { join } => {
            let s = expect_str(node)?;
            if !fields.is_empty() {
                for (field, part) in fields.iter().zip(split_join(s, join, fields.len())?) {
                    out.push((field.name.clone(), decode_string(field, part)?));
                }
            }
        }
        StructRepr::StringPairs { inner_delim, entry_delim } => {
            let pairs = split_pairs(expect_str(node)?, inner_delim, entry_delim)?;
            reject_unknown(&pairs, &known)?;
            for field in fields {
                match lookup(&pairs, &field.name) {
                    Some(v) => out.push((field.name.clone(), decode_string(field, v)?)),
                    None if field.optional => {}
                    None => {
                        lookup_required(&pairs, &field.name)?;
                    }
                }
            }
        }
    }
    Ok(Node::Map(out))
}

fn union_from_repr(ts: &TypeSystem, members: &[Member], repr: &UnionRepr, node: &Node) -> Result<Node, DecodeError> {
    let by_discriminant = |d: &str| {
        members.iter().find(|m| m.discriminant == d).ok_or_else(|| DecodeError::UnknownDiscriminant(d.to_string()))
    };
    let (member, value) = match repr {
        UnionRepr::Keyed => {
            let entries = map_entries(node)?;
            let [(key, value)] = entries[..] else {
                return Err(DecodeError::invalid(format!("expected a single-entry map, found {} entries", entries.len())));
            };
            let member = by_discriminant(key)?;
            (member, from_repr(ts, &TypeRef::named(&member.ty), value)?)
        }
        UnionRepr::Kinded => {
            let member = by_discriminant(node.kind().name())?;
            (member, from_repr(ts, &TypeRef::named(&member.ty), node)?)
        }
        UnionRepr::Inline { discriminant_key } => {
            let entries = map_entries(node)?;
            let member = by_discriminant(expect_str(lookup_required(&entries, discriminant_key)?)?)?;
            let rest = Node::Map(
                entries
                    .iter()
                    .filter(|(k, _)| *k != discriminant_key.as_str())
                    .map(|(k, v)| (k.to_string(), (*v).clone()))
                    .collect(),
            );
            (member, from_repr(ts, &TypeRef::named(&member.ty), &rest)?)
        }
        UnionRepr::Envelope { discriminant_key, content_key } => {
            let entries = map_entries(node)?;
            reject_unknown(&entries, &[discriminant_key.as_str(), content_key.as_str()])?;
            let member = by_discriminant(expect_str(lookup_required(&entries, discriminant_key)?)?)?;
            let content = lookup_required(&entries, content_key)?;
            (member, from_repr(ts, &TypeRef::named(&member.ty), content)?)
        }
        UnionRepr::StringPrefix => {
            let s = expect_str(node)?;
            let (member, rest) = members
                .iter()
                .find_map(|m| s.strip_prefix(m.discriminant.as_str()).map(|rest| (m, rest)))
                .ok_or_else(|| DecodeError::UnknownDiscriminant(s.to_string()))?;
            (member, from_string(ts, &TypeRef::named(&member.ty), rest)?)
        }
    };
    Ok(Node::Map(vec![(member.ty.clone(), value)]))
}

// ————————————————————————————————————————————————————————————————————————————
// HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Read a value embedded in a string representation.
fn from_string(ts: &TypeSystem, r: &TypeRef, s: &str) -> Result<Node, DecodeError> {
    let node = match ts.target(r) {
        Target::Named(_, ty) => match ty {
            Type::Int | Type::Enum { repr: EnumRepr::Int, .. } => Node::Int(i64::from_repr_string(s)?),
            Type::Float => Node::Float(f64::from_repr_string(s)?),
            Type::Bool => Node::Bool(bool::from_repr_string(s)?),
            _ => Node::String(s.to_string()),
        },
        _ => Node::String(s.to_string()),
    };
    from_repr(ts, r, &node)
}

/// Text of a scalar representation, for embedding in a string representation.
fn string_form(node: &Node) -> Result<String, DecodeError> {
    match node {
        Node::String(s) => Ok(s.clone()),
        Node::Int(i) => Ok(i.to_repr_string()),
        Node::Float(f) => Ok(f.to_repr_string()),
        Node::Bool(b) => Ok(b.to_repr_string()),
        other => Err(DecodeError::invalid(format!("a {} cannot be embedded in a string", other.kind()))),
    }
}

fn string_pairs(entries: Vec<(String, Node)>) -> Result<Vec<(String, String)>, DecodeError> {
    entries.into_iter().map(|(k, v)| Ok((k, string_form(&v)?))).collect()
}

fn list_of_pairs(entries: Vec<(String, Node)>) -> Node {
    Node::List(entries.into_iter().map(|(k, v)| Node::List(vec![Node::String(k), v])).collect())
}

fn single_entry(shape: Node) -> Result<(String, Node), DecodeError> {
    match shape {
        Node::Map(entries) if entries.len() == 1 => {
            entries.into_iter().next().ok_or_else(|| DecodeError::invalid("empty union value"))
        }
        Node::Map(entries) => {
            Err(DecodeError::invalid(format!("expected a single-entry map, found {} entries", entries.len())))
        }
        other => Err(DecodeError::wrong_kind(Kind::Map, &other)),
    }
}

fn expect_kind(kind: Kind, node: Node) -> Result<Node, DecodeError> {
    if node.kind() == kind { Ok(node) } else { Err(DecodeError::wrong_kind(kind, &node)) }
}

fn link(shape: Node) -> Result<Node, DecodeError> {
    match shape {
        Node::String(cid) => Ok(Node::Link(Link(cid))),
        Node::Link(_) => Ok(shape),
        other => Err(DecodeError::wrong_kind(Kind::Link, &other)),
    }
}

fn link_text(node: &Node) -> Result<Node, DecodeError> {
    match node {
        Node::Link(l) => Ok(Node::String(l.0.clone())),
        Node::String(_) => Ok(node.clone()),
        other => Err(DecodeError::wrong_kind(Kind::Link, other)),
    }
}

fn bytes(shape: Node) -> Result<Node, DecodeError> {
    match shape {
        Node::Bytes(_) => Ok(shape),
        Node::List(items) => items
            .iter()
            .map(|item| match item {
                Node::Int(i) => u8::try_from(*i).map_err(|_| DecodeError::invalid(format!("{i} is not a byte"))),
                other => Err(DecodeError::wrong_kind(Kind::Int, other)),
            })
            .collect::<Result<_, _>>()
            .map(Node::Bytes),
        other => Err(DecodeError::wrong_kind(Kind::Bytes, &other)),
    }
}
