//! Representation strategies: parameter parsing and per-definition checks.
use crate::dmt::Representation;
use crate::ir::{EnumRepr, Field, MapRepr, Member, StructRepr, Target, Type, TypeRef, TypeSystem, UnionRepr};
use crate::node::Kind;

use super::{Diagnostics, Pass, SemanticError, SemanticErrorKind};

// ————————————————————————————————————————————————————————————————————————————
// STRATEGY PARSING
// ————————————————————————————————————————————————————————————————————————————

pub(super) fn struct_repr(r: Option<&Representation>) -> Result<StructRepr, Vec<String>> {
    let Some(r) = r else { return Ok(StructRepr::Map) };
    match r.strategy.as_str() {
        "map" => params(r, []).map(|_| StructRepr::Map),
        "tuple" => params(r, []).map(|_| StructRepr::Tuple),
        "listpairs" => params(r, []).map(|_| StructRepr::ListPairs),
        "stringjoin" => {
            let [join] = params(r, ["join"])?;
            Ok(StructRepr::StringJoin { join: required(r, "join", join)? })
        }
        "stringpairs" => {
            let (inner_delim, entry_delim) = delimiters(r)?;
            Ok(StructRepr::StringPairs { inner_delim, entry_delim })
        }
        other => Err(vec![unknown_strategy("struct", other)]),
    }
}

pub(super) fn union_repr(r: Option<&Representation>) -> Result<UnionRepr, Vec<String>> {
    let Some(r) = r else {
        return Err(vec!["a union must declare a representation".to_string()]);
    };
    match r.strategy.as_str() {
        "keyed" => params(r, []).map(|_| UnionRepr::Keyed),
        "kinded" => params(r, []).map(|_| UnionRepr::Kinded),
        "stringprefix" => params(r, []).map(|_| UnionRepr::StringPrefix),
        "inline" => {
            let [key] = params(r, ["discriminantKey"])?;
            Ok(UnionRepr::Inline { discriminant_key: required(r, "discriminantKey", key)? })
        }
        "envelope" => {
            let [key, content] = params(r, ["discriminantKey", "contentKey"])?;
            let key = required(r, "discriminantKey", key);
            let content = required(r, "contentKey", content);
            match (key, content) {
                (Ok(discriminant_key), Ok(content_key)) => {
                    Ok(UnionRepr::Envelope { discriminant_key, content_key })
                }
                (k, c) => Err(k.err().into_iter().chain(c.err()).flatten().collect()),
            }
        }
        other => Err(vec![unknown_strategy("union", other)]),
    }
}

pub(super) fn enum_repr(r: Option<&Representation>) -> Result<EnumRepr, Vec<String>> {
    let Some(r) = r else { return Ok(EnumRepr::String) };
    match r.strategy.as_str() {
        "string" => params(r, []).map(|_| EnumRepr::String),
        "int" => params(r, []).map(|_| EnumRepr::Int),
        other => Err(vec![unknown_strategy("enum", other)]),
    }
}

pub(super) fn map_repr(r: Option<&Representation>) -> Result<MapRepr, Vec<String>> {
    let Some(r) = r else { return Ok(MapRepr::Map) };
    match r.strategy.as_str() {
        "map" => params(r, []).map(|_| MapRepr::Map),
        "listpairs" => params(r, []).map(|_| MapRepr::ListPairs),
        "stringpairs" => {
            let (inner_delim, entry_delim) = delimiters(r)?;
            Ok(MapRepr::StringPairs { inner_delim, entry_delim })
        }
        other => Err(vec![unknown_strategy("map", other)]),
    }
}

fn unknown_strategy(kind: &str, strategy: &str) -> String {
    format!("unknown {kind} representation strategy `{strategy}`")
}

/// Look up the named parameters, rejecting any the strategy does not take.
fn params<'r, const N: usize>(
    r: &'r Representation,
    names: [&str; N],
) -> Result<[Option<&'r str>; N], Vec<String>> {
    let unknown: Vec<String> = r
        .params
        .keys()
        .filter(|k| !names.contains(&k.as_str()))
        .map(|k| format!("representation {} does not take parameter `{k}`", r.strategy))
        .collect();
    if !unknown.is_empty() {
        return Err(unknown);
    }
    Ok(names.map(|n| r.params.get(n).map(String::as_str)))
}

fn required(r: &Representation, name: &str, value: Option<&str>) -> Result<String, Vec<String>> {
    match value {
        None => Err(vec![format!("representation {} requires parameter `{name}`", r.strategy)]),
        Some("") => Err(vec![format!("representation {} parameter `{name}` must not be empty", r.strategy)]),
        Some(v) => Ok(v.to_string()),
    }
}

fn delimiters(r: &Representation) -> Result<(String, String), Vec<String>> {
    let [inner, entry] = params(r, ["innerDelim", "entryDelim"])?;
    match (required(r, "innerDelim", inner), required(r, "entryDelim", entry)) {
        (Ok(inner), Ok(entry)) if inner == entry => Err(vec![format!(
            "representation {} needs distinct delimiters, both are {inner:?}",
            r.strategy
        )]),
        (Ok(inner), Ok(entry)) => Ok((inner, entry)),
        (i, e) => Err(i.err().into_iter().chain(e.err()).flatten().collect()),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DEFINITION CHECKS
// ————————————————————————————————————————————————————————————————————————————

struct Checker<'a> {
    ts: &'a TypeSystem,
    type_name: &'a str,
    diags: &'a mut Diagnostics,
}

pub(super) fn check_type(ts: &TypeSystem, type_name: &str, ty: &Type, diags: &mut Diagnostics) {
    let mut cx = Checker { ts, type_name, diags };
    match ty {
        Type::Struct { fields, repr } => {
            cx.check_struct(fields, repr);
            for f in fields {
                cx.check_inline(&f.ty);
            }
        }
        Type::Union { members, repr } => cx.check_union(members, repr),
        Type::Enum { members, repr } => cx.check_enum(members, *repr),
        Type::Map { key, value, value_nullable, repr } => {
            cx.check_map_key(key, "map");
            if let MapRepr::StringPairs { inner_delim, entry_delim } = repr {
                if *value_nullable {
                    cx.invalid("stringpairs representation cannot have nullable values");
                }
                if !is_stringifiable(ts, value) {
                    cx.invalid("stringpairs representation needs values that are represented as strings");
                } else if may_contain(ts, value, entry_delim, &mut Vec::new()) {
                    cx.ambiguous(format!("map values may contain the entry delimiter {entry_delim:?}"));
                }
                let key_ref = TypeRef::named(key);
                for delim in [inner_delim, entry_delim] {
                    if ts.contains(key) && may_contain(ts, &key_ref, delim, &mut Vec::new()) {
                        cx.ambiguous(format!("map keys may contain the delimiter {delim:?}"));
                    }
                }
            }
            cx.check_inline(value);
        }
        Type::List { value, .. } => cx.check_inline(value),
        _ => {}
    }
}

impl Checker<'_> {
    fn report(&mut self, kind: SemanticErrorKind, message: impl Into<String>) {
        self.diags.push(Pass::Definitions, SemanticError::new(self.type_name, kind, message));
    }

    fn definition(&mut self, message: impl Into<String>) {
        self.report(SemanticErrorKind::InvalidDefinition, message);
    }

    fn invalid(&mut self, message: impl Into<String>) {
        self.report(SemanticErrorKind::InvalidRepresentation, message);
    }

    fn ambiguous(&mut self, message: impl Into<String>) {
        self.report(SemanticErrorKind::AmbiguousRepresentation, message);
    }

    fn check_inline(&mut self, r: &TypeRef) {
        match r {
            TypeRef::List { value, .. } => self.check_inline(value),
            TypeRef::Map { key, value, .. } => {
                self.check_map_key(key, "inline map");
                self.check_inline(value);
            }
            TypeRef::Named(_) | TypeRef::Link { .. } => {}
        }
    }

    fn check_map_key(&mut self, key: &str, what: &str) {
        let ok = match self.ts.get(key) {
            None => return, // unresolved, already reported
            Some(Type::String) | Some(Type::Enum { repr: EnumRepr::String, .. }) => true,
            Some(_) => false,
        };
        if !ok {
            self.definition(format!("{what} key type `{key}` is not a string kind"));
        }
    }

    fn check_struct(&mut self, fields: &[Field], repr: &StructRepr) {
        for (i, f) in fields.iter().enumerate() {
            if fields[..i].iter().any(|g| g.name == f.name) {
                self.definition(format!("field `{}` is declared more than once", f.name));
            }
        }

        match repr {
            StructRepr::Map | StructRepr::ListPairs => {}
            StructRepr::Tuple => {
                for f in fields.iter().filter(|f| f.optional) {
                    self.invalid(format!("tuple representation cannot have optional field `{}`", f.name));
                }
            }
            StructRepr::StringJoin { join } => {
                let last = fields.len().saturating_sub(1);
                for (i, f) in fields.iter().enumerate() {
                    if f.optional || f.nullable {
                        self.invalid(format!(
                            "stringjoin representation cannot have optional or nullable field `{}`",
                            f.name
                        ));
                        continue;
                    }
                    if !is_stringifiable(self.ts, &f.ty) {
                        self.invalid(format!("field `{}` cannot be represented as a string", f.name));
                        continue;
                    }
                    if i < last && may_contain(self.ts, &f.ty, join, &mut Vec::new()) {
                        self.ambiguous(format!("field `{}` may contain the join separator {join:?}", f.name));
                    }
                }
            }
            StructRepr::StringPairs { inner_delim, entry_delim } => {
                for f in fields {
                    if f.nullable {
                        self.invalid(format!("stringpairs representation cannot have nullable field `{}`", f.name));
                    } else if !is_stringifiable(self.ts, &f.ty) {
                        self.invalid(format!("field `{}` cannot be represented as a string", f.name));
                    } else if may_contain(self.ts, &f.ty, entry_delim, &mut Vec::new()) {
                        self.ambiguous(format!("field `{}` may contain the entry delimiter {entry_delim:?}", f.name));
                    }
                    // pairs split at the first inner delimiter, so only the name must avoid it
                    if f.name.contains(inner_delim.as_str()) || f.name.contains(entry_delim.as_str()) {
                        self.ambiguous(format!("field name `{}` contains a delimiter", f.name));
                    }
                }
            }
        }
    }

    fn check_union(&mut self, members: &[Member], repr: &UnionRepr) {
        if members.is_empty() {
            self.definition("union has no members");
        }
        for (i, m) in members.iter().enumerate() {
            if members[..i].iter().any(|o| o.discriminant == m.discriminant) {
                self.definition(format!("discriminant {:?} is used more than once", m.discriminant));
            }
            if members[..i].iter().any(|o| o.ty == m.ty) {
                self.definition(format!("member type `{}` appears more than once", m.ty));
            }
        }

        match repr {
            UnionRepr::Keyed => {}
            UnionRepr::Kinded => {
                for m in members {
                    let Ok(kind) = m.discriminant.parse::<Kind>() else {
                        self.invalid(format!("`{}` is not a data model kind", m.discriminant));
                        continue;
                    };
                    let Some(ty) = self.ts.get(&m.ty) else { continue };
                    if ty.is_kinded_union() {
                        self.invalid(format!("kinded union member `{}` cannot itself be a kinded union", m.ty));
                    } else if ty.repr_kind() != kind {
                        self.invalid(format!(
                            "member `{}` is represented as {}, not {kind}",
                            m.ty,
                            ty.repr_kind()
                        ));
                    }
                }
            }
            UnionRepr::Inline { discriminant_key } => {
                for m in members {
                    match self.ts.get(&m.ty) {
                        None => {}
                        Some(Type::Struct { fields, repr: StructRepr::Map }) => {
                            if fields.iter().any(|f| &f.name == discriminant_key) {
                                self.invalid(format!(
                                    "member `{}` has a field named like the discriminant key {discriminant_key:?}",
                                    m.ty
                                ));
                            }
                        }
                        Some(_) => self.invalid(format!(
                            "inline union member `{}` must be a struct with map representation",
                            m.ty
                        )),
                    }
                }
            }
            UnionRepr::Envelope { discriminant_key, content_key } => {
                if discriminant_key == content_key {
                    self.invalid(format!("envelope keys must differ, both are {discriminant_key:?}"));
                }
            }
            UnionRepr::StringPrefix => {
                for (i, m) in members.iter().enumerate() {
                    if m.discriminant.is_empty() {
                        self.invalid(format!("member `{}` has an empty prefix", m.ty));
                        continue;
                    }
                    for o in &members[..i] {
                        if o.discriminant.is_empty() || o.discriminant == m.discriminant {
                            continue;
                        }
                        if m.discriminant.starts_with(&o.discriminant) || o.discriminant.starts_with(&m.discriminant) {
                            self.ambiguous(format!(
                                "prefixes {:?} and {:?} overlap",
                                o.discriminant, m.discriminant
                            ));
                        }
                    }
                    if self.ts.contains(&m.ty) && !is_stringifiable(self.ts, &TypeRef::named(&m.ty)) {
                        self.invalid(format!("member `{}` cannot be represented as a string", m.ty));
                    }
                }
            }
        }
    }

    fn check_enum(&mut self, members: &[crate::ir::EnumMember], repr: EnumRepr) {
        if members.is_empty() {
            self.definition("enum has no members");
        }
        for (i, m) in members.iter().enumerate() {
            if members[..i].iter().any(|o| o.name == m.name) {
                self.definition(format!("member `{}` is declared more than once", m.name));
            } else if members[..i].iter().any(|o| o.value == m.value) {
                self.definition(format!("representation value {:?} is used more than once", m.value));
            }
            if repr == EnumRepr::Int && m.value.parse::<i64>().is_err() {
                self.invalid(format!("member `{}` needs an integer value, found {:?}", m.name, m.value));
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// STRING FORMS
// ————————————————————————————————————————————————————————————————————————————

/// Whether values of this type have a string representation that can sit
/// inside a stringjoin, stringpairs or stringprefix value.
pub fn is_stringifiable(ts: &TypeSystem, r: &TypeRef) -> bool {
    match ts.target(r) {
        Target::Named(_, ty) => match ty {
            Type::Bool | Type::Int | Type::Float | Type::Enum { .. } => true,
            Type::Bytes | Type::Link { .. } | Type::List { .. } => false,
            other => other.repr_kind() == Kind::String,
        },
        _ => false,
    }
}

/// Conservative: true unless no value of the type can contain `sep` in its
/// string form.
pub fn may_contain(ts: &TypeSystem, r: &TypeRef, sep: &str, visiting: &mut Vec<String>) -> bool {
    let Target::Named(name, ty) = ts.target(r) else { return true };
    if visiting.iter().any(|v| v == name) {
        return true;
    }
    visiting.push(name.to_string());
    let chars_within = |allowed: &str| sep.chars().all(|c| allowed.contains(c));
    let out = match ty {
        Type::String => true,
        Type::Int => chars_within("-0123456789"),
        Type::Float => chars_within("-0123456789.infNa"),
        Type::Bool => "true".contains(sep) || "false".contains(sep),
        Type::Enum { members, .. } => members.iter().any(|m| m.value.contains(sep)),
        Type::Struct { fields, repr: StructRepr::StringJoin { join } } => {
            join.contains(sep) || fields.iter().any(|f| may_contain(ts, &f.ty, sep, visiting))
        }
        Type::Struct { fields, repr: StructRepr::StringPairs { inner_delim, entry_delim } } => {
            inner_delim.contains(sep)
                || entry_delim.contains(sep)
                || fields.iter().any(|f| f.name.contains(sep) || may_contain(ts, &f.ty, sep, visiting))
        }
        Type::Map { key, value, repr: MapRepr::StringPairs { inner_delim, entry_delim }, .. } => {
            inner_delim.contains(sep)
                || entry_delim.contains(sep)
                || may_contain(ts, &TypeRef::named(key), sep, visiting)
                || may_contain(ts, value, sep, visiting)
        }
        Type::Union { members, repr: UnionRepr::StringPrefix } => members
            .iter()
            .any(|m| m.discriminant.contains(sep) || may_contain(ts, &TypeRef::named(&m.ty), sep, visiting)),
        _ => true,
    };
    visiting.pop();
    out
}
