//! DMT → TypeSystem compiler.
//!
//! Unlike the parser this does not stop at the first problem: every pass runs
//! and all semantic errors come back together, ordered by pass, then by
//! declaration order. Passes:
//!
//! 1. name table: duplicate and malformed type names;
//! 2. resolution: every reference must name a known type; copies are
//!    materialized into the definition they copy;
//! 3. definitions: per-kind and per-representation constraints;
//! 4. recursion: a type must be representable by a finite value.
//!
//! The compiler is pure: the same DMT always gives the same result.
pub mod recursion;
pub mod repr;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dmt::{self, Schema, TypeDefn};
use crate::ir::{EnumMember, Field, Member, PRELUDE, Type, TypeRef, TypeSystem};

static TYPE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("type name pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    DuplicateName,
    InvalidName,
    UnresolvedReference,
    InvalidDefinition,
    InvalidRepresentation,
    AmbiguousRepresentation,
    IllegalRecursion,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("type {type_name}: {message}")]
pub struct SemanticError {
    pub type_name: String,
    pub kind: SemanticErrorKind,
    pub message: String,
}

/// One or more semantic violations, in the order they were found.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", summarize(.errors))]
pub struct CompileError {
    pub errors: Vec<SemanticError>,
}

// ————————————————————————————————————————————————————————————————————————————
// ERRORS
// ————————————————————————————————————————————————————————————————————————————

impl SemanticError {
    pub fn new(type_name: impl Into<String>, kind: SemanticErrorKind, message: impl Into<String>) -> Self {
        Self { type_name: type_name.into(), kind, message: message.into() }
    }
}

fn summarize(errors: &[SemanticError]) -> String {
    let n = errors.len();
    let mut out = format!("{n} schema error{}", if n == 1 { "" } else { "s" });
    for (i, e) in errors.iter().enumerate() {
        out.push_str(if i == 0 { ": " } else { "; " });
        out.push_str(&e.to_string());
    }
    out
}

impl CompileError {
    pub fn of_kind(&self, kind: SemanticErrorKind) -> impl Iterator<Item = &SemanticError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }
}

/// Errors bucketed per pass so the final order is pass-major.
#[derive(Default)]
pub(crate) struct Diagnostics {
    passes: [Vec<SemanticError>; 4],
}

#[derive(Clone, Copy)]
pub(crate) enum Pass {
    Names = 0,
    Resolve = 1,
    Definitions = 2,
    Recursion = 3,
}

impl Diagnostics {
    pub(crate) fn push(&mut self, pass: Pass, err: SemanticError) {
        self.passes[pass as usize].push(err);
    }

    fn into_errors(self) -> Vec<SemanticError> {
        self.passes.into_iter().flatten().collect()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// COMPILER
// ————————————————————————————————————————————————————————————————————————————

enum Draft {
    Ready(Type),
    Copy(String),
}

/// Compile a DMT into a TypeSystem, or every semantic error found.
pub fn lower_to_ir(schema: &Schema) -> Result<TypeSystem, CompileError> {
    let mut diags = Diagnostics::default();

    // 1) name table: first declaration of each valid name wins
    let mut table: Vec<(&str, &TypeDefn)> = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (name, defn) in &schema.types {
        if PRELUDE.contains(&name.as_str()) {
            diags.push(
                Pass::Names,
                SemanticError::new(name, SemanticErrorKind::DuplicateName, format!("`{name}` redeclares a prelude type")),
            );
            continue;
        }
        if !TYPE_NAME.is_match(name) {
            diags.push(
                Pass::Names,
                SemanticError::new(name, SemanticErrorKind::InvalidName, format!("`{name}` is not a valid type name")),
            );
            continue;
        }
        match seen.get(name.as_str()) {
            Some(_) => diags.push(
                Pass::Names,
                SemanticError::new(
                    name,
                    SemanticErrorKind::DuplicateName,
                    format!("type `{name}` is declared more than once"),
                ),
            ),
            None => {
                seen.insert(name, table.len());
                table.push((name, defn));
            }
        }
    }

    let known = |n: &str| PRELUDE.contains(&n) || seen.contains_key(n);

    // 2) resolution
    let mut drafts: Vec<(&str, Draft)> = Vec::with_capacity(table.len());
    for (name, defn) in &table {
        let mut cx = Resolver { type_name: *name, known: &known, diags: &mut diags };
        if let Some(draft) = cx.draft(defn) {
            drafts.push((*name, draft));
        }
    }

    let mut ts = TypeSystem::with_prelude();
    let ready: HashMap<&str, &Draft> = drafts.iter().map(|(n, d)| (*n, d)).collect();
    for (name, draft) in &drafts {
        match draft {
            Draft::Ready(ty) => ts.insert(name.to_string(), ty.clone()),
            Draft::Copy(from) => match materialize_copy(name, from, &ready) {
                Ok(Some(ty)) => ts.insert(name.to_string(), ty),
                Ok(None) => {} // copies something that failed to resolve; already reported
                Err(cycle) => diags.push(
                    Pass::Recursion,
                    SemanticError::new(
                        *name,
                        SemanticErrorKind::IllegalRecursion,
                        format!("copy cycle {}", cycle.join(" -> ")),
                    ),
                ),
            },
        }
    }

    // 3) definitions and representations
    for (name, defn) in &table {
        if let Some(ty) = ts.get(name) {
            if !matches!(defn, TypeDefn::Copy(_)) {
                repr::check_type(&ts, name, ty, &mut diags);
            }
        }
    }

    // 4) recursion
    recursion::check(&ts, &mut diags);

    let errors = diags.into_errors();
    if errors.is_empty() {
        tracing::debug!(types = ts.len(), "compiled schema");
        Ok(ts)
    } else {
        tracing::debug!(errors = errors.len(), "schema failed to compile");
        Err(CompileError { errors })
    }
}

/// Follow a chain of copies to a concrete definition.
fn materialize_copy(name: &str, from: &str, ready: &HashMap<&str, &Draft>) -> Result<Option<Type>, Vec<String>> {
    let mut chain = vec![name.to_string()];
    let mut current = from;
    loop {
        if chain.iter().any(|c| c == current) {
            chain.push(current.to_string());
            return Err(chain);
        }
        chain.push(current.to_string());
        if let Some(ty) = TypeSystem::with_prelude().get(current) {
            return Ok(Some(ty.clone()));
        }
        match ready.get(current) {
            Some(Draft::Ready(ty)) => return Ok(Some(ty.clone())),
            Some(Draft::Copy(next)) => current = next,
            None => return Ok(None),
        }
    }
}

struct Resolver<'a, F: Fn(&str) -> bool> {
    type_name: &'a str,
    known: &'a F,
    diags: &'a mut Diagnostics,
}

impl<F: Fn(&str) -> bool> Resolver<'_, F> {
    fn unresolved(&mut self, name: &str, site: &str) {
        self.diags.push(
            Pass::Resolve,
            SemanticError::new(
                self.type_name,
                SemanticErrorKind::UnresolvedReference,
                format!("unresolved reference to `{name}` in {site}"),
            ),
        );
    }

    fn representation(&mut self, result: Result<(), Vec<String>>) {
        if let Err(messages) = result {
            for message in messages {
                self.diags.push(
                    Pass::Definitions,
                    SemanticError::new(self.type_name, SemanticErrorKind::InvalidRepresentation, message),
                );
            }
        }
    }

    fn name(&mut self, name: &str, site: &str) -> bool {
        let ok = (self.known)(name);
        if !ok {
            self.unresolved(name, site);
        }
        ok
    }

    fn type_ref(&mut self, r: &dmt::TypeRef, site: &str) -> TypeRef {
        match r {
            dmt::TypeRef::Named(n) => {
                self.name(n, site);
                TypeRef::Named(n.clone())
            }
            dmt::TypeRef::Inline(inline) => match inline.as_ref() {
                dmt::InlineDefn::List(l) => TypeRef::List {
                    value: Box::new(self.type_ref(&l.value_type, site)),
                    value_nullable: l.value_nullable,
                },
                dmt::InlineDefn::Map(m) => {
                    self.name(&m.key_type, site);
                    if m.representation.is_some() {
                        self.representation(Err(vec![format!(
                            "inline map in {site} cannot declare a representation"
                        )]));
                    }
                    TypeRef::Map {
                        key: m.key_type.clone(),
                        value: Box::new(self.type_ref(&m.value_type, site)),
                        value_nullable: m.value_nullable,
                    }
                }
                dmt::InlineDefn::Link(l) => {
                    if let Some(expected) = &l.expected_type {
                        self.name(expected, site);
                    }
                    TypeRef::Link { expected: l.expected_type.clone() }
                }
            },
        }
    }

    fn draft(&mut self, defn: &TypeDefn) -> Option<Draft> {
        let ty = match defn {
            TypeDefn::Bool {} => Type::Bool,
            TypeDefn::String {} => Type::String,
            TypeDefn::Bytes {} => Type::Bytes,
            TypeDefn::Int {} => Type::Int,
            TypeDefn::Float {} => Type::Float,
            TypeDefn::Link(l) => {
                if let Some(expected) = &l.expected_type {
                    self.name(expected, "link target");
                }
                Type::Link { expected: l.expected_type.clone() }
            }
            TypeDefn::List(l) => Type::List {
                value: self.type_ref(&l.value_type, "list values"),
                value_nullable: l.value_nullable,
            },
            TypeDefn::Map(m) => {
                self.name(&m.key_type, "map keys");
                let value = self.type_ref(&m.value_type, "map values");
                let repr = repr::map_repr(m.representation.as_ref());
                let repr = self.fallback(repr, crate::ir::MapRepr::Map);
                Type::Map { key: m.key_type.clone(), value, value_nullable: m.value_nullable, repr }
            }
            TypeDefn::Struct(s) => {
                let fields = s
                    .fields
                    .iter()
                    .map(|(fname, f)| Field {
                        name: fname.clone(),
                        ty: self.type_ref(&f.ty, &format!("field `{fname}`")),
                        optional: f.optional,
                        nullable: f.nullable,
                    })
                    .collect();
                let repr = repr::struct_repr(s.representation.as_ref());
                let repr = self.fallback(repr, crate::ir::StructRepr::Map);
                Type::Struct { fields, repr }
            }
            TypeDefn::Union(u) => {
                let members = u
                    .members
                    .iter()
                    .map(|m| {
                        self.name(&m.ty, &format!("union member {:?}", m.discriminant));
                        Member { discriminant: m.discriminant.clone(), ty: m.ty.clone() }
                    })
                    .collect();
                let repr = repr::union_repr(u.representation.as_ref());
                let repr = self.fallback(repr, crate::ir::UnionRepr::Keyed);
                Type::Union { members, repr }
            }
            TypeDefn::Enum(e) => {
                let members = e
                    .members
                    .iter()
                    .map(|m| EnumMember {
                        name: m.name.clone(),
                        value: m.value.clone().unwrap_or_else(|| m.name.clone()),
                    })
                    .collect();
                let repr = repr::enum_repr(e.representation.as_ref());
                let repr = self.fallback(repr, crate::ir::EnumRepr::String);
                Type::Enum { members, repr }
            }
            TypeDefn::Copy(c) => {
                return self.name(&c.from_type, "copy source").then(|| Draft::Copy(c.from_type.clone()));
            }
        };
        Some(Draft::Ready(ty))
    }

    fn fallback<R>(&mut self, result: Result<R, Vec<String>>, default: R) -> R {
        match result {
            Ok(r) => r,
            Err(messages) => {
                self.representation(Err(messages));
                default
            }
        }
    }
}
