//! Minimal mode: serde placeholders plus a start-up binding table.
//!
//! ```text
//! types.rs   one placeholder per declared type (prelude names map to intrinsics)
//! schema.rs  SCHEMA_SOURCE, `Types`, `TYPES: Lazy<Types>`, `init()`
//! ```
use std::iter;

use crate::dsl;
use crate::error::Error;
use crate::ir::{EnumMember, Field, Member, Type, TypeRef, TypeSystem};
use crate::lower;

use super::{
    Codegen, GeneratedArtifact, Generator, GeneratorInput, HEADER, field_ident, field_type, needs_box, pascal_case,
    raw_string_literal, rust_ident, rust_type, snake_case, type_ident, unique_idents,
};

pub struct MinimalGenerator;

impl Generator for MinimalGenerator {
    fn name(&self) -> &'static str {
        "minimal"
    }

    fn generate(&self, input: &GeneratorInput<'_>) -> Result<GeneratedArtifact, Error> {
        // the embedded text is what start-up will load, so it has to compile
        // to exactly the system we generate from
        let reloaded = lower::lower_to_ir(&dsl::parse(input.source_name, input.source)?)?;
        if reloaded != *input.ts {
            return Err(Error::invalid_argument(format!(
                "schema source {} does not compile to the type system being generated",
                input.source_name
            )));
        }

        let mut artifact = GeneratedArtifact::default();
        artifact.push("types.rs", emit_types(input.ts, input.package));
        artifact.push("schema.rs", emit_schema(input));
        tracing::debug!(package = input.package, types = input.ts.declared().count(), "generated minimal bindings");
        Ok(artifact)
    }
}

const SERDE_DERIVE: &str = "Serialize, Deserialize";

// ————————————————————————————————————————————————————————————————————————————
// TYPES.RS
// ————————————————————————————————————————————————————————————————————————————

fn emit_types(ts: &TypeSystem, package: &str) -> String {
    let mut cg = Codegen::new();
    cg.line(HEADER);
    cg.line(format!("//! Placeholder types for the `{package}` schema, bound at start-up by `schema.rs`."));
    cg.line("#![allow(unused)]");
    cg.line("use serde::{Deserialize, Serialize};");
    cg.blank();
    cg.line("use ipld_schema_tool::node::{Bytes, IndexMap, Link};");

    for (name, ty) in ts.declared() {
        let ident = type_ident(name);
        cg.blank();
        match ty {
            Type::Bool | Type::Int | Type::String | Type::Bytes | Type::Link { .. } => {
                newtype(&mut cg, &ident, &scalar_type(ty), "Debug, Clone, PartialEq, Eq, Hash");
            }
            Type::Float => newtype(&mut cg, &ident, "f64", "Debug, Clone, PartialEq"),
            Type::List { value, value_nullable } => {
                let list = TypeRef::List { value: Box::new(value.clone()), value_nullable: *value_nullable };
                newtype(&mut cg, &ident, &rust_type(&list, false), "Debug, Clone, PartialEq");
            }
            Type::Map { key, value, value_nullable, .. } => {
                let map = TypeRef::Map { key: key.clone(), value: Box::new(value.clone()), value_nullable: *value_nullable };
                newtype(&mut cg, &ident, &rust_type(&map, false), "Debug, Clone, PartialEq");
            }
            Type::Struct { fields, .. } => placeholder_struct(&mut cg, ts, name, &ident, fields),
            Type::Union { members, .. } => placeholder_union(&mut cg, ts, name, &ident, members),
            Type::Enum { members, .. } => placeholder_enum(&mut cg, &ident, members),
        }
    }
    cg.into_string()
}

fn scalar_type(ty: &Type) -> String {
    let prelude = match ty {
        Type::Bool => "Bool",
        Type::Int => "Int",
        Type::Bytes => "Bytes",
        Type::Link { .. } => "Link",
        _ => "String",
    };
    rust_type(&TypeRef::named(prelude), false)
}

fn newtype(cg: &mut Codegen, ident: &str, inner: &str, derive: &str) {
    cg.line(format!("#[derive({derive}, {SERDE_DERIVE})]"));
    cg.line("#[serde(transparent)]");
    cg.line(format!("pub struct {ident}(pub {inner});"));
}

fn rename(cg: &mut Codegen, ident: &str, name: &str) {
    if ident.trim_start_matches("r#") != name {
        cg.line(format!("#[serde(rename = {name:?})]"));
    }
}

fn placeholder_struct(cg: &mut Codegen, ts: &TypeSystem, name: &str, ident: &str, fields: &[Field]) {
    let idents = unique_idents(fields.iter().map(|f| f.name.as_str()), field_ident);
    cg.line(format!("#[derive(Debug, Clone, PartialEq, {SERDE_DERIVE})]"));
    cg.block(format!("pub struct {ident}"), |cg| {
        for (field, slot) in fields.iter().zip(&idents) {
            rename(cg, slot, &field.name);
            if field.optional && field.nullable {
                cg.line(
                    "#[serde(default, skip_serializing_if = \"Option::is_none\", with = \"ipld_schema_tool::bind::double_option\")]",
                );
            } else if field.optional {
                cg.line("#[serde(default, skip_serializing_if = \"Option::is_none\")]");
            }
            let boxed = field.ty.name().is_some_and(|to| needs_box(ts, name, to));
            let ty = field_type(&field.ty, field.optional, field.nullable, boxed);
            cg.line(format!("pub {slot}: {ty},"));
        }
    });
}

/// Externally tagged by member type name, the shape `bind` expects.
fn placeholder_union(cg: &mut Codegen, ts: &TypeSystem, name: &str, ident: &str, members: &[Member]) {
    let variants = unique_idents(members.iter().map(|m| m.ty.as_str()), type_ident);
    cg.line(format!("#[derive(Debug, Clone, PartialEq, {SERDE_DERIVE})]"));
    cg.block(format!("pub enum {ident}"), |cg| {
        for (member, variant) in members.iter().zip(&variants) {
            rename(cg, variant, &member.ty);
            let payload = rust_type(&TypeRef::named(&member.ty), needs_box(ts, name, &member.ty));
            cg.line(format!("{variant}({payload}),"));
        }
    });
}

fn placeholder_enum(cg: &mut Codegen, ident: &str, members: &[EnumMember]) {
    let variants = unique_idents(members.iter().map(|m| m.name.as_str()), |n| rust_ident(&pascal_case(n)));
    cg.line(format!("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, {SERDE_DERIVE})]"));
    cg.block(format!("pub enum {ident}"), |cg| {
        for (member, variant) in members.iter().zip(&variants) {
            rename(cg, variant, &member.name);
            cg.line(format!("{variant},"));
        }
    });
}

// ————————————————————————————————————————————————————————————————————————————
// SCHEMA.RS
// ————————————————————————————————————————————————————————————————————————————

fn emit_schema(input: &GeneratorInput<'_>) -> String {
    let declared: Vec<&str> = input.ts.declared().map(|(n, _)| n).collect();
    let slots: Vec<String> = unique_idents(
        iter::once("bindings").chain(declared.iter().copied()),
        |n| rust_ident(&snake_case(n)),
    )
    .into_iter()
    .skip(1)
    .collect();

    let mut cg = Codegen::new();
    cg.line(HEADER);
    cg.line(format!("//! Start-up binding table for the `{}` schema.", input.package));
    cg.line("use ipld_schema_tool::bind::{Bindings, Lazy, Prototype};");
    cg.blank();
    cg.line(format!("/// `{}`, embedded verbatim.", input.source_name));
    cg.line(format!("pub const SCHEMA_SOURCE: &str = {};", raw_string_literal(input.source)));
    cg.blank();
    cg.line("/// One prototype per placeholder in `types.rs`.");
    cg.block("pub struct Types", |cg| {
        cg.line("pub bindings: Bindings,");
        for slot in &slots {
            cg.line(format!("pub {slot}: Prototype,"));
        }
    });
    cg.blank();
    cg.block_with("pub static TYPES: Lazy<Types> = Lazy::new(||", "});", |cg| {
        cg.line("let bindings = Bindings::load(SCHEMA_SOURCE)");
        cg.line("    .unwrap_or_else(|err| panic!(\"embedded schema failed to load: {err}\"));");
        cg.line("let prototype = |name: &str| {");
        cg.line("    bindings.prototype(name).unwrap_or_else(|err| panic!(\"binding {name}: {err}\"))");
        cg.line("};");
        cg.block("Types", |cg| {
            for (name, slot) in declared.iter().zip(&slots) {
                cg.line(format!("{slot}: prototype({name:?}),"));
            }
            cg.line("bindings,");
        });
    });
    cg.blank();
    cg.line("/// Load and bind the embedded schema now instead of on first use.");
    cg.line("/// Panics if it does not load.");
    cg.block("pub fn init()", |cg| {
        cg.line("Lazy::force(&TYPES);");
    });
    cg.into_string()
}
