//! Full mode: one self-contained file per type.
use crate::error::Error;
use crate::ir::{EnumMember, EnumRepr, Field, MapRepr, Member, StructRepr, Type, TypeRef, TypeSystem, UnionRepr};

use super::{
    Codegen, GeneratedArtifact, Generator, GeneratorInput, HEADER, field_type, needs_box, pascal_case, rust_ident,
    rust_type, snake_case, type_ident, unique_idents,
};

pub struct FullGenerator;

impl Generator for FullGenerator {
    fn name(&self) -> &'static str {
        "full"
    }

    fn generate(&self, input: &GeneratorInput<'_>) -> Result<GeneratedArtifact, Error> {
        let ts = input.ts;
        let declared: Vec<(&str, &Type)> = ts.declared().collect();
        let modules = unique_idents(declared.iter().map(|(n, _)| *n), |n| {
            let module = rust_ident(&snake_case(n));
            if module == type_ident(n) { format!("{module}_ty") } else { module }
        });

        let mut artifact = GeneratedArtifact::default();
        let mut root = Codegen::new();
        root.line(HEADER);
        root.line(format!("//! Bindings for the `{}` schema.", input.package));
        root.blank();
        for ((name, ty), module) in declared.iter().zip(&modules) {
            root.line(format!("mod {module};"));
            root.line(format!("pub use {module}::{};", type_ident(name)));
            let file = format!("{}.rs", module.trim_start_matches("r#"));
            artifact.push(file, emit_type(ts, name, ty)?);
        }
        artifact.push("mod.rs", root.into_string());

        tracing::debug!(package = input.package, files = artifact.files.len(), "generated full bindings");
        Ok(artifact)
    }
}

fn lit(s: &str) -> String {
    format!("{s:?}")
}

fn decode_err(what: &str, name: &str) -> String {
    format!(".map_err(|e| e.within({}))", lit(&format!("{what} {name:?}")))
}

// ————————————————————————————————————————————————————————————————————————————
// PER TYPE
// ————————————————————————————————————————————————————————————————————————————

fn emit_type(ts: &TypeSystem, name: &str, ty: &Type) -> Result<String, Error> {
    let ident = type_ident(name);
    let mut cg = Codegen::new();
    cg.line(HEADER);
    cg.line("#![allow(unused)]");
    cg.line("use ipld_schema_tool::node as ipld;");
    cg.line("use ipld_schema_tool::node::{Bytes, IndexMap, Link, Representable, StringRepr};");
    cg.blank();
    cg.line("use super::*;");
    cg.blank();
    cg.line(format!("/// Schema type `{name}`: {} with {} representation.", ty.kind_name(), ty.repr_name()));

    match ty {
        Type::Bool | Type::Int | Type::Float | Type::String => {
            let inner = rust_type(&TypeRef::named(prelude_of(ty)), false);
            newtype(&mut cg, &ident, &inner, derives(ty));
            delegate_string_repr(&mut cg, &ident);
        }
        Type::Bytes | Type::Link { .. } => {
            let inner = rust_type(&TypeRef::named(prelude_of(ty)), false);
            newtype(&mut cg, &ident, &inner, derives(ty));
        }
        Type::List { value, value_nullable } => {
            let inner = rust_type(&TypeRef::List { value: Box::new(value.clone()), value_nullable: *value_nullable }, false);
            newtype(&mut cg, &ident, &inner, derives(ty));
        }
        Type::Map { key, value, value_nullable, repr } => {
            let map_ty = TypeRef::Map { key: key.clone(), value: Box::new(value.clone()), value_nullable: *value_nullable };
            emit_map(&mut cg, &ident, &rust_type(&map_ty, false), repr);
        }
        Type::Struct { fields, repr } => emit_struct(&mut cg, ts, name, &ident, fields, repr),
        Type::Union { members, repr } => emit_union(&mut cg, ts, name, &ident, members, repr),
        Type::Enum { members, repr } => emit_enum(&mut cg, &ident, members, *repr)?,
    }
    Ok(cg.into_string())
}

fn prelude_of(ty: &Type) -> &'static str {
    match ty {
        Type::Bool => "Bool",
        Type::Int => "Int",
        Type::Float => "Float",
        Type::Bytes => "Bytes",
        Type::Link { .. } => "Link",
        _ => "String",
    }
}

fn derives(ty: &Type) -> &'static str {
    match ty {
        Type::Bool | Type::Int | Type::String | Type::Bytes | Type::Link { .. } => {
            "#[derive(Debug, Clone, PartialEq, Eq, Hash)]"
        }
        Type::Enum { .. } => "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]",
        _ => "#[derive(Debug, Clone, PartialEq)]",
    }
}

fn newtype(cg: &mut Codegen, ident: &str, inner: &str, derive: &str) {
    cg.line(derive);
    cg.line(format!("pub struct {ident}(pub {inner});"));
    cg.blank();
    cg.block(format!("impl Representable for {ident}"), |cg| {
        cg.block("fn to_node(&self) -> ipld::Node", |cg| {
            cg.line("self.0.to_node()");
        });
        cg.block("fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError>", |cg| {
            cg.line("Representable::from_node(node).map(Self)");
        });
    });
}

fn delegate_string_repr(cg: &mut Codegen, ident: &str) {
    cg.blank();
    cg.block(format!("impl StringRepr for {ident}"), |cg| {
        cg.block("fn to_repr_string(&self) -> String", |cg| {
            cg.line("self.0.to_repr_string()");
        });
        cg.block("fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError>", |cg| {
            cg.line("StringRepr::from_repr_string(s).map(Self)");
        });
    });
}

/// Representable over the string form, for string-kinded representations.
fn via_string(cg: &mut Codegen, ident: &str) {
    cg.blank();
    cg.block(format!("impl Representable for {ident}"), |cg| {
        cg.block("fn to_node(&self) -> ipld::Node", |cg| {
            cg.line("ipld::Node::String(self.to_repr_string())");
        });
        cg.block("fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError>", |cg| {
            cg.line("Self::from_repr_string(ipld::repr::expect_str(node)?)");
        });
    });
}

fn emit_map(cg: &mut Codegen, ident: &str, map_ty: &str, repr: &MapRepr) {
    match repr {
        MapRepr::Map => newtype(cg, ident, map_ty, "#[derive(Debug, Clone, PartialEq)]"),
        MapRepr::StringPairs { inner_delim, entry_delim } => {
            cg.line("#[derive(Debug, Clone, PartialEq)]");
            cg.line(format!("pub struct {ident}(pub {map_ty});"));
            cg.blank();
            cg.block(format!("impl StringRepr for {ident}"), |cg| {
                cg.block("fn to_repr_string(&self) -> String", |cg| {
                    cg.line("let pairs: Vec<(String, String)> =");
                    cg.line("    self.0.iter().map(|(k, v)| (k.to_repr_string(), v.to_repr_string())).collect();");
                    cg.line(format!("ipld::repr::join_pairs(&pairs, {}, {})", lit(inner_delim), lit(entry_delim)));
                });
                cg.block("fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError>", |cg| {
                    cg.line(format!("let mut out: {map_ty} = IndexMap::new();"));
                    cg.block(
                        format!(
                            "for (k, v) in ipld::repr::split_pairs(s, {}, {})?",
                            lit(inner_delim),
                            lit(entry_delim)
                        ),
                        |cg| {
                            cg.line("out.insert(StringRepr::from_repr_string(k)?, StringRepr::from_repr_string(v)?);");
                        },
                    );
                    cg.line("Ok(Self(out))");
                });
            });
            via_string(cg, ident);
        }
        MapRepr::ListPairs => {
            cg.line("#[derive(Debug, Clone, PartialEq)]");
            cg.line(format!("pub struct {ident}(pub {map_ty});"));
            cg.blank();
            cg.block(format!("impl Representable for {ident}"), |cg| {
                cg.block("fn to_node(&self) -> ipld::Node", |cg| {
                    cg.line("ipld::Node::List(");
                    cg.line("    self.0");
                    cg.line("        .iter()");
                    cg.line("        .map(|(k, v)| ipld::Node::List(vec![ipld::Node::String(k.to_repr_string()), v.to_node()]))");
                    cg.line("        .collect(),");
                    cg.line(")");
                });
                cg.block("fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError>", |cg| {
                    cg.line(format!("let mut out: {map_ty} = IndexMap::new();"));
                    cg.block("for (k, v) in ipld::repr::list_pairs(node)?", |cg| {
                        cg.line("out.insert(StringRepr::from_repr_string(k)?, Representable::from_node(v)?);");
                    });
                    cg.line("Ok(Self(out))");
                });
            });
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// STRUCTS
// ————————————————————————————————————————————————————————————————————————————

struct FieldPlan<'a> {
    field: &'a Field,
    ident: String,
}

fn emit_struct(cg: &mut Codegen, ts: &TypeSystem, name: &str, ident: &str, fields: &[Field], repr: &StructRepr) {
    let idents = unique_idents(fields.iter().map(|f| f.name.as_str()), |n| rust_ident(&snake_case(n)));
    let plans: Vec<FieldPlan> = fields.iter().zip(idents).map(|(field, ident)| FieldPlan { field, ident }).collect();

    cg.line("#[derive(Debug, Clone, PartialEq)]");
    cg.block(format!("pub struct {ident}"), |cg| {
        for p in &plans {
            let boxed = p.field.ty.name().is_some_and(|to| needs_box(ts, name, to));
            let ty = field_type(&p.field.ty, p.field.optional, p.field.nullable, boxed);
            cg.line(format!("pub {}: {ty},", p.ident));
        }
    });
    let known = plans.iter().map(|p| lit(&p.field.name)).collect::<Vec<_>>().join(", ");

    match repr {
        StructRepr::Map | StructRepr::ListPairs => {
            let listpairs = matches!(repr, StructRepr::ListPairs);
            cg.blank();
            cg.block(format!("impl Representable for {ident}"), |cg| {
                cg.block("fn to_node(&self) -> ipld::Node", |cg| {
                    cg.line("let mut entries: Vec<(String, ipld::Node)> = Vec::new();");
                    for p in &plans {
                        let key = lit(&p.field.name);
                        if p.field.optional {
                            cg.block(format!("if let Some(value) = &self.{}", p.ident), |cg| {
                                cg.line(format!("entries.push(({key}.to_string(), value.to_node()));"));
                            });
                        } else {
                            cg.line(format!("entries.push(({key}.to_string(), self.{}.to_node()));", p.ident));
                        }
                    }
                    if listpairs {
                        cg.line("ipld::Node::List(");
                        cg.line("    entries");
                        cg.line("        .into_iter()");
                        cg.line("        .map(|(k, v)| ipld::Node::List(vec![ipld::Node::String(k), v]))");
                        cg.line("        .collect(),");
                        cg.line(")");
                    } else {
                        cg.line("ipld::Node::Map(entries)");
                    }
                });
                cg.block("fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError>", |cg| {
                    if listpairs {
                        cg.line("let entries = ipld::repr::list_pairs(node)?;");
                    } else {
                        cg.line("let entries = ipld::repr::map_entries(node)?;");
                    }
                    cg.line(format!("ipld::repr::reject_unknown(&entries, &[{known}])?;"));
                    cg.block_with("Ok(Self", "})", |cg| {
                        for p in &plans {
                            let key = lit(&p.field.name);
                            let err = decode_err("field", &p.field.name);
                            if p.field.optional {
                                cg.line(format!(
                                    "{}: ipld::repr::lookup(&entries, {key}).map(Representable::from_node).transpose(){err}?,",
                                    p.ident
                                ));
                            } else {
                                cg.line(format!(
                                    "{}: Representable::from_node(ipld::repr::lookup_required(&entries, {key})?){err}?,",
                                    p.ident
                                ));
                            }
                        }
                    });
                });
            });
        }
        StructRepr::Tuple => {
            cg.blank();
            cg.block(format!("impl Representable for {ident}"), |cg| {
                cg.block("fn to_node(&self) -> ipld::Node", |cg| {
                    let items: Vec<String> = plans.iter().map(|p| format!("self.{}.to_node()", p.ident)).collect();
                    cg.line(format!("ipld::Node::List(vec![{}])", items.join(", ")));
                });
                cg.block("fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError>", |cg| {
                    cg.line(format!("let items = ipld::repr::expect_list_len(node, {})?;", plans.len()));
                    cg.block_with("Ok(Self", "})", |cg| {
                        for (i, p) in plans.iter().enumerate() {
                            let err = decode_err("field", &p.field.name);
                            cg.line(format!("{}: Representable::from_node(&items[{i}]){err}?,", p.ident));
                        }
                    });
                });
            });
        }
        StructRepr::StringJoin { join } => {
            cg.blank();
            cg.block(format!("impl StringRepr for {ident}"), |cg| {
                cg.block("fn to_repr_string(&self) -> String", |cg| {
                    if plans.is_empty() {
                        cg.line("String::new()");
                    } else {
                        let parts: Vec<String> = plans.iter().map(|p| format!("self.{}.to_repr_string()", p.ident)).collect();
                        cg.line(format!("[{}].join({})", parts.join(", "), lit(join)));
                    }
                });
                cg.block("fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError>", |cg| {
                    cg.line(format!("let parts = ipld::repr::split_join(s, {}, {})?;", lit(join), plans.len()));
                    cg.block_with("Ok(Self", "})", |cg| {
                        for (i, p) in plans.iter().enumerate() {
                            let err = decode_err("field", &p.field.name);
                            cg.line(format!("{}: StringRepr::from_repr_string(parts[{i}]){err}?,", p.ident));
                        }
                    });
                });
            });
            via_string(cg, ident);
        }
        StructRepr::StringPairs { inner_delim, entry_delim } => {
            cg.blank();
            cg.block(format!("impl StringRepr for {ident}"), |cg| {
                cg.block("fn to_repr_string(&self) -> String", |cg| {
                    cg.line("let mut pairs: Vec<(String, String)> = Vec::new();");
                    for p in &plans {
                        let key = lit(&p.field.name);
                        if p.field.optional {
                            cg.block(format!("if let Some(value) = &self.{}", p.ident), |cg| {
                                cg.line(format!("pairs.push(({key}.to_string(), value.to_repr_string()));"));
                            });
                        } else {
                            cg.line(format!("pairs.push(({key}.to_string(), self.{}.to_repr_string()));", p.ident));
                        }
                    }
                    cg.line(format!("ipld::repr::join_pairs(&pairs, {}, {})", lit(inner_delim), lit(entry_delim)));
                });
                cg.block("fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError>", |cg| {
                    cg.line(format!(
                        "let entries = ipld::repr::split_pairs(s, {}, {})?;",
                        lit(inner_delim),
                        lit(entry_delim)
                    ));
                    cg.line(format!("ipld::repr::reject_unknown(&entries, &[{known}])?;"));
                    cg.block_with("Ok(Self", "})", |cg| {
                        for p in &plans {
                            let key = lit(&p.field.name);
                            let err = decode_err("field", &p.field.name);
                            if p.field.optional {
                                cg.line(format!(
                                    "{}: ipld::repr::lookup(&entries, {key}).map(StringRepr::from_repr_string).transpose(){err}?,",
                                    p.ident
                                ));
                            } else {
                                cg.line(format!(
                                    "{}: StringRepr::from_repr_string(ipld::repr::lookup_required(&entries, {key})?){err}?,",
                                    p.ident
                                ));
                            }
                        }
                    });
                });
            });
            via_string(cg, ident);
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// UNIONS AND ENUMS
// ————————————————————————————————————————————————————————————————————————————

fn emit_union(cg: &mut Codegen, ts: &TypeSystem, name: &str, ident: &str, members: &[Member], repr: &UnionRepr) {
    let variants: Vec<String> = members.iter().map(|m| rust_ident(&m.ty)).collect();

    cg.line("#[derive(Debug, Clone, PartialEq)]");
    cg.block(format!("pub enum {ident}"), |cg| {
        for (m, v) in members.iter().zip(&variants) {
            let ty = rust_type(&TypeRef::named(&m.ty), needs_box(ts, name, &m.ty));
            cg.line(format!("{v}({ty}),"));
        }
    });

    let unknown = "other => Err(ipld::DecodeError::UnknownDiscriminant(other.to_string())),";
    cg.blank();
    if let UnionRepr::StringPrefix = repr {
        cg.block(format!("impl StringRepr for {ident}"), |cg| {
            cg.block("fn to_repr_string(&self) -> String", |cg| {
                cg.block("match self", |cg| {
                    for (m, v) in members.iter().zip(&variants) {
                        cg.line(format!(
                            "Self::{v}(value) => format!(\"{{}}{{}}\", {}, value.to_repr_string()),",
                            lit(&m.discriminant)
                        ));
                    }
                });
            });
            cg.block("fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError>", |cg| {
                for (m, v) in members.iter().zip(&variants) {
                    cg.block(format!("if let Some(rest) = s.strip_prefix({})", lit(&m.discriminant)), |cg| {
                        let err = decode_err("member", &m.ty);
                        cg.line(format!("return StringRepr::from_repr_string(rest).map(Self::{v}){err};"));
                    });
                }
                cg.line("Err(ipld::DecodeError::UnknownDiscriminant(s.to_string()))");
            });
        });
        via_string(cg, ident);
        return;
    }

    cg.block(format!("impl Representable for {ident}"), |cg| {
        cg.block("fn to_node(&self) -> ipld::Node", |cg| match repr {
            UnionRepr::Keyed => {
                cg.block("match self", |cg| {
                    for (m, v) in members.iter().zip(&variants) {
                        cg.line(format!(
                            "Self::{v}(value) => ipld::Node::Map(vec![({}.to_string(), value.to_node())]),",
                            lit(&m.discriminant)
                        ));
                    }
                });
            }
            UnionRepr::Kinded => {
                cg.block("match self", |cg| {
                    for v in &variants {
                        cg.line(format!("Self::{v}(value) => value.to_node(),"));
                    }
                });
            }
            UnionRepr::Inline { discriminant_key } => {
                discriminated(cg, members, &variants);
                cg.block("if let ipld::Node::Map(entries) = &mut content", |cg| {
                    cg.line(format!(
                        "entries.insert(0, ({}.to_string(), ipld::Node::String(discriminant.to_string())));",
                        lit(discriminant_key)
                    ));
                });
                cg.line("content");
            }
            UnionRepr::Envelope { discriminant_key, content_key } => {
                discriminated(cg, members, &variants);
                cg.line("ipld::Node::Map(vec![");
                cg.line(format!(
                    "    ({}.to_string(), ipld::Node::String(discriminant.to_string())),",
                    lit(discriminant_key)
                ));
                cg.line(format!("    ({}.to_string(), content),", lit(content_key)));
                cg.line("])");
            }
            UnionRepr::StringPrefix => {}
        });
        cg.block("fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError>", |cg| {
            let arm = |m: &Member, v: &str, from: &str| {
                format!(
                    "{} => Ok(Self::{v}(Representable::from_node({from}){}?)),",
                    lit(&m.discriminant),
                    decode_err("member", &m.ty)
                )
            };
            match repr {
                UnionRepr::Keyed => {
                    cg.line("let entries = ipld::repr::expect_map(node)?;");
                    cg.block_with("let [(key, value)] = entries else", "};", |cg| {
                        cg.line("return Err(ipld::DecodeError::invalid(format!(");
                        cg.line("    \"keyed union needs exactly one entry, found {}\",");
                        cg.line("    entries.len()");
                        cg.line(")));");
                    });
                    cg.block("match key.as_str()", |cg| {
                        for (m, v) in members.iter().zip(&variants) {
                            cg.line(arm(m, v, "value"));
                        }
                        cg.line(unknown);
                    });
                }
                UnionRepr::Kinded => {
                    cg.block("match node.kind()", |cg| {
                        for (m, v) in members.iter().zip(&variants) {
                            cg.line(format!(
                                "ipld::Kind::{} => Ok(Self::{v}(Representable::from_node(node){}?)),",
                                pascal_case(&m.discriminant),
                                decode_err("member", &m.ty)
                            ));
                        }
                        cg.line(unknown);
                    });
                }
                UnionRepr::Inline { discriminant_key } => {
                    let key = lit(discriminant_key);
                    cg.line("let entries = ipld::repr::map_entries(node)?;");
                    cg.line(format!(
                        "let discriminant = ipld::repr::expect_str(ipld::repr::lookup_required(&entries, {key})?)?;"
                    ));
                    cg.line("let rest = ipld::Node::Map(");
                    cg.line("    entries");
                    cg.line("        .iter()");
                    cg.line(format!("        .filter(|(k, _)| *k != {key})"));
                    cg.line("        .map(|(k, v)| (k.to_string(), (*v).clone()))");
                    cg.line("        .collect(),");
                    cg.line(");");
                    cg.block("match discriminant", |cg| {
                        for (m, v) in members.iter().zip(&variants) {
                            cg.line(arm(m, v, "&rest"));
                        }
                        cg.line(unknown);
                    });
                }
                UnionRepr::Envelope { discriminant_key, content_key } => {
                    let (dk, ck) = (lit(discriminant_key), lit(content_key));
                    cg.line("let entries = ipld::repr::map_entries(node)?;");
                    cg.line(format!("ipld::repr::reject_unknown(&entries, &[{dk}, {ck}])?;"));
                    cg.line(format!(
                        "let discriminant = ipld::repr::expect_str(ipld::repr::lookup_required(&entries, {dk})?)?;"
                    ));
                    cg.line(format!("let content = ipld::repr::lookup_required(&entries, {ck})?;"));
                    cg.block("match discriminant", |cg| {
                        for (m, v) in members.iter().zip(&variants) {
                            cg.line(arm(m, v, "content"));
                        }
                        cg.line(unknown);
                    });
                }
                UnionRepr::StringPrefix => {}
            }
        });
    });
}

/// `let (discriminant, mut content) = match self { ... };`
fn discriminated(cg: &mut Codegen, members: &[Member], variants: &[String]) {
    cg.block_with("let (discriminant, mut content) = match self", "};", |cg| {
        for (m, v) in members.iter().zip(variants) {
            cg.line(format!("Self::{v}(value) => ({}, value.to_node()),", lit(&m.discriminant)));
        }
    });
}

fn emit_enum(cg: &mut Codegen, ident: &str, members: &[EnumMember], repr: EnumRepr) -> Result<(), Error> {
    let variants = unique_idents(members.iter().map(|m| m.name.as_str()), |n| rust_ident(&pascal_case(n)));
    let unknown = "other => Err(ipld::DecodeError::UnknownDiscriminant(other.to_string())),";

    cg.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
    cg.block(format!("pub enum {ident}"), |cg| {
        for v in &variants {
            cg.line(format!("{v},"));
        }
    });
    cg.blank();
    cg.block(format!("impl StringRepr for {ident}"), |cg| {
        cg.block("fn to_repr_string(&self) -> String", |cg| {
            cg.block_with("let value = match self", "};", |cg| {
                for (m, v) in members.iter().zip(&variants) {
                    cg.line(format!("Self::{v} => {},", lit(&m.value)));
                }
            });
            cg.line("value.to_string()");
        });
        cg.block("fn from_repr_string(s: &str) -> Result<Self, ipld::DecodeError>", |cg| {
            cg.block("match s", |cg| {
                for (m, v) in members.iter().zip(&variants) {
                    cg.line(format!("{} => Ok(Self::{v}),", lit(&m.value)));
                }
                cg.line(unknown);
            });
        });
    });

    match repr {
        EnumRepr::String => via_string(cg, ident),
        EnumRepr::Int => {
            let values = members.iter().map(|m| int_value(&m.value)).collect::<Result<Vec<i64>, Error>>()?;
            cg.blank();
            cg.block(format!("impl Representable for {ident}"), |cg| {
                cg.block("fn to_node(&self) -> ipld::Node", |cg| {
                    cg.block_with("ipld::Node::Int(match self", "})", |cg| {
                        for (value, v) in values.iter().zip(&variants) {
                            cg.line(format!("Self::{v} => {value},"));
                        }
                    });
                });
                cg.block("fn from_node(node: &ipld::Node) -> Result<Self, ipld::DecodeError>", |cg| {
                    cg.block("match ipld::repr::expect_int(node)?", |cg| {
                        for (value, v) in values.iter().zip(&variants) {
                            cg.line(format!("{value} => Ok(Self::{v}),"));
                        }
                        cg.line(unknown);
                    });
                });
            });
        }
    }
    Ok(())
}

fn int_value(value: &str) -> Result<i64, Error> {
    value
        .parse()
        .map_err(|_| Error::invalid_argument(format!("enum value {value:?} is not an int")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dsl, lower};

    fn generate(src: &str) -> GeneratedArtifact {
        let ts = lower::lower_to_ir(&dsl::parse("test", src).unwrap()).unwrap();
        let input = GeneratorInput { ts: &ts, source: src, source_name: "test", package: "ipldsch" };
        FullGenerator.generate(&input).unwrap()
    }

    #[test]
    fn one_file_per_type_plus_mod() {
        let out = generate("type Name string\ntype Person struct { name Name\n age optional Int }");
        let paths: Vec<_> = out.files.iter().map(|f| f.path.to_string_lossy().to_string()).collect();
        assert_eq!(paths, ["name.rs", "person.rs", "mod.rs"]);
        let root = out.get("mod.rs").unwrap();
        assert!(root.contains("mod person;\npub use person::Person;"));
    }

    #[test]
    fn struct_fields_map_modifiers() {
        let out = generate("type P struct { a Int\n b optional String\n c nullable Float\n d optional nullable Bool }");
        let p = out.get("p.rs").unwrap();
        assert!(p.contains("pub a: i64,"));
        assert!(p.contains("pub b: Option<String>,"));
        assert!(p.contains("pub c: Option<f64>,"));
        assert!(p.contains("pub d: Option<Option<bool>>,"));
        assert!(p.contains("if let Some(value) = &self.b {"));
        assert!(p.contains("ipld::repr::reject_unknown(&entries, &[\"a\", \"b\", \"c\", \"d\"])?;"));
    }

    #[test]
    fn recursive_refs_are_boxed() {
        let out = generate("type Tree struct { value Int\n left nullable Tree\n kids [Tree] }");
        let tree = out.get("tree.rs").unwrap();
        assert!(tree.contains("pub left: Option<Box<Tree>>,"), "{tree}");
        assert!(tree.contains("pub kids: Vec<Tree>,"));
    }

    #[test]
    fn stringprefix_union_has_string_repr() {
        let out = generate(
            "type ReadWrite string\ntype ReadOnly string\ntype Status union { \"rw:\" ReadWrite | \"ro:\" ReadOnly } representation stringprefix",
        );
        let status = out.get("status.rs").unwrap();
        assert!(status.contains("pub enum Status {\n    ReadWrite(ReadWrite),\n    ReadOnly(ReadOnly),\n}"));
        assert!(status.contains("if let Some(rest) = s.strip_prefix(\"rw:\") {"));
        assert!(status.contains("impl StringRepr for Status {"));
    }

    #[test]
    fn non_int_enum_values_fail_generation() {
        let mut ts = TypeSystem::with_prelude();
        ts.insert(
            "E".into(),
            Type::Enum { members: vec![EnumMember { name: "A".into(), value: "one".into() }], repr: EnumRepr::Int },
        );
        let input = GeneratorInput { ts: &ts, source: "", source_name: "test", package: "ipldsch" };
        let err = FullGenerator.generate(&input).unwrap_err();
        assert_eq!(err.code(), "invalid-argument");
        assert!(err.to_string().contains("\"one\""), "{err}");
    }

    #[test]
    fn keywords_and_enums() {
        let out = generate("type Kind enum { | Big (\"1\") | small (\"2\") } representation int\ntype T struct { type Kind }");
        let t = out.get("t.rs").unwrap();
        assert!(t.contains("pub r#type: Kind,"));
        let kind = out.get("kind.rs").unwrap();
        assert!(kind.contains("Self::Small => 2,"));
        assert!(kind.contains("match ipld::repr::expect_int(node)? {"));
    }
}
