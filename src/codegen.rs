//! Rust binding generation from a compiled TypeSystem.
//!
//! Two strategies share one [`Generator`] trait:
//!
//! - **full**: one file per schema type with encode/decode logic baked in
//!   (`Representable`/`StringRepr` impls); no runtime schema needed.
//! - **minimal**: serde-derived placeholder types plus a start-up table that
//!   re-loads the embedded schema text and binds each placeholder to its
//!   compiled type (see [`crate::bind`]).
pub mod full;
pub mod minimal;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;
use crate::ir::{Type, TypeRef, TypeSystem};

pub const HEADER: &str = "// Code generated by ipld-schema-tool. DO NOT EDIT.";

/// Everything a generator may look at.
pub struct GeneratorInput<'a> {
    pub ts: &'a TypeSystem,
    pub source: &'a str,
    pub source_name: &'a str,
    pub package: &'a str,
}

pub trait Generator {
    fn name(&self) -> &'static str;
    fn generate(&self, input: &GeneratorInput<'_>) -> Result<GeneratedArtifact, Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Full,
    Minimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedArtifact {
    pub files: Vec<GeneratedFile>,
}

/// Indented line buffer.
#[derive(Default)]
pub struct Codegen {
    out: String,
    indent: usize,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl FromStr for GeneratorKind {
    type Err = Error;

    /// `go-gengo` and `go-bindnode` are accepted as aliases of the two modes.
    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "full" | "gengo" | "go-gengo" => Ok(GeneratorKind::Full),
            "minimal" | "bindnode" | "go-bindnode" => Ok(GeneratorKind::Minimal),
            other => Err(Error::GeneratorUnsupported(other.to_string())),
        }
    }
}

impl GeneratorKind {
    pub fn generator(self) -> Box<dyn Generator> {
        match self {
            GeneratorKind::Full => Box::new(full::FullGenerator),
            GeneratorKind::Minimal => Box::new(minimal::MinimalGenerator),
        }
    }
}

impl GeneratedArtifact {
    pub fn push(&mut self, path: impl Into<PathBuf>, contents: String) {
        self.files.push(GeneratedFile { path: path.into(), contents });
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.iter().find(|f| f.path == Path::new(path)).map(|f| f.contents.as_str())
    }

    /// Write every file under `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<(), Error> {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(format!("creating {}", dir.display()), e))?;
        for file in &self.files {
            let path = dir.join(&file.path);
            std::fs::write(&path, &file.contents).map_err(|e| Error::io(format!("writing {}", path.display()), e))?;
            tracing::info!(path = %path.display(), "wrote generated file");
        }
        Ok(())
    }
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.out.push_str("    ");
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// `head {` ... `}` with the body indented one level.
    pub fn block(&mut self, head: impl AsRef<str>, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.block_with(head, "}", body)
    }

    pub fn block_with(&mut self, head: impl AsRef<str>, close: &str, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.line(format!("{} {{", head.as_ref()));
        self.indent += 1;
        body(self);
        self.indent -= 1;
        self.line(close)
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

// ————————————————————————————————————————————————————————————————————————————
// NAMING
// ————————————————————————————————————————————————————————————————————————————

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
];

/// Std names generated code relies on; schema types with these names get a
/// `Type` suffix.
const RESERVED_TYPES: &[&str] = &[
    "Option", "Box", "Vec", "Result", "Ok", "Err", "Some", "None", "IndexMap", "Bytes", "Link", "Representable",
    "StringRepr", "Serialize", "Deserialize", "ipld",
];

pub fn snake_case(name: &str) -> String {
    let mut out = String::new();
    let chars: Vec<char> = name.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_ascii_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_ascii_uppercase();
            if prev_lower || (prev_upper && next_lower) {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

pub fn pascal_case(name: &str) -> String {
    let mut out = String::new();
    let mut upper = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(if upper { c.to_ascii_uppercase() } else { c });
            upper = false;
        } else {
            upper = true;
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, 'V');
    }
    out
}

/// Escape keywords with `r#`; the few that cannot be raw get a trailing `_`.
pub fn rust_ident(name: &str) -> String {
    match name {
        "self" | "Self" | "super" | "crate" | "_" => format!("{name}_"),
        n if KEYWORDS.contains(&n) => format!("r#{n}"),
        n => n.to_string(),
    }
}

pub fn field_ident(name: &str) -> String {
    rust_ident(&snake_case(name))
}

pub fn type_ident(name: &str) -> String {
    if RESERVED_TYPES.contains(&name) {
        format!("{name}Type")
    } else {
        rust_ident(name)
    }
}

/// Disambiguate identifiers that collapse to the same text.
pub fn unique_idents<'a>(names: impl IntoIterator<Item = &'a str>, ident: impl Fn(&str) -> String) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|n| {
            let base = ident(n);
            let mut candidate = base.clone();
            let mut i = 2;
            while !seen.insert(candidate.clone()) {
                candidate = format!("{base}{i}");
                i += 1;
            }
            candidate
        })
        .collect()
}

/// A string literal that survives any content, for embedding source text.
pub fn raw_string_literal(s: &str) -> String {
    let mut hashes = 1;
    while s.contains(&format!("\"{}", "#".repeat(hashes))) {
        hashes += 1;
    }
    let h = "#".repeat(hashes);
    format!("r{h}\"{s}\"{h}")
}

// ————————————————————————————————————————————————————————————————————————————
// TYPE MAPPING
// ————————————————————————————————————————————————————————————————————————————

/// Rust spelling of a reference. `boxed` wraps a named type in `Box`.
pub fn rust_type(r: &TypeRef, boxed: bool) -> String {
    match r {
        TypeRef::Named(n) => {
            let base = match n.as_str() {
                "Bool" => return "bool".to_string(),
                "Int" => return "i64".to_string(),
                "Float" => return "f64".to_string(),
                "String" => return "String".to_string(),
                "Bytes" => return "Bytes".to_string(),
                "Link" => return "Link".to_string(),
                other => type_ident(other),
            };
            if boxed { format!("Box<{base}>") } else { base }
        }
        TypeRef::List { value, value_nullable } => format!("Vec<{}>", nullable(rust_type(value, false), *value_nullable)),
        TypeRef::Map { key, value, value_nullable } => format!(
            "IndexMap<{}, {}>",
            rust_type(&TypeRef::named(key), false),
            nullable(rust_type(value, false), *value_nullable)
        ),
        TypeRef::Link { .. } => "Link".to_string(),
    }
}

fn nullable(ty: String, is_nullable: bool) -> String {
    if is_nullable { format!("Option<{ty}>") } else { ty }
}

/// Field type with the optional/nullable wrappers applied.
pub fn field_type(r: &TypeRef, optional: bool, is_nullable: bool, boxed: bool) -> String {
    let ty = nullable(rust_type(r, boxed), is_nullable);
    if optional { format!("Option<{ty}>") } else { ty }
}

/// Whether a by-value reference from `from` to `to` closes a cycle and so
/// has to be boxed. Lists, maps and links already add indirection.
pub fn needs_box(ts: &TypeSystem, from: &str, to: &str) -> bool {
    fn by_value(ty: &Type) -> Vec<&str> {
        match ty {
            Type::Struct { fields, .. } => fields.iter().filter_map(|f| f.ty.name()).collect(),
            Type::Union { members, .. } => members.iter().map(|m| m.ty.as_str()).collect(),
            _ => Vec::new(),
        }
    }
    let mut stack = vec![to];
    let mut seen = HashSet::new();
    while let Some(at) = stack.pop() {
        if at == from {
            return true;
        }
        if !seen.insert(at) {
            continue;
        }
        if let Some(ty) = ts.get(at) {
            stack.extend(by_value(ty));
        }
    }
    false
}
