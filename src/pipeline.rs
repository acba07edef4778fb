//! Stage sequencing: DSL → [`Parsed`] → [`Compiled`] → encoded bytes or
//! generated files.
//!
//! The stages are typestates. Generation is only defined on [`Compiled`], so
//! generating from a DMT that never went through the compiler cannot be
//! written down; `no_compile` is the one path that encodes an unvalidated DMT.
use std::path::PathBuf;

use crate::codec::{Encoder, EncoderSelector};
use crate::codegen::{GeneratedArtifact, GeneratorInput, GeneratorKind};
use crate::dmt::Schema;
use crate::dsl;
use crate::error::{Error, Result};
use crate::ir::TypeSystem;
use crate::lower;

/// A DMT, not yet validated.
#[derive(Debug, Clone)]
pub struct Parsed {
    source_name: String,
    source: String,
    schema: Schema,
}

/// A DMT together with the TypeSystem it compiled to.
#[derive(Debug, Clone)]
pub struct Compiled {
    parsed: Parsed,
    ts: TypeSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    #[default]
    Dsl,
    DmtJson,
}

#[derive(Debug, Clone)]
pub struct ParseRequest {
    pub source_name: String,
    pub source: String,
    pub no_compile: bool,
    /// Encoder token, `codec:<name>` or `debug`. Empty selects `codec:json`.
    pub output: String,
}

#[derive(Debug, Clone)]
pub struct CompileRequest {
    pub source_name: String,
    pub source: String,
    pub from: SourceFormat,
}

#[derive(Debug, Clone)]
pub struct CodegenRequest {
    pub source_name: String,
    pub source: String,
    pub generator: String,
    pub output_dir: PathBuf,
    pub package: String,
}

// ————————————————————————————————————————————————————————————————————————————
// STAGES
// ————————————————————————————————————————————————————————————————————————————

impl Parsed {
    pub fn from_dsl(source_name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let (source_name, source) = (source_name.into(), source.into());
        let schema = dsl::parse(&source_name, &source)?;
        tracing::debug!(source = %source_name, types = schema.types.len(), "parsed schema DSL");
        Ok(Self { source_name, source, schema })
    }

    pub fn from_dmt_json(source_name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let (source_name, source) = (source_name.into(), source.into());
        let schema = Schema::from_json(&source)
            .map_err(|e| Error::invalid_argument(format!("{source_name} is not a schema DMT document: {e}")))?;
        tracing::debug!(source = %source_name, types = schema.types.len(), "read schema DMT");
        Ok(Self { source_name, source, schema })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Encode the DMT as written, without validating it.
    pub fn encode(&self, encoder: &dyn Encoder) -> Result<Vec<u8>> {
        let node = self.schema.to_node().map_err(crate::codec::EncodeError::from)?;
        let bytes = encoder.encode(&node)?;
        tracing::debug!(codec = encoder.name(), bytes = bytes.len(), "encoded schema DMT");
        Ok(bytes)
    }

    pub fn compile(self) -> Result<Compiled> {
        let ts = lower::lower_to_ir(&self.schema)?;
        tracing::debug!(source = %self.source_name, types = ts.len(), "compiled schema");
        Ok(Compiled { parsed: self, ts })
    }
}

impl Compiled {
    pub fn parsed(&self) -> &Parsed {
        &self.parsed
    }

    pub fn type_system(&self) -> &TypeSystem {
        &self.ts
    }

    pub fn encode(&self, encoder: &dyn Encoder) -> Result<Vec<u8>> {
        self.parsed.encode(encoder)
    }

    pub fn generate(&self, kind: GeneratorKind, package: &str) -> Result<GeneratedArtifact> {
        let generator = kind.generator();
        let input = GeneratorInput {
            ts: &self.ts,
            source: &self.parsed.source,
            source_name: &self.parsed.source_name,
            package,
        };
        let artifact = generator.generate(&input)?;
        tracing::info!(generator = generator.name(), files = artifact.files.len(), "generated bindings");
        Ok(artifact)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// REQUESTS
// ————————————————————————————————————————————————————————————————————————————

/// Parse, compile unless told not to, and encode the DMT. The encoder is
/// resolved first so a bad token fails before any parsing.
pub fn run_parse(request: &ParseRequest, selector: &EncoderSelector) -> Result<Vec<u8>> {
    let encoder = selector.select("output", &request.output)?;
    let parsed = Parsed::from_dsl(&request.source_name, &request.source)?;
    if request.no_compile {
        tracing::warn!(source = %request.source_name, "encoding without compiling; the schema is not validated");
        return parsed.encode(encoder);
    }
    parsed.compile()?.encode(encoder)
}

/// Compile and report the declared type names, in declaration order.
pub fn run_compile(request: &CompileRequest) -> Result<Vec<String>> {
    let parsed = match request.from {
        SourceFormat::Dsl => Parsed::from_dsl(&request.source_name, &request.source)?,
        SourceFormat::DmtJson => Parsed::from_dmt_json(&request.source_name, &request.source)?,
    };
    let compiled = parsed.compile()?;
    Ok(compiled.type_system().declared().map(|(name, _)| name.to_string()).collect())
}

/// Parse, compile, generate and write the artifact under `output_dir`.
pub fn run_codegen(request: &CodegenRequest) -> Result<GeneratedArtifact> {
    let kind: GeneratorKind = request.generator.parse()?;
    let compiled = Parsed::from_dsl(&request.source_name, &request.source)?.compile()?;
    let artifact = compiled.generate(kind, &request.package)?;
    artifact.write_to(&request.output_dir)?;
    Ok(artifact)
}
