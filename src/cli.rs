//! CLI: `ipld schema (parse | compile | codegen)`
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::codec::{EncoderRegistry, EncoderSelector};
use crate::error::Error;
use crate::pipeline::{self, CodegenRequest, CompileRequest, ParseRequest, SourceFormat};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// parse, validate and generate bindings for IPLD-style schemas
#[derive(Parser, Debug)]
#[command(name = "ipld", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// schema tooling
    #[command(subcommand)]
    Schema(SchemaCommand),
}

#[derive(Subcommand, Debug)]
enum SchemaCommand {
    /// parse a schema DSL document and print its DMT in the selected codec
    Parse(ParseOut),
    /// compile a schema and list the declared type names
    Compile(CompileOut),
    /// generate Rust bindings for a schema
    Codegen(CodegenOut),
}

#[derive(Args, Debug, Clone)]
struct SourceSettings {
    /// schema file, or '-' for stdin
    source: String,
}

#[derive(Args, Debug)]
struct ParseOut {
    #[command(flatten)]
    source: SourceSettings,

    /// skip semantic validation and encode the DMT as written
    #[arg(long, default_value_t = false)]
    no_compile: bool,

    /// output codec: `codec:<name>`, `codec:0x<code>` or `debug`
    #[arg(long, default_value = crate::codec::DEFAULT_TOKEN)]
    output: String,
}

#[derive(Args, Debug)]
struct CompileOut {
    #[command(flatten)]
    source: SourceSettings,

    /// input format
    #[arg(long, value_enum, default_value_t = FromFormat::Dsl)]
    from: FromFormat,
}

#[derive(Args, Debug)]
struct CodegenOut {
    #[command(flatten)]
    source: SourceSettings,

    /// `full` (self-contained types) or `minimal` (serde placeholders bound at start-up)
    #[arg(long)]
    generator: String,

    /// output directory
    #[arg(long, default_value = "ipldsch")]
    output: PathBuf,

    /// package (module) name recorded in the generated files
    #[arg(long, default_value = "ipldsch")]
    package: String,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FromFormat {
    Dsl,
    DmtJson,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl SourceSettings {
    /// `(display name, contents)`
    fn load(&self) -> Result<(String, String), Error> {
        if self.source == "-" {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).map_err(|e| Error::io("reading stdin", e))?;
            return Ok(("<stdin>".to_string(), text));
        }
        let text = std::fs::read_to_string(&self.source).map_err(|e| Error::io(format!("reading {}", self.source), e))?;
        Ok((self.source.clone(), text))
    }
}

impl From<FromFormat> for SourceFormat {
    fn from(value: FromFormat) -> Self {
        match value {
            FromFormat::Dsl => SourceFormat::Dsl,
            FromFormat::DmtJson => SourceFormat::DmtJson,
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let Command::Schema(cmd) = &self.cmd;
        match cmd {
            SchemaCommand::Parse(target) => {
                let (source_name, source) = target.source.load()?;
                let request =
                    ParseRequest { source_name, source, no_compile: target.no_compile, output: target.output.clone() };
                let selector = EncoderSelector::new(EncoderRegistry::standard());
                let bytes = pipeline::run_parse(&request, &selector)
                    .with_context(|| format!("parsing {}", request.source_name))?;
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&bytes).map_err(|e| Error::io("writing stdout", e))?;
                if !bytes.ends_with(b"\n") && std::str::from_utf8(&bytes).is_ok() {
                    stdout.write_all(b"\n").map_err(|e| Error::io("writing stdout", e))?;
                }
            }
            SchemaCommand::Compile(target) => {
                let (source_name, source) = target.source.load()?;
                let request = CompileRequest { source_name, source, from: target.from.into() };
                let names = pipeline::run_compile(&request)
                    .with_context(|| format!("compiling {}", request.source_name))?;
                for name in names {
                    println!("{name}");
                }
            }
            SchemaCommand::Codegen(target) => {
                let (source_name, source) = target.source.load()?;
                let request = CodegenRequest {
                    source_name,
                    source,
                    generator: target.generator.clone(),
                    output_dir: target.output.clone(),
                    package: target.package.clone(),
                };
                let artifact = pipeline::run_codegen(&request)
                    .with_context(|| format!("generating bindings for {}", request.source_name))?;
                eprintln!("wrote {} file(s) to {}", artifact.files.len(), request.output_dir.display());
            }
        }
        Ok(())
    }
}
