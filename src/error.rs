//! Tagged errors shared by the pipeline and the CLI.
//!
//! Every error carries a stable code (`schema-dsl-parse-failed`, ...), displays
//! as `code: message: cause`, keeps its cause reachable through
//! [`std::error::Error::source`] and maps to a process exit status.
use crate::codec::EncodeError;
use crate::dsl::ParseError;
use crate::lower::CompileError;
use crate::node::DecodeError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("schema-dsl-parse-failed: {0}")]
    DslParse(#[from] ParseError),
    #[error("schema-compile-failed: {0}")]
    Compile(#[from] CompileError),
    #[error("codec-unrecognized: {argument} argument not recognized: {token:?} is not a supported codec name")]
    CodecUnrecognized { argument: String, token: String },
    #[error("generator-unsupported: {0:?} is not a supported generator (expected `full` or `minimal`)")]
    GeneratorUnsupported(String),
    #[error("invalid-argument: {message}")]
    InvalidArgument { message: String },
    #[error("io-error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("encode-failed: {0}")]
    Encode(#[from] EncodeError),
    #[error("decode-failed: {0}")]
    Decode(#[from] DecodeError),
}

impl Error {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io { context: context.into(), source }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument { message: message.into() }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::DslParse(_) => "schema-dsl-parse-failed",
            Error::Compile(_) => "schema-compile-failed",
            Error::CodecUnrecognized { .. } => "codec-unrecognized",
            Error::GeneratorUnsupported(_) => "generator-unsupported",
            Error::InvalidArgument { .. } => "invalid-argument",
            Error::Io { .. } => "io-error",
            Error::Encode(_) => "encode-failed",
            Error::Decode(_) => "decode-failed",
        }
    }

    /// Usage problems exit with 2, schema problems with 3 and 4, environment
    /// problems with 5 and 6.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::CodecUnrecognized { .. } | Error::GeneratorUnsupported(_) | Error::InvalidArgument { .. } => 2,
            Error::DslParse(_) => 3,
            Error::Compile(_) => 4,
            Error::Io { .. } => 5,
            Error::Encode(_) | Error::Decode(_) => 6,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
