//! Schema DSL front end: source text → lexer → parser → DMT.
//!
//! ```text
//! type Status union {
//!   | "rw:" ReadWrite
//!   | "ro:" ReadOnly
//! } representation stringprefix
//! ```
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::ParseError;

use crate::dmt::Schema;
use lexer::Lexer;
use parser::Parser;

/// Parse DSL source into a DMT. `source_name` only feeds diagnostics.
pub fn parse(source_name: &str, source: &str) -> Result<Schema, ParseError> {
    let tokens = Lexer::new(source_name, source).tokenize()?;
    tracing::trace!(source = source_name, tokens = tokens.len(), "lexed schema DSL");
    Parser::new(source_name, tokens).parse()
}
