//! IPLD-style schema tooling: DSL → DMT → TypeSystem → encoded output or
//! generated Rust bindings.
pub mod bind;
pub mod cli;
pub mod codec;
pub mod codegen;
pub mod dmt;
pub mod dsl;
pub mod error;
pub mod ir;
pub mod lower;
pub mod node;
pub mod path_de;
pub mod pipeline;

pub use error::{Error, Result};
