//! Parse failure for the schema DSL.

/// The first lexical or syntactic error in a document. Parsing stops here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{source_name}:{line}:{col}: {message} (at `{snippet}`)")]
pub struct ParseError {
    pub source_name: String,
    pub message: String,
    pub line: usize,
    pub col: usize,
    pub snippet: String,
}

impl ParseError {
    pub fn new(
        source_name: impl Into<String>,
        message: impl Into<String>,
        line: usize,
        col: usize,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            message: message.into(),
            line,
            col,
            snippet: snippet.into(),
        }
    }
}

