#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Str(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Colon,
    Comma,
    Semi,
    Pipe,
    Amp,
    Eq,
    Gt,
    Eof,
}

/// A token plus where it starts and the exact text it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
    pub text: String,
}

impl Token {
    pub fn is_ident(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(s) if s == word)
    }

    /// Text shown in diagnostics.
    pub fn snippet(&self) -> &str {
        if self.kind == TokenKind::Eof { "<end of input>" } else { &self.text }
    }
}

impl TokenKind {
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(s) => format!("identifier `{s}`"),
            TokenKind::Str(s) => format!("string {s:?}"),
            TokenKind::LBrace => "`{`".into(),
            TokenKind::RBrace => "`}`".into(),
            TokenKind::LBracket => "`[`".into(),
            TokenKind::RBracket => "`]`".into(),
            TokenKind::LParen => "`(`".into(),
            TokenKind::RParen => "`)`".into(),
            TokenKind::Colon => "`:`".into(),
            TokenKind::Comma => "`,`".into(),
            TokenKind::Semi => "`;`".into(),
            TokenKind::Pipe => "`|`".into(),
            TokenKind::Amp => "`&`".into(),
            TokenKind::Eq => "`=`".into(),
            TokenKind::Gt => "`>`".into(),
            TokenKind::Eof => "end of input".into(),
        }
    }
}
