//! Recursive-descent parser for the schema DSL.
//!
//! Produces the DMT exactly as written; no name resolution or validation
//! happens here. Keywords are contextual, so a field may be called `type`.

use super::error::ParseError;
use super::token::{Token, TokenKind};
use crate::dmt::{
    CopyDefn, EnumDefn, EnumMember, FieldDefn, InlineDefn, LinkDefn, ListDefn, MapDefn, Representation,
    Schema, StructDefn, TypeDefn, TypeRef, UnionDefn, UnionMember,
};

pub struct Parser<'a> {
    source_name: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

/// Names given to positional representation parameters, per strategy.
fn positional_param(strategy: &str, index: usize) -> String {
    let names: &[&str] = match strategy {
        "stringjoin" => &["join"],
        "inline" => &["discriminantKey"],
        "envelope" => &["discriminantKey", "contentKey"],
        "stringpairs" => &["innerDelim", "entryDelim"],
        _ => &[],
    };
    names.get(index).map(|s| s.to_string()).unwrap_or_else(|| format!("${index}"))
}

impl<'a> Parser<'a> {
    pub fn new(source_name: &'a str, tokens: Vec<Token>) -> Self {
        Self { source_name, tokens, pos: 0 }
    }

    pub fn parse(&mut self) -> Result<Schema, ParseError> {
        let mut schema = Schema::default();

        while !self.is_at_end() {
            let t = self.peek();
            if !t.is_ident("type") {
                return Err(self.error_at(t, format!("expected `type` declaration, found {}", t.kind.describe())));
            }
            self.advance();
            let name = self.expect_ident("a type name")?;
            let defn = self.parse_typedef()?;
            schema.types.push((name, defn));
        }

        Ok(schema)
    }

    fn parse_typedef(&mut self) -> Result<TypeDefn, ParseError> {
        let t = self.peek().clone();
        match &t.kind {
            TokenKind::Ident(word) => match word.as_str() {
                "bool" => self.keyword(TypeDefn::Bool {}),
                "string" => self.keyword(TypeDefn::String {}),
                "bytes" => self.keyword(TypeDefn::Bytes {}),
                "int" => self.keyword(TypeDefn::Int {}),
                "float" => self.keyword(TypeDefn::Float {}),
                "link" => self.keyword(TypeDefn::Link(LinkDefn::default())),
                "struct" => self.parse_struct(),
                "union" => self.parse_union(),
                "enum" => self.parse_enum(),
                _ => {
                    self.advance();
                    Ok(TypeDefn::Copy(CopyDefn { from_type: word.clone() }))
                }
            },
            TokenKind::Eq => {
                self.advance();
                let from_type = self.expect_ident("the name of the type to copy")?;
                Ok(TypeDefn::Copy(CopyDefn { from_type }))
            }
            TokenKind::Amp => Ok(TypeDefn::Link(self.parse_link()?)),
            TokenKind::LBracket => Ok(TypeDefn::List(self.parse_list()?)),
            TokenKind::LBrace => {
                let mut map = self.parse_map()?;
                map.representation = self.parse_representation()?;
                Ok(TypeDefn::Map(map))
            }
            _ => Err(self.error_at(&t, format!("expected a type definition, found {}", t.kind.describe()))),
        }
    }

    fn keyword(&mut self, defn: TypeDefn) -> Result<TypeDefn, ParseError> {
        self.advance();
        Ok(defn)
    }

    // ---- type references ------------------------------------------------ //

    fn starts_type_ref(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Ident(_) | TokenKind::LBracket | TokenKind::LBrace | TokenKind::Amp
        )
    }

    fn parse_type_ref(&mut self) -> Result<TypeRef, ParseError> {
        let t = self.peek().clone();
        match &t.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(TypeRef::Named(name.clone()))
            }
            TokenKind::LBracket => Ok(TypeRef::Inline(Box::new(InlineDefn::List(self.parse_list()?)))),
            TokenKind::LBrace => Ok(TypeRef::Inline(Box::new(InlineDefn::Map(self.parse_map()?)))),
            TokenKind::Amp => Ok(TypeRef::Inline(Box::new(InlineDefn::Link(self.parse_link()?)))),
            _ => Err(self.error_at(&t, format!("expected a type, found {}", t.kind.describe()))),
        }
    }

    fn parse_link(&mut self) -> Result<LinkDefn, ParseError> {
        self.expect(TokenKind::Amp)?;
        let expected = self.expect_ident("the linked type name")?;
        Ok(LinkDefn { expected_type: Some(expected) })
    }

    fn parse_list(&mut self) -> Result<ListDefn, ParseError> {
        self.expect(TokenKind::LBracket)?;
        let value_nullable = self.eat_ident("nullable");
        let value_type = self.parse_type_ref()?;
        self.expect(TokenKind::RBracket)?;
        Ok(ListDefn { value_type, value_nullable })
    }

    fn parse_map(&mut self) -> Result<MapDefn, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let key_type = self.expect_ident("a map key type")?;
        self.expect(TokenKind::Colon)?;
        let value_nullable = self.eat_ident("nullable");
        let value_type = self.parse_type_ref()?;
        self.expect(TokenKind::RBrace)?;
        Ok(MapDefn { key_type, value_type, value_nullable, representation: None })
    }

    // ---- composite bodies ----------------------------------------------- //

    fn parse_struct(&mut self) -> Result<TypeDefn, ParseError> {
        self.advance(); // struct
        self.expect(TokenKind::LBrace)?;

        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.is_at_end() {
                let t = self.peek();
                return Err(self.error_at(t, "unterminated struct body, expected `}`"));
            }
            fields.push(self.parse_field()?);
            self.eat_separator();
        }
        self.expect(TokenKind::RBrace)?;

        let representation = self.parse_representation()?;
        Ok(TypeDefn::Struct(StructDefn { fields, representation }))
    }

    fn parse_field(&mut self) -> Result<(String, FieldDefn), ParseError> {
        let name_tok = self.peek().clone();
        let name = self.expect_ident("a field name")?;
        let colon = self.eat(&TokenKind::Colon);

        let mut optional = false;
        let mut nullable = false;
        loop {
            if self.peek().is_ident("optional") {
                optional = true;
            } else if self.peek().is_ident("nullable") {
                nullable = true;
            } else {
                break;
            }
            self.advance();
        }

        // Without a colon the type has to sit on the field's own line, which
        // keeps `{ bar \n baz String }` from reading `baz` as bar's type.
        let same_line = colon || optional || nullable || self.peek().line == name_tok.line;
        if !self.starts_type_ref() || !same_line {
            return Err(self.error_at(&name_tok, format!("field `{name}` has no type annotation")));
        }

        let ty = self.parse_type_ref()?;
        Ok((name, FieldDefn { ty, optional, nullable }))
    }

    fn parse_union(&mut self) -> Result<TypeDefn, ParseError> {
        self.advance(); // union
        self.expect(TokenKind::LBrace)?;

        let mut members = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.is_at_end() {
                let t = self.peek();
                return Err(self.error_at(t, "unterminated union body, expected `}`"));
            }
            self.eat(&TokenKind::Pipe);
            members.push(self.parse_union_member()?);
            self.eat_separator();
        }
        self.expect(TokenKind::RBrace)?;

        let representation = self.parse_representation()?;
        Ok(TypeDefn::Union(UnionDefn { members, representation }))
    }

    /// `"disc" [>] Type` or `Type "disc"` / `Type kind`.
    fn parse_union_member(&mut self) -> Result<UnionMember, ParseError> {
        let t = self.peek().clone();
        match &t.kind {
            TokenKind::Str(discriminant) => {
                self.advance();
                self.eat(&TokenKind::Gt);
                let ty = self.expect_ident("a union member type name")?;
                Ok(UnionMember { discriminant: discriminant.clone(), ty })
            }
            TokenKind::Ident(ty) => {
                self.advance();
                let d = self.peek().clone();
                let discriminant = match &d.kind {
                    TokenKind::Str(s) | TokenKind::Ident(s) => s.clone(),
                    _ => {
                        return Err(self.error_at(
                            &d,
                            format!("union member `{ty}` needs a discriminant, found {}", d.kind.describe()),
                        ));
                    }
                };
                self.advance();
                Ok(UnionMember { discriminant, ty: ty.clone() })
            }
            _ => Err(self.error_at(&t, format!("expected a union member, found {}", t.kind.describe()))),
        }
    }

    fn parse_enum(&mut self) -> Result<TypeDefn, ParseError> {
        self.advance(); // enum
        self.expect(TokenKind::LBrace)?;

        let mut members = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.is_at_end() {
                let t = self.peek();
                return Err(self.error_at(t, "unterminated enum body, expected `}`"));
            }
            self.eat(&TokenKind::Pipe);
            let name = self.expect_ident("an enum member name")?;
            let value = if self.eat(&TokenKind::LParen) {
                let v = self.expect_string("an enum member value")?;
                self.expect(TokenKind::RParen)?;
                Some(v)
            } else {
                None
            };
            members.push(EnumMember { name, value });
            self.eat_separator();
        }
        self.expect(TokenKind::RBrace)?;

        let representation = self.parse_representation()?;
        Ok(TypeDefn::Enum(EnumDefn { members, representation }))
    }

    fn parse_representation(&mut self) -> Result<Option<Representation>, ParseError> {
        if !self.peek().is_ident("representation") {
            return Ok(None);
        }
        self.advance();
        let strategy = self.expect_ident("a representation strategy")?;
        let mut repr = Representation::new(strategy);

        if self.eat(&TokenKind::LParen) {
            let mut index = 0;
            while !self.check(&TokenKind::RParen) {
                let t = self.peek().clone();
                let (key, value) = match &t.kind {
                    TokenKind::Str(value) => {
                        self.advance();
                        let key = positional_param(&repr.strategy, index);
                        index += 1;
                        (key, value.clone())
                    }
                    TokenKind::Ident(key) => {
                        self.advance();
                        self.eat(&TokenKind::Eq);
                        let value = self.expect_string(&format!("a value for parameter `{key}`"))?;
                        (key.clone(), value)
                    }
                    _ => {
                        return Err(self.error_at(
                            &t,
                            format!("expected a representation parameter, found {}", t.kind.describe()),
                        ));
                    }
                };
                if repr.params.contains_key(&key) {
                    return Err(self.error_at(&t, format!("parameter `{key}` given twice")));
                }
                repr.params.insert(key, value);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen)?;
        }

        Ok(Some(repr))
    }

    // ---- token helpers -------------------------------------------------- //

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        &self.tokens[idx]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_ident(&mut self, word: &str) -> bool {
        if self.peek().is_ident(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_separator(&mut self) {
        while self.eat(&TokenKind::Comma) || self.eat(&TokenKind::Semi) {}
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.check(&kind) {
            self.advance();
            Ok(())
        } else {
            let t = self.peek();
            Err(self.error_at(t, format!("expected {}, found {}", kind.describe(), t.kind.describe())))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        let t = self.peek();
        match &t.kind {
            TokenKind::Ident(s) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            other => Err(self.error_at(t, format!("expected {what}, found {}", other.describe()))),
        }
    }

    fn expect_string(&mut self, what: &str) -> Result<String, ParseError> {
        let t = self.peek();
        match &t.kind {
            TokenKind::Str(s) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            other => Err(self.error_at(t, format!("expected {what}, found {}", other.describe()))),
        }
    }

    fn error_at(&self, t: &Token, message: impl Into<String>) -> ParseError {
        ParseError::new(self.source_name, message, t.line, t.col, t.snippet())
    }
}
