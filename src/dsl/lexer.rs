//! Lexer for the schema DSL.
//!
//! Converts source text into a stream of [`Token`]s. Whitespace and newlines
//! are insignificant apart from position tracking; `#` starts a comment that
//! runs to the end of the line.

use super::error::ParseError;
use super::token::{Token, TokenKind};

pub struct Lexer<'a> {
    source_name: &'a str,
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source_name: &'a str, source: &str) -> Self {
        Self {
            source_name,
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia();

            if self.is_at_end() {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    line: self.line,
                    col: self.col,
                    text: String::new(),
                });
                break;
            }

            let ch = self.peek();
            let token = match ch {
                '{' => self.single_char(TokenKind::LBrace),
                '}' => self.single_char(TokenKind::RBrace),
                '[' => self.single_char(TokenKind::LBracket),
                ']' => self.single_char(TokenKind::RBracket),
                '(' => self.single_char(TokenKind::LParen),
                ')' => self.single_char(TokenKind::RParen),
                ':' => self.single_char(TokenKind::Colon),
                ',' => self.single_char(TokenKind::Comma),
                ';' => self.single_char(TokenKind::Semi),
                '|' => self.single_char(TokenKind::Pipe),
                '&' => self.single_char(TokenKind::Amp),
                '=' => self.single_char(TokenKind::Eq),
                '>' => self.single_char(TokenKind::Gt),
                '"' => self.lex_string()?,
                c if c.is_ascii_alphabetic() || c == '_' => self.lex_ident(),
                _ => {
                    return Err(ParseError::new(
                        self.source_name,
                        format!("unexpected character '{ch}'"),
                        self.line,
                        self.col,
                        ch.to_string(),
                    ));
                }
            };

            tokens.push(token);
        }

        Ok(tokens)
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        ch
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_trivia(&mut self) {
        while !self.is_at_end() {
            match self.peek() {
                c if c.is_whitespace() => {
                    self.advance();
                }
                '#' => {
                    while !self.is_at_end() && self.peek() != '\n' {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn single_char(&mut self, kind: TokenKind) -> Token {
        let (line, col) = (self.line, self.col);
        let ch = self.advance();
        Token { kind, line, col, text: ch.to_string() }
    }

    fn lex_ident(&mut self) -> Token {
        let (line, col) = (self.line, self.col);
        let start = self.pos;
        while !self.is_at_end() && (self.peek().is_ascii_alphanumeric() || self.peek() == '_') {
            self.advance();
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        Token { kind: TokenKind::Ident(text.clone()), line, col, text }
    }

    fn lex_string(&mut self) -> Result<Token, ParseError> {
        let (line, col) = (self.line, self.col);
        let start = self.pos;
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            if self.is_at_end() {
                let text: String = self.chars[start..self.pos].iter().collect();
                return Err(ParseError::new(self.source_name, "unterminated string literal", line, col, text));
            }
            match self.advance() {
                '"' => break,
                '\n' => {
                    return Err(ParseError::new(
                        self.source_name,
                        "newline in string literal",
                        line,
                        col,
                        self.chars[start..self.pos - 1].iter().collect::<String>(),
                    ));
                }
                '\\' => {
                    let (esc_line, esc_col) = (self.line, self.col);
                    if self.is_at_end() {
                        continue;
                    }
                    match self.advance() {
                        '"' => value.push('"'),
                        '\\' => value.push('\\'),
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        other => {
                            return Err(ParseError::new(
                                self.source_name,
                                format!("unknown escape sequence '\\{other}'"),
                                esc_line,
                                esc_col - 1,
                                format!("\\{other}"),
                            ));
                        }
                    }
                }
                c => value.push(c),
            }
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        Ok(Token { kind: TokenKind::Str(value), line, col, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new("test", src).tokenize().unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lex_type_header() {
        assert_eq!(
            kinds("type Foo struct {"),
            vec![
                TokenKind::Ident("type".into()),
                TokenKind::Ident("Foo".into()),
                TokenKind::Ident("struct".into()),
                TokenKind::LBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_comments_and_positions() {
        let tokens = Lexer::new("test", "# heading\n  type # trailing\nBar").tokenize().unwrap();
        assert_eq!((tokens[0].line, tokens[0].col), (2, 3));
        assert_eq!((tokens[1].line, tokens[1].col), (3, 1));
        assert_eq!(tokens[1].text, "Bar");
    }

    #[test]
    fn lex_string_escapes() {
        assert_eq!(kinds(r#""a\"b""#)[0], TokenKind::Str("a\"b".into()));
        assert_eq!(kinds(r#""rw:""#)[0], TokenKind::Str("rw:".into()));
    }

    #[test]
    fn lex_punctuation() {
        assert_eq!(
            kinds("|&=>(),;:[]"),
            vec![
                TokenKind::Pipe,
                TokenKind::Amp,
                TokenKind::Eq,
                TokenKind::Gt,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Comma,
                TokenKind::Semi,
                TokenKind::Colon,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_fails() {
        let err = Lexer::new("test", "type A \"oops").tokenize().unwrap_err();
        assert_eq!((err.line, err.col), (1, 8));
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn unexpected_character_fails() {
        let err = Lexer::new("test", "type A $").tokenize().unwrap_err();
        assert_eq!(err.snippet, "$");
        assert_eq!((err.line, err.col), (1, 8));
    }
}
