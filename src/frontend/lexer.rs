//! Tokenizing S-expression source text.
//!
//! The tokenizer itself is the free function [`next_token`]: given the source and a cursor it
//! classifies the next lexeme and returns it together with the advanced cursor. The [`Lexer`]
//! wraps it with exactly one token of lookahead, which is all the parser needs.
//!
//! Example:
//! ```rust
//! use seed::frontend::lexer::Lexer;
//! let tokens_or_err = Lexer::new("(add 1 2)").and_then(|mut lx| lx.tokenize());
//! ```

use std::mem;

use super::{
    position::Position,
    token::{Token, Type},
};
use crate::error::SeedError::{self, DanglingEscape, UnexpectedCharacter, UnterminatedString};

/// Either the next token and the cursor just past it, or a lexical error.
pub type LexerResult<'a> = Result<(Token<'a>, usize), SeedError>;

/// Classify the lexeme starting at `cursor`. Whitespace is skipped; reaching the end of `source`
/// (or a NUL byte) yields `Eof` without moving the cursor.
pub fn next_token(source: &str, mut cursor: usize) -> LexerResult<'_> {
    let bytes = source.as_bytes();
    loop {
        let start = cursor;
        match bytes.get(start).copied() {
            None | Some(b'\0') => return Ok((Token::new(Type::Eof, start, ""), start)),
            Some(b'(') => return Ok((single(source, start, Type::LeftParenthese), start + 1)),
            Some(b')') => return Ok((single(source, start, Type::RightParenthese), start + 1)),
            Some(delim) if delim == b'"' || delim == b'\'' => return string(source, start, delim),
            Some(b) if Token::is_whitespace(b as char) => {
                while bytes.get(cursor).map_or(false, |b| Token::is_whitespace(*b as char)) {
                    cursor += 1;
                }
            }
            Some(b) if b.is_ascii_control() => {
                return Err(UnexpectedCharacter {
                    pos: Position::locate(source, start),
                    ch: b as char,
                })
            }
            Some(_) => return identifier(source, start),
        }
    }
}

fn single(source: &str, start: usize, typ: Type) -> Token<'_> {
    Token::new(typ, start, &source[start..start + 1])
}

/// The lexeme excludes both delimiters. There is no escaping inside a string: the first byte
/// equal to the opening delimiter closes it.
fn string(source: &str, start: usize, delim: u8) -> LexerResult<'_> {
    let body = start + 1;
    let end = source.as_bytes()[body..]
        .iter()
        .position(|b| *b == delim || *b == b'\0')
        .map(|len| body + len);
    match end {
        Some(end) if source.as_bytes()[end] == delim => {
            Ok((Token::new(Type::String, start, &source[body..end]), end + 1))
        }
        _ => Err(UnterminatedString {
            pos: Position::locate(source, start),
        }),
    }
}

/// An identifier runs until whitespace, a parenthesis or a control character. A leading `\` is
/// consumed but not part of the lexeme, and the byte after it is taken literally, so `\(` and
/// `\"` are identifiers rather than a parenthesis or a string. Control bytes cannot be escaped.
fn identifier(source: &str, start: usize) -> LexerResult<'_> {
    let bytes = source.as_bytes();
    let text_start = if bytes[start] == b'\\' { start + 1 } else { start };
    match bytes.get(text_start).copied() {
        None | Some(b'\0') => {
            return Err(DanglingEscape {
                pos: Position::locate(source, start),
            })
        }
        Some(b) if b.is_ascii_control() => {
            return Err(UnexpectedCharacter {
                pos: Position::locate(source, text_start),
                ch: b as char,
            })
        }
        Some(_) => (),
    }
    let mut cursor = text_start + 1;
    while let Some(&b) = bytes.get(cursor) {
        if b == b'(' || b == b')' || Token::is_whitespace(b as char) || b.is_ascii_control() {
            break;
        }
        cursor += 1;
    }
    Ok((
        Token::new(Type::Identifier, start, &source[text_start..cursor]),
        cursor,
    ))
}

/// Stateful wrapper around [`next_token`] holding a single token of lookahead.
pub struct Lexer<'a> {
    /// Complete source text. Positions are always recomputed from its start.
    source: &'a str,
    /// Offset just past the lookahead token.
    cursor: usize,
    lookahead: Token<'a>,
}

impl<'a> Lexer<'a> {
    /// Create a new `Lexer`. The first token is read eagerly, so this already fails if the
    /// source starts with a lexical error.
    pub fn new(source: &'a str) -> Result<Self, SeedError> {
        let mut lx = Self {
            source,
            cursor: 0,
            lookahead: Token::default(),
        };
        lx.advance()?;
        Ok(lx)
    }

    /// The next token, without consuming it.
    pub fn peek(&self) -> Token<'a> {
        self.lookahead
    }

    /// Consume the lookahead and read the token after it.
    pub fn advance(&mut self) -> Result<Token<'a>, SeedError> {
        let (next, cursor) = next_token(self.source, self.cursor)?;
        log::trace!("token {}", next);
        self.cursor = cursor;
        Ok(mem::replace(&mut self.lookahead, next))
    }

    /// Line and column of the cursor, i.e. just past the lookahead token.
    pub fn position(&self) -> Position {
        Position::locate(self.source, self.cursor)
    }

    pub fn position_of(&self, token: &Token<'_>) -> Position {
        Position::locate(self.source, token.offset)
    }

    /// Consume every remaining token. The returned vector always ends with `Eof`.
    pub fn tokenize(&mut self) -> Result<Vec<Token<'a>>, SeedError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.advance()?;
            tokens.push(token);
            if token.typ == Type::Eof {
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &'static str) -> Result<Vec<Token<'static>>, SeedError> {
        Lexer::new(src)?.tokenize()
    }

    fn types(src: &'static str) -> Vec<Type> {
        lex(src).unwrap().iter().map(|t| t.typ).collect()
    }

    fn lexemes(src: &'static str) -> Vec<&'static str> {
        lex(src).unwrap().iter().map(|t| t.lexeme()).collect()
    }

    #[test]
    fn test_next_token() {
        let src = "(ab)";
        assert_eq!(
            next_token(src, 0).unwrap(),
            (Token::new(Type::LeftParenthese, 0, "("), 1)
        );
        assert_eq!(
            next_token(src, 1).unwrap(),
            (Token::new(Type::Identifier, 1, "ab"), 3)
        );
        assert_eq!(
            next_token(src, 3).unwrap(),
            (Token::new(Type::RightParenthese, 3, ")"), 4)
        );
        assert_eq!(next_token(src, 4).unwrap(), (Token::new(Type::Eof, 4, ""), 4));
    }

    #[test]
    fn test_whitespace_is_skipped() {
        let (token, cursor) = next_token(" \t\n\u{b}\u{c}\r\n x", 0).unwrap();
        assert_eq!(token, Token::new(Type::Identifier, 8, "x"));
        assert_eq!(cursor, 9);
        assert_eq!(types("   "), vec![Type::Eof]);
    }

    #[test]
    fn test_nul_ends_input() {
        assert_eq!(
            types("(a)\0(b)"),
            vec![
                Type::LeftParenthese,
                Type::Identifier,
                Type::RightParenthese,
                Type::Eof,
            ]
        );
    }

    #[test]
    fn test_complex_expressions() {
        assert_eq!(
            types("(add (mul 2 3) \"x\")"),
            vec![
                Type::LeftParenthese,
                Type::Identifier,
                Type::LeftParenthese,
                Type::Identifier,
                Type::Identifier,
                Type::Identifier,
                Type::RightParenthese,
                Type::String,
                Type::RightParenthese,
                Type::Eof,
            ]
        );
        assert_eq!(
            lexemes("(add (mul 2 3) \"x\")"),
            vec!["(", "add", "(", "mul", "2", "3", ")", "x", ")", ""]
        );
    }

    #[test]
    fn test_string() {
        let tokens = lex("(\"a (b) c\" 'single \"quoted\"')").unwrap();
        assert_eq!(tokens[1], Token::new(Type::String, 1, "a (b) c"));
        assert_eq!(tokens[2], Token::new(Type::String, 11, "single \"quoted\""));
        assert_eq!(tokens[3].typ, Type::RightParenthese);
        // no escapes inside strings: the first matching delimiter closes it
        assert_eq!(lexemes("\"a\\\" b"), vec!["a\\", "b", ""]);
        assert_eq!(lexemes("\"\""), vec!["", ""]);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(lexemes("a-b+c 12 x\"y"), vec!["a-b+c", "12", "x\"y", ""]);
        assert_eq!(lexemes("(foo)"), vec!["(", "foo", ")", ""]);
    }

    #[test]
    fn test_escaped_identifiers() {
        let tokens = lex("\\abc \\( \\\"q \\)x").unwrap();
        assert_eq!(tokens[0], Token::new(Type::Identifier, 0, "abc"));
        assert_eq!(tokens[1], Token::new(Type::Identifier, 5, "("));
        assert_eq!(tokens[2], Token::new(Type::Identifier, 8, "\"q"));
        assert_eq!(tokens[3], Token::new(Type::Identifier, 12, ")x"));
        assert_eq!(tokens[4].typ, Type::Eof);
    }

    #[test]
    fn test_lookahead() {
        let mut lx = Lexer::new("(a b)").unwrap();
        assert_eq!(lx.peek().typ, Type::LeftParenthese);
        assert_eq!(lx.peek().typ, Type::LeftParenthese);
        assert_eq!(lx.position(), Position::new(1, 2));
        assert_eq!(lx.advance().unwrap().typ, Type::LeftParenthese);
        assert_eq!(lx.peek().lexeme(), "a");
        assert_eq!(lx.position(), Position::new(1, 3));
        let b = {
            lx.advance().unwrap();
            lx.peek()
        };
        assert_eq!(lx.position_of(&b), Position::new(1, 4));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lx = Lexer::new("x").unwrap();
        assert_eq!(lx.advance().unwrap().typ, Type::Identifier);
        assert_eq!(lx.advance().unwrap().typ, Type::Eof);
        assert_eq!(lx.advance().unwrap().typ, Type::Eof);
        assert_eq!(lx.position(), Position::new(1, 2));
    }

    #[test]
    fn test_errors() {
        match lex("(a\n  \u{1})").unwrap_err() {
            UnexpectedCharacter { pos, ch } => {
                assert_eq!(pos, Position::new(2, 3));
                assert_eq!(ch, '\u{1}');
            }
            err => panic!("unexpected error {:?}", err),
        }
        match lex("(a \"open").unwrap_err() {
            UnterminatedString { pos } => assert_eq!(pos, Position::new(1, 4)),
            err => panic!("unexpected error {:?}", err),
        }
        match lex("(a \\").unwrap_err() {
            DanglingEscape { pos } => assert_eq!(pos, Position::new(1, 4)),
            err => panic!("unexpected error {:?}", err),
        }
        assert!(Lexer::new("\u{7f}").is_err());
    }

    #[test]
    fn test_escaped_control_characters() {
        match lex("(a \\\u{1})").unwrap_err() {
            UnexpectedCharacter { pos, ch } => {
                assert_eq!(pos, Position::new(1, 5));
                assert_eq!(ch, '\u{1}');
            }
            err => panic!("unexpected error {:?}", err),
        }
        assert!(matches!(
            lex("\\\n").unwrap_err(),
            UnexpectedCharacter { ch: '\n', .. }
        ));
        assert_eq!(lexemes("\\ "), vec![" ", ""]);
    }
}
