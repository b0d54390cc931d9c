use phf::phf_set;
use std::fmt;

/// A classified slice of the source. The lexeme borrows from the source buffer, so a token
/// can never outlive the text it was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Token<'a> {
    pub typ: Type,
    /// Byte offset of the first byte the tokenizer consumed for this token.
    pub offset: usize,
    lexeme: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(typ: Type, offset: usize, lexeme: &'a str) -> Self {
        Self {
            typ,
            offset,
            lexeme,
        }
    }

    pub fn lexeme(&self) -> &'a str {
        self.lexeme
    }

    pub fn is_atom(&self) -> bool {
        matches!(self.typ, Type::Identifier | Type::String)
    }

    pub fn is_whitespace(c: char) -> bool {
        WHITESPACE.contains(&c)
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:?}: {} @ {}>", self.typ, self.lexeme.escape_debug(), self.offset)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Type {
    /// Placeholder for a token that has not been produced yet.
    None,
    Eof,
    LeftParenthese,
    RightParenthese,
    String,
    Identifier,
}

impl Default for Type {
    fn default() -> Self {
        Type::None
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::None => "nothing",
            Type::Eof => "end of input",
            Type::LeftParenthese => "`(`",
            Type::RightParenthese => "`)`",
            Type::String => "string",
            Type::Identifier => "identifier",
        };
        f.write_str(name)
    }
}

// '\r' is included so files with CRLF line endings tokenize the same as LF ones.
static WHITESPACE: phf::Set<char> = phf_set! {
    ' ',
    '\n',
    '\t',
    '\u{b}',
    '\u{c}',
    '\r',
};
