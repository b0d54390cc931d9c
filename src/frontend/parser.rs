//! Recursive descent parser implementation.
//!
//! Grammar:
//! ```text
//! <file>  ::= <expr>*
//! <expr>  ::= "(" ")"
//!           | "(" <atom> ( <expr> | <atom> )* ")"
//! <atom>  ::= identifier | string
//! ```
//! The first syntax error aborts the parse; nothing is recovered.

use super::{
    ast::{Ast, AstNode, NodeId},
    lexer::Lexer,
    token::{Token, Type},
};
use crate::error::SeedError::{self, SyntaxError};

/// The `Parser` struct is responsible for turning the token stream of a `Lexer` into an `Ast`.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    ast: Ast<'a>,
}

/// Either the id of the freshly inserted node or the first error encountered.
type ParserResult = Result<NodeId, SeedError>;

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            ast: Ast::new(),
        }
    }

    /// Convenience for lexing and parsing `source` in one go.
    pub fn parse_str(source: &'a str) -> Result<Ast<'a>, SeedError> {
        Self::new(Lexer::new(source)?).parse()
    }

    //-------
    // HELPER
    //-------

    fn peek(&self) -> Type {
        self.lexer.peek().typ
    }

    fn next(&mut self) -> Result<Token<'a>, SeedError> {
        self.lexer.advance()
    }

    /// Errors point at the offending token; at the end of input that is the lexer's cursor.
    fn parse_err(&self, token: &Token<'a>, msg: &str) -> SeedError {
        let pos = match token.typ {
            Type::Eof => self.lexer.position(),
            _ => self.lexer.position_of(token),
        };
        SyntaxError {
            pos,
            msg: msg.to_string(),
        }
    }

    /// Consume the next token, which has to be of type `expected`.
    fn consume(&mut self, expected: Type, msg: &str) -> Result<Token<'a>, SeedError> {
        let token = self.next()?;
        if token.typ == expected {
            Ok(token)
        } else {
            Err(self.parse_err(&token, msg))
        }
    }

    //--------
    // PARSING
    //--------

    /// Parse every top-level form until the input is exhausted.
    pub fn parse(mut self) -> Result<Ast<'a>, SeedError> {
        while self.peek() != Type::Eof {
            let root = self.parse_expr()?;
            self.ast.roots.push(root);
        }
        log::debug!(
            "parsed {} top-level forms ({} nodes)",
            self.ast.roots.len(),
            self.ast.arena.len()
        );
        Ok(self.ast)
    }

    /// Parse a single parenthesized form. Children are inserted before their parent, so every
    /// id stored in a list refers to an already existing node.
    pub fn parse_expr(&mut self) -> ParserResult {
        self.consume(Type::LeftParenthese, "expected `(`")?;

        let op = self.next()?;
        if op.typ == Type::RightParenthese {
            return Ok(self.ast.arena.alloc(AstNode::Empty));
        }
        if !op.is_atom() {
            return Err(self.parse_err(&op, "expected identifier or string"));
        }

        let mut children = Vec::new();
        loop {
            let child = match self.peek() {
                Type::LeftParenthese => self.parse_expr()?,
                Type::Identifier | Type::String => self.parse_atom()?,
                _ => break,
            };
            children.push(child);
        }

        self.consume(Type::RightParenthese, "expected `)`")?;
        Ok(self.ast.arena.alloc(AstNode::List { op, children }))
    }

    fn parse_atom(&mut self) -> ParserResult {
        let token = self.next()?;
        let node = match token.typ {
            Type::String => AstNode::Str(token),
            _ => AstNode::Ident(token),
        };
        Ok(self.ast.arena.alloc(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::position::Position;

    fn parse(input: &str) -> Ast<'_> {
        Parser::parse_str(input).unwrap()
    }

    fn parse_err(input: &str) -> (Position, String) {
        match Parser::parse_str(input).unwrap_err() {
            SyntaxError { pos, msg } => (pos, msg),
            err => panic!("expected syntax error, got {:?}", err),
        }
    }

    fn sexprs(ast: &Ast<'_>) -> Vec<String> {
        ast.roots
            .iter()
            .map(|root| ast.arena.display(*root).to_string())
            .collect()
    }

    #[test]
    fn test_parse_basic_expr() {
        let ast = parse("(add (mul 2 3) \"x\")");
        assert_eq!(ast.roots.len(), 1);
        let root = &ast.arena[ast.roots[0]];
        assert_eq!(root.label(), Some("add"));
        let children = root.children();
        assert_eq!(children.len(), 2);

        let mul = &ast.arena[children[0]];
        assert_eq!(mul.label(), Some("mul"));
        let operands: Vec<_> = mul.children().iter().map(|id| &ast.arena[*id]).collect();
        assert!(matches!(operands[0], AstNode::Ident(t) if t.lexeme() == "2"));
        assert!(matches!(operands[1], AstNode::Ident(t) if t.lexeme() == "3"));
        assert!(matches!(&ast.arena[children[1]], AstNode::Str(t) if t.lexeme() == "x"));

        // leaves first, the root last
        assert_eq!(ast.arena.len(), 5);
        assert_eq!(ast.roots[0].to_raw(), 4);
    }

    #[test]
    fn test_parse_empty() {
        let ast = parse("()");
        assert_eq!(ast.roots.len(), 1);
        assert_eq!(ast.arena[ast.roots[0]], AstNode::Empty);
        assert!(ast.arena[ast.roots[0]].children().is_empty());
    }

    #[test]
    fn test_parse_many_roots() {
        let ast = parse("(a) () (b c)\n(\"d\" (e))");
        assert_eq!(sexprs(&ast), vec!["(a)", "()", "(b c)", "(\"d\" (e))"]);
        let ast = parse("()(a)");
        assert_eq!(sexprs(&ast), vec!["()", "(a)"]);
        assert!(parse("  \n ").roots.is_empty());
    }

    #[test]
    fn test_whitespace_does_not_matter() {
        let expected = parse("(a b)");
        for src in ["(a    b)", "(a\n\tb)", "  ( a \u{b}\u{c} b )  "].iter() {
            let ast = parse(src);
            assert_eq!(sexprs(&ast), sexprs(&expected));
            assert_eq!(ast.arena.len(), expected.arena.len());
        }
    }

    #[test]
    fn test_strings_are_verbatim() {
        let ast = parse("(\"a (b) c\")");
        assert_eq!(ast.arena.len(), 1);
        let root = &ast.arena[ast.roots[0]];
        match root {
            AstNode::List { op, children } => {
                assert_eq!(op.typ, Type::String);
                assert_eq!(op.lexeme(), "a (b) c");
                assert!(children.is_empty());
            }
            node => panic!("expected list, got {:?}", node),
        }
        let ast = parse("(f 'x  y')");
        let child = ast.arena[ast.roots[0]].children()[0];
        assert!(matches!(&ast.arena[child], AstNode::Str(t) if t.lexeme() == "x  y"));
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 200;
        let src = format!("{}{}", "(a ".repeat(depth), ")".repeat(depth));
        let ast = parse(&src);
        assert_eq!(ast.arena.len(), depth);
        let mut node = &ast.arena[ast.roots[0]];
        let mut lists = 1;
        while let [child] = node.children() {
            node = &ast.arena[*child];
            lists += 1;
        }
        assert_eq!(lists, depth);
    }

    #[test]
    fn test_digits_are_identifiers() {
        let ast = parse("(1 2)");
        assert_eq!(ast.arena[ast.roots[0]].label(), Some("1"));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_err("(a"), (Position::new(1, 3), "expected `)`".to_string()));
        assert_eq!(
            parse_err("(a\n  (b c)"),
            (Position::new(2, 8), "expected `)`".to_string())
        );
        assert_eq!(parse_err("a"), (Position::new(1, 1), "expected `(`".to_string()));
        assert_eq!(parse_err("(a))"), (Position::new(1, 4), "expected `(`".to_string()));
        // every top-level form has to start with `(`, even right after `()`
        assert_eq!(parse_err("()a"), (Position::new(1, 3), "expected `(`".to_string()));
        assert_eq!(
            parse_err("((a))"),
            (Position::new(1, 2), "expected identifier or string".to_string())
        );
        assert_eq!(
            parse_err("("),
            (Position::new(1, 2), "expected identifier or string".to_string())
        );
    }

    #[test]
    fn test_lexical_errors_propagate() {
        assert!(matches!(
            Parser::parse_str("(a \u{2})").unwrap_err(),
            SeedError::UnexpectedCharacter { .. }
        ));
    }
}
