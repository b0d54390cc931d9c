//! Abstract syntax tree datastructures.
//!
//! All nodes live in a single append-only [`Arena`] and refer to their children by [`NodeId`].
//! Ids are handed out in insertion order starting at 0 and stay valid for the lifetime of the
//! arena, since nodes are never removed or moved. The parser only ever refers to nodes it has
//! already inserted, so the result is always a forest.

use std::{fmt, ops::Index};

use super::token::{Token, Type};

/// Index of a node inside an [`Arena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Basic nodes of which the AST consists.
///     - A list is a parenthesized form; its first element is the operator, the remaining ones
///     are its children.
///     - Identifiers and strings are always leaves.
///     - Empty is what `()` parses to.
pub enum AstNode<'a> {
    List { op: Token<'a>, children: Vec<NodeId> },
    Ident(Token<'a>),
    /// String literal, delimiters already stripped by the lexer.
    Str(Token<'a>),
    Empty,
}

impl<'a> AstNode<'a> {
    /// Text shown for this node, `None` for `Empty`.
    pub fn label(&self) -> Option<&'a str> {
        match self {
            AstNode::List { op, .. } => Some(op.lexeme()),
            AstNode::Ident(token) | AstNode::Str(token) => Some(token.lexeme()),
            AstNode::Empty => None,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match self {
            AstNode::List { children, .. } => children,
            _ => &[],
        }
    }
}

/// Append-only storage for every node of a parse.
#[derive(Debug, Clone, Default)]
pub struct Arena<'a> {
    nodes: Vec<AstNode<'a>>,
}

impl<'a> Arena<'a> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Store `node` and return its id.
    pub fn alloc(&mut self, node: AstNode<'a>) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&AstNode<'a>> {
        self.nodes.get(id.to_raw() as usize)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &AstNode<'a>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId::from_raw(idx as u32), node))
    }

    /// Canonical S-expression text of the tree rooted at `id`, independent of the whitespace
    /// in the original source.
    pub fn display(&self, id: NodeId) -> Sexpr<'_, 'a> {
        Sexpr { arena: self, id }
    }
}

impl<'a> Index<NodeId> for Arena<'a> {
    type Output = AstNode<'a>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.to_raw() as usize]
    }
}

pub struct Sexpr<'s, 'a> {
    arena: &'s Arena<'a>,
    id: NodeId,
}

impl fmt::Display for Sexpr<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.arena[self.id] {
            AstNode::Empty => write!(f, "()"),
            AstNode::Ident(token) => write!(f, "{}", token.lexeme()),
            AstNode::Str(token) => write_quoted(f, token.lexeme()),
            AstNode::List { op, children } => {
                write!(f, "(")?;
                match op.typ {
                    Type::String => write_quoted(f, op.lexeme())?,
                    _ => write!(f, "{}", op.lexeme())?,
                }
                for child in children {
                    write!(f, " {}", self.arena.display(*child))?;
                }
                write!(f, ")")
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter, text: &str) -> fmt::Result {
    let delim = if text.contains('"') { '\'' } else { '"' };
    write!(f, "{}{}{}", delim, text, delim)
}

/// Result of parsing a whole file: the arena plus the top-level forms in source order.
#[derive(Debug, Clone, Default)]
pub struct Ast<'a> {
    pub arena: Arena<'a>,
    pub roots: Vec<NodeId>,
}

impl<'a> Ast<'a> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for Ast<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for root in self.roots.iter() {
            writeln!(f, "{}", self.arena.display(*root))?;
        }
        Ok(())
    }
}
