//! The frontend module contains everything that is concerned with tokenizing and parsing the
//! input string and with turning the result into a graph description.
//!
//! # Lexer
//! The lexer classifies the source text into tokens, one at a time, on demand. Tokens borrow
//! their text from the source, which therefore has to outlive them and everything built from them.
//! ### Example
//! ```rust
//! use seed::frontend::lexer::Lexer;
//! let tokens_or_err = Lexer::new("(add 1 2)").and_then(|mut lx| lx.tokenize());
//! ```
//!
//! # Parser
//! The parser pulls tokens from the lexer and stores every node of the AST in a single arena.
//! Nodes refer to their children by index.
//! ### Example
//! ```rust
//! use seed::frontend::{lexer::Lexer, parser::Parser};
//! let ast_or_err = Lexer::new("(add 1 2)").and_then(|lx| Parser::new(lx).parse());
//! ```
//! The parser returns either the first error it ran into or the `frontend::ast::Ast`, which
//! holds the arena and the top-level forms in source order.
//!
//! # Visualization
//! `visualize::Visualizer` walks the arena and produces a Graphviz DOT description with one
//! cluster per top-level form.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod token;
pub mod visualize;
