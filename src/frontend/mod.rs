//! The frontend module contains everything that is concerned with tokenizing and parsing
//! SheetScript source code.
//!
//! # Lexer
//! Firstly the lexer is responsible for converting the input string into tokens which are
//! defined in the token module.
//! ### Example
//! ```rust
//! use sheetscript::frontend::lexer::Lexer;
//! let tokens_or_err = Lexer::new("print_scalar 1.0").tokenize();
//! ```
//! `tokenize` either returns the first lexical error or a vector containing all tokens.
//!
//! # Parser
//! The parser pulls the tokens out of the lexer and builds the AST with the LALR(1) tables
//! generated from `grammar.lalrpop`.
//! ### Example
//! ```rust
//! use sheetscript::frontend::{lexer::Lexer, parser::Parser};
//! let program = Parser::new().parse(Lexer::new("scalar sc = 1.0\nprint_scalar sc"));
//! assert!(program.is_ok());
//! ```
//! The result is either the first lexical or syntax error, or the `frontend::ast::Program`
//! containing the definitions and statements.
//!
//! # Node view
//! `node::Node` lowers the typed AST into uniformly tagged nodes with named relations. It is
//! used for tracing and printing the tree.
//!
//! # Visualization
//! There's also a small Graphviz DOT writer which can be used to visualize the node view in
//! order to better reason about a program's structure.

pub mod ast;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod token;
pub mod visualize;

lalrpop_util::lalrpop_mod!(
    #[allow(clippy::all, unused_parens)]
    pub grammar,
    "/frontend/grammar.rs"
);

use crate::error::SheetError;
use ast::Program;
use lexer::Lexer;
use parser::Parser;

/// Tokenize and parse `source` in one go.
pub fn parse(source: &str) -> Result<Program, SheetError> {
    Parser::new().parse(Lexer::new(source))
}
