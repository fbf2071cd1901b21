//! Syntax front half of the Minim compiler: tokens, lexer, AST, parser,
//! line index and the canonical unparser.
//!
//! The crate turns source text into an immutable [`ast::Program`]; the
//! `minim-resolve` crate performs name analysis over that tree.

pub mod ast;
pub mod line_index;
pub mod parser;
pub mod token;
pub mod unparse;

pub use ast::{NodeId, Program, Span};
pub use line_index::LineIndex;
pub use parser::{parse, ParseError, SyntaxError};
pub use token::{lex, LexError, Token};
pub use unparse::{unparse, unparse_annotated};
