//! Recursive-descent parser for Minim.
//!
//! Parsing stops at the first error. Error-tolerant multi-error reporting
//! is the name-analysis pass's job; the parser either yields a well-formed
//! tree or a single positioned [`ParseError`].

mod decl;
mod expr;
mod stmt;

use log::debug;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::{Ident, NodeId, Program, Span};
use crate::token::{lex, LexError, Token};

/// Nesting limit for blocks and expressions. Keeps pathological input from
/// exhausting the stack here and in every later tree pass.
pub const MAX_NESTING_DEPTH: usize = 128;

/// A syntax error with the offending token's position.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    #[diagnostic(code(minim_syntax::unexpected_token))]
    UnexpectedToken {
        expected: String,
        found: String,
        #[label("unexpected token")]
        span: SourceSpan,
    },

    #[error("unexpected end of input: expected {expected}")]
    #[diagnostic(code(minim_syntax::unexpected_eof))]
    UnexpectedEof {
        expected: String,
        #[label("input ends here")]
        span: SourceSpan,
    },

    #[error("program nests deeper than {limit} levels")]
    #[diagnostic(code(minim_syntax::nesting_too_deep))]
    NestingTooDeep {
        limit: usize,
        #[label("nesting limit reached here")]
        span: SourceSpan,
    },
}

/// Any error produced while turning source text into an AST.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

/// Parse a whole source file into a [`Program`].
pub fn parse(source: &str) -> Result<Program, SyntaxError> {
    let tokens = lex(source)?;
    debug!("lexed {} tokens from {} bytes", tokens.len(), source.len());
    let mut parser = Parser::new(tokens, source.len());
    Ok(parser.program()?)
}

pub(crate) struct Parser {
    tokens: Vec<(Token, Span)>,
    pos: usize,
    depth: usize,
    next_id: u32,
    eof: usize,
}

impl Parser {
    fn new(tokens: Vec<(Token, Span)>, source_len: usize) -> Self {
        Self { tokens, pos: 0, depth: 0, next_id: 0, eof: source_len }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|(token, _)| token)
    }

    fn peek_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| *span)
            .unwrap_or(Span::new(self.eof, self.eof))
    }

    /// Consume the current token, returning its span. Only call after a
    /// successful `peek`.
    fn bump_span(&mut self) -> Span {
        let span = self.peek_span();
        self.pos += 1;
        span
    }

    fn at(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    fn eat(&mut self, token: &Token) -> Option<Span> {
        if self.at(token) {
            Some(self.bump_span())
        } else {
            None
        }
    }

    fn expect(&mut self, token: Token) -> Result<Span, ParseError> {
        match self.peek() {
            Some(found) if *found == token => Ok(self.bump_span()),
            _ => Err(self.unexpected(&token.to_string())),
        }
    }

    fn expect_ident(&mut self) -> Result<Ident, ParseError> {
        match self.peek() {
            Some(Token::Ident(_)) => {
                let (token, span) = self.tokens[self.pos].clone();
                self.pos += 1;
                let Token::Ident(name) = token else { unreachable!() };
                let id = self.fresh_id();
                Ok(Ident { name, span, id })
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.tokens.get(self.pos) {
            Some((token, span)) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.to_string(),
                span: (*span).into(),
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                span: Span::new(self.eof, self.eof).into(),
            },
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                span: self.peek_span().into(),
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, ParseError, SyntaxError};
    use crate::ast::{Decl, ExprKind, StmtKind, TypeKind};

    #[test]
    fn parses_toplevel_declarations() {
        let program = parse(
            "integer g.\n\
             struct Point { integer x. integer y. }\n\
             struct Point p.\n\
             void main() { disp <- (g). }\n",
        )
        .unwrap();
        assert_eq!(program.decls.len(), 4);
        assert!(matches!(program.decls[0], Decl::Var(_)));
        assert!(matches!(program.decls[1], Decl::Struct(_)));
        let Decl::Var(p) = &program.decls[2] else {
            panic!("expected a struct-typed variable");
        };
        assert!(matches!(p.ty.kind, TypeKind::Struct(_)));
        assert!(matches!(program.decls[3], Decl::Func(_)));
    }

    #[test]
    fn block_locals_come_before_statements() {
        let program = parse(
            "void main() {\n\
                 integer x.\n\
                 x = 3.\n\
                 integer y.\n\
             }\n",
        );
        // A declaration after the first statement is a syntax error.
        assert!(matches!(
            program,
            Err(SyntaxError::Parse(ParseError::UnexpectedToken { .. }))
        ));
    }

    #[test]
    fn assignment_is_right_associative() {
        let program = parse("void main() { integer a. integer b. a = b = 1. }").unwrap();
        let Decl::Func(func) = &program.decls[0] else { panic!() };
        let StmtKind::Assign { value, .. } = &func.body.stmts[0].kind else {
            panic!("expected an assignment");
        };
        assert!(matches!(value.kind, ExprKind::Assign { .. }));
    }

    #[test]
    fn colon_access_chains_left() {
        let program = parse("void main() { p:q:x = 1. }").unwrap();
        let Decl::Func(func) = &program.decls[0] else { panic!() };
        let StmtKind::Assign { target, .. } = &func.body.stmts[0].kind else { panic!() };
        let ExprKind::StructAccess { base, field } = &target.kind else {
            panic!("expected a struct access");
        };
        assert_eq!(field.name, "x");
        assert!(matches!(base.kind, ExprKind::StructAccess { .. }));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let mut source = String::from("void main() { x = ");
        for _ in 0..400 {
            source.push('(');
        }
        source.push('1');
        for _ in 0..400 {
            source.push(')');
        }
        source.push_str(". }");
        assert!(matches!(
            parse(&source),
            Err(SyntaxError::Parse(ParseError::NestingTooDeep { .. }))
        ));
    }

    #[test]
    fn every_identifier_occurrence_gets_a_distinct_id() {
        let program = parse("integer x.\nvoid main() { x = x. }").unwrap();
        let Decl::Func(func) = &program.decls[1] else { panic!() };
        let StmtKind::Assign { target, value } = &func.body.stmts[0].kind else { panic!() };
        let (ExprKind::Ident(lhs), ExprKind::Ident(rhs)) = (&target.kind, &value.kind) else {
            panic!()
        };
        assert_ne!(lhs.id, rhs.id);
    }
}
