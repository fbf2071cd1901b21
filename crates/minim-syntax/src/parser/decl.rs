//! Declaration parsing: programs, variables, functions, structs, types.

use super::{ParseError, Parser};
use crate::ast::{Decl, FormalDecl, FuncDecl, Ident, Program, StructDecl, Type, TypeKind, VarDecl};
use crate::token::Token;

impl Parser {
    pub(crate) fn program(&mut self) -> Result<Program, ParseError> {
        let mut decls = Vec::new();
        while self.peek().is_some() {
            decls.push(self.decl()?);
        }
        Ok(Program { decls })
    }

    fn decl(&mut self) -> Result<Decl, ParseError> {
        // `struct Name {` opens a struct declaration; `struct Name x.` is a
        // variable of struct type. Two tokens of lookahead disambiguate.
        if self.at(&Token::Struct)
            && matches!(self.peek_nth(1), Some(Token::Ident(_)))
            && matches!(self.peek_nth(2), Some(Token::LBrace))
        {
            return Ok(Decl::Struct(self.struct_decl()?));
        }
        let ty = self.ty()?;
        let name = self.expect_ident()?;
        match self.peek() {
            Some(Token::LParen) => Ok(Decl::Func(self.func_decl(ty, name)?)),
            Some(Token::Dot) => {
                let dot = self.bump_span();
                let span = ty.span.to(dot);
                Ok(Decl::Var(VarDecl { ty, name, span }))
            }
            _ => Err(self.unexpected("`(` or `.`")),
        }
    }

    fn struct_decl(&mut self) -> Result<StructDecl, ParseError> {
        let start = self.expect(Token::Struct)?;
        let name = self.expect_ident()?;
        self.expect(Token::LBrace)?;
        let mut fields = Vec::new();
        while !self.at(&Token::RBrace) {
            fields.push(self.var_decl()?);
        }
        let end = self.expect(Token::RBrace)?;
        Ok(StructDecl { name, fields, span: start.to(end) })
    }

    /// A complete `type name.` declaration (struct fields, block locals).
    pub(crate) fn var_decl(&mut self) -> Result<VarDecl, ParseError> {
        let ty = self.ty()?;
        let name = self.expect_ident()?;
        let dot = self.expect(Token::Dot)?;
        Ok(VarDecl { span: ty.span.to(dot), ty, name })
    }

    fn func_decl(&mut self, return_ty: Type, name: Ident) -> Result<FuncDecl, ParseError> {
        self.expect(Token::LParen)?;
        let mut formals = Vec::new();
        if !self.at(&Token::RParen) {
            loop {
                formals.push(self.formal()?);
                if self.eat(&Token::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(Token::RParen)?;
        let body = self.block()?;
        Ok(FuncDecl {
            span: return_ty.span.to(body.span),
            return_ty,
            name,
            formals,
            body,
        })
    }

    // Formals are restricted to primitive types by the grammar.
    fn formal(&mut self) -> Result<FormalDecl, ParseError> {
        match self.peek() {
            Some(Token::Integer | Token::Boolean | Token::Void) => {
                let ty = self.ty()?;
                let name = self.expect_ident()?;
                Ok(FormalDecl { span: ty.span.to(name.span), ty, name })
            }
            _ => Err(self.unexpected("a primitive parameter type")),
        }
    }

    pub(crate) fn ty(&mut self) -> Result<Type, ParseError> {
        match self.peek() {
            Some(Token::Integer) => {
                let span = self.bump_span();
                Ok(Type { kind: TypeKind::Integer, span })
            }
            Some(Token::Boolean) => {
                let span = self.bump_span();
                Ok(Type { kind: TypeKind::Boolean, span })
            }
            Some(Token::Void) => {
                let span = self.bump_span();
                Ok(Type { kind: TypeKind::Void, span })
            }
            Some(Token::Struct) => {
                let start = self.bump_span();
                let id = self.expect_ident()?;
                Ok(Type { span: start.to(id.span), kind: TypeKind::Struct(id) })
            }
            _ => Err(self.unexpected("a type")),
        }
    }
}
