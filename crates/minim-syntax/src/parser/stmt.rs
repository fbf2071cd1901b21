//! Statement and block parsing.

use super::{ParseError, Parser};
use crate::ast::{Block, Decl, Expr, ExprKind, Ident, Stmt, StmtKind};
use crate::token::Token;

impl Parser {
    /// `{ local-decls stmts }`: the body form shared by functions, `if`,
    /// `else` and `while`.
    pub(crate) fn block(&mut self) -> Result<Block, ParseError> {
        self.enter()?;
        let start = self.expect(Token::LBrace)?;
        let mut decls = Vec::new();
        while matches!(
            self.peek(),
            Some(Token::Integer | Token::Boolean | Token::Void | Token::Struct)
        ) {
            decls.push(Decl::Var(self.var_decl()?));
        }
        let mut stmts = Vec::new();
        while !self.at(&Token::RBrace) {
            stmts.push(self.stmt()?);
        }
        let end = self.expect(Token::RBrace)?;
        self.leave();
        Ok(Block { decls, stmts, span: start.to(end) })
    }

    fn stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.peek() {
            Some(Token::If) => self.if_stmt(),
            Some(Token::While) => self.while_stmt(),
            Some(Token::Input) => self.read_stmt(),
            Some(Token::Disp) => self.write_stmt(),
            Some(Token::Return) => self.return_stmt(),
            Some(Token::Ident(_)) => self.simple_stmt(),
            _ => Err(self.unexpected("a statement")),
        }
    }

    fn if_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(Token::If)?;
        self.expect(Token::LParen)?;
        let cond = self.expr()?;
        self.expect(Token::RParen)?;
        let then_block = self.block()?;
        let mut span = start.to(then_block.span);
        let else_block = if self.eat(&Token::Else).is_some() {
            let block = self.block()?;
            span = span.to(block.span);
            Some(block)
        } else {
            None
        };
        Ok(Stmt { kind: StmtKind::If { cond, then_block, else_block }, span })
    }

    fn while_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(Token::While)?;
        self.expect(Token::LParen)?;
        let cond = self.expr()?;
        self.expect(Token::RParen)?;
        let body = self.block()?;
        let span = start.to(body.span);
        Ok(Stmt { kind: StmtKind::While { cond, body }, span })
    }

    fn read_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(Token::Input)?;
        self.expect(Token::ReadArrow)?;
        let id = self.expect_ident()?;
        let target = self.loc_from(id)?;
        let dot = self.expect(Token::Dot)?;
        Ok(Stmt { kind: StmtKind::Read(target), span: start.to(dot) })
    }

    fn write_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(Token::Disp)?;
        self.expect(Token::WriteArrow)?;
        self.expect(Token::LParen)?;
        let value = self.expr()?;
        self.expect(Token::RParen)?;
        let dot = self.expect(Token::Dot)?;
        Ok(Stmt { kind: StmtKind::Write(value), span: start.to(dot) })
    }

    fn return_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(Token::Return)?;
        let value = if self.at(&Token::Dot) { None } else { Some(self.expr()?) };
        let dot = self.expect(Token::Dot)?;
        Ok(Stmt { kind: StmtKind::Return(value), span: start.to(dot) })
    }

    /// Statements that begin with an identifier: calls, assignments and the
    /// postfix `++`/`--` forms.
    fn simple_stmt(&mut self) -> Result<Stmt, ParseError> {
        let id = self.expect_ident()?;
        if self.at(&Token::LParen) {
            let call = self.call_expr(id)?;
            let dot = self.expect(Token::Dot)?;
            let span = call.span.to(dot);
            return Ok(Stmt { kind: StmtKind::Call(call), span });
        }
        let target = self.loc_from(id)?;
        match self.peek() {
            Some(Token::Assign) => {
                self.bump_span();
                let value = self.expr()?;
                let dot = self.expect(Token::Dot)?;
                let span = target.span.to(dot);
                Ok(Stmt { kind: StmtKind::Assign { target, value }, span })
            }
            Some(Token::PlusPlus) => {
                self.bump_span();
                let dot = self.expect(Token::Dot)?;
                let span = target.span.to(dot);
                Ok(Stmt { kind: StmtKind::PostInc(target), span })
            }
            Some(Token::MinusMinus) => {
                self.bump_span();
                let dot = self.expect(Token::Dot)?;
                let span = target.span.to(dot);
                Ok(Stmt { kind: StmtKind::PostDec(target), span })
            }
            _ => Err(self.unexpected("`=`, `++`, `--`, or `(`")),
        }
    }

    /// A location: an identifier followed by any number of `:field` accesses.
    pub(crate) fn loc_from(&mut self, id: Ident) -> Result<Expr, ParseError> {
        let mut loc = Expr { span: id.span, kind: ExprKind::Ident(id) };
        while self.eat(&Token::Colon).is_some() {
            let field = self.expect_ident()?;
            let span = loc.span.to(field.span);
            loc = Expr {
                kind: ExprKind::StructAccess { base: Box::new(loc), field },
                span,
            };
        }
        Ok(loc)
    }
}
