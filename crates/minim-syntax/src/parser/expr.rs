//! Expression parsing.
//!
//! Precedence, loosest first: assignment, `|`, `&`, equality, relational,
//! additive, multiplicative, prefix `-`/`^`, postfix `:` access.

use super::{ParseError, Parser};
use crate::ast::{BinaryOp, CallExpr, Expr, ExprKind, Ident, UnaryOp};
use crate::token::Token;

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span.to(rhs.span);
    Expr { kind: ExprKind::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }, span }
}

impl Parser {
    pub(crate) fn expr(&mut self) -> Result<Expr, ParseError> {
        self.enter()?;
        let result = self.assign_expr();
        self.leave();
        result
    }

    fn assign_expr(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.or_expr()?;
        if self.eat(&Token::Assign).is_some() {
            // Right-associative: `a = b = c` assigns `b = c` first.
            let value = self.expr()?;
            let span = lhs.span.to(value.span);
            return Ok(Expr {
                kind: ExprKind::Assign { target: Box::new(lhs), value: Box::new(value) },
                span,
            });
        }
        Ok(lhs)
    }

    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.and_expr()?;
        while self.eat(&Token::Pipe).is_some() {
            let rhs = self.and_expr()?;
            lhs = binary(BinaryOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.equality_expr()?;
        while self.eat(&Token::Amp).is_some() {
            let rhs = self.equality_expr()?;
            lhs = binary(BinaryOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn equality_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.relational_expr()?;
        loop {
            let op = match self.peek() {
                Some(Token::EqEq) => BinaryOp::Eq,
                Some(Token::NotEq) => BinaryOp::NotEq,
                _ => break,
            };
            self.bump_span();
            let rhs = self.relational_expr()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn relational_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.additive_expr()?;
        loop {
            let op = match self.peek() {
                Some(Token::Less) => BinaryOp::Less,
                Some(Token::LessEq) => BinaryOp::LessEq,
                Some(Token::Greater) => BinaryOp::Greater,
                Some(Token::GreaterEq) => BinaryOp::GreaterEq,
                _ => break,
            };
            self.bump_span();
            let rhs = self.additive_expr()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn additive_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.multiplicative_expr()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.bump_span();
            let rhs = self.multiplicative_expr()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn multiplicative_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.unary_expr()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.bump_span();
            let rhs = self.unary_expr()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn unary_expr(&mut self) -> Result<Expr, ParseError> {
        // Collect the prefix run iteratively so operator chains do not
        // recurse outside the `expr` depth guard.
        let mut prefix = Vec::new();
        loop {
            let op = match self.peek() {
                Some(Token::Minus) => UnaryOp::Neg,
                Some(Token::Caret) => UnaryOp::Not,
                _ => break,
            };
            prefix.push((op, self.bump_span()));
        }
        let mut expr = self.postfix_expr()?;
        for (op, span) in prefix.into_iter().rev() {
            let full = span.to(expr.span);
            expr = Expr { kind: ExprKind::Unary { op, operand: Box::new(expr) }, span: full };
        }
        Ok(expr)
    }

    fn postfix_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary_expr()?;
        while self.eat(&Token::Colon).is_some() {
            let field = self.expect_ident()?;
            let span = expr.span.to(field.span);
            expr = Expr {
                kind: ExprKind::StructAccess { base: Box::new(expr), field },
                span,
            };
        }
        Ok(expr)
    }

    fn primary_expr(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::True) => {
                let span = self.bump_span();
                Ok(Expr { kind: ExprKind::True, span })
            }
            Some(Token::False) => {
                let span = self.bump_span();
                Ok(Expr { kind: ExprKind::False, span })
            }
            Some(Token::IntLit(value)) => {
                let value = *value;
                let span = self.bump_span();
                Ok(Expr { kind: ExprKind::IntLit(value), span })
            }
            Some(Token::StrLit(text)) => {
                let text = text.clone();
                let span = self.bump_span();
                Ok(Expr { kind: ExprKind::StrLit(text), span })
            }
            Some(Token::LParen) => {
                let start = self.bump_span();
                let mut inner = self.expr()?;
                let end = self.expect(Token::RParen)?;
                inner.span = start.to(end);
                Ok(inner)
            }
            Some(Token::Ident(_)) => {
                let id = self.expect_ident()?;
                if self.at(&Token::LParen) {
                    let call = self.call_expr(id)?;
                    let span = call.span;
                    Ok(Expr { kind: ExprKind::Call(call), span })
                } else {
                    Ok(Expr { span: id.span, kind: ExprKind::Ident(id) })
                }
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    pub(crate) fn call_expr(&mut self, callee: Ident) -> Result<CallExpr, ParseError> {
        self.expect(Token::LParen)?;
        let mut args = Vec::new();
        if !self.at(&Token::RParen) {
            loop {
                args.push(self.expr()?);
                if self.eat(&Token::Comma).is_none() {
                    break;
                }
            }
        }
        let end = self.expect(Token::RParen)?;
        Ok(CallExpr { span: callee.span.to(end), callee, args })
    }
}
