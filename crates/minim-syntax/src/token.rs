//! Token definitions and the lexer for Minim source text.

use std::fmt;

use logos::Logos;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

/// Errors produced while scanning source text.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that cannot begin any Minim token.
    #[error("unrecognized character")]
    #[diagnostic(code(minim_syntax::unrecognized_character))]
    UnrecognizedCharacter {
        #[label("this character is not part of any token")]
        span: SourceSpan,
    },

    /// A `"` that is never matched by a closing `"` on the same line.
    #[error("unterminated string literal")]
    #[diagnostic(code(minim_syntax::unterminated_string))]
    UnterminatedString {
        #[label("string opened here is never closed")]
        span: SourceSpan,
    },

    /// An integer literal that does not fit the integer type.
    #[error("integer literal is too large")]
    #[diagnostic(code(minim_syntax::int_literal_too_large))]
    IntLiteralTooLarge {
        #[label("this value overflows the integer type")]
        span: SourceSpan,
    },
}

/// A single Minim token.
///
/// Whitespace and `#` line comments are skipped by the lexer and never
/// appear in the token stream.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+", skip r"#[^\n]*")]
pub enum Token {
    // Keywords
    #[token("boolean")]
    Boolean,
    #[token("integer")]
    Integer,
    #[token("void")]
    Void,
    #[token("struct")]
    Struct,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("return")]
    Return,
    #[token("TRUE")]
    True,
    #[token("FALSE")]
    False,
    #[token("disp")]
    Disp,
    #[token("input")]
    Input,

    // Identifiers and literals
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    IntLit(i64),
    /// The raw literal text, quotes and escapes included; nothing in the
    /// front-end needs the decoded value.
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| lex.slice().to_string())]
    StrLit(String),

    // Punctuation and operators
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("=")]
    Assign,
    #[token("==")]
    EqEq,
    #[token("^=")]
    NotEq,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEq,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEq,
    #[token("+")]
    Plus,
    #[token("++")]
    PlusPlus,
    #[token("-")]
    Minus,
    #[token("--")]
    MinusMinus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("->")]
    ReadArrow,
    #[token("<-")]
    WriteArrow,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Boolean => write!(f, "`boolean`"),
            Token::Integer => write!(f, "`integer`"),
            Token::Void => write!(f, "`void`"),
            Token::Struct => write!(f, "`struct`"),
            Token::If => write!(f, "`if`"),
            Token::Else => write!(f, "`else`"),
            Token::While => write!(f, "`while`"),
            Token::Return => write!(f, "`return`"),
            Token::True => write!(f, "`TRUE`"),
            Token::False => write!(f, "`FALSE`"),
            Token::Disp => write!(f, "`disp`"),
            Token::Input => write!(f, "`input`"),
            Token::Ident(name) => write!(f, "identifier `{name}`"),
            Token::IntLit(value) => write!(f, "integer literal `{value}`"),
            Token::StrLit(_) => write!(f, "string literal"),
            Token::LBrace => write!(f, "`{{`"),
            Token::RBrace => write!(f, "`}}`"),
            Token::LParen => write!(f, "`(`"),
            Token::RParen => write!(f, "`)`"),
            Token::Comma => write!(f, "`,`"),
            Token::Dot => write!(f, "`.`"),
            Token::Colon => write!(f, "`:`"),
            Token::Assign => write!(f, "`=`"),
            Token::EqEq => write!(f, "`==`"),
            Token::NotEq => write!(f, "`^=`"),
            Token::Less => write!(f, "`<`"),
            Token::LessEq => write!(f, "`<=`"),
            Token::Greater => write!(f, "`>`"),
            Token::GreaterEq => write!(f, "`>=`"),
            Token::Plus => write!(f, "`+`"),
            Token::PlusPlus => write!(f, "`++`"),
            Token::Minus => write!(f, "`-`"),
            Token::MinusMinus => write!(f, "`--`"),
            Token::Star => write!(f, "`*`"),
            Token::Slash => write!(f, "`/`"),
            Token::Amp => write!(f, "`&`"),
            Token::Pipe => write!(f, "`|`"),
            Token::Caret => write!(f, "`^`"),
            Token::ReadArrow => write!(f, "`->`"),
            Token::WriteArrow => write!(f, "`<-`"),
        }
    }
}

/// Scan `source` into a token stream.
///
/// Scanning stops at the first lexical error; the parser never sees a
/// partial stream.
pub fn lex(source: &str) -> Result<Vec<(Token, Span)>, LexError> {
    let mut tokens = Vec::new();
    for (result, range) in Token::lexer(source).spanned() {
        let span = Span::new(range.start, range.end);
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                let rest = &source[range.start..];
                return Err(if rest.starts_with('"') {
                    LexError::UnterminatedString { span: span.into() }
                } else if rest.starts_with(|c: char| c.is_ascii_digit()) {
                    LexError::IntLiteralTooLarge { span: span.into() }
                } else {
                    LexError::UnrecognizedCharacter { span: span.into() }
                });
            }
        }
    }
    Ok(tokens)
}
