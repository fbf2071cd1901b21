use super::{Ident, Span};

/// A whole source file: a list of top-level declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub decls: Vec<Decl>,
}

/// A declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Var(VarDecl),
    Func(FuncDecl),
    Struct(StructDecl),
}

impl Decl {
    pub fn span(&self) -> Span {
        match self {
            Decl::Var(d) => d.span,
            Decl::Func(d) => d.span,
            Decl::Struct(d) => d.span,
        }
    }
}

/// `integer x.` or `struct Point p.`; also used for struct fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub ty: Type,
    pub name: Ident,
    pub span: Span,
}

/// `integer f(integer a, boolean b) { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub return_ty: Type,
    pub name: Ident,
    pub formals: Vec<FormalDecl>,
    pub body: Block,
    pub span: Span,
}

/// One formal parameter. The grammar restricts formals to primitive types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormalDecl {
    pub ty: Type,
    pub name: Ident,
    pub span: Span,
}

/// `struct Point { integer x. integer y. }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub name: Ident,
    pub fields: Vec<VarDecl>,
    pub span: Span,
}

/// A braced body: local declarations first, then statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub decls: Vec<Decl>,
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// A type annotation as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Integer,
    Boolean,
    Void,
    Struct(Ident),
}

impl Type {
    pub fn is_void(&self) -> bool {
        matches!(self.kind, TypeKind::Void)
    }

    /// The name used when this type appears inside a symbol: the primitive
    /// type name, or the bare struct name.
    pub fn label(&self) -> &str {
        match &self.kind {
            TypeKind::Integer => "integer",
            TypeKind::Boolean => "boolean",
            TypeKind::Void => "void",
            TypeKind::Struct(id) => &id.name,
        }
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StmtKind {
    /// `loc = exp.`
    Assign { target: Expr, value: Expr },
    /// `loc++.`
    PostInc(Expr),
    /// `loc--.`
    PostDec(Expr),
    /// `if (exp) { ... }` with an optional `else { ... }`
    If { cond: Expr, then_block: Block, else_block: Option<Block> },
    /// `while (exp) { ... }`
    While { cond: Expr, body: Block },
    /// `input -> loc.`
    Read(Expr),
    /// `disp <- (exp).`
    Write(Expr),
    /// `f(args).`
    Call(CallExpr),
    /// `return.` or `return exp.`
    Return(Option<Expr>),
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    True,
    False,
    IntLit(i64),
    /// Raw literal text, quotes included.
    StrLit(String),
    Ident(Ident),
    /// `base:field`
    StructAccess { base: Box<Expr>, field: Ident },
    /// `target = value` in expression position
    Assign { target: Box<Expr>, value: Box<Expr> },
    Call(CallExpr),
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
}

/// `callee(args)`; callees are bare identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    pub callee: Ident,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-exp`
    Neg,
    /// `^exp`
    Not,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "^",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "^=",
            BinaryOp::Less => "<",
            BinaryOp::LessEq => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
        }
    }
}
