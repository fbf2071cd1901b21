//! User-facing naming errors reported by the analysis pass.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use minim_syntax::line_index::LineIndex;

/// A fatal naming error, positioned at the offending identifier.
///
/// Every variant is recorded and analysis continues; one run reports every
/// independent error it can find.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The same name is declared twice in one scope. The second
    /// declaration is dropped; the first stays in effect.
    #[error("`{name}` is declared more than once in the same scope")]
    #[diagnostic(code(minim_resolve::multiply_declared_name))]
    MultiplyDeclaredName {
        name: String,
        #[label("already declared in this scope")]
        span: SourceSpan,
    },

    /// A variable or formal parameter declared with type `void`.
    #[error("`{name}` is declared with type void")]
    #[diagnostic(code(minim_resolve::void_variable))]
    VoidVariable {
        name: String,
        #[label("only functions may have type void")]
        span: SourceSpan,
    },

    /// The type name of a struct-typed declaration does not resolve to a
    /// struct definition.
    #[error("`{name}` does not name a struct type")]
    #[diagnostic(code(minim_resolve::unknown_struct_type))]
    UnknownStructType {
        name: String,
        #[label("no struct definition with this name is visible")]
        span: SourceSpan,
    },

    /// An identifier occurrence with no visible declaration.
    #[error("`{name}` is not declared")]
    #[diagnostic(code(minim_resolve::undeclared_name))]
    UndeclaredName {
        name: String,
        #[label("no declaration for this name is in scope")]
        span: SourceSpan,
    },

    /// The left side of a `:` access is not a struct-typed variable.
    #[error("left side of `:` is not a value of struct type")]
    #[diagnostic(code(minim_resolve::invalid_struct_access))]
    InvalidStructAccess {
        #[label("not a struct variable")]
        span: SourceSpan,
    },

    /// The right side of a `:` access does not name a field of the
    /// resolved struct.
    #[error("`{name}` is not a field of struct `{struct_name}`")]
    #[diagnostic(code(minim_resolve::unknown_struct_field))]
    UnknownStructField {
        name: String,
        struct_name: String,
        #[label("unknown field")]
        span: SourceSpan,
    },

    /// A call whose target resolves to a non-function symbol.
    #[error("`{name}` is not a function")]
    #[diagnostic(code(minim_resolve::not_a_function))]
    NotAFunction {
        name: String,
        #[label("call target is not a function")]
        span: SourceSpan,
    },
}

impl NameError {
    /// The source span the error is anchored to.
    pub fn span(&self) -> SourceSpan {
        match self {
            NameError::MultiplyDeclaredName { span, .. }
            | NameError::VoidVariable { span, .. }
            | NameError::UnknownStructType { span, .. }
            | NameError::UndeclaredName { span, .. }
            | NameError::InvalidStructAccess { span }
            | NameError::UnknownStructField { span, .. }
            | NameError::NotAFunction { span, .. } => *span,
        }
    }

    /// The 1-based `(line, column)` of the error position.
    pub fn line_col(&self, index: &LineIndex) -> (u32, u32) {
        index.line_col(self.span().offset())
    }
}
