//! The single typed failure surface every pass raises into. All four kinds
//! are fatal: the first one raised aborts the pipeline with no partial
//! result and no recovery (see the pipeline's `Result`-chained `compile`).

use thiserror::Error;
use velac_util::Span;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    /// Structural violation that does not require type information:
    /// misplaced `return`/`break`/`continue`, an invalid assignment
    /// target, a binding redeclared in its own scope.
    #[error("syntax error: {message}")]
    Syntax { message: String, span: Span },

    /// An identifier, type name, or type variable could not be resolved.
    #[error("reference error: {message}")]
    Reference { message: String, span: Span },

    /// Arity mismatch, assignability failure, non-numeric operand,
    /// field/index on the wrong kind, a duplicate name, an invalid
    /// numeric size.
    #[error("type error: {message}")]
    Type { message: String, span: Span },

    /// A deliberately-unsupported feature, e.g. walking the body of a
    /// generic function before it has been specialized.
    #[error("not implemented: {message}")]
    NotImplemented { message: String, span: Span },
}

impl CompileError {
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        CompileError::Syntax { message: message.into(), span }
    }

    pub fn reference(message: impl Into<String>, span: Span) -> Self {
        CompileError::Reference { message: message.into(), span }
    }

    pub fn ty(message: impl Into<String>, span: Span) -> Self {
        CompileError::Type { message: message.into(), span }
    }

    pub fn not_implemented(message: impl Into<String>, span: Span) -> Self {
        CompileError::NotImplemented { message: message.into(), span }
    }

    pub fn span(&self) -> Span {
        match self {
            CompileError::Syntax { span, .. }
            | CompileError::Reference { span, .. }
            | CompileError::Type { span, .. }
            | CompileError::NotImplemented { span, .. } => *span,
        }
    }
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;
