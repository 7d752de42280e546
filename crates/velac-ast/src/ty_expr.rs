//! AST-level type expressions, as written by a programmer: `Name`,
//! `Name<T1,T2>`, `(T1, T2)`, `T[N]`, `T[]`. These carry no resolved
//! [`crate::types::Type`] until the instantiator replaces them with
//! [`InstantiatedTypeExpression`].

use crate::types::Type;
use velac_util::{Span, Symbol};

#[derive(Clone, Debug, PartialEq)]
pub enum TypeExpression {
    Named(NamedTypeExpression),
    Tuple(TupleTypeExpression),
    Array(ArrayTypeExpression),
    Slice(SliceTypeExpression),
    Instantiated(InstantiatedTypeExpression),
}

impl TypeExpression {
    pub fn span(&self) -> Span {
        match self {
            TypeExpression::Named(n) => n.span,
            TypeExpression::Tuple(t) => t.span,
            TypeExpression::Array(a) => a.span,
            TypeExpression::Slice(s) => s.span,
            TypeExpression::Instantiated(i) => i.span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeExpression {
    pub name: Symbol,
    pub generic_arguments: Vec<TypeExpression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TupleTypeExpression {
    pub elements: Vec<TypeExpression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayTypeExpression {
    pub element: Box<TypeExpression>,
    pub length: u64,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SliceTypeExpression {
    pub element: Box<TypeExpression>,
    pub span: Span,
}

/// Produced only by the instantiator: a type expression whose payload has
/// been fully resolved to a concrete (or template) [`Type`].
#[derive(Clone, Debug, PartialEq)]
pub struct InstantiatedTypeExpression {
    pub ty: Type,
    pub span: Span,
}
