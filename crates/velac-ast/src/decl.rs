//! Top-level declarations.

use crate::stmt::Statement;
use crate::ty_expr::TypeExpression;
use velac_util::{Span, Symbol};

#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
    Variable(VariableDeclaration),
    Function(FunctionDeclaration),
    NewType(NewTypeDeclaration),
    StructType(StructTypeDeclaration),
    UnionType(UnionTypeDeclaration),
    EnumType(EnumTypeDeclaration),
}

impl Declaration {
    pub fn span(&self) -> Span {
        match self {
            Declaration::Variable(d) => d.span,
            Declaration::Function(d) => d.span,
            Declaration::NewType(d) => d.span,
            Declaration::StructType(d) => d.span,
            Declaration::UnionType(d) => d.span,
            Declaration::EnumType(d) => d.span,
        }
    }

    pub fn name(&self) -> Symbol {
        match self {
            Declaration::Variable(d) => d.name,
            Declaration::Function(d) => d.name,
            Declaration::NewType(d) => d.name,
            Declaration::StructType(d) => d.name,
            Declaration::UnionType(d) => d.name,
            Declaration::EnumType(d) => d.name,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclaration {
    pub name: Symbol,
    pub type_expr: TypeExpression,
    pub initializer: crate::expr::Expression,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Symbol,
    pub type_expr: TypeExpression,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Symbol,
    pub generic_parameters: Vec<Symbol>,
    pub parameters: Vec<Param>,
    pub return_type: TypeExpression,
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTypeDeclaration {
    pub name: Symbol,
    pub generic_parameters: Vec<Symbol>,
    pub inner_type: TypeExpression,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: Symbol,
    pub type_expr: TypeExpression,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructTypeDeclaration {
    pub name: Symbol,
    pub generic_parameters: Vec<Symbol>,
    pub fields: Vec<Field>,
    pub span: Span,
}

/// Union variants come in three shapes: a bare symbol, an ordered tuple
/// of element types, or named fields.
#[derive(Clone, Debug, PartialEq)]
pub enum UnionVariantData {
    Symbol,
    Tuple(Vec<TypeExpression>),
    Struct(Vec<Field>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionVariant {
    pub name: Symbol,
    pub data: UnionVariantData,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDeclaration {
    pub name: Symbol,
    pub generic_parameters: Vec<Symbol>,
    pub variants: Vec<UnionVariant>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDeclaration {
    pub name: Symbol,
    pub variants: Vec<Symbol>,
    pub span: Span,
}
