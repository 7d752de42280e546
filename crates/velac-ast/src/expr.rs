//! Expression nodes.

use crate::types::Type;
use velac_util::{Span, Symbol};

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Identifier(IdentifierExpr),
    IntegerLiteral(IntegerLiteralExpr),
    FloatLiteral(FloatLiteralExpr),
    StringLiteral(StringLiteralExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
    /// Produced only by the annotator: wraps any of the above with its
    /// inferred type.
    Typed(TypedExpression),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier(e) => e.span,
            Expression::IntegerLiteral(e) => e.span,
            Expression::FloatLiteral(e) => e.span,
            Expression::StringLiteral(e) => e.span,
            Expression::Binary(e) => e.span,
            Expression::Unary(e) => e.span,
            Expression::Call(e) => e.span,
            Expression::Typed(e) => e.span,
        }
    }

    /// `true` for the lvalue shapes the checker permits on the left of
    /// `assign`: an identifier, `expr.field`/`expr[index]`, or `*expr`.
    pub fn is_lvalue_shape(&self) -> bool {
        match self {
            Expression::Identifier(_) => true,
            Expression::Binary(b) => matches!(b.op, BinOp::Index | BinOp::Field),
            Expression::Unary(u) => matches!(u.op, UnOp::Deref),
            Expression::Typed(t) => t.value.is_lvalue_shape(),
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IdentifierExpr {
    pub name: Symbol,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntegerLiteralExpr {
    pub value: i64,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatLiteralExpr {
    pub value: f64,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StringLiteralExpr {
    pub value: Vec<u8>,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Assign,
    Plus,
    Minus,
    Times,
    Divide,
    /// `lhs[rhs]`; `rhs` is the subscript expression.
    Index,
    /// `lhs.rhs`; `rhs` is an `Identifier` naming the field, not an
    /// expression evaluated in scope.
    Field,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    Negate,
    Deref,
    Ref,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expression>,
    pub op: BinOp,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpr {
    pub op: UnOp,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    pub target: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypedExpression {
    pub value: Box<Expression>,
    pub ty: Type,
    pub span: Span,
}
