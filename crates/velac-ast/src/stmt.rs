//! Statements.
//!
//! `Loop` and `If` are reserved nodes: the language has loop constructs and
//! conditionals at the surface-syntax level, but this pipeline only treats
//! them to the extent they affect `loop_depth` and scope nesting (see the
//! semantic validator). Their bodies pass through scope transparently --
//! no new scope is pushed for them, per the scoping design notes.

use crate::decl::Declaration;
use crate::expr::Expression;
use velac_util::{Span, Symbol};

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Expression(ExpressionStatement),
    Return(ReturnStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Declaration(Declaration),
    Loop(LoopStatement),
    If(IfStatement),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Expression(s) => s.span,
            Statement::Return(s) => s.span,
            Statement::Break(s) => s.span,
            Statement::Continue(s) => s.span,
            Statement::Declaration(d) => d.span(),
            Statement::Loop(s) => s.span,
            Statement::If(s) => s.span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionStatement {
    pub expr: Expression,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BreakStatement {
    pub label: Option<Symbol>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContinueStatement {
    pub label: Option<Symbol>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoopStatement {
    pub label: Option<Symbol>,
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Vec<Statement>,
    pub else_branch: Option<Vec<Statement>>,
    pub span: Span,
}
