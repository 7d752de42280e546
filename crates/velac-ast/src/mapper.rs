//! Value-producing AST traversal.
//!
//! A `Mapper` rebuilds the tree, possibly changing node shape along the
//! way -- the expression annotator wraps every `Expression` in a
//! `Typed(TypedExpression)`, and the instantiator replaces every
//! `TypeExpression` with `Instantiated(..)`. Every method defaults to
//! "reconstruct this node with its children mapped"; a pass overrides only
//! the node kinds whose shape it changes.

use crate::decl::{
    Declaration, EnumTypeDeclaration, Field, FunctionDeclaration, NewTypeDeclaration, Param,
    StructTypeDeclaration, UnionTypeDeclaration, UnionVariant, UnionVariantData,
    VariableDeclaration,
};
use crate::expr::{BinaryExpr, CallExpr, Expression, TypedExpression, UnaryExpr};
use crate::program::Program;
use crate::stmt::{
    BreakStatement, ContinueStatement, ExpressionStatement, IfStatement, LoopStatement,
    ReturnStatement, Statement,
};
use crate::ty_expr::{
    ArrayTypeExpression, NamedTypeExpression, SliceTypeExpression, TupleTypeExpression,
    TypeExpression,
};

pub trait Mapper {
    fn map_program(&mut self, program: Program) -> Program {
        map_program_default(self, program)
    }

    fn map_declaration(&mut self, decl: Declaration) -> Declaration {
        map_declaration_default(self, decl)
    }

    fn map_function(&mut self, f: FunctionDeclaration) -> FunctionDeclaration {
        map_function_default(self, f)
    }

    fn map_statement(&mut self, stmt: Statement) -> Statement {
        map_statement_default(self, stmt)
    }

    fn map_expression(&mut self, expr: Expression) -> Expression {
        map_expression_default(self, expr)
    }

    fn map_type_expression(&mut self, ty: TypeExpression) -> TypeExpression {
        map_type_expression_default(self, ty)
    }
}

pub fn map_program_default<M: Mapper + ?Sized>(mapper: &mut M, program: Program) -> Program {
    let declarations = program.declarations.into_iter().map(|d| mapper.map_declaration(d)).collect();
    Program { declarations, span: program.span }
}

pub fn map_declaration_default<M: Mapper + ?Sized>(mapper: &mut M, decl: Declaration) -> Declaration {
    match decl {
        Declaration::Variable(v) => Declaration::Variable(VariableDeclaration {
            type_expr: mapper.map_type_expression(v.type_expr),
            initializer: mapper.map_expression(v.initializer),
            ..v
        }),
        Declaration::Function(f) => Declaration::Function(mapper.map_function(f)),
        Declaration::NewType(n) => Declaration::NewType(NewTypeDeclaration {
            inner_type: mapper.map_type_expression(n.inner_type),
            ..n
        }),
        Declaration::StructType(s) => Declaration::StructType(StructTypeDeclaration {
            fields: s.fields.into_iter().map(|f| map_field(mapper, f)).collect(),
            ..s
        }),
        Declaration::UnionType(u) => Declaration::UnionType(UnionTypeDeclaration {
            variants: u.variants.into_iter().map(|v| map_union_variant(mapper, v)).collect(),
            ..u
        }),
        Declaration::EnumType(e) => Declaration::EnumType(EnumTypeDeclaration { ..e }),
    }
}

fn map_field<M: Mapper + ?Sized>(mapper: &mut M, field: Field) -> Field {
    Field { type_expr: mapper.map_type_expression(field.type_expr), ..field }
}

fn map_union_variant<M: Mapper + ?Sized>(mapper: &mut M, variant: UnionVariant) -> UnionVariant {
    let data = match variant.data {
        UnionVariantData::Symbol => UnionVariantData::Symbol,
        UnionVariantData::Tuple(elems) => {
            UnionVariantData::Tuple(elems.into_iter().map(|t| mapper.map_type_expression(t)).collect())
        }
        UnionVariantData::Struct(fields) => {
            UnionVariantData::Struct(fields.into_iter().map(|f| map_field(mapper, f)).collect())
        }
    };
    UnionVariant { data, ..variant }
}

pub fn map_function_default<M: Mapper + ?Sized>(mapper: &mut M, f: FunctionDeclaration) -> FunctionDeclaration {
    FunctionDeclaration {
        parameters: f
            .parameters
            .into_iter()
            .map(|p| Param { type_expr: mapper.map_type_expression(p.type_expr), ..p })
            .collect(),
        return_type: mapper.map_type_expression(f.return_type),
        body: f.body.into_iter().map(|s| mapper.map_statement(s)).collect(),
        ..f
    }
}

pub fn map_statement_default<M: Mapper + ?Sized>(mapper: &mut M, stmt: Statement) -> Statement {
    match stmt {
        Statement::Expression(s) => Statement::Expression(ExpressionStatement {
            expr: mapper.map_expression(s.expr),
            span: s.span,
        }),
        Statement::Return(s) => Statement::Return(ReturnStatement {
            value: s.value.map(|v| mapper.map_expression(v)),
            span: s.span,
        }),
        Statement::Break(s) => Statement::Break(BreakStatement { ..s }),
        Statement::Continue(s) => Statement::Continue(ContinueStatement { ..s }),
        Statement::Declaration(d) => Statement::Declaration(mapper.map_declaration(d)),
        Statement::Loop(l) => Statement::Loop(LoopStatement {
            body: l.body.into_iter().map(|s| mapper.map_statement(s)).collect(),
            ..l
        }),
        Statement::If(i) => Statement::If(IfStatement {
            condition: mapper.map_expression(i.condition),
            then_branch: i.then_branch.into_iter().map(|s| mapper.map_statement(s)).collect(),
            else_branch: i
                .else_branch
                .map(|branch| branch.into_iter().map(|s| mapper.map_statement(s)).collect()),
            span: i.span,
        }),
    }
}

pub fn map_expression_default<M: Mapper + ?Sized>(mapper: &mut M, expr: Expression) -> Expression {
    match expr {
        Expression::Identifier(_)
        | Expression::IntegerLiteral(_)
        | Expression::FloatLiteral(_)
        | Expression::StringLiteral(_) => expr,
        Expression::Binary(b) => Expression::Binary(BinaryExpr {
            left: Box::new(mapper.map_expression(*b.left)),
            right: Box::new(mapper.map_expression(*b.right)),
            ..b
        }),
        Expression::Unary(u) => {
            Expression::Unary(UnaryExpr { operand: Box::new(mapper.map_expression(*u.operand)), ..u })
        }
        Expression::Call(c) => Expression::Call(CallExpr {
            target: Box::new(mapper.map_expression(*c.target)),
            arguments: c.arguments.into_iter().map(|a| mapper.map_expression(a)).collect(),
            ..c
        }),
        Expression::Typed(t) => Expression::Typed(TypedExpression {
            value: Box::new(mapper.map_expression(*t.value)),
            ..t
        }),
    }
}

pub fn map_type_expression_default<M: Mapper + ?Sized>(mapper: &mut M, ty: TypeExpression) -> TypeExpression {
    match ty {
        TypeExpression::Named(n) => TypeExpression::Named(NamedTypeExpression {
            generic_arguments: n.generic_arguments.into_iter().map(|a| mapper.map_type_expression(a)).collect(),
            ..n
        }),
        TypeExpression::Tuple(t) => TypeExpression::Tuple(TupleTypeExpression {
            elements: t.elements.into_iter().map(|e| mapper.map_type_expression(e)).collect(),
            ..t
        }),
        TypeExpression::Array(a) => TypeExpression::Array(ArrayTypeExpression {
            element: Box::new(mapper.map_type_expression(*a.element)),
            ..a
        }),
        TypeExpression::Slice(s) => TypeExpression::Slice(SliceTypeExpression {
            element: Box::new(mapper.map_type_expression(*s.element)),
            ..s
        }),
        TypeExpression::Instantiated(_) => ty,
    }
}
