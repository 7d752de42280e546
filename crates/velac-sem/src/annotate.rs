//! The expression annotator: wraps every `Expression` subtree in a
//! `TypedExpression` giving its inferred type, driven by a scope stack
//! seeded from the declared-type table.
//!
//! The root scope is seeded with every declared-type entry *except*
//! functions: a `FunctionDeclaration`'s own name is bound explicitly on
//! entry (so it is visible for recursive calls inside its own body,
//! before the parameter scope is pushed), and seeding it twice would trip
//! the same-scope redeclaration check. See `DESIGN.md` for this reading
//! of "seeded from the declared-type table".

use velac_ast::decl::{Declaration, FunctionDeclaration, VariableDeclaration};
use velac_ast::expr::{BinOp, BinaryExpr, CallExpr, Expression, TypedExpression};
use velac_ast::mapper::Mapper;
use velac_ast::program::Program;
use velac_ast::ty_expr::TypeExpression;
use velac_ast::types::{ArrayType, Type};
use velac_util::Span;

use crate::error::{CompileError, CompileResult};
use crate::instantiate::instantiate_type_expression;
use crate::resolve::DeclaredTypes;
use crate::scope::{Scope, ScopeStack};

fn expr_type(expr: &Expression) -> Type {
    match expr {
        Expression::Typed(t) => t.ty.clone(),
        _ => unreachable!("annotator invariant: every mapped sub-expression is wrapped in TypedExpression"),
    }
}

struct Annotator<'a> {
    scopes: ScopeStack,
    declared_types: &'a DeclaredTypes,
    error: Option<CompileError>,
}

impl Annotator<'_> {
    fn fail(&mut self, error: CompileError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Resolves a parameter's or variable's declared `TypeExpression` to a
    /// concrete `Type` the same way the instantiator resolves a
    /// `TypeExpression` node, so the type bound into scope here agrees with
    /// the type `check.rs` later compares it against. Binding the raw,
    /// unresolved output of `lower::generate_type` instead would leave a
    /// `TypeRef` in scope forever, since nothing downstream revisits
    /// `Expression::Typed.ty`.
    fn resolve_declared_type(&mut self, type_expr: &TypeExpression) -> Type {
        match instantiate_type_expression(type_expr.clone(), self.declared_types) {
            Ok(ty) => ty,
            Err(err) => {
                self.fail(err);
                Type::Void
            }
        }
    }

    fn infer_type(&mut self, expr: &Expression, span: Span) -> Type {
        match expr {
            Expression::Typed(t) => t.ty.clone(),
            Expression::Identifier(id) => match self.scopes.resolve(id.name) {
                Some(ty) => ty.clone(),
                None => {
                    self.fail(CompileError::reference(format!("unbound identifier '{}'", id.name), id.span));
                    Type::Void
                }
            },
            Expression::IntegerLiteral(_) => Type::int(64, true),
            Expression::FloatLiteral(_) => Type::float(64),
            Expression::StringLiteral(s) => Type::Array(ArrayType {
                length: s.value.len() as u64,
                element_type: Box::new(Type::int(8, false)),
            }),
            Expression::Binary(b) => self.infer_binary(b, span),
            Expression::Unary(u) => expr_type(&u.operand),
            Expression::Call(c) => self.infer_call(c, span),
        }
    }

    fn infer_binary(&mut self, b: &BinaryExpr, span: Span) -> Type {
        match b.op {
            BinOp::Plus | BinOp::Minus | BinOp::Times | BinOp::Divide => {
                let lhs = expr_type(&b.left);
                let rhs = expr_type(&b.right);
                if lhs != rhs || !lhs.is_numeric() {
                    self.fail(CompileError::ty(
                        format!("operands of a numeric operator must share a numeric type, got {lhs:?} and {rhs:?}"),
                        span,
                    ));
                }
                lhs
            }
            BinOp::Field => {
                let lhs = expr_type(&b.left);
                let field_name = match b.right.as_ref() {
                    Expression::Identifier(id) => id.name,
                    _ => {
                        self.fail(CompileError::syntax("field access requires an identifier on the right", span));
                        return Type::Void;
                    }
                };
                match &lhs {
                    Type::Struct(s) => match s.fields.iter().find(|(name, _)| *name == field_name) {
                        Some((_, ty)) => ty.clone(),
                        None => {
                            self.fail(CompileError::ty(format!("no field '{field_name}' on type '{}'", s.name), span));
                            Type::Void
                        }
                    },
                    _ => {
                        self.fail(CompileError::ty("field access on a non-struct type", span));
                        Type::Void
                    }
                }
            }
            BinOp::Index => {
                let lhs = expr_type(&b.left);
                let rhs = expr_type(&b.right);
                if !matches!(rhs, Type::Int(_)) {
                    self.fail(CompileError::ty("index expression must be an integer", span));
                }
                match lhs {
                    Type::Array(a) => *a.element_type,
                    Type::Slice(s) => *s.element_type,
                    _ => {
                        self.fail(CompileError::ty("indexing requires an array or slice type", span));
                        Type::Void
                    }
                }
            }
            BinOp::Assign => {
                if !b.left.is_lvalue_shape() {
                    self.fail(CompileError::syntax("invalid assignment target", span));
                }
                expr_type(&b.right)
            }
        }
    }

    fn infer_call(&mut self, c: &CallExpr, span: Span) -> Type {
        let target_ty = expr_type(&c.target);
        let function = match &target_ty {
            Type::Function(f) => f.clone(),
            other => {
                self.fail(CompileError::ty(format!("cannot call a value of type '{other:?}'"), span));
                return Type::Void;
            }
        };
        for (i, (arg, (_, param_ty))) in c.arguments.iter().zip(function.parameters.iter()).enumerate() {
            let arg_ty = expr_type(arg);
            if arg_ty != *param_ty {
                let name = function.name.map(|s| s.to_string()).unwrap_or_else(|| "<anonymous>".to_string());
                self.fail(CompileError::ty(
                    format!(
                        "cannot pass expression of type '{arg_ty:?}' as argument {} of '{name}', expected '{param_ty:?}'",
                        i + 1
                    ),
                    span,
                ));
            }
        }
        function.return_type.clone()
    }
}

impl Mapper for Annotator<'_> {
    fn map_expression(&mut self, expr: Expression) -> Expression {
        if self.error.is_some() {
            return expr;
        }
        let span = expr.span();
        let mapped = match expr {
            // `field`'s right operand names a field; it is not an
            // expression evaluated in scope, so it is left untouched.
            Expression::Binary(b) if matches!(b.op, BinOp::Field) => {
                let left = self.map_expression(*b.left);
                Expression::Binary(BinaryExpr { left: Box::new(left), op: b.op, right: b.right, span: b.span })
            }
            other => velac_ast::mapper::map_expression_default(self, other),
        };
        if self.error.is_some() {
            return mapped;
        }
        let ty = self.infer_type(&mapped, span);
        Expression::Typed(TypedExpression { value: Box::new(mapped), ty, span })
    }

    fn map_declaration(&mut self, decl: Declaration) -> Declaration {
        if self.error.is_some() {
            return decl;
        }
        match decl {
            Declaration::Variable(v) => {
                // Annotate the initializer in the current scope before the
                // binding exists, so `let x: T = x;` cannot see itself.
                let initializer = self.map_expression(v.initializer);
                let declared_ty = self.resolve_declared_type(&v.type_expr);
                if let Err(err) = self.scopes.add_binding(v.name, declared_ty, v.span) {
                    self.fail(err);
                }
                Declaration::Variable(VariableDeclaration { initializer, ..v })
            }
            Declaration::Function(f) => Declaration::Function(self.map_function(f)),
            unchanged => unchanged,
        }
    }

    fn map_function(&mut self, f: FunctionDeclaration) -> FunctionDeclaration {
        if self.error.is_some() {
            return f;
        }
        let fn_type = match self.declared_types.get(&f.name) {
            Some(ty @ Type::Function(_)) => ty.clone(),
            _ => {
                self.fail(CompileError::reference(format!("function '{}' was not registered by the resolver", f.name), f.span));
                return f;
            }
        };
        if let Err(err) = self.scopes.add_binding(f.name, fn_type, f.span) {
            self.fail(err);
            return f;
        }

        self.scopes.push_scope();
        for param in &f.parameters {
            let ty = self.resolve_declared_type(&param.type_expr);
            if let Err(err) = self.scopes.add_binding(param.name, ty, param.span) {
                self.fail(err);
            }
        }
        let body = f.body.into_iter().map(|s| self.map_statement(s)).collect();
        self.scopes.pop_scope();

        FunctionDeclaration { body, ..f }
    }
}

pub fn annotate_expressions(program: Program, declared_types: &DeclaredTypes) -> CompileResult<Program> {
    let root = Scope::seeded(
        declared_types
            .iter()
            .filter(|(_, ty)| !matches!(ty, Type::Function(_)))
            .map(|(name, ty)| (*name, ty.clone())),
    );
    let mut annotator = Annotator { scopes: ScopeStack::new(root), declared_types, error: None };
    let mapped = annotator.map_program(program);
    match annotator.error {
        Some(error) => Err(error),
        None => Ok(mapped),
    }
}
