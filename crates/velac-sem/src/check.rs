//! The type checker: the final pass, walking the fully instantiated AST
//! (every `Expression` is `Typed`, every `TypeExpression` is
//! `Instantiated`) and verifying assignment compatibility at returns,
//! variable initializers, and call sites.

use velac_ast::decl::{Declaration, FunctionDeclaration, VariableDeclaration};
use velac_ast::expr::{CallExpr, Expression};
use velac_ast::program::Program;
use velac_ast::stmt::{ReturnStatement, Statement};
use velac_ast::ty_expr::TypeExpression;
use velac_ast::types::Type;
use velac_ast::visitor::{walk_declaration, walk_expression, walk_function, walk_statement, Visitor};
use velac_util::Symbol;

use crate::error::{CompileError, CompileResult};

fn instantiated_ty(type_expr: &TypeExpression) -> &Type {
    match type_expr {
        TypeExpression::Instantiated(i) => &i.ty,
        _ => unreachable!("type checker invariant: every TypeExpression has been instantiated"),
    }
}

fn expr_ty(expr: &Expression) -> &Type {
    match expr {
        Expression::Typed(t) => &t.ty,
        _ => unreachable!("type checker invariant: every Expression has been annotated"),
    }
}

fn function_label(name: Option<Symbol>) -> String {
    name.map(|s| s.to_string()).unwrap_or_else(|| "<anonymous>".to_string())
}

struct Checker {
    /// `(function name, return type)` for each enclosing function. Holding
    /// the return type by value rather than borrowing the declaration keeps
    /// this struct free of AST lifetimes, matching how the other passes in
    /// this crate carry their own small bit of derived state.
    function_stack: Vec<(Option<Symbol>, Type)>,
    error: Option<CompileError>,
}

impl Checker {
    fn fail(&mut self, error: CompileError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn current_return_type(&self) -> &Type {
        &self.function_stack.last().expect("a return statement always appears inside a function body").1
    }

    fn check_return(&mut self, r: &ReturnStatement) {
        let expected = self.current_return_type().clone();
        match &r.value {
            Some(value) => {
                let actual = expr_ty(value);
                if *actual != expected {
                    self.fail(CompileError::ty(
                        format!("returned value of type '{actual:?}' is not assignable to '{expected:?}'"),
                        r.span,
                    ));
                }
            }
            None => {
                if expected != Type::Void {
                    self.fail(CompileError::ty(format!("cannot return void from a function that returns '{expected:?}'"), r.span));
                }
            }
        }
    }

    fn check_variable(&mut self, v: &VariableDeclaration) {
        let declared = instantiated_ty(&v.type_expr);
        let actual = expr_ty(&v.initializer);
        if actual != declared {
            self.fail(CompileError::ty(
                format!("cannot assign expression of type '{actual:?}' to variable '{}' of type '{declared:?}'", v.name),
                v.span,
            ));
        }
    }

    fn check_call(&mut self, c: &CallExpr) {
        let Type::Function(function) = expr_ty(&c.target) else {
            // A non-function call target was already rejected by the
            // annotator; nothing further to check here.
            return;
        };

        if c.arguments.len() != function.parameters.len() {
            self.fail(CompileError::ty(
                format!(
                    "expected {} argument(s) to '{}', got {}",
                    function.parameters.len(),
                    function_label(function.name),
                    c.arguments.len()
                ),
                c.span,
            ));
            return;
        }

        for (i, (arg, (_, param_ty))) in c.arguments.iter().zip(function.parameters.iter()).enumerate() {
            let arg_ty = expr_ty(arg);
            if arg_ty != param_ty {
                self.fail(CompileError::ty(
                    format!(
                        "cannot pass expression of type '{arg_ty:?}' as argument {} of '{}', expected '{param_ty:?}'",
                        i + 1,
                        function_label(function.name)
                    ),
                    c.span,
                ));
            }
        }
    }
}

impl Visitor for Checker {
    fn visit_function(&mut self, f: &FunctionDeclaration) {
        if self.error.is_some() {
            return;
        }
        if !f.generic_parameters.is_empty() {
            self.fail(CompileError::not_implemented(
                format!("walking the body of generic function '{}' before it is specialized at a call site", f.name),
                f.span,
            ));
            return;
        }
        let return_type = instantiated_ty(&f.return_type).clone();
        self.function_stack.push((Some(f.name), return_type));
        walk_function(self, f);
        self.function_stack.pop();
    }

    fn visit_declaration(&mut self, decl: &Declaration) {
        if self.error.is_some() {
            return;
        }
        if let Declaration::Variable(v) = decl {
            self.check_variable(v);
        }
        walk_declaration(self, decl);
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        if self.error.is_some() {
            return;
        }
        if let Statement::Return(r) = stmt {
            self.check_return(r);
        }
        walk_statement(self, stmt);
    }

    fn visit_expression(&mut self, expr: &Expression) {
        if self.error.is_some() {
            return;
        }
        if let Expression::Call(c) = expr {
            self.check_call(c);
        }
        walk_expression(self, expr);
    }
}

pub fn check_types(program: &Program) -> CompileResult<()> {
    let mut checker = Checker { function_stack: Vec::new(), error: None };
    checker.visit_program(program);
    match checker.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
