//! Side-effecting AST traversal.
//!
//! A `Visitor` never rebuilds the tree; it walks it for validation or
//! collection. Every method has a default that recurses into children via
//! the matching `walk_*` free function, so a pass only overrides the node
//! kinds it actually cares about (the semantic validator overrides
//! `visit_function` and the loop-bearing statements to track depth
//! counters; everything else falls through to the default walk).

use crate::decl::{Declaration, FunctionDeclaration};
use crate::expr::Expression;
use crate::program::Program;
use crate::stmt::Statement;

pub trait Visitor {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program)
    }

    fn visit_declaration(&mut self, decl: &Declaration) {
        walk_declaration(self, decl)
    }

    fn visit_function(&mut self, f: &FunctionDeclaration) {
        walk_function(self, f)
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt)
    }

    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr)
    }
}

pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, program: &Program) {
    for decl in &program.declarations {
        visitor.visit_declaration(decl);
    }
}

pub fn walk_declaration<V: Visitor + ?Sized>(visitor: &mut V, decl: &Declaration) {
    match decl {
        Declaration::Variable(v) => visitor.visit_expression(&v.initializer),
        Declaration::Function(f) => visitor.visit_function(f),
        Declaration::NewType(_)
        | Declaration::StructType(_)
        | Declaration::UnionType(_)
        | Declaration::EnumType(_) => {}
    }
}

pub fn walk_function<V: Visitor + ?Sized>(visitor: &mut V, f: &FunctionDeclaration) {
    for stmt in &f.body {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Statement) {
    match stmt {
        Statement::Expression(s) => visitor.visit_expression(&s.expr),
        Statement::Return(s) => {
            if let Some(value) = &s.value {
                visitor.visit_expression(value);
            }
        }
        Statement::Break(_) | Statement::Continue(_) => {}
        Statement::Declaration(d) => visitor.visit_declaration(d),
        Statement::Loop(l) => {
            for stmt in &l.body {
                visitor.visit_statement(stmt);
            }
        }
        Statement::If(i) => {
            visitor.visit_expression(&i.condition);
            for stmt in &i.then_branch {
                visitor.visit_statement(stmt);
            }
            if let Some(else_branch) = &i.else_branch {
                for stmt in else_branch {
                    visitor.visit_statement(stmt);
                }
            }
        }
    }
}

pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expression) {
    match expr {
        Expression::Identifier(_)
        | Expression::IntegerLiteral(_)
        | Expression::FloatLiteral(_)
        | Expression::StringLiteral(_) => {}
        Expression::Binary(b) => {
            visitor.visit_expression(&b.left);
            visitor.visit_expression(&b.right);
        }
        Expression::Unary(u) => visitor.visit_expression(&u.operand),
        Expression::Call(c) => {
            visitor.visit_expression(&c.target);
            for arg in &c.arguments {
                visitor.visit_expression(arg);
            }
        }
        Expression::Typed(t) => visitor.visit_expression(&t.value),
    }
}
