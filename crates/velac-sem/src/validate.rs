//! The semantic validator: the first pass, checking structural
//! constraints that don't require any type information. Walks the AST
//! tracking two depth counters, incremented on entry to a function or
//! loop and decremented on exit; `return` outside any function and
//! `break`/`continue` outside any loop are syntax errors. Returns the
//! AST unchanged on success.

use velac_ast::decl::FunctionDeclaration;
use velac_ast::program::Program;
use velac_ast::stmt::Statement;
use velac_ast::visitor::{walk_function, walk_statement, Visitor};

use crate::error::{CompileError, CompileResult};

struct Validator {
    function_depth: u32,
    loop_depth: u32,
    error: Option<CompileError>,
}

impl Validator {
    fn new() -> Self {
        Validator { function_depth: 0, loop_depth: 0, error: None }
    }

    fn fail(&mut self, error: CompileError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

impl Visitor for Validator {
    fn visit_function(&mut self, f: &FunctionDeclaration) {
        if self.error.is_some() {
            return;
        }
        self.function_depth += 1;
        walk_function(self, f);
        self.function_depth -= 1;
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        if self.error.is_some() {
            return;
        }
        match stmt {
            Statement::Return(r) if self.function_depth == 0 => {
                self.fail(CompileError::syntax("return outside of function", r.span));
            }
            Statement::Break(b) if self.loop_depth == 0 => {
                self.fail(CompileError::syntax("break outside of loop", b.span));
            }
            Statement::Continue(c) if self.loop_depth == 0 => {
                self.fail(CompileError::syntax("continue outside of loop", c.span));
            }
            Statement::Loop(_) => {
                self.loop_depth += 1;
                walk_statement(self, stmt);
                self.loop_depth -= 1;
            }
            _ => walk_statement(self, stmt),
        }
    }
}

pub fn validate_semantics(program: Program) -> CompileResult<Program> {
    let mut validator = Validator::new();
    validator.visit_program(&program);
    match validator.error {
        Some(error) => Err(error),
        None => Ok(program),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velac_ast::decl::Declaration;
    use velac_ast::stmt::{BreakStatement, ContinueStatement, LoopStatement, ReturnStatement};
    use velac_ast::ty_expr::{NamedTypeExpression, TypeExpression};
    use velac_util::{Span, Symbol};

    fn void_type() -> TypeExpression {
        TypeExpression::Named(NamedTypeExpression { name: Symbol::intern("void"), generic_arguments: vec![], span: Span::DUMMY })
    }

    fn function_with_body(body: Vec<Statement>) -> Program {
        Program::new(vec![Declaration::Function(FunctionDeclaration {
            name: Symbol::intern("f"),
            generic_parameters: vec![],
            parameters: vec![],
            return_type: void_type(),
            body,
            span: Span::DUMMY,
        })])
    }

    #[test]
    fn return_inside_function_is_fine() {
        let program = function_with_body(vec![Statement::Return(ReturnStatement { value: None, span: Span::DUMMY })]);
        assert!(validate_semantics(program).is_ok());
    }

    #[test]
    fn top_level_return_is_a_syntax_error() {
        let program = Program::new(vec![]);
        // a bare top-level return can't be expressed via Declaration, so
        // validate directly against a synthetic program with a free statement
        let mut validator = Validator::new();
        validator.visit_statement(&Statement::Return(ReturnStatement { value: None, span: Span::DUMMY }));
        assert!(matches!(validator.error, Some(CompileError::Syntax { .. })));
        let _ = program;
    }

    #[test]
    fn break_outside_loop_is_a_syntax_error() {
        let program = function_with_body(vec![Statement::Break(BreakStatement { label: None, span: Span::DUMMY })]);
        let err = validate_semantics(program).unwrap_err();
        assert!(matches!(err, CompileError::Syntax { .. }));
    }

    #[test]
    fn continue_inside_loop_inside_function_is_fine() {
        let program = function_with_body(vec![Statement::Loop(LoopStatement {
            label: None,
            body: vec![Statement::Continue(ContinueStatement { label: None, span: Span::DUMMY })],
            span: Span::DUMMY,
        })]);
        assert!(validate_semantics(program).is_ok());
    }

    #[test]
    fn continue_after_loop_exits_is_a_syntax_error() {
        let program = function_with_body(vec![
            Statement::Loop(LoopStatement { label: None, body: vec![], span: Span::DUMMY }),
            Statement::Continue(ContinueStatement { label: None, span: Span::DUMMY }),
        ]);
        let err = validate_semantics(program).unwrap_err();
        assert!(matches!(err, CompileError::Syntax { .. }));
    }
}
