//! Lexical scopes: a stack, not a tree. Each function gets one scope
//! pushed on entry and popped on exit; nothing else in this pipeline
//! introduces a scope (loop and conditional bodies pass through
//! transparently, per the design notes on control flow).
//!
//! Shadowing: an `add_binding` only fails if the name is already bound in
//! the *current* (innermost) scope -- a name from an enclosing scope may
//! be shadowed. This is the semantics the reference scope implementation
//! this pipeline was modeled on uses; the alternative (forbidding
//! redeclaration anywhere on the visible stack) was considered and
//! rejected, see `DESIGN.md`.

use indexmap::IndexMap;
use velac_ast::Type;
use velac_util::{Span, Symbol};

use crate::error::CompileError;

/// A single insertion-ordered identifier -> type binding set.
#[derive(Default)]
pub struct Scope {
    bindings: IndexMap<Symbol, Type>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(bindings: impl IntoIterator<Item = (Symbol, Type)>) -> Self {
        Scope { bindings: bindings.into_iter().collect() }
    }

    pub fn get(&self, name: Symbol) -> Option<&Type> {
        self.bindings.get(&name)
    }
}

/// A stack of [`Scope`]s. Lookup walks from innermost to outermost.
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    /// The root scope is seeded from the declared-type table so that
    /// top-level names (and primitives) resolve as identifiers too.
    pub fn new(root: Scope) -> Self {
        ScopeStack { scopes: vec![root] }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
        debug_assert!(!self.scopes.is_empty(), "popped the root scope");
    }

    /// Binds `name` in the current (innermost) scope. Fails if `name` is
    /// already bound in that same scope.
    pub fn add_binding(&mut self, name: Symbol, ty: Type, span: Span) -> Result<(), CompileError> {
        let current = self.scopes.last_mut().expect("scope stack is never empty");
        if current.bindings.contains_key(&name) {
            return Err(CompileError::syntax(format!("redeclaration of binding '{name}'"), span));
        }
        current.bindings.insert(name, ty);
        Ok(())
    }

    /// Walks from innermost to outermost scope looking for `name`.
    pub fn resolve(&self, name: Symbol) -> Option<&Type> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velac_ast::Type;

    fn sym(s: &str) -> Symbol {
        Symbol::intern(s)
    }

    #[test]
    fn resolves_through_nested_scopes() {
        let mut stack = ScopeStack::new(Scope::seeded([(sym("x"), Type::Bool)]));
        stack.push_scope();
        assert_eq!(stack.resolve(sym("x")), Some(&Type::Bool));
    }

    #[test]
    fn inner_scope_may_shadow_outer_binding() {
        let mut stack = ScopeStack::new(Scope::seeded([(sym("x"), Type::Bool)]));
        stack.push_scope();
        stack.add_binding(sym("x"), Type::Void, Span::DUMMY).expect("shadowing across scopes is allowed");
        assert_eq!(stack.resolve(sym("x")), Some(&Type::Void));
    }

    #[test]
    fn same_scope_redeclaration_is_an_error() {
        let mut stack = ScopeStack::new(Scope::new());
        stack.add_binding(sym("x"), Type::Bool, Span::DUMMY).unwrap();
        let err = stack.add_binding(sym("x"), Type::Void, Span::DUMMY).unwrap_err();
        assert!(matches!(err, CompileError::Syntax { .. }));
    }

    #[test]
    fn popping_restores_outer_bindings() {
        let mut stack = ScopeStack::new(Scope::seeded([(sym("x"), Type::Bool)]));
        stack.push_scope();
        stack.add_binding(sym("y"), Type::Void, Span::DUMMY).unwrap();
        stack.pop_scope();
        assert_eq!(stack.resolve(sym("y")), None);
        assert_eq!(stack.resolve(sym("x")), Some(&Type::Bool));
    }

    #[test]
    fn unbound_identifier_resolves_to_none() {
        let stack = ScopeStack::new(Scope::new());
        assert_eq!(stack.resolve(sym("nowhere")), None);
    }
}
