//! Semantic analysis: takes the parser's AST and runs it through the
//! pipeline that turns it into a program whose every expression carries an
//! inferred type and whose every type expression has been resolved to a
//! concrete member of the type IR.
//!
//! The five passes run in a fixed order, each consuming the previous pass's
//! `Program` and failing the whole pipeline on its first error (see
//! [`error::CompileError`]):
//!
//! 1. [`validate::validate_semantics`] -- structural checks that need no
//!    type information.
//! 2. [`resolve::resolve_declared_types`] -- builds the name -> type table
//!    every later pass resolves against.
//! 3. [`annotate::annotate_expressions`] -- wraps every expression in its
//!    inferred type.
//! 4. [`instantiate::instantiate_type_expressions`] -- resolves every
//!    surface type expression to a concrete, fully substituted type.
//! 5. [`check::check_types`] -- verifies assignability at returns,
//!    variable initializers, and call sites.
//!
//! [`verify::verify`] is not part of this list: it validates a bare
//! [`velac_ast::Type`] directly and is invoked by the instantiator on every
//! concrete type it produces, rather than as a pipeline stage of its own.

pub mod annotate;
pub mod check;
pub mod error;
pub mod instantiate;
pub mod lower;
pub mod primitives;
pub mod resolve;
pub mod scope;
pub mod validate;
pub mod verify;

pub use error::{CompileError, CompileResult};
pub use resolve::DeclaredTypes;

use velac_ast::program::Program;

/// The output of a complete, successful run of the pipeline: a program
/// whose expressions and type expressions are fully resolved, alongside
/// the declared-type table used to resolve them.
#[derive(Debug)]
pub struct CheckedProgram {
    pub program: Program,
    pub declared_types: DeclaredTypes,
}

/// Runs the full semantic-analysis pipeline over a parser-produced AST,
/// short-circuiting on the first pass to return an error.
pub fn compile(program: Program) -> CompileResult<CheckedProgram> {
    let program = validate::validate_semantics(program)?;
    let declared_types = resolve::resolve_declared_types(&program)?;
    let program = annotate::annotate_expressions(program, &declared_types)?;
    let program = instantiate::instantiate_type_expressions(program, &declared_types)?;
    check::check_types(&program)?;
    Ok(CheckedProgram { program, declared_types })
}
