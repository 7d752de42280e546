//! The AST produced by the (out-of-scope) parser, plus the type IR every
//! later pass resolves against. These live in one crate because the AST's
//! own `TypeExpression::Instantiated` and `Expression::Typed` variants
//! carry a [`types::Type`] payload directly -- splitting type
//! representation out to the semantic-analysis crate would make this
//! crate depend on its own downstream consumer.

pub mod decl;
pub mod expr;
pub mod mapper;
pub mod program;
pub mod stmt;
pub mod ty_expr;
pub mod types;
pub mod visitor;

pub use decl::*;
pub use expr::*;
pub use mapper::Mapper;
pub use program::Program;
pub use stmt::*;
pub use ty_expr::*;
pub use types::Type;
pub use visitor::Visitor;
