//! Shared primitives for the Vela compiler front end: symbol interning,
//! source spans, diagnostics, definition identifiers, and a typed index
//! vector. Every other crate in this workspace depends on this one and
//! nothing else flows the other way.

pub mod def_id;
pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use def_id::{DefId, DefIdGenerator};
pub use diagnostic::{Diagnostic, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
pub use symbol::Symbol;
