//! Error types shared by the utility primitives in this crate.
//!
//! The semantic passes in `velac-sem` define their own `CompileError`; these
//! are narrower errors for misuse of the primitives here (an out-of-bounds
//! `IndexVec` access, say), kept separate so a `velac-sem` caller never needs
//! to match on a variant that could only come from `velac-util` internals.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexVecError {
    #[error("index out of bounds: index {index}, length {length}")]
    OutOfBounds { index: usize, length: usize },
}

pub type IndexVecResult<T> = std::result::Result<T, IndexVecError>;
