//! Diagnostic rendering.
//!
//! [`crate::Symbol`] and [`crate::Span`] are plumbing; a [`Diagnostic`] is
//! the thing a human actually reads. Passes don't build these directly --
//! they return a typed error (see a crate's own error module) which is
//! converted to a `Diagnostic` at the boundary where it gets reported.

use crate::span::Span;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => f.write_str("error"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic { level: Level::Error, message: message.into(), span: None }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{}: {} (at {}..{})", self.level, self.message, span.start, span.end),
            None => write!(f, "{}: {}", self.level, self.message),
        }
    }
}

/// Collects diagnostics for later reporting.
///
/// The semantic passes abort on the first error rather than accumulating
/// (see each crate's own error type), so in practice a `Handler` here holds
/// at most one diagnostic; it still exists as the single place a driver
/// would print from, rather than having every pass `eprintln!` directly.
#[derive(Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
