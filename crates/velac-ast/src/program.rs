use crate::decl::Declaration;
use velac_util::Span;

/// A whole program: an ordered sequence of top-level declarations.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub span: Span,
}

impl Program {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        let span = declarations.first().map_or(Span::DUMMY, |first| {
            declarations.last().map_or(first.span(), |last| first.span().to(last.span()))
        });
        Program { declarations, span }
    }
}
