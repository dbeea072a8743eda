use std::rc::Rc;

use crate::source::Source;
use crate::token::TokenId;

/// Source-range metadata attached to every AST node, unless parsing was
/// invoked with `no_location`.
///
/// `start == start_token.start` and `end == end_token.end`, per spec.
/// `start_token`/`end_token` are [`TokenId`]s into the [`TokenArena`]
/// produced by the [`Lexer`](crate::Lexer) that parsed this document —
/// tokens outlive the AST nodes derived from them, which is why `Location`
/// only needs to store indices, not owned tokens.
///
/// [`TokenArena`]: crate::TokenArena
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub start: usize,
    pub end: usize,
    pub start_token: TokenId,
    pub end_token: TokenId,
    pub source: Rc<Source>,
}

impl Location {
    pub fn line_column(&self) -> (usize, usize) {
        self.source.get_location(self.start)
    }
}
