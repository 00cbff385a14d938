//! Check that a token stream forms valid messages.
//!
//! This is a recognizer: it accepts or rejects its input, and builds no tree.
//! Parsing stops at the first error.

pub mod grammar;
mod parser;

use std::ops::Range;

use crate::lex::{LexError, Lexer, Token, TokenSet};

pub use parser::{Parser, TokenComparable, MAX_NESTING};

/// An error encountered while parsing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A bracket was missing, or appeared where it was not allowed.
    #[error("unbalanced parens: expected {expected}, found {found}")]
    UnbalancedParens {
        /// What would have been accepted.
        expected: TokenSet,
        /// What was actually there.
        found: Token,
        /// The index of `found` in the token stream.
        position: usize,
    },
    /// Any other token in the wrong place.
    #[error("unexpected {found}, expected {expected}")]
    Unexpected {
        /// What would have been accepted.
        expected: TokenSet,
        /// What was actually there.
        found: Token,
        /// The index of `found` in the token stream.
        position: usize,
    },
    /// Arguments were nested deeper than [`MAX_NESTING`].
    #[error("arguments nested more than {limit} deep")]
    NestingTooDeep {
        /// The nesting limit.
        limit: usize,
        /// The token that would have opened the next level.
        found: Token,
        /// The index of `found` in the token stream.
        position: usize,
    },
    /// The token stream contained a lexical error.
    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    /// The token the parser stopped at, if this is not a lexical error.
    pub fn found(&self) -> Option<&Token> {
        match self {
            ParseError::UnbalancedParens { found, .. }
            | ParseError::Unexpected { found, .. }
            | ParseError::NestingTooDeep { found, .. } => Some(found),
            ParseError::Lex(_) => None,
        }
    }

    /// The range of source text to highlight when reporting this error.
    pub fn range(&self) -> Range<usize> {
        match self {
            ParseError::Lex(err) => err.range(),
            _ => self.found().map(|t| t.range.clone()).unwrap_or_default(),
        }
    }
}

/// Parse a complete sequence of tokens.
pub fn parse(tokens: &[Token]) -> Result<(), ParseError> {
    let mut parser = Parser::new(tokens.iter().cloned().map(Ok::<_, LexError>))?;
    grammar::root(&mut parser)
}

/// Lex and parse `text` in a single pass.
pub fn parse_src(text: &str) -> Result<(), ParseError> {
    let mut parser = Parser::new(Lexer::new(text))?;
    let result = grammar::root(&mut parser);
    match &result {
        Ok(()) => log::debug!("accepted {} tokens", parser.position().saturating_sub(1)),
        Err(e) => log::debug!("rejected: {e}"),
    }
    result
}
