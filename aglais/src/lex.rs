//! Scan source text, producing a sequence of tokens.
//!
//! This is the first step in checking a program. The tokens produced here
//! have no structural information; the [`Parser`] decides whether they form
//! valid messages.
//!
//! Tokens can be collected eagerly with [`tokenize`], or pulled lazily from a
//! [`Lexer`], which is an iterator.
//!
//! [`Parser`]: crate::parse::Parser

mod lexer;
mod token;
mod token_set;

use std::ops::Range;

pub use lexer::Lexer;
pub use token::{Kind, Token};
pub use token_set::TokenSet;

/// An error encountered while scanning.
///
/// Lexical errors are fatal; no tokens after the error are produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A character that cannot begin any token.
    #[error("unrecognized character {ch:?}")]
    UnrecognizedCharacter {
        /// The offending character.
        ch: char,
        /// The byte offset of the character.
        offset: usize,
    },
    /// A `"""` string without a matching `"""`.
    #[error("missing end quotes")]
    MissingEndQuotes {
        /// The byte offset of the opening quotes.
        offset: usize,
    },
    /// A `/*` comment without a matching `*/`.
    #[error("unterminated block comment")]
    UnterminatedComment {
        /// The byte offset of the opening `/*`.
        offset: usize,
    },
}

impl LexError {
    /// The byte offset in the source where the error begins.
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnrecognizedCharacter { offset, .. }
            | LexError::MissingEndQuotes { offset }
            | LexError::UnterminatedComment { offset } => *offset,
        }
    }

    /// The range of source text to highlight when reporting this error.
    pub fn range(&self) -> Range<usize> {
        let start = self.offset();
        match self {
            LexError::UnrecognizedCharacter { ch, .. } => start..start + ch.len_utf8(),
            LexError::MissingEndQuotes { .. } => start..start + 3,
            LexError::UnterminatedComment { .. } => start..start + 2,
        }
    }
}

/// Tokenize all of `text`.
///
/// This stops at the first error.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(text).collect::<Result<Vec<_>, _>>()?;
    log::debug!("{} bytes produced {} tokens", text.len(), tokens.len());
    Ok(tokens)
}
