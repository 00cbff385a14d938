//! Tokenizing and recognizing a small Io-like message passing language.
//!
//! Checking a program happens in two stages: the [`lex`] module turns text
//! into [`Token`]s, and the [`parse`] module checks that those tokens form a
//! valid sequence of messages. The two stages can run back to back, lazily
//! in a single pass ([`parse_src`]), or on separate threads
//! ([`pipeline::check_pipelined`]).

#![deny(missing_docs)]

mod error;
pub mod lex;
pub mod parse;
pub mod pipeline;
mod source;
pub mod util;

#[cfg(test)]
mod tests;

use std::path::Path;

pub use error::Error;
pub use lex::{tokenize, Kind, LexError, Token, TokenSet};
pub use parse::{parse, parse_src, ParseError};
pub use source::{Source, SourceLoadError};

/// Load the file at `path` and check that it is a valid program.
pub fn check_file(path: impl AsRef<Path>) -> Result<(), Error> {
    let source = Source::load(path)?;
    parse_src(source.text())?;
    Ok(())
}
