use std::io;

use thiserror::Error;

use crate::{lex::LexError, parse::ParseError, source::SourceLoadError};

/// Any error encountered while checking a source file.
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be read.
    #[error(transparent)]
    Load(#[from] SourceLoadError),
    /// The text could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The tokens are not a valid program.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Output could not be written.
    #[error("failed to write to stdout or stderr: '{0}'")]
    StdioWriteFail(#[source] io::Error),
}

impl Error {
    /// The range in the source to highlight, if the error has a location.
    pub fn range(&self) -> Option<std::ops::Range<usize>> {
        match self {
            Error::Load(_) | Error::StdioWriteFail(_) => None,
            Error::Lex(err) => Some(err.range()),
            Error::Parse(err) => Some(err.range()),
        }
    }
}
