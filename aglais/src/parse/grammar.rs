//! The recursive descent rules.
//!
//! ```text
//! program    ::= expression EOF
//! expression ::= { symbol [ arguments ] | Terminator | Comment }*
//! arguments  ::= Open Close
//!              | Open expression { Comma expression } Close
//! ```

use crate::lex::{Kind, LexError, Token, TokenSet};

use super::{ParseError, Parser};

/// Entry point: a whole program.
pub fn root<I>(parser: &mut Parser<I>) -> Result<(), ParseError>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    expression(parser)?;
    parser.expect(Kind::Eof)
}

/// A (possibly empty) sequence of messages.
///
/// Stops at the first token that cannot continue the expression, without
/// consuming it.
pub fn expression<I>(parser: &mut Parser<I>) -> Result<(), ParseError>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    loop {
        if parser.accept(TokenSet::SYMBOL)? {
            if parser.matches(Kind::Open) {
                arguments(parser)?;
            }
        } else if !parser.accept(TokenSet::TRANSPARENT)? {
            return Ok(());
        }
    }
}

/// A bracketed, comma separated argument list.
pub fn arguments<I>(parser: &mut Parser<I>) -> Result<(), ParseError>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    parser.nested(|parser| {
        parser.expect(Kind::Open)?;
        if parser.accept(Kind::Close)? {
            return Ok(());
        }
        if !parser.matches(TokenSet::SYMBOL) {
            return Err(parser.unexpected(TokenSet::ARGUMENT_START));
        }
        expression(parser)?;
        while parser.accept(Kind::Comma)? {
            expression(parser)?;
        }
        parser.expect(Kind::Close)
    })
}
