//! A cursor over a stream of tokens

use std::fmt::Display;

use crate::lex::{Kind, LexError, Token, TokenSet};

use super::ParseError;

/// The deepest argument nesting we will recurse into.
pub const MAX_NESTING: usize = 256;

/// A parsing context.
///
/// This type wraps a source of tokens and exposes an API for inspecting and
/// consuming them one at a time. It does not implement the parsing *logic*;
/// that is driven by the functions in the [`grammar`] module.
///
/// The parser has exactly one token of lookahead, the [`current`] token. Once
/// the underlying stream is exhausted, the current token is an end-of-input
/// sentinel (`Kind::Eof`), and advancing further is a no-op.
///
/// [`grammar`]: super::grammar
/// [`current`]: Parser::current
pub struct Parser<I> {
    tokens: I,
    current: Token,
    position: usize,
    exhausted: bool,
    depth: usize,
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    /// Create a new parser, loading the first token.
    ///
    /// This fails if the first item in the stream is a lexical error.
    pub fn new(tokens: impl IntoIterator<IntoIter = I>) -> Result<Self, ParseError> {
        let mut this = Parser {
            tokens: tokens.into_iter(),
            current: Token::eof(0),
            position: 0,
            exhausted: false,
            depth: 0,
        };
        this.advance()?;
        Ok(this)
    }

    /// The current (not yet consumed) token.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// The 1-based index of the current token in the stream.
    ///
    /// At end of input this is one past the last real token.
    pub fn position(&self) -> usize {
        self.position
    }

    /// `true` if the token stream is exhausted.
    pub fn at_eof(&self) -> bool {
        self.current.is_eof()
    }

    /// `true` if the current token matches.
    pub fn matches(&self, token: impl TokenComparable) -> bool {
        token.matches(self.current.kind)
    }

    /// Consume the current token if it matches.
    ///
    /// Returns `true` if a token was consumed. This only fails if pulling the
    /// next token hits a lexical error.
    pub fn accept(&mut self, token: impl TokenComparable) -> Result<bool, ParseError> {
        if !self.matches(token) {
            return Ok(false);
        }
        log::debug!("accepted {} at {}", self.current, self.position);
        self.advance()?;
        Ok(true)
    }

    /// Consume the current token, or fail if it does not match.
    pub fn expect(&mut self, token: impl TokenComparable) -> Result<(), ParseError> {
        if self.accept(token)? {
            return Ok(());
        }
        Err(self.unexpected(token))
    }

    /// Consume the current token, whatever it is.
    pub(crate) fn bump(&mut self) -> Result<(), ParseError> {
        self.advance()
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        if self.exhausted {
            return Ok(());
        }
        self.position += 1;
        self.current = match self.tokens.next() {
            Some(token) => token?,
            None => {
                self.exhausted = true;
                Token::eof(self.current.range.end)
            }
        };
        log::trace!("{} {}", self.position, self.current);
        Ok(())
    }

    /// Run `f` one level deeper in the argument nesting.
    pub(crate) fn nested<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, ParseError>,
    ) -> Result<R, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING,
                found: self.current.clone(),
                position: self.position,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Build the error for finding the current token where `expected` should be.
    pub(crate) fn unexpected(&self, expected: impl TokenComparable) -> ParseError {
        let expected: TokenSet = expected.into();
        let found = self.current.clone();
        let position = self.position;
        log::debug!("expected {expected}, found {found} at {position}");
        if expected.intersects(TokenSet::BRACKETS) || TokenSet::BRACKETS.contains(found.kind) {
            ParseError::UnbalancedParens {
                expected,
                found,
                position,
            }
        } else {
            ParseError::Unexpected {
                expected,
                found,
                position,
            }
        }
    }
}

/// Something a token kind can be checked against: a single `Kind`, or a
/// `TokenSet`.
pub trait TokenComparable: Copy + Display + Into<TokenSet> {
    /// `true` if `kind` is (or is a member of) `self`.
    fn matches(&self, kind: Kind) -> bool;
}

impl TokenComparable for Kind {
    fn matches(&self, kind: Kind) -> bool {
        self == &kind
    }
}

impl TokenComparable for TokenSet {
    fn matches(&self, kind: Kind) -> bool {
        self.contains(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::Lexer;

    #[test]
    fn cursor() {
        let mut parser = Parser::new(Lexer::new("a + b")).unwrap();
        assert_eq!(parser.position(), 1);
        assert_eq!(parser.current().text, "a");
        assert!(!parser.accept(Kind::Operator).unwrap());
        assert!(parser.accept(TokenSet::SYMBOL).unwrap());
        assert!(parser.matches(Kind::Operator));
        parser.expect(Kind::Operator).unwrap();
        parser.expect(Kind::Identifier).unwrap();
        assert!(parser.at_eof());
        assert_eq!(parser.position(), 4);
        assert_eq!(parser.current().range, 5..5);
    }

    #[test]
    fn eof_is_sticky() {
        let mut parser = Parser::new(Lexer::new("")).unwrap();
        assert!(parser.at_eof());
        assert_eq!(parser.position(), 1);
        parser.bump().unwrap();
        parser.expect(Kind::Eof).unwrap();
        assert!(parser.at_eof());
        assert_eq!(parser.position(), 1);
    }

    #[test]
    fn expect_reports_what_it_found() {
        let mut parser = Parser::new(Lexer::new("x, y")).unwrap();
        parser.bump().unwrap();
        let err = parser.expect(Kind::Eof).unwrap_err();
        match err {
            ParseError::Unexpected {
                expected,
                found,
                position,
            } => {
                assert_eq!(expected, TokenSet::from(Kind::Eof));
                assert_eq!(found.kind, Kind::Comma);
                assert_eq!(found.range, 1..2);
                assert_eq!(position, 2);
            }
            other => panic!("wrong error {other:?}"),
        }
    }

    #[test]
    fn brackets_are_unbalanced_parens() {
        let mut parser = Parser::new(Lexer::new(")")).unwrap();
        let err = parser.expect(Kind::Eof).unwrap_err();
        assert!(matches!(err, ParseError::UnbalancedParens { .. }), "{err:?}");

        let mut parser = Parser::new(Lexer::new("a")).unwrap();
        let err = parser.expect(Kind::Close).unwrap_err();
        assert!(matches!(err, ParseError::UnbalancedParens { .. }), "{err:?}");
    }

    #[test]
    fn lex_errors_surface_on_advance() {
        assert!(matches!(
            Parser::new(Lexer::new("`")),
            Err(ParseError::Lex(LexError::UnrecognizedCharacter { .. }))
        ));
        let mut parser = Parser::new(Lexer::new("a `")).unwrap();
        let err = parser.bump().unwrap_err();
        assert_eq!(
            err,
            ParseError::Lex(LexError::UnrecognizedCharacter { ch: '`', offset: 2 })
        );
    }
}
