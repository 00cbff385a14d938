use std::ops::Range;

use smol_str::SmolStr;

/// A classified span of source text.
///
/// `text` is exactly what the lexer consumed for this token, except that
/// quoted literals have their escape backslashes removed. `range` always
/// refers to the source text, backslashes included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The kind of this token.
    pub kind: Kind,
    /// The text of this token.
    pub text: SmolStr,
    /// The byte range in the source this token was scanned from.
    pub range: Range<usize>,
}

/// Kinds of tokens assigned during lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Kind {
    /// The end of the input stream.
    ///
    /// This is never produced by the lexer; the parser reports it once the
    /// token stream is exhausted.
    Eof,
    /// A name: letters, digits and underscores.
    Identifier,
    /// A single punctuation character such as `:` or `+`.
    Operator,
    /// A string delimited by a single `"` or `'`.
    MonoQuote,
    /// A string delimited by `"""`.
    TriQuote,
    /// A statement separator: a newline, a `;`, or a run of separators.
    Terminator,
    /// A `#`, `//` or `/* */` comment.
    Comment,
    /// A `0x` prefixed number.
    HexNumber,
    /// Any other number, including exponents.
    Decimal,
    /// `,`
    Comma,
    /// One of `(`, `[` or `{`.
    Open,
    /// One of `)`, `]` or `}`.
    Close,
}

impl Token {
    pub(crate) fn new(kind: Kind, text: impl Into<SmolStr>, range: Range<usize>) -> Self {
        Token {
            kind,
            text: text.into(),
            range,
        }
    }

    /// The end-of-stream sentinel, positioned at `offset`.
    pub(crate) fn eof(offset: usize) -> Self {
        Token::new(Kind::Eof, "", offset..offset)
    }

    /// `true` if this is the end-of-stream sentinel.
    pub fn is_eof(&self) -> bool {
        self.kind == Kind::Eof
    }
}

impl Kind {
    /// `true` if this kind can begin a message.
    pub fn is_symbol(self) -> bool {
        super::TokenSet::SYMBOL.contains(self)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind {
            Kind::Eof => write!(f, "EOF"),
            // newlines would mangle single line error messages
            Kind::Terminator => write!(f, "{}({:?})", self.kind, self.text.as_str()),
            _ => write!(f, "{}({})", self.kind, self.text),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Eof => write!(f, "EOF"),
            Self::Identifier => write!(f, "ID"),
            Self::Operator => write!(f, "OP"),
            Self::MonoQuote => write!(f, "STR"),
            Self::TriQuote => write!(f, "STR3"),
            Self::Terminator => write!(f, "TERM"),
            Self::Comment => write!(f, "#"),
            Self::HexNumber => write!(f, "HEX"),
            Self::Decimal => write!(f, "DEC"),
            Self::Comma => write!(f, ","),
            Self::Open => write!(f, "OPEN"),
            Self::Close => write!(f, "CLOSE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_escapes_terminators() {
        let token = Token::new(Kind::Terminator, "\n", 3..4);
        assert_eq!(token.to_string(), "TERM(\"\\n\")");
        let token = Token::new(Kind::Identifier, "setSlot", 0..7);
        assert_eq!(token.to_string(), "ID(setSlot)");
        assert_eq!(Token::eof(12).to_string(), "EOF");
    }

    #[test]
    fn symbols() {
        assert!(Kind::Identifier.is_symbol());
        assert!(Kind::Terminator.is_symbol());
        assert!(Kind::TriQuote.is_symbol());
        assert!(!Kind::Comment.is_symbol());
        assert!(!Kind::Open.is_symbol());
        assert!(!Kind::Eof.is_symbol());
    }
}
