//! A bitset of token kinds
//!
//! This follows the design used in rust-analyzer.

use super::Kind;

/// A bit-set of `Kind`s
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenSet(u16);

impl TokenSet {
    /// Tokens that can begin a message.
    ///
    /// `Terminator` is included, so a bare newline in message position is a
    /// (degenerate) message.
    pub const SYMBOL: TokenSet = TokenSet::new(&[
        Kind::Identifier,
        Kind::HexNumber,
        Kind::Decimal,
        Kind::Operator,
        Kind::MonoQuote,
        Kind::TriQuote,
        Kind::Terminator,
    ]);

    /// Tokens that separate messages without otherwise affecting the parse.
    pub const TRANSPARENT: TokenSet = TokenSet::new(&[Kind::Terminator, Kind::Comment]);

    /// Tokens that may follow an `Open`.
    pub const ARGUMENT_START: TokenSet = TokenSet::SYMBOL.add(Kind::Close);

    /// Opening and closing brackets.
    pub const BRACKETS: TokenSet = TokenSet::new(&[Kind::Open, Kind::Close]);

    /// Build a set from a list of kinds.
    pub const fn new(kinds: &[Kind]) -> TokenSet {
        let mut res = 0u16;
        let mut i = 0;
        while i < kinds.len() {
            res |= mask(kinds[i]);
            i += 1
        }
        TokenSet(res)
    }

    /// This set, with `token` added.
    pub const fn add(self, token: Kind) -> TokenSet {
        TokenSet(self.0 | mask(token))
    }

    /// `true` if `kind` is a member of this set.
    pub const fn contains(&self, kind: Kind) -> bool {
        self.0 & mask(kind) != 0
    }

    /// `true` if this set and `other` share a member.
    pub const fn intersects(&self, other: TokenSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Iterate the members of this set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Kind> {
        ALL_KINDS.into_iter().filter(move |kind| self.contains(*kind))
    }
}

const fn mask(kind: Kind) -> u16 {
    1u16 << (kind as usize)
}

const ALL_KINDS: [Kind; 12] = [
    Kind::Eof,
    Kind::Identifier,
    Kind::Operator,
    Kind::MonoQuote,
    Kind::TriQuote,
    Kind::Terminator,
    Kind::Comment,
    Kind::HexNumber,
    Kind::Decimal,
    Kind::Comma,
    Kind::Open,
    Kind::Close,
];

impl From<Kind> for TokenSet {
    fn from(src: Kind) -> TokenSet {
        TokenSet::new(&[src])
    }
}

impl std::fmt::Display for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.0.count_ones() == 0 {
            return write!(f, "no tokens");
        }

        let mut first = true;
        for kind in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}", kind)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
