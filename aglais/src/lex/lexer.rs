use smol_str::SmolStr;

use super::{Kind, LexError, Token};

const EOF: u8 = 0x0;

/// Scans source text into [`Token`]s.
///
/// The lexer is an iterator; each call to `next` runs the state machine until
/// exactly one token has been produced. Whitespace that does not form a
/// terminator is skipped silently.
///
/// Errors are fatal: after yielding an `Err` the iterator is exhausted.
pub struct Lexer<'a> {
    input: &'a str,
    // the start of the lexeme currently being scanned
    start: usize,
    pos: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over `input`.
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            start: 0,
            pos: 0,
            failed: false,
        }
    }

    fn nth_byte(&self, index: usize) -> u8 {
        self.input
            .as_bytes()
            .get(self.pos + index)
            .copied()
            .unwrap_or(EOF)
    }

    fn bump(&mut self) -> Option<u8> {
        let pos = self.pos;
        let next = self.input.as_bytes().get(pos).copied();
        self.pos += usize::from(next.is_some());
        next
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn lexeme(&self) -> &'a str {
        &self.input[self.start..self.pos]
    }

    fn emit(&self, kind: Kind) -> Token {
        Token::new(kind, self.lexeme(), self.start..self.pos)
    }

    pub(crate) fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            self.start = self.pos;
            let Some(first) = self.bump() else {
                return Ok(None);
            };
            let kind = match first {
                b'0' if self.at_hex_prefix() => self.hex(),
                b'0'..=b'9' | b'.' => self.decimal(),
                b'_' | b'a'..=b'z' | b'A'..=b'Z' => self.identifier(),
                b'"' | b'\'' => return self.quote(first).map(Some),
                b'#' => return Ok(Some(self.line_comment())),
                b'/' if self.nth_byte(0) == b'/' => return Ok(Some(self.line_comment())),
                b'/' if self.nth_byte(0) == b'*' => self.block_comment()?,
                b'\n' => Kind::Terminator,
                // a '\r' can start a run of separators but not continue one
                byte if byte == b'\r' || is_separator(byte) => match self.separators() {
                    Some(kind) => kind,
                    None => continue,
                },
                b',' => Kind::Comma,
                b'(' | b'[' | b'{' => Kind::Open,
                b')' | b']' | b'}' => Kind::Close,
                byte if is_operator(byte) => Kind::Operator,
                _ => return Err(self.unrecognized()),
            };
            return Ok(Some(self.emit(kind)));
        }
    }

    // just after a '0': `x` or `X`, then at least one hex digit
    fn at_hex_prefix(&self) -> bool {
        matches!(self.nth_byte(0), b'x' | b'X') && is_hex_digit(self.nth_byte(1))
    }

    fn hex(&mut self) -> Kind {
        // the 'x'
        self.bump();
        while is_hex_digit(self.nth_byte(0)) {
            self.bump();
        }
        Kind::HexNumber
    }

    fn decimal(&mut self) -> Kind {
        while is_decimal_byte(self.nth_byte(0)) {
            self.bump();
        }
        Kind::Decimal
    }

    /// Identifiers made only of decimal characters (`e`, `e5`) are numbers.
    fn identifier(&mut self) -> Kind {
        while is_ident_byte(self.nth_byte(0)) {
            self.bump();
        }
        if self.lexeme().bytes().all(is_decimal_byte) {
            return self.decimal();
        }
        Kind::Identifier
    }

    /// A run of separators becomes a terminator if it is longer than one
    /// byte or ends in a `;`. Returns `None` if the run should be skipped.
    fn separators(&mut self) -> Option<Kind> {
        while is_separator(self.nth_byte(0)) {
            self.bump();
        }
        if self.nth_byte(0) == b';' {
            self.bump();
            return Some(Kind::Terminator);
        }
        (self.pos - self.start > 1).then_some(Kind::Terminator)
    }

    /// `#` and `//` comments; the trailing newline is consumed but is not
    /// part of the token.
    fn line_comment(&mut self) -> Token {
        while !self.at_eof() && self.nth_byte(0) != b'\n' {
            self.bump();
        }
        let token = self.emit(Kind::Comment);
        if self.nth_byte(0) == b'\n' {
            self.bump();
        }
        token
    }

    fn block_comment(&mut self) -> Result<Kind, LexError> {
        // the '*'
        self.bump();
        loop {
            match self.bump() {
                None => return Err(self.fail(LexError::UnterminatedComment { offset: self.start })),
                Some(b'*') if self.nth_byte(0) == b'/' => {
                    self.bump();
                    return Ok(Kind::Comment);
                }
                Some(_) => (),
            }
        }
    }

    fn quote(&mut self, delim: u8) -> Result<Token, LexError> {
        if delim == b'"' && self.nth_byte(0) == b'"' && self.nth_byte(1) == b'"' {
            return self.triple_quote();
        }

        // first pass: find the end of the literal and any backslashes to drop.
        let mut dropped = Vec::new();
        while let Some(byte) = self.bump() {
            match byte {
                b'\\' => self.escape(&mut dropped),
                _ if byte == delim => break,
                _ => (),
            }
        }
        Ok(self.finish_quote(Kind::MonoQuote, dropped))
    }

    /// Closed by exactly the first unescaped `"""` after the opening delimiter.
    fn triple_quote(&mut self) -> Result<Token, LexError> {
        // the remaining two opening quotes
        self.bump();
        self.bump();
        let mut dropped = Vec::new();
        loop {
            match self.bump() {
                Some(b'\\') => self.escape(&mut dropped),
                Some(b'"') if self.nth_byte(0) == b'"' && self.nth_byte(1) == b'"' => {
                    self.bump();
                    self.bump();
                    return Ok(self.finish_quote(Kind::TriQuote, dropped));
                }
                Some(b'"') | None => {
                    return Err(self.fail(LexError::MissingEndQuotes { offset: self.start }))
                }
                Some(_) => (),
            }
        }
    }

    /// Called just after a `\` inside a literal; skips the escaped byte.
    fn escape(&mut self, dropped: &mut Vec<usize>) {
        if self.at_eof() {
            return;
        }
        if !is_control_escape(self.nth_byte(0)) {
            dropped.push(self.pos - 1);
        }
        self.bump();
    }

    // second pass: build the text without the dropped backslashes
    fn finish_quote(&self, kind: Kind, dropped: Vec<usize>) -> Token {
        if dropped.is_empty() {
            return self.emit(kind);
        }
        let mut text = String::with_capacity(self.pos - self.start - dropped.len());
        let mut copied_to = self.start;
        for backslash in dropped {
            text.push_str(&self.input[copied_to..backslash]);
            copied_to = backslash + 1;
        }
        text.push_str(&self.input[copied_to..self.pos]);
        Token::new(kind, SmolStr::from(text), self.start..self.pos)
    }

    fn unrecognized(&mut self) -> LexError {
        let ch = self.input[self.start..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        self.fail(LexError::UnrecognizedCharacter {
            ch,
            offset: self.start,
        })
    }

    fn fail(&mut self, error: LexError) -> LexError {
        self.failed = true;
        error
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => {
                log::trace!("{}..{} {}", token.range.start, token.range.end, token);
                Some(Ok(token))
            }
            Ok(None) => None,
            Err(e) => {
                log::debug!("lexing failed: {e}");
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

// [: ~ ! @ $ % ^ & * - + = | \ < > ?]
fn is_operator(byte: u8) -> bool {
    matches!(
        byte,
        b':' | b'~'
            | b'!'
            | b'@'
            | b'$'
            | b'%'
            | b'^'
            | b'&'
            | b'*'
            | b'-'
            | b'+'
            | b'='
            | b'|'
            | b'\\'
            | b'<'
            | b'>'
            | b'?'
    )
}

fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | 0x0C | b'\t' | 0x0B)
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn is_decimal_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || matches!(byte, b'.' | b'-' | b'e')
}

fn is_hex_digit(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'a'..=b'f')
}

// \n \f \t \r \v stay in the literal as written
fn is_control_escape(byte: u8) -> bool {
    matches!(byte, b'n' | b'f' | b't' | b'r' | b'v')
}

#[cfg(test)]
pub(crate) fn debug_tokens(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| format!("{}..{} {}", token.range.start, token.range.end, token.kind))
        .collect()
}

#[cfg(test)]
pub(crate) fn debug_tokens2(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(|token| token.to_string()).collect()
}
