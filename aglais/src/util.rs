//! helpers for printing tokens and errors

pub(crate) mod highlighting;

use std::io;

use crate::{lex::Token, Error, Source};

pub use highlighting::{style_for_kind, write_highlighted};

/// Generate a string suitable for presenting an [`Error`] to the user.
///
/// This associates the message with its location in `source`, and draws
/// carets under the offending text.
pub fn format_error(source: &Source, err: &Error, colorize: bool) -> String {
    let mut s = String::new();
    // writing to a String cannot fail
    let _ = highlighting::write_diagnostic(&mut s, err, source, None, colorize);
    s
}

/// Write one line per token: its byte range, kind and text.
pub fn write_tokens(writer: &mut impl io::Write, tokens: &[Token]) -> io::Result<()> {
    for token in tokens {
        writeln!(writer, "{}..{} {token}", token.range.start, token.range.end)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::tokenize;

    #[test]
    fn token_listing() {
        let tokens = tokenize("x := \"y\"\n").unwrap();
        let mut out = Vec::new();
        write_tokens(&mut out, &tokens).unwrap();
        let expected = concat!(
            "0..1 ID(x)\n",
            "2..3 OP(:)\n",
            "3..4 OP(=)\n",
            "5..8 STR(\"y\")\n",
            "8..9 TERM(\"\\n\")\n",
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn load_errors_have_no_location() {
        let source = Source::from_text("x.io", "");
        let err = Error::from(crate::source::SourceLoadError::new("x.io".into(), "gone"));
        let out = format_error(&source, &err, false);
        assert_eq!(out, "error: Failed to load source at 'x.io': 'gone'\n");
    }
}
