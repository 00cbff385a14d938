//! syntax highlighting functions

use std::{fmt::Write, io};

use ansi_term::{Colour, Style};

use crate::{
    lex::{Kind, Token},
    Error, Source,
};

/// The terminal style used for tokens of a given kind.
pub fn style_for_kind(kind: Kind) -> Style {
    match kind {
        Kind::Comment => Style::new().fg(Colour::Yellow).dimmed(),
        Kind::HexNumber | Kind::Decimal => Style::new().fg(Colour::Green),
        Kind::MonoQuote | Kind::TriQuote => Style::new().fg(Colour::Green).italic(),
        Kind::Identifier => Style::new().fg(Colour::Purple),
        Kind::Operator => Style::new().fg(Colour::Cyan),
        Kind::Open | Kind::Close | Kind::Comma => Style::new().fg(Colour::Blue).bold(),
        Kind::Terminator | Kind::Eof => Style::new(),
    }
}

/// Write the text of `source`, styling each token.
///
/// `tokens` should be the result of lexing `source`; text between tokens is
/// written unstyled.
pub fn write_highlighted(
    writer: &mut impl io::Write,
    source: &Source,
    tokens: &[Token],
) -> io::Result<()> {
    let text = source.text();
    let mut pos = 0;
    for token in tokens {
        let range = token.range.clone();
        write!(writer, "{}", text.get(pos..range.start).unwrap_or_default())?;
        let lexeme = text.get(range.clone()).unwrap_or_default();
        write!(writer, "{}", style_for_kind(token.kind).paint(lexeme))?;
        pos = pos.max(range.end);
    }
    write!(writer, "{}", text.get(pos..).unwrap_or_default())
}

//FIXME: get from terminal?
const MAX_PRINT_WIDTH: usize = 100;

/// Given an error and its source, write a fancy error message.
pub(crate) fn write_diagnostic(
    writer: &mut impl Write,
    err: &Error,
    source: &Source,
    line_width: Option<usize>,
    colorize: bool,
) -> std::fmt::Result {
    let red = if colorize {
        Colour::Red.bold()
    } else {
        Style::new()
    };
    let Some(span) = err.range() else {
        return writeln!(writer, "{}: {err}", red.paint("error"));
    };

    let (line_n, col) = source.line_col_for_offset(span.start);
    writeln!(
        writer,
        "{}:{line_n}:{}: {}: {err}",
        source.path().display(),
        col + 1,
        red.paint("error")
    )?;

    let line_width = line_width.unwrap_or(MAX_PRINT_WIDTH);
    let (line_n, text) = source.line_containing_offset(span.start);
    let line_start = source.offset_for_line_number(line_n).unwrap_or_default();
    let err_start = (span.start - line_start).min(text.len());
    // a span can run past the end of its first line
    let err_end = span
        .end
        .saturating_sub(line_start)
        .clamp(err_start, text.len());

    // if a line is really long, we clip it
    let trim_start = if text.len() > line_width {
        const SLOP: usize = 10; // buffer before start of error when clipping
        let max_trim = text.len() - line_width;
        floor_char_boundary(text, err_start.saturating_sub(SLOP).min(max_trim))
    } else {
        0
    };
    let trim_end = floor_char_boundary(text, (trim_start + line_width).min(text.len()));
    let ellipsis = if trim_start == 0 { "" } else { "..." };

    let n_digits = decimal_digits(line_n);
    writeln!(writer, "{line_n} | {ellipsis}{}", &text[trim_start..trim_end])?;

    // use the whitespace at the front of the line first, so that
    // we don't replace tabs with spaces
    let before = &text[trim_start..err_start];
    let line_ws = before.bytes().take_while(u8::is_ascii_whitespace).count();
    let n_spaces = before[line_ws..].chars().count() + ellipsis.len();
    let n_carets = text[err_start..err_end].chars().count().max(1);
    writeln!(
        writer,
        "{:n_digits$} | {}{:n_spaces$}{}",
        "",
        &before[..line_ws],
        "",
        red.paint("^".repeat(n_carets)),
    )
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

pub(crate) fn decimal_digits(n: usize) -> usize {
    n.checked_ilog10().unwrap_or(0) as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lex::tokenize, parse::parse};

    fn render(source: &Source, err: &Error, width: Option<usize>) -> String {
        let mut s = String::new();
        write_diagnostic(&mut s, err, source, width, false).unwrap();
        s
    }

    #[test]
    fn caret_under_parse_error() {
        let source = Source::from_text("test.io", "x := 1\nf(a, b\n");
        let tokens = tokenize(source.text()).unwrap();
        let err = Error::from(parse(&tokens).unwrap_err());
        let expected = concat!(
            "test.io:3:1: error: unbalanced parens: expected CLOSE, found EOF\n",
            "3 | \n",
            "  | ^\n",
        );
        assert_eq!(render(&source, &err, None), expected);
    }

    #[test]
    fn caret_under_lex_error() {
        let source = Source::from_text("test.io", "ok\n\tfoo ` bar\n");
        let err = Error::from(tokenize(source.text()).unwrap_err());
        let expected = "\
test.io:2:6: error: unrecognized character '`'
2 | \tfoo ` bar
  | \t    ^
";
        assert_eq!(render(&source, &err, None), expected);
    }

    #[test]
    fn caret_covers_opening_quotes() {
        let source = Source::from_text("test.io", "a \"\"\"never\nclosed");
        let err = Error::from(tokenize(source.text()).unwrap_err());
        let out = render(&source, &err, None);
        assert!(out.ends_with("1 | a \"\"\"never\n  |   ^^^\n"), "{out}");
    }

    #[test]
    fn long_lines_are_clipped() {
        let text = format!("{} `", "a".repeat(60));
        let source = Source::from_text("long.io", text.as_str());
        let err = Error::from(tokenize(source.text()).unwrap_err());
        let out = render(&source, &err, Some(20));
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines[1], format!("1 | ...{} `", "a".repeat(18)));
        assert_eq!(lines[2], format!("  | {}^", " ".repeat(3 + 19)));
    }

    #[test]
    fn highlighting_preserves_text() {
        let text = "f(\"a\\\"b\") # note\n  x := 0x1f\n";
        let source = Source::from_text("hl.io", text);
        let tokens = tokenize(text).unwrap();
        let mut out = Vec::new();
        write_highlighted(&mut out, &source, &tokens).unwrap();
        let out = String::from_utf8(out).unwrap();
        let plain = strip_ansi(&out);
        assert_eq!(plain, text);
        assert!(out.len() > text.len());
    }

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                chars.by_ref().find(|c| *c == 'm');
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn digits() {
        assert_eq!(decimal_digits(1), 1);
        assert_eq!(decimal_digits(9), 1);
        assert_eq!(decimal_digits(10), 2);
        assert_eq!(decimal_digits(999), 3);
        assert_eq!(decimal_digits(1000), 4);
    }
}
