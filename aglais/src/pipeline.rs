//! Lexing and parsing on separate threads.
//!
//! The lexer runs on a worker thread and streams tokens to the parser over a
//! bounded channel. The parser owns the receiving end; when it finishes,
//! accepting or rejecting, it drops the receiver, and a lexer blocked on a
//! full channel wakes up and exits.

use crossbeam_channel::{Receiver, Sender};

use crate::{
    lex::{LexError, Lexer, Token},
    parse::{grammar, ParseError, Parser},
};

/// The default number of tokens that can be in flight between the threads.
pub const DEFAULT_CAPACITY: usize = 64;

type Item = Result<Token, LexError>;

/// Check `text`, lexing on a worker thread.
///
/// `capacity` bounds the number of tokens buffered between the lexer and the
/// parser; `0` means every token is handed over directly.
///
/// The result is always the same as [`parse_src`][crate::parse::parse_src].
pub fn check_pipelined(text: &str, capacity: usize) -> Result<(), ParseError> {
    let (send, recv) = crossbeam_channel::bounded(capacity);
    std::thread::scope(|scope| {
        scope.spawn(move || produce(text, send));
        consume(recv)
    })
}

fn produce(text: &str, send: Sender<Item>) {
    let mut sent = 0usize;
    for item in Lexer::new(text) {
        if send.send(item).is_err() {
            log::debug!("parser hung up after {sent} tokens");
            return;
        }
        sent += 1;
    }
    log::debug!("lexer finished after {sent} items");
}

fn consume(recv: Receiver<Item>) -> Result<(), ParseError> {
    let mut parser = Parser::new(recv)?;
    let result = grammar::root(&mut parser);
    log::debug!(
        "parser finished at token {}: {}",
        parser.position(),
        if result.is_ok() { "accepted" } else { "rejected" }
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_src;
    use rstest::rstest;

    static SAMPLES: &[&str] = &[
        "",
        "Account := Object clone do(balance := 0 ; deposit := method(v, balance = balance + v))",
        "for(i, 1, 100, if(i % 15 == 0) then(\"FizzBuzz\" println))",
        "f(a",
        "a, b",
        "x := \"\"\"unterminated",
        "f(x) ` g",
        "list(1, 2, 3) map(x, x * 2)",
    ];

    #[rstest]
    #[case::rendezvous(0)]
    #[case::single(1)]
    #[case::default(DEFAULT_CAPACITY)]
    fn same_result_as_single_threaded(#[case] capacity: usize) {
        let _ = env_logger::builder().is_test(true).try_init();
        for src in SAMPLES {
            assert_eq!(check_pipelined(src, capacity), parse_src(src), "{src:?}");
        }
    }

    #[test]
    fn early_rejection_does_not_stall_the_lexer() {
        // the lexer has far more tokens to send than the channel can hold
        let src = format!(")\n{}", "a b c\n".repeat(100_000));
        let err = check_pipelined(&src, 1).unwrap_err();
        assert!(matches!(err, ParseError::UnbalancedParens { .. }), "{err:?}");
    }

    #[test]
    fn lex_errors_cross_the_channel() {
        let err = check_pipelined("foo(bar) é", DEFAULT_CAPACITY).unwrap_err();
        assert_eq!(
            err,
            ParseError::Lex(LexError::UnrecognizedCharacter { ch: 'é', offset: 9 })
        );
    }
}
