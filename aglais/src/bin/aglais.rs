//! Check that a source file is a valid program.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use aglais::{pipeline, util, Error, Source};
use clap::Parser;

/// Tokenize and check a source file.
///
/// Prints a summary on success. On failure, prints the error with its
/// location and exits with status 1.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The file to check
    path: PathBuf,

    /// Print every token
    #[arg(short, long)]
    tokens: bool,

    /// Print the source, with syntax highlighting
    #[arg(long)]
    highlight: bool,

    /// Lex on a separate thread, streaming tokens to the parser
    #[arg(long)]
    pipeline: bool,

    /// The number of tokens buffered between lexer and parser, with --pipeline
    #[arg(long, default_value_t = pipeline::DEFAULT_CAPACITY)]
    capacity: usize,

    /// Do not use color in error messages
    #[arg(long)]
    no_color: bool,
}

fn main() {
    env_logger::builder()
        .format(|buf, record| {
            let ts = buf.timestamp_micros();
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{}: {:?}: {style}{}{style:#}: {}",
                ts,
                std::thread::current().id(),
                record.level(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    let source = match Source::load(&args.path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    match run(&args, &source) {
        Ok(summary) => println!("{}: {summary}", args.path.display()),
        Err(e) => {
            eprint!("{}", util::format_error(&source, &e, !args.no_color));
            std::process::exit(1);
        }
    }
}

fn run(args: &Args, source: &Source) -> Result<String, Error> {
    let text = source.text();
    if args.tokens || args.highlight {
        let tokens = aglais::tokenize(text)?;
        let mut out = io::stdout().lock();
        if args.tokens {
            util::write_tokens(&mut out, &tokens).map_err(Error::StdioWriteFail)?;
        }
        if args.highlight {
            util::write_highlighted(&mut out, source, &tokens).map_err(Error::StdioWriteFail)?;
        }
        out.flush().map_err(Error::StdioWriteFail)?;
    }

    if args.pipeline {
        log::info!("checking with a channel of {} tokens", args.capacity);
        pipeline::check_pipelined(text, args.capacity)?;
    } else {
        aglais::parse_src(text)?;
    }
    Ok(format!("OK, {} lines", source.line_count()))
}
