//! The Strand Command-Line Interface.
//!
//! A small playground for the built-in parsers: every subcommand builds a parser,
//! runs it once over the given input and reports the final state.

use crate::cli::args::{Command, StrandArgs};
use crate::cli::output::{OutputSink, Outcome, StdoutSink};
use crate::combinators::sep_by1;
use crate::errors::{print_error, Diagnosis, SourceContext};
use crate::primitives::literal;
use clap::Parser;
use std::process;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = StrandArgs::parse();

    if let Err(diagnosis) = execute(&args, &mut StdoutSink) {
        if !args.json {
            print_error(diagnosis);
        }
        process::exit(1);
    }
}

/// Runs one subcommand, writing its output to `sink`.
///
/// A failed parse comes back as a diagnosis over the input; in JSON mode the failure
/// has already been written to the sink as well.
pub fn execute(args: &StrandArgs, sink: &mut dyn OutputSink) -> Result<(), Diagnosis> {
    let (outcome, input) = match &args.command {
        Command::Literal { expected, input } => {
            (Outcome::from_state(&literal(expected.as_str()).run(input)), input)
        }
        Command::Pattern { kind, input } => (Outcome::from_state(&kind.parser().run(input)), input),
        Command::List {
            item,
            input,
            separator,
        } => {
            let list = sep_by1(literal(separator.as_str()), item.parser());
            (Outcome::from_state(&list.run(input)), input)
        }
    };

    if args.json {
        sink.emit(&outcome.to_json());
    } else if outcome.is_success() {
        for line in outcome.describe() {
            sink.emit(&line);
        }
    }

    match outcome.error {
        Some(error) => Err(error.diagnose(&SourceContext::new("input", input.as_str()))),
        None => Ok(()),
    }
}
