//! Defines the command-line arguments and subcommands for the Strand CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand, ValueEnum};

use crate::primitives::{digits, floating_point, letters, letters_or_digits};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "strand",
    version,
    about = "Try Strand's primitive parsers and list combinators on an input string."
)]
pub struct StrandArgs {
    /// Print the outcome as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Match an exact string at the start of the input.
    Literal {
        /// The text the input must start with.
        #[arg(allow_hyphen_values = true)]
        expected: String,
        /// The input to parse.
        #[arg(allow_hyphen_values = true)]
        input: String,
    },
    /// Match one of the built-in patterns at the start of the input.
    Pattern {
        #[arg(value_enum)]
        kind: PatternKind,
        /// The input to parse.
        #[arg(allow_hyphen_values = true)]
        input: String,
    },
    /// Match one or more patterns separated by a literal.
    List {
        #[arg(value_enum)]
        item: PatternKind,
        /// The input to parse.
        #[arg(allow_hyphen_values = true)]
        input: String,
        /// The literal between items.
        #[arg(short, long, default_value = ",")]
        separator: String,
    },
}

/// The built-in pattern matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PatternKind {
    Letters,
    Digits,
    Alnum,
    Float,
}

impl PatternKind {
    pub fn parser(self) -> crate::Parser<String> {
        match self {
            PatternKind::Letters => letters(),
            PatternKind::Digits => digits(),
            PatternKind::Alnum => letters_or_digits(),
            PatternKind::Float => floating_point(),
        }
    }
}
