//! # Strand
//!
//! A parser-combinator engine over string input. Parsers are plain values built from
//! a few primitives and combinators; nothing runs until [`Parser::run`] is called
//! with an input.
//!
//! ```rust
//! use strand::{between, digits, literal, sep_by1};
//!
//! let list = between(literal("["), literal("]"), sep_by1(literal(","), digits()));
//! let state = list.run("[1,2,3]");
//! assert_eq!(state.result(), Some(&vec!["1".to_string(), "2".to_string(), "3".to_string()]));
//! assert_eq!(state.index(), 7);
//! ```
//!
//! Every step threads an immutable [`ParseState`]. A failure is a state too, carrying a
//! [`ParseError`] with the index it was detected at; nothing panics or unwinds.

pub use crate::combinators::{
    between, choice, fail, lazy, many, many1, optional, sep_by, sep_by1, sequence, success,
};
pub use crate::errors::{ErrorCategory, ErrorKind, ParseError, SourceContext};
pub use crate::parser::Parser;
pub use crate::primitives::{
    digits, floating_point, letters, letters_or_digits, literal, optional_whitespace, pattern,
    whitespace,
};
pub use crate::state::ParseState;

pub mod cli;
pub mod combinators;
pub mod errors;
pub mod parser;
pub mod primitives;
pub mod state;
