//! Primitive parsers: the ones that look at raw input.
//!
//! All of them are pure over `(input, index)`, which is what lets `choice` retry
//! alternatives from one shared state.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::combinators::optional;
use crate::errors::ParseError;
use crate::parser::Parser;

static LETTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+").expect("letters regex init failed"));
static DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+").expect("digits regex init failed"));
static LETTERS_OR_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z]+").expect("alphanumeric regex init failed"));
static FLOATING_POINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]*\.?[0-9]+").expect("float regex init failed"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+").expect("whitespace regex init failed"));

/// Matches exactly `expected`.
///
/// Fails with an end-of-input error when nothing is left, even for an empty literal.
pub fn literal(expected: impl Into<String>) -> Parser<String> {
    let expected = expected.into();
    Parser::new(move |state| {
        let index = state.index();
        if state.remainder().is_empty() {
            return state.with_error(ParseError::end_of_input(index));
        }
        if state.remainder().starts_with(expected.as_str()) {
            let consumed = expected.len();
            return state.advance(consumed, expected.clone());
        }
        let err = ParseError::literal_mismatch(index, &expected, state.remainder());
        state.with_error(err)
    })
}

/// Builds a matcher for `pattern`, anchored at the current position.
///
/// `name` is what failure messages call the pattern.
pub fn pattern(name: impl Into<String>, pattern: &str) -> Result<Parser<String>, regex::Error> {
    let anchored = Regex::new(&format!("^(?:{})", pattern))?;
    Ok(regex_parser(name.into(), anchored))
}

fn regex_parser(name: String, regex: Regex) -> Parser<String> {
    Parser::new(move |state| {
        let index = state.index();
        if state.remainder().is_empty() {
            return state.with_error(ParseError::end_of_input(index));
        }
        let matched = regex
            .find(state.remainder())
            .map(|found| found.as_str().to_string());
        match matched {
            Some(matched) => state.advance(matched.len(), matched),
            None => state.with_error(ParseError::pattern_mismatch(index, &name)),
        }
    })
}

/// One or more ASCII letters.
pub fn letters() -> Parser<String> {
    regex_parser("letters".into(), LETTERS.clone())
}

/// One or more ASCII digits.
pub fn digits() -> Parser<String> {
    regex_parser("digits".into(), DIGITS.clone())
}

pub fn letters_or_digits() -> Parser<String> {
    regex_parser("letters or digits".into(), LETTERS_OR_DIGITS.clone())
}

/// An optional `-`, digits, and an optional fraction. No exponent, no leading `+`.
pub fn floating_point() -> Parser<String> {
    regex_parser("floating point number".into(), FLOATING_POINT.clone())
}

pub fn whitespace() -> Parser<String> {
    regex_parser("whitespace".into(), WHITESPACE.clone())
}

/// Whitespace if there is any; the empty string otherwise. Never fails.
pub fn optional_whitespace() -> Parser<String> {
    optional(whitespace()).map(Option::unwrap_or_default)
}
