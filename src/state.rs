//! The parse state threaded through every step.
//!
//! A state is never mutated once built. Every transition consumes the state it was
//! given and returns a freshly derived one, so two alternatives tried from the same
//! state (a clone of it) cannot observe each other.

use std::sync::Arc;

use crate::errors::ParseError;

/// Parsing progress of one input string at one moment.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseState<T> {
    input: Arc<str>,
    index: usize,
    result: Result<T, ParseError>,
}

impl ParseState<()> {
    /// The state a run starts from: index 0, success, no result.
    pub fn initial(input: impl Into<Arc<str>>) -> Self {
        Self {
            input: input.into(),
            index: 0,
            result: Ok(()),
        }
    }
}

impl<T> ParseState<T> {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The unconsumed part of the input.
    pub fn remainder(&self) -> &str {
        &self.input[self.index..]
    }

    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }

    /// The produced value, if this state is a success.
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.result.as_ref().err()
    }

    /// Consumes the state, keeping only its outcome.
    pub fn into_result(self) -> Result<T, ParseError> {
        self.result
    }

    /// Move forward by `consumed` bytes and record `result`.
    ///
    /// `consumed` must land on a char boundary within the input.
    pub fn advance<U>(self, consumed: usize, result: U) -> ParseState<U> {
        let index = self.index + consumed;
        debug_assert!(index <= self.input.len());
        ParseState {
            input: self.input,
            index,
            result: Ok(result),
        }
    }

    /// Same position, new result.
    pub fn with_result<U>(self, result: U) -> ParseState<U> {
        ParseState {
            input: self.input,
            index: self.index,
            result: Ok(result),
        }
    }

    /// Same position, now a failure.
    pub fn with_error<U>(self, error: ParseError) -> ParseState<U> {
        ParseState {
            input: self.input,
            index: self.index,
            result: Err(error),
        }
    }

    /// Splits a state into its outcome and a result-less copy of its position.
    ///
    /// The copy is what the next transition runs from; the outcome is whatever this
    /// step produced (or the failure to propagate).
    pub fn split(self) -> (Result<T, ParseError>, ParseState<()>) {
        let position = ParseState {
            input: Arc::clone(&self.input),
            index: self.index,
            result: Ok(()),
        };
        (self.result, position)
    }

    /// Transforms the result of a success; failures pass through untouched.
    pub fn map_result<U>(self, f: impl FnOnce(T) -> U) -> ParseState<U> {
        ParseState {
            input: self.input,
            index: self.index,
            result: self.result.map(f),
        }
    }

    /// Rewrites the error of a failure; successes pass through untouched.
    pub fn map_error(self, f: impl FnOnce(ParseError) -> ParseError) -> ParseState<T> {
        ParseState {
            input: self.input,
            index: self.index,
            result: self.result.map_err(f),
        }
    }
}
