//! The `Parser` value and its transformation protocol.
//!
//! A parser is nothing but a shared transition from a state to a new state. Building
//! one never runs anything; only [`Parser::run`] (or [`Parser::parse`]) does.

use std::fmt;
use std::sync::Arc;

use crate::errors::ParseError;
use crate::state::ParseState;

type Transition<T> = Arc<dyn Fn(ParseState<()>) -> ParseState<T> + Send + Sync>;

/// A composable parser producing a `T` on success.
///
/// The transition always receives a successful state whose previous result has
/// already been consumed; failures are passed through by [`Parser::apply`] before
/// the transition is reached.
pub struct Parser<T> {
    transition: Transition<T>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            transition: Arc::clone(&self.transition),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("result", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Parser<T> {
    pub fn new<F>(transition: F) -> Self
    where
        F: Fn(ParseState<()>) -> ParseState<T> + Send + Sync + 'static,
    {
        Parser {
            transition: Arc::new(transition),
        }
    }

    /// Runs the parser over `input` from index 0.
    pub fn run(&self, input: &str) -> ParseState<T> {
        log::trace!("run: {} bytes of input", input.len());
        let state = self.apply(ParseState::initial(input));
        match state.error() {
            Some(err) => log::trace!("run failed at index {}: {}", err.index, err.message),
            None => log::trace!("run succeeded at index {}", state.index()),
        }
        state
    }

    /// Runs the parser and keeps only the outcome.
    pub fn parse(&self, input: &str) -> Result<T, ParseError> {
        self.run(input).into_result()
    }

    /// Continues from an existing state. A failed state passes through unchanged.
    pub fn apply<U>(&self, state: ParseState<U>) -> ParseState<T> {
        let (outcome, position) = state.split();
        match outcome {
            Ok(_) => (self.transition)(position),
            Err(err) => position.with_error(err),
        }
    }

    /// Transform the result of a success. Index is untouched.
    pub fn map<U: 'static, F>(self, f: F) -> Parser<U>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Parser::new(move |state| self.apply(state).map_result(&f))
    }

    /// Pick the next parser based on the value just parsed, and run it from the
    /// current position.
    pub fn chain<U: 'static, F>(self, f: F) -> Parser<U>
    where
        F: Fn(T) -> Parser<U> + Send + Sync + 'static,
    {
        Parser::new(move |state| {
            let (outcome, position) = self.apply(state).split();
            match outcome {
                Ok(value) => f(value).apply(position),
                Err(err) => position.with_error(err),
            }
        })
    }

    /// Reword the message of a failure. The failure itself, its kind and its index stay.
    pub fn error_map<F>(self, f: F) -> Parser<T>
    where
        F: Fn(&ParseError) -> String + Send + Sync + 'static,
    {
        Parser::new(move |state| {
            self.apply(state).map_error(|err| {
                let message = f(&err);
                err.with_message(message)
            })
        })
    }

    /// Replace any failure message with `expected <name>`.
    pub fn label(self, name: impl Into<String>) -> Parser<T> {
        let name = name.into();
        self.error_map(move |_| format!("expected {}", name))
    }

    /// Sequence: parse self then other, return (T, U)
    pub fn then<U: 'static>(self, other: Parser<U>) -> Parser<(T, U)> {
        Parser::new(move |state| {
            let (first, position) = self.apply(state).split();
            match first {
                Ok(a) => other.apply(position).map_result(|b| (a, b)),
                Err(err) => position.with_error(err),
            }
        })
    }

    /// Keep left: parse self then other, discard other's result
    pub fn skip<U: 'static>(self, other: Parser<U>) -> Parser<T> {
        self.then(other).map(|(a, _)| a)
    }

    /// Keep right: parse self then other, discard self's result
    pub fn skip_left<U: 'static>(self, other: Parser<U>) -> Parser<U> {
        Parser::new(move |state| other.apply(self.apply(state)))
    }
}
