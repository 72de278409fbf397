//! Structural combinators: sequencing, alternation, repetition and recursion.
//!
//! Each one is a pure constructor. Nothing here closes over mutable state; loops keep
//! their bookkeeping on the stack of a single transition call.

use crate::errors::ParseError;
use crate::parser::Parser;
use crate::state::ParseState;

/// Every parser in order; the first failure fails the whole.
pub fn sequence<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    Parser::new(move |mut state: ParseState<()>| {
        let mut results = Vec::with_capacity(parsers.len());
        for parser in &parsers {
            let (outcome, next) = parser.apply(state).split();
            match outcome {
                Ok(value) => results.push(value),
                Err(err) => return next.with_error(err),
            }
            state = next;
        }
        state.with_result(results)
    })
}

/// The first alternative that succeeds, each tried from the same state.
///
/// When all of them fail, the failure that got furthest into the input is reported;
/// on a tie the later alternative wins.
pub fn choice<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    Parser::new(move |state: ParseState<()>| {
        let mut furthest: Option<ParseState<T>> = None;
        for parser in &parsers {
            let attempt = parser.apply(state.clone());
            let Some(reached) = attempt.error().map(|err| err.index) else {
                return attempt;
            };
            let best = furthest
                .as_ref()
                .and_then(|f| f.error())
                .map(|err| err.index);
            if best.map_or(true, |best| reached >= best) {
                furthest = Some(attempt);
            }
        }
        match furthest {
            Some(failure) => {
                log::debug!(
                    "choice: all {} alternatives failed, furthest at index {}",
                    parsers.len(),
                    failure.index()
                );
                failure
            }
            None => {
                let index = state.index();
                state.with_error(ParseError::no_alternative(index))
            }
        }
    })
}

/// Applies `parser` until it fails, returning what was collected and the state after
/// the last success.
///
/// A success that consumes nothing is kept but ends the loop, since repeating it
/// could never make progress.
fn repeat<T: 'static>(parser: &Parser<T>, mut state: ParseState<()>) -> (Vec<T>, ParseState<()>) {
    let mut results = Vec::new();
    loop {
        let start = state.index();
        let (outcome, next) = parser.apply(state.clone()).split();
        let Ok(value) = outcome else {
            break;
        };
        results.push(value);
        state = next;
        if state.index() == start {
            break;
        }
    }
    (results, state)
}

/// Zero or more. Never fails.
pub fn many<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    Parser::new(move |state| {
        let (results, state) = repeat(&parser, state);
        state.with_result(results)
    })
}

/// One or more.
pub fn many1<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    Parser::new(move |state| {
        let (results, state) = repeat(&parser, state);
        if results.is_empty() {
            let index = state.index();
            return state.with_error(ParseError::no_matches(index, "many1"));
        }
        state.with_result(results)
    })
}

/// Alternates `value` and `separator`, returning the values and the state after the
/// last value. A separator is only consumed when a value follows it.
fn separated<S: 'static, T: 'static>(
    separator: &Parser<S>,
    value: &Parser<T>,
    state: ParseState<()>,
) -> (Vec<T>, ParseState<()>) {
    let mut results = Vec::new();
    let (first, mut state) = match value.apply(state.clone()).split() {
        (Ok(first), next) => (first, next),
        (Err(_), _) => return (results, state),
    };
    results.push(first);
    loop {
        let start = state.index();
        let (sep, after_sep) = separator.apply(state.clone()).split();
        if sep.is_err() {
            break;
        }
        let (item, after_item) = value.apply(after_sep).split();
        let Ok(item) = item else {
            break;
        };
        results.push(item);
        state = after_item;
        if state.index() == start {
            break;
        }
    }
    (results, state)
}

/// Zero or more `value`s separated by `separator`. Never fails.
pub fn sep_by<S: 'static, T: 'static>(separator: Parser<S>, value: Parser<T>) -> Parser<Vec<T>> {
    Parser::new(move |state| {
        let (results, state) = separated(&separator, &value, state);
        state.with_result(results)
    })
}

/// One or more `value`s separated by `separator`.
pub fn sep_by1<S: 'static, T: 'static>(separator: Parser<S>, value: Parser<T>) -> Parser<Vec<T>> {
    Parser::new(move |state| {
        let (results, state) = separated(&separator, &value, state);
        if results.is_empty() {
            let index = state.index();
            return state.with_error(ParseError::no_matches(index, "sepBy1"));
        }
        state.with_result(results)
    })
}

/// `content` surrounded by `left` and `right`, keeping only the content.
pub fn between<L: 'static, R: 'static, T: 'static>(
    left: Parser<L>,
    right: Parser<R>,
    content: Parser<T>,
) -> Parser<T> {
    left.skip_left(content).skip(right)
}

/// Zero or one. Never fails; a failed attempt consumes nothing.
pub fn optional<T: 'static>(parser: Parser<T>) -> Parser<Option<T>> {
    Parser::new(move |state: ParseState<()>| {
        let attempt = parser.apply(state.clone());
        if attempt.is_error() {
            return state.with_result(None);
        }
        attempt.map_result(Some)
    })
}

/// Defers building the parser until it runs. This is how grammar rules refer to
/// themselves or to each other.
pub fn lazy<T: 'static, F>(thunk: F) -> Parser<T>
where
    F: Fn() -> Parser<T> + Send + Sync + 'static,
{
    Parser::new(move |state| thunk().apply(state))
}

/// Succeeds with `value` without consuming anything.
pub fn success<T>(value: T) -> Parser<T>
where
    T: Clone + Send + Sync + 'static,
{
    Parser::new(move |state| state.with_result(value.clone()))
}

/// Fails with `message` without consuming anything.
pub fn fail<T: 'static>(message: impl Into<String>) -> Parser<T> {
    let message = message.into();
    Parser::new(move |state| {
        let index = state.index();
        state.with_error(ParseError::custom(index, message.clone()))
    })
}
