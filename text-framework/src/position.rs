//! Position tagging, lexical tokens and line/column lookup.

use crate::error::TextError;
use combinator_framework::{Outcome, Parser, Stream};
use common_framework::{LineOffsetTable, Location};
use std::rc::Rc;

/// A value (or error) tagged with the stream position where parsing began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positioned<T> {
    pub position: usize,
    pub value: T,
}

/// Tags both the success value and the error of `parser` with the entry
/// position.
pub fn with_position<S, P>(
    parser: P,
) -> impl Parser<S, Output = Positioned<P::Output>, Error = Positioned<P::Error>>
where
    S: Stream,
    P: Parser<S>,
{
    move |stream: S| -> Outcome<Positioned<P::Output>, S, Positioned<P::Error>> {
        let position = stream.position();
        match parser.parse(stream) {
            Ok((value, rest)) => Ok((Positioned { position, value }, rest)),
            Err(value) => Err(Positioned { position, value }),
        }
    }
}

/// A lexical token with its source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<K, V> {
    pub kind: K,
    pub value: V,
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl<K, V> Token<K, V> {
    pub fn new(kind: K, value: V, start: usize, end: usize) -> Self {
        Self {
            kind,
            value,
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Runs `parser` and hands its result to the mappers together with the span.
///
/// `on_success` receives the value with the start and end positions;
/// `on_error` receives the error with the start position.
pub fn token<S, P, T, E, F, G>(
    parser: P,
    on_success: F,
    on_error: G,
) -> impl Parser<S, Output = T, Error = E>
where
    S: Stream,
    P: Parser<S>,
    F: Fn(P::Output, usize, usize) -> T,
    G: Fn(P::Error, usize) -> E,
{
    move |stream: S| -> Outcome<T, S, E> {
        let start = stream.position();
        match parser.parse(stream) {
            Ok((value, rest)) => {
                let end = rest.position();
                Ok((on_success(value, start, end), rest))
            }
            Err(error) => Err(on_error(error, start)),
        }
    }
}

/// Resolves the current position through `table`, consuming nothing.
///
/// Fails with [`TextError::InvalidPosition`] when the position lies outside
/// the source the table was built from.
pub fn line_col<S>(table: Rc<LineOffsetTable>) -> impl Parser<S, Output = Location, Error = TextError>
where
    S: Stream,
{
    move |stream: S| -> Outcome<Location, S, TextError> {
        let location = table.locate(stream.position())?;
        Ok((location, stream))
    }
}
