use crate::boxed::BoxedParser;
use crate::outcome::Outcome;
use crate::stream::Stream;

/// A parser over streams of type `S`.
///
/// Parsers hold no state between calls: anything a parse needs to remember
/// lives in the stream's data payload or was captured when the parser was
/// built. Any `Fn(S) -> Outcome<T, S, E>` closure is a parser.
pub trait Parser<S> {
    /// Value produced on success.
    type Output;
    /// Value produced on failure.
    type Error;

    /// Runs the parser. On success the returned stream is at or after `stream`.
    fn parse(&self, stream: S) -> Outcome<Self::Output, S, Self::Error>;

    /// Erases the parser's type behind a shared pointer.
    fn boxed(self) -> BoxedParser<S, Self::Output, Self::Error>
    where
        Self: Sized + 'static,
        S: Stream,
    {
        BoxedParser::new(self)
    }
}

impl<S, T, E, F> Parser<S> for F
where
    S: Stream,
    F: Fn(S) -> Outcome<T, S, E>,
{
    type Output = T;
    type Error = E;

    fn parse(&self, stream: S) -> Outcome<T, S, E> {
        self(stream)
    }
}
