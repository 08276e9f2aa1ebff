use crate::stream::Stream;
use crate::traits::Parser;

/// Result of running a parser: the produced value and the remaining stream,
/// or an error value.
pub type Outcome<T, S, E> = Result<(T, S), E>;

pub fn succeed<T, S, E>(value: T, stream: S) -> Outcome<T, S, E> {
    Ok((value, stream))
}

pub fn fail<T, S, E>(error: E) -> Outcome<T, S, E> {
    Err(error)
}

/// Transforms the value of a successful parse; failures pass through.
pub fn map_value<S, P, U, F>(parser: P, f: F) -> impl Parser<S, Output = U, Error = P::Error>
where
    S: Stream,
    P: Parser<S>,
    F: Fn(P::Output) -> U,
{
    move |stream: S| -> Outcome<U, S, P::Error> {
        parser
            .parse(stream)
            .map(|(value, rest)| (f(value), rest))
    }
}

/// Transforms the error of a failed parse; successes pass through.
pub fn map_error<S, P, E, F>(parser: P, f: F) -> impl Parser<S, Output = P::Output, Error = E>
where
    S: Stream,
    P: Parser<S>,
    F: Fn(P::Error) -> E,
{
    move |stream: S| -> Outcome<P::Output, S, E> { parser.parse(stream).map_err(&f) }
}
