//! Single-token matching, constants, and payload access.

use crate::error::StreamError;
use crate::outcome::Outcome;
use crate::stream::Stream;
use crate::traits::Parser;

/// Consumes one item if `predicate` accepts it, else fails with `error`.
///
/// Fails with [`StreamError::EndOfInput`] when no item remains.
pub fn satisfy<S, E, F>(predicate: F, error: E) -> impl Parser<S, Output = S::Item, Error = E>
where
    S: Stream,
    E: Clone + From<StreamError>,
    F: Fn(&S::Item) -> bool,
{
    move |stream: S| -> Outcome<S::Item, S, E> {
        match stream.advance() {
            None => Err(StreamError::EndOfInput.into()),
            Some((item, rest)) if predicate(&item) => Ok((item, rest)),
            Some(_) => Err(error.clone()),
        }
    }
}

/// Consumes one item unconditionally.
pub fn any_item<S, E>() -> impl Parser<S, Output = S::Item, Error = E>
where
    S: Stream,
    E: From<StreamError>,
{
    move |stream: S| -> Outcome<S::Item, S, E> {
        stream
            .advance()
            .ok_or_else(|| StreamError::EndOfInput.into())
    }
}

/// Succeeds, consuming nothing, only at end of input.
pub fn eos<S, E>() -> impl Parser<S, Output = (), Error = E>
where
    S: Stream,
    E: From<StreamError>,
{
    move |stream: S| -> Outcome<(), S, E> {
        if stream.is_at_end() {
            Ok(((), stream))
        } else {
            Err(StreamError::EndExpected.into())
        }
    }
}

/// Always succeeds with `value` without consuming input. Never fails.
pub fn constant<S, T, E>(value: T) -> impl Parser<S, Output = T, Error = E>
where
    S: Stream,
    T: Clone,
{
    move |stream: S| -> Outcome<T, S, E> { Ok((value.clone(), stream)) }
}

/// Always fails with `error` without consuming input.
pub fn always_fail<S, T, E>(error: E) -> impl Parser<S, Output = T, Error = E>
where
    S: Stream,
    E: Clone,
{
    move |_stream: S| -> Outcome<T, S, E> { Err(error.clone()) }
}

/// Produces the current data payload.
pub fn get_data<S, E>() -> impl Parser<S, Output = S::Data, Error = E>
where
    S: Stream,
{
    move |stream: S| -> Outcome<S::Data, S, E> {
        let data = stream.data().clone();
        Ok((data, stream))
    }
}

/// Replaces the data payload for everything parsed after this point.
pub fn set_data<S, E>(data: S::Data) -> impl Parser<S, Output = (), Error = E>
where
    S: Stream,
{
    move |stream: S| -> Outcome<(), S, E> { Ok(((), stream.with_data(data.clone()))) }
}

/// Replaces the payload with `f(payload)` and produces the new payload.
pub fn modify_data<S, E, F>(f: F) -> impl Parser<S, Output = S::Data, Error = E>
where
    S: Stream,
    F: Fn(&S::Data) -> S::Data,
{
    move |stream: S| -> Outcome<S::Data, S, E> {
        let data = f(stream.data());
        let next = stream.with_data(data.clone());
        Ok((data, next))
    }
}

/// Produces the current stream position, consuming nothing.
pub fn position<S, E>() -> impl Parser<S, Output = usize, Error = E>
where
    S: Stream,
{
    move |stream: S| -> Outcome<usize, S, E> {
        let position = stream.position();
        Ok((position, stream))
    }
}
