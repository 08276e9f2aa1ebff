//! Composition combinators: repetition, lookahead, optionality and binds.
//!
//! Repetition is iterative, never recursive, so stack depth does not grow with
//! input length. A repetition step that succeeds without moving the stream
//! ends the loop and its value is dropped; otherwise a nullable parser would
//! repeat forever.

use crate::error::StreamError;
use crate::outcome::Outcome;
use crate::primitives::eos;
use crate::stream::Stream;
use crate::traits::Parser;

/// Applies `parser` repeatedly from `current`, pushing values into `items`,
/// and returns the stream after the last successful application.
fn repeat_into<S, P>(parser: &P, items: &mut Vec<P::Output>, mut current: S) -> S
where
    S: Stream,
    P: Parser<S>,
{
    while let Ok((item, rest)) = parser.parse(current.clone()) {
        if rest.position() == current.position() {
            log::debug!("repetition stopped without progress at {}", current.position());
            break;
        }
        items.push(item);
        current = rest;
    }
    current
}

/// Zero or more: collects successes until `parser` fails. Never fails.
pub fn many<S, P, E>(parser: P) -> impl Parser<S, Output = Vec<P::Output>, Error = E>
where
    S: Stream,
    P: Parser<S>,
{
    move |stream: S| -> Outcome<Vec<P::Output>, S, E> {
        let mut items = Vec::new();
        let rest = repeat_into(&parser, &mut items, stream);
        Ok((items, rest))
    }
}

/// One or more: like [`many`], but the first application must succeed.
pub fn one_or_more<S, P>(parser: P) -> impl Parser<S, Output = Vec<P::Output>, Error = P::Error>
where
    S: Stream,
    P: Parser<S>,
{
    move |stream: S| -> Outcome<Vec<P::Output>, S, P::Error> {
        let (first, rest) = parser.parse(stream)?;
        let mut items = vec![first];
        let rest = repeat_into(&parser, &mut items, rest);
        Ok((items, rest))
    }
}

/// Loops while `condition` matches, requiring `body` after each match.
///
/// When `condition` fails the loop ends successfully; when `body` fails
/// after a matched condition, the whole loop fails with `body`'s error.
pub fn repeat_while<S, C, P>(condition: C, body: P) -> impl Parser<S, Output = Vec<P::Output>, Error = P::Error>
where
    S: Stream,
    C: Parser<S>,
    P: Parser<S>,
{
    move |stream: S| -> Outcome<Vec<P::Output>, S, P::Error> {
        let mut items = Vec::new();
        let mut current = stream;
        while let Ok((_, after_condition)) = condition.parse(current.clone()) {
            let (item, rest) = body.parse(after_condition)?;
            if rest.position() == current.position() {
                log::debug!("repeat_while stopped without progress at {}", current.position());
                break;
            }
            items.push(item);
            current = rest;
        }
        Ok((items, current))
    }
}

fn separated_by<S, P, Q>(
    parser: P,
    separator: Q,
    allow_zero: bool,
    allow_trailing: bool,
) -> impl Parser<S, Output = Vec<P::Output>, Error = P::Error>
where
    S: Stream,
    P: Parser<S>,
    Q: Parser<S>,
{
    move |stream: S| -> Outcome<Vec<P::Output>, S, P::Error> {
        let (first, mut current) = match parser.parse(stream.clone()) {
            Ok(success) => success,
            Err(_) if allow_zero => return Ok((Vec::new(), stream)),
            Err(error) => return Err(error),
        };

        let mut items = vec![first];
        while let Ok((_, after_separator)) = separator.parse(current.clone()) {
            match parser.parse(after_separator.clone()) {
                Ok((item, rest)) => {
                    if rest.position() == current.position() {
                        break;
                    }
                    items.push(item);
                    current = rest;
                }
                Err(_) if allow_trailing => {
                    current = after_separator;
                    break;
                }
                Err(error) => return Err(error),
            }
        }
        Ok((items, current))
    }
}

/// `p (sep p)*`: at least one element, no trailing separator.
pub fn separated<S, P, Q>(parser: P, separator: Q) -> impl Parser<S, Output = Vec<P::Output>, Error = P::Error>
where
    S: Stream,
    P: Parser<S>,
    Q: Parser<S>,
{
    separated_by(parser, separator, false, false)
}

/// Like [`separated`], but an empty list is accepted.
pub fn separated_allow_zero<S, P, Q>(parser: P, separator: Q) -> impl Parser<S, Output = Vec<P::Output>, Error = P::Error>
where
    S: Stream,
    P: Parser<S>,
    Q: Parser<S>,
{
    separated_by(parser, separator, true, false)
}

/// Like [`separated`], but a final separator is accepted and consumed.
pub fn separated_trailing<S, P, Q>(parser: P, separator: Q) -> impl Parser<S, Output = Vec<P::Output>, Error = P::Error>
where
    S: Stream,
    P: Parser<S>,
    Q: Parser<S>,
{
    separated_by(parser, separator, false, true)
}

/// Accepts an empty list and a trailing separator.
pub fn separated_trailing_allow_zero<S, P, Q>(parser: P, separator: Q) -> impl Parser<S, Output = Vec<P::Output>, Error = P::Error>
where
    S: Stream,
    P: Parser<S>,
    Q: Parser<S>,
{
    separated_by(parser, separator, true, true)
}

/// Lookahead: runs `parser` and produces its value, but rewinds to the
/// original stream. Failures propagate.
pub fn peek<S, P>(parser: P) -> impl Parser<S, Output = P::Output, Error = P::Error>
where
    S: Stream,
    P: Parser<S>,
{
    move |stream: S| -> Outcome<P::Output, S, P::Error> {
        let (value, _) = parser.parse(stream.clone())?;
        Ok((value, stream))
    }
}

/// Optional: `None` on the original stream when `parser` fails. Never fails.
pub fn maybe<S, P, E>(parser: P) -> impl Parser<S, Output = Option<P::Output>, Error = E>
where
    S: Stream,
    P: Parser<S>,
{
    move |stream: S| -> Outcome<Option<P::Output>, S, E> {
        match parser.parse(stream.clone()) {
            Ok((value, rest)) => Ok((Some(value), rest)),
            Err(_) => Ok((None, stream)),
        }
    }
}

/// Optional group: if `first` fails the group is absent (`None`, nothing
/// consumed); once `first` matched, `second` is required.
pub fn soft_sequence<S, P, Q, U, F>(first: P, second: Q, combine: F) -> impl Parser<S, Output = Option<U>, Error = Q::Error>
where
    S: Stream,
    P: Parser<S>,
    Q: Parser<S>,
    F: Fn(P::Output, Q::Output) -> U,
{
    move |stream: S| -> Outcome<Option<U>, S, Q::Error> {
        let (a, rest) = match first.parse(stream.clone()) {
            Ok(success) => success,
            Err(_) => return Ok((None, stream)),
        };
        let (b, rest) = second.parse(rest)?;
        Ok((Some(combine(a, b)), rest))
    }
}

/// Swaps the channels of `parser`, consuming nothing either way.
///
/// A failure of `parser` becomes a success producing its error; a success
/// becomes a failure carrying its value. Used for "anything but X".
pub fn negate<S, P>(parser: P) -> impl Parser<S, Output = P::Error, Error = P::Output>
where
    S: Stream,
    P: Parser<S>,
{
    move |stream: S| -> Outcome<P::Error, S, P::Output> {
        match parser.parse(stream.clone()) {
            Ok((value, _)) => Err(value),
            Err(error) => Ok((error, stream)),
        }
    }
}

/// Bind over the error channel: on failure with `e`, runs `f(e)` on the
/// original stream.
pub fn recover<S, P, Q, F>(parser: P, f: F) -> impl Parser<S, Output = P::Output, Error = Q::Error>
where
    S: Stream,
    P: Parser<S>,
    Q: Parser<S, Output = P::Output>,
    F: Fn(P::Error) -> Q,
{
    move |stream: S| -> Outcome<P::Output, S, Q::Error> {
        match parser.parse(stream.clone()) {
            Ok(success) => Ok(success),
            Err(error) => f(error).parse(stream),
        }
    }
}

/// Bind over the success channel: on success with `v`, runs `f(v)` on the
/// remaining stream.
pub fn inspect<S, P, Q, F>(parser: P, f: F) -> impl Parser<S, Output = Q::Output, Error = P::Error>
where
    S: Stream,
    P: Parser<S>,
    Q: Parser<S, Error = P::Error>,
    F: Fn(P::Output) -> Q,
{
    move |stream: S| -> Outcome<Q::Output, S, P::Error> {
        let (value, rest) = parser.parse(stream)?;
        f(value).parse(rest)
    }
}

/// `parser` followed by end of input.
pub fn terminated<S, P>(parser: P) -> impl Parser<S, Output = P::Output, Error = P::Error>
where
    S: Stream,
    P: Parser<S>,
    P::Error: From<StreamError>,
{
    let end = eos::<S, P::Error>();
    move |stream: S| -> Outcome<P::Output, S, P::Error> {
        let (value, rest) = parser.parse(stream)?;
        let ((), rest) = end.parse(rest)?;
        Ok((value, rest))
    }
}
