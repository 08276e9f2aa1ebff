use crate::outcome::{map_error, map_value, Outcome};
use crate::stream::Stream;
use crate::traits::Parser;
use crate::variadic::{ordered_choice, sequence};
use once_cell::unsync::OnceCell;
use std::rc::Rc;

/// A type-erased, cheaply clonable parser.
///
/// Boxing is how a parser is shared between several places in a grammar and
/// how recursive rules get a nameable type (see [`forward`]).
pub struct BoxedParser<S, T, E> {
    parser: Rc<dyn Parser<S, Output = T, Error = E>>,
}

impl<S, T, E> Clone for BoxedParser<S, T, E> {
    fn clone(&self) -> Self {
        Self {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<S: Stream, T, E> BoxedParser<S, T, E> {
    pub fn new<P>(parser: P) -> Self
    where
        P: Parser<S, Output = T, Error = E> + 'static,
    {
        Self {
            parser: Rc::new(parser),
        }
    }
}

impl<S: Stream, T, E> Parser<S> for BoxedParser<S, T, E> {
    type Output = T;
    type Error = E;

    fn parse(&self, stream: S) -> Outcome<T, S, E> {
        self.parser.parse(stream)
    }
}

// === Combinators as methods ===

impl<S, T, E> BoxedParser<S, T, E>
where
    S: Stream + 'static,
    T: 'static,
    E: 'static,
{
    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> BoxedParser<S, U, E> {
        map_value(self, f).boxed()
    }

    pub fn map_error<E2: 'static, F: Fn(E) -> E2 + 'static>(self, f: F) -> BoxedParser<S, T, E2> {
        map_error(self, f).boxed()
    }

    /// Sequence: parse self then other, return both values.
    pub fn then<U: 'static>(self, other: BoxedParser<S, U, E>) -> BoxedParser<S, (T, U), E> {
        sequence((self, other), |pair: (T, U)| pair).boxed()
    }

    /// Keep left: parse self then other, discard other's value.
    pub fn skip<U: 'static>(self, other: BoxedParser<S, U, E>) -> BoxedParser<S, T, E> {
        sequence((self, other), |(value, _): (T, U)| value).boxed()
    }

    /// Keep right: parse self then other, discard self's value.
    pub fn skip_left<U: 'static>(self, other: BoxedParser<S, U, E>) -> BoxedParser<S, U, E> {
        sequence((self, other), |(_, value): (T, U)| value).boxed()
    }

    /// Ordered choice of two: try self, then other on the same input.
    pub fn or(self, other: BoxedParser<S, T, E>) -> BoxedParser<S, T, E> {
        ordered_choice((self, other)).boxed()
    }
}

/// Defers building a parser until it is first run.
///
/// Recursive rules refer to themselves through `forward`, which breaks the
/// otherwise infinite eager construction of the combinator graph. `build`
/// runs at most once per `forward` instance.
pub fn forward<S, T, E, F>(build: F) -> impl Parser<S, Output = T, Error = E>
where
    S: Stream,
    F: Fn() -> BoxedParser<S, T, E>,
{
    let built: OnceCell<BoxedParser<S, T, E>> = OnceCell::new();
    move |stream: S| -> Outcome<T, S, E> {
        let parser = built.get_or_init(|| {
            log::debug!("building deferred parser");
            build()
        });
        parser.parse(stream)
    }
}
