//! Sequence and choice over any number of parsers.
//!
//! Parser lists are tuples (arity 1 through 8, mixed output types for
//! sequences) or `Vec`s (homogeneous, any length). An empty list is a
//! contract violation and panics when the combinator is built.

use crate::outcome::Outcome;
use crate::stream::Stream;
use crate::traits::Parser;

/// A list of parsers run one after another, each on the previous remaining
/// stream. All members share one error type.
pub trait Sequence<S: Stream> {
    type Output;
    type Error;

    fn arity(&self) -> usize;
    fn parse_all(&self, stream: S) -> Outcome<Self::Output, S, Self::Error>;
}

/// A list of same-typed alternatives for [`ordered_choice`].
pub trait Alternatives<S: Stream> {
    type Output;
    type Error;

    fn arity(&self) -> usize;
    fn choose(&self, stream: S) -> Outcome<Self::Output, S, Self::Error>;
}

/// A list of `(lookahead, continuation)` pairs for [`predictive_choice`].
pub trait Predictions<S: Stream> {
    type Output;
    type Error;

    fn arity(&self) -> usize;
    fn predict(&self, stream: S) -> Outcome<Self::Output, S, Self::Error>;
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

macro_rules! impl_sequence {
    ($first:ident $(, $rest:ident)*) => {
        impl<S, $first, $($rest,)*> Sequence<S> for ($first, $($rest,)*)
        where
            S: Stream,
            $first: Parser<S>,
            $($rest: Parser<S, Error = <$first as Parser<S>>::Error>,)*
        {
            type Output = (<$first as Parser<S>>::Output, $(<$rest as Parser<S>>::Output,)*);
            type Error = <$first as Parser<S>>::Error;

            fn arity(&self) -> usize {
                count!($first $($rest)*)
            }

            #[allow(non_snake_case)]
            fn parse_all(&self, stream: S) -> Outcome<Self::Output, S, Self::Error> {
                let ($first, $($rest,)*) = self;
                let ($first, stream) = $first.parse(stream)?;
                $(let ($rest, stream) = $rest.parse(stream)?;)*
                Ok((($first, $($rest,)*), stream))
            }
        }
    };
}

impl_sequence!(A);
impl_sequence!(A, B);
impl_sequence!(A, B, C);
impl_sequence!(A, B, C, D);
impl_sequence!(A, B, C, D, F);
impl_sequence!(A, B, C, D, F, G);
impl_sequence!(A, B, C, D, F, G, H);
impl_sequence!(A, B, C, D, F, G, H, I);

impl<S, P> Sequence<S> for Vec<P>
where
    S: Stream,
    P: Parser<S>,
{
    type Output = Vec<P::Output>;
    type Error = P::Error;

    fn arity(&self) -> usize {
        self.len()
    }

    fn parse_all(&self, stream: S) -> Outcome<Vec<P::Output>, S, P::Error> {
        let mut values = Vec::with_capacity(self.len());
        let mut current = stream;
        for parser in self {
            let (value, rest) = parser.parse(current)?;
            values.push(value);
            current = rest;
        }
        Ok((values, current))
    }
}

macro_rules! impl_alternatives {
    ($($init:ident),* ; $last:ident) => {
        impl<S, $($init,)* $last> Alternatives<S> for ($($init,)* $last,)
        where
            S: Stream,
            $last: Parser<S>,
            $($init: Parser<S, Output = <$last as Parser<S>>::Output, Error = <$last as Parser<S>>::Error>,)*
        {
            type Output = <$last as Parser<S>>::Output;
            type Error = <$last as Parser<S>>::Error;

            fn arity(&self) -> usize {
                count!($($init)* $last)
            }

            #[allow(non_snake_case)]
            fn choose(&self, stream: S) -> Outcome<Self::Output, S, Self::Error> {
                let ($($init,)* $last,) = self;
                $(
                    if let Ok(success) = $init.parse(stream.clone()) {
                        return Ok(success);
                    }
                )*
                $last.parse(stream)
            }
        }
    };
}

impl_alternatives!(; A);
impl_alternatives!(A ; B);
impl_alternatives!(A, B ; C);
impl_alternatives!(A, B, C ; D);
impl_alternatives!(A, B, C, D ; F);
impl_alternatives!(A, B, C, D, F ; G);
impl_alternatives!(A, B, C, D, F, G ; H);
impl_alternatives!(A, B, C, D, F, G, H ; I);

impl<S, P> Alternatives<S> for Vec<P>
where
    S: Stream,
    P: Parser<S>,
{
    type Output = P::Output;
    type Error = P::Error;

    fn arity(&self) -> usize {
        self.len()
    }

    fn choose(&self, stream: S) -> Outcome<P::Output, S, P::Error> {
        let (last, init) = self
            .split_last()
            .unwrap_or_else(|| panic!("ordered_choice requires at least one alternative"));
        for parser in init {
            if let Ok(success) = parser.parse(stream.clone()) {
                return Ok(success);
            }
        }
        last.parse(stream)
    }
}

macro_rules! impl_predictions {
    ($(($init_l:ident, $init_c:ident)),* ; ($last_l:ident, $last_c:ident)) => {
        impl<S, $($init_l, $init_c,)* $last_l, $last_c> Predictions<S>
            for ($(($init_l, $init_c),)* ($last_l, $last_c),)
        where
            S: Stream,
            $last_l: Parser<S>,
            $last_c: Parser<S, Error = <$last_l as Parser<S>>::Error>,
            $(
                $init_l: Parser<S, Error = <$last_l as Parser<S>>::Error>,
                $init_c: Parser<S, Output = <$last_c as Parser<S>>::Output, Error = <$last_l as Parser<S>>::Error>,
            )*
        {
            type Output = <$last_c as Parser<S>>::Output;
            type Error = <$last_l as Parser<S>>::Error;

            fn arity(&self) -> usize {
                count!($($init_l)* $last_l)
            }

            #[allow(non_snake_case)]
            fn predict(&self, stream: S) -> Outcome<Self::Output, S, Self::Error> {
                let ($(($init_l, $init_c),)* ($last_l, $last_c),) = self;
                $(
                    if let Ok((_, rest)) = $init_l.parse(stream.clone()) {
                        return $init_c.parse(rest);
                    }
                )*
                let (_, rest) = $last_l.parse(stream)?;
                $last_c.parse(rest)
            }
        }
    };
}

impl_predictions!(; (A, Z));
impl_predictions!((A, Z) ; (B, Y));
impl_predictions!((A, Z), (B, Y) ; (C, X));
impl_predictions!((A, Z), (B, Y), (C, X) ; (D, W));
impl_predictions!((A, Z), (B, Y), (C, X), (D, W) ; (F, V));
impl_predictions!((A, Z), (B, Y), (C, X), (D, W), (F, V) ; (G, U));
impl_predictions!((A, Z), (B, Y), (C, X), (D, W), (F, V), (G, U) ; (H, T));
impl_predictions!((A, Z), (B, Y), (C, X), (D, W), (F, V), (G, U), (H, T) ; (I, R));

impl<S, L, C> Predictions<S> for Vec<(L, C)>
where
    S: Stream,
    L: Parser<S>,
    C: Parser<S, Error = L::Error>,
{
    type Output = C::Output;
    type Error = L::Error;

    fn arity(&self) -> usize {
        self.len()
    }

    fn predict(&self, stream: S) -> Outcome<C::Output, S, L::Error> {
        let ((last_lookahead, last_continuation), init) = self
            .split_last()
            .unwrap_or_else(|| panic!("predictive_choice requires at least one alternative"));
        for (lookahead, continuation) in init {
            if let Ok((_, rest)) = lookahead.parse(stream.clone()) {
                return continuation.parse(rest);
            }
        }
        let (_, rest) = last_lookahead.parse(stream)?;
        last_continuation.parse(rest)
    }
}

/// Runs `parsers` in order, each on the remaining stream of the previous,
/// and combines their values with `combine`. The first failure aborts.
///
/// # Panics
///
/// Panics if `parsers` is empty.
pub fn sequence<S, L, U, F>(parsers: L, combine: F) -> impl Parser<S, Output = U, Error = L::Error>
where
    S: Stream,
    L: Sequence<S>,
    F: Fn(L::Output) -> U,
{
    assert!(parsers.arity() > 0, "sequence requires at least one parser");
    move |stream: S| -> Outcome<U, S, L::Error> {
        let (values, rest) = parsers.parse_all(stream)?;
        Ok((combine(values), rest))
    }
}

/// Tries each alternative on the same input; the first success wins.
///
/// When every alternative fails, the failure of the last one is returned.
///
/// # Panics
///
/// Panics if `alternatives` is empty.
pub fn ordered_choice<S, L>(alternatives: L) -> impl Parser<S, Output = L::Output, Error = L::Error>
where
    S: Stream,
    L: Alternatives<S>,
{
    assert!(alternatives.arity() > 0, "ordered_choice requires at least one alternative");
    move |stream: S| -> Outcome<L::Output, S, L::Error> { alternatives.choose(stream) }
}

/// Commits to the first pair whose lookahead succeeds.
///
/// The paired continuation runs on the stream after the lookahead; its
/// result is final even when it fails. When no lookahead succeeds, the last
/// lookahead's failure is returned.
///
/// # Panics
///
/// Panics if `predictions` is empty.
pub fn predictive_choice<S, L>(predictions: L) -> impl Parser<S, Output = L::Output, Error = L::Error>
where
    S: Stream,
    L: Predictions<S>,
{
    assert!(predictions.arity() > 0, "predictive_choice requires at least one alternative");
    move |stream: S| -> Outcome<L::Output, S, L::Error> { predictions.predict(stream) }
}
