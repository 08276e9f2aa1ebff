use crate::outcome::Outcome;
use crate::stream::Stream;
use crate::traits::Parser;
use std::rc::Rc;

/// Stream decorator that maps every item through a filter as it is read.
///
/// Position and data are those of the wrapped stream, so a parser running on
/// a filtered view consumes exactly what it would consume on the original.
pub struct Filtered<S, F> {
    inner: S,
    filter: Rc<F>,
}

impl<S, F> Filtered<S, F> {
    pub fn new(inner: S, filter: F) -> Self {
        Self {
            inner,
            filter: Rc::new(filter),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drops the filter and returns the unfiltered stream at the same position.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Clone, F> Clone for Filtered<S, F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            filter: Rc::clone(&self.filter),
        }
    }
}

impl<S, F> Stream for Filtered<S, F>
where
    S: Stream,
    F: Fn(S::Item) -> S::Item,
{
    type Item = S::Item;
    type Data = S::Data;

    fn advance(&self) -> Option<(S::Item, Self)> {
        let (item, rest) = self.inner.advance()?;
        let next = Self {
            inner: rest,
            filter: Rc::clone(&self.filter),
        };
        Some(((self.filter)(item), next))
    }

    fn position(&self) -> usize {
        self.inner.position()
    }

    fn data(&self) -> &S::Data {
        self.inner.data()
    }

    fn with_data(&self, data: S::Data) -> Self {
        Self {
            inner: self.inner.with_data(data),
            filter: Rc::clone(&self.filter),
        }
    }

    fn is_at_end(&self) -> bool {
        self.inner.is_at_end()
    }
}

/// Runs `parser` against a view of the stream whose items pass through
/// `filter`, then continues on the unfiltered stream.
///
/// The filter applies only inside `parser`; whatever follows sees the
/// original items again.
pub fn with_filter<S, F, P>(filter: F, parser: P) -> impl Parser<S, Output = P::Output, Error = P::Error>
where
    S: Stream,
    F: Fn(S::Item) -> S::Item,
    P: Parser<Filtered<S, F>>,
{
    let filter = Rc::new(filter);
    move |stream: S| -> Outcome<P::Output, S, P::Error> {
        let view = Filtered {
            inner: stream,
            filter: Rc::clone(&filter),
        };
        parser
            .parse(view)
            .map(|(value, rest)| (value, rest.into_inner()))
    }
}
