use std::sync::Arc;

/// A persistent, pull-based cursor over items.
///
/// `advance` never mutates the stream it is called on: it returns the next
/// item together with a *new* stream positioned after it. Keeping an old
/// stream value around and parsing from it again is how backtracking works.
///
/// Each stream carries an opaque data payload threaded alongside parsing.
/// The payload is replaced by value through [`Stream::with_data`]; it should
/// be cheap to clone (`Rc`-based side tables, small counters, ...).
pub trait Stream: Clone {
    type Item;
    type Data: Clone;

    /// Returns the next item and the stream after it, or `None` at end of input.
    fn advance(&self) -> Option<(Self::Item, Self)>;

    /// Monotonically increasing position (index or byte offset) of this stream.
    fn position(&self) -> usize;

    /// The user data payload.
    fn data(&self) -> &Self::Data;

    /// Returns a stream at the same position carrying `data`.
    fn with_data(&self, data: Self::Data) -> Self;

    /// Returns true if no items remain.
    fn is_at_end(&self) -> bool {
        self.advance().is_none()
    }
}

/// Stream over a shared, fully materialized sequence of items.
///
/// Advancing is an index increment; the items themselves are never copied,
/// only cloned out one at a time as they are consumed.
#[derive(Debug, Clone)]
pub struct SliceStream<I, D = ()> {
    items: Arc<[I]>,
    index: usize,
    data: D,
}

impl<I, D> SliceStream<I, D> {
    /// Creates a stream at the start of `items`.
    pub fn new(items: impl Into<Arc<[I]>>, data: D) -> Self {
        Self {
            items: items.into(),
            index: 0,
            data,
        }
    }

    /// Returns the items not yet consumed.
    pub fn remaining(&self) -> &[I] {
        &self.items[self.index..]
    }

    /// Returns the whole underlying sequence.
    pub fn items(&self) -> &[I] {
        &self.items
    }
}

impl<I, D> Stream for SliceStream<I, D>
where
    I: Clone,
    D: Clone,
{
    type Item = I;
    type Data = D;

    fn advance(&self) -> Option<(I, Self)> {
        let item = self.items.get(self.index)?.clone();
        let next = Self {
            items: Arc::clone(&self.items),
            index: self.index + 1,
            data: self.data.clone(),
        };
        Some((item, next))
    }

    fn position(&self) -> usize {
        self.index
    }

    fn data(&self) -> &D {
        &self.data
    }

    fn with_data(&self, data: D) -> Self {
        Self {
            items: Arc::clone(&self.items),
            index: self.index,
            data,
        }
    }

    fn is_at_end(&self) -> bool {
        self.index >= self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_does_not_mutate() {
        let start = SliceStream::new(vec![1, 2, 3], ());
        let (first, next) = start.advance().unwrap();
        assert_eq!(first, 1);
        assert_eq!(start.position(), 0);
        assert_eq!(next.position(), 1);
        // The original stream can be advanced again
        assert_eq!(start.advance().unwrap().0, 1);
    }

    #[test]
    fn test_end_of_input() {
        let stream = SliceStream::new(Vec::<u8>::new(), ());
        assert!(stream.is_at_end());
        assert!(stream.advance().is_none());
    }

    #[test]
    fn test_with_data_keeps_position() {
        let stream = SliceStream::new(vec!['a', 'b'], 0u32);
        let (_, next) = stream.advance().unwrap();
        let updated = next.with_data(7);
        assert_eq!(updated.position(), 1);
        assert_eq!(*updated.data(), 7);
        assert_eq!(*next.data(), 0);
        assert_eq!(updated.remaining(), &['b']);
        assert_eq!(updated.items(), &['a', 'b']);
    }
}
